use marquee_api::MovieSummary;

/// Result of [`Watchlist::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// A watchlist state transition, for the view layer to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchlistEvent {
    Added { title: String },
    AlreadyPresent { title: String },
    Removed { title: String },
}

impl std::fmt::Display for WatchlistEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added { title } => write!(f, "{title} added to watchlist"),
            Self::AlreadyPresent { title } => write!(f, "{title} is already in watchlist"),
            Self::Removed { .. } => write!(f, "Removed from watchlist"),
        }
    }
}

/// Session-scoped set of favorited titles, keyed by id, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    entries: Vec<MovieSummary>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|m| m.id == id)
    }

    pub fn add(&mut self, movie: MovieSummary) -> AddOutcome {
        if self.contains(&movie.id) {
            return AddOutcome::AlreadyPresent;
        }
        self.entries.push(movie);
        AddOutcome::Added
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|m| m.id != id);
        self.entries.len() != before
    }

    /// Remove `movie` if present, add it otherwise.
    pub fn toggle(&mut self, movie: &MovieSummary) -> WatchlistEvent {
        let title = movie.title.clone();
        if self.remove(&movie.id) {
            tracing::debug!(id = %movie.id, "Removed from watchlist");
            return WatchlistEvent::Removed { title };
        }
        match self.add(movie.clone()) {
            AddOutcome::Added => {
                tracing::debug!(id = %movie.id, "Added to watchlist");
                WatchlistEvent::Added { title }
            }
            AddOutcome::AlreadyPresent => WatchlistEvent::AlreadyPresent { title },
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieSummary> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&MovieSummary> {
        self.entries.get(index)
    }
}
