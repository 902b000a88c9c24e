use marquee_api::MovieSummary;

const MOVIE_PREFIX: &str = "/movie/";

/// A navigable location: the search screen or one title's detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Search,
    Movie(String),
}

impl Route {
    /// Route to the detail screen of `movie`.
    pub fn for_movie(movie: &MovieSummary) -> Self {
        Self::Movie(movie.id.clone())
    }

    /// Parse `/` or `/movie/{id}`. The id is opaque and taken as-is.
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "" | "/" => Some(Self::Search),
            _ => path
                .strip_prefix(MOVIE_PREFIX)
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Self::Movie(id.to_string())),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search => write!(f, "/"),
            Self::Movie(id) => write!(f, "{MOVIE_PREFIX}{id}"),
        }
    }
}
