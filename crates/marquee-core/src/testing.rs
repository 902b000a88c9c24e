//! In-memory provider for state machine tests.

use std::collections::HashMap;
use std::sync::Mutex;

use marquee_api::{MovieDetail, MovieProvider, MovieSummary, OmdbError, SearchPage, SearchQuery};

enum Canned<T> {
    Found(T),
    Logical(String),
    Transport,
}

impl<T: Clone> Canned<T> {
    fn resolve(&self) -> Result<T, OmdbError> {
        match self {
            Self::Found(value) => Ok(value.clone()),
            Self::Logical(message) => Err(OmdbError::Provider(message.clone())),
            Self::Transport => Err(OmdbError::Parse("unexpected end of input".into())),
        }
    }
}

#[derive(Default)]
pub struct FakeProvider {
    pages: HashMap<(String, u32), Canned<SearchPage>>,
    movies: HashMap<String, Canned<MovieDetail>>,
    searches: Mutex<Vec<SearchQuery>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, term: &str, page: u32, items: Vec<MovieSummary>) -> Self {
        let page_data = SearchPage {
            total_results: None,
            items,
        };
        self.pages
            .insert((term.to_string(), page), Canned::Found(page_data));
        self
    }

    pub fn with_total(mut self, term: &str, page: u32, total: u32) -> Self {
        if let Some(Canned::Found(p)) = self.pages.get_mut(&(term.to_string(), page)) {
            p.total_results = Some(total);
        }
        self
    }

    pub fn with_search_error(mut self, term: &str, page: u32, message: &str) -> Self {
        self.pages
            .insert((term.to_string(), page), Canned::Logical(message.to_string()));
        self
    }

    pub fn with_search_failure(mut self, term: &str, page: u32) -> Self {
        self.pages.insert((term.to_string(), page), Canned::Transport);
        self
    }

    pub fn with_movie(mut self, detail: MovieDetail) -> Self {
        self.movies
            .insert(detail.id.clone(), Canned::Found(detail));
        self
    }

    pub fn with_movie_failure(mut self, id: &str) -> Self {
        self.movies.insert(id.to_string(), Canned::Transport);
        self
    }

    /// Every search query received so far, in order.
    pub fn searches(&self) -> Vec<SearchQuery> {
        self.searches.lock().unwrap().clone()
    }
}

impl MovieProvider for FakeProvider {
    type Error = OmdbError;

    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, OmdbError> {
        self.searches.lock().unwrap().push(query.clone());
        match self.pages.get(&(query.term.clone(), query.page)) {
            Some(canned) => canned.resolve(),
            None => Err(OmdbError::Provider("Movie not found!".into())),
        }
    }

    async fn get_movie(&self, id: &str) -> Result<MovieDetail, OmdbError> {
        match self.movies.get(id) {
            Some(canned) => canned.resolve(),
            None => Err(OmdbError::Provider("Incorrect IMDb ID.".into())),
        }
    }
}

pub fn movie(id: &str, title: &str, genre: &str) -> MovieSummary {
    MovieSummary {
        id: id.to_string(),
        title: title.to_string(),
        year: "2000".to_string(),
        poster_url: String::new(),
        genre: genre.to_string(),
    }
}

/// `count` untyped results with ids `{prefix}0..{prefix}{count-1}`.
pub fn movies(prefix: &str, count: usize) -> Vec<MovieSummary> {
    (0..count)
        .map(|i| movie(&format!("{prefix}{i}"), &format!("Title {prefix}{i}"), ""))
        .collect()
}
