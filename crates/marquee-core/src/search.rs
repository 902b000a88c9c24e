//! Search controller: query text, genre filter, page cursor and the
//! accumulated result list.
//!
//! Issuing a request and applying its response are separate steps. The
//! controller mutates synchronously when a request is issued (reset, cursor,
//! loading flag) and returns a [`PageRequest`]; whoever executes the request
//! hands the provider's result back through [`SearchController::complete`].
//! Every request carries the generation of the inputs it was built from. A
//! query, genre or refresh starts a new generation, and responses from an
//! older one are dropped. Pages requested within one generation all apply, in
//! the order their responses arrive.

use marquee_api::{MovieProvider, MovieSummary, ProviderError, SearchPage, SearchQuery};

use crate::config::ProviderConfig;
use crate::error::user_message;
use crate::Completion;

/// What to search when the query text is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDefaults {
    pub term: String,
    pub media_type: Option<String>,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self::from(&ProviderConfig::default())
    }
}

impl From<&ProviderConfig> for SearchDefaults {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            term: config.default_term.clone(),
            media_type: config.default_media_type.clone(),
        }
    }
}

/// Observable state of a search screen.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub query_text: String,
    pub genre_filter: String,
    /// 1-based page index of the most recently issued request.
    pub page_cursor: u32,
    /// Filtered results in provider order. May contain duplicates across pages.
    pub accumulated_results: Vec<MovieSummary>,
    pub loading: bool,
    pub error_message: Option<String>,
    /// Total matches reported by the provider for the current query.
    pub total_results: Option<u32>,
    /// Results received so far, before genre filtering.
    pub fetched: u32,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query_text: String::new(),
            genre_filter: String::new(),
            page_cursor: 1,
            accumulated_results: Vec::new(),
            loading: false,
            error_message: None,
            total_results: None,
            fetched: 0,
        }
    }
}

/// A search request issued by the controller, waiting to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    generation: u64,
    pub query: SearchQuery,
}

impl PageRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }
}

/// Case-insensitive substring match of `filter` against a genre list.
/// An empty filter matches everything.
pub fn genre_matches(genre: &str, filter: &str) -> bool {
    let filter = filter.trim();
    filter.is_empty() || genre.to_lowercase().contains(&filter.to_lowercase())
}

#[derive(Debug)]
pub struct SearchController {
    state: SearchState,
    defaults: SearchDefaults,
    generation: u64,
    /// Requests of the current generation still awaiting a response.
    in_flight: u32,
}

impl SearchController {
    pub fn new(defaults: SearchDefaults) -> Self {
        Self {
            state: SearchState::default(),
            defaults,
            generation: 0,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.state.accumulated_results
    }

    /// Whether the provider has reported more results than received so far.
    pub fn has_more(&self) -> bool {
        self.state
            .total_results
            .is_some_and(|total| self.state.fetched < total)
    }

    /// Initial load for a freshly mounted screen: page 1 of the current inputs.
    pub fn refresh(&mut self) -> PageRequest {
        self.reset();
        self.issue()
    }

    pub fn set_query(&mut self, text: impl Into<String>) -> PageRequest {
        self.state.query_text = text.into();
        self.reset();
        self.issue()
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) -> PageRequest {
        self.state.genre_filter = genre.into();
        self.reset();
        self.issue()
    }

    /// Advance the cursor and request the next page. Its results are appended.
    pub fn load_next_page(&mut self) -> PageRequest {
        self.state.page_cursor += 1;
        self.issue()
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.in_flight = 0;
        self.state.page_cursor = 1;
        self.state.accumulated_results.clear();
        self.state.total_results = None;
        self.state.fetched = 0;
    }

    fn issue(&mut self) -> PageRequest {
        self.in_flight += 1;
        self.state.loading = true;
        self.state.error_message = None;
        let request = PageRequest {
            generation: self.generation,
            query: self.request_for(self.state.page_cursor),
        };
        tracing::debug!(
            generation = request.generation,
            in_flight = self.in_flight,
            term = %request.query.term,
            page = request.query.page,
            "Search request issued"
        );
        request
    }

    /// Provider query for `cursor` under the current inputs.
    fn request_for(&self, cursor: u32) -> SearchQuery {
        if self.state.query_text.trim().is_empty() {
            SearchQuery {
                term: self.defaults.term.clone(),
                media_type: self.defaults.media_type.clone(),
                page: cursor,
            }
        } else {
            SearchQuery {
                term: self.state.query_text.clone(),
                media_type: None,
                page: cursor,
            }
        }
    }

    /// Apply the provider's answer to `request`.
    pub fn complete<E: ProviderError>(
        &mut self,
        request: &PageRequest,
        result: Result<SearchPage, E>,
    ) -> Completion {
        if request.generation != self.generation {
            tracing::debug!(
                generation = request.generation,
                current = self.generation,
                page = request.page(),
                "Dropping stale search response"
            );
            return Completion::Stale;
        }

        self.in_flight = self.in_flight.saturating_sub(1);
        self.state.loading = self.in_flight > 0;
        match result {
            Ok(page) => {
                let received = page.items.len();
                self.state.fetched = self
                    .state
                    .fetched
                    .saturating_add(u32::try_from(received).unwrap_or(u32::MAX));
                if page.total_results.is_some() {
                    self.state.total_results = page.total_results;
                }
                let filter = self.state.genre_filter.as_str();
                self.state.accumulated_results.extend(
                    page.items
                        .into_iter()
                        .filter(|m| genre_matches(&m.genre, filter)),
                );
                tracing::debug!(
                    page = request.page(),
                    received,
                    total = self.state.accumulated_results.len(),
                    "Search page applied"
                );
            }
            Err(e) => {
                self.state.error_message = Some(user_message("search", &e));
            }
        }
        Completion::Applied
    }

    /// Execute `request` against `provider` and apply the result.
    pub async fn run<P: MovieProvider>(&mut self, provider: &P, request: PageRequest) -> Completion {
        let result = provider.search(&request.query).await;
        self.complete(&request, result)
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(SearchDefaults::default())
    }
}
