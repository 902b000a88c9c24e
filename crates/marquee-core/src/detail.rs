//! Detail fetcher: a loading/success/error view of a single title.

use marquee_api::{MovieDetail, MovieProvider, ProviderError};

use crate::error::user_message;
use crate::Completion;

/// Shown in place of any field the provider did not supply.
pub const PLACEHOLDER: &str = "N/A";

/// Render an optional field, substituting [`PLACEHOLDER`] when absent.
pub fn display_field(value: Option<&str>) -> &str {
    value.unwrap_or(PLACEHOLDER)
}

/// A fetch-by-id issued by the fetcher, waiting to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    seq: u64,
    pub id: String,
}

impl DetailRequest {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What a renderer needs to know about the fetcher's state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailView<'a> {
    Empty,
    Loading,
    Failed(&'a str),
    Loaded(&'a MovieDetail),
}

#[derive(Debug, Default)]
pub struct DetailFetcher {
    id: Option<String>,
    loading: bool,
    error_message: Option<String>,
    detail: Option<MovieDetail>,
    latest_seq: u64,
}

impl DetailFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the title currently shown or being fetched.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn view(&self) -> DetailView<'_> {
        if self.loading {
            DetailView::Loading
        } else if let Some(message) = &self.error_message {
            DetailView::Failed(message)
        } else if let Some(detail) = &self.detail {
            DetailView::Loaded(detail)
        } else {
            DetailView::Empty
        }
    }

    /// Route consumer. Fetches only when `id` differs from the current one.
    pub fn on_route(&mut self, id: &str) -> Option<DetailRequest> {
        if self.id.as_deref() == Some(id) {
            return None;
        }
        Some(self.fetch_by_id(id))
    }

    pub fn fetch_by_id(&mut self, id: impl Into<String>) -> DetailRequest {
        let id = id.into();
        self.latest_seq += 1;
        self.id = Some(id.clone());
        self.loading = true;
        self.error_message = None;
        self.detail = None;
        tracing::debug!(seq = self.latest_seq, id = %id, "Detail request issued");
        DetailRequest {
            seq: self.latest_seq,
            id,
        }
    }

    pub fn complete<E: ProviderError>(
        &mut self,
        request: &DetailRequest,
        result: Result<MovieDetail, E>,
    ) -> Completion {
        if request.seq != self.latest_seq {
            tracing::debug!(
                seq = request.seq,
                latest = self.latest_seq,
                id = %request.id,
                "Dropping stale detail response"
            );
            return Completion::Stale;
        }

        self.loading = false;
        match result {
            Ok(detail) => self.detail = Some(detail),
            Err(e) => self.error_message = Some(user_message("get_movie", &e)),
        }
        Completion::Applied
    }

    pub async fn run<P: MovieProvider>(
        &mut self,
        provider: &P,
        request: DetailRequest,
    ) -> Completion {
        let result = provider.get_movie(&request.id).await;
        self.complete(&request, result)
    }
}

#[cfg(test)]
mod tests {
    use marquee_api::{OmdbError, Rating};

    use super::*;
    use crate::error::FETCH_FAILED_MESSAGE;
    use crate::testing::FakeProvider;

    fn shawshank() -> MovieDetail {
        MovieDetail {
            id: "tt0111161".into(),
            title: "The Shawshank Redemption".into(),
            year: Some("1994".into()),
            runtime: Some("142 min".into()),
            director: Some("Frank Darabont".into()),
            plot: Some("Two imprisoned men bond over a number of years.".into()),
            ratings: vec![
                Rating {
                    source: "Internet Movie Database".into(),
                    value: "9.3/10".into(),
                },
                Rating {
                    source: "Rotten Tomatoes".into(),
                    value: "89%".into(),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_fetch_sets_loading_and_clears_error() {
        let mut fetcher = DetailFetcher::new();
        assert_eq!(fetcher.view(), DetailView::Empty);

        let request = fetcher.fetch_by_id("tt1");
        fetcher.complete::<OmdbError>(&request, Err(OmdbError::Provider("Incorrect IMDb ID.".into())));
        assert_eq!(fetcher.view(), DetailView::Failed("Incorrect IMDb ID."));

        fetcher.fetch_by_id("tt2");
        assert!(fetcher.loading());
        assert!(fetcher.error_message().is_none());
        assert_eq!(fetcher.view(), DetailView::Loading);
    }

    #[tokio::test]
    async fn test_detail_without_metacritic_renders() {
        let provider = FakeProvider::new().with_movie(shawshank());
        let mut fetcher = DetailFetcher::new();
        let request = fetcher.on_route("tt0111161").unwrap();
        assert!(fetcher.run(&provider, request).await.is_applied());

        let DetailView::Loaded(detail) = fetcher.view() else {
            panic!("expected a loaded detail");
        };
        assert_eq!(detail.metacritic(), None);
        assert_eq!(display_field(detail.metacritic()), PLACEHOLDER);
        assert_eq!(display_field(detail.rotten_tomatoes()), "89%");
        assert_eq!(display_field(detail.runtime.as_deref()), "142 min");
        assert_eq!(display_field(detail.box_office.as_deref()), PLACEHOLDER);
        assert!(!fetcher.loading());
    }

    #[tokio::test]
    async fn test_unknown_id_shows_provider_message() {
        let provider = FakeProvider::new();
        let mut fetcher = DetailFetcher::new();
        let request = fetcher.fetch_by_id("tt0000000");
        fetcher.run(&provider, request).await;
        assert_eq!(fetcher.error_message(), Some("Incorrect IMDb ID."));
        assert!(fetcher.detail().is_none());
        assert!(!fetcher.loading());
    }

    #[tokio::test]
    async fn test_transport_failure_shows_generic_message() {
        let provider = FakeProvider::new().with_movie_failure("tt0111161");
        let mut fetcher = DetailFetcher::new();
        let request = fetcher.fetch_by_id("tt0111161");
        fetcher.run(&provider, request).await;
        assert_eq!(fetcher.view(), DetailView::Failed(FETCH_FAILED_MESSAGE));
    }

    #[test]
    fn test_route_refetches_only_on_id_change() {
        let mut fetcher = DetailFetcher::new();
        let first = fetcher.on_route("tt1").unwrap();
        assert!(fetcher.on_route("tt1").is_none());

        let second = fetcher.on_route("tt2").unwrap();
        assert!(second.seq() > first.seq());
        assert_eq!(fetcher.id(), Some("tt2"));
    }

    #[test]
    fn test_superseded_response_is_dropped() {
        let mut fetcher = DetailFetcher::new();
        let first = fetcher.fetch_by_id("tt1");
        let second = fetcher.fetch_by_id("tt0111161");

        assert_eq!(
            fetcher.complete::<OmdbError>(&first, Ok(MovieDetail::default())),
            Completion::Stale
        );
        assert!(fetcher.loading());

        fetcher.complete::<OmdbError>(&second, Ok(shawshank()));
        assert_eq!(fetcher.detail().map(|d| d.id.as_str()), Some("tt0111161"));
    }
}
