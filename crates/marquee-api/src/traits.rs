//! Trait definitions for movie metadata providers.
//!
//! The OMDb client implements these traits, and the search and detail state
//! machines in `marquee-core` only ever talk to a provider through them.

use std::future::Future;

/// Rating source name used by the detail view for the Tomatometer.
pub const ROTTEN_TOMATOES: &str = "Rotten Tomatoes";
/// Rating source name used by the detail view for the Metascore.
pub const METACRITIC: &str = "Metacritic";

/// A movie metadata provider.
pub trait MovieProvider: Send + Sync {
    type Error: ProviderError;

    /// Search titles by term, one page at a time.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchPage, Self::Error>> + Send;

    /// Fetch the full record for a single title.
    fn get_movie(&self, id: &str) -> impl Future<Output = Result<MovieDetail, Self::Error>> + Send;
}

/// Errors a provider can report.
///
/// A provider distinguishes a logical error (the request reached the provider,
/// which answered "no results" or "invalid request") from everything else.
pub trait ProviderError: std::error::Error + Send + Sync + 'static {
    /// The provider's own message for a logical error, `None` for transport failures.
    fn provider_message(&self) -> Option<&str>;
}

/// Parameters of a single search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub media_type: Option<String>,
    /// 1-based page index.
    pub page: u32,
}

/// One page of search results, in provider order.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub items: Vec<MovieSummary>,
    /// Total matches across all pages, when the provider reports it.
    pub total_results: Option<u32>,
}

/// List-view fields of a title.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    /// Comma-separated genre list. Empty when the provider omits it.
    pub genre: String,
}

/// A `{source, value}` rating pair.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Full record of a single title.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub poster_url: Option<String>,
    pub ratings: Vec<Rating>,
    pub metascore: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub media_type: Option<String>,
    pub box_office: Option<String>,
    pub production: Option<String>,
    pub website: Option<String>,
}

impl MovieDetail {
    /// Look up a rating by source name. Sources are matched exactly.
    pub fn rating(&self, source: &str) -> Option<&str> {
        self.ratings
            .iter()
            .find(|r| r.source == source)
            .map(|r| r.value.as_str())
    }

    pub fn rotten_tomatoes(&self) -> Option<&str> {
        self.rating(ROTTEN_TOMATOES)
    }

    pub fn metacritic(&self) -> Option<&str> {
        self.rating(METACRITIC)
    }

    /// Project to the list-view shape, e.g. to add the title to a watchlist.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            year: self.year.clone().unwrap_or_default(),
            poster_url: self.poster_url.clone().unwrap_or_default(),
            genre: self.genre.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_with_ratings(ratings: &[(&str, &str)]) -> MovieDetail {
        MovieDetail {
            id: "tt0111161".into(),
            title: "The Shawshank Redemption".into(),
            ratings: ratings
                .iter()
                .map(|(source, value)| Rating {
                    source: (*source).into(),
                    value: (*value).into(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rating_lookup_by_source() {
        let detail = detail_with_ratings(&[
            ("Internet Movie Database", "9.3/10"),
            ("Rotten Tomatoes", "89%"),
            ("Metacritic", "82/100"),
        ]);
        assert_eq!(detail.rotten_tomatoes(), Some("89%"));
        assert_eq!(detail.metacritic(), Some("82/100"));
        assert_eq!(detail.rating("Internet Movie Database"), Some("9.3/10"));
    }

    #[test]
    fn test_missing_rating_source_is_absent() {
        let detail = detail_with_ratings(&[("Rotten Tomatoes", "89%")]);
        assert_eq!(detail.metacritic(), None);
        assert_eq!(detail_with_ratings(&[]).rotten_tomatoes(), None);
    }

    #[test]
    fn test_summary_projection() {
        let mut detail = detail_with_ratings(&[]);
        detail.year = Some("1994".into());
        detail.genre = Some("Drama".into());

        let summary = detail.summary();
        assert_eq!(summary.id, "tt0111161");
        assert_eq!(summary.year, "1994");
        assert_eq!(summary.genre, "Drama");
        assert!(summary.poster_url.is_empty());
    }
}
