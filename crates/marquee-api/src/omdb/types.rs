use serde::Deserialize;

use crate::traits::{MovieDetail, MovieSummary, Rating, SearchPage};

/// OMDb's placeholder for a field it has no value for.
const NOT_AVAILABLE: &str = "N/A";

// ── Response envelope ───────────────────────────────────────────

/// Every OMDb payload is tagged with `"Response": "True" | "False"`.
#[derive(Debug, Deserialize)]
#[serde(tag = "Response")]
pub enum OmdbResponse<T> {
    #[serde(rename = "True")]
    Success(T),
    #[serde(rename = "False")]
    Failure {
        #[serde(rename = "Error")]
        error: String,
    },
}

// ── Search ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OmdbSearchBody {
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
}

// ── Fetch by id ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OmdbMovie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Rated")]
    pub rated: Option<String>,
    #[serde(rename = "Released")]
    pub released: Option<String>,
    #[serde(rename = "Runtime")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "Writer")]
    pub writer: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "Language")]
    pub language: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Awards")]
    pub awards: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<OmdbRating>,
    #[serde(rename = "Metascore")]
    pub metascore: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "Type")]
    pub media_type: Option<String>,
    #[serde(rename = "BoxOffice")]
    pub box_office: Option<String>,
    #[serde(rename = "Production")]
    pub production: Option<String>,
    #[serde(rename = "Website")]
    pub website: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OmdbRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

// ── Conversions to shared trait types ───────────────────────────

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}

impl OmdbSearchItem {
    pub fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.imdb_id,
            title: self.title,
            year: self.year,
            poster_url: present(Some(self.poster)).unwrap_or_default(),
            genre: self.genre,
        }
    }
}

impl OmdbSearchBody {
    pub fn into_page(self) -> SearchPage {
        SearchPage {
            total_results: self.total_results.and_then(|t| t.parse().ok()),
            items: self.search.into_iter().map(|i| i.into_summary()).collect(),
        }
    }
}

impl OmdbMovie {
    pub fn into_detail(self) -> MovieDetail {
        MovieDetail {
            id: self.imdb_id,
            title: self.title,
            year: present(self.year),
            rated: present(self.rated),
            released: present(self.released),
            runtime: present(self.runtime),
            genre: present(self.genre),
            director: present(self.director),
            writer: present(self.writer),
            actors: present(self.actors),
            plot: present(self.plot),
            language: present(self.language),
            country: present(self.country),
            awards: present(self.awards),
            poster_url: present(self.poster),
            ratings: self
                .ratings
                .into_iter()
                .map(|r| Rating {
                    source: r.source,
                    value: r.value,
                })
                .collect(),
            metascore: present(self.metascore),
            imdb_rating: present(self.imdb_rating),
            imdb_votes: present(self.imdb_votes),
            media_type: present(self.media_type),
            box_office: present(self.box_office),
            production: present(self.production),
            website: present(self.website),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "Search": [
                {
                    "Title": "Batman Begins",
                    "Year": "2005",
                    "imdbID": "tt0372784",
                    "Type": "movie",
                    "Poster": "https://m.media-amazon.com/images/M/batman-begins.jpg"
                },
                {
                    "Title": "Batman",
                    "Year": "1989",
                    "imdbID": "tt0096895",
                    "Type": "movie",
                    "Poster": "N/A"
                }
            ],
            "totalResults": "583",
            "Response": "True"
        }"#;

        let resp: OmdbResponse<OmdbSearchBody> = serde_json::from_str(json).unwrap();
        let OmdbResponse::Success(body) = resp else {
            panic!("expected a successful response");
        };
        let page = body.into_page();
        assert_eq!(page.total_results, Some(583));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, "tt0372784");
        assert_eq!(page.items[0].title, "Batman Begins");
        assert!(page.items[0].genre.is_empty());
        assert!(page.items[1].poster_url.is_empty());
    }

    #[test]
    fn test_deserialize_failure_response() {
        let json = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let resp: OmdbResponse<OmdbSearchBody> = serde_json::from_str(json).unwrap();
        match resp {
            OmdbResponse::Failure { error } => assert_eq!(error, "Movie not found!"),
            OmdbResponse::Success(_) => panic!("expected a failure response"),
        }
    }

    #[test]
    fn test_missing_response_tag_is_rejected() {
        let json = r#"{"Search": []}"#;
        assert!(serde_json::from_str::<OmdbResponse<OmdbSearchBody>>(json).is_err());
    }

    #[test]
    fn test_deserialize_movie_detail() {
        let json = r#"{
            "Title": "The Shawshank Redemption",
            "Year": "1994",
            "Rated": "R",
            "Released": "14 Oct 1994",
            "Runtime": "142 min",
            "Genre": "Drama",
            "Director": "Frank Darabont",
            "Writer": "Stephen King, Frank Darabont",
            "Actors": "Tim Robbins, Morgan Freeman, Bob Gunton",
            "Plot": "Over the course of several years, two convicts form a friendship.",
            "Language": "English",
            "Country": "United States",
            "Awards": "Nominated for 7 Oscars.",
            "Poster": "https://m.media-amazon.com/images/M/shawshank.jpg",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "9.3/10"},
                {"Source": "Rotten Tomatoes", "Value": "89%"}
            ],
            "Metascore": "N/A",
            "imdbRating": "9.3",
            "imdbVotes": "2,900,000",
            "imdbID": "tt0111161",
            "Type": "movie",
            "BoxOffice": "$28,767,189",
            "Production": "N/A",
            "Website": "N/A",
            "Response": "True"
        }"#;

        let resp: OmdbResponse<OmdbMovie> = serde_json::from_str(json).unwrap();
        let OmdbResponse::Success(movie) = resp else {
            panic!("expected a successful response");
        };
        let detail = movie.into_detail();
        assert_eq!(detail.id, "tt0111161");
        assert_eq!(detail.runtime.as_deref(), Some("142 min"));
        assert_eq!(detail.rotten_tomatoes(), Some("89%"));
        assert_eq!(detail.metacritic(), None);
        assert!(detail.metascore.is_none());
        assert!(detail.production.is_none());
        assert!(detail.website.is_none());
    }

    #[test]
    fn test_deserialize_minimal_movie() {
        let json = r#"{ "imdbID": "tt1", "Title": "Test", "Response": "True" }"#;
        let resp: OmdbResponse<OmdbMovie> = serde_json::from_str(json).unwrap();
        let OmdbResponse::Success(movie) = resp else {
            panic!("expected a successful response");
        };
        let detail = movie.into_detail();
        assert!(detail.ratings.is_empty());
        assert!(detail.plot.is_none());
    }
}
