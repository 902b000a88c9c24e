use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::error::OmdbError;
use super::types::{OmdbMovie, OmdbResponse, OmdbSearchBody};
use crate::traits::{MovieDetail, MovieProvider, SearchPage, SearchQuery};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Environment variable holding the OMDb API key.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// OMDb API key. Never printed: `Debug` and `Display` are redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, OmdbError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(OmdbError::MissingApiKey);
        }
        Ok(Self(key))
    }

    /// Read the key from [`API_KEY_ENV`].
    pub fn from_env() -> Result<Self, OmdbError> {
        let key = std::env::var(API_KEY_ENV).map_err(|_| OmdbError::MissingApiKey)?;
        Self::new(key)
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

/// OMDb REST client.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    http: Client,
    base_url: Url,
    api_key: ApiKey,
}

impl OmdbClient {
    pub fn new(api_key: ApiKey) -> Result<Self, OmdbError> {
        let base_url =
            Url::parse(DEFAULT_BASE_URL).map_err(|e| OmdbError::Parse(e.to_string()))?;
        Self::with_options(api_key, base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_options(
        api_key: ApiKey,
        base_url: Url,
        timeout: Duration,
    ) -> Result<Self, OmdbError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue a GET against the API root and unwrap the `Response` envelope.
    ///
    /// The request URL carries the key in its query string, so URLs are
    /// stripped from transport errors before they leave this function.
    async fn request<T: DeserializeOwned>(
        &self,
        operation: &str,
        params: &[(&str, &str)],
    ) -> Result<T, OmdbError> {
        tracing::debug!(operation, base_url = %self.base_url, "OMDb request");

        let resp = self
            .http
            .get(self.base_url.clone())
            .query(params)
            .query(&[("apikey", self.api_key.expose())])
            .send()
            .await
            .map_err(|e| OmdbError::Http(e.without_url()))?;

        let status = resp.status();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(_) if !status.is_success() => String::new(),
            Err(e) => return Err(OmdbError::Http(e.without_url())),
        };
        decode(operation, status, &body)
    }
}

/// Unwrap an OMDb response from its status and body.
///
/// A non-2xx status is an [`OmdbError::Api`] whatever the body says. A 2xx
/// body is parsed as the `Response` envelope.
fn decode<T: DeserializeOwned>(
    operation: &str,
    status: StatusCode,
    body: &str,
) -> Result<T, OmdbError> {
    if !status.is_success() {
        tracing::warn!(operation, status = status.as_u16(), "OMDb API error");
        return Err(OmdbError::Api {
            status: status.as_u16(),
            message: body.to_string(),
        });
    }
    tracing::debug!(operation, status = %status, bytes = body.len(), "OMDb response received");

    match serde_json::from_str::<OmdbResponse<T>>(body) {
        Ok(OmdbResponse::Success(payload)) => Ok(payload),
        Ok(OmdbResponse::Failure { error }) => {
            tracing::debug!(operation, error = %error, "OMDb reported no result");
            Err(OmdbError::Provider(error))
        }
        Err(e) => Err(OmdbError::Parse(e.to_string())),
    }
}

/// Query parameters for a search request, without the key.
fn search_params(query: &SearchQuery) -> Vec<(&str, String)> {
    let mut params = vec![("s", query.term.clone())];
    if let Some(media_type) = &query.media_type {
        params.push(("type", media_type.clone()));
    }
    params.push(("page", query.page.to_string()));
    params
}

impl MovieProvider for OmdbClient {
    type Error = OmdbError;

    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, OmdbError> {
        let params = search_params(query);
        let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let body: OmdbSearchBody = self.request("search", &params).await?;
        Ok(body.into_page())
    }

    async fn get_movie(&self, id: &str) -> Result<MovieDetail, OmdbError> {
        let movie: OmdbMovie = self.request("get_movie", &[("i", id)]).await?;
        Ok(movie.into_detail())
    }
}
