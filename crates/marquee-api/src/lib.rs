pub mod omdb;
pub mod traits;

pub use omdb::{ApiKey, OmdbClient, OmdbError, DEFAULT_BASE_URL};
pub use traits::{
    MovieDetail, MovieProvider, MovieSummary, ProviderError, Rating, SearchPage, SearchQuery,
};
