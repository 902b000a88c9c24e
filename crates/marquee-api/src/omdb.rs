pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiKey, OmdbClient, API_KEY_ENV, DEFAULT_BASE_URL};
pub use error::OmdbError;
