mod client;
mod error;
pub mod models;
mod search;

pub use client::OmdbClient;
pub use error::OmdbError;
pub use models::{Movie, Rating, SearchPage};

pub type Result<T> = std::result::Result<T, OmdbError>;
