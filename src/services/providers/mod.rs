/// Movie metadata provider abstraction
///
/// Recommendations are enriched with details the movie table does not carry
/// (release date, revenue, vote statistics, poster). Each source of those
/// details implements `MetadataProvider`.
use crate::models::{MovieId, MovieMetadata};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// Lookups never fail the caller: any transport or decoding problem is logged
/// and reported as an empty record, so one missing title cannot break a page
/// of recommendations.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch extended metadata for one movie
    async fn fetch_metadata(&self, id: MovieId) -> MovieMetadata;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
