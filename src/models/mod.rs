mod metadata;
mod movie;
mod recommendation;

pub use metadata::{MovieMetadata, TmdbMovie};
pub use movie::{Movie, MovieColumns, MovieId, MovieSummary, MovieTableFile};
pub use recommendation::{
    Recommendation, RecommendationSet, DEFAULT_RECOMMENDATIONS, MAX_RECOMMENDATIONS,
    MIN_RECOMMENDATIONS,
};
