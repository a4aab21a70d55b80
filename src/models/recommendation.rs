use serde::Serialize;

use super::{Movie, MovieMetadata};

/// Inclusive bounds of the recommendation count control
pub const MIN_RECOMMENDATIONS: usize = 2;
pub const MAX_RECOMMENDATIONS: usize = 10;
pub const DEFAULT_RECOMMENDATIONS: usize = 5;

/// A recommended movie merged with its fetched metadata
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    #[serde(flatten)]
    pub movie: Movie,
    pub score: f64,
    pub metadata: MovieMetadata,
}

/// Outcome of one recommendation request: the selected movie and its
/// enriched neighbors in rank order
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationSet {
    pub input: Movie,
    pub input_metadata: MovieMetadata,
    pub recommendations: Vec<Recommendation>,
}
