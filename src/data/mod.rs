pub mod catalog;
pub mod similarity;
pub mod store;

pub use catalog::MovieCatalog;
pub use similarity::SimilarityTable;
pub use store::{Candidate, MovieStore};
