use std::{fs::File, io::BufReader, path::Path};

use serde::de::DeserializeOwned;

use super::{MovieCatalog, SimilarityTable};
use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId, MovieSummary, MovieTableFile},
};

/// A movie selected by the similarity lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    /// Row position in the movie table
    pub index: usize,
    pub score: f64,
    pub movie: &'a Movie,
}

/// Immutable data store holding the movie table and its similarity scores.
///
/// Built once at startup and shared by reference with every request.
#[derive(Debug, Clone)]
pub struct MovieStore {
    catalog: MovieCatalog,
    similarity: SimilarityTable,
}

impl MovieStore {
    pub fn new(movies: Vec<Movie>, similarity: Vec<Vec<f64>>) -> AppResult<Self> {
        let similarity = SimilarityTable::new(similarity, movies.len())?;
        Ok(Self {
            catalog: MovieCatalog::new(movies),
            similarity,
        })
    }

    /// Loads both artifacts from disk
    pub fn load(movie_path: impl AsRef<Path>, similarity_path: impl AsRef<Path>) -> AppResult<Self> {
        let movie_path = movie_path.as_ref();
        let similarity_path = similarity_path.as_ref();

        let movies = match read_json::<MovieTableFile>(movie_path)? {
            MovieTableFile::Records(rows) => rows,
            MovieTableFile::Columns(columns) => columns.into_rows().map_err(|column| {
                AppError::DataIntegrity(format!(
                    "column '{}' in {} has a different length than 'id'",
                    column,
                    movie_path.display()
                ))
            })?,
        };
        let similarity: Vec<Vec<f64>> = read_json(similarity_path)?;

        let store = Self::new(movies, similarity)?;

        tracing::info!(
            movies = store.len(),
            movie_path = %movie_path.display(),
            similarity_path = %similarity_path.display(),
            "Loaded movie data"
        );

        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.catalog.get(index)
    }

    /// First movie with exactly this title
    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        self.catalog
            .position_of(title)
            .and_then(|position| self.catalog.get(position))
    }

    pub fn find_by_id(&self, id: MovieId) -> Option<&Movie> {
        self.catalog.find_by_id(id)
    }

    /// All titles in table order
    pub fn titles(&self) -> Vec<&str> {
        self.catalog.titles().collect()
    }

    pub fn summaries(&self) -> Vec<MovieSummary> {
        self.catalog.summaries()
    }

    /// Returns up to `k` movies most similar to `title`, best first.
    ///
    /// An unknown title yields an empty list. The queried movie is excluded
    /// by row identity, so it never appears in its own results.
    pub fn recommend(&self, title: &str, k: usize) -> Vec<Candidate<'_>> {
        let Some(index) = self.catalog.position_of(title) else {
            tracing::debug!(title = %title, "Title not found in movie table");
            return Vec::new();
        };

        self.similarity
            .ranked_neighbors(index)
            .into_iter()
            .take(k)
            .filter_map(|(column, score)| {
                self.catalog.get(column).map(|movie| Candidate {
                    index: column,
                    score,
                    movie,
                })
            })
            .collect()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let file = File::open(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to open data file");
        e
    })?;
    let value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to parse data file");
        e
    })?;
    Ok(value)
}
