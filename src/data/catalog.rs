use std::collections::HashMap;

use crate::models::{Movie, MovieId, MovieSummary};

/// The movie table, indexed by row position.
///
/// Titles are not unique in the source data; `position_of` resolves a title
/// to the first row carrying it.
#[derive(Debug, Clone)]
pub struct MovieCatalog {
    movies: Vec<Movie>,
    title_index: HashMap<String, usize>,
    id_index: HashMap<MovieId, usize>,
}

impl MovieCatalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut title_index = HashMap::with_capacity(movies.len());
        let mut id_index = HashMap::with_capacity(movies.len());

        for (position, movie) in movies.iter().enumerate() {
            title_index.entry(movie.title.clone()).or_insert(position);
            id_index.entry(movie.id).or_insert(position);
        }

        let duplicates = movies.len() - title_index.len();
        if duplicates > 0 {
            tracing::warn!(
                duplicate_titles = duplicates,
                "Movie table contains duplicate titles; lookups use the first match"
            );
        }

        Self {
            movies,
            title_index,
            id_index,
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Movie> {
        self.movies.get(position)
    }

    /// Row of the first movie whose title matches exactly
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    pub fn find_by_id(&self, id: MovieId) -> Option<&Movie> {
        self.id_index.get(&id).and_then(|&position| self.movies.get(position))
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }

    pub fn summaries(&self) -> Vec<MovieSummary> {
        self.movies.iter().map(MovieSummary::from).collect()
    }
}
