use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// TMDB identifier for a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row of the movie table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Directors
    #[serde(default)]
    pub crew: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
}

/// Short listing entry used by the movie selector and `/api/v1/movies`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
        }
    }
}

// ============================================================================
// Movie table artifact
// ============================================================================

/// On-disk layout of the movie table.
///
/// Accepts either a column-oriented object (one array per attribute, as
/// produced by a dataframe export) or a plain array of movie records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MovieTableFile {
    Columns(MovieColumns),
    Records(Vec<Movie>),
}

#[derive(Debug, Deserialize)]
pub struct MovieColumns {
    pub id: Vec<MovieId>,
    pub title: Vec<String>,
    pub genres: Vec<Vec<String>>,
    pub overview: Vec<String>,
    pub keywords: Vec<Vec<String>>,
    pub crew: Vec<Vec<String>>,
    pub cast: Vec<Vec<String>>,
}

impl MovieColumns {
    /// Zips the columns into rows, or returns the name of the first column
    /// whose length differs from `id`.
    pub fn into_rows(self) -> Result<Vec<Movie>, &'static str> {
        let len = self.id.len();
        let lengths = [
            ("title", self.title.len()),
            ("genres", self.genres.len()),
            ("overview", self.overview.len()),
            ("keywords", self.keywords.len()),
            ("crew", self.crew.len()),
            ("cast", self.cast.len()),
        ];
        if let Some((column, _)) = lengths.iter().find(|(_, l)| *l != len) {
            return Err(*column);
        }

        let rows = self
            .id
            .into_iter()
            .zip(self.title)
            .zip(self.genres)
            .zip(self.overview)
            .zip(self.keywords)
            .zip(self.crew)
            .zip(self.cast)
            .map(
                |((((((id, title), genres), overview), keywords), crew), cast)| Movie {
                    id,
                    title,
                    genres,
                    overview,
                    keywords,
                    crew,
                    cast,
                },
            )
            .collect();

        Ok(rows)
    }
}
