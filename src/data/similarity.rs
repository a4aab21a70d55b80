use std::cmp::Ordering;

use crate::error::{AppError, AppResult};

/// Precomputed pairwise similarity scores.
///
/// Row `i`, column `j` is the similarity of movie `i` to movie `j`, using the
/// same row positions as the movie table. Rows may be shorter than the table
/// (ragged) but never longer.
#[derive(Debug, Clone)]
pub struct SimilarityTable {
    rows: Vec<Vec<f64>>,
}

impl SimilarityTable {
    /// Validates the table against the movie count.
    ///
    /// Scores must be finite so that ordering is total.
    pub fn new(rows: Vec<Vec<f64>>, movie_count: usize) -> AppResult<Self> {
        if rows.len() != movie_count {
            return Err(AppError::DataIntegrity(format!(
                "similarity table has {} rows but the movie table has {}",
                rows.len(),
                movie_count
            )));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() > movie_count {
                return Err(AppError::DataIntegrity(format!(
                    "similarity row {} has {} columns, more than the {} movies",
                    i,
                    row.len(),
                    movie_count
                )));
            }
            if let Some(j) = row.iter().position(|s| !s.is_finite()) {
                return Err(AppError::DataIntegrity(format!(
                    "similarity score at ({}, {}) is not finite",
                    i, j
                )));
            }
        }

        let ragged = rows.iter().filter(|r| r.len() != movie_count).count();
        if ragged > 0 {
            tracing::info!(ragged_rows = ragged, "Similarity table is not square");
        }

        Ok(Self { rows })
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Columns of `index`'s row ordered by descending score, with the row
    /// itself excluded. Equal scores keep ascending column order.
    pub fn ranked_neighbors(&self, index: usize) -> Vec<(usize, f64)> {
        let Some(row) = self.row(index) else {
            return Vec::new();
        };

        let mut neighbors: Vec<(usize, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(column, _)| column != index)
            .collect();

        // sort_by is stable, so ties stay in column order
        neighbors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        neighbors
    }
}
