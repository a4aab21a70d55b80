use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

/// Extended movie details fetched from the metadata API.
///
/// Every field is optional: the third-party schema is not complete for every
/// title, and a failed lookup yields `MovieMetadata::default()` with all
/// fields absent. Placeholders are substituted only when rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieMetadata {
    pub popularity: Option<f64>,
    pub release_date: Option<String>,
    pub revenue: Option<u64>,
    pub tagline: Option<String>,
    pub vote_count: Option<u64>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
}

impl MovieMetadata {
    /// True when the lookup produced nothing at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Full poster URL for the given image size (e.g. `w200`)
    pub fn poster_url(&self, image_base_url: &str, size: &str) -> Option<String> {
        self.poster_path.as_ref().map(|path| {
            format!("{}/{}{}", image_base_url.trim_end_matches('/'), size, path)
        })
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw response from TMDB `GET /movie/{id}`.
///
/// Only the consumed fields are declared; everything else is ignored. A
/// field of the wrong type is dropped on its own instead of failing the
/// whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovie {
    #[serde(default, deserialize_with = "lenient")]
    pub popularity: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub revenue: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub vote_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub poster_path: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// TMDB sends `""` rather than `null` for unknown text fields
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<TmdbMovie> for MovieMetadata {
    fn from(movie: TmdbMovie) -> Self {
        Self {
            popularity: movie.popularity,
            release_date: non_empty(movie.release_date),
            revenue: movie.revenue,
            tagline: non_empty(movie.tagline),
            vote_count: movie.vote_count,
            vote_average: movie.vote_average,
            poster_path: non_empty(movie.poster_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_movie_full_response() {
        let json = r#"{
            "id": 19995,
            "title": "Avatar",
            "popularity": 150.437577,
            "release_date": "2009-12-10",
            "revenue": 2787965087,
            "tagline": "Enter the World of Pandora.",
            "vote_count": 11800,
            "vote_average": 7.2,
            "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        let metadata = MovieMetadata::from(movie);
        assert_eq!(metadata.popularity, Some(150.437577));
        assert_eq!(metadata.release_date.as_deref(), Some("2009-12-10"));
        assert_eq!(metadata.revenue, Some(2787965087));
        assert_eq!(metadata.vote_count, Some(11800));
        assert_eq!(metadata.vote_average, Some(7.2));
        assert!(!metadata.is_empty());
    }

    #[test]
    fn test_tmdb_movie_missing_and_blank_fields() {
        let json = r#"{"tagline": "", "poster_path": null, "vote_count": 3}"#;

        let metadata = MovieMetadata::from(serde_json::from_str::<TmdbMovie>(json).unwrap());
        assert_eq!(metadata.tagline, None);
        assert_eq!(metadata.poster_path, None);
        assert_eq!(metadata.release_date, None);
        assert_eq!(metadata.vote_count, Some(3));
    }

    #[test]
    fn test_tmdb_movie_mistyped_field_keeps_the_rest() {
        let json = r#"{
            "popularity": "very",
            "release_date": "1995-12-15",
            "revenue": -1,
            "tagline": 42,
            "vote_count": 1886
        }"#;

        let metadata = MovieMetadata::from(serde_json::from_str::<TmdbMovie>(json).unwrap());
        assert_eq!(metadata.popularity, None);
        assert_eq!(metadata.revenue, None);
        assert_eq!(metadata.tagline, None);
        assert_eq!(metadata.release_date.as_deref(), Some("1995-12-15"));
        assert_eq!(metadata.vote_count, Some(1886));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(MovieMetadata::default().is_empty());
    }

    #[test]
    fn test_poster_url() {
        let metadata = MovieMetadata {
            poster_path: Some("/abc.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(
            metadata.poster_url("https://image.tmdb.org/t/p/", "w200").as_deref(),
            Some("https://image.tmdb.org/t/p/w200/abc.jpg")
        );
        assert_eq!(MovieMetadata::default().poster_url("x", "w300"), None);
    }
}
