use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;

use movie_recommender::{data::MovieStore, error::AppError, models::MovieId};

fn write_json(value: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file
}

fn columnar_movies() -> serde_json::Value {
    json!({
        "id": [19995, 285, 206647],
        "title": ["Avatar", "Pirates of the Caribbean: At World's End", "Spectre"],
        "genres": [["Action", "Adventure"], ["Adventure", "Fantasy"], ["Action", "Crime"]],
        "overview": ["In the 22nd century...", "Captain Barbossa...", "A cryptic message..."],
        "keywords": [["cultureclash", "future"], ["ocean", "drugabuse"], ["spy", "basedonnovel"]],
        "crew": [["JamesCameron"], ["GoreVerbinski"], ["SamMendes"]],
        "cast": [["SamWorthington"], ["JohnnyDepp"], ["DanielCraig"]]
    })
}

#[test]
fn test_load_columnar_table() {
    let movies = write_json(&columnar_movies());
    let similarity = write_json(&json!([
        [1.0, 0.1, 0.3],
        [0.1, 1.0, 0.05],
        [0.3, 0.05, 1.0]
    ]));

    let store = MovieStore::load(movies.path(), similarity.path()).unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(store.titles()[2], "Spectre");

    let result = store.recommend("Avatar", 5);
    let ids: Vec<MovieId> = result.iter().map(|c| c.movie.id).collect();
    assert_eq!(ids, vec![MovieId(206647), MovieId(285)]);
    assert_eq!(result[0].movie.crew, vec!["SamMendes".to_string()]);
}

#[test]
fn test_load_record_table() {
    let movies = write_json(&json!([
        {"id": 1, "title": "One", "genres": ["Drama"], "overview": "", "keywords": [], "crew": [], "cast": []},
        {"id": 2, "title": "Two", "genres": [], "overview": "", "keywords": [], "crew": [], "cast": []}
    ]));
    let similarity = write_json(&json!([[1.0, 0.4], [0.4, 1.0]]));

    let store = MovieStore::load(movies.path(), similarity.path()).unwrap();
    assert_eq!(store.recommend("One", 1)[0].movie.title, "Two");
}

#[test]
fn test_near_equal_scores_order_after_loading() {
    let movies = write_json(&json!([
        {"id": 1, "title": "A"},
        {"id": 2, "title": "B"},
        {"id": 3, "title": "C"}
    ]));
    let similarity = write_json(&json!([
        [1.0, 0.1, 0.10000000000000002],
        [0.1, 1.0, 0.0],
        [0.10000000000000002, 0.0, 1.0]
    ]));

    let store = MovieStore::load(movies.path(), similarity.path()).unwrap();

    let result = store.recommend("A", 2);
    let ids: Vec<MovieId> = result.iter().map(|c| c.movie.id).collect();
    assert_eq!(ids, vec![MovieId(3), MovieId(2)]);
    assert_eq!(result[0].score, 0.10000000000000002);
}

#[test]
fn test_missing_file_is_io_error() {
    let similarity = write_json(&json!([]));
    let err = MovieStore::load("/nonexistent/movie_data.json", similarity.path()).unwrap_err();
    assert!(matches!(err, AppError::Io(_)));
}

#[test]
fn test_malformed_json_is_json_error() {
    let mut movies = NamedTempFile::new().unwrap();
    movies.write_all(b"{not json").unwrap();
    let similarity = write_json(&json!([]));

    let err = MovieStore::load(movies.path(), similarity.path()).unwrap_err();
    assert!(matches!(err, AppError::Json(_)));
}

#[test]
fn test_row_count_mismatch_is_rejected() {
    let movies = write_json(&columnar_movies());
    let similarity = write_json(&json!([[1.0, 0.1, 0.3], [0.1, 1.0, 0.05]]));

    let err = MovieStore::load(movies.path(), similarity.path()).unwrap_err();
    assert!(matches!(err, AppError::DataIntegrity(_)));
}

#[test]
fn test_uneven_columns_are_rejected() {
    let mut table = columnar_movies();
    table["cast"] = json!([["SamWorthington"]]);
    let movies = write_json(&table);
    let similarity = write_json(&json!([[1.0], [1.0], [1.0]]));

    let err = MovieStore::load(movies.path(), similarity.path()).unwrap_err();
    assert!(err.to_string().contains("'cast'"));
}
