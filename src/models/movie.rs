use serde::Serialize;

use super::or_not_available;

/// One row of the movie metadata dataset
///
/// Numeric values that were blank or unparseable in the source file are kept
/// as `None`; imputation happens on a separate feature matrix and never
/// rewrites the record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieRecord {
    /// Title as read from the file, surrounding whitespace included
    pub movie_title: String,
    pub title_year: Option<i32>,
    pub duration: Option<f64>,
    pub budget: Option<f64>,
    pub gross: Option<f64>,
    pub imdb_score: Option<f64>,
    pub director_name: Option<String>,
    /// Pipe-delimited genre tags, e.g. "Action|Sci-Fi"
    pub genres: Option<String>,
}

impl MovieRecord {
    /// Title with surrounding whitespace removed
    pub fn title(&self) -> &str {
        self.movie_title.trim()
    }

    /// Case-insensitive substring test against the genre tags
    pub fn has_genre(&self, genre: &str) -> bool {
        let needle = genre.to_lowercase();
        self.genres
            .as_deref()
            .map(|g| g.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }
}

/// Projection of a record returned in similarity and Top-100 listings
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieView {
    pub movie_title: String,
    #[serde(serialize_with = "or_not_available")]
    pub title_year: Option<i32>,
    #[serde(serialize_with = "or_not_available")]
    pub director_name: Option<String>,
    #[serde(serialize_with = "or_not_available")]
    pub genres: Option<String>,
    pub imdb_score: f64,
}

impl MovieView {
    /// Builds the view for a scored record; unscored records have no view
    pub fn from_record(record: &MovieRecord) -> Option<Self> {
        let imdb_score = record.imdb_score?;
        Some(Self {
            movie_title: record.title().to_string(),
            title_year: record.title_year,
            director_name: record.director_name.clone(),
            genres: record.genres.clone(),
            imdb_score,
        })
    }
}

/// Suggestion returned when a title query has no exact match
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Candidate {
    /// Row identifier, usable as `selection` in a follow-up search
    pub id: usize,
    pub movie_title: String,
    #[serde(serialize_with = "or_not_available")]
    pub title_year: Option<i32>,
}

impl Candidate {
    pub fn new(id: usize, record: &MovieRecord) -> Self {
        Self {
            id,
            movie_title: record.title().to_string(),
            title_year: record.title_year,
        }
    }
}
