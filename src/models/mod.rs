use serde::{Serialize, Serializer};

pub mod movie;

pub use movie::{Candidate, MovieRecord, MovieView};

/// Placeholder rendered for missing year, director and genres values
pub const NOT_AVAILABLE: &str = "N/D";

/// Serializes `None` as the "N/D" placeholder instead of `null`
pub(crate) fn or_not_available<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}

/// Sort key for similarity and Top-100 listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Descending `imdb_score`
    Score,
    /// Descending `title_year`, missing years last
    Year,
}

impl SortOrder {
    /// Interprets an `order` parameter; anything other than "year" means score order
    pub fn from_param(order: &str) -> Self {
        if order.trim().eq_ignore_ascii_case("year") {
            SortOrder::Year
        } else {
            SortOrder::Score
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Outcome of a title search
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SearchResponse {
    /// No exact title match; the caller picks one of the candidates
    Ambiguous {
        message: String,
        candidates: Vec<Candidate>,
    },
    /// Title resolved; lists the well-rated movies from its cluster
    Resolved {
        selected_movie: String,
        cluster: usize,
        order: String,
        similar_movies: Vec<MovieView>,
    },
}

/// Top-100 listing
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Top100Response {
    pub order: String,
    pub genre: String,
    pub movies: Vec<MovieView>,
}
