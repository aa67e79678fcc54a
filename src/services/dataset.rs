use std::{io::Read, path::Path};

use csv::StringRecord;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
};

/// Columns every dataset must provide
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "movie_title",
    "duration",
    "budget",
    "imdb_score",
    "title_year",
    "gross",
    "director_name",
    "genres",
];

/// Positions of the required columns within a CSV header
struct ColumnIndex {
    movie_title: usize,
    duration: usize,
    budget: usize,
    imdb_score: usize,
    title_year: usize,
    gross: usize,
    director_name: usize,
    genres: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> AppResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| AppError::Schema(format!("missing required column '{}'", name)))
        };

        // Checked in REQUIRED_COLUMNS order so the first absent column is reported
        for name in REQUIRED_COLUMNS {
            find(name)?;
        }

        Ok(Self {
            movie_title: find("movie_title")?,
            duration: find("duration")?,
            budget: find("budget")?,
            imdb_score: find("imdb_score")?,
            title_year: find("title_year")?,
            gross: find("gross")?,
            director_name: find("director_name")?,
            genres: find("genres")?,
        })
    }

    fn parse(&self, row: &StringRecord) -> MovieRecord {
        MovieRecord {
            movie_title: row.get(self.movie_title).unwrap_or_default().to_string(),
            title_year: number(row, self.title_year).map(|year| year as i32),
            duration: number(row, self.duration),
            budget: number(row, self.budget),
            gross: number(row, self.gross),
            imdb_score: number(row, self.imdb_score),
            director_name: text(row, self.director_name),
            genres: text(row, self.genres),
        }
    }
}

fn number(row: &StringRecord, index: usize) -> Option<f64> {
    row.get(index)
        .and_then(|cell| cell.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn text(row: &StringRecord, index: usize) -> Option<String> {
    row.get(index)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
}

/// Loads the movie dataset from a CSV file
pub fn load_movies(path: impl AsRef<Path>) -> AppResult<Vec<MovieRecord>> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading movie dataset");

    let reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    read_records(reader)
}

/// Reads the movie dataset from any CSV source with a header row
///
/// Row order is preserved: the position of a record in the returned vector is
/// its row identifier for the lifetime of the process.
pub fn read_movies<R: Read>(source: R) -> AppResult<Vec<MovieRecord>> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    read_records(reader)
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> AppResult<Vec<MovieRecord>> {
    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut movies = Vec::new();
    for row in reader.records() {
        movies.push(columns.parse(&row?));
    }

    tracing::info!(rows = movies.len(), "Movie dataset loaded");

    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "color,director_name,duration,gross,genres,movie_title,title_year,budget,imdb_score";

    #[test]
    fn test_read_movies_parses_columns_by_name() {
        let csv = format!(
            "{HEADER}\n\
             Color,James Cameron,178,760505847,Action|Adventure,Avatar\u{a0},2009,237000000,7.9\n"
        );

        let movies = read_movies(csv.as_bytes()).unwrap();
        assert_eq!(movies.len(), 1);

        let avatar = &movies[0];
        assert_eq!(avatar.movie_title, "Avatar\u{a0}");
        assert_eq!(avatar.title(), "Avatar");
        assert_eq!(avatar.title_year, Some(2009));
        assert_eq!(avatar.duration, Some(178.0));
        assert_eq!(avatar.gross, Some(760_505_847.0));
        assert_eq!(avatar.budget, Some(237_000_000.0));
        assert_eq!(avatar.imdb_score, Some(7.9));
        assert_eq!(avatar.director_name.as_deref(), Some("James Cameron"));
        assert_eq!(avatar.genres.as_deref(), Some("Action|Adventure"));
    }

    #[test]
    fn test_blank_cells_are_missing_not_zero() {
        let csv = format!("{HEADER}\n,,,,,Star Wars: Episode VII,,,7.1\n");

        let movies = read_movies(csv.as_bytes()).unwrap();
        let movie = &movies[0];
        assert_eq!(movie.duration, None);
        assert_eq!(movie.gross, None);
        assert_eq!(movie.budget, None);
        assert_eq!(movie.title_year, None);
        assert_eq!(movie.director_name, None);
        assert_eq!(movie.genres, None);
        assert_eq!(movie.imdb_score, Some(7.1));
    }

    #[test]
    fn test_fractional_year_is_truncated() {
        let csv = format!("{HEADER}\nColor,X,100,1,Drama,Movie,2010.0,5,6.5\n");
        let movies = read_movies(csv.as_bytes()).unwrap();
        assert_eq!(movies[0].title_year, Some(2010));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let csv = "movie_title,duration,budget,imdb_score,title_year,director_name,genres\n";

        let err = read_movies(csv.as_bytes()).unwrap_err();
        match err {
            AppError::Schema(msg) => assert!(msg.contains("'gross'"), "unexpected message: {msg}"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_movies_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "Color,Christopher Nolan,148,292568851,Action|Sci-Fi,Inception,2010,160000000,8.8").unwrap();
        writeln!(file, "Color,Lana Wachowski,136,171383253,Action|Sci-Fi,The Matrix,1999,63000000,8.7").unwrap();

        let movies = load_movies(file.path()).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].title(), "The Matrix");
    }

    #[test]
    fn test_load_movies_missing_file() {
        let err = load_movies("/nonexistent/movie_metadata.csv").unwrap_err();
        assert!(matches!(err, AppError::Dataset(_)));
    }
}
