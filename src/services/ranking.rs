use std::cmp::Ordering;

use crate::{
    models::{MovieView, SortOrder, Top100Response},
    services::catalog::Catalog,
};

/// Maximum number of movies in the ranked listing
pub const TOP_N: usize = 100;

pub const DEFAULT_TOP_ORDER: &str = "score";

/// Sorts views in place, best first
///
/// The sort is stable, so rows that tie keep their dataset order. Movies
/// without a year sort after every dated one.
pub fn sort_movies(movies: &mut [MovieView], order: SortOrder) {
    match order {
        SortOrder::Score => movies.sort_by(|a, b| b.imdb_score.total_cmp(&a.imdb_score)),
        SortOrder::Year => movies.sort_by(|a, b| match (a.title_year, b.title_year) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }
}

/// Best-scored movies, optionally restricted to a genre
///
/// The `TOP_N` highest scores are selected first; `SortOrder::Year` then
/// re-orders that selection by release year.
pub fn top_movies(catalog: &Catalog, order: SortOrder, genre: Option<&str>) -> Vec<MovieView> {
    let mut ranked: Vec<(usize, MovieView)> = catalog
        .scored()
        .filter(|(_, movie, _)| genre.map_or(true, |g| movie.has_genre(g)))
        .map(|(row, _, view)| (row, view))
        .collect();

    ranked.sort_by(|(_, a), (_, b)| b.imdb_score.total_cmp(&a.imdb_score));
    ranked.truncate(TOP_N);

    if order == SortOrder::Year {
        // Year ties fall back to dataset order, not score order
        ranked.sort_by_key(|(row, _)| *row);
    }

    let mut movies: Vec<MovieView> = ranked.into_iter().map(|(_, view)| view).collect();
    if order == SortOrder::Year {
        sort_movies(&mut movies, SortOrder::Year);
    }

    movies
}

/// Top-100 listing as exposed to callers
///
/// `order` defaults to "score"; a blank `genre` means no filter.
pub fn top100(catalog: &Catalog, order: Option<&str>, genre: Option<&str>) -> Top100Response {
    let order = order
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_TOP_ORDER.to_string());
    let genre = genre.map(str::trim).unwrap_or_default();
    let filter = (!genre.is_empty()).then_some(genre);

    let movies = top_movies(catalog, SortOrder::from_param(&order), filter);

    tracing::debug!(order = %order, genre, returned = movies.len(), "Top movies ranked");

    Top100Response {
        order,
        genre: genre.to_string(),
        movies,
    }
}
