use crate::{
    models::{MovieView, SortOrder},
    services::{catalog::Catalog, ranking::sort_movies},
};

/// Minimum `imdb_score` for a movie to be recommended
pub const SCORE_THRESHOLD: f64 = 7.5;

/// Movies sharing the cluster of `row` with a score of at least `SCORE_THRESHOLD`
///
/// The anchor movie is subject to the same threshold as everything else, so it
/// appears in its own result only when it qualifies.
pub fn similar_movies(catalog: &Catalog, row: usize, order: SortOrder) -> Vec<MovieView> {
    let Some(cluster) = catalog.cluster_of(row) else {
        return Vec::new();
    };

    let mut movies: Vec<MovieView> = catalog
        .scored()
        .filter(|(other, _, view)| {
            view.imdb_score >= SCORE_THRESHOLD && catalog.cluster_of(*other) == Some(cluster)
        })
        .map(|(_, _, view)| view)
        .collect();

    sort_movies(&mut movies, order);
    movies
}
