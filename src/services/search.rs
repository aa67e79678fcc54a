use crate::{
    error::{AppError, AppResult},
    models::{SearchResponse, SortOrder},
    services::{
        catalog::Catalog,
        similarity::similar_movies,
        title_search::{TitleMatch, TitleMatcher},
    },
};

pub const DEFAULT_SEARCH_ORDER: &str = "imdb";

const AMBIGUOUS_MESSAGE: &str = "No exact match found. Select one of the candidates.";

/// Finds movies similar to the queried title
///
/// An exact title (or a `selection` from an earlier candidate list) resolves to
/// a movie and yields the well-rated members of its cluster. Without an exact
/// match the caller receives the candidate list instead. `order` defaults to
/// "imdb"; "year" sorts by release year.
pub fn search(
    catalog: &Catalog,
    movie: &str,
    selection: Option<usize>,
    order: Option<&str>,
    candidate_limit: usize,
) -> AppResult<SearchResponse> {
    let order = order
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_SEARCH_ORDER.to_string());

    let row = match TitleMatcher::new(catalog, candidate_limit).resolve(movie, selection)? {
        TitleMatch::Resolved(row) => row,
        TitleMatch::Ambiguous(candidates) => {
            return Ok(SearchResponse::Ambiguous {
                message: AMBIGUOUS_MESSAGE.to_string(),
                candidates,
            })
        }
    };

    let (Some(selected), Some(cluster)) = (catalog.movie(row), catalog.cluster_of(row)) else {
        return Err(AppError::Internal(format!("row {} missing from catalog", row)));
    };

    let similar = similar_movies(catalog, row, SortOrder::from_param(&order));

    tracing::info!(
        movie = %selected.title(),
        row,
        cluster,
        similar = similar.len(),
        "Similar movies found"
    );

    Ok(SearchResponse::Resolved {
        selected_movie: selected.title().to_string(),
        cluster,
        order,
        similar_movies: similar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ClusterConfig,
        services::{catalog::fixtures, similarity::SCORE_THRESHOLD},
    };

    fn catalog() -> Catalog {
        Catalog::build(fixtures::movies(), &ClusterConfig::default()).unwrap()
    }

    #[test]
    fn test_exact_title_resolves_with_similar_movies() {
        let catalog = catalog();
        let response = search(&catalog, "Inception", None, None, 50).unwrap();

        let SearchResponse::Resolved {
            selected_movie,
            cluster,
            order,
            similar_movies,
        } = response
        else {
            panic!("expected resolved response");
        };

        assert_eq!(selected_movie, "Inception");
        assert_eq!(Some(cluster), catalog.cluster_of(0));
        assert_eq!(order, "imdb");
        assert!(similar_movies.iter().any(|m| m.movie_title == "Inception"));
        assert!(similar_movies.iter().all(|m| m.imdb_score >= SCORE_THRESHOLD));
    }

    #[test]
    fn test_partial_title_returns_candidates() {
        let catalog = catalog();
        let response = search(&catalog, "inc", None, Some("year"), 50).unwrap();

        let SearchResponse::Ambiguous { message, candidates } = response else {
            panic!("expected ambiguous response");
        };
        assert_eq!(message, AMBIGUOUS_MESSAGE);
        assert!(!candidates.is_empty());
        assert!(candidates
            .iter()
            .all(|c| c.movie_title.to_lowercase().contains("inc")));
    }

    #[test]
    fn test_selection_resolves_and_echoes_order() {
        let catalog = catalog();
        let response = search(&catalog, "matrix", Some(2), Some("Year"), 50).unwrap();

        let SearchResponse::Resolved {
            selected_movie,
            order,
            ..
        } = response
        else {
            panic!("expected resolved response");
        };
        assert_eq!(selected_movie, "The Matrix Reloaded");
        assert_eq!(order, "year");
    }

    #[test]
    fn test_order_is_echoed_lowercased_without_trimming() {
        let catalog = catalog();
        let response = search(&catalog, "Inception", None, Some(" YEAR "), 50).unwrap();

        let SearchResponse::Resolved {
            order,
            similar_movies,
            ..
        } = response
        else {
            panic!("expected resolved response");
        };
        assert_eq!(order, " year ");
        // Still interpreted as year order
        assert!(similar_movies
            .windows(2)
            .all(|w| w[1].title_year.is_none() || w[0].title_year >= w[1].title_year));
    }

    #[test]
    fn test_errors_propagate() {
        let catalog = catalog();
        assert!(matches!(
            search(&catalog, "", None, None, 50),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            search(&catalog, "zzz-no-such-movie", None, None, 50),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            search(&catalog, "matrix", Some(500), None, 50),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_search_is_idempotent() {
        let catalog = catalog();
        assert_eq!(
            search(&catalog, "Inception", None, Some("year"), 50).unwrap(),
            search(&catalog, "Inception", None, Some("year"), 50).unwrap()
        );
    }
}
