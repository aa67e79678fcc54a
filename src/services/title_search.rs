use regex::{Regex, RegexBuilder};

use crate::{
    error::{AppError, AppResult},
    models::Candidate,
    services::catalog::Catalog,
};

/// Result of resolving a free-text title query
#[derive(Debug, Clone, PartialEq)]
pub enum TitleMatch {
    /// Row identifier of the matched movie
    Resolved(usize),
    /// Titles containing the query, in dataset order
    Ambiguous(Vec<Candidate>),
}

/// Resolves title queries against the catalog
///
/// An exact (trimmed, case-insensitive) title match wins. Otherwise every
/// title containing the query as a case-insensitive substring is offered as a
/// candidate. A `selection` names a candidate's row identifier and resolves
/// straight to that row.
pub struct TitleMatcher<'a> {
    catalog: &'a Catalog,
    candidate_limit: usize,
}

impl<'a> TitleMatcher<'a> {
    pub fn new(catalog: &'a Catalog, candidate_limit: usize) -> Self {
        Self {
            catalog,
            candidate_limit: candidate_limit.max(1),
        }
    }

    pub fn resolve(&self, query: &str, selection: Option<usize>) -> AppResult<TitleMatch> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation(
                "Parameter 'movie' is required.".to_string(),
            ));
        }

        let pattern = substring_pattern(query)?;

        if let Some(row) = selection {
            return self.resolve_selection(&pattern, row);
        }

        if let Some(row) = self.exact_match(query) {
            tracing::debug!(query, row, "Exact title match");
            return Ok(TitleMatch::Resolved(row));
        }

        let candidates = self.candidates(&pattern);
        if candidates.is_empty() {
            return Err(AppError::NotFound("No movie found.".to_string()));
        }

        tracing::debug!(query, candidates = candidates.len(), "Title query is ambiguous");
        Ok(TitleMatch::Ambiguous(candidates))
    }

    /// First row whose normalized title equals the normalized query
    fn exact_match(&self, query: &str) -> Option<usize> {
        let needle = query.to_lowercase();
        self.catalog
            .movies()
            .iter()
            .position(|movie| movie.title().to_lowercase() == needle)
    }

    fn candidates(&self, pattern: &Regex) -> Vec<Candidate> {
        self.catalog
            .movies()
            .iter()
            .enumerate()
            .filter(|(_, movie)| pattern.is_match(movie.title()))
            .take(self.candidate_limit)
            .map(|(row, movie)| Candidate::new(row, movie))
            .collect()
    }

    /// Accepts a previously offered candidate; the row must still match the query
    fn resolve_selection(&self, pattern: &Regex, row: usize) -> AppResult<TitleMatch> {
        match self.catalog.movie(row) {
            Some(movie) if pattern.is_match(movie.title()) => Ok(TitleMatch::Resolved(row)),
            _ => Err(AppError::Validation("Invalid selection.".to_string())),
        }
    }
}

/// Case-insensitive literal pattern for the query
fn substring_pattern(query: &str) -> AppResult<Regex> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .map_err(|e| AppError::Validation(format!("Unusable movie query: {}", e)))
}
