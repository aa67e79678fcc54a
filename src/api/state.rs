use std::sync::Arc;

use crate::services::Catalog;

/// Shared application state
///
/// The catalog is built before the server starts and never written to again,
/// so handlers read it without a lock.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Maximum number of candidates returned for an ambiguous title
    pub candidate_limit: usize,
}

impl AppState {
    /// Creates the state around a fully built catalog
    pub fn new(catalog: Catalog, candidate_limit: usize) -> Self {
        Self {
            catalog: Arc::new(catalog),
            candidate_limit,
        }
    }
}
