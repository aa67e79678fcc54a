use std::path::Path;

use crate::{
    config::ClusterConfig,
    error::AppResult,
    models::{MovieRecord, MovieView},
    services::{clustering::{ClusterAssignment, KMeansClusterer}, dataset, preprocessing},
};

/// Read-only movie catalog built once at startup
///
/// Holds the dataset in load order together with the cluster label of every
/// row. Nothing mutates it after `build`, so request handlers share it through
/// an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
    assignment: ClusterAssignment,
}

impl Catalog {
    /// Loads the dataset at `path` and clusters it
    pub fn load(path: impl AsRef<Path>, config: &ClusterConfig) -> AppResult<Self> {
        let movies = dataset::load_movies(path)?;
        Self::build(movies, config)
    }

    /// Preprocesses and clusters an already loaded dataset
    pub fn build(movies: Vec<MovieRecord>, config: &ClusterConfig) -> AppResult<Self> {
        let features = preprocessing::prepare_features(&movies)?;
        let assignment = KMeansClusterer::new(*config).fit(&features)?;

        tracing::info!(
            movies = movies.len(),
            clusters = assignment.clusters(),
            "Catalog ready"
        );

        Ok(Self { movies, assignment })
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn movie(&self, row: usize) -> Option<&MovieRecord> {
        self.movies.get(row)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Cluster label of a row
    pub fn cluster_of(&self, row: usize) -> Option<usize> {
        self.assignment.label(row)
    }

    pub fn assignment(&self) -> &ClusterAssignment {
        &self.assignment
    }

    /// Scored rows in dataset order, as `(row, record, view)`
    pub(crate) fn scored(&self) -> impl Iterator<Item = (usize, &MovieRecord, MovieView)> + '_ {
        self.movies
            .iter()
            .enumerate()
            .filter_map(|(row, movie)| MovieView::from_record(movie).map(|view| (row, movie, view)))
    }
}
