use linfa::{
    traits::{Fit, PredictInplace},
    DatasetBase,
};
use linfa_clustering::KMeans;
use ndarray::{Array1, Array2};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::ClusterConfig,
    error::{AppError, AppResult},
    services::preprocessing::{FeatureVector, FEATURE_COUNT},
};

/// Relative centroid movement below which k-means is considered converged
const KMEANS_TOLERANCE: f64 = 1e-4;

/// Cluster label of every row, fixed once the catalog is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterAssignment {
    labels: Vec<usize>,
    clusters: usize,
}

impl ClusterAssignment {
    /// Label of the given row
    pub fn label(&self, row: usize) -> Option<usize> {
        self.labels.get(row).copied()
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of groups the rows were partitioned into
    pub fn clusters(&self) -> usize {
        self.clusters
    }

    /// Row count per label
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.clusters];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Seeded k-means over standardized feature vectors
///
/// The fit runs through `linfa-clustering` with a `StdRng` built from the
/// configured seed, so identical input always yields identical labels.
pub struct KMeansClusterer {
    config: ClusterConfig,
}

impl KMeansClusterer {
    pub fn new(config: ClusterConfig) -> Self {
        Self { config }
    }

    /// Partitions the feature vectors, one label in `[0, clusters)` per row
    pub fn fit(&self, features: &[FeatureVector]) -> AppResult<ClusterAssignment> {
        let k = self.config.clusters;
        if k == 0 {
            return Err(AppError::Clustering(
                "cluster count must be at least 1".to_string(),
            ));
        }
        if features.len() < k {
            return Err(AppError::Clustering(format!(
                "need at least {} rows with complete features to form {} clusters, found {}",
                k,
                k,
                features.len()
            )));
        }

        let n_samples = features.len();
        let data = Array2::from_shape_vec(
            (n_samples, FEATURE_COUNT),
            features.iter().flatten().copied().collect(),
        )
        .map_err(|e| AppError::Clustering(format!("Failed to build feature matrix: {}", e)))?;

        let dataset = DatasetBase::from(data.clone());
        let rng = StdRng::seed_from_u64(self.config.seed);

        let model = KMeans::params_with_rng(k, rng)
            .max_n_iterations(self.config.max_iterations.max(1) as u64)
            .tolerance(KMEANS_TOLERANCE)
            .fit(&dataset)
            .map_err(|e| {
                AppError::Clustering(format!(
                    "Failed to cluster {} movies into {} groups: {}",
                    n_samples, k, e
                ))
            })?;

        let mut labels = Array1::<usize>::zeros(n_samples);
        model.predict_inplace(&data, &mut labels);

        let assignment = ClusterAssignment {
            labels: labels.to_vec(),
            clusters: k,
        };

        tracing::info!(
            rows = n_samples,
            clusters = k,
            seed = self.config.seed,
            inertia = model.inertia(),
            sizes = ?assignment.sizes(),
            "K-means fit complete"
        );

        Ok(assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(clusters: usize) -> ClusterConfig {
        ClusterConfig {
            clusters,
            ..ClusterConfig::default()
        }
    }

    fn point(x: f64, y: f64) -> FeatureVector {
        [x, y, 0.0, 0.0, 0.0]
    }

    fn grid(n: usize) -> Vec<FeatureVector> {
        (0..n)
            .map(|i| point((i % 7) as f64, (i / 7) as f64 * 1.5))
            .collect()
    }

    #[test]
    fn test_every_row_gets_label_in_range() {
        let features = grid(60);
        let assignment = KMeansClusterer::new(ClusterConfig::default())
            .fit(&features)
            .unwrap();

        assert_eq!(assignment.labels().len(), 60);
        assert!(assignment.labels().iter().all(|&l| l < 10));
        assert_eq!(assignment.sizes().iter().sum::<usize>(), 60);
        assert_eq!(assignment.clusters(), 10);
    }

    #[test]
    fn test_separated_groups_are_recovered() {
        let mut features = Vec::new();
        for i in 0..10 {
            features.push(point(0.0 + i as f64 * 0.01, 0.0));
        }
        for i in 0..10 {
            features.push(point(50.0 + i as f64 * 0.01, 50.0));
        }

        let assignment = KMeansClusterer::new(config(2)).fit(&features).unwrap();
        let labels = assignment.labels();

        assert!(labels[..10].iter().all(|&l| l == labels[0]));
        assert!(labels[10..].iter().all(|&l| l == labels[10]));
        assert_ne!(labels[0], labels[10]);
    }

    #[test]
    fn test_fit_is_reproducible_for_same_seed() {
        let features = grid(45);
        let kmeans = KMeansClusterer::new(ClusterConfig::default());
        assert_eq!(kmeans.fit(&features).unwrap(), kmeans.fit(&features).unwrap());
    }

    #[test]
    fn test_duplicate_rows_share_a_label() {
        let mut features = vec![point(1.0, 1.0); 8];
        features.extend(vec![point(-1.0, 2.0); 8]);

        let assignment = KMeansClusterer::new(config(2)).fit(&features).unwrap();
        assert!(assignment.labels().iter().all(|&l| l < 2));
        assert!(assignment.labels()[..8].iter().all(|&l| l == assignment.labels()[0]));
        assert!(assignment.labels()[8..].iter().all(|&l| l == assignment.labels()[8]));
    }

    #[test]
    fn test_single_iteration_cap_still_labels_every_row() {
        let features = grid(40);
        let capped = ClusterConfig {
            max_iterations: 1,
            ..ClusterConfig::default()
        };
        let assignment = KMeansClusterer::new(capped).fit(&features).unwrap();
        assert_eq!(assignment.labels().len(), 40);
        assert!(assignment.labels().iter().all(|&l| l < 10));
    }

    #[test]
    fn test_too_few_rows_is_clustering_error() {
        let features = grid(9);
        let err = KMeansClusterer::new(ClusterConfig::default())
            .fit(&features)
            .unwrap_err();
        match err {
            AppError::Clustering(msg) => assert!(msg.contains("found 9")),
            other => panic!("expected clustering error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_clusters_is_clustering_error() {
        let err = KMeansClusterer::new(config(0)).fit(&grid(5)).unwrap_err();
        assert!(matches!(err, AppError::Clustering(_)));
    }

    #[test]
    fn test_label_lookup() {
        let features = grid(12);
        let assignment = KMeansClusterer::new(config(3)).fit(&features).unwrap();
        assert!(assignment.label(11).is_some());
        assert_eq!(assignment.label(12), None);
    }
}
