use serde::Deserialize;

/// Number of k-means groups the catalog is partitioned into
pub const DEFAULT_CLUSTER_COUNT: usize = 10;

/// Seed for centroid initialization; identical input yields identical labels
pub const DEFAULT_CLUSTER_SEED: u64 = 42;

/// Upper bound on assign/update rounds before k-means stops
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path of the movie metadata CSV
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cluster_count")]
    pub cluster_count: usize,

    #[serde(default = "default_cluster_seed")]
    pub cluster_seed: u64,

    #[serde(default = "default_max_iterations")]
    pub cluster_max_iterations: usize,

    /// Maximum number of candidates returned for an ambiguous title query
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
}

fn default_dataset_path() -> String {
    "movie_metadata.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cluster_count() -> usize {
    DEFAULT_CLUSTER_COUNT
}

fn default_cluster_seed() -> u64 {
    DEFAULT_CLUSTER_SEED
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_candidate_limit() -> usize {
    50
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn cluster_config(&self) -> ClusterConfig {
        ClusterConfig {
            clusters: self.cluster_count,
            seed: self.cluster_seed,
            max_iterations: self.cluster_max_iterations,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parameters of the one-time k-means fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterConfig {
    pub clusters: usize,
    pub seed: u64,
    pub max_iterations: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTER_COUNT,
            seed: DEFAULT_CLUSTER_SEED,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}
