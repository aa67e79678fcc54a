//! Movie similarity service
//!
//! Loads a static movie dataset once, groups the movies with seeded k-means
//! over five standardized numeric features, and answers two queries against
//! that read-only catalog: movies similar to a title, and a ranked Top-100.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
