//! K-means clustering for grouping similar items.
//!
//! This module provides hard clustering for dense vectors: every point gets
//! exactly one cluster label.
//!
//! ## K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! **When to use**: Fast initial exploration, or when you need hard assignments
//! and can accept the spherical assumption.
//!
//! ## Usage
//!
//! ```rust
//! use lloyd::cluster::{Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let model = Kmeans::new(2).with_seed(42).fit(&data).unwrap();
//! assert_eq!(model.labels().len(), data.len());
//! assert_eq!(model.centroids().len(), 2);
//!
//! // Or via the `Clustering` trait when only labels are needed.
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert!(labels.iter().all(|&l| l < 2));
//! ```

mod kmeans;
mod traits;
mod util;

pub use kmeans::{Kmeans, KmeansFit};
pub use traits::Clustering;
