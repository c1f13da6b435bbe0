//! K-means clustering for dense vectors.
//!
//! `lloyd` is a small library implementing the classic k-means algorithm
//! (Lloyd iterations) over dense `f32` vectors.
//!
//! The primary public API is under [`cluster`], which provides:
//! - [`Kmeans`]: configuration and fitting entry point
//! - [`KmeansFit`]: the fitted model (centroids, labels, convergence status)

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{Clustering, Kmeans, KmeansFit};
pub use error::{Error, Result};
