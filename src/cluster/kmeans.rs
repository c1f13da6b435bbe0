//! K-means clustering.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS). The foundational clustering algorithm, dating to 1957 (Lloyd).
//!
//! # The Objective
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! Sum of squared distances from each point to its cluster centroid.
//!
//! # Lloyd's Algorithm
//!
//! 1. Initialize k centroids uniformly at random inside the per-dimension
//!    bounding box of the data
//! 2. **Assign**: Each point → nearest centroid
//! 3. **Update**: Each centroid → mean of assigned points
//! 4. Repeat until no centroid moves
//!
//! Convergence is detected by exact component-wise equality of successive
//! centroid positions. A configurable iteration cap bounds the loop; hitting
//! the cap returns the current model flagged as not converged (see
//! [`KmeansFit::converged`]).
//!
//! # Failure Modes
//!
//! - **Local optima**: NP-hard problem; Lloyd finds a local minimum only
//! - **Empty clusters**: a centroid that attracts no points keeps its current
//!   position and will stay empty for the rest of the fit. This happens more
//!   often with bounding-box initialization than with k-means++ seeding
//!   (not implemented here).
//! - **Initialization sensitivity**: bad initial centroids → bad results;
//!   re-run with different seeds when quality matters
//!
//! # Complexity
//!
//! O(n·k·d) per iteration for n points of dimension d.
//!
//! # References
//!
//! Lloyd, S. (1982). "Least squares quantization in PCM." IEEE Transactions
//! on Information Theory. MacQueen, J. (1967). "Some methods for
//! classification and analysis of multivariate observations."

use super::traits::Clustering;
use super::util;
use crate::error::{Error, Result};
use log::debug;
use rand::prelude::*;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum Lloyd iterations.
    max_iter: usize,
    /// Random seed.
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new K-means clusterer with `k` clusters.
    ///
    /// Defaults: `max_iter = 300`, OS-seeded randomness.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 300,
            seed: None,
        }
    }

    /// Set the maximum number of Lloyd iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the random seed for reproducible centroid initialization.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fit the model to `data` and return the fitted result.
    ///
    /// `data` is a slice of equal-length points. `k` may exceed the number of
    /// points; surplus centroids simply end up with empty clusters.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `data` is empty
    /// - [`Error::InvalidParameter`] if `k == 0` or points have zero dimensions
    /// - [`Error::DimensionMismatch`] if points have inconsistent lengths
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<KmeansFit> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }

        let d = data[0].len();
        if d == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }
        for point in data.iter().skip(1) {
            if point.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: point.len(),
                });
            }
        }

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut centroids = init_centroids(data, self.k, &mut rng)?;
        let mut labels = assign(data, &centroids)?;

        let mut iterations = 0;
        let mut converged = false;
        while iterations < self.max_iter {
            let changed = update_centroids(data, &mut centroids, &mut labels)?;
            iterations += 1;
            if !changed {
                converged = true;
                break;
            }
        }

        if converged {
            debug!("k-means converged after {iterations} iterations");
        } else {
            debug!("k-means hit the iteration cap ({iterations}) without converging");
        }

        Ok(KmeansFit {
            centroids,
            labels,
            iterations,
            converged,
        })
    }
}

/// A fitted k-means model.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    centroids: Vec<Vec<f32>>,
    labels: Vec<usize>,
    iterations: usize,
    converged: bool,
}

impl KmeansFit {
    /// Final centroid positions (exactly `k` entries).
    ///
    /// Centroids whose cluster stayed empty retain their initial position.
    pub fn centroids(&self) -> &[Vec<f32>] {
        &self.centroids
    }

    /// One cluster label per input point, each in `[0, k)`.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of update iterations that ran.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the fit converged before the iteration cap.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Consume the model, returning the label vector.
    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }
}

/// Draw `k` centroids uniformly at random, each dimension bounded by the
/// observed `[min, max]` range of that dimension across the dataset.
fn init_centroids(data: &[Vec<f32>], k: usize, rng: &mut impl Rng) -> Result<Vec<Vec<f32>>> {
    let columns = util::transpose(data);

    let mut mins = Vec::with_capacity(columns.len());
    let mut maxs = Vec::with_capacity(columns.len());
    for col in &columns {
        mins.push(util::min(col)?);
        maxs.push(util::max(col)?);
    }

    let mut centroids = Vec::with_capacity(k);
    for _ in 0..k {
        let c: Vec<f32> = mins
            .iter()
            .zip(maxs.iter())
            .map(|(&lo, &hi)| rng.random::<f32>() * (hi - lo) + lo)
            .collect();
        centroids.push(c);
    }
    Ok(centroids)
}

/// Label every point with the index of its nearest centroid.
///
/// Ties keep the lowest centroid index.
fn assign(data: &[Vec<f32>], centroids: &[Vec<f32>]) -> Result<Vec<usize>> {
    let mut labels = Vec::with_capacity(data.len());
    for point in data {
        let mut nearest = 0;
        let mut min_dist = util::euclidean_distance(point, &centroids[0])?;
        for (j, centroid) in centroids.iter().enumerate().skip(1) {
            let dist = util::euclidean_distance(point, centroid)?;
            if dist < min_dist {
                nearest = j;
                min_dist = dist;
            }
        }
        labels.push(nearest);
    }
    Ok(labels)
}

/// Recompute each centroid as the component-wise mean of its assigned points,
/// then refresh the label vector against the moved centroids.
///
/// Returns whether any centroid component changed. The comparison is exact:
/// convergence means no component moved at all. A centroid with no assigned
/// points is left untouched.
fn update_centroids(
    data: &[Vec<f32>],
    centroids: &mut [Vec<f32>],
    labels: &mut Vec<usize>,
) -> Result<bool> {
    let mut changed = false;

    for (i, centroid) in centroids.iter_mut().enumerate() {
        let mut points: Vec<Vec<f32>> = Vec::new();
        for (point, &label) in data.iter().zip(labels.iter()) {
            if label == i {
                points.push(point.clone());
            }
        }

        // Empty cluster: the centroid stays where it is.
        if points.is_empty() {
            continue;
        }

        let columns = util::transpose(&points);
        for (j, col) in columns.iter().enumerate() {
            let new_value = util::mean(col)?;
            if new_value != centroid[j] {
                centroid[j] = new_value;
                changed = true;
            }
        }
    }

    *labels = assign(data, centroids)?;
    Ok(changed)
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.into_labels())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run update steps until nothing changes, with a small safety bound.
    fn run_to_convergence(
        data: &[Vec<f32>],
        centroids: &mut Vec<Vec<f32>>,
        labels: &mut Vec<usize>,
    ) -> usize {
        for iteration in 1..=50 {
            let changed = update_centroids(data, centroids, labels).unwrap();
            if !changed {
                return iteration;
            }
        }
        panic!("did not converge within 50 iterations");
    }

    fn two_bands() -> Vec<Vec<f32>> {
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![10.0, 0.0],
            vec![10.0, 1.0],
        ]
    }

    #[test]
    fn converges_from_one_start_per_cluster() {
        let data = two_bands();
        let mut centroids = vec![vec![2.5, 0.5], vec![7.5, 0.5]];
        let mut labels = assign(&data, &centroids).unwrap();

        run_to_convergence(&data, &mut centroids, &mut labels);

        assert_eq!(centroids, vec![vec![0.0, 0.5], vec![10.0, 0.5]]);
        assert_eq!(labels, vec![0, 0, 1, 1]);
    }

    #[test]
    fn update_is_idempotent_after_convergence() {
        let data = two_bands();
        let mut centroids = vec![vec![2.5, 0.5], vec![7.5, 0.5]];
        let mut labels = assign(&data, &centroids).unwrap();
        run_to_convergence(&data, &mut centroids, &mut labels);

        let frozen = centroids.clone();
        let changed = update_centroids(&data, &mut centroids, &mut labels).unwrap();

        assert!(!changed);
        assert_eq!(centroids, frozen);
    }

    #[test]
    fn empty_cluster_keeps_its_centroid() {
        let data = two_bands();
        // Third centroid starts far outside the data and never attracts a point.
        let mut centroids = vec![vec![0.0, 0.5], vec![10.0, 0.5], vec![100.0, 100.0]];
        let mut labels = assign(&data, &centroids).unwrap();

        run_to_convergence(&data, &mut centroids, &mut labels);

        assert_eq!(centroids[2], vec![100.0, 100.0]);
        assert!(labels.iter().all(|&l| l < 2));
    }

    #[test]
    fn nearest_assignment_uses_true_indices() {
        // The nearest centroid is the last of three; its reported label must
        // be 2, not a position relative to some sub-scan.
        let data = vec![vec![9.0]];
        let centroids = vec![vec![0.0], vec![5.0], vec![9.0]];
        let labels = assign(&data, &centroids).unwrap();
        assert_eq!(labels, vec![2]);
    }

    #[test]
    fn single_cluster_settles_on_dataset_mean() {
        let data = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let model = Kmeans::new(1).with_seed(7).fit(&data).unwrap();

        assert!(model.converged());
        assert!(model.iterations() <= 2);
        assert_eq!(model.labels(), &[0, 0, 0]);
        assert_eq!(model.centroids(), &[vec![3.0, 4.0]]);
    }

    #[test]
    fn fit_two_clusters_shape() {
        let data = two_bands();
        let model = Kmeans::new(2).with_seed(42).fit(&data).unwrap();

        assert!(model.converged());
        assert_eq!(model.labels().len(), 4);
        assert!(model.labels().iter().all(|&l| l < 2));
        assert_eq!(model.centroids().len(), 2);
        assert!(model.centroids().iter().all(|c| c.len() == 2));
    }

    #[test]
    fn same_seed_same_result() {
        let data = two_bands();
        let a = Kmeans::new(2).with_seed(42).fit(&data).unwrap();
        let b = Kmeans::new(2).with_seed(42).fit(&data).unwrap();

        assert_eq!(a.labels(), b.labels());
        assert_eq!(a.centroids(), b.centroids());
    }

    #[test]
    fn k_exceeding_points_leaves_empty_clusters() {
        // Two identical points collapse every dimension range, so all three
        // centroids initialize to the same spot and two clusters stay empty.
        let data = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        let model = Kmeans::new(3).with_seed(0).fit(&data).unwrap();

        assert!(model.converged());
        assert_eq!(model.labels(), &[0, 0]);
        assert_eq!(model.centroids().len(), 3);
        for centroid in model.centroids() {
            assert_eq!(centroid, &vec![1.0, 1.0]);
        }
    }

    #[test]
    fn iteration_cap_flags_unconverged() {
        let data = two_bands();
        let model = Kmeans::new(2).with_seed(42).with_max_iter(0).fit(&data).unwrap();

        assert!(!model.converged());
        assert_eq!(model.iterations(), 0);
        // Labels still come from the initial assignment and stay valid.
        assert_eq!(model.labels().len(), 4);
        assert!(model.labels().iter().all(|&l| l < 2));
    }

    #[test]
    fn empty_input_rejected() {
        let data: Vec<Vec<f32>> = vec![];
        assert!(matches!(
            Kmeans::new(2).fit(&data),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn k_zero_rejected() {
        let data = vec![vec![0.0, 0.0]];
        assert!(matches!(
            Kmeans::new(0).fit(&data),
            Err(Error::InvalidParameter { name: "k", .. })
        ));
    }

    #[test]
    fn zero_dimension_rejected() {
        let data: Vec<Vec<f32>> = vec![vec![]];
        assert!(matches!(
            Kmeans::new(1).fit(&data),
            Err(Error::InvalidParameter {
                name: "dimension",
                ..
            })
        ));
    }

    #[test]
    fn ragged_rows_rejected() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            Kmeans::new(1).fit(&data),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn fit_predict_matches_fit_labels() {
        let data = two_bands();
        let labels = Kmeans::new(2).with_seed(9).fit_predict(&data).unwrap();
        let model = Kmeans::new(2).with_seed(9).fit(&data).unwrap();
        assert_eq!(labels, model.labels());
    }

    #[test]
    fn n_clusters_reports_k() {
        assert_eq!(Kmeans::new(4).n_clusters(), 4);
    }
}
