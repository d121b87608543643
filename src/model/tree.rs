//! Regression tree (CART, squared-error criterion)

use ndarray::{Array1, Array2, ArrayView1};
use rand::seq::index;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Leaf node holding the mean target of its samples
    Leaf { value: f64, n_samples: usize },
    /// Internal node; samples with `x[feature_idx] <= threshold` go left
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
        n_samples: usize,
    },
}

/// Regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    root: Option<TreeNode>,
    /// Maximum depth (unlimited when `None`)
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Features considered per split (all when `None`)
    pub max_features: Option<usize>,
    n_features: usize,
    feature_importances: Vec<f64>,
}

impl Default for RegressionTree {
    fn default() -> Self {
        Self::new()
    }
}

struct BestSplit {
    feature_idx: usize,
    threshold: f64,
    gain: f64,
}

impl RegressionTree {
    pub fn new() -> Self {
        Self {
            root: None,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            n_features: 0,
            feature_importances: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples;
        self
    }

    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples;
        self
    }

    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    /// Fit the tree. `rng` drives per-split feature subsampling and is only
    /// consulted when `max_features` is below the feature count.
    pub fn fit<R: RngCore>(&mut self, x: &Array2<f64>, y: &Array1<f64>, rng: &mut R) -> Result<&mut Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(ModelError::ShapeError {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(ModelError::EmptyDataset);
        }

        self.n_features = n_features;
        let mut importances = vec![0.0; n_features];
        let indices: Vec<usize> = (0..n_samples).collect();
        self.root = Some(self.build(x, y, &indices, 0, &mut importances, rng));

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for imp in &mut importances {
                *imp /= total;
            }
        }
        self.feature_importances = importances;

        Ok(self)
    }

    fn build<R: RngCore>(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
        depth: usize,
        importances: &mut [f64],
        rng: &mut R,
    ) -> TreeNode {
        let n_samples = indices.len();
        let (sum, sq_sum) = sums(y, indices);
        let mean = sum / n_samples as f64;
        let leaf = TreeNode::Leaf {
            value: mean,
            n_samples,
        };

        let impurity = variance(n_samples, sum, sq_sum);
        let should_stop = n_samples < self.min_samples_split
            || n_samples < 2 * self.min_samples_leaf
            || self.max_depth.is_some_and(|d| depth >= d)
            || impurity <= 1e-12;
        if should_stop {
            return leaf;
        }

        let Some(best) = self.find_best_split(x, y, indices, impurity, rng) else {
            return leaf;
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| x[[i, best.feature_idx]] <= best.threshold);

        importances[best.feature_idx] += n_samples as f64 * best.gain;

        let left = Box::new(self.build(x, y, &left_idx, depth + 1, importances, rng));
        let right = Box::new(self.build(x, y, &right_idx, depth + 1, importances, rng));

        TreeNode::Split {
            feature_idx: best.feature_idx,
            threshold: best.threshold,
            left,
            right,
            n_samples,
        }
    }

    fn candidate_features<R: RngCore>(&self, n_features: usize, rng: &mut R) -> Vec<usize> {
        match self.max_features {
            Some(k) if k < n_features => {
                let mut picked = index::sample(rng, n_features, k.max(1)).into_vec();
                picked.sort_unstable();
                picked
            }
            _ => (0..n_features).collect(),
        }
    }

    fn find_best_split<R: RngCore>(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut R,
    ) -> Option<BestSplit> {
        let n = indices.len();
        if n < 2 {
            return None;
        }
        let mut best: Option<BestSplit> = None;

        for feature_idx in self.candidate_features(x.ncols(), rng) {
            // Sort samples by feature value once, then sweep thresholds with
            // running sums.
            let mut order: Vec<(f64, f64)> = indices.iter().map(|&i| (x[[i, feature_idx]], y[i])).collect();
            order.sort_by(|a, b| a.0.total_cmp(&b.0));

            let (total_sum, total_sq) = order
                .iter()
                .fold((0.0, 0.0), |(s, q), &(_, yi)| (s + yi, q + yi * yi));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for k in 0..n - 1 {
                let (xv, yv) = order[k];
                left_sum += yv;
                left_sq += yv * yv;

                let next = order[k + 1].0;
                if next <= xv {
                    continue;
                }
                let left_count = k + 1;
                let right_count = n - left_count;
                if left_count < self.min_samples_leaf || right_count < self.min_samples_leaf {
                    continue;
                }

                let weighted = (left_count as f64 * variance(left_count, left_sum, left_sq)
                    + right_count as f64
                        * variance(right_count, total_sum - left_sum, total_sq - left_sq))
                    / n as f64;
                let gain = parent_impurity - weighted;

                if gain > 1e-12 && best.as_ref().map_or(true, |b| gain > b.gain) {
                    best = Some(BestSplit {
                        feature_idx,
                        threshold: (xv + next) / 2.0,
                        gain,
                    });
                }
            }
        }

        best
    }

    /// Predict every row of `x`
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let root = self.root.as_ref().ok_or(ModelError::ModelNotFitted)?;
        if x.ncols() != self.n_features {
            return Err(ModelError::ShapeError {
                expected: format!("{} features", self.n_features),
                actual: format!("{} features", x.ncols()),
            });
        }
        Ok(x.rows().into_iter().map(|row| predict_sample(root, row)).collect())
    }

    /// Normalized impurity decrease per feature (empty before fitting)
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Depth of the fitted tree (0 when unfitted)
    pub fn depth(&self) -> usize {
        fn node_depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => 1 + node_depth(left).max(node_depth(right)),
            }
        }
        self.root.as_ref().map_or(0, node_depth)
    }
}

fn predict_sample(mut node: &TreeNode, sample: ArrayView1<f64>) -> f64 {
    loop {
        match node {
            TreeNode::Leaf { value, .. } => return *value,
            TreeNode::Split {
                feature_idx,
                threshold,
                left,
                right,
                ..
            } => {
                node = if sample[*feature_idx] <= *threshold { left } else { right };
            }
        }
    }
}

fn sums(y: &Array1<f64>, indices: &[usize]) -> (f64, f64) {
    indices
        .iter()
        .fold((0.0, 0.0), |(s, q), &i| (s + y[i], q + y[i] * y[i]))
}

// Var = E[X²] - E[X]²
fn variance(count: usize, sum: f64, sq_sum: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let n = count as f64;
    (sq_sum / n - (sum / n).powi(2)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn fits_step_function_exactly() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0]];
        let y = array![10.0, 10.0, 10.0, 20.0, 20.0, 20.0];

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut tree = RegressionTree::new();
        tree.fit(&x, &y, &mut rng).unwrap();

        let pred = tree.predict(&x).unwrap();
        assert_eq!(pred, y);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.predict(&array![[3.4]]).unwrap()[0], 10.0);
    }

    #[test]
    fn max_depth_limits_tree() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0], [7.0], [8.0]];
        let y = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut tree = RegressionTree::new().with_max_depth(Some(2));
        tree.fit(&x, &y, &mut rng).unwrap();

        assert!(tree.depth() <= 3);
    }

    #[test]
    fn informative_feature_gets_importance() {
        let x = array![[1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]];
        let y = array![1.0, 2.0, 3.0, 4.0];

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut tree = RegressionTree::new();
        tree.fit(&x, &y, &mut rng).unwrap();

        let imp = tree.feature_importances();
        assert_eq!(imp.len(), 2);
        assert!((imp[0] - 1.0).abs() < 1e-9);
        assert_eq!(imp[1], 0.0);
    }

    #[test]
    fn rejects_shape_mismatch() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = RegressionTree::new().fit(&x, &y, &mut rng).unwrap_err();
        assert!(matches!(err, ModelError::ShapeError { .. }));
    }

    #[test]
    fn unfitted_tree_cannot_predict() {
        let tree = RegressionTree::new();
        assert!(matches!(
            tree.predict(&array![[1.0]]),
            Err(ModelError::ModelNotFitted)
        ));
    }
}
