//! Decision-tree classifier for regime recommendation.
//!
//! Greedy CART-style induction over the fixed 7-feature encoding of a
//! [`TaxProfile`](crate::profile::TaxProfile): at each node the split that
//! most reduces Gini impurity is chosen, with candidate thresholds taken at
//! midpoints between consecutive distinct feature values.
//!
//! # Determinism
//!
//! Training is bit-for-bit reproducible for identical rows. Features are
//! scanned in fixed vector order and a candidate split replaces the incumbent
//! only on *strictly* greater impurity decrease, so equal-gain ties resolve
//! to the lowest feature index, and within a feature to the lowest threshold.
//! Majority ties at a leaf resolve to [`Regime::New`] (class index 0).
//!
//! # Example
//! ```ignore
//! use taxregime_rs::model::RegimeTree;
//!
//! let fitted = RegimeTree::new().with_max_depth(5).fit(&rows)?;
//! let regime = fitted.predict(&features);
//! ```

use crate::model::TrainingError;
use crate::preprocessing::{FeatureNormalizer, FeatureVector, NUM_FEATURES};
use crate::profile::{Regime, TrainingRow};
use crate::serialization::SerializableParams;
use serde::{Deserialize, Serialize};

/// Hyperparameters for tree induction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegimeTreeConfig {
    /// Maximum number of split levels below the root.
    pub max_depth: usize,
    /// Smallest node size that may still be split.
    pub min_samples_split: usize,
}

impl Default for RegimeTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            min_samples_split: 2,
        }
    }
}

/// Unfitted regime classifier carrying its hyperparameters.
#[derive(Clone, Debug, Default)]
pub struct RegimeTree {
    config: RegimeTreeConfig,
}

impl RegimeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegimeTreeConfig) -> Self {
        Self { config }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.config.min_samples_split = min_samples_split;
        self
    }

    pub fn config(&self) -> &RegimeTreeConfig {
        &self.config
    }

    /// Fit a tree over the labeled rows.
    ///
    /// Every row's profile passes through the same [`FeatureNormalizer`] used
    /// at inference time, which is what pins the feature order between the
    /// two phases.
    ///
    /// # Errors
    /// - [`TrainingError::EmptyData`] if `rows` is empty.
    /// - [`TrainingError::InvalidRow`] if a profile fails normalization.
    /// - [`TrainingError::InsufficientData`] unless both labels are present.
    pub fn fit(&self, rows: &[TrainingRow]) -> Result<FittedRegimeTree, TrainingError> {
        if rows.is_empty() {
            return Err(TrainingError::EmptyData);
        }

        let normalizer = FeatureNormalizer::new();
        let mut x = Vec::with_capacity(rows.len());
        let mut y = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let features = normalizer
                .normalize(&row.profile)
                .map_err(|source| TrainingError::InvalidRow { index, source })?;
            x.push(features);
            y.push(row.regime);
        }

        for required in [Regime::New, Regime::Old] {
            if !y.contains(&required) {
                return Err(TrainingError::InsufficientData { missing: required });
            }
        }

        let indices: Vec<usize> = (0..rows.len()).collect();
        let root = build_node(&x, &y, &indices, 0, &self.config);
        Ok(FittedRegimeTree { root })
    }
}

/// One node of a fitted tree.
///
/// Samples with `feature <= threshold` go left; the rest go right.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    Leaf {
        regime: Regime,
        /// Fraction of training samples at this leaf carrying `regime`.
        confidence: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Serializable representation of a fitted tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegimeTreeParams {
    pub root: TreeNode,
}

/// Fitted regime classifier: decision boundaries only, no hyperparameters.
///
/// Immutable after fit; plain owned data, so it is `Send + Sync` and safe for
/// concurrent read-only prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedRegimeTree {
    root: TreeNode,
}

impl FittedRegimeTree {
    /// Predict the better regime for a normalized profile.
    ///
    /// Infallible: the [`FeatureVector`] type fixes the dimensionality, so
    /// every stored feature index resolves.
    pub fn predict(&self, features: &FeatureVector) -> Regime {
        self.predict_proba(features).0
    }

    /// Predict with the leaf's class fraction as a confidence in `[0, 1]`.
    pub fn predict_proba(&self, features: &FeatureVector) -> (Regime, f64) {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { regime, confidence } => return (*regime, *confidence),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Number of split levels below the root (0 for a lone leaf).
    pub fn depth(&self) -> usize {
        fn depth_of(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => 1 + depth_of(left).max(depth_of(right)),
            }
        }
        depth_of(&self.root)
    }

    /// Extract the decision boundaries for serialization.
    pub fn extract_params(&self) -> RegimeTreeParams {
        RegimeTreeParams {
            root: self.root.clone(),
        }
    }

    /// Reconstruct a fitted tree from persisted parameters.
    ///
    /// # Errors
    /// Returns [`TrainingError::InvalidModel`] if a stored feature index is
    /// out of range, a threshold is non-finite, or a leaf confidence falls
    /// outside `[0, 1]`.
    pub fn from_params(params: RegimeTreeParams) -> Result<Self, TrainingError> {
        validate_node(&params.root)?;
        Ok(Self { root: params.root })
    }

    /// Save the fitted tree to a file.
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), TrainingError> {
        let bytes = self.extract_params().to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a fitted tree from a file.
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, TrainingError> {
        let bytes = std::fs::read(path)?;
        let params = RegimeTreeParams::from_bytes(&bytes)?;
        Self::from_params(params)
    }
}

fn validate_node(node: &TreeNode) -> Result<(), TrainingError> {
    match node {
        TreeNode::Leaf { confidence, .. } => {
            if !(0.0..=1.0).contains(confidence) {
                return Err(TrainingError::InvalidModel(format!(
                    "leaf confidence {} outside [0, 1]",
                    confidence
                )));
            }
            Ok(())
        }
        TreeNode::Split {
            feature,
            threshold,
            left,
            right,
        } => {
            if *feature >= NUM_FEATURES {
                return Err(TrainingError::InvalidModel(format!(
                    "feature index {} out of range",
                    feature
                )));
            }
            if !threshold.is_finite() {
                return Err(TrainingError::InvalidModel(format!(
                    "non-finite threshold for feature {}",
                    feature
                )));
            }
            validate_node(left)?;
            validate_node(right)
        }
    }
}

fn class_counts(y: &[Regime], indices: &[usize]) -> [usize; 2] {
    let mut counts = [0usize; 2];
    for &i in indices {
        counts[y[i].class_index()] += 1;
    }
    counts
}

fn gini(counts: [usize; 2]) -> f64 {
    let total = (counts[0] + counts[1]) as f64;
    if total == 0.0 {
        return 0.0;
    }
    let p_new = counts[0] as f64 / total;
    let p_old = counts[1] as f64 / total;
    1.0 - p_new * p_new - p_old * p_old
}

fn majority_leaf(counts: [usize; 2]) -> TreeNode {
    // Ties resolve to New (class index 0).
    let (regime, winner) = if counts[1] > counts[0] {
        (Regime::Old, counts[1])
    } else {
        (Regime::New, counts[0])
    };
    let total = counts[0] + counts[1];
    TreeNode::Leaf {
        regime,
        confidence: winner as f64 / total as f64,
    }
}

struct Split {
    feature: usize,
    threshold: f64,
}

/// Best split over `indices`, or `None` if no split reduces impurity.
///
/// Tie-break: strict improvement only, with features scanned in vector order
/// and thresholds in ascending order.
fn best_split(x: &[FeatureVector], y: &[Regime], indices: &[usize]) -> Option<Split> {
    let parent_gini = gini(class_counts(y, indices));
    let n = indices.len() as f64;

    let mut best: Option<Split> = None;
    let mut best_gain = 0.0;

    for feature in 0..NUM_FEATURES {
        let mut values: Vec<f64> = indices.iter().map(|&i| x[i][feature]).collect();
        values.sort_by(f64::total_cmp);
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;

            let mut left = [0usize; 2];
            let mut right = [0usize; 2];
            for &i in indices {
                let side = if x[i][feature] <= threshold {
                    &mut left
                } else {
                    &mut right
                };
                side[y[i].class_index()] += 1;
            }

            let n_left = (left[0] + left[1]) as f64;
            let n_right = (right[0] + right[1]) as f64;
            let weighted = (n_left / n) * gini(left) + (n_right / n) * gini(right);
            let gain = parent_gini - weighted;

            if gain > best_gain {
                best_gain = gain;
                best = Some(Split { feature, threshold });
            }
        }
    }

    best
}

fn build_node(
    x: &[FeatureVector],
    y: &[Regime],
    indices: &[usize],
    depth: usize,
    config: &RegimeTreeConfig,
) -> TreeNode {
    let counts = class_counts(y, indices);

    let is_pure = counts[0] == 0 || counts[1] == 0;
    if is_pure || depth >= config.max_depth || indices.len() < config.min_samples_split {
        return majority_leaf(counts);
    }

    let Some(split) = best_split(x, y, indices) else {
        return majority_leaf(counts);
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| x[i][split.feature] <= split.threshold);

    let left = build_node(x, y, &left_idx, depth + 1, config);
    let right = build_node(x, y, &right_idx, depth + 1, config);

    TreeNode::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(left),
        right: Box::new(right),
    }
}
