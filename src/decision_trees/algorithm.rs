//! Decision trees over discrete attributes
//!
use log::debug;

use super::impute::{impute_missing, ClassModes};
use super::scorer::{choose_best_attribute, split_by_attribute, AttributeSelection};
use super::NodeIter;
use super::Tikz;
use super::{Id3ValidParams, PredictionMode};
use crate::{
    dataset::{AttributeDomain, ClassCounts, ClassLabel, Dataset, Example, Float},
    error::{Error, Result},
    traits::*,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// RowMask tracks examples
///
/// Every node of the tree only sees the examples which took its path from the root. In order to
/// track that, the examples are masked with a boolean vector, hiding all examples which are not
/// applicable in a lower tree.
struct RowMask {
    mask: Vec<bool>,
    nsamples: usize,
}

impl RowMask {
    /// Generates a RowMask without hidden examples
    ///
    /// ### Parameters
    ///
    /// * `nsamples`: the total number of examples
    ///
    fn all(nsamples: usize) -> Self {
        RowMask {
            mask: vec![true; nsamples],
            nsamples,
        }
    }

    /// Generates a RowMask where all examples are hidden
    ///
    /// ### Parameters
    ///
    /// * `nsamples`: the total number of examples
    fn none(nsamples: usize) -> Self {
        RowMask {
            mask: vec![false; nsamples],
            nsamples: 0,
        }
    }

    /// Sets the example at the specified index as visible
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    ///
    fn mark(&mut self, idx: usize) {
        if !self.mask[idx] {
            self.mask[idx] = true;
            self.nsamples += 1;
        }
    }

    /// Indices of the visible examples
    fn indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(idx, &visible)| if visible { Some(idx) } else { None })
            .collect()
    }

    fn select<'a>(&self, examples: &'a [Example]) -> Vec<&'a Example> {
        examples
            .iter()
            .zip(&self.mask)
            .filter_map(|(example, &visible)| if visible { Some(example) } else { None })
            .collect()
    }

    fn select_mut<'a>(&self, examples: &'a mut [Example]) -> Vec<&'a mut Example> {
        examples
            .iter_mut()
            .zip(&self.mask)
            .filter_map(|(example, &visible)| if visible { Some(example) } else { None })
            .collect()
    }
}

/// Why a node became a leaf
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafReason {
    /// All examples share one class
    Pure,
    /// No attribute is left on the path from the root
    AttributesExhausted,
    /// No attribute passed the significance test
    NotSignificant,
    /// No training example took this branch, the parent's majority class is used
    EmptyPartition,
}

/// Split of an internal node
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Split<F> {
    attribute: String,
    gain_ratio: F,
    majority: ClassLabel,
    modes: ClassModes,
    children: Vec<TreeNode<F>>,
}

impl<F: Float> Split<F> {
    /// The attribute tested by this node
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Gain ratio of the split attribute at the time it was chosen
    pub fn gain_ratio(&self) -> F {
        self.gain_ratio
    }

    /// Majority class of the training examples which reached the node
    pub fn majority(&self) -> ClassLabel {
        self.majority
    }

    /// Most common value of the split attribute for each class
    pub fn modes(&self) -> &ClassModes {
        &self.modes
    }

    /// Children in the domain order of the split attribute
    pub fn children(&self) -> &[TreeNode<F>] {
        &self.children
    }

    /// Child reached by `value`, or the first child if no branch carries `value`
    fn child_for(&self, value: &str) -> Option<&TreeNode<F>> {
        self.children
            .iter()
            .find(|child| child.branch_value() == Some(value))
            .or_else(|| self.children.first())
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind<F> {
    Leaf { label: ClassLabel, reason: LeafReason },
    Internal(Split<F>),
}

/// A node in the decision tree
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<F> {
    branch_value: Option<String>,
    depth: usize,
    kind: NodeKind<F>,
}

impl<F: Float> TreeNode<F> {
    fn leaf(
        branch_value: Option<String>,
        depth: usize,
        label: ClassLabel,
        reason: LeafReason,
    ) -> Self {
        TreeNode {
            branch_value,
            depth,
            kind: NodeKind::Leaf { label, reason },
        }
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Returns the depth of the node in the decision tree
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Value of the parent's split attribute which leads to this node, `None` for the root
    pub fn branch_value(&self) -> Option<&str> {
        self.branch_value.as_deref()
    }

    pub fn kind(&self) -> &NodeKind<F> {
        &self.kind
    }

    /// Returns `Some(prediction)` for leaf nodes and `None` for internal nodes.
    pub fn prediction(&self) -> Option<ClassLabel> {
        match self.kind {
            NodeKind::Leaf { label, .. } => Some(label),
            NodeKind::Internal(_) => None,
        }
    }

    /// Returns `Some(reason)` for leaf nodes and `None` for internal nodes.
    pub fn leaf_reason(&self) -> Option<LeafReason> {
        match self.kind {
            NodeKind::Leaf { reason, .. } => Some(reason),
            NodeKind::Internal(_) => None,
        }
    }

    /// Returns the split if the node is internal, `None` otherwise
    pub fn split(&self) -> Option<&Split<F>> {
        match &self.kind {
            NodeKind::Internal(split) => Some(split),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Returns the name of the attribute used in the split if the node is internal,
    /// `None` otherwise
    pub fn attribute(&self) -> Option<&str> {
        self.split().map(Split::attribute)
    }

    /// Returns the children in domain order, empty for leaves
    pub fn children(&self) -> &[TreeNode<F>] {
        match &self.kind {
            NodeKind::Internal(split) => split.children(),
            NodeKind::Leaf { .. } => &[],
        }
    }

    /// Recursively fits the node
    fn fit(
        examples: &mut [Example],
        mask: &RowMask,
        domain: &AttributeDomain,
        hyperparameters: &Id3ValidParams<F>,
        branch_value: Option<String>,
        depth: usize,
    ) -> Result<Self> {
        if mask.nsamples == 0 {
            return Err(Error::MissingInput("no examples reached the node".into()));
        }

        // compute class frequencies of the visible examples
        let counts = ClassCounts::of(&mask.select(examples));
        let majority = counts.majority();

        if let Some(label) = counts.pure_label() {
            return Ok(Self::leaf(branch_value, depth, label, LeafReason::Pure));
        }

        if domain.is_empty() {
            return Ok(Self::leaf(
                branch_value,
                depth,
                majority,
                LeafReason::AttributesExhausted,
            ));
        }

        let selection = choose_best_attribute(
            &mask.select(examples),
            domain,
            hyperparameters.significance_level(),
        )?;

        let (attribute, gain_ratio) = match selection {
            AttributeSelection::Split {
                attribute,
                gain_ratio,
            } => (attribute, gain_ratio),
            AttributeSelection::NotSignificant => {
                debug!(
                    "no significant split for {} examples at depth {}, predicting {}",
                    mask.nsamples, depth, majority
                );
                return Ok(Self::leaf(
                    branch_value,
                    depth,
                    majority,
                    LeafReason::NotSignificant,
                ));
            }
        };

        debug!(
            "splitting {} examples on `{}` at depth {} (gain ratio {})",
            mask.nsamples, attribute, depth, gain_ratio
        );

        // unknown values are resolved before the examples are partitioned
        let modes = impute_missing(
            &mut mask.select_mut(examples),
            &attribute,
            domain.try_values(&attribute)?,
        )?;
        let child_domain = domain.without(&attribute);

        // determine new masks for every value of the split attribute
        let child_masks = {
            let rows = mask.indices();
            let visible = mask.select(examples);
            split_by_attribute(&visible, domain, &attribute)?
                .into_iter()
                .map(|partition| {
                    let mut child_mask = RowMask::none(examples.len());
                    for pos in partition.members {
                        child_mask.mark(rows[pos]);
                    }
                    (partition.value, child_mask)
                })
                .collect::<Vec<_>>()
        };

        let mut children = Vec::with_capacity(child_masks.len());
        for (value, child_mask) in child_masks {
            let child = if child_mask.nsamples == 0 {
                Self::leaf(Some(value), depth + 1, majority, LeafReason::EmptyPartition)
            } else {
                Self::fit(
                    examples,
                    &child_mask,
                    &child_domain,
                    hyperparameters,
                    Some(value),
                    depth + 1,
                )?
            };
            children.push(child);
        }

        Ok(TreeNode {
            branch_value,
            depth,
            kind: NodeKind::Internal(Split {
                attribute,
                gain_ratio,
                majority,
                modes,
                children,
            }),
        })
    }
}

/// Builds a decision tree from `examples` whose attributes are described by `domain`
///
/// Unknown values of an attribute are resolved in place right before the first node splits on
/// it, see [`impute_missing`]. Fails with [`Error::MissingInput`] for an
/// empty example set and with a validation error if an example does not fit `domain`.
pub fn build<F: Float>(
    examples: &mut [Example],
    domain: &AttributeDomain,
    hyperparameters: &Id3ValidParams<F>,
) -> Result<TreeNode<F>> {
    if examples.is_empty() {
        return Err(Error::MissingInput("the example set is empty".into()));
    }
    domain.validate(examples)?;

    let all = RowMask::all(examples.len());
    TreeNode::fit(examples, &all, domain, hyperparameters, None, 0)
}

/// Classifies `example` by walking from `node` down to a leaf
///
/// An unknown value of a split attribute is replaced with the mode stored at the node, chosen by
/// `mode`. A value no branch carries follows the first branch.
pub fn predict<F: Float>(node: &TreeNode<F>, example: &Example, mode: PredictionMode) -> ClassLabel {
    let mut node = node;
    loop {
        let split = match &node.kind {
            NodeKind::Leaf { label, .. } => return *label,
            NodeKind::Internal(split) => split,
        };

        let value = match example.value(&split.attribute) {
            Some(value) => value,
            None => {
                let class = match mode {
                    PredictionMode::Blind => split.majority,
                    PredictionMode::Evaluation => example.label(),
                };
                split.modes.get(class)
            }
        };

        node = match split.child_for(value) {
            Some(child) => child,
            None => return split.majority,
        };
    }
}

/// A fitted decision tree model for binary classification over discrete attributes.
///
/// ### Structure
/// Every internal node tests one attribute and has one child per legal value of that attribute,
/// in the order the values were declared. An attribute is tested at most once on a path from the
/// root. Leaves carry the predicted class label.
///
/// ### Algorithm
///
/// Starting with a single root node, the tree is grown recursively by applying the following
/// rules to every node considered:
///
/// * If all examples share a class, the node becomes a leaf predicting that class;
/// * If no attribute is left, the node becomes a leaf predicting the majority class;
/// * Otherwise attributes with an above average information gain are ranked by gain ratio and
///   the best one is chosen. If a significance level is set, the chosen attribute must also pass
///   a chi-square independence test, if none does the node becomes a leaf;
/// * Unknown values of the chosen attribute are replaced with the most common value of their
///   class and one child is grown per value. Values without examples become leaves predicting
///   the majority class of the node.
///
/// ### Example
///
/// ```rust
/// use id3_trees::prelude::*;
/// use id3_trees::{AttributeDomain, ClassLabel, DecisionTree, Example};
///
/// let domain = AttributeDomain::new()
///     .with_attribute("outlook", vec!["sunny", "overcast", "rain"])
///     .with_attribute("wind", vec!["weak", "strong"]);
/// let examples = vec![
///     Example::new(ClassLabel::Negative).with_value("outlook", "sunny").with_value("wind", "weak"),
///     Example::new(ClassLabel::Positive).with_value("outlook", "overcast").with_value("wind", "weak"),
///     Example::new(ClassLabel::Positive).with_value("outlook", "rain").with_value("wind", "weak"),
///     Example::new(ClassLabel::Negative).with_value("outlook", "rain").with_value("wind", "strong"),
/// ];
/// let mut dataset = Dataset::new(examples, domain);
///
/// let tree = DecisionTree::<f64>::params().fit(&mut dataset).unwrap();
/// let predictions = tree.predict(&dataset);
///
/// assert_eq!(predictions, vec![
///     ClassLabel::Negative,
///     ClassLabel::Positive,
///     ClassLabel::Positive,
///     ClassLabel::Negative,
/// ]);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree<F> {
    root_node: TreeNode<F>,
    prediction_mode: PredictionMode,
}

impl<'a, F: Float> Predict<&'a Example, ClassLabel> for DecisionTree<F> {
    /// Classify a single example
    fn predict(&self, example: &'a Example) -> ClassLabel {
        predict(&self.root_node, example, self.prediction_mode)
    }
}

impl<'a, F: Float> PredictInplace<&'a [Example], Vec<ClassLabel>> for DecisionTree<F> {
    /// Make predictions for each example of `x`.
    fn predict_inplace(&self, x: &'a [Example], y: &mut Vec<ClassLabel>) {
        assert_eq!(
            x.len(),
            y.len(),
            "The number of examples must match the number of output targets."
        );

        for (example, target) in x.iter().zip(y.iter_mut()) {
            *target = predict(&self.root_node, example, self.prediction_mode);
        }
    }

    fn default_target(&self, x: &'a [Example]) -> Vec<ClassLabel> {
        vec![ClassLabel::Positive; x.len()]
    }
}

impl<'a, F: Float> Predict<&'a [Example], Vec<ClassLabel>> for DecisionTree<F> {
    fn predict(&self, x: &'a [Example]) -> Vec<ClassLabel> {
        let mut y = self.default_target(x);
        self.predict_inplace(x, &mut y);
        y
    }
}

impl<'a, F: Float> Predict<&'a Dataset, Vec<ClassLabel>> for DecisionTree<F> {
    fn predict(&self, dataset: &'a Dataset) -> Vec<ClassLabel> {
        self.predict(dataset.examples())
    }
}

impl<F: Float> Fit<Dataset, Error> for Id3ValidParams<F> {
    type Object = DecisionTree<F>;

    /// Fit a decision tree with these hyperparameters on the dataset. Unknown values of the
    /// examples are resolved in place.
    fn fit(&self, dataset: &mut Dataset) -> Result<Self::Object> {
        let root_node = build(&mut dataset.examples, &dataset.domain, self)?;

        Ok(DecisionTree {
            root_node,
            prediction_mode: self.prediction_mode(),
        })
    }
}

impl<F: Float> DecisionTree<F> {
    /// Wraps a tree built with [`build`]
    pub fn from_root(root_node: TreeNode<F>, prediction_mode: PredictionMode) -> Self {
        DecisionTree {
            root_node,
            prediction_mode,
        }
    }

    /// Classify `example`, resolving unknown values according to `mode`
    pub fn predict_with_mode(&self, example: &Example, mode: PredictionMode) -> ClassLabel {
        predict(&self.root_node, example, mode)
    }

    pub fn prediction_mode(&self) -> PredictionMode {
        self.prediction_mode
    }

    /// Create a node iterator in level-order (BFT)
    pub fn iter_nodes(&self) -> NodeIter<'_, F> {
        NodeIter::new(&self.root_node)
    }

    /// Return the attributes tested by this tree, in level-order of their first use
    pub fn features(&self) -> Vec<&str> {
        let mut attributes: Vec<&str> = Vec::new();

        for attribute in self.iter_nodes().filter_map(TreeNode::attribute) {
            if !attributes.contains(&attribute) {
                attributes.push(attribute);
            }
        }

        attributes
    }

    /// Return root node of the tree
    pub fn root_node(&self) -> &TreeNode<F> {
        &self.root_node
    }

    /// Return max depth of the tree
    pub fn max_depth(&self) -> usize {
        self.iter_nodes()
            .fold(0, |max, node| usize::max(max, node.depth))
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|node| node.is_leaf()).count()
    }

    /// Generates a [`Tikz`](struct.Tikz.html) structure to print the
    /// fitted tree in Tex using tikz and forest, with the following default parameters:
    ///
    /// * `legend=false`
    /// * `complete=true`
    ///
    pub fn export_to_tikz(&self) -> Tikz<'_, F> {
        Tikz::new(self)
    }
}
