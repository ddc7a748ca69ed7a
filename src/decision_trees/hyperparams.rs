use crate::{
    error::{Error, Result},
    Float, ParamGuard,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::DecisionTree;

/// How unknown attribute values are resolved while predicting
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictionMode {
    /// Uses the most common value of the majority class of the training examples that reached
    /// the node. Suitable for examples whose label is not known.
    Blind,
    /// Uses the most common value of the example's own class. This reads the true label of the
    /// example and is only meaningful for offline accuracy measurements on labeled data.
    Evaluation,
}

impl Default for PredictionMode {
    fn default() -> Self {
        PredictionMode::Blind
    }
}

/// The set of hyperparameters that can be specified for fitting a
/// [decision tree](struct.DecisionTree.html).
///
/// ### Example
///
/// ```rust
/// use id3_trees::prelude::*;
/// use id3_trees::{AttributeDomain, ClassLabel, DecisionTree, Example};
///
/// let domain = AttributeDomain::new().with_attribute("wind", vec!["weak", "strong"]);
/// let examples = vec![
///     Example::new(ClassLabel::Positive).with_value("wind", "weak"),
///     Example::new(ClassLabel::Negative).with_value("wind", "strong"),
/// ];
/// let mut dataset = Dataset::new(examples, domain);
///
/// // Initialize the default set of parameters and set them to the desired values
/// let params = DecisionTree::params().significance_level(Some(0.5));
///
/// let tree = params.fit(&mut dataset).unwrap();
/// assert_eq!(tree.num_leaves(), 2);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Id3ValidParams<F> {
    significance_level: Option<F>,
    prediction_mode: PredictionMode,
}

impl<F: Float> Id3ValidParams<F> {
    pub fn significance_level(&self) -> Option<F> {
        self.significance_level
    }

    pub fn prediction_mode(&self) -> PredictionMode {
        self.prediction_mode
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Id3Params<F>(Id3ValidParams<F>);

impl<F: Float> Id3Params<F> {
    pub fn new() -> Self {
        Self(Id3ValidParams {
            significance_level: None,
            prediction_mode: PredictionMode::Blind,
        })
    }

    /// Sets the significance level of the chi-square test a split has to pass
    ///
    /// With `None` every node is split until it is pure or runs out of attributes.
    pub fn significance_level(mut self, significance_level: Option<F>) -> Self {
        self.0.significance_level = significance_level;
        self
    }

    /// Sets how the fitted tree resolves unknown values when predicting
    pub fn prediction_mode(mut self, prediction_mode: PredictionMode) -> Self {
        self.0.prediction_mode = prediction_mode;
        self
    }
}

impl<F: Float> Default for Id3Params<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> DecisionTree<F> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `significance_level = None`
    /// * `prediction_mode = PredictionMode::Blind`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> Id3Params<F> {
        Id3Params::new()
    }
}

impl<F: Float> ParamGuard for Id3Params<F> {
    type Checked = Id3ValidParams<F>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        match self.0.significance_level {
            Some(level) if !(level > F::zero() && level < F::one()) => {
                Err(Error::Parameters(format!(
                    "Significance level should be in (0, 1), but was {}",
                    level
                )))
            }
            _ => Ok(&self.0),
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = DecisionTree::<f64>::params().check().unwrap();

        assert_eq!(params.significance_level(), None);
        assert_eq!(params.prediction_mode(), PredictionMode::Blind);
    }

    #[test]
    fn significance_level_in_unit_interval() {
        for level in &[0.01, 0.05, 0.5, 0.99] {
            let params = DecisionTree::<f64>::params()
                .significance_level(Some(*level))
                .check();
            assert!(params.is_ok());
        }
    }

    #[test]
    #[should_panic]
    /// Check that a significance level of zero panics
    fn panic_zero_significance_level() {
        DecisionTree::<f64>::params()
            .significance_level(Some(0.0))
            .check()
            .unwrap();
    }

    #[test]
    fn invalid_significance_levels() {
        for level in &[1.0, 1.5, -0.1, f64::NAN] {
            let params = DecisionTree::<f64>::params().significance_level(Some(*level));
            assert!(matches!(params.check_ref(), Err(Error::Parameters(_))));
        }
    }
}
