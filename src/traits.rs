//! Provide traits for different classes of algorithms
//!

use std::error::Error;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. The dataset
/// is taken mutably because fitting may resolve missing values in place before it consumes them.
pub trait Fit<R, E: Error> {
    type Object;

    fn fit(&self, dataset: &mut R) -> Result<Self::Object, E>;
}

/// Predict with model
///
/// This trait assumes the `PredictInplace` implementation and provides additional input/output
/// combinations.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}

/// Predict with model into a mutable reference of targets
pub trait PredictInplace<R, T> {
    /// Predict something in place
    fn predict_inplace(&self, x: R, y: &mut T);

    /// Create targets that `predict_inplace` works with.
    fn default_target(&self, x: R) -> T;
}
