//! Common metrics for performance evaluation of a classifier
//!
//! Predictions are compared against the true labels in a binary confusion matrix, from which
//! accuracy, precision and recall are derived.
use std::fmt;

use ndarray::prelude::*;

use crate::dataset::{ClassLabel, Dataset, Example};
use crate::error::{Error, Result};

fn class_index(label: ClassLabel) -> usize {
    match label {
        ClassLabel::Positive => 0,
        ClassLabel::Negative => 1,
    }
}

/// Confusion matrix for binary classification
///
/// Rows correspond to the predicted class and columns to the true class, both in the order
/// positive, negative.
#[derive(Clone, PartialEq)]
pub struct ConfusionMatrix {
    matrix: Array2<usize>,
}

impl ConfusionMatrix {
    fn from_pairs<I: IntoIterator<Item = (ClassLabel, ClassLabel)>>(pairs: I) -> Self {
        let mut matrix = Array2::zeros((2, 2));
        for (predicted, truth) in pairs {
            matrix[(class_index(predicted), class_index(truth))] += 1;
        }

        ConfusionMatrix { matrix }
    }

    /// Number of examples predicted as `predicted` whose true class is `truth`
    pub fn count(&self, predicted: ClassLabel, truth: ClassLabel) -> usize {
        self.matrix[(class_index(predicted), class_index(truth))]
    }

    pub fn true_positives(&self) -> usize {
        self.count(ClassLabel::Positive, ClassLabel::Positive)
    }

    pub fn false_positives(&self) -> usize {
        self.count(ClassLabel::Positive, ClassLabel::Negative)
    }

    pub fn false_negatives(&self) -> usize {
        self.count(ClassLabel::Negative, ClassLabel::Positive)
    }

    pub fn true_negatives(&self) -> usize {
        self.count(ClassLabel::Negative, ClassLabel::Negative)
    }

    /// Number of compared examples
    pub fn total(&self) -> usize {
        self.matrix.sum()
    }

    /// Calculate precision for every class, positive first
    pub fn precision(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(1));

        Array1::from_iter(
            self.matrix
                .diag()
                .iter()
                .zip(sum.iter())
                .map(|(a, b)| *a as f32 / *b as f32),
        )
    }

    /// Calculate recall for every class, positive first
    pub fn recall(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(0));

        Array1::from_iter(
            self.matrix
                .diag()
                .iter()
                .zip(sum.iter())
                .map(|(a, b)| *a as f32 / *b as f32),
        )
    }

    /// Return the share of correctly classified examples
    pub fn accuracy(&self) -> f32 {
        self.matrix.diag().sum() as f32 / self.matrix.sum() as f32
    }

    /// Return the harmonic mean of precision and recall for every class
    pub fn f1_score(&self) -> Array1<f32> {
        let precision = self.precision();
        let recall = self.recall();

        Array::from_iter(
            precision
                .iter()
                .zip(recall.iter())
                .map(|(p, r)| 2.0 * (p * r) / (p + r)),
        )
    }
}

/// Print a confusion matrix
impl fmt::Debug for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:>10} | {:>8} | {:>8}", "", "positive", "negative")?;
        for label in &ClassLabel::ALL {
            write!(f, "{:>10} |", label.to_string())?;
            for truth in &ClassLabel::ALL {
                write!(f, " {:>8} |", self.count(*label, *truth))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Compare predictions against the true labels
pub trait ToConfusionMatrix<T> {
    fn confusion_matrix(&self, ground_truth: T) -> Result<ConfusionMatrix>;
}

impl ToConfusionMatrix<&[ClassLabel]> for [ClassLabel] {
    fn confusion_matrix(&self, ground_truth: &[ClassLabel]) -> Result<ConfusionMatrix> {
        if self.len() != ground_truth.len() {
            return Err(Error::MismatchedShapes(self.len(), ground_truth.len()));
        }

        Ok(ConfusionMatrix::from_pairs(
            self.iter().copied().zip(ground_truth.iter().copied()),
        ))
    }
}

impl ToConfusionMatrix<&[Example]> for [ClassLabel] {
    fn confusion_matrix(&self, ground_truth: &[Example]) -> Result<ConfusionMatrix> {
        if self.len() != ground_truth.len() {
            return Err(Error::MismatchedShapes(self.len(), ground_truth.len()));
        }

        Ok(ConfusionMatrix::from_pairs(
            self.iter()
                .copied()
                .zip(ground_truth.iter().map(Example::label)),
        ))
    }
}

impl ToConfusionMatrix<&Dataset> for [ClassLabel] {
    fn confusion_matrix(&self, ground_truth: &Dataset) -> Result<ConfusionMatrix> {
        self.confusion_matrix(ground_truth.examples())
    }
}
