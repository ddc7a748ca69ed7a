//! Datasets
//!
//! This module implements the example set, the attribute domain and the dataset struct which
//! bundles both. Examples carry discrete attribute values and a binary class label.
use num_traits::{FromPrimitive, NumCast};

use std::borrow::Borrow;
use std::fmt;
use std::iter::Sum;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod domain;
mod example;
mod impl_dataset;

pub use domain::{Attribute, AttributeDomain};
pub use example::Example;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. Scores, probabilities and the
/// significance level are expressed in this type.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Sum
    + approx::AbsDiffEq
    + 'static
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Binary class label
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassLabel {
    Positive,
    Negative,
}

impl ClassLabel {
    /// Both labels, positive first
    pub const ALL: [ClassLabel; 2] = [ClassLabel::Positive, ClassLabel::Negative];
}

impl From<bool> for ClassLabel {
    fn from(positive: bool) -> Self {
        if positive {
            ClassLabel::Positive
        } else {
            ClassLabel::Negative
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassLabel::Positive => write!(f, "positive"),
            ClassLabel::Negative => write!(f, "negative"),
        }
    }
}

/// Number of positive and negative examples in a set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub positive: usize,
    pub negative: usize,
}

impl ClassCounts {
    pub fn new(positive: usize, negative: usize) -> Self {
        ClassCounts { positive, negative }
    }

    /// Counts the class labels of a set of examples
    pub fn of<E: Borrow<Example>>(examples: &[E]) -> Self {
        examples
            .iter()
            .fold(ClassCounts::default(), |mut counts, example| {
                counts.add(example.borrow().label());
                counts
            })
    }

    pub fn add(&mut self, label: ClassLabel) {
        match label {
            ClassLabel::Positive => self.positive += 1,
            ClassLabel::Negative => self.negative += 1,
        }
    }

    pub fn get(&self, label: ClassLabel) -> usize {
        match label {
            ClassLabel::Positive => self.positive,
            ClassLabel::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// The more frequent label, ties go to `Positive`
    pub fn majority(&self) -> ClassLabel {
        ClassLabel::from(self.positive >= self.negative)
    }

    /// Returns the label shared by all counted examples, if any
    pub fn pure_label(&self) -> Option<ClassLabel> {
        match (self.positive, self.negative) {
            (p, 0) if p > 0 => Some(ClassLabel::Positive),
            (0, n) if n > 0 => Some(ClassLabel::Negative),
            _ => None,
        }
    }
}

/// A set of examples together with the domain of their attributes
///
/// The examples are owned by the dataset and are resolved in place when a tree is fitted on it.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub examples: Vec<Example>,
    pub domain: AttributeDomain,
}
