//! Class-conditioned resolution of unknown attribute values
//!
use std::borrow::BorrowMut;

use log::trace;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::{ClassLabel, Example};
use crate::error::{Error, Result};

/// Most common value of an attribute for each class
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassModes {
    pub positive: String,
    pub negative: String,
}

impl ClassModes {
    pub fn get(&self, label: ClassLabel) -> &str {
        match label {
            ClassLabel::Positive => &self.positive,
            ClassLabel::Negative => &self.negative,
        }
    }
}

/// Replaces every unknown value of `attribute` with the most common value of the example's class
///
/// The mode of a class is the legal value in `values` seen most often among the known values of
/// that class. Ties, and classes without any known value, are decided by the count over both
/// classes and then by the order of `values`. When no example knows the attribute at all the
/// first legal value is used.
///
/// The examples are changed in place. Returns the modes that were used.
pub fn impute_missing<E: BorrowMut<Example>>(
    examples: &mut [E],
    attribute: &str,
    values: &[String],
) -> Result<ClassModes> {
    if values.is_empty() {
        return Err(Error::EmptyDomain(attribute.to_owned()));
    }

    // counts[i] holds the (positive, negative) occurrences of values[i]
    let mut counts = vec![(0usize, 0usize); values.len()];
    for example in examples.iter() {
        let example = example.borrow();
        let idx = example
            .value(attribute)
            .and_then(|value| values.iter().position(|v| v == value));
        if let Some(idx) = idx {
            match example.label() {
                ClassLabel::Positive => counts[idx].0 += 1,
                ClassLabel::Negative => counts[idx].1 += 1,
            }
        }
    }

    let mode = |class_count: fn(&(usize, usize)) -> usize| {
        let mut best = 0;
        for idx in 1..values.len() {
            let key = (class_count(&counts[idx]), counts[idx].0 + counts[idx].1);
            let best_key = (class_count(&counts[best]), counts[best].0 + counts[best].1);
            if key > best_key {
                best = idx;
            }
        }
        values[best].clone()
    };
    let modes = ClassModes {
        positive: mode(|c| c.0),
        negative: mode(|c| c.1),
    };

    let mut resolved = 0;
    for example in examples.iter_mut() {
        let example = example.borrow_mut();
        if example.is_unknown(attribute) {
            let value = modes.get(example.label()).to_owned();
            example.set_value(attribute, value);
            resolved += 1;
        }
    }

    if resolved > 0 {
        trace!(
            "resolved {} unknown values of `{}` (positive: {}, negative: {})",
            resolved,
            attribute,
            modes.positive,
            modes.negative
        );
    }

    Ok(modes)
}
