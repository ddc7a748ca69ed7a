use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::ClassLabel;

/// A labeled observation
///
/// Maps attribute names to their values. A value of `None` marks an unknown value, which is
/// resolved by class-conditioned imputation when a tree splits on that attribute.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    values: BTreeMap<String, Option<String>>,
    label: ClassLabel,
}

impl Example {
    /// Creates an example without attribute values
    pub fn new(label: ClassLabel) -> Self {
        Example {
            values: BTreeMap::new(),
            label,
        }
    }

    /// Creates an example from `(attribute, value)` pairs, `None` values are unknown
    pub fn from_pairs<I, K, V>(pairs: I, label: ClassLabel) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(attribute, value)| (attribute.into(), value.map(Into::into)))
            .collect();

        Example { values, label }
    }

    /// Sets a known value
    pub fn with_value(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(attribute.into(), Some(value.into()));
        self
    }

    /// Marks the value of `attribute` as unknown
    pub fn with_unknown(mut self, attribute: impl Into<String>) -> Self {
        self.values.insert(attribute.into(), None);
        self
    }

    pub fn label(&self) -> ClassLabel {
        self.label
    }

    /// Returns the known value of `attribute`, `None` if it is unknown or absent
    pub fn value(&self, attribute: &str) -> Option<&str> {
        self.values
            .get(attribute)
            .and_then(|value| value.as_deref())
    }

    /// Returns true if the example declares `attribute` but its value is unknown
    pub fn is_unknown(&self, attribute: &str) -> bool {
        matches!(self.values.get(attribute), Some(None))
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.values.contains_key(attribute)
    }

    /// Overwrites the value of `attribute`
    pub fn set_value(&mut self, attribute: &str, value: impl Into<String>) {
        match self.values.get_mut(attribute) {
            Some(slot) => *slot = Some(value.into()),
            None => {
                self.values.insert(attribute.to_owned(), Some(value.into()));
            }
        }
    }

    /// Iterates over `(attribute, value)` in attribute name order
    pub fn values(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(attribute, value)| (attribute.as_str(), value.as_deref()))
    }
}
