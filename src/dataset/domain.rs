#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::Example;
use crate::error::{Error, Result};

/// A discrete attribute and its ordered set of legal values
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    values: Vec<String>,
}

impl Attribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Legal values of every attribute, in declaration order
///
/// Declaration order decides ties between equally scored attributes and the order of the
/// children of a split. Removing an attribute with [`without`](AttributeDomain::without) returns a
/// new domain, so a domain handed to one subtree is never changed by another.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeDomain {
    attributes: Vec<Attribute>,
}

impl AttributeDomain {
    pub fn new() -> Self {
        AttributeDomain::default()
    }

    /// Declares an attribute, replacing the values of an earlier declaration with the same name
    pub fn with_attribute<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        let values = values.into_iter().map(Into::into).collect();

        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attribute) => attribute.values = values,
            None => self.attributes.push(Attribute { name, values }),
        }
        self
    }

    /// Legal values of `name`
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.values.as_slice())
    }

    /// Like [`values`](AttributeDomain::values) but fails for undeclared attributes
    pub fn try_values(&self, name: &str) -> Result<&[String]> {
        self.values(name)
            .ok_or_else(|| Error::UnknownAttribute(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns a copy of this domain without `name`
    pub fn without(&self, name: &str) -> Self {
        AttributeDomain {
            attributes: self
                .attributes
                .iter()
                .filter(|a| a.name != name)
                .cloned()
                .collect(),
        }
    }

    /// Checks that every attribute has legal values and that every example only uses them
    pub fn validate(&self, examples: &[Example]) -> Result<()> {
        for attribute in &self.attributes {
            if attribute.values.is_empty() {
                return Err(Error::EmptyDomain(attribute.name.clone()));
            }
        }

        for example in examples {
            for attribute in &self.attributes {
                if !example.contains(&attribute.name) {
                    return Err(Error::MissingAttribute(attribute.name.clone()));
                }
                if let Some(value) = example.value(&attribute.name) {
                    if !attribute.values.iter().any(|v| v == value) {
                        return Err(Error::InvalidValue {
                            attribute: attribute.name.clone(),
                            value: value.to_owned(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClassLabel;

    fn weather() -> AttributeDomain {
        AttributeDomain::new()
            .with_attribute("outlook", vec!["sunny", "overcast", "rain"])
            .with_attribute("wind", vec!["weak", "strong"])
    }

    #[test]
    fn without_leaves_the_original_untouched() {
        let domain = weather();
        let reduced = domain.without("outlook");

        assert_eq!(domain.len(), 2);
        assert_eq!(reduced.names().collect::<Vec<_>>(), vec!["wind"]);
        assert!(domain.contains("outlook"));
    }

    #[test]
    fn declaration_order_is_kept() {
        let domain = weather().with_attribute("outlook", vec!["sunny", "rain"]);

        assert_eq!(domain.names().collect::<Vec<_>>(), vec!["outlook", "wind"]);
        assert_eq!(domain.values("outlook").unwrap(), &["sunny", "rain"]);
    }

    #[test]
    fn validate_rejects_values_outside_the_domain() {
        let domain = weather();
        let good = Example::new(ClassLabel::Positive)
            .with_value("outlook", "rain")
            .with_unknown("wind");
        let bad = Example::new(ClassLabel::Positive)
            .with_value("outlook", "foggy")
            .with_value("wind", "weak");
        let missing = Example::new(ClassLabel::Negative).with_value("outlook", "rain");

        assert!(domain.validate(&[good.clone()]).is_ok());
        assert_eq!(
            domain.validate(&[good.clone(), bad]),
            Err(Error::InvalidValue {
                attribute: "outlook".into(),
                value: "foggy".into()
            })
        );
        assert_eq!(
            domain.validate(&[missing]),
            Err(Error::MissingAttribute("wind".into()))
        );
    }

    #[test]
    fn validate_rejects_empty_value_sets() {
        let domain = weather().with_attribute("humidity", Vec::<String>::new());

        assert_eq!(
            domain.validate(&[]),
            Err(Error::EmptyDomain("humidity".into()))
        );
    }
}
