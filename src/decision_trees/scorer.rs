//! Attribute scoring and selection
//!
//! Attributes are scored by their information gain, filtered by the average gain and ranked by
//! gain ratio. An optional chi-square test rejects splits whose association with the class could
//! plausibly be due to chance.
//!
//! Scores only use the examples whose value of the scored attribute is known. The gain computed
//! on them is scaled by their share of all examples, so an attribute which is mostly unknown
//! cannot outscore one which is known everywhere.
use std::borrow::Borrow;
use std::cmp::Ordering;

use log::trace;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::statistics::{chi_square_critical_value, chi_square_statistic, counts_entropy};
use crate::dataset::{AttributeDomain, ClassCounts, Example, Float};
use crate::error::{Error, Result};

/// The examples of a split which share one value of the split attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Value of the split attribute
    pub value: String,
    /// Positions of the members in the partitioned slice, in ascending order
    pub members: Vec<usize>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Class counts of the members, `examples` has to be the partitioned slice
    pub fn class_counts<E: Borrow<Example>>(&self, examples: &[E]) -> ClassCounts {
        self.members
            .iter()
            .fold(ClassCounts::default(), |mut counts, &pos| {
                counts.add(examples[pos].borrow().label());
                counts
            })
    }
}

/// Outcome of the attribute selection at a node
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeSelection<F> {
    /// Split on `attribute`
    Split { attribute: String, gain_ratio: F },
    /// No ranked attribute passed the significance test, the node should become a leaf
    NotSignificant,
}

/// Partitions `examples` by the value of `attribute`
///
/// Returns one partition per legal value, in domain order, including empty partitions. Every
/// example with a known value is a member of exactly one partition, examples with an unknown
/// value are left out. Once the unknown values are resolved the partitions cover all examples.
pub fn split_by_attribute<E: Borrow<Example>>(
    examples: &[E],
    domain: &AttributeDomain,
    attribute: &str,
) -> Result<Vec<Partition>> {
    let mut partitions = domain
        .try_values(attribute)?
        .iter()
        .map(|value| Partition {
            value: value.clone(),
            members: Vec::new(),
        })
        .collect::<Vec<_>>();

    for (pos, example) in examples.iter().enumerate() {
        if let Some(value) = example.borrow().value(attribute) {
            if let Some(partition) = partitions.iter_mut().find(|p| p.value == value) {
                partition.members.push(pos);
            }
        }
    }

    Ok(partitions)
}

/// Entropy of `examples` minus the weighted entropy of its partitions on `attribute`
///
/// With unknown values of `attribute` both entropies are taken over the examples with a known
/// value and the difference is scaled by the fraction of them.
pub fn information_gain<F: Float, E: Borrow<Example>>(
    examples: &[E],
    domain: &AttributeDomain,
    attribute: &str,
) -> Result<F> {
    let partitions = split_by_attribute(examples, domain, attribute)?;
    gain_of_partitions(examples, &partitions)
}

/// Entropy of the partition sizes of `attribute`
///
/// Returns `None` when all examples with a known value fall into a single partition, or when no
/// example knows `attribute`. The gain ratio of such an attribute is undefined.
pub fn split_information<F: Float, E: Borrow<Example>>(
    examples: &[E],
    domain: &AttributeDomain,
    attribute: &str,
) -> Result<Option<F>> {
    let partitions = split_by_attribute(examples, domain, attribute)?;
    split_information_of_partitions(examples.len(), &partitions)
}

/// Information gain divided by split information, `None` if the latter is undefined
pub fn gain_ratio<F: Float, E: Borrow<Example>>(
    examples: &[E],
    domain: &AttributeDomain,
    attribute: &str,
) -> Result<Option<F>> {
    let partitions = split_by_attribute(examples, domain, attribute)?;
    let gain: F = gain_of_partitions(examples, &partitions)?;

    Ok(split_information_of_partitions(examples.len(), &partitions)?.map(|split| gain / split))
}

fn gain_of_partitions<F: Float, E: Borrow<Example>>(
    examples: &[E],
    partitions: &[Partition],
) -> Result<F> {
    if examples.is_empty() {
        return Err(Error::EmptyInput);
    }

    let known = known_counts(examples, partitions);
    if known.is_empty() {
        return Ok(F::zero());
    }

    let total = F::cast(known.total());
    let parent: F = counts_entropy(&known)?;

    let mut remainder = F::zero();
    for partition in partitions.iter().filter(|p| !p.is_empty()) {
        let weight = F::cast(partition.len()) / total;
        remainder = remainder + weight * counts_entropy(&partition.class_counts(examples))?;
    }

    Ok(total / F::cast(examples.len()) * (parent - remainder))
}

fn split_information_of_partitions<F: Float>(
    nsamples: usize,
    partitions: &[Partition],
) -> Result<Option<F>> {
    if nsamples == 0 {
        return Err(Error::EmptyInput);
    }

    let known = partitions.iter().map(Partition::len).sum::<usize>();
    if known == 0 {
        return Ok(None);
    }

    let total = F::cast(known);
    let sum = partitions
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| F::cast(p.len()) / total)
        .fold(F::zero(), |acc, ratio| acc + ratio * ratio.log2());

    if sum == F::zero() {
        Ok(None)
    } else {
        Ok(Some(-sum))
    }
}

/// Class counts of the examples with a known value
fn known_counts<E: Borrow<Example>>(examples: &[E], partitions: &[Partition]) -> ClassCounts {
    partitions
        .iter()
        .fold(ClassCounts::default(), |mut counts, partition| {
            let partition = partition.class_counts(examples);
            counts.positive += partition.positive;
            counts.negative += partition.negative;
            counts
        })
}

/// Lowest gain which passes the average gain filter
///
/// Rounding in the average must not reject attributes of equal gain, the tolerance scales with
/// the gains and the number of summed terms.
fn gain_threshold<F: Float>(average_gain: F, nattributes: usize) -> F {
    average_gain - F::epsilon() * average_gain.abs() * F::cast(nattributes)
}

/// An attribute which survived the average gain filter
struct Candidate<'a, F> {
    attribute: &'a str,
    gain_ratio: F,
    partitions: Vec<Partition>,
}

/// Chooses the attribute to split `examples` on
///
/// 1. computes the information gain of every attribute of `domain`
/// 2. discards attributes with a gain below the average gain
/// 3. computes the gain ratio of the remaining attributes, skipping those with undefined split
///    information
/// 4. ranks them by gain ratio, ties go to the attribute declared first
/// 5. without a `significance_level` the best ranked attribute is chosen, otherwise the first
///    one whose chi-square statistic exceeds the critical value at that level, with the number
///    of non-empty partitions minus one degrees of freedom. If none does,
///    [`AttributeSelection::NotSignificant`] is returned.
///
/// Fails with [`Error::AllAttributesRejected`] if no attribute has a defined gain ratio.
pub fn choose_best_attribute<F: Float, E: Borrow<Example>>(
    examples: &[E],
    domain: &AttributeDomain,
    significance_level: Option<F>,
) -> Result<AttributeSelection<F>> {
    if domain.is_empty() {
        return Err(Error::MissingInput(
            "no candidate attributes to choose from".into(),
        ));
    }

    let mut scored = Vec::with_capacity(domain.len());
    for attribute in domain.names() {
        let partitions = split_by_attribute(examples, domain, attribute)?;
        let gain: F = gain_of_partitions(examples, &partitions)?;
        trace!("information gain of `{}`: {}", attribute, gain);
        scored.push((attribute, gain, partitions));
    }

    let average_gain =
        scored.iter().map(|(_, gain, _)| *gain).sum::<F>() / F::cast(scored.len());
    let threshold = gain_threshold(average_gain, scored.len());

    let mut ranked = Vec::new();
    for (attribute, gain, partitions) in scored {
        if gain < threshold {
            continue;
        }
        match split_information_of_partitions::<F>(examples.len(), &partitions)? {
            Some(split) => {
                trace!("gain ratio of `{}`: {}", attribute, gain / split);
                ranked.push(Candidate {
                    attribute,
                    gain_ratio: gain / split,
                    partitions,
                });
            }
            None => trace!("split information of `{}` is undefined", attribute),
        }
    }

    if ranked.is_empty() {
        return Err(Error::AllAttributesRejected {
            average_gain: average_gain.to_f64().unwrap_or(f64::NAN),
        });
    }

    // stable, so equal ratios keep the declaration order
    ranked.sort_by(|a, b| {
        b.gain_ratio
            .partial_cmp(&a.gain_ratio)
            .unwrap_or(Ordering::Equal)
    });

    let significance_level = match significance_level {
        Some(level) => level,
        None => {
            let best = &ranked[0];
            return Ok(AttributeSelection::Split {
                attribute: best.attribute.to_owned(),
                gain_ratio: best.gain_ratio,
            });
        }
    };

    for candidate in &ranked {
        let counts = candidate
            .partitions
            .iter()
            .map(|p| p.class_counts(examples))
            .collect::<Vec<_>>();
        let degrees_of_freedom = counts
            .iter()
            .filter(|c| !c.is_empty())
            .count()
            .saturating_sub(1);
        if degrees_of_freedom == 0 {
            continue;
        }

        let totals = known_counts(examples, &candidate.partitions);
        let statistic: F = chi_square_statistic(&counts, totals.positive, totals.negative);
        let critical = chi_square_critical_value(degrees_of_freedom, significance_level)?;
        trace!(
            "chi-square of `{}`: {} (critical value {})",
            candidate.attribute,
            statistic,
            critical
        );

        if statistic > critical {
            return Ok(AttributeSelection::Split {
                attribute: candidate.attribute.to_owned(),
                gain_ratio: candidate.gain_ratio,
            });
        }
    }

    Ok(AttributeSelection::NotSignificant)
}
