//! Utility functions for randomly generating datasets

use id3_trees::{AttributeDomain, ClassLabel, Dataset, Example};
use rand::Rng;

/// Domain with `nattributes` attributes `a0, a1, ..` of `nvalues` values `v0, v1, ..` each
pub fn uniform_domain(nattributes: usize, nvalues: usize) -> AttributeDomain {
    (0..nattributes).fold(AttributeDomain::new(), |domain, attribute| {
        domain.with_attribute(
            format!("a{}", attribute),
            (0..nvalues).map(|value| format!("v{}", value)),
        )
    })
}

/// Generate `nsamples` examples of a hidden concept over a [`uniform_domain`]
///
/// The label of an example is a random function of the values of its first `relevant`
/// attributes, all other attributes are noise. Attribute values are drawn uniformly, so examples
/// with equal values always share the label.
///
/// ### Panics
///
/// If `nvalues` is zero or `relevant` exceeds `nattributes`
pub fn random_concept(
    nsamples: usize,
    nattributes: usize,
    nvalues: usize,
    relevant: usize,
    rng: &mut impl Rng,
) -> Dataset {
    assert!(nvalues > 0, "attributes need at least one value");
    assert!(
        relevant <= nattributes,
        "cannot depend on more attributes than there are"
    );

    let domain = uniform_domain(nattributes, nvalues);
    // truth table indexed by the values of the relevant attributes in mixed radix
    let concept = (0..nvalues.pow(relevant as u32))
        .map(|_| rng.gen_bool(0.5))
        .collect::<Vec<_>>();

    let examples = (0..nsamples)
        .map(|_| {
            let values = (0..nattributes)
                .map(|_| rng.gen_range(0..nvalues))
                .collect::<Vec<_>>();
            let idx = values[..relevant]
                .iter()
                .fold(0, |idx, value| idx * nvalues + value);

            Example::from_pairs(
                values
                    .iter()
                    .enumerate()
                    .map(|(attribute, value)| {
                        (format!("a{}", attribute), Some(format!("v{}", value)))
                    }),
                ClassLabel::from(concept[idx]),
            )
        })
        .collect();

    Dataset::new(examples, domain)
}

/// Mark every known value as unknown with probability `rate`
pub fn with_unknown_values(dataset: Dataset, rate: f64, rng: &mut impl Rng) -> Dataset {
    let Dataset { examples, domain } = dataset;

    let examples = examples
        .into_iter()
        .map(|example| {
            let pairs = example
                .values()
                .map(|(attribute, value)| {
                    let value = if rng.gen_bool(rate) { None } else { value };
                    (attribute.to_owned(), value.map(str::to_owned))
                })
                .collect::<Vec<_>>();

            Example::from_pairs(pairs, example.label())
        })
        .collect();

    Dataset::new(examples, domain)
}
