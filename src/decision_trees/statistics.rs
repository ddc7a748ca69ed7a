//! Class statistics and the chi-square independence test
//!
use std::borrow::Borrow;

use ndarray::{array, Array2, Axis};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::dataset::{ClassCounts, ClassLabel, Example, Float};
use crate::error::{Error, Result};

/// Fraction of `examples` labeled with `label`
///
/// Fails with [`Error::EmptyInput`] for an empty example set.
pub fn class_probability<F: Float, E: Borrow<Example>>(
    examples: &[E],
    label: ClassLabel,
) -> Result<F> {
    probability(&ClassCounts::of(examples), label)
}

/// Shannon entropy of the class distribution of `examples`, in bits
pub fn entropy<F: Float, E: Borrow<Example>>(examples: &[E]) -> Result<F> {
    counts_entropy(&ClassCounts::of(examples))
}

pub(crate) fn probability<F: Float>(counts: &ClassCounts, label: ClassLabel) -> Result<F> {
    if counts.is_empty() {
        return Err(Error::EmptyInput);
    }

    Ok(F::cast(counts.get(label)) / F::cast(counts.total()))
}

pub(crate) fn counts_entropy<F: Float>(counts: &ClassCounts) -> Result<F> {
    let positive: F = probability(counts, ClassLabel::Positive)?;
    let negative: F = probability(counts, ClassLabel::Negative)?;

    // 0 * log2(0) is taken as 0
    if positive == F::zero() || negative == F::zero() {
        Ok(F::zero())
    } else {
        Ok(-positive * positive.log2() - negative * negative.log2())
    }
}

/// Chi-square statistic of the class counts of a split
///
/// Compares the observed positive and negative counts of every partition with the counts
/// expected if the split attribute were independent of the class, i.e. the partition size
/// scaled by the overall positive and negative rates `total_positive / (total_positive +
/// total_negative)` and `total_negative / (total_positive + total_negative)`. Cells with an
/// expected count of zero, such as those of empty partitions, contribute nothing.
pub fn chi_square_statistic<F: Float>(
    partitions: &[ClassCounts],
    total_positive: usize,
    total_negative: usize,
) -> F {
    let total = total_positive + total_negative;
    if total == 0 || partitions.is_empty() {
        return F::zero();
    }

    let observed = Array2::from_shape_fn((partitions.len(), 2), |(i, j)| {
        F::cast(partitions[i].get(ClassLabel::ALL[j]))
    });
    let rates = array![
        F::cast(total_positive) / F::cast(total),
        F::cast(total_negative) / F::cast(total)
    ];
    let sizes = observed.sum_axis(Axis(1));
    let expected = Array2::from_shape_fn(observed.raw_dim(), |(i, j)| sizes[i] * rates[j]);

    observed
        .iter()
        .zip(expected.iter())
        .filter(|(_, e)| **e > F::zero())
        .fold(F::zero(), |acc, (&o, &e)| acc + (o - e) * (o - e) / e)
}

/// Critical value of the chi-square distribution
///
/// Returns the value a statistic with `degrees_of_freedom` has to exceed to reject independence
/// at `significance_level`, i.e. the `1 - significance_level` quantile.
pub fn chi_square_critical_value<F: Float>(
    degrees_of_freedom: usize,
    significance_level: F,
) -> Result<F> {
    let distribution = ChiSquared::new(degrees_of_freedom as f64).map_err(|err| {
        Error::Parameters(format!(
            "chi-square distribution with {} degrees of freedom: {}",
            degrees_of_freedom, err
        ))
    })?;
    let level = significance_level.to_f64().ok_or_else(|| {
        Error::Parameters(format!(
            "significance level {} is not representable",
            significance_level
        ))
    })?;

    Ok(F::cast(distribution.inverse_cdf(1.0 - level)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn labeled(positive: usize, negative: usize) -> Vec<Example> {
        (0..positive)
            .map(|_| Example::new(ClassLabel::Positive))
            .chain((0..negative).map(|_| Example::new(ClassLabel::Negative)))
            .collect()
    }

    #[test]
    fn probabilities_sum_to_one() -> Result<()> {
        for (p, n) in &[(9, 5), (1, 0), (0, 3), (7, 7), (1, 12)] {
            let examples = labeled(*p, *n);
            let positive: f64 = class_probability(&examples, ClassLabel::Positive)?;
            let negative: f64 = class_probability(&examples, ClassLabel::Negative)?;

            assert_abs_diff_eq!(positive + negative, 1.0, epsilon = 1e-12);
        }

        Ok(())
    }

    #[test]
    fn empty_input_is_an_error() {
        let examples: Vec<Example> = Vec::new();

        assert_eq!(
            class_probability::<f64, _>(&examples, ClassLabel::Positive),
            Err(Error::EmptyInput)
        );
        assert_eq!(entropy::<f64, _>(&examples), Err(Error::EmptyInput));
    }

    #[test]
    fn entropy_example() -> Result<()> {
        // 9 positive and 5 negative: -9/14*log2(9/14) - 5/14*log2(5/14)
        assert_abs_diff_eq!(entropy::<f64, _>(&labeled(9, 5))?, 0.940286, epsilon = 1e-6);
        // 6 positive and 2 negative
        assert_abs_diff_eq!(entropy::<f32, _>(&labeled(6, 2))?, 0.81127, epsilon = 1e-5);

        Ok(())
    }

    #[test]
    fn entropy_extremes() -> Result<()> {
        assert_eq!(entropy::<f64, _>(&labeled(4, 0))?, 0.0);
        assert_eq!(entropy::<f64, _>(&labeled(0, 4))?, 0.0);
        assert_eq!(entropy::<f64, _>(&labeled(5, 5))?, 1.0);

        // every unbalanced set stays strictly between both extremes
        for (p, n) in &[(1, 2), (3, 1), (10, 11)] {
            let value: f64 = entropy(&labeled(*p, *n))?;
            assert!(value > 0.0 && value < 1.0);
        }

        Ok(())
    }

    #[test]
    fn chi_square_of_outlook() {
        // play tennis split on outlook: sunny (2+, 3-), overcast (4+, 0-), rain (3+, 2-)
        let partitions = [
            ClassCounts::new(2, 3),
            ClassCounts::new(4, 0),
            ClassCounts::new(3, 2),
        ];
        let statistic: f64 = chi_square_statistic(&partitions, 9, 5);
        assert_abs_diff_eq!(statistic, 3.546667, epsilon = 1e-6);

        // play tennis split on humidity: high (3+, 4-), normal (6+, 1-)
        let partitions = [ClassCounts::new(3, 4), ClassCounts::new(6, 1)];
        let statistic: f64 = chi_square_statistic(&partitions, 9, 5);
        assert_abs_diff_eq!(statistic, 2.8, epsilon = 1e-9);
    }

    #[test]
    fn chi_square_ignores_empty_partitions() {
        let with_empty = [
            ClassCounts::new(2, 3),
            ClassCounts::new(0, 0),
            ClassCounts::new(4, 0),
        ];
        let without_empty = [ClassCounts::new(2, 3), ClassCounts::new(4, 0)];

        let a: f64 = chi_square_statistic(&with_empty, 6, 3);
        let b: f64 = chi_square_statistic(&without_empty, 6, 3);
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn independent_split_has_zero_statistic() {
        let partitions = [ClassCounts::new(2, 1), ClassCounts::new(4, 2)];
        let statistic: f64 = chi_square_statistic(&partitions, 6, 3);

        assert_abs_diff_eq!(statistic, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn critical_values() -> Result<()> {
        assert_abs_diff_eq!(chi_square_critical_value(1, 0.05f64)?, 3.841459, epsilon = 1e-3);
        assert_abs_diff_eq!(chi_square_critical_value(2, 0.05f64)?, 5.991465, epsilon = 1e-3);
        assert_abs_diff_eq!(chi_square_critical_value(2, 0.5f64)?, 1.386294, epsilon = 1e-3);

        assert!(chi_square_critical_value(0, 0.05f64).is_err());

        Ok(())
    }
}
