//! `id3-trees-datasets` provides datasets ready to be used in tests and examples of `id3-trees`.
//!
//! ## Current State
//!
//! Currently the following datasets are provided:
//!
//! * `play_tennis` : the fourteen days of weather observations commonly used to introduce ID3
//!
//! The [`generate`] module produces random concepts of any size, optionally with unknown values.
//!
//! ## Using a dataset
//!
//! ```ignore
//! let (train, valid) = id3_trees_datasets::play_tennis().split_with_ratio(0.8);
//! ```

use std::io::Read;

use csv::ReaderBuilder;
use id3_trees::{AttributeDomain, ClassLabel, Dataset, Example};

pub mod generate;

/// Marks an unknown value in CSV data
pub const UNKNOWN: &str = "?";

/// Read examples from CSV bytes with a header row
///
/// Every column but the last is an attribute named by its header. The last column holds the
/// class label, rows equal to `positive` are positive examples. Cells containing [`UNKNOWN`] are
/// unknown values.
pub fn examples_from_csv<R: Read>(csv: R, positive: &str) -> Result<Vec<Example>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(csv);

    let headers = reader.headers()?.clone();
    let nattributes = headers.len().saturating_sub(1);

    let mut examples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let label = ClassLabel::from(record.get(nattributes) == Some(positive));

        let pairs = headers
            .iter()
            .zip(record.iter())
            .take(nattributes)
            .map(|(attribute, value)| {
                if value == UNKNOWN {
                    (attribute, None)
                } else {
                    (attribute, Some(value))
                }
            });
        examples.push(Example::from_pairs(pairs, label));
    }

    Ok(examples)
}

/// Attribute domain of the play tennis dataset
pub fn play_tennis_domain() -> AttributeDomain {
    AttributeDomain::new()
        .with_attribute("outlook", vec!["sunny", "overcast", "rain"])
        .with_attribute("temperature", vec!["hot", "mild", "cool"])
        .with_attribute("humidity", vec!["high", "normal"])
        .with_attribute("wind", vec!["weak", "strong"])
}

/// Read in the play tennis dataset
///
/// Days on which tennis was played are positive examples.
pub fn play_tennis() -> Dataset {
    let data = include_bytes!("../data/play_tennis.csv");
    let examples = examples_from_csv(&data[..], "yes").unwrap();

    Dataset::new(examples, play_tennis_domain())
}
