//! Error types in id3-trees
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("statistics require at least one example")]
    EmptyInput,
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("none of the attributes met the selection criteria (average gain {average_gain})")]
    AllAttributesRejected { average_gain: f64 },
    #[error("attribute `{0}` is not part of the attribute domain")]
    UnknownAttribute(String),
    #[error("example lacks a value for attribute `{0}`")]
    MissingAttribute(String),
    #[error("attribute `{0}` has no legal values")]
    EmptyDomain(String),
    #[error("value `{value}` is not in the domain of attribute `{attribute}`")]
    InvalidValue { attribute: String, value: String },
    #[error("mismatched shapes {0} and {1}")]
    MismatchedShapes(usize, usize),
}
