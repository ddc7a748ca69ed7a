//! `id3-trees` grows decision trees over discrete attributes for binary classification.
//!
//! ## The algorithm
//!
//! Trees are grown top-down. At every node the attributes which have not been tested on the
//! path from the root are scored by their information gain, attributes below the average gain are
//! discarded and the remaining ones are ranked by gain ratio. The node splits on the best ranked
//! attribute and grows one child per legal value of it. Growing stops at nodes whose examples
//! share a class, at nodes without attributes left and, when a significance level is given, at
//! nodes where no attribute passes a chi-square test of independence from the class.
//!
//! Examples may carry unknown values. Right before a node splits on an attribute, the unknown
//! values of that attribute are replaced by the value most common among the examples of the same
//! class. The fitted tree remembers these modes per node to classify examples with unknown values.
//!
//! ## Usage
//!
//! ```rust
//! use id3_trees::prelude::*;
//! use id3_trees::{AttributeDomain, ClassLabel, DecisionTree, Example};
//!
//! let domain = AttributeDomain::new()
//!     .with_attribute("outlook", vec!["sunny", "overcast", "rain"])
//!     .with_attribute("humidity", vec!["high", "normal"]);
//!
//! let day = |outlook: &str, humidity: &str, play: bool| {
//!     Example::new(ClassLabel::from(play))
//!         .with_value("outlook", outlook)
//!         .with_value("humidity", humidity)
//! };
//! let mut train = Dataset::new(
//!     vec![
//!         day("sunny", "high", false),
//!         day("sunny", "normal", true),
//!         day("overcast", "high", true),
//!         day("rain", "normal", true),
//!     ],
//!     domain,
//! );
//!
//! let tree = DecisionTree::<f64>::params().fit(&mut train)?;
//! let predictions = tree.predict(&train);
//! let cm = predictions.confusion_matrix(&train)?;
//!
//! assert_eq!(cm.accuracy(), 1.0);
//! # Ok::<(), id3_trees::Error>(())
//! ```

pub mod dataset;
pub mod decision_trees;
pub mod error;
pub mod metrics;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{
    Attribute, AttributeDomain, ClassCounts, ClassLabel, Dataset, Example, Float,
};
pub use decision_trees::*;
pub use error::{Error, Result};
pub use param_guard::ParamGuard;
