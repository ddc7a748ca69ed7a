mod algorithm;
mod hyperparams;
mod impute;
mod iter;
mod scorer;
mod statistics;
mod tikz;

pub use algorithm::*;
pub use hyperparams::*;
pub use impute::*;
pub use iter::*;
pub use scorer::*;
pub use statistics::*;
pub use tikz::*;
