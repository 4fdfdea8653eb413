//! # briggs-core
//!
//! Digit-recurrence evaluation of exp(x) and ln(x) in carry-save arithmetic,
//! modeling how the algorithm would be laid out in a hardware functional
//! unit: two redundant accumulators refined by one signed digit {-1, 0, +1}
//! per iteration, with the digit chosen from a truncated 4-bit window of the
//! live state.
//!
//! Key types:
//! - [`ExpLog`]: the iterative engine
//! - [`Mode`]: exponential / logarithm selection
//! - [`StepTables`]: the shared s3.60 step constants ln(1 ± 2⁻ⁿ)
//! - [`TraceStep`]: per-iteration records consumed by external presenters
//!
//! The algorithm follows p. 139, Chapter 8 of *Elementary Functions:
//! Algorithms and Implementation* (3rd edition) by J.-M. Muller.

pub mod engine;
pub mod selection;
pub mod tables;

pub use engine::{EngineError, ExpLog, TraceStep};
pub use selection::{select_digit, Mode};
pub use tables::StepTables;
