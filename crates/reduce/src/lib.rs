//! Depth-balanced reductions.
//!
//! A running accumulation `((a + b) + c) + ...` has a dependency chain as long as the input. When
//! the program is compiled into a circuit for secure multi-party computation, that chain length
//! is the number of interaction rounds. Splitting the input in halves and combining the partial
//! results keeps the chain logarithmic.

pub mod tree;

pub use ocirc_primitives::{Error, Result};
pub use tree::{reduce, reduce_or, reduction_depth, tree_sum};
