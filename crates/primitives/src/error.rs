//! Errors shared by the sorting and reduction crates.
//!
//! Every variant is a caller contract violation. None of them is transient, so retrying with the
//! same input always fails the same way.

/// Structural misuse of an oblivious primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
  /// A network was replayed on a sequence of a different size.
  #[error("network was generated for {expected} elements but the sequence has {actual}")]
  LengthMismatch {
    /// Element count the network was built for.
    expected: usize,
    /// Length of the sequence it was applied to.
    actual: usize,
  },
  /// Median, order statistic or unseeded reduction over zero elements.
  #[error("operation requires at least one element")]
  EmptyInput,
  /// A hand-built network contains a pair that is not `lo < hi < n`.
  #[error("comparator ({lo}, {hi}) is not an ordered pair of wires below {n}")]
  InvalidComparator {
    /// First wire of the rejected pair.
    lo: usize,
    /// Second wire of the rejected pair.
    hi: usize,
    /// Wire count of the network being built.
    n: usize,
  },
  /// An order statistic was requested past the end of the input.
  #[error("index {index} is out of range for {len} elements")]
  IndexOutOfRange {
    /// Requested 0-based rank.
    index: usize,
    /// Number of elements available.
    len: usize,
  },
}

/// Result alias used across the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_messages() {
    let err = Error::LengthMismatch { expected: 4, actual: 3 };
    assert_eq!(err.to_string(), "network was generated for 4 elements but the sequence has 3");
    assert_eq!(Error::EmptyInput.to_string(), "operation requires at least one element");
    let err = Error::InvalidComparator { lo: 3, hi: 1, n: 4 };
    assert_eq!(err.to_string(), "comparator (3, 1) is not an ordered pair of wires below 4");
    let err = Error::IndexOutOfRange { index: 5, len: 2 };
    assert_eq!(err.to_string(), "index 5 is out of range for 2 elements");
  }
}
