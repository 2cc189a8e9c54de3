//! Choice of sorting engine.
//!
//! The engine is configuration picked by the caller, never by the data.
use crate::network::{for_each_batcher_pair, Network};
use crate::transposition::transposition_sort_with;
use ocirc_primitives::{Exchange, Indexable, Oblivious, Value};

/// Which oblivious sort to run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortEngine {
  /// Batcher odd-even merge network, `O(n log^2 n)` comparators.
  #[default]
  Batcher,
  /// Shrinking-window transposition sort, `n(n - 1) / 2` comparators.
  Transposition,
}

impl SortEngine {
  /// Sorts `arr` in place with the branch-free compare-exchange.
  /// # Oblivious
  /// * Data-independent memory access pattern
  /// * Leaks: `arr.len()`
  pub fn sort<T, C>(self, arr: &mut C)
  where
    T: Value,
    C: Indexable<T> + ?Sized,
  {
    self.sort_with(arr, Oblivious);
  }

  /// Sorts `arr` in place, performing every compare-exchange through `exchange`.
  ///
  /// The comparator schedule is walked as it is computed, so nothing is allocated. Callers that
  /// sort many sequences of one length can instead build [`Self::network`] once and replay it
  /// with [`Network::apply`].
  pub fn sort_with<T, C, E>(self, arr: &mut C, mut exchange: E)
  where
    T: Value,
    C: Indexable<T> + ?Sized,
    E: Exchange,
  {
    let n = arr.len();
    match self {
      Self::Batcher => for_each_batcher_pair(n, |lo, hi| exchange.exchange(arr, lo, hi)),
      Self::Transposition => transposition_sort_with(arr, exchange),
    }
  }

  /// Number of compare-exchanges a sort of `n` elements performs.
  pub fn comparator_count(self, n: usize) -> usize {
    match self {
      Self::Batcher => {
        let mut count = 0;
        for_each_batcher_pair(n, |_, _| count += 1);
        count
      }
      Self::Transposition => n * n.saturating_sub(1) / 2,
    }
  }

  /// The full comparator network this engine replays for `n` elements.
  pub fn network(self, n: usize) -> Network {
    match self {
      Self::Batcher => Network::batcher(n),
      Self::Transposition => Network::transposition(n),
    }
  }
}
