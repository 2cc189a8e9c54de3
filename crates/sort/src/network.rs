//! Batcher odd-even merge comparator networks.
//!
//! A [`Network`] is a fixed list of wire pairs built from the element count alone. Replaying it
//! through [`Network::apply`] sorts any sequence of that length, and the sequence of
//! compare-exchanges is the same whatever the values are, which is what lets a circuit compiler
//! bake it in before the inputs are known.
use ocirc_primitives::{Error, Exchange, Indexable, Oblivious, Result, Value};
use std::cmp::min;
use tracing::{debug, instrument};

/// A compare-exchange between wires `lo < hi`. After it runs, `arr[lo] <= arr[hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Comparator {
  /// Wire that receives the minimum.
  pub lo: usize,
  /// Wire that receives the maximum.
  pub hi: usize,
}

impl Comparator {
  /// Creates a comparator, checking that it is an ordered pair of wires below `n`.
  pub const fn new(lo: usize, hi: usize, n: usize) -> Result<Self> {
    if lo < hi && hi < n {
      Ok(Self { lo, hi })
    } else {
      Err(Error::InvalidComparator { lo, hi, n })
    }
  }
}

impl From<Comparator> for (usize, usize) {
  fn from(c: Comparator) -> Self {
    (c.lo, c.hi)
  }
}

/// An ordered list of comparators, valid only for the element count it was built for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Network {
  n: usize,
  comparators: Vec<Comparator>,
}

/// Calls `f(lo, hi)` for every comparator of the Batcher network for `n` elements, in order,
/// without materializing the list.
pub(crate) fn for_each_batcher_pair<F: FnMut(usize, usize)>(n: usize, mut f: F) {
  let mut p = 1;
  while p < n {
    let mut k = p;
    while k > 0 {
      let mut j = k % p;
      while j < n - k {
        for i in 0..min(k, n - j - k) {
          if (i + j) / (p * 2) == (i + j + k) / (p * 2) {
            f(i + j, i + j + k);
          }
        }
        j += 2 * k;
      }
      k /= 2;
    }
    p *= 2;
  }
}

impl Network {
  /// Builds the Batcher odd-even merge network for `n` elements.
  /// # Oblivious
  /// * Depends only on `n`, never on data.
  /// * `O(n log^2 n)` comparators arranged in `O(log^2 n)` rounds.
  ///
  /// Works for any `n`, not only powers of two: a comparator `(i + j, i + j + k)` is emitted only
  /// when both wires fall in the same block of `2p` elements.
  #[instrument(level = "debug")]
  pub fn batcher(n: usize) -> Self {
    let mut comparators = Vec::new();
    for_each_batcher_pair(n, |lo, hi| comparators.push(Comparator { lo, hi }));
    debug!(comparators = comparators.len(), "generated batcher network");
    Self { n, comparators }
  }

  /// Builds the comparator sequence performed by the transposition engine for `n` elements.
  ///
  /// The result sorts, but it has `n(n - 1) / 2` comparators and linear depth.
  #[instrument(level = "debug")]
  pub fn transposition(n: usize) -> Self {
    let mut comparators = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    crate::transposition::for_each_pair(n, |lo, hi| comparators.push(Comparator { lo, hi }));
    debug!(comparators = comparators.len(), "generated transposition network");
    Self { n, comparators }
  }

  /// Wraps an externally supplied comparator list for `n` wires.
  ///
  /// Fails with [`Error::InvalidComparator`] on the first pair that is not `lo < hi < n`. Whether
  /// the list actually sorts is not checked.
  pub fn from_comparators<I>(n: usize, pairs: I) -> Result<Self>
  where
    I: IntoIterator<Item = (usize, usize)>,
  {
    let comparators =
      pairs.into_iter().map(|(lo, hi)| Comparator::new(lo, hi, n)).collect::<Result<Vec<_>>>()?;
    Ok(Self { n, comparators })
  }

  /// Number of wires (elements) the network was built for.
  pub const fn len(&self) -> usize {
    self.n
  }

  /// Number of comparators.
  pub fn size(&self) -> usize {
    self.comparators.len()
  }

  /// Returns true if the network was built for zero wires.
  pub const fn is_empty(&self) -> bool {
    self.n == 0
  }

  /// Returns true if the network performs no compare-exchange, i.e. every input of its length is
  /// already sorted. Holds for `n <= 1`.
  pub fn is_trivial(&self) -> bool {
    self.comparators.is_empty()
  }

  /// The comparators, in application order.
  pub fn comparators(&self) -> &[Comparator] {
    &self.comparators
  }

  /// Iterates over the comparators in application order.
  pub fn iter(&self) -> std::slice::Iter<'_, Comparator> {
    self.comparators.iter()
  }

  /// Groups the comparators into parallel rounds.
  ///
  /// Each comparator lands in the round right after the latest round touching either of its
  /// wires, so comparators within a round are disjoint and replaying the rounds in order is
  /// equivalent to replaying the list.
  pub fn layers(&self) -> Vec<Vec<Comparator>> {
    let mut wire_depth = vec![0usize; self.n];
    let mut layers: Vec<Vec<Comparator>> = Vec::new();
    for &c in &self.comparators {
      let d = wire_depth[c.lo].max(wire_depth[c.hi]);
      if d == layers.len() {
        layers.push(Vec::new());
      }
      layers[d].push(c);
      wire_depth[c.lo] = d + 1;
      wire_depth[c.hi] = d + 1;
    }
    layers
  }

  /// Number of parallel rounds, i.e. the longest chain of dependent comparators.
  pub fn depth(&self) -> usize {
    let mut wire_depth = vec![0usize; self.n];
    let mut depth = 0;
    for c in &self.comparators {
      let d = wire_depth[c.lo].max(wire_depth[c.hi]) + 1;
      wire_depth[c.lo] = d;
      wire_depth[c.hi] = d;
      depth = depth.max(d);
    }
    depth
  }

  /// Sorts `arr` in place with the branch-free compare-exchange.
  /// # Oblivious
  /// * Data-independent memory access pattern
  /// * Leaks: `arr.len()`
  pub fn apply<T, C>(&self, arr: &mut C) -> Result<()>
  where
    T: Value,
    C: Indexable<T> + ?Sized,
  {
    self.apply_with(arr, Oblivious)
  }

  /// Sorts `arr` in place, performing every compare-exchange through `exchange`.
  ///
  /// Fails with [`Error::LengthMismatch`] before touching `arr` if its length differs from the
  /// network's.
  pub fn apply_with<T, C, E>(&self, arr: &mut C, mut exchange: E) -> Result<()>
  where
    T: Value,
    C: Indexable<T> + ?Sized,
    E: Exchange,
  {
    if arr.len() != self.n {
      return Err(Error::LengthMismatch { expected: self.n, actual: arr.len() });
    }
    for c in &self.comparators {
      exchange.exchange(arr, c.lo, c.hi);
    }
    Ok(())
  }
}

impl<'a> IntoIterator for &'a Network {
  type Item = &'a Comparator;
  type IntoIter = std::slice::Iter<'a, Comparator>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

/// Generates the sorting network for `n` elements. Two calls with the same `n` return identical
/// networks.
pub fn generate_network(n: usize) -> Network {
  Network::batcher(n)
}

/// Replays `network` on `sequence` and returns the sorted sequence.
pub fn apply_network<T: Value>(mut sequence: Vec<T>, network: &Network) -> Result<Vec<T>> {
  network.apply(&mut sequence)?;
  Ok(sequence)
}
