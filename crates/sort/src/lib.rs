//! This crate implements oblivious sorting for programs that are compiled into fixed circuits:
//! a Batcher comparator network generator and executor, a transposition sort used as its
//! reference, and median / order-statistic extraction on top of both.

pub mod engine;

pub mod median;

pub mod network;

pub mod transposition;

pub use engine::SortEngine;
pub use median::{median, median_with, order_statistic, Median};
pub use network::{apply_network, generate_network, Comparator, Network};
pub use ocirc_primitives::{Error, Result};
pub use transposition::{transposition_sort, transposition_sort_with, transposition_sorted};
