//! Commonly used base types and primitives for the oblivious algorithms.
//!
//! Everything in this crate is meant to be embedded in programs that are later compiled into
//! fixed-structure circuits, so the operations here never branch on the values they move.

pub mod cmov;

pub mod error;

pub mod exchange;

pub mod indexable;

pub mod traits;

#[doc(hidden)]
pub use bytemuck;

pub use error::{Error, Result};
pub use exchange::{Branching, Counting, Exchange, Oblivious};
pub use indexable::Indexable;
pub use traits::{Cmov, Value};
