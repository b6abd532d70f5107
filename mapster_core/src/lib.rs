//! Shared byte-level building blocks for mapster: byte containers, byte ranges and
//! byte-order aware value readers and writers.

pub mod io;

pub mod types;
pub use types::*;
