//! Contains byte containers and byte ranges.

mod blob;
pub use blob::*;

mod byte_range;
pub use byte_range::*;
