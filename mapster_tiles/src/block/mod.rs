//! Encoding and decoding of a single tile block.
//!
//! A tile block is self-contained: every offset inside it is relative to the first byte of the
//! block, so a block can be decoded from nothing but its own byte range.

mod decoder;
mod encoder;
mod source_feature;

pub use decoder::*;
pub use encoder::*;
pub use source_feature::*;
