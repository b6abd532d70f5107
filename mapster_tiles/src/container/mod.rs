//! Reading and writing whole containers: file header, tile index and tile blocks.

mod reader;
mod writer;

pub use reader::*;
pub use writer::*;
