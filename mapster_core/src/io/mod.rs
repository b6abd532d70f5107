//! Readers and writers for fixed-width binary values, plus read-only file mapping.
//!
//! The value readers and writers are generic over a [`byteorder::ByteOrder`], so every
//! multi-byte field is read and written with an explicit byte order instead of relying on
//! the host's native struct layout.

mod mapped_file;
mod value_reader;
mod value_reader_slice;
mod value_writer;
mod value_writer_blob;
mod value_writer_file;

pub use mapped_file::*;
pub use value_reader::*;
pub use value_reader_slice::*;
pub use value_writer::*;
pub use value_writer_blob::*;
pub use value_writer_file::*;
