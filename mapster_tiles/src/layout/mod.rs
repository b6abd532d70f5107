//! Fixed byte layouts of every record stored in a container.
//!
//! Each record is unpadded and serialized field by field at its documented offset,
//! always little-endian ([`FileByteOrder`]). Nothing here relies on the in-memory layout
//! of the Rust structs, so the on-disk format is identical on every host.
//!
//! | record             | size |
//! |--------------------|------|
//! | [`FileHeader`]      | 12   |
//! | [`TileIndexEntry`]  | 12   |
//! | [`TileBlockHeader`] | 40   |
//! | [`MapFeature`]      | 29   |
//! | [`Coordinate`]      | 16   |
//! | [`StringEntry`]     | 8    |
//! | [`PropertyEntryList`] | 12 |
//! | [`PropertyEntry`]   | 8    |

mod coordinate;
mod file_header;
mod geometry_type;
mod map_feature;
mod property_entry;
mod string_entry;
mod tile_block_header;
mod tile_index_entry;

pub use coordinate::*;
pub use file_header::*;
pub use geometry_type::*;
pub use map_feature::*;
pub use property_entry::*;
pub use string_entry::*;
pub use tile_block_header::*;
pub use tile_index_entry::*;

pub(crate) use tile_block_header::region_range;

use anyhow::Result;
use byteorder::LittleEndian;
use mapster_core::io::{ValueReaderSlice, ValueWriter};

/// The byte order of every multi-byte field in a container file.
pub type FileByteOrder = LittleEndian;

/// A record with a fixed, unpadded byte layout.
pub trait Record: Sized {
	/// Serialized size in bytes.
	const SIZE: u64;

	/// Reads the record from the reader's current position.
	fn read(reader: &mut ValueReaderSlice<'_, FileByteOrder>) -> Result<Self>;

	/// Writes the record at the writer's current position.
	fn write<W: ValueWriter<FileByteOrder> + ?Sized>(&self, writer: &mut W) -> Result<()>;

	/// Reads the record from the start of `bytes`.
	fn from_slice(bytes: &[u8]) -> Result<Self> {
		Self::read(&mut ValueReaderSlice::new_le(bytes))
	}
}
