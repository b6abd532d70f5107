//! The 40 byte header at the start of every tile block.
//!
//! A tile block is laid out as follows, all offsets relative to the start of the block:
//!
//! ```text
//! [0]                          TileBlockHeader
//! [40]                         MapFeature[features_count]
//! [coordinates_offset]         Coordinate[coordinates_count]
//! [strings_offset]             StringEntry[string_count]
//! [characters_offset]          character pool, characters_count bytes of UTF-8
//! [characters_offset + count]  PropertyEntryList
//! [property list offset]       PropertyEntry[property list count]
//! ```

use super::{Coordinate, FileByteOrder, MapFeature, PropertyEntryList, Record, StringEntry};
use crate::FormatError;
use anyhow::Result;
use mapster_core::{
	ByteRange,
	io::{ValueReader, ValueReaderSlice, ValueWriter},
};

/// Counts and block-relative offsets of the payload arrays of one tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileBlockHeader {
	/// Number of renderable features in the tile.
	pub features_count: i32,
	/// Number of coordinates used by the features in the tile.
	pub coordinates_count: i32,
	/// Number of entries in the string table.
	pub string_count: i32,
	/// Number of bytes in the character pool.
	pub characters_count: i32,
	pub coordinates_offset_in_bytes: u64,
	pub strings_offset_in_bytes: u64,
	pub characters_offset_in_bytes: u64,
}

impl TileBlockHeader {
	pub const OFFSET_FEATURES_COUNT: u64 = 0;
	pub const OFFSET_COORDINATES_COUNT: u64 = 4;
	pub const OFFSET_STRING_COUNT: u64 = 8;
	pub const OFFSET_CHARACTERS_COUNT: u64 = 12;
	pub const OFFSET_COORDINATES_OFFSET: u64 = 16;
	pub const OFFSET_STRINGS_OFFSET: u64 = 24;
	pub const OFFSET_CHARACTERS_OFFSET: u64 = 32;

	/// Byte range of the feature records.
	pub fn features_range(&self) -> Result<ByteRange, FormatError> {
		region_range("feature records", Self::SIZE, self.features_count, MapFeature::SIZE)
	}

	/// Byte range of the coordinate pool.
	pub fn coordinates_range(&self) -> Result<ByteRange, FormatError> {
		region_range(
			"coordinate pool",
			self.coordinates_offset_in_bytes,
			self.coordinates_count,
			Coordinate::SIZE,
		)
	}

	/// Byte range of the string table.
	pub fn strings_range(&self) -> Result<ByteRange, FormatError> {
		region_range(
			"string table",
			self.strings_offset_in_bytes,
			self.string_count,
			StringEntry::SIZE,
		)
	}

	/// Byte range of the character pool.
	pub fn characters_range(&self) -> Result<ByteRange, FormatError> {
		region_range("character pool", self.characters_offset_in_bytes, self.characters_count, 1)
	}

	/// Byte range of the [`PropertyEntryList`] that directly follows the character pool.
	pub fn property_list_range(&self) -> Result<ByteRange, FormatError> {
		let characters = self.characters_range()?;
		let offset = characters
			.checked_end()
			.ok_or_else(|| FormatError::truncated("property list", u64::MAX, 0))?;
		Ok(ByteRange::new(offset, PropertyEntryList::SIZE))
	}
}

/// Computes `offset .. offset + count * size`, rejecting negative counts and overflow.
pub(crate) fn region_range(
	region: &'static str,
	offset: u64,
	count: i32,
	record_size: u64,
) -> Result<ByteRange, FormatError> {
	let count = u64::try_from(count).map_err(|_| FormatError::NegativeValue {
		region,
		value: i64::from(count),
	})?;
	let length = count * record_size;
	let range = ByteRange::new(offset, length);
	if range.checked_end().is_none() {
		return Err(FormatError::truncated(region, u64::MAX, 0));
	}
	Ok(range)
}

impl Record for TileBlockHeader {
	const SIZE: u64 = 40;

	fn read(reader: &mut ValueReaderSlice<'_, FileByteOrder>) -> Result<Self> {
		Ok(TileBlockHeader {
			features_count: reader.read_i32()?,
			coordinates_count: reader.read_i32()?,
			string_count: reader.read_i32()?,
			characters_count: reader.read_i32()?,
			coordinates_offset_in_bytes: reader.read_u64()?,
			strings_offset_in_bytes: reader.read_u64()?,
			characters_offset_in_bytes: reader.read_u64()?,
		})
	}

	fn write<W: ValueWriter<FileByteOrder> + ?Sized>(&self, writer: &mut W) -> Result<()> {
		writer.write_i32(self.features_count)?;
		writer.write_i32(self.coordinates_count)?;
		writer.write_i32(self.string_count)?;
		writer.write_i32(self.characters_count)?;
		writer.write_u64(self.coordinates_offset_in_bytes)?;
		writer.write_u64(self.strings_offset_in_bytes)?;
		writer.write_u64(self.characters_offset_in_bytes)
	}
}
