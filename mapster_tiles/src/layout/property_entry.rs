//! Compacted tags: a pool of `(key code, value code)` pairs and its descriptor.

use super::{FileByteOrder, Record};
use anyhow::Result;
use byteorder::ByteOrder;
use mapster_core::io::{ValueReader, ValueReaderSlice, ValueWriter};
use std::fmt;

/// A dictionary code as stored on disk.
///
/// `-1` ([`TagCode::UNKNOWN`]) marks a key or value that has no code in the
/// property dictionary. It is not an error: callers decide how to treat it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagCode(i32);

impl TagCode {
	pub const UNKNOWN: TagCode = TagCode(-1);

	pub fn new(code: i32) -> Self {
		TagCode(code)
	}

	/// The raw stored value, `-1` for unknown.
	pub fn raw(self) -> i32 {
		self.0
	}

	pub fn is_known(self) -> bool {
		self.0 >= 0
	}

	/// The code, or `None` for the unknown sentinel.
	pub fn get(self) -> Option<i32> {
		self.is_known().then_some(self.0)
	}
}

impl fmt::Debug for TagCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.get() {
			Some(code) => write!(f, "{code}"),
			None => f.write_str("unknown"),
		}
	}
}

/// One compacted tag: `KeyCode` (0:4, i32), `ValueCode` (4:4, i32).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertyEntry {
	pub key: TagCode,
	pub value: TagCode,
}

impl PropertyEntry {
	pub fn new(key: i32, value: i32) -> Self {
		PropertyEntry {
			key: TagCode(key),
			value: TagCode(value),
		}
	}

	/// Returns `true` if both key and value have dictionary codes.
	pub fn is_known(&self) -> bool {
		self.key.is_known() && self.value.is_known()
	}

	/// Decodes an entry from exactly [`PropertyEntry::SIZE`] bytes.
	pub(crate) fn decode(bytes: &[u8]) -> Self {
		PropertyEntry::new(FileByteOrder::read_i32(&bytes[0..4]), FileByteOrder::read_i32(&bytes[4..8]))
	}
}

impl Record for PropertyEntry {
	const SIZE: u64 = 8;

	fn read(reader: &mut ValueReaderSlice<'_, FileByteOrder>) -> Result<Self> {
		Ok(PropertyEntry::new(reader.read_i32()?, reader.read_i32()?))
	}

	fn write<W: ValueWriter<FileByteOrder> + ?Sized>(&self, writer: &mut W) -> Result<()> {
		writer.write_i32(self.key.raw())?;
		writer.write_i32(self.value.raw())
	}
}

/// Describes the property pool of a tile: `Count` (0:4, i32), `OffsetInBytes` (4:8, u64, block-relative).
///
/// Stored directly after the character pool. The per-feature `property_count`
/// remains the authority for each feature's own slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropertyEntryList {
	pub count: i32,
	pub offset_in_bytes: u64,
}

impl PropertyEntryList {
	pub fn new(count: i32, offset_in_bytes: u64) -> Self {
		PropertyEntryList { count, offset_in_bytes }
	}
}

impl Record for PropertyEntryList {
	const SIZE: u64 = 12;

	fn read(reader: &mut ValueReaderSlice<'_, FileByteOrder>) -> Result<Self> {
		Ok(PropertyEntryList {
			count: reader.read_i32()?,
			offset_in_bytes: reader.read_u64()?,
		})
	}

	fn write<W: ValueWriter<FileByteOrder> + ?Sized>(&self, writer: &mut W) -> Result<()> {
		writer.write_i32(self.count)?;
		writer.write_u64(self.offset_in_bytes)
	}
}
