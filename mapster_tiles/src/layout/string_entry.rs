use super::{FileByteOrder, Record};
use anyhow::Result;
use mapster_core::io::{ValueReader, ValueReaderSlice, ValueWriter};

/// References a string in the character pool: `Offset` (0:4, i32), `Length` (4:4, i32).
///
/// Strings are UTF-8 and not null-terminated, the length is authoritative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StringEntry {
	pub offset: i32,
	pub length: i32,
}

impl StringEntry {
	pub fn new(offset: i32, length: i32) -> Self {
		StringEntry { offset, length }
	}
}

impl Record for StringEntry {
	const SIZE: u64 = 8;

	fn read(reader: &mut ValueReaderSlice<'_, FileByteOrder>) -> Result<Self> {
		Ok(StringEntry {
			offset: reader.read_i32()?,
			length: reader.read_i32()?,
		})
	}

	fn write<W: ValueWriter<FileByteOrder> + ?Sized>(&self, writer: &mut W) -> Result<()> {
		writer.write_i32(self.offset)?;
		writer.write_i32(self.length)
	}
}
