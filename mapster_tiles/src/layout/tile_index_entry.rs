use super::{FileByteOrder, Record};
use anyhow::Result;
use byteorder::ByteOrder;
use mapster_core::io::{ValueReader, ValueReaderSlice, ValueWriter};

/// One entry of the tile index: `ID` (0:4, i32), `OffsetInBytes` (4:8, u64).
///
/// The offset is file-relative and points at the tile's [`super::TileBlockHeader`].
/// Entries are stored sorted by id, so lookups can binary search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileIndexEntry {
	pub id: i32,
	pub offset_in_bytes: u64,
}

impl TileIndexEntry {
	pub const OFFSET_ID: u64 = 0;
	pub const OFFSET_OFFSET_IN_BYTES: u64 = 4;

	pub fn new(id: i32, offset_in_bytes: u64) -> Self {
		TileIndexEntry { id, offset_in_bytes }
	}

	/// Decodes an entry from exactly [`TileIndexEntry::SIZE`] bytes.
	pub(crate) fn decode(bytes: &[u8]) -> Self {
		TileIndexEntry {
			id: FileByteOrder::read_i32(&bytes[0..4]),
			offset_in_bytes: FileByteOrder::read_u64(&bytes[4..12]),
		}
	}
}

impl Record for TileIndexEntry {
	const SIZE: u64 = 12;

	fn read(reader: &mut ValueReaderSlice<'_, FileByteOrder>) -> Result<Self> {
		Ok(TileIndexEntry {
			id: reader.read_i32()?,
			offset_in_bytes: reader.read_u64()?,
		})
	}

	fn write<W: ValueWriter<FileByteOrder> + ?Sized>(&self, writer: &mut W) -> Result<()> {
		writer.write_i32(self.id)?;
		writer.write_u64(self.offset_in_bytes)
	}
}

#[cfg(test)]
mod tests {
	use super::super::test_utils::to_bytes;
	use super::*;

	#[test]
	fn layout() {
		let bytes = to_bytes(&TileIndexEntry::new(-2, 0x0102));
		assert_eq!(&bytes[0..4], &[0xFE, 0xFF, 0xFF, 0xFF]);
		assert_eq!(&bytes[4..12], &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
	}

	#[test]
	fn conversion() -> Result<()> {
		let entry = TileIndexEntry::new(42, u64::MAX - 1);
		assert_eq!(TileIndexEntry::from_slice(&to_bytes(&entry))?, entry);
		assert_eq!(TileIndexEntry::decode(&to_bytes(&entry)), entry);
		Ok(())
	}
}
