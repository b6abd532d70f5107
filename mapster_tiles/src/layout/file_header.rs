//! The 12 byte header at the start of every container.

use super::{FileByteOrder, Record};
use crate::FormatError;
use anyhow::Result;
use mapster_core::io::{ValueReader, ValueReaderSlice, ValueWriter};

/// The version stamp written by this implementation.
pub const FORMAT_VERSION: i64 = 1;

/// Every version stamp this implementation can read.
pub const SUPPORTED_VERSIONS: &[i64] = &[FORMAT_VERSION];

/// Returns `true` if `version` can be read and written.
pub fn is_supported_version(version: i64) -> bool {
	SUPPORTED_VERSIONS.contains(&version)
}

/// `Version` (0:8, i64), `TileCount` (8:4, i32).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
	pub version: i64,
	pub tile_count: i32,
}

impl FileHeader {
	pub const OFFSET_VERSION: u64 = 0;
	pub const OFFSET_TILE_COUNT: u64 = 8;

	pub fn new(version: i64, tile_count: i32) -> Self {
		FileHeader { version, tile_count }
	}

	/// Fails with [`FormatError::UnsupportedVersion`] unless the version is known.
	pub fn check_version(&self) -> Result<(), FormatError> {
		if is_supported_version(self.version) {
			Ok(())
		} else {
			Err(FormatError::UnsupportedVersion(self.version))
		}
	}
}

impl Record for FileHeader {
	const SIZE: u64 = 12;

	fn read(reader: &mut ValueReaderSlice<'_, FileByteOrder>) -> Result<Self> {
		Ok(FileHeader {
			version: reader.read_i64()?,
			tile_count: reader.read_i32()?,
		})
	}

	fn write<W: ValueWriter<FileByteOrder> + ?Sized>(&self, writer: &mut W) -> Result<()> {
		writer.write_i64(self.version)?;
		writer.write_i32(self.tile_count)
	}
}
