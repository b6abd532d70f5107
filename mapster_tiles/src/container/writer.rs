//! Assembles a complete container from tiles.
//!
//! Tiles may be added in any order. They are buffered until the container is written, then
//! laid out as header, index sorted by tile id, and blocks in index order. Because blocks follow
//! the index order back to back, tile `i` occupies exactly `[offset_i, offset_{i+1})`.
//!
//! ```rust
//! use mapster_tiles::{Container, ContainerWriter, FORMAT_VERSION, SourceFeature};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ContainerWriter::new(FORMAT_VERSION)?;
//!     writer.add_tile(42, &[SourceFeature::point(1, 52.5, 13.4)])?;
//!     writer.add_tile(7, &[])?;
//!     let blob = writer.finish_blob()?;
//!
//!     let container = Container::open(blob.as_slice())?;
//!     assert_eq!(container.tile_ids().collect::<Vec<_>>(), vec![7, 42]);
//!     Ok(())
//! }
//! ```

use crate::{
	EncoderOptions, FileByteOrder, FileHeader, FormatError, Record, SourceFeature, TileBlockEncoder, TileIndexEntry,
};
use anyhow::{Context, Result};
use log::{debug, trace};
use mapster_core::{
	Blob,
	io::{ValueWriter, ValueWriterBlob, ValueWriterFile},
};
use std::{collections::BTreeMap, fs::File, path::Path};

/// Collects tiles and writes them as one container.
pub struct ContainerWriter {
	version: i64,
	encoder: TileBlockEncoder,
	tiles: BTreeMap<i32, Blob>,
}

impl ContainerWriter {
	/// Creates a writer that stamps `version` into the file header.
	///
	/// Fails with [`FormatError::UnsupportedVersion`] if this implementation cannot write `version`.
	pub fn new(version: i64) -> Result<ContainerWriter> {
		Self::with_options(version, EncoderOptions::default())
	}

	pub fn with_options(version: i64, options: EncoderOptions) -> Result<ContainerWriter> {
		FileHeader::new(version, 0).check_version()?;
		Ok(ContainerWriter {
			version,
			encoder: TileBlockEncoder::new(options),
			tiles: BTreeMap::new(),
		})
	}

	pub fn version(&self) -> i64 {
		self.version
	}

	pub fn tile_count(&self) -> usize {
		self.tiles.len()
	}

	/// Encodes `features` as the block of tile `id`.
	pub fn add_tile(&mut self, id: i32, features: &[SourceFeature]) -> Result<()> {
		self.check_new_id(id)?;
		let blob = self.encoder.encode(features).with_context(|| format!("encoding tile {id}"))?;
		self.add_encoded_tile(id, blob)
	}

	/// Adds an already encoded block as tile `id`. The bytes are stored unchanged.
	pub fn add_encoded_tile(&mut self, id: i32, blob: Blob) -> Result<()> {
		self.check_new_id(id)?;
		trace!("add tile {id} ({} bytes)", blob.len());
		self.tiles.insert(id, blob);
		Ok(())
	}

	fn check_new_id(&self, id: i32) -> Result<(), FormatError> {
		if self.tiles.contains_key(&id) {
			Err(FormatError::DuplicateTile(id))
		} else {
			Ok(())
		}
	}

	/// Computes the index entries, with file-relative offsets.
	fn index(&self) -> Result<(FileHeader, Vec<TileIndexEntry>)> {
		let tile_count = i32::try_from(self.tiles.len())
			.map_err(|_| FormatError::InvalidFeature(format!("a container holds at most {} tiles", i32::MAX)))?;
		let mut offset = FileHeader::SIZE + self.tiles.len() as u64 * TileIndexEntry::SIZE;
		let mut entries = Vec::with_capacity(self.tiles.len());
		for (id, blob) in &self.tiles {
			entries.push(TileIndexEntry::new(*id, offset));
			offset += blob.len();
		}
		Ok((FileHeader::new(self.version, tile_count), entries))
	}

	/// Writes the complete container to `writer`.
	pub fn write_to<W: ValueWriter<FileByteOrder> + ?Sized>(&self, writer: &mut W) -> Result<()> {
		let (header, entries) = self.index()?;
		header.write(writer)?;
		for entry in &entries {
			entry.write(writer)?;
		}
		for blob in self.tiles.values() {
			writer.write_blob(blob)?;
		}
		debug!(
			"wrote container version {} with {} tiles",
			header.version, header.tile_count
		);
		Ok(())
	}

	/// Returns the complete container as one blob.
	pub fn finish_blob(&self) -> Result<Blob> {
		let size = FileHeader::SIZE
			+ self.tiles.len() as u64 * TileIndexEntry::SIZE
			+ self.tiles.values().map(Blob::len).sum::<u64>();
		let mut writer = ValueWriterBlob::<FileByteOrder>::with_capacity(size as usize);
		self.write_to(&mut writer)?;
		Ok(writer.into_blob())
	}

	/// Writes the complete container to a new file at `path`.
	pub fn write_to_path(&self, path: &Path) -> Result<()> {
		let file = File::create(path).with_context(|| format!("failed to create {path:?}"))?;
		let mut writer = ValueWriterFile::<FileByteOrder>::new(file);
		self.write_to(&mut writer)?;
		writer.flush()
	}
}
