//! Read access to a complete container held in one byte buffer.
//!
//! Opening validates only the file header and that the tile index fits. Every tile block is
//! validated when it is looked up, so a corrupted tile does not prevent reading the others.
//!
//! ```rust
//! use mapster_tiles::{Container, ContainerWriter, FORMAT_VERSION, SourceFeature};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ContainerWriter::new(FORMAT_VERSION)?;
//!     writer.add_tile(3, &[SourceFeature::point(1, 39.8, -89.6).with_label("Springfield")])?;
//!     let blob = writer.finish_blob()?;
//!
//!     let container = Container::open(blob.as_slice())?;
//!     let tile = container.find_tile(3)?.expect("tile 3 exists");
//!     assert_eq!(tile.feature_at(0)?.label()?, Some("Springfield"));
//!     assert!(container.find_tile(4)?.is_none());
//!     Ok(())
//! }
//! ```

use crate::{FileHeader, FormatError, Record, TileBlock, TileIndexEntry};
use anyhow::{Context, Result};
use log::{debug, trace};
use mapster_core::ByteRange;
use std::{cmp::Ordering, fmt};

/// An opened container, borrowing its bytes.
#[derive(Clone, Copy)]
pub struct Container<'a> {
	data: &'a [u8],
	header: FileHeader,
	index: &'a [u8],
}

impl<'a> Container<'a> {
	/// Opens the container stored in `data`.
	///
	/// Fails with [`FormatError::TruncatedFile`] if the header or the tile index does not fit, and with
	/// [`FormatError::UnsupportedVersion`] if the version stamp is unknown.
	pub fn open(data: &'a [u8]) -> Result<Container<'a>> {
		let available = data.len() as u64;
		if available < FileHeader::SIZE {
			return Err(FormatError::truncated("file header", FileHeader::SIZE, available).into());
		}
		let header = FileHeader::from_slice(data).context("reading file header")?;
		header.check_version()?;

		let index_length = i64::from(header.tile_count) * TileIndexEntry::SIZE as i64;
		// A negative tile count can not be satisfied by any buffer.
		let needed = FileHeader::SIZE + index_length.unsigned_abs();
		if header.tile_count < 0 || needed > available {
			return Err(FormatError::truncated("tile index", needed, available).into());
		}

		debug!(
			"opened container version {} with {} tiles ({available} bytes)",
			header.version, header.tile_count
		);
		Ok(Container {
			data,
			header,
			index: &data[FileHeader::SIZE as usize..needed as usize],
		})
	}

	pub fn header(&self) -> &FileHeader {
		&self.header
	}

	pub fn version(&self) -> i64 {
		self.header.version
	}

	pub fn tile_count(&self) -> usize {
		self.index.len() / TileIndexEntry::SIZE as usize
	}

	pub fn as_slice(&self) -> &'a [u8] {
		self.data
	}

	/// Returns index entry `position`, `None` past the end of the index.
	pub fn entry(&self, position: usize) -> Option<TileIndexEntry> {
		let size = TileIndexEntry::SIZE as usize;
		let start = position.checked_mul(size)?;
		self.index.get(start..start.checked_add(size)?).map(TileIndexEntry::decode)
	}

	/// Iterates over the index in stored order.
	pub fn entries(&self) -> impl ExactSizeIterator<Item = TileIndexEntry> + 'a {
		self.index
			.chunks_exact(TileIndexEntry::SIZE as usize)
			.map(TileIndexEntry::decode)
	}

	/// Iterates over the ids of all tiles, ascending.
	pub fn tile_ids(&self) -> impl ExactSizeIterator<Item = i32> + 'a {
		self.entries().map(|entry| entry.id)
	}

	/// Returns the index position of tile `id`.
	fn position_of(&self, id: i32) -> Option<usize> {
		let (mut low, mut high) = (0, self.tile_count());
		while low < high {
			let middle = low + (high - low) / 2;
			let entry = self.entry(middle)?;
			match entry.id.cmp(&id) {
				Ordering::Less => low = middle + 1,
				Ordering::Greater => high = middle,
				Ordering::Equal => return Some(middle),
			}
		}
		None
	}

	/// The byte range of the block at index `position`: up to the next entry's offset, or to the
	/// end of the buffer for the last entry.
	fn range_at(&self, position: usize) -> Result<ByteRange, FormatError> {
		let available = self.data.len() as u64;
		let start = self.entry(position).map_or(available, |entry| entry.offset_in_bytes);
		let end = self.entry(position + 1).map_or(available, |entry| entry.offset_in_bytes);
		let range = ByteRange::from_bounds(start, end).ok_or_else(|| FormatError::truncated("tile block", start, available))?;
		if range.fits_within(available) {
			Ok(range)
		} else {
			Err(FormatError::truncated("tile block", end, available))
		}
	}

	/// Returns the byte range of tile `id`, `None` if the container has no such tile.
	pub fn tile_range(&self, id: i32) -> Result<Option<ByteRange>> {
		match self.position_of(id) {
			Some(position) => Ok(Some(
				self.range_at(position).with_context(|| format!("locating tile {id}"))?,
			)),
			None => Ok(None),
		}
	}

	/// Looks up tile `id` and decodes its block header.
	///
	/// Returns `Ok(None)` if the container has no such tile.
	pub fn find_tile(&self, id: i32) -> Result<Option<TileBlock<'a>>> {
		let Some(range) = self.tile_range(id)? else {
			trace!("tile {id} not found");
			return Ok(None);
		};
		trace!("tile {id} at {range:?}");
		let block = TileBlock::new(&self.data[range.as_range_usize()]).with_context(|| format!("decoding tile {id}"))?;
		Ok(Some(block))
	}

	/// Iterates over all tiles in index order. Each tile is validated separately.
	pub fn tiles(&self) -> impl Iterator<Item = (i32, Result<TileBlock<'a>>)> + 'a {
		let container = *self;
		self.entries().enumerate().map(move |(position, entry)| {
			let block = container
				.range_at(position)
				.map_err(anyhow::Error::from)
				.and_then(|range| TileBlock::new(&container.data[range.as_range_usize()]))
				.with_context(|| format!("decoding tile {}", entry.id));
			(entry.id, block)
		})
	}
}

impl fmt::Debug for Container<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Container")
			.field("length", &self.data.len())
			.field("header", &self.header)
			.finish()
	}
}
