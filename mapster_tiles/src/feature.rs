//! Read access to a single feature and its pooled data.
//!
//! All views borrow the tile bytes. Nothing here allocates or copies apart from decoding the
//! fixed-size record that is currently looked at.
//!
//! ```rust
//! use mapster_tiles::{SourceFeature, TileBlock, TileBlockEncoder};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let source = SourceFeature::point(1, 39.8, -89.6)
//!         .with_label("Springfield")
//!         .with_tag("place", "city");
//!     let blob = TileBlockEncoder::default().encode(&[source])?;
//!     let block = TileBlock::new(blob.as_slice())?;
//!
//!     let feature = block.feature_at(0)?;
//!     assert_eq!(feature.label()?, Some("Springfield"));
//!     for coordinate in feature.coordinates()? {
//!         println!("{coordinate:?}");
//!     }
//!     Ok(())
//! }
//! ```

use crate::{Coordinate, GeometryType, MapFeature, PropertyEntry, Record, TileBlock};
use anyhow::Result;
use std::{fmt, iter::Map, slice::ChunksExact};

/// One feature of a tile block.
#[derive(Clone, Copy)]
pub struct Feature<'a> {
	record: MapFeature,
	block: TileBlock<'a>,
}

impl<'a> Feature<'a> {
	pub(crate) fn new(record: MapFeature, block: TileBlock<'a>) -> Self {
		Feature { record, block }
	}

	pub fn id(&self) -> i64 {
		self.record.id
	}

	pub fn geometry_type(&self) -> GeometryType {
		self.record.geometry_type
	}

	/// The stored record, including raw pool offsets.
	pub fn record(&self) -> &MapFeature {
		&self.record
	}

	/// The feature's geometry, in stored order.
	pub fn coordinates(&self) -> Result<CoordinateSlice<'a>> {
		self.block.coordinate_slice(self.record.coordinate_offset, self.record.coordinate_count)
	}

	/// The feature's label, `None` if it has none.
	pub fn label(&self) -> Result<Option<&'a str>> {
		if self.record.has_label() {
			self.block.string_at(self.record.label_offset).map(Some)
		} else {
			Ok(None)
		}
	}

	/// The feature's compacted tags.
	pub fn properties(&self) -> Result<PropertySlice<'a>> {
		self.block.property_slice(self.record.properties_offset, self.record.property_count)
	}
}

impl fmt::Debug for Feature<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Feature")
			.field("id", &self.record.id)
			.field("geometry_type", &self.record.geometry_type)
			.field("coordinates", &self.coordinates().ok())
			.field("label", &self.label().ok().flatten())
			.finish()
	}
}

pub type CoordinateIter<'a> = Map<ChunksExact<'a, u8>, fn(&[u8]) -> Coordinate>;

/// A borrowed run of coordinates in the coordinate pool.
///
/// Iterating is restartable: every call to [`CoordinateSlice::iter`] starts from the first coordinate.
#[derive(Clone, Copy)]
pub struct CoordinateSlice<'a> {
	bytes: &'a [u8],
}

impl<'a> CoordinateSlice<'a> {
	/// `bytes.len()` must be a multiple of [`Coordinate::SIZE`].
	pub(crate) fn new(bytes: &'a [u8]) -> Self {
		debug_assert_eq!(bytes.len() as u64 % Coordinate::SIZE, 0);
		CoordinateSlice { bytes }
	}

	pub fn len(&self) -> usize {
		self.bytes.len() / Coordinate::SIZE as usize
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<Coordinate> {
		let size = Coordinate::SIZE as usize;
		let start = index.checked_mul(size)?;
		self.bytes.get(start..start.checked_add(size)?).map(Coordinate::decode)
	}

	pub fn first(&self) -> Option<Coordinate> {
		self.get(0)
	}

	pub fn last(&self) -> Option<Coordinate> {
		self.len().checked_sub(1).and_then(|index| self.get(index))
	}

	pub fn iter(&self) -> CoordinateIter<'a> {
		self.bytes
			.chunks_exact(Coordinate::SIZE as usize)
			.map(Coordinate::decode as fn(&[u8]) -> Coordinate)
	}

	pub fn to_vec(&self) -> Vec<Coordinate> {
		self.iter().collect()
	}
}

impl<'a> IntoIterator for CoordinateSlice<'a> {
	type Item = Coordinate;
	type IntoIter = CoordinateIter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a> IntoIterator for &CoordinateSlice<'a> {
	type Item = Coordinate;
	type IntoIter = CoordinateIter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl fmt::Debug for CoordinateSlice<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

pub type PropertyIter<'a> = Map<ChunksExact<'a, u8>, fn(&[u8]) -> PropertyEntry>;

/// A borrowed run of `(key code, value code)` pairs in the property pool.
#[derive(Clone, Copy)]
pub struct PropertySlice<'a> {
	bytes: &'a [u8],
}

impl<'a> PropertySlice<'a> {
	/// `bytes.len()` must be a multiple of [`PropertyEntry::SIZE`].
	pub(crate) fn new(bytes: &'a [u8]) -> Self {
		debug_assert_eq!(bytes.len() as u64 % PropertyEntry::SIZE, 0);
		PropertySlice { bytes }
	}

	pub fn len(&self) -> usize {
		self.bytes.len() / PropertyEntry::SIZE as usize
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<PropertyEntry> {
		let size = PropertyEntry::SIZE as usize;
		let start = index.checked_mul(size)?;
		self.bytes.get(start..start.checked_add(size)?).map(PropertyEntry::decode)
	}

	pub fn first(&self) -> Option<PropertyEntry> {
		self.get(0)
	}

	pub fn last(&self) -> Option<PropertyEntry> {
		self.len().checked_sub(1).and_then(|index| self.get(index))
	}

	pub fn iter(&self) -> PropertyIter<'a> {
		self.bytes
			.chunks_exact(PropertyEntry::SIZE as usize)
			.map(PropertyEntry::decode as fn(&[u8]) -> PropertyEntry)
	}
}

impl<'a> IntoIterator for PropertySlice<'a> {
	type Item = PropertyEntry;
	type IntoIter = PropertyIter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a> IntoIterator for &PropertySlice<'a> {
	type Item = PropertyEntry;
	type IntoIter = PropertyIter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl fmt::Debug for PropertySlice<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list()
			.entries(self.iter().map(|entry| (entry.key, entry.value)))
			.finish()
	}
}
