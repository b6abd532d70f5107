//! Zero-copy read access to one tile block.
//!
//! [`TileBlock::new`] checks once that every region declared in the block header lies inside the
//! block. Each accessor afterwards checks the requested index or slice against the declared counts
//! and fails with [`FormatError::OutOfRange`] instead of clamping.

use crate::{
	Coordinate, CoordinateSlice, Feature, FormatError, MapFeature, PropertyEntry, PropertyEntryList,
	PropertySlice, Record, StringEntry, TileBlockHeader, layout::region_range,
};
use anyhow::{Context, Result};
use mapster_core::ByteRange;
use std::fmt;

/// A decoded view of a tile block, borrowing the block's bytes.
#[derive(Clone, Copy)]
pub struct TileBlock<'a> {
	data: &'a [u8],
	header: TileBlockHeader,
	property_list: PropertyEntryList,
	features: ByteRange,
	coordinates: ByteRange,
	strings: ByteRange,
	characters: ByteRange,
	properties: ByteRange,
}

impl<'a> TileBlock<'a> {
	/// Reads the block header and checks that every region it declares fits into `data`.
	pub fn new(data: &'a [u8]) -> Result<TileBlock<'a>> {
		let available = data.len() as u64;
		let header_range = ByteRange::new(0, TileBlockHeader::SIZE);
		check_fits("tile block header", header_range, available)?;
		let header = TileBlockHeader::from_slice(data).context("reading tile block header")?;

		let features = check_fits("feature records", header.features_range()?, available)?;
		let coordinates = check_fits("coordinate pool", header.coordinates_range()?, available)?;
		let strings = check_fits("string table", header.strings_range()?, available)?;
		let characters = check_fits("character pool", header.characters_range()?, available)?;
		let list_range = check_fits("property list", header.property_list_range()?, available)?;
		let property_list = PropertyEntryList::from_slice(&data[list_range.as_range_usize()])?;
		let properties = check_fits(
			"property pool",
			region_range(
				"property pool",
				property_list.offset_in_bytes,
				property_list.count,
				PropertyEntry::SIZE,
			)?,
			available,
		)?;

		Ok(TileBlock {
			data,
			header,
			property_list,
			features,
			coordinates,
			strings,
			characters,
			properties,
		})
	}

	pub fn header(&self) -> &TileBlockHeader {
		&self.header
	}

	pub fn property_list(&self) -> &PropertyEntryList {
		&self.property_list
	}

	/// The raw bytes of the block.
	pub fn as_slice(&self) -> &'a [u8] {
		self.data
	}

	pub fn len(&self) -> u64 {
		self.data.len() as u64
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn feature_count(&self) -> u32 {
		(self.features.length / MapFeature::SIZE) as u32
	}

	pub fn coordinate_count(&self) -> u32 {
		(self.coordinates.length / Coordinate::SIZE) as u32
	}

	pub fn string_count(&self) -> u32 {
		(self.strings.length / StringEntry::SIZE) as u32
	}

	pub fn characters_count(&self) -> u32 {
		self.characters.length as u32
	}

	/// Size of the whole property pool, summed over all features.
	pub fn property_count(&self) -> u32 {
		(self.properties.length / PropertyEntry::SIZE) as u32
	}

	/// Reads the raw record of feature `index`.
	pub fn feature_record(&self, index: u32) -> Result<MapFeature> {
		let bytes = self.records("feature", self.features, MapFeature::SIZE, u64::from(index), 1)?;
		MapFeature::from_slice(bytes).with_context(|| format!("reading feature record {index}"))
	}

	/// Returns feature `index` with access to its coordinates, label and properties.
	pub fn feature_at(&self, index: u32) -> Result<Feature<'a>> {
		Ok(Feature::new(self.feature_record(index)?, *self))
	}

	/// Iterates over all features in stored order.
	pub fn features(&self) -> Features<'a> {
		Features {
			block: *self,
			next: 0,
			count: self.feature_count(),
		}
	}

	/// Borrows `count` coordinates starting at pool index `offset`.
	pub fn coordinate_slice(&self, offset: i32, count: i32) -> Result<CoordinateSlice<'a>> {
		let (start, count) = (non_negative("coordinate offset", offset)?, non_negative("coordinate count", count)?);
		let bytes = self.records("coordinate", self.coordinates, Coordinate::SIZE, start, count)?;
		Ok(CoordinateSlice::new(bytes))
	}

	/// Resolves string table entry `index` to its text in the character pool.
	pub fn string_at(&self, index: i32) -> Result<&'a str> {
		let start = non_negative("string index", index)?;
		let entry = StringEntry::from_slice(self.records("string", self.strings, StringEntry::SIZE, start, 1)?)?;
		let offset = non_negative("string offset", entry.offset)?;
		let length = non_negative("string length", entry.length)?;
		let bytes = self.records("character", self.characters, 1, offset, length)?;
		Ok(std::str::from_utf8(bytes).map_err(|_| FormatError::InvalidUtf8 { index: start as u32 })?)
	}

	/// Borrows `count` property entries starting at pool index `offset`.
	pub fn property_slice(&self, offset: i32, count: i32) -> Result<PropertySlice<'a>> {
		let (start, count) = (non_negative("property offset", offset)?, non_negative("property count", count)?);
		let bytes = self.records("property", self.properties, PropertyEntry::SIZE, start, count)?;
		Ok(PropertySlice::new(bytes))
	}

	/// Borrows records `start .. start + count` of the region `pool`.
	fn records(
		&self,
		region: &'static str,
		pool: ByteRange,
		record_size: u64,
		start: u64,
		count: u64,
	) -> Result<&'a [u8], FormatError> {
		let available = pool.length / record_size;
		let end = start + count;
		if end > available {
			return Err(FormatError::out_of_range(region, end, available));
		}
		let range = ByteRange::new(pool.offset + start * record_size, count * record_size);
		Ok(&self.data[range.as_range_usize()])
	}
}

impl fmt::Debug for TileBlock<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TileBlock")
			.field("length", &self.data.len())
			.field("header", &self.header)
			.field("property_list", &self.property_list)
			.finish()
	}
}

fn check_fits(region: &'static str, range: ByteRange, available: u64) -> Result<ByteRange, FormatError> {
	if range.fits_within(available) {
		Ok(range)
	} else {
		Err(FormatError::truncated(
			region,
			range.checked_end().unwrap_or(u64::MAX),
			available,
		))
	}
}

fn non_negative(region: &'static str, value: i32) -> Result<u64, FormatError> {
	u64::try_from(value).map_err(|_| FormatError::NegativeValue {
		region,
		value: i64::from(value),
	})
}

/// Iterator over the features of a [`TileBlock`], see [`TileBlock::features`].
#[derive(Clone, Debug)]
pub struct Features<'a> {
	block: TileBlock<'a>,
	next: u32,
	count: u32,
}

impl<'a> Iterator for Features<'a> {
	type Item = Result<Feature<'a>>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.next >= self.count {
			return None;
		}
		let index = self.next;
		self.next += 1;
		Some(self.block.feature_at(index))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = (self.count - self.next) as usize;
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for Features<'_> {}
