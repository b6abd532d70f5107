//! Builds the bytes of one tile block from a list of [`SourceFeature`]s.
//!
//! ```rust
//! use mapster_tiles::{SourceFeature, TileBlock, TileBlockEncoder};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let feature = SourceFeature::point(1, 39.8, -89.6).with_label("Springfield");
//!     let blob = TileBlockEncoder::default().encode(&[feature])?;
//!
//!     let block = TileBlock::new(blob.as_slice())?;
//!     assert_eq!(block.feature_count(), 1);
//!     Ok(())
//! }
//! ```

use super::SourceFeature;
use crate::{
	Coordinate, FileByteOrder, FormatError, GeometryType, MapFeature, PropertyEntry, PropertyEntryList, Record,
	StringEntry, TileBlockHeader,
	dictionary::{key_code_of, value_code_of},
};
use anyhow::{Context, Result};
use log::trace;
use mapster_core::{
	Blob,
	io::{ValueWriter, ValueWriterBlob},
};
use std::collections::HashMap;

/// What to do with a tag whose key or value is outside the dictionary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownTagPolicy {
	/// Store the pair with `-1` in place of the unknown code.
	#[default]
	Keep,
	/// Leave the pair out.
	Drop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderOptions {
	pub unknown_tags: UnknownTagPolicy,
	/// Close open polygon rings by repeating the first coordinate.
	/// When disabled, an open ring is rejected.
	pub close_rings: bool,
}

impl Default for EncoderOptions {
	fn default() -> Self {
		EncoderOptions {
			unknown_tags: UnknownTagPolicy::Keep,
			close_rings: true,
		}
	}
}

/// Encodes tile blocks. Stateless apart from its options, so one encoder can be reused for every tile.
#[derive(Clone, Copy, Debug, Default)]
pub struct TileBlockEncoder {
	options: EncoderOptions,
}

impl TileBlockEncoder {
	pub fn new(options: EncoderOptions) -> Self {
		TileBlockEncoder { options }
	}

	pub fn options(&self) -> &EncoderOptions {
		&self.options
	}

	/// Encodes `features`, in order, into a single block.
	///
	/// Fails with [`FormatError::InvalidFeature`] if a feature has the wrong number of coordinates,
	/// an open ring while ring closing is disabled, or if a pool outgrows the `i32` counts.
	pub fn encode(&self, features: &[SourceFeature]) -> Result<Blob> {
		let mut pools = Pools::default();
		for feature in features {
			pools
				.add(feature, &self.options)
				.with_context(|| format!("encoding feature {}", feature.id))?;
		}
		let blob = pools.write()?;
		trace!(
			"encoded {} features, {} coordinates and {} strings into {} bytes",
			pools.features.len(),
			pools.coordinates.len(),
			pools.strings.len(),
			blob.len()
		);
		Ok(blob)
	}
}

/// The growing arrays of one block.
#[derive(Default)]
struct Pools<'a> {
	features: Vec<MapFeature>,
	coordinates: Vec<Coordinate>,
	strings: Vec<StringEntry>,
	characters: Vec<u8>,
	properties: Vec<PropertyEntry>,
	labels: HashMap<&'a str, i32>,
}

impl<'a> Pools<'a> {
	fn add(&mut self, feature: &'a SourceFeature, options: &EncoderOptions) -> Result<()> {
		check_coordinate_count(feature)?;

		let coordinate_offset = to_count(self.coordinates.len(), "coordinate pool")?;
		self.coordinates.extend_from_slice(&feature.coordinates);
		if feature.geometry_type == GeometryType::Polygon {
			let first = feature.coordinates[0];
			let last = feature.coordinates[feature.coordinates.len() - 1];
			if first != last {
				if !options.close_rings {
					return Err(invalid(format!("polygon ring of feature {} is not closed", feature.id)).into());
				}
				self.coordinates.push(first);
			}
		}
		let coordinate_count = to_count(self.coordinates.len(), "coordinate pool")? - coordinate_offset;

		let label_offset = match &feature.label {
			Some(label) => self.intern(label)?,
			None => MapFeature::NO_LABEL,
		};

		let properties_offset = to_count(self.properties.len(), "property pool")?;
		for (key, value) in &feature.tags {
			let entry = PropertyEntry::new(key_code_of(key), value_code_of(value));
			if !entry.is_known() && options.unknown_tags == UnknownTagPolicy::Drop {
				trace!("dropping unknown tag {key}={value} of feature {}", feature.id);
				continue;
			}
			self.properties.push(entry);
		}
		let property_count = to_count(self.properties.len(), "property pool")? - properties_offset;

		self.features.push(MapFeature {
			id: feature.id,
			label_offset,
			geometry_type: feature.geometry_type,
			coordinate_offset,
			coordinate_count,
			properties_offset,
			property_count,
		});
		to_count(self.features.len(), "feature records")?;
		Ok(())
	}

	/// Returns the string table index of `label`, appending it on first use.
	fn intern(&mut self, label: &'a str) -> Result<i32> {
		if let Some(index) = self.labels.get(label) {
			return Ok(*index);
		}
		let index = to_count(self.strings.len(), "string table")?;
		let offset = to_count(self.characters.len(), "character pool")?;
		let length = to_count(label.len(), "character pool")?;
		to_count(self.characters.len() + label.len(), "character pool")?;
		self.strings.push(StringEntry::new(offset, length));
		self.characters.extend_from_slice(label.as_bytes());
		self.labels.insert(label, index);
		Ok(index)
	}

	fn write(&self) -> Result<Blob> {
		let header_size = TileBlockHeader::SIZE;
		let coordinates_offset = header_size + self.features.len() as u64 * MapFeature::SIZE;
		let strings_offset = coordinates_offset + self.coordinates.len() as u64 * Coordinate::SIZE;
		let characters_offset = strings_offset + self.strings.len() as u64 * StringEntry::SIZE;
		let property_list_offset = characters_offset + self.characters.len() as u64;
		let properties_offset = property_list_offset + PropertyEntryList::SIZE;
		let total = properties_offset + self.properties.len() as u64 * PropertyEntry::SIZE;

		let header = TileBlockHeader {
			features_count: to_count(self.features.len(), "feature records")?,
			coordinates_count: to_count(self.coordinates.len(), "coordinate pool")?,
			string_count: to_count(self.strings.len(), "string table")?,
			characters_count: to_count(self.characters.len(), "character pool")?,
			coordinates_offset_in_bytes: coordinates_offset,
			strings_offset_in_bytes: strings_offset,
			characters_offset_in_bytes: characters_offset,
		};
		let property_list = PropertyEntryList::new(to_count(self.properties.len(), "property pool")?, properties_offset);

		let mut writer = ValueWriterBlob::<FileByteOrder>::with_capacity(total as usize);
		header.write(&mut writer)?;
		for feature in &self.features {
			feature.write(&mut writer)?;
		}
		for coordinate in &self.coordinates {
			coordinate.write(&mut writer)?;
		}
		for string in &self.strings {
			string.write(&mut writer)?;
		}
		writer.write_slice(&self.characters)?;
		property_list.write(&mut writer)?;
		for property in &self.properties {
			property.write(&mut writer)?;
		}

		let blob = writer.into_blob();
		debug_assert_eq!(blob.len(), total);
		Ok(blob)
	}
}

fn check_coordinate_count(feature: &SourceFeature) -> Result<(), FormatError> {
	let count = feature.coordinates.len();
	match feature.geometry_type {
		GeometryType::Point if count != 1 => Err(invalid(format!(
			"point feature {} needs exactly one coordinate, got {count}",
			feature.id
		))),
		GeometryType::Polyline | GeometryType::Polygon if count == 0 => Err(invalid(format!(
			"{} feature {} has no coordinates",
			feature.geometry_type, feature.id
		))),
		_ => Ok(()),
	}
}

fn to_count(len: usize, region: &str) -> Result<i32, FormatError> {
	i32::try_from(len).map_err(|_| invalid(format!("{region} exceeds {} entries", i32::MAX)))
}

fn invalid(message: String) -> FormatError {
	FormatError::InvalidFeature(message)
}
