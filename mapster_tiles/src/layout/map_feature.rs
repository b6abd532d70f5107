use super::{FileByteOrder, GeometryType, Record};
use anyhow::Result;
use mapster_core::io::{ValueReader, ValueReaderSlice, ValueWriter};

/// One renderable feature record, 29 bytes:
///
/// | field               | offset | size |
/// |---------------------|--------|------|
/// | `id`                | 0      | 8    |
/// | `label_offset`      | 8      | 4    |
/// | `geometry_type`     | 12     | 1    |
/// | `coordinate_offset` | 13     | 4    |
/// | `coordinate_count`  | 17     | 4    |
/// | `properties_offset` | 21     | 4    |
/// | `property_count`    | 25     | 4    |
///
/// `label_offset` indexes the string table (`-1` = no label), the two slices index the
/// tile's coordinate pool and property pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapFeature {
	pub id: i64,
	pub label_offset: i32,
	pub geometry_type: GeometryType,
	pub coordinate_offset: i32,
	pub coordinate_count: i32,
	pub properties_offset: i32,
	pub property_count: i32,
}

impl MapFeature {
	pub const OFFSET_ID: u64 = 0;
	pub const OFFSET_LABEL_OFFSET: u64 = 8;
	pub const OFFSET_GEOMETRY_TYPE: u64 = 12;
	pub const OFFSET_COORDINATE_OFFSET: u64 = 13;
	pub const OFFSET_COORDINATE_COUNT: u64 = 17;
	pub const OFFSET_PROPERTIES_OFFSET: u64 = 21;
	pub const OFFSET_PROPERTY_COUNT: u64 = 25;

	/// `label_offset` of a feature without label.
	pub const NO_LABEL: i32 = -1;

	// https://wiki.openstreetmap.org/wiki/Key:highway
	pub const HIGHWAY_TYPES: [&str; 8] = [
		"motorway",
		"trunk",
		"primary",
		"secondary",
		"tertiary",
		"unclassified",
		"residential",
		"road",
	];

	pub fn has_label(&self) -> bool {
		self.label_offset != Self::NO_LABEL
	}
}

impl Record for MapFeature {
	const SIZE: u64 = 29;

	fn read(reader: &mut ValueReaderSlice<'_, FileByteOrder>) -> Result<Self> {
		Ok(MapFeature {
			id: reader.read_i64()?,
			label_offset: reader.read_i32()?,
			geometry_type: GeometryType::from_u8(reader.read_u8()?)?,
			coordinate_offset: reader.read_i32()?,
			coordinate_count: reader.read_i32()?,
			properties_offset: reader.read_i32()?,
			property_count: reader.read_i32()?,
		})
	}

	fn write<W: ValueWriter<FileByteOrder> + ?Sized>(&self, writer: &mut W) -> Result<()> {
		writer.write_i64(self.id)?;
		writer.write_i32(self.label_offset)?;
		writer.write_u8(self.geometry_type.as_u8())?;
		writer.write_i32(self.coordinate_offset)?;
		writer.write_i32(self.coordinate_count)?;
		writer.write_i32(self.properties_offset)?;
		writer.write_i32(self.property_count)
	}
}

#[cfg(test)]
mod tests {
	use super::super::test_utils::to_bytes;
	use super::*;
	use crate::FormatError;

	fn sample() -> MapFeature {
		MapFeature {
			id: 0x0102_0304_0506_0708,
			label_offset: -1,
			geometry_type: GeometryType::Polygon,
			coordinate_offset: 7,
			coordinate_count: 5,
			properties_offset: 3,
			property_count: 2,
		}
	}

	#[test]
	fn layout() {
		let bytes = to_bytes(&sample());
		let at = |offset: u64| bytes[offset as usize];
		assert_eq!(&bytes[0..8], &[8, 7, 6, 5, 4, 3, 2, 1]);
		assert_eq!(&bytes[8..12], &[0xFF, 0xFF, 0xFF, 0xFF]);
		assert_eq!(at(MapFeature::OFFSET_GEOMETRY_TYPE), 1);
		assert_eq!(at(MapFeature::OFFSET_COORDINATE_OFFSET), 7);
		assert_eq!(at(MapFeature::OFFSET_COORDINATE_COUNT), 5);
		assert_eq!(at(MapFeature::OFFSET_PROPERTIES_OFFSET), 3);
		assert_eq!(at(MapFeature::OFFSET_PROPERTY_COUNT), 2);
	}

	#[test]
	fn conversion() -> Result<()> {
		let feature = sample();
		let decoded = MapFeature::from_slice(&to_bytes(&feature))?;
		assert_eq!(decoded, feature);
		assert!(!decoded.has_label());
		Ok(())
	}

	#[test]
	fn invalid_geometry_type() {
		let mut bytes = to_bytes(&sample());
		bytes[MapFeature::OFFSET_GEOMETRY_TYPE as usize] = 9;
		let err = MapFeature::from_slice(&bytes).unwrap_err();
		assert_eq!(err.downcast_ref::<FormatError>(), Some(&FormatError::InvalidGeometryType(9)));
	}

	#[test]
	fn highway_types() {
		assert!(MapFeature::HIGHWAY_TYPES.contains(&"motorway"));
		assert_eq!(MapFeature::HIGHWAY_TYPES.len(), 8);
	}
}
