//! The closed vocabulary of property keys and values and their integer codes.
//!
//! Keys map one-to-one onto [`PropertyKey`]. Values are collapsed many-to-one onto rendering
//! classes ([`PropertyValue`]): every raw value that is drawn the same way shares one code, so
//! the original value text cannot be recovered from a code.
//!
//! The tables are part of the file format. Changing a code changes the meaning of existing files
//! even though their bytes stay well-formed, so any change needs a new
//! [`FORMAT_VERSION`](crate::FORMAT_VERSION).
//!
//! ```rust
//! use mapster_tiles::dictionary::{key_code_of, value_code_of};
//!
//! assert_eq!(key_code_of("highway"), 5);
//! assert_eq!(value_code_of("motorway"), value_code_of("trunk"));
//! assert_eq!(value_code_of("no-such-value"), -1);
//! ```

use crate::{FORMAT_VERSION, TagCode};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// The container version these tables belong to.
pub const DICTIONARY_VERSION: i64 = FORMAT_VERSION;

/// Code returned for keys and values outside the vocabulary.
pub const UNKNOWN_CODE: i32 = -1;

const KEY_TABLE: &[(&str, i32)] = &[
	("natural", 0),
	("place", 1),
	("boundary", 2),
	("admin_level", 3),
	("name", 4),
	("highway", 5),
	("water", 6),
	("railway", 7),
	("landuse", 8),
	("building", 9),
	("leisure", 10),
	("amenity", 11),
];

const VALUE_TABLE: &[(&str, i32)] = &[
	("fell", 0),
	("grassland", 0),
	("heath", 0),
	("moor", 0),
	("scrub", 0),
	("wetland", 0),
	("wood", 1),
	("tree_row", 1),
	("bare_rock", 2),
	("rock", 2),
	("scree", 2),
	("sand", 3),
	("beach", 3),
	("administrative", 4),
	("city", 5),
	("town", 5),
	("locality", 5),
	("hamlet", 5),
	("forest", 9),
	("orchard", 9),
	("military", 10),
	("quarry", 10),
	("brownfield", 10),
	("residential", 10),
	("cemetery", 10),
	("industrial", 10),
	("commercial", 10),
	("square", 10),
	("construction", 10),
	("farm", 11),
	("meadow", 11),
	("grass", 11),
	("greenfield", 11),
	("recreation_ground", 11),
	("winter_sports", 11),
	("allotments", 11),
	("reservoir", 12),
	("basin", 12),
	("2", 13),
	("motorway", 14),
	("trunk", 14),
	("primary", 14),
	("secondary", 14),
	("tertiary", 14),
	("unclassified", 14),
	("road", 14),
	("water", 15),
];

lazy_static! {
	static ref KEY_CODES: HashMap<&'static str, i32> = KEY_TABLE.iter().copied().collect();
	static ref VALUE_CODES: HashMap<&'static str, i32> = VALUE_TABLE.iter().copied().collect();
}

/// Returns the code of a tag key, or [`UNKNOWN_CODE`].
pub fn key_code_of(key: &str) -> i32 {
	KEY_CODES.get(key).copied().unwrap_or(UNKNOWN_CODE)
}

/// Returns the code of a tag value, or [`UNKNOWN_CODE`].
pub fn value_code_of(value: &str) -> i32 {
	VALUE_CODES.get(value).copied().unwrap_or(UNKNOWN_CODE)
}

/// [`key_code_of`] wrapped as a [`TagCode`].
pub fn key_tag(key: &str) -> TagCode {
	TagCode::new(key_code_of(key))
}

/// [`value_code_of`] wrapped as a [`TagCode`].
pub fn value_tag(value: &str) -> TagCode {
	TagCode::new(value_code_of(value))
}

/// Every known tag key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PropertyKey {
	Natural = 0,
	Place = 1,
	Boundary = 2,
	AdminLevel = 3,
	Name = 4,
	Highway = 5,
	Water = 6,
	Railway = 7,
	Landuse = 8,
	Building = 9,
	Leisure = 10,
	Amenity = 11,
}

impl PropertyKey {
	pub const ALL: [PropertyKey; 12] = [
		PropertyKey::Natural,
		PropertyKey::Place,
		PropertyKey::Boundary,
		PropertyKey::AdminLevel,
		PropertyKey::Name,
		PropertyKey::Highway,
		PropertyKey::Water,
		PropertyKey::Railway,
		PropertyKey::Landuse,
		PropertyKey::Building,
		PropertyKey::Leisure,
		PropertyKey::Amenity,
	];

	pub fn code(self) -> i32 {
		self as i32
	}

	pub fn from_code(code: i32) -> Option<PropertyKey> {
		usize::try_from(code).ok().and_then(|index| Self::ALL.get(index).copied())
	}

	pub fn from_tag(code: TagCode) -> Option<PropertyKey> {
		code.get().and_then(Self::from_code)
	}

	/// The tag key text, as used in OpenStreetMap.
	pub fn as_str(self) -> &'static str {
		KEY_TABLE[self as usize].0
	}
}

/// Rendering classes that tag values collapse into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PropertyValue {
	/// fell, grassland, heath, moor, scrub, wetland
	Grassland = 0,
	/// wood, tree_row
	Wood = 1,
	/// bare_rock, rock, scree
	Rock = 2,
	/// sand, beach
	Sand = 3,
	Administrative = 4,
	/// city, town, locality, hamlet
	Settlement = 5,
	/// forest, orchard
	Forest = 9,
	/// residential, industrial, commercial, military, quarry, ...
	Developed = 10,
	/// farm, meadow, grass, greenfield, allotments, ...
	Plain = 11,
	/// reservoir, basin
	Reservoir = 12,
	/// the value "2", used for national borders
	AdminLevelTwo = 13,
	/// motorway, trunk, primary, secondary, tertiary, unclassified, road
	MajorRoad = 14,
	Water = 15,
}

impl PropertyValue {
	pub fn code(self) -> i32 {
		self as i32
	}

	pub fn from_code(code: i32) -> Option<PropertyValue> {
		Some(match code {
			0 => PropertyValue::Grassland,
			1 => PropertyValue::Wood,
			2 => PropertyValue::Rock,
			3 => PropertyValue::Sand,
			4 => PropertyValue::Administrative,
			5 => PropertyValue::Settlement,
			9 => PropertyValue::Forest,
			10 => PropertyValue::Developed,
			11 => PropertyValue::Plain,
			12 => PropertyValue::Reservoir,
			13 => PropertyValue::AdminLevelTwo,
			14 => PropertyValue::MajorRoad,
			15 => PropertyValue::Water,
			_ => return None,
		})
	}

	pub fn from_tag(code: TagCode) -> Option<PropertyValue> {
		code.get().and_then(Self::from_code)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("natural", 0)]
	#[case("place", 1)]
	#[case("admin_level", 3)]
	#[case("highway", 5)]
	#[case("amenity", 11)]
	#[case("Highway", -1)]
	#[case("", -1)]
	#[case("surface", -1)]
	fn key_codes(#[case] key: &str, #[case] code: i32) {
		assert_eq!(key_code_of(key), code);
	}

	#[rstest]
	#[case("city", 5)]
	#[case("hamlet", 5)]
	#[case("water", 15)]
	#[case("2", 13)]
	#[case("residential", 10)]
	#[case("tree_row", 1)]
	#[case("footway", -1)]
	#[case("", -1)]
	fn value_codes(#[case] value: &str, #[case] code: i32) {
		assert_eq!(value_code_of(value), code);
	}

	#[test]
	fn values_collapse() {
		let road = value_code_of("motorway");
		for highway in ["trunk", "primary", "secondary", "tertiary", "unclassified", "road"] {
			assert_eq!(value_code_of(highway), road, "{highway}");
		}
		assert_eq!(PropertyValue::from_code(road), Some(PropertyValue::MajorRoad));
	}

	#[test]
	fn totality() {
		for text in ["\0", "ß", "natural ", " place", "🗺", &"x".repeat(10_000)] {
			assert_eq!(key_code_of(text), UNKNOWN_CODE);
			assert_eq!(value_code_of(text), UNKNOWN_CODE);
		}
		for (_, code) in KEY_TABLE.iter().chain(VALUE_TABLE) {
			assert!(*code >= 0);
		}
	}

	#[test]
	fn tables_are_consistent() {
		for (key, code) in KEY_TABLE {
			let property_key = PropertyKey::from_code(*code).unwrap();
			assert_eq!(property_key.code(), *code);
			assert_eq!(property_key.as_str(), *key);
		}
		for (value, code) in VALUE_TABLE {
			assert_eq!(PropertyValue::from_code(*code).map(|v| v.code()), Some(*code), "{value}");
		}
		assert_eq!(KEY_CODES.len(), KEY_TABLE.len());
		assert_eq!(VALUE_CODES.len(), VALUE_TABLE.len());
	}

	// The tables are part of FORMAT_VERSION 1. Update this only together with a version bump.
	#[test]
	fn tables_are_pinned() {
		assert_eq!(DICTIONARY_VERSION, 1);
		assert_eq!(KEY_TABLE.len(), 12);
		assert_eq!(VALUE_TABLE.len(), 47);
		let sum: i32 = VALUE_TABLE.iter().map(|(_, code)| code).sum();
		assert_eq!(sum, 373);
	}

	#[test]
	fn typed_views() {
		assert_eq!(PropertyKey::from_code(-1), None);
		assert_eq!(PropertyKey::from_code(12), None);
		assert_eq!(PropertyKey::from_tag(key_tag("place")), Some(PropertyKey::Place));
		assert_eq!(PropertyKey::AdminLevel.as_str(), "admin_level");
		assert_eq!(PropertyValue::from_code(6), None);
		assert_eq!(PropertyValue::from_tag(value_tag("unknown")), None);
		assert_eq!(PropertyValue::from_tag(value_tag("city")), Some(PropertyValue::Settlement));
	}
}
