use crate::FormatError;
use anyhow::{Result, bail};
use std::{fmt, str::FromStr};

/// How the coordinates of a feature are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GeometryType {
	/// An open line through all coordinates.
	Polyline = 0,
	/// A closed ring, first and last coordinate coincide.
	Polygon = 1,
	/// A single coordinate.
	Point = 2,
}

impl GeometryType {
	pub fn as_u8(self) -> u8 {
		self as u8
	}

	pub fn from_u8(value: u8) -> Result<Self, FormatError> {
		match value {
			0 => Ok(GeometryType::Polyline),
			1 => Ok(GeometryType::Polygon),
			2 => Ok(GeometryType::Point),
			other => Err(FormatError::InvalidGeometryType(other)),
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			GeometryType::Polyline => "polyline",
			GeometryType::Polygon => "polygon",
			GeometryType::Point => "point",
		}
	}
}

impl FromStr for GeometryType {
	type Err = anyhow::Error;

	fn from_str(value: &str) -> Result<Self> {
		Ok(match value.to_ascii_lowercase().as_str() {
			"polyline" | "line" | "linestring" => GeometryType::Polyline,
			"polygon" => GeometryType::Polygon,
			"point" => GeometryType::Point,
			_ => bail!("unknown geometry type '{value}'"),
		})
	}
}

impl fmt::Display for GeometryType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
