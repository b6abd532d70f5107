use super::{FileByteOrder, Record};
use anyhow::Result;
use byteorder::ByteOrder;
use mapster_core::io::{ValueReader, ValueReaderSlice, ValueWriter};
use std::fmt;

/// A point in degrees: `Latitude` (0:8, f64), `Longitude` (8:8, f64).
///
/// Equality is exact IEEE comparison, so `-0.0` equals `0.0`.
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Coordinate {
	pub latitude: f64,
	pub longitude: f64,
}

impl Coordinate {
	pub const OFFSET_LATITUDE: u64 = 0;
	pub const OFFSET_LONGITUDE: u64 = 8;

	pub fn new(latitude: f64, longitude: f64) -> Self {
		Coordinate { latitude, longitude }
	}

	/// Decodes a coordinate from exactly [`Coordinate::SIZE`] bytes.
	pub(crate) fn decode(bytes: &[u8]) -> Self {
		Coordinate {
			latitude: FileByteOrder::read_f64(&bytes[0..8]),
			longitude: FileByteOrder::read_f64(&bytes[8..16]),
		}
	}
}

impl Record for Coordinate {
	const SIZE: u64 = 16;

	fn read(reader: &mut ValueReaderSlice<'_, FileByteOrder>) -> Result<Self> {
		Ok(Coordinate {
			latitude: reader.read_f64()?,
			longitude: reader.read_f64()?,
		})
	}

	fn write<W: ValueWriter<FileByteOrder> + ?Sized>(&self, writer: &mut W) -> Result<()> {
		writer.write_f64(self.latitude)?;
		writer.write_f64(self.longitude)
	}
}

impl fmt::Debug for Coordinate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.latitude, self.longitude)
	}
}

impl From<(f64, f64)> for Coordinate {
	fn from((latitude, longitude): (f64, f64)) -> Self {
		Coordinate::new(latitude, longitude)
	}
}
