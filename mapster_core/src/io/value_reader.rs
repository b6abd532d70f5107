//! This module defines the `ValueReader` trait for reading fixed-width values from a byte source.
//!
//! Implementations choose the byte order through the `E: ByteOrder` parameter.
//!
//! ```rust
//! use mapster_core::io::{ValueReader, ValueReaderSlice};
//!
//! let mut reader = ValueReaderSlice::new_le(&[0x01, 0x02, 0x03, 0x04]);
//! assert_eq!(reader.read_i32().unwrap(), 0x04030201);
//! ```

use anyhow::Result;
use byteorder::{ByteOrder, ReadBytesExt};
use std::io::Read;

/// A trait for reading fixed-width values in the byte order `E`.
pub trait ValueReader<'a, E: ByteOrder + 'a> {
	/// Returns the underlying reader to access raw bytes.
	fn get_reader(&mut self) -> &mut dyn Read;

	/// Returns the total length of the readable data.
	fn len(&self) -> u64;

	/// Checks if there is no data to read.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn read_u8(&mut self) -> Result<u8> {
		Ok(self.get_reader().read_u8()?)
	}

	fn read_i32(&mut self) -> Result<i32> {
		Ok(self.get_reader().read_i32::<E>()?)
	}

	fn read_i64(&mut self) -> Result<i64> {
		Ok(self.get_reader().read_i64::<E>()?)
	}

	fn read_u64(&mut self) -> Result<u64> {
		Ok(self.get_reader().read_u64::<E>()?)
	}

	fn read_f64(&mut self) -> Result<f64> {
		Ok(self.get_reader().read_f64::<E>()?)
	}
}

#[cfg(test)]
mod tests {
	use super::super::ValueReaderSlice;
	use super::*;

	#[test]
	fn is_empty() {
		assert!(ValueReaderSlice::new_le(&[]).is_empty());
		assert!(!ValueReaderSlice::new_le(&[0]).is_empty());
	}

	#[test]
	fn read_f64() {
		let mut reader = ValueReaderSlice::new_le(&[0, 0, 0, 0, 0, 0, 0xF0, 0x3F]);
		assert_eq!(reader.read_f64().unwrap(), 1.0);
	}

	#[test]
	fn read_signed() {
		let mut reader = ValueReaderSlice::new_le(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
		assert_eq!(reader.read_i32().unwrap(), -1);
		assert_eq!(reader.read_i64().unwrap(), -2);
	}

	#[test]
	fn read_unsigned() {
		let mut reader = ValueReaderSlice::new_le(&[7, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
		assert_eq!(reader.read_u8().unwrap(), 7);
		assert_eq!(reader.read_u64().unwrap(), u64::MAX);
	}

	#[test]
	fn read_past_end_fails() {
		let mut reader = ValueReaderSlice::new_le(&[1, 2, 3]);
		assert!(reader.read_i32().is_err());
	}
}
