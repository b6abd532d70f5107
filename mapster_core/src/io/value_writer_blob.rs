//! This module provides the `ValueWriterBlob` struct for writing values to an in-memory [`Blob`].

use super::ValueWriter;
use crate::types::Blob;
use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use std::io::{Cursor, Write};
use std::marker::PhantomData;

/// A struct that provides writing capabilities to an in-memory blob using a specified byte order.
pub struct ValueWriterBlob<E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<Vec<u8>>,
}

impl<E: ByteOrder> ValueWriterBlob<E> {
	/// Creates a new, empty `ValueWriterBlob`.
	pub fn new() -> ValueWriterBlob<E> {
		ValueWriterBlob {
			_phantom: PhantomData,
			cursor: Cursor::new(Vec::new()),
		}
	}

	/// Creates a new `ValueWriterBlob` with room for `capacity` bytes.
	pub fn with_capacity(capacity: usize) -> ValueWriterBlob<E> {
		ValueWriterBlob {
			_phantom: PhantomData,
			cursor: Cursor::new(Vec::with_capacity(capacity)),
		}
	}

	/// Converts the written data into a `Blob`.
	pub fn into_blob(self) -> Blob {
		Blob::from(self.cursor.into_inner())
	}
}

impl ValueWriterBlob<LittleEndian> {
	/// Creates a new `ValueWriterBlob` with little-endian byte order.
	pub fn new_le() -> ValueWriterBlob<LittleEndian> {
		ValueWriterBlob::new()
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterBlob<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.cursor
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.cursor.position())
	}
}

impl<E: ByteOrder> Default for ValueWriterBlob<E> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn little_endian() -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_i32(1)?;
		assert_eq!(writer.into_blob().into_vec(), vec![1, 0, 0, 0]);
		Ok(())
	}

	#[test]
	fn big_endian() -> Result<()> {
		let mut writer = ValueWriterBlob::<byteorder::BigEndian>::new();
		writer.write_i32(1)?;
		assert_eq!(writer.into_blob().into_vec(), vec![0, 0, 0, 1]);
		Ok(())
	}

	#[test]
	fn position_tracks_writes() -> Result<()> {
		let mut writer = ValueWriterBlob::<LittleEndian>::with_capacity(64);
		assert!(writer.is_empty()?);
		writer.write_f64(0.5)?;
		writer.write_slice(b"abc")?;
		assert_eq!(writer.position()?, 11);
		assert_eq!(writer.into_blob().len(), 11);
		Ok(())
	}
}
