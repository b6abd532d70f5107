//! This module provides the `ValueWriterFile` struct for writing values to a file through a buffer.
//!
//! # Examples
//!
//! ```rust
//! use mapster_core::io::{ValueWriter, ValueWriterFile};
//! use anyhow::Result;
//! use std::fs::File;
//!
//! fn main() -> Result<()> {
//!     let path = std::env::temp_dir().join("mapster_value_writer_doc.bin");
//!     let mut writer = ValueWriterFile::new_le(File::create(&path)?);
//!     writer.write_i64(1)?;
//!     writer.flush()?;
//!     assert_eq!(std::fs::read(&path)?.len(), 8);
//!     Ok(())
//! }
//! ```

use super::ValueWriter;
use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::marker::PhantomData;

/// A struct that provides buffered writing capabilities to a file using a specified byte order.
pub struct ValueWriterFile<E: ByteOrder> {
	_phantom: PhantomData<E>,
	writer: BufWriter<File>,
}

impl<E: ByteOrder> ValueWriterFile<E> {
	/// Creates a new `ValueWriterFile` instance from a `File`.
	#[must_use]
	pub fn new(file: File) -> ValueWriterFile<E> {
		ValueWriterFile {
			_phantom: PhantomData,
			writer: BufWriter::new(file),
		}
	}

	/// Flushes buffered bytes to the file.
	pub fn flush(&mut self) -> Result<()> {
		self.writer.flush()?;
		Ok(())
	}
}

impl ValueWriterFile<LittleEndian> {
	/// Creates a new `ValueWriterFile` with little-endian byte order.
	#[must_use]
	pub fn new_le(file: File) -> ValueWriterFile<LittleEndian> {
		ValueWriterFile::new(file)
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterFile<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.writer
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.writer.stream_position()?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::NamedTempFile;

	#[test]
	fn write_and_position() -> Result<()> {
		let file = NamedTempFile::new("values.bin")?;
		let mut writer = ValueWriterFile::new_le(File::create(file.path())?);
		writer.write_i32(-1)?;
		writer.write_f64(2.0)?;
		assert_eq!(writer.position()?, 12);
		writer.flush()?;

		let bytes = std::fs::read(file.path())?;
		assert_eq!(bytes.len(), 12);
		assert_eq!(&bytes[0..4], &[0xFF, 0xFF, 0xFF, 0xFF]);
		assert_eq!(&bytes[4..12], &[0, 0, 0, 0, 0, 0, 0, 0x40]);
		Ok(())
	}
}
