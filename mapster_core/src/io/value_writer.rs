//! The `ValueWriter` trait writes fixed-width values in the byte order `E`.
//!
//! Implementations only provide the underlying [`std::io::Write`] and the current position.
//!
//! ```rust
//! use mapster_core::io::{ValueWriter, ValueWriterBlob};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ValueWriterBlob::new_le();
//!     writer.write_i32(-1)?;
//!     writer.write_u8(7)?;
//!     assert_eq!(writer.into_blob().into_vec(), vec![0xFF, 0xFF, 0xFF, 0xFF, 7]);
//!     Ok(())
//! }
//! ```

use crate::Blob;
use anyhow::Result;
use byteorder::{ByteOrder, WriteBytesExt};
use std::io::Write;

pub trait ValueWriter<E: ByteOrder> {
	fn get_writer(&mut self) -> &mut dyn Write;

	/// Returns the number of bytes written so far.
	fn position(&mut self) -> Result<u64>;

	fn is_empty(&mut self) -> Result<bool> {
		Ok(self.position()? == 0)
	}

	fn write_u8(&mut self, value: u8) -> Result<()> {
		Ok(self.get_writer().write_u8(value)?)
	}

	fn write_i32(&mut self, value: i32) -> Result<()> {
		Ok(self.get_writer().write_i32::<E>(value)?)
	}

	fn write_i64(&mut self, value: i64) -> Result<()> {
		Ok(self.get_writer().write_i64::<E>(value)?)
	}

	fn write_u64(&mut self, value: u64) -> Result<()> {
		Ok(self.get_writer().write_u64::<E>(value)?)
	}

	fn write_f64(&mut self, value: f64) -> Result<()> {
		Ok(self.get_writer().write_f64::<E>(value)?)
	}

	fn write_blob(&mut self, blob: &Blob) -> Result<()> {
		self.write_slice(blob.as_slice())
	}

	/// Writes raw bytes without a length prefix.
	fn write_slice(&mut self, buf: &[u8]) -> Result<()> {
		self.get_writer().write_all(buf)?;
		Ok(())
	}
}
