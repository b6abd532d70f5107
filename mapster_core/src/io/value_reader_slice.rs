//! `ValueReaderSlice` reads values from a borrowed byte slice, such as a memory-mapped container.
//!
//! ```rust
//! use mapster_core::io::{ValueReader, ValueReaderSlice};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut reader = ValueReaderSlice::new_le(&[0x2A, 0, 0, 0, 1]);
//!     assert_eq!(reader.read_i32()?, 42);
//!     assert_eq!(reader.read_u8()?, 1);
//!     Ok(())
//! }
//! ```

use super::ValueReader;
use byteorder::{ByteOrder, LittleEndian};
use std::{
	io::{Cursor, Read},
	marker::PhantomData,
};

/// Reads from a byte slice using the byte order `E`.
pub struct ValueReaderSlice<'a, E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<&'a [u8]>,
}

impl<'a, E: ByteOrder> ValueReaderSlice<'a, E> {
	#[must_use]
	pub fn new(slice: &'a [u8]) -> ValueReaderSlice<'a, E> {
		ValueReaderSlice {
			_phantom: PhantomData,
			cursor: Cursor::new(slice),
		}
	}
}

impl<'a> ValueReaderSlice<'a, LittleEndian> {
	#[must_use]
	pub fn new_le(slice: &'a [u8]) -> ValueReaderSlice<'a, LittleEndian> {
		ValueReaderSlice::new(slice)
	}
}

impl<'a, E: ByteOrder + 'a> ValueReader<'a, E> for ValueReaderSlice<'a, E> {
	fn get_reader(&mut self) -> &mut dyn Read {
		&mut self.cursor
	}

	fn len(&self) -> u64 {
		self.cursor.get_ref().len() as u64
	}
}
