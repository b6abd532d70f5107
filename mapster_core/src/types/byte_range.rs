//! This module provides the `ByteRange` struct, which represents a range of bytes with an offset and length.
//!
//! # Examples
//!
//! ```rust
//! use mapster_core::ByteRange;
//!
//! let range = ByteRange::new(12, 40);
//! assert_eq!(range.end(), 52);
//! assert_eq!(range.as_range_usize(), 12..52);
//! ```

use std::fmt;
use std::ops::Range;

/// A struct representing a range of bytes with an offset and length.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct ByteRange {
	/// The starting offset of the byte range.
	pub offset: u64,
	/// The length of the byte range.
	pub length: u64,
}

impl ByteRange {
	/// Creates a new `ByteRange` with the specified offset and length.
	pub fn new(offset: u64, length: u64) -> Self {
		Self { offset, length }
	}

	/// Creates a `ByteRange` spanning `start..end`.
	///
	/// Returns `None` if `end` lies before `start`.
	pub fn from_bounds(start: u64, end: u64) -> Option<Self> {
		end.checked_sub(start).map(|length| Self::new(start, length))
	}

	/// Returns the exclusive end offset, or `None` if it overflows `u64`.
	pub fn checked_end(&self) -> Option<u64> {
		self.offset.checked_add(self.length)
	}

	/// Returns the exclusive end offset.
	///
	/// # Panics
	///
	/// Panics on overflow, use [`ByteRange::checked_end`] for untrusted values.
	pub fn end(&self) -> u64 {
		self.offset + self.length
	}

	/// Returns `true` if the range lies completely inside `0..len`.
	pub fn fits_within(&self, len: u64) -> bool {
		self.checked_end().is_some_and(|end| end <= len)
	}

	/// Converts the `ByteRange` to a `Range<usize>`.
	pub fn as_range_usize(&self) -> Range<usize> {
		Range {
			start: self.offset as usize,
			end: (self.offset + self.length) as usize,
		}
	}
}

impl fmt::Debug for ByteRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ByteRange[{},{}]", self.offset, self.length)
	}
}
