//! [`Blob`] is an owned byte buffer holding an encoded tile block or a whole container.
//!
//! ```rust
//! use mapster_core::Blob;
//!
//! let blob = Blob::from(vec![0, 1, 2, 3, 4, 5, 6, 7]);
//! assert_eq!(blob.len(), 8);
//! assert_eq!(blob.range(2..5), &[2, 3, 4]);
//! ```

use std::fmt::{self, Debug};
use std::ops::Range;

#[derive(Clone, PartialEq, Eq, Default)]
pub struct Blob(Vec<u8>);

impl Blob {
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	/// Returns the bytes in `range`.
	///
	/// # Panics
	///
	/// Panics if the range is out of bounds.
	#[must_use]
	pub fn range(&self, range: Range<usize>) -> &[u8] {
		&self.0[range]
	}

	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		self.0.as_ref()
	}

	pub fn as_mut_slice(&mut self) -> &mut [u8] {
		self.0.as_mut()
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl AsRef<[u8]> for Blob {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let shown = &self.0[..self.0.len().min(32)];
		write!(f, "Blob({}):", self.0.len())?;
		for byte in shown {
			write!(f, " {byte:02x}")?;
		}
		if shown.len() < self.0.len() {
			write!(f, " ...")?;
		}
		Ok(())
	}
}
