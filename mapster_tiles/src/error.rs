//! Structural errors of the tile container format.
//!
//! All public operations return [`anyhow::Result`]; whenever the failure is caused by malformed
//! bytes or invalid encoder input, the root cause is a [`FormatError`] that callers can recover
//! with `err.downcast_ref::<FormatError>()`.
//!
//! An unknown tag is not an error: it is stored and decoded as the `-1` sentinel,
//! see [`crate::TagCode`].

use thiserror::Error;

/// A structural violation detected while encoding or decoding a container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
	/// The file header carries a version this reader does not understand.
	#[error("unsupported container version {0}")]
	UnsupportedVersion(i64),

	/// Declared counts or offsets need more bytes than the buffer holds.
	#[error("truncated {region}: need {needed} bytes, but only {available} are available")]
	TruncatedFile {
		region: &'static str,
		needed: u64,
		available: u64,
	},

	/// A requested index or slice exceeds the declared count of its region.
	#[error("{region} index {requested} is out of range, the region holds {available} entries")]
	OutOfRange {
		region: &'static str,
		requested: u64,
		available: u64,
	},

	/// A count or offset field holds a negative value.
	#[error("{region} holds the negative value {value}")]
	NegativeValue { region: &'static str, value: i64 },

	/// A feature record carries a geometry type byte outside the known set.
	#[error("invalid geometry type {0}")]
	InvalidGeometryType(u8),

	/// A string entry does not point at valid UTF-8.
	#[error("string {index} is not valid UTF-8")]
	InvalidUtf8 { index: u32 },

	/// The encoder was given a feature that violates the format invariants.
	#[error("invalid feature: {0}")]
	InvalidFeature(String),

	/// The same tile id was added to a container twice.
	#[error("duplicate tile id {0}")]
	DuplicateTile(i32),
}

impl FormatError {
	pub(crate) fn truncated(region: &'static str, needed: u64, available: u64) -> Self {
		FormatError::TruncatedFile {
			region,
			needed,
			available,
		}
	}

	/// `requested` is the first index past the end of the requested range.
	pub(crate) fn out_of_range(region: &'static str, requested: u64, available: u64) -> Self {
		FormatError::OutOfRange {
			region,
			requested,
			available,
		}
	}
}
