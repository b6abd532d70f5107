//! Read-only memory mapping of a file.
//!
//! `MappedFile` acquires the whole file as one contiguous byte slice when it is opened and
//! releases the mapping when it is dropped, on every exit path. Any number of threads may
//! read the mapped bytes concurrently.
//!
//! # Examples
//!
//! ```rust
//! use mapster_core::io::MappedFile;
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let path = std::env::temp_dir().join("mapster_mapped_file_doc.bin");
//!     std::fs::write(&path, b"mapped")?;
//!
//!     let mapped = MappedFile::open(&path)?;
//!     assert_eq!(mapped.as_slice(), b"mapped");
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result, ensure};
use log::debug;
use memmap2::Mmap;
use std::{
	fmt,
	fs::File,
	path::{Path, PathBuf},
};

/// A file mapped read-only into memory.
pub struct MappedFile {
	path: PathBuf,
	// `None` for empty files, which cannot be mapped on every platform.
	mmap: Option<Mmap>,
}

impl MappedFile {
	/// Maps the file at `path` read-only.
	///
	/// # Errors
	///
	/// Returns an error if the path does not exist, is not a regular file, or cannot be mapped.
	pub fn open(path: &Path) -> Result<MappedFile> {
		ensure!(path.exists(), "file {path:?} does not exist");
		ensure!(path.is_file(), "path {path:?} must be a file");

		let file = File::open(path).with_context(|| format!("failed to open {path:?}"))?;
		let size = file.metadata()?.len();

		let mmap = if size == 0 {
			None
		} else {
			// SAFETY: the container is immutable once written; callers must not modify the file while it is mapped.
			let mmap = unsafe { Mmap::map(&file) }.with_context(|| format!("failed to map {path:?}"))?;
			Some(mmap)
		};
		debug!("mapped {path:?} ({size} bytes)");

		Ok(MappedFile {
			path: path.to_path_buf(),
			mmap,
		})
	}

	/// Returns the mapped bytes.
	pub fn as_slice(&self) -> &[u8] {
		self.mmap.as_deref().unwrap_or(&[])
	}

	/// Returns the number of mapped bytes.
	pub fn len(&self) -> u64 {
		self.as_slice().len() as u64
	}

	/// Returns `true` if the mapped file is empty.
	pub fn is_empty(&self) -> bool {
		self.as_slice().is_empty()
	}

	/// Returns the path of the mapped file.
	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl AsRef<[u8]> for MappedFile {
	fn as_ref(&self) -> &[u8] {
		self.as_slice()
	}
}

impl fmt::Debug for MappedFile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MappedFile")
			.field("path", &self.path)
			.field("len", &self.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::TempDir;

	#[test]
	fn maps_file_contents() -> Result<()> {
		let dir = TempDir::new()?;
		let path = dir.path().join("tiles.bin");
		std::fs::write(&path, [1u8, 2, 3, 4, 5])?;

		let mapped = MappedFile::open(&path)?;
		assert_eq!(mapped.len(), 5);
		assert_eq!(mapped.as_slice(), &[1, 2, 3, 4, 5]);
		assert_eq!(mapped.path(), path.as_path());
		Ok(())
	}

	#[test]
	fn maps_empty_file() -> Result<()> {
		let dir = TempDir::new()?;
		let path = dir.path().join("empty.bin");
		std::fs::write(&path, [])?;

		let mapped = MappedFile::open(&path)?;
		assert!(mapped.is_empty());
		Ok(())
	}

	#[test]
	fn rejects_missing_file_and_directories() -> Result<()> {
		let dir = TempDir::new()?;
		assert!(MappedFile::open(&dir.path().join("missing.bin")).is_err());
		assert!(MappedFile::open(dir.path()).is_err());
		Ok(())
	}
}
