//! A memory-mappable binary container for vector map tiles.
//!
//! A container file holds a small header, an index of tiles sorted by id and one self-contained
//! block per tile. Each block stores the tile's features together with pooled coordinates, labels
//! and dictionary-compacted tags. Readers work directly on the file bytes, usually a
//! [`mapster_core::io::MappedFile`], and never copy or mutate them.
//!
//! ```rust
//! use mapster_tiles::{Container, ContainerWriter, FORMAT_VERSION, GeometryType, SourceFeature};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut writer = ContainerWriter::new(FORMAT_VERSION)?;
//!     writer.add_tile(
//!         3,
//!         &[SourceFeature::point(1, 39.8, -89.6)
//!             .with_label("Springfield")
//!             .with_tag("place", "city")],
//!     )?;
//!     let blob = writer.finish_blob()?;
//!
//!     let container = Container::open(blob.as_slice())?;
//!     let tile = container.find_tile(3)?.expect("tile 3 exists");
//!     for feature in tile.features() {
//!         let feature = feature?;
//!         assert_eq!(feature.geometry_type(), GeometryType::Point);
//!         assert_eq!(feature.label()?, Some("Springfield"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod block;
pub mod container;
pub mod dictionary;
mod error;
pub mod feature;
pub mod layout;

pub use block::*;
pub use container::*;
pub use error::FormatError;
pub use feature::*;
pub use layout::*;
