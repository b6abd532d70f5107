//! The JSON source format read by `mapster build`.
//!
//! ```json
//! {
//!   "tiles": [
//!     {
//!       "id": 3,
//!       "features": [
//!         {
//!           "id": 1,
//!           "geometry": "point",
//!           "coordinates": [[39.8, -89.6]],
//!           "label": "Springfield",
//!           "tags": [["place", "city"]]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Coordinates are `[latitude, longitude]` pairs.

use anyhow::{Context, Result};
use mapster_tiles::{Coordinate, GeometryType, SourceFeature};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceDocument {
	pub tiles: Vec<SourceTile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceTile {
	pub id: i32,
	#[serde(default)]
	pub features: Vec<JsonFeature>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonFeature {
	pub id: i64,
	pub geometry: String,
	pub coordinates: Vec<[f64; 2]>,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub tags: Vec<(String, String)>,
}

impl SourceDocument {
	pub fn from_path(path: &Path) -> Result<SourceDocument> {
		let text = fs::read_to_string(path).with_context(|| format!("failed to read {path:?}"))?;
		Self::from_json(&text).with_context(|| format!("failed to parse {path:?}"))
	}

	pub fn from_json(text: &str) -> Result<SourceDocument> {
		Ok(serde_json::from_str(text)?)
	}
}

impl SourceTile {
	pub fn source_features(&self) -> Result<Vec<SourceFeature>> {
		self.features.iter().map(JsonFeature::to_source_feature).collect()
	}
}

impl JsonFeature {
	pub fn to_source_feature(&self) -> Result<SourceFeature> {
		let geometry_type: GeometryType = self
			.geometry
			.parse()
			.with_context(|| format!("feature {}", self.id))?;
		Ok(SourceFeature {
			id: self.id,
			geometry_type,
			coordinates: self
				.coordinates
				.iter()
				.map(|[latitude, longitude]| Coordinate::new(*latitude, *longitude))
				.collect(),
			label: self.label.clone(),
			tags: self.tags.clone(),
		})
	}
}
