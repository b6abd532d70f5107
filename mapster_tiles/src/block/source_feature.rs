use crate::{Coordinate, GeometryType};

/// A feature as handed to the encoder, before pooling and tag compaction.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceFeature {
	pub id: i64,
	pub geometry_type: GeometryType,
	pub coordinates: Vec<Coordinate>,
	pub label: Option<String>,
	/// `(key, value)` tag pairs in their original spelling.
	pub tags: Vec<(String, String)>,
}

impl SourceFeature {
	pub fn new(id: i64, geometry_type: GeometryType, coordinates: Vec<Coordinate>) -> Self {
		SourceFeature {
			id,
			geometry_type,
			coordinates,
			label: None,
			tags: Vec::new(),
		}
	}

	pub fn point(id: i64, latitude: f64, longitude: f64) -> Self {
		Self::new(id, GeometryType::Point, vec![Coordinate::new(latitude, longitude)])
	}

	pub fn with_label(mut self, label: &str) -> Self {
		self.label = Some(label.to_string());
		self
	}

	pub fn with_tag(mut self, key: &str, value: &str) -> Self {
		self.tags.push((key.to_string(), value.to_string()));
		self
	}
}
