//! Integration tests that write containers and read them back.

use anyhow::Result;
use mapster_core::io::MappedFile;
use mapster_tiles::{
	dictionary::{PropertyKey, PropertyValue, key_code_of, value_code_of},
	*,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// A decoded feature in owned form, for comparisons.
#[derive(Debug, PartialEq)]
struct Decoded {
	id: i64,
	geometry_type: GeometryType,
	coordinates: Vec<Coordinate>,
	label: Option<String>,
	properties: Vec<(i32, i32)>,
}

fn decode_tile(block: &TileBlock) -> Result<Vec<Decoded>> {
	block
		.features()
		.map(|feature| {
			let feature = feature?;
			Ok(Decoded {
				id: feature.id(),
				geometry_type: feature.geometry_type(),
				coordinates: feature.coordinates()?.to_vec(),
				label: feature.label()?.map(str::to_string),
				properties: feature.properties()?.iter().map(|p| (p.key.raw(), p.value.raw())).collect(),
			})
		})
		.collect()
}

fn coordinates(pairs: &[(f64, f64)]) -> Vec<Coordinate> {
	pairs.iter().copied().map(Coordinate::from).collect()
}

#[test]
fn springfield_point() -> Result<()> {
	let mut writer = ContainerWriter::new(FORMAT_VERSION)?;
	writer.add_tile(
		1,
		&[SourceFeature::point(100, 39.8017, -89.6436)
			.with_label("Springfield")
			.with_tag("place", "city")],
	)?;
	let blob = writer.finish_blob()?;

	let container = Container::open(blob.as_slice())?;
	let tile = container.find_tile(1)?.unwrap();
	let feature = tile.feature_at(0)?;
	assert_eq!(feature.geometry_type(), GeometryType::Point);
	assert_eq!(feature.coordinates()?.len(), 1);
	assert_eq!(feature.label()?, Some("Springfield"));

	let properties = feature.properties()?;
	assert_eq!(properties.len(), 1);
	let pair = properties.get(0).unwrap();
	assert_eq!((pair.key.raw(), pair.value.raw()), (1, 5));
	assert_eq!(PropertyKey::from_tag(pair.key), Some(PropertyKey::Place));
	assert_eq!(PropertyValue::from_tag(pair.value), Some(PropertyValue::Settlement));
	Ok(())
}

#[test]
fn tile_lookup() -> Result<()> {
	let mut writer = ContainerWriter::new(FORMAT_VERSION)?;
	for id in [42, 7, 3] {
		writer.add_tile(id, &[SourceFeature::point(i64::from(id), 0.0, 0.0)])?;
	}
	let blob = writer.finish_blob()?;
	let container = Container::open(blob.as_slice())?;

	let entries: Vec<TileIndexEntry> = container.entries().collect();
	assert!(entries.windows(2).all(|pair| pair[0].id < pair[1].id));

	let range = container.tile_range(7)?.unwrap();
	assert_eq!(range.offset, entries[1].offset_in_bytes);
	assert_eq!(range.end(), entries[2].offset_in_bytes);

	let tile = container.find_tile(7)?.unwrap();
	assert_eq!(tile.as_slice(), &blob.as_slice()[range.as_range_usize()]);
	assert_eq!(tile.feature_record(0)?.id, 7);

	assert!(container.find_tile(99)?.is_none());
	Ok(())
}

#[test]
fn polygon_ring_is_closed() -> Result<()> {
	let open_ring = coordinates(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (1.0, -1.0)]);
	let mut writer = ContainerWriter::new(FORMAT_VERSION)?;
	writer.add_tile(0, &[SourceFeature::new(1, GeometryType::Polygon, open_ring.clone())])?;
	let blob = writer.finish_blob()?;

	let container = Container::open(blob.as_slice())?;
	let feature = container.find_tile(0)?.unwrap().feature_at(0)?;
	let stored = feature.coordinates()?;
	assert_eq!(stored.len(), 6);
	assert_eq!(stored.first(), stored.last());
	assert_eq!(stored.iter().take(5).collect::<Vec<_>>(), open_ring);
	Ok(())
}

#[test]
fn mixed_tile_round_trip() -> Result<()> {
	let river = coordinates(&[(52.0, 13.0), (52.1, 13.2), (52.3, 13.1)]);
	let park = coordinates(&[(52.5, 13.3), (52.5, 13.4), (52.6, 13.4), (52.5, 13.3)]);
	let features = vec![
		SourceFeature::new(1, GeometryType::Polyline, river.clone())
			.with_label("Spree")
			.with_tag("water", "river"),
		SourceFeature::new(2, GeometryType::Polygon, park.clone())
			.with_label("Tiergarten")
			.with_tag("leisure", "recreation_ground")
			.with_tag("landuse", "grass"),
		SourceFeature::point(3, 52.52, 13.40)
			.with_label("Berlin")
			.with_tag("place", "city")
			.with_tag("admin_level", "2"),
		SourceFeature::point(4, 52.51, 13.38).with_label("Spree"),
	];

	let mut writer = ContainerWriter::new(FORMAT_VERSION)?;
	writer.add_tile(11, &features)?;
	let blob = writer.finish_blob()?;
	let container = Container::open(blob.as_slice())?;
	let tile = container.find_tile(11)?.unwrap();

	assert_eq!(
		decode_tile(&tile)?,
		vec![
			Decoded {
				id: 1,
				geometry_type: GeometryType::Polyline,
				coordinates: river,
				label: Some("Spree".to_string()),
				properties: vec![(key_code_of("water"), -1)],
			},
			Decoded {
				id: 2,
				geometry_type: GeometryType::Polygon,
				coordinates: park,
				label: Some("Tiergarten".to_string()),
				properties: vec![(10, 11), (8, 11)],
			},
			Decoded {
				id: 3,
				geometry_type: GeometryType::Point,
				coordinates: coordinates(&[(52.52, 13.40)]),
				label: Some("Berlin".to_string()),
				properties: vec![(1, value_code_of("town")), (3, 13)],
			},
			Decoded {
				id: 4,
				geometry_type: GeometryType::Point,
				coordinates: coordinates(&[(52.51, 13.38)]),
				label: Some("Spree".to_string()),
				properties: vec![],
			},
		]
	);

	// "Spree" is stored once and shared by features 1 and 4.
	assert_eq!(tile.string_count(), 3);
	assert_eq!(tile.feature_record(0)?.label_offset, tile.feature_record(3)?.label_offset);
	Ok(())
}

#[test]
fn dropping_unknown_tags() -> Result<()> {
	let options = EncoderOptions {
		unknown_tags: UnknownTagPolicy::Drop,
		..EncoderOptions::default()
	};
	let mut writer = ContainerWriter::with_options(FORMAT_VERSION, options)?;
	writer.add_tile(
		1,
		&[SourceFeature::point(1, 0.0, 0.0)
			.with_tag("amenity", "bench")
			.with_tag("natural", "scree")],
	)?;
	let blob = writer.finish_blob()?;
	let container = Container::open(blob.as_slice())?;
	let decoded = decode_tile(&container.find_tile(1)?.unwrap())?;
	assert_eq!(decoded[0].properties, vec![(0, 2)]);
	Ok(())
}

#[test]
fn every_tile_is_readable() -> Result<()> {
	let mut writer = ContainerWriter::new(FORMAT_VERSION)?;
	for id in (0..50).rev() {
		let features: Vec<SourceFeature> = (0..id)
			.map(|n| SourceFeature::point(i64::from(n), f64::from(n), f64::from(id)).with_label(&format!("#{n}")))
			.collect();
		writer.add_tile(id * 3, &features)?;
	}
	let blob = writer.finish_blob()?;
	let container = Container::open(blob.as_slice())?;
	assert_eq!(container.tile_count(), 50);

	for (id, tile) in container.tiles() {
		let tile = tile?;
		assert_eq!(tile.feature_count() as i32, id / 3);
		for (n, feature) in tile.features().enumerate() {
			let feature = feature?;
			assert_eq!(feature.label()?, Some(format!("#{n}").as_str()));
		}
	}
	for id in [0, 3, 75, 147] {
		assert!(container.find_tile(id)?.is_some(), "tile {id}");
	}
	for id in [-1, 1, 148, 150] {
		assert!(container.find_tile(id)?.is_none(), "tile {id}");
	}
	Ok(())
}

#[test]
fn mapped_file() -> Result<()> {
	let dir = TempDir::new()?;
	let path = dir.path().join("berlin.mapster");

	let mut writer = ContainerWriter::new(FORMAT_VERSION)?;
	writer.add_tile(5, &[SourceFeature::point(1, 52.52, 13.40).with_label("Berlin")])?;
	writer.add_tile(6, &[SourceFeature::point(2, 48.14, 11.58).with_label("München")])?;
	writer.write_to_path(&path)?;

	let mapped = MappedFile::open(&path)?;
	let container = Container::open(mapped.as_slice())?;

	std::thread::scope(|scope| -> Result<()> {
		let handles: Vec<_> = [5, 6]
			.into_iter()
			.map(|id| {
				scope.spawn(move || -> Result<String> {
					let tile = container.find_tile(id)?.unwrap();
					Ok(tile.feature_at(0)?.label()?.unwrap_or_default().to_string())
				})
			})
			.collect();
		let labels: Vec<String> = handles.into_iter().map(|handle| handle.join().unwrap()).collect::<Result<_>>()?;
		assert_eq!(labels, vec!["Berlin", "München"]);
		Ok(())
	})
}

#[test]
fn unsupported_version_in_file() -> Result<()> {
	let mut writer = ContainerWriter::new(FORMAT_VERSION)?;
	writer.add_tile(1, &[])?;
	let mut blob = writer.finish_blob()?;
	blob.as_mut_slice()[0..8].copy_from_slice(&2i64.to_le_bytes());

	let err = Container::open(blob.as_slice()).unwrap_err();
	assert_eq!(err.downcast_ref::<FormatError>(), Some(&FormatError::UnsupportedVersion(2)));
	assert_eq!(err.to_string(), "unsupported container version 2");
	Ok(())
}
