use anyhow::{Context, Result, bail};
use clap::Args;
use mapster_core::io::MappedFile;
use mapster_tiles::{
	Container, Feature, TagCode, TileBlock,
	dictionary::{PropertyKey, PropertyValue},
};
use std::{fmt::Write, path::PathBuf};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// container file to read
	#[arg(required = true)]
	filename: PathBuf,

	/// id of the tile to print
	#[arg(required = true, allow_negative_numbers = true)]
	tile_id: i32,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let mapped = MappedFile::open(&arguments.filename)?;
	let container = Container::open(mapped.as_slice())?;
	let Some(tile) = container.find_tile(arguments.tile_id)? else {
		bail!("tile {} not found in {:?}", arguments.tile_id, arguments.filename);
	};
	print!("{}", describe_tile(arguments.tile_id, &tile)?);
	Ok(())
}

pub fn describe_tile(id: i32, tile: &TileBlock) -> Result<String> {
	let mut text = String::new();
	writeln!(text, "tile {id}: {} features", tile.feature_count())?;
	for (index, feature) in tile.features().enumerate() {
		let feature = feature.with_context(|| format!("reading feature {index} of tile {id}"))?;
		describe_feature(&mut text, &feature)?;
	}
	Ok(text)
}

fn describe_feature(text: &mut String, feature: &Feature) -> Result<()> {
	write!(text, "feature {}: {}", feature.id(), feature.geometry_type())?;
	if let Some(label) = feature.label()? {
		write!(text, " {label:?}")?;
	}
	writeln!(text)?;

	let coordinates: Vec<String> = feature.coordinates()?.iter().map(|c| format!("{c:?}")).collect();
	writeln!(text, "  coordinates: {}", coordinates.join(" "))?;

	let properties = feature.properties()?;
	if !properties.is_empty() {
		let pairs: Vec<String> = properties
			.iter()
			.map(|entry| format!("{}={}", key_name(entry.key), value_name(entry.value)))
			.collect();
		writeln!(text, "  properties: {}", pairs.join(" "))?;
	}
	Ok(())
}

fn key_name(code: TagCode) -> String {
	PropertyKey::from_tag(code).map_or_else(|| format!("{code:?}"), |key| key.as_str().to_string())
}

fn value_name(code: TagCode) -> String {
	PropertyValue::from_tag(code).map_or_else(|| format!("{code:?}"), |value| format!("{value:?}"))
}
