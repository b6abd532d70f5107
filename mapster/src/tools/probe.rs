use anyhow::Result;
use clap::{ArgAction::Count, Args};
use mapster_core::io::MappedFile;
use mapster_tiles::Container;
use std::{fmt::Write, path::PathBuf};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// container file you want to probe
	#[arg(required = true)]
	filename: PathBuf,

	/// deep scan
	/// -d lists every tile
	/// -dd also lists the pool sizes of every tile
	#[arg(long, short, action = Count, verbatim_doc_comment)]
	deep: u8,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let mapped = MappedFile::open(&arguments.filename)?;
	let container = Container::open(mapped.as_slice())?;
	print!("{}", report(&container, arguments.deep)?);
	Ok(())
}

/// Describes the container. Tiles that fail to decode are listed with their error.
pub fn report(container: &Container, deep: u8) -> Result<String> {
	let mut text = String::new();
	writeln!(text, "version: {}", container.version())?;
	writeln!(text, "tiles: {}", container.tile_count())?;
	writeln!(text, "size: {} bytes", container.as_slice().len())?;
	if deep == 0 {
		return Ok(text);
	}

	for (entry, (id, tile)) in container.entries().zip(container.tiles()) {
		match tile {
			Ok(tile) => {
				write!(
					text,
					"tile {id}: offset {}, length {}, {} features",
					entry.offset_in_bytes,
					tile.len(),
					tile.feature_count()
				)?;
				if deep > 1 {
					write!(
						text,
						", {} coordinates, {} strings, {} properties",
						tile.coordinate_count(),
						tile.string_count(),
						tile.property_count()
					)?;
				}
				writeln!(text)?;
			}
			Err(err) => writeln!(text, "tile {id}: {err:#}")?,
		}
	}
	Ok(text)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::run_command;
	use crate::tools::test_utils::sample_container;
	use assert_fs::TempDir;

	#[test]
	fn probe() -> Result<()> {
		let dir = TempDir::new()?;
		let path = sample_container(&dir)?;
		run_command(vec!["mapster", "probe", "-q", path.to_str().unwrap()])?;
		run_command(vec!["mapster", "probe", "-dd", path.to_str().unwrap()])?;
		Ok(())
	}

	#[test]
	fn report_lists_tiles() -> Result<()> {
		let dir = TempDir::new()?;
		let mapped = MappedFile::open(&sample_container(&dir)?)?;
		let container = Container::open(mapped.as_slice())?;

		let summary = report(&container, 0)?;
		assert!(summary.starts_with("version: 1\ntiles: 3\nsize: "));
		assert_eq!(summary.lines().count(), 3);

		let lines: Vec<String> = report(&container, 1)?.lines().skip(3).map(str::to_string).collect();
		assert_eq!(lines.len(), 3);
		assert!(lines[0].starts_with("tile 3: offset 48, length "));
		assert!(lines[0].ends_with(", 2 features"));
		assert!(lines[1].starts_with("tile 7: "));
		assert!(lines[1].ends_with(", length 52, 0 features"));

		let deep = report(&container, 2)?;
		assert!(deep.contains("tile 42: "));
		assert!(deep.contains(", 2 coordinates, 0 strings, 1 properties\n"));
		Ok(())
	}

	#[test]
	fn missing_file() {
		let err = run_command(vec!["mapster", "probe", "does-not-exist.mapster"]).unwrap_err();
		assert!(err.to_string().contains("does not exist"));
	}
}
