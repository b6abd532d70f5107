use crate::source::SourceDocument;
use anyhow::{Context, Result};
use clap::Args;
use log::info;
use mapster_tiles::{ContainerWriter, EncoderOptions, FORMAT_VERSION, UnknownTagPolicy};
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// JSON file with the tiles and features to encode
	#[arg(required = true)]
	input_file: PathBuf,

	/// container file to create
	#[arg(required = true)]
	output_file: PathBuf,

	/// leave out tags whose key or value has no dictionary code
	#[arg(long)]
	drop_unknown_tags: bool,

	/// reject open polygon rings instead of closing them
	#[arg(long)]
	no_close_rings: bool,
}

impl Subcommand {
	fn encoder_options(&self) -> EncoderOptions {
		EncoderOptions {
			unknown_tags: if self.drop_unknown_tags {
				UnknownTagPolicy::Drop
			} else {
				UnknownTagPolicy::Keep
			},
			close_rings: !self.no_close_rings,
		}
	}
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	info!("build {:?} from {:?}", arguments.output_file, arguments.input_file);

	let document = SourceDocument::from_path(&arguments.input_file)?;
	let mut writer = ContainerWriter::with_options(FORMAT_VERSION, arguments.encoder_options())?;
	for tile in &document.tiles {
		let features = tile
			.source_features()
			.with_context(|| format!("reading tile {}", tile.id))?;
		writer.add_tile(tile.id, &features)?;
	}
	writer.write_to_path(&arguments.output_file)?;

	info!("wrote {} tiles to {:?}", writer.tile_count(), arguments.output_file);
	Ok(())
}
