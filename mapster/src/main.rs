mod source;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Build a tile container from a JSON source file
	Build(tools::build::Subcommand),

	/// Show information about a tile container
	Probe(tools::probe::Subcommand),

	/// Print the features of one tile
	Show(tools::show::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Build(arguments) => tools::build::run(arguments),
		Commands::Probe(arguments) => tools::probe::run(arguments),
		Commands::Show(arguments) => tools::show::run(arguments),
	}
}
