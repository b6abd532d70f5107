use assert_cmd::{Command, cargo};
use assert_fs::{TempDir, prelude::*};
use predicates::str;
use rstest::rstest;

#[cfg(windows)]
const BINARY_NAME: &str = "mapster.exe";
#[cfg(not(windows))]
const BINARY_NAME: &str = "mapster";

const SOURCE: &str = r#"{"tiles":[
	{"id":7,"features":[{"id":1,"geometry":"point","coordinates":[[39.8,-89.6]],"label":"Springfield","tags":[["place","city"]]}]},
	{"id":3,"features":[]}
]}"#;

fn mapster_cmd() -> Command {
	Command::new(cargo::cargo_bin!())
}

#[test]
fn command() -> Result<(), Box<dyn std::error::Error>> {
	mapster_cmd()
		.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains(format!("Usage: {BINARY_NAME} [OPTIONS] <COMMAND>")));
	Ok(())
}

#[rstest]
#[case("build", "[OPTIONS] <INPUT_FILE> <OUTPUT_FILE>")]
#[case("probe", "[OPTIONS] <FILENAME>")]
#[case("show", "[OPTIONS] <FILENAME> <TILE_ID>")]
fn subcommand(#[case] sub_command: &str, #[case] usage: &str) -> Result<(), Box<dyn std::error::Error>> {
	mapster_cmd()
		.arg(sub_command)
		.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains(format!("Usage: {BINARY_NAME} {sub_command} {usage}")));
	Ok(())
}

#[test]
fn build_probe_show() -> Result<(), Box<dyn std::error::Error>> {
	let dir = TempDir::new()?;
	let input = dir.child("source.json");
	input.write_str(SOURCE)?;
	let output = dir.child("tiles.mapster");

	mapster_cmd()
		.args(["build", "-q"])
		.arg(input.path())
		.arg(output.path())
		.assert()
		.success()
		.stdout(str::is_empty());
	output.assert(predicates::path::is_file());

	mapster_cmd()
		.args(["probe", "-d"])
		.arg(output.path())
		.assert()
		.success()
		.stdout(str::starts_with("version: 1\ntiles: 2\n"))
		.stdout(str::contains("tile 3: offset 36, length 52, 0 features\n"))
		.stdout(str::contains("tile 7: offset 88, "));

	mapster_cmd()
		.arg("show")
		.arg(output.path())
		.arg("7")
		.assert()
		.success()
		.stdout(str::contains("feature 1: point \"Springfield\"\n"))
		.stdout(str::contains("  properties: place=Settlement\n"));

	mapster_cmd()
		.arg("show")
		.arg(output.path())
		.arg("8")
		.assert()
		.failure()
		.stderr(str::contains("tile 8 not found"));
	Ok(())
}

#[test]
fn corrupt_file() -> Result<(), Box<dyn std::error::Error>> {
	let dir = TempDir::new()?;
	let file = dir.child("short.mapster");
	file.write_binary(&[1, 0, 0, 0])?;

	mapster_cmd()
		.arg("probe")
		.arg(file.path())
		.assert()
		.failure()
		.stderr(str::contains("truncated file header: need 12 bytes, but only 4 are available"));
	Ok(())
}
