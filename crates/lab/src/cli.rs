use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "trellis-lab")]
#[command(about = "Resolve a layout scene and print its frames")]
#[command(version)]
pub struct Cli {
	/// Scene file (TOML)
	#[arg(value_name = "SCENE")]
	pub scene: PathBuf,

	/// Available width (defaults to the scene's terminal width, then 80)
	#[arg(long)]
	pub width: Option<i32>,

	/// Available height (defaults to the scene's terminal height, then 25)
	#[arg(long)]
	pub height: Option<i32>,

	/// Layout configuration file, replacing the scene's [config] table
	#[arg(long, short, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Output format
	#[arg(long, value_enum, default_value_t = Format::Text)]
	pub format: Format,

	/// Draw the frames as ASCII boxes after the report
	#[arg(long, short)]
	pub preview: bool,

	/// Verbose logging (trace-level layout events on stderr)
	#[arg(short, long)]
	pub verbose: bool,
}

/// Report format.
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Format {
	#[default]
	Text,
	Json,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_defaults() {
		let cli = Cli::try_parse_from(["trellis-lab", "scenes/pos_align.toml"]).unwrap();
		assert_eq!(cli.scene, PathBuf::from("scenes/pos_align.toml"));
		assert_eq!(cli.format, Format::Text);
		assert!(!cli.preview);
		assert_eq!(cli.width, None);
	}

	#[test]
	fn parses_overrides() {
		let cli = Cli::try_parse_from([
			"trellis-lab",
			"scene.toml",
			"--width",
			"120",
			"--height",
			"40",
			"--format",
			"json",
			"-p",
			"-v",
			"-c",
			"layout.toml",
		])
		.unwrap();
		assert_eq!((cli.width, cli.height), (Some(120), Some(40)));
		assert_eq!(cli.format, Format::Json);
		assert!(cli.preview && cli.verbose);
		assert_eq!(cli.config, Some(PathBuf::from("layout.toml")));
	}

	#[test]
	fn requires_a_scene() {
		assert!(Cli::try_parse_from(["trellis-lab"]).is_err());
	}
}
