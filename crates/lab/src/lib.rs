//! Scene files, frame reports and ASCII previews for the trellis layout engine.
//!
//! `trellis-lab` loads a TOML [`Scene`](scene::Scene), runs one layout pass, and prints the
//! resolved frames. The bundled `scenes/` reproduce alignment groups, justification,
//! computed layouts, and deliberately odd compositions.

pub mod cli;
pub mod preview;
pub mod report;
pub mod scene;

use std::io::Write;

use anyhow::Context;
pub use cli::{Cli, Format};
pub use report::{FrameReport, ViewFrame, describe_error};
pub use scene::{BuiltScene, Scene, SceneError};
use trellis_layout::LayoutConfig;

/// Runs the command described by `cli`, writing the report to `out`.
///
/// # Errors
///
/// Fails if the scene or configuration cannot be loaded, if the scene's hierarchy is
/// malformed, or if the layout pass fails (the [`trellis_layout::LayoutError`] is kept as
/// the error's source).
pub fn run(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<()> {
	let scene = Scene::load(&cli.scene)?;
	let config = match &cli.config {
		Some(path) => LayoutConfig::load(path)
			.with_context(|| format!("loading layout config {}", path.display()))?,
		None => scene.config.clone().unwrap_or_default(),
	};
	let available = scene.available(cli.width, cli.height);
	let BuiltScene {
		mut engine,
		root,
		content,
	} = scene
		.build_with(config)
		.with_context(|| format!("building scene {}", cli.scene.display()))?;

	let report = match engine.run_layout_pass(root, available, &content) {
		Ok(report) => report,
		Err(error) => {
			let message = describe_error(engine.tree(), &error);
			return Err(anyhow::Error::new(error).context(message));
		}
	};
	let frames = FrameReport::new(
		engine.tree(),
		&report,
		engine.last_phase(),
		available,
		scene.title.as_deref(),
	);

	match cli.format {
		Format::Text => out.write_all(frames.to_text().as_bytes())?,
		Format::Json => writeln!(out, "{}", frames.to_json()?)?,
	}
	if cli.preview {
		writeln!(out)?;
		out.write_all(preview::render(&frames).as_bytes())?;
	}
	Ok(())
}

/// Installs a stderr subscriber filtered by `TRELLIS_LOG`, then `RUST_LOG`.
///
/// Without either variable only warnings are shown, or trace-level layout events with
/// `verbose`.
pub fn init_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("TRELLIS_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("trellis_layout=trace,trellis_lab=debug,warn")
			} else {
				EnvFilter::new("warn")
			}
		});
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init()
		.ok();
}
