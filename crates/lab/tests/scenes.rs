//! The bundled scenes, run end to end.

use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;
use rstest::rstest;
use trellis_lab::{Cli, FrameReport, Scene, run};
use trellis_layout::{LayoutError, Rect};

fn scene_path(file: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR"))
		.join("../../scenes")
		.join(file)
}

fn resolve(file: &str) -> FrameReport {
	let scene = Scene::load(scene_path(file)).unwrap();
	let available = scene.available(None, None);
	let mut built = scene.build().unwrap();
	let report = built
		.engine
		.run_layout_pass(built.root, available, &built.content)
		.unwrap();
	FrameReport::new(
		built.engine.tree(),
		&report,
		built.engine.last_phase(),
		available,
		scene.title.as_deref(),
	)
}

fn frame(report: &FrameReport, name: &str) -> Rect {
	report
		.views
		.iter()
		.find(|view| view.name == name)
		.map(|view| view.frame)
		.unwrap_or_else(|| panic!("no view named {name}"))
}

fn run_cli(args: &[&str]) -> anyhow::Result<String> {
	let cli = Cli::try_parse_from(args)?;
	let mut out = Vec::new();
	run(&cli, &mut out)?;
	Ok(String::from_utf8(out)?)
}

#[test]
fn dialog_buttons_share_a_centred_row() {
	let report = resolve("pos_align.toml");
	assert_eq!(frame(&report, "window"), Rect::new(0, 0, 60, 12));
	assert_eq!(frame(&report, "message"), Rect::new(22, 1, 13, 1));
	let buttons: Vec<Rect> = ["yes", "no", "cancel"]
		.iter()
		.map(|name| frame(&report, name))
		.collect();
	assert_eq!(
		buttons,
		vec![
			Rect::new(16, 9, 7, 1),
			Rect::new(24, 9, 6, 1),
			Rect::new(31, 9, 10, 1),
		]
	);
	assert_eq!(frame(&report, "status"), Rect::new(0, 7, 58, 1));
	assert!(report.diagnostics.is_empty());
}

#[rstest]
#[case::start("start", [0, 4, 10])]
#[case::end("end", [22, 26, 32])]
#[case::center("center", [10, 15, 22])]
#[case::fill("fill", [0, 11, 24])]
#[case::first("first", [0, 26, 32])]
#[case::last("last", [0, 4, 32])]
fn justification_rows(#[case] row: &str, #[case] expected: [i32; 3]) {
	let report = resolve("justification.toml");
	let xs = ["a", "b", "c"].map(|item| frame(&report, &format!("{row}_{item}")).x);
	assert_eq!(xs, expected);
}

#[test]
fn fill_row_grows_every_member() {
	let report = resolve("justification.toml");
	let widths = ["a", "b", "c"].map(|item| frame(&report, &format!("fill_{item}")).width);
	assert_eq!(widths, [11, 13, 16]);
}

#[test]
fn computed_layout_splits_and_wraps() {
	let report = resolve("computed_layout.toml");
	assert_eq!(frame(&report, "left"), Rect::new(0, 0, 23, 22));
	assert_eq!(frame(&report, "right"), Rect::new(24, 0, 54, 22));
	assert_eq!(frame(&report, "footer"), Rect::new(24, 22, 54, 1));
	assert_eq!(frame(&report, "note"), Rect::new(13, 0, 26, 4));
}

#[test]
fn oddballs_resolve_with_warnings() {
	let report = resolve("oddballs.toml");
	assert_eq!(frame(&report, "banner"), Rect::new(20, 0, 20, 1));
	assert_eq!(frame(&report, "panel"), Rect::new(2, 2, 9, 5));
	assert_eq!(frame(&report, "overflow"), Rect::new(40, 10, 2, 1));
	assert_eq!(report.diagnostics.len(), 1);
	assert!(report.diagnostics[0].starts_with("invalid expression on overflow"));
}

#[test]
fn text_report_lists_views_by_depth() {
	let path = scene_path("oddballs.toml");
	let text = run_cli(&["trellis-lab", path.to_str().unwrap()]).unwrap();
	let mut lines = text.lines();
	assert_eq!(lines.next(), Some("# Oddballs (pass 1, 40x12)"));
	assert!(text.contains("\n    a "));
	assert!(text.contains("warning: invalid expression on overflow"));
}

#[test]
fn json_report_round_trips_through_serde_json() {
	let path = scene_path("pos_align.toml");
	let json = run_cli(&[
		"trellis-lab",
		path.to_str().unwrap(),
		"--format",
		"json",
		"--width",
		"70",
	])
	.unwrap();
	let value: serde_json::Value = serde_json::from_str(&json).unwrap();
	assert_eq!(value["available"]["width"], 70);
	assert_eq!(value["phase"], "complete");
	assert_eq!(value["views"][0]["name"], "window");
	assert_eq!(value["views"][0]["frame"]["width"], 70);
}

#[test]
fn preview_draws_after_the_report() {
	let path = scene_path("pos_align.toml");
	let text = run_cli(&["trellis-lab", path.to_str().unwrap(), "--preview"]).unwrap();
	assert!(text.contains("+window---"));
	assert!(text.contains("yes===="));
}

#[test]
fn cycles_are_reported_by_name() {
	let path = scene_path("cycle.toml");
	let error = run_cli(&["trellis-lab", path.to_str().unwrap()]).unwrap_err();
	assert_eq!(error.to_string(), "unresolvable layout cycle among ping, pong");
	assert!(matches!(
		error.downcast_ref::<LayoutError>(),
		Some(LayoutError::UnresolvableCycle { views }) if views.len() == 2
	));
}

#[test]
fn config_file_overrides_the_scene() {
	let mut config = tempfile::NamedTempFile::new().unwrap();
	std::io::Write::write_all(&mut config, b"strict_expressions = true\n").unwrap();
	let path = scene_path("oddballs.toml");
	let error = run_cli(&[
		"trellis-lab",
		path.to_str().unwrap(),
		"--config",
		config.path().to_str().unwrap(),
	])
	.unwrap_err();
	assert!(error.to_string().starts_with("invalid expression on overflow"));
}
