use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;
use trellis_layout::{AlignmentMode, NoContent, Rect};

use super::*;

const DIALOG: &str = r#"
title = "Dialog"
terminal = { width = 40, height = 10 }

[[view]]
name = "window"
width = { kind = "fill" }
height = { kind = "fill" }
border = 1

[[view]]
name = "ok"
parent = "window"
text = "[ Ok ]"
x = { kind = "align", group = 0, mode = "center", add_space = true }
y = { kind = "anchor_end", margin = 0 }
"#;

fn frame_of(built: &BuiltScene, name: &str) -> Option<Rect> {
	let tree = built.engine.tree();
	tree.find_by_name(name).and_then(|view| tree.frame(view))
}

#[test]
fn parses_expression_tables() {
	let scene = Scene::from_toml_str(DIALOG).unwrap();
	assert_eq!(scene.title.as_deref(), Some("Dialog"));
	assert_eq!(scene.terminal, Some(Terminal { width: 40, height: 10 }));
	assert_eq!(scene.views.len(), 2);

	let ok = &scene.views[1];
	assert_eq!(ok.parent.as_deref(), Some("window"));
	assert_eq!(
		ok.x,
		PosSpec::Expr(PosExpr::Align {
			group: 0,
			mode: AlignmentMode::Center,
			add_space: true,
			ignore_first_or_last: false,
			offset: 0,
		})
	);
	assert_eq!(ok.width, DimSpec::default());
}

#[test]
fn bare_integers_are_cells() {
	let scene = Scene::from_toml_str("[[view]]\nname = \"a\"\nx = 3\nwidth = 7\n").unwrap();
	let view = &scene.views[0];
	assert_eq!(view.x, PosSpec::Cells(3));
	assert_eq!(view.y, PosSpec::Cells(0));
	assert_eq!(view.width, DimSpec::Cells(7));
}

#[test]
fn combine_nests_specs() {
	let input = r#"
[[view]]
name = "a"
x = { kind = "combine", left = { kind = "percent", percent = 50 }, op = "-", right = 2 }
"#;
	let scene = Scene::from_toml_str(input).unwrap();
	assert_eq!(
		scene.views[0].x,
		PosSpec::Expr(PosExpr::Combine {
			left: Box::new(PosSpec::Expr(PosExpr::Percent {
				percent: 50,
				offset: 0
			})),
			op: Op::Subtract,
			right: Box::new(PosSpec::Cells(2)),
		})
	);
}

#[rstest]
#[case::unknown_kind("[[view]]\nname = \"a\"\nx = { kind = \"middle\" }\n")]
#[case::unknown_key("[[view]]\nname = \"a\"\ncolour = \"red\"\n")]
#[case::missing_name("[[view]]\nx = 1\n")]
fn malformed_scenes_are_rejected(#[case] input: &str) {
	assert!(matches!(Scene::from_toml_str(input), Err(SceneError::Toml(_))));
}

#[test]
fn parents_must_be_declared_first() {
	let input = "[[view]]\nname = \"root\"\n\n[[view]]\nname = \"a\"\nparent = \"b\"\n\n[[view]]\nname = \"b\"\nparent = \"root\"\n";
	let error = Scene::from_toml_str(input).unwrap().build().unwrap_err();
	assert!(matches!(
		error,
		SceneError::UnknownParent { ref view, ref parent } if view == "a" && parent == "b"
	));
}

#[test]
fn unknown_targets_are_named() {
	let input = r#"
[[view]]
name = "root"

[[view]]
name = "a"
parent = "root"
x = { kind = "relative", of = "ghost", side = "right" }
"#;
	let error = Scene::from_toml_str(input).unwrap().build().unwrap_err();
	assert_eq!(error.to_string(), "view `a` references unknown view `ghost`");
}

#[test]
fn names_are_unique() {
	let input = "[[view]]\nname = \"root\"\n\n[[view]]\nname = \"root\"\nparent = \"root\"\n";
	let error = Scene::from_toml_str(input).unwrap().build().unwrap_err();
	assert!(matches!(error, SceneError::DuplicateName(ref name) if name == "root"));
}

#[rstest]
#[case::empty("", 0)]
#[case::two("[[view]]\nname = \"a\"\n\n[[view]]\nname = \"b\"\n", 2)]
fn exactly_one_root(#[case] input: &str, #[case] expected: usize) {
	let error = Scene::from_toml_str(input).unwrap().build().unwrap_err();
	assert!(matches!(error, SceneError::RootCount(found) if found == expected));
}

#[test]
fn built_scene_lays_out() {
	let scene = Scene::from_toml_str(DIALOG).unwrap();
	let mut built = scene.build().unwrap();
	let available = scene.available(None, None);
	assert_eq!(available, Size::new(40, 10));

	let root = built.root;
	built
		.engine
		.run_layout_pass(root, available, &built.content)
		.unwrap();
	assert_eq!(frame_of(&built, "window"), Some(Rect::new(0, 0, 40, 10)));
	// Content box is 38x8 inside the border; "[ Ok ]" is 6 cells wide.
	assert_eq!(frame_of(&built, "ok"), Some(Rect::new(16, 7, 6, 1)));
	assert_eq!(built.content.get(built.engine.tree().find_by_name("ok").unwrap()), Some("[ Ok ]"));
}

#[test]
fn expressions_may_name_later_views() {
	let input = r#"
[[view]]
name = "root"
width = 20
height = 1

[[view]]
name = "label"
parent = "root"
x = { kind = "relative", of = "field", side = "right", offset = 1 }
width = 4
height = 1

[[view]]
name = "field"
parent = "root"
x = 2
width = 3
height = 1
"#;
	let mut built = Scene::from_toml_str(input).unwrap().build().unwrap();
	let root = built.root;
	built
		.engine
		.run_layout_pass(root, Size::new(20, 1), &NoContent)
		.unwrap();
	assert_eq!(frame_of(&built, "label"), Some(Rect::new(6, 0, 4, 1)));
}

#[test]
fn border_adds_to_adornment() {
	let input = "[[view]]\nname = \"a\"\nborder = 1\nadornment = { left = 2 }\n";
	let scene = Scene::from_toml_str(input).unwrap();
	let built = scene.build().unwrap();
	let layout = scene.views[0].layout(built.engine.tree()).unwrap();
	assert_eq!(layout.adornment.left, 3);
	assert_eq!(layout.adornment.right, 1);
}

#[test]
fn scene_config_is_used_by_build() {
	let input = "[config]\nrelaxation_bound = 3\n\n[[view]]\nname = \"a\"\n";
	let scene = Scene::from_toml_str(input).unwrap();
	let built = scene.build().unwrap();
	assert_eq!(built.engine.config().relaxation_bound, Some(3));

	let built = scene.build_with(LayoutConfig::default()).unwrap();
	assert_eq!(built.engine.config().relaxation_bound, None);
}

#[rstest]
#[case::defaults(None, None, Size::new(80, 25))]
#[case::width(Some(100), None, Size::new(100, 25))]
#[case::both(Some(10), Some(4), Size::new(10, 4))]
fn available_prefers_overrides(
	#[case] width: Option<i32>,
	#[case] height: Option<i32>,
	#[case] expected: Size,
) {
	assert_eq!(Scene::default().available(width, height), expected);
}

#[test]
fn loads_from_disk() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(DIALOG.as_bytes()).unwrap();
	let scene = Scene::load(file.path()).unwrap();
	assert_eq!(scene.views.len(), 2);

	let missing = file.path().with_extension("missing");
	assert!(matches!(Scene::load(&missing), Err(SceneError::Io { .. })));
}
