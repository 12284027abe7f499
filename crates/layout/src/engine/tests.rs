use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::align::AlignmentMode;
use crate::expr::GroupId;
use crate::measure::NoContent;

const SCREEN: Size = Size::new(40, 12);

fn engine_with_root() -> (LayoutEngine, ViewId) {
	let mut engine = LayoutEngine::new();
	let root = engine
		.add_view(None, ViewLayout::default().width(Dim::fill(0)).height(Dim::fill(0)))
		.unwrap();
	(engine, root)
}

fn boxed(x: i32, width: i32) -> ViewLayout {
	ViewLayout::default().x(x).width(width).height(1)
}

#[test]
fn new_views_need_layout() {
	let (mut engine, root) = engine_with_root();
	assert!(engine.needs_layout());
	assert_eq!(engine.last_phase(), LayoutPhase::NotStarted);

	let report = engine.run_layout_pass(root, SCREEN, &NoContent).unwrap();
	assert_eq!(report.pass, 1);
	assert_eq!(report.frame(root), Some(Rect::new(0, 0, 40, 12)));
	assert!(!engine.needs_layout());
	assert_eq!(engine.last_phase(), LayoutPhase::Complete);
	assert_eq!(engine.tree().frame(root), Some(Rect::new(0, 0, 40, 12)));
}

#[test]
fn invalidations_coalesce_into_one_pass() {
	let (mut engine, root) = engine_with_root();
	let view = engine.add_view(Some(root), boxed(1, 4)).unwrap();
	engine.layout_if_needed(root, SCREEN, &NoContent).unwrap();
	assert_eq!(engine.pass_count(), 1);

	engine.invalidate_layout(view).unwrap();
	engine.invalidate_layout(view).unwrap();
	engine.invalidate_layout(root).unwrap();
	engine.set_size(view, Axis::Horizontal, 6).unwrap();

	let report = engine.layout_if_needed(root, SCREEN, &NoContent).unwrap();
	assert_eq!(report.map(|r| r.pass), Some(2));
	assert_eq!(engine.layout_if_needed(root, SCREEN, &NoContent).unwrap(), None);
	assert_eq!(engine.pass_count(), 2);
	assert_eq!(engine.tree().frame(view), Some(Rect::new(1, 0, 6, 1)));
}

#[test]
fn resize_triggers_a_pass() {
	let (mut engine, root) = engine_with_root();
	engine.layout_if_needed(root, SCREEN, &NoContent).unwrap();
	let report = engine
		.layout_if_needed(root, Size::new(20, 5), &NoContent)
		.unwrap()
		.unwrap();
	assert_eq!(report.frame(root), Some(Rect::new(0, 0, 20, 5)));
}

#[test]
fn roots_track_their_own_invalidations() {
	let (mut engine, a) = engine_with_root();
	let b = engine
		.add_view(None, ViewLayout::default().width(Dim::fill(0)).height(Dim::fill(0)))
		.unwrap();
	let inner = engine.add_view(Some(b), boxed(0, 2)).unwrap();
	engine.layout_if_needed(a, SCREEN, &NoContent).unwrap();
	engine.layout_if_needed(b, SCREEN, &NoContent).unwrap();
	assert!(!engine.needs_layout());

	engine.set_size(inner, Axis::Horizontal, 7).unwrap();
	assert_eq!(engine.layout_if_needed(a, SCREEN, &NoContent).unwrap(), None);
	assert!(engine.needs_layout());
	assert!(engine.needs_layout_under(b));
	assert!(!engine.needs_layout_under(a));

	let report = engine.layout_if_needed(b, SCREEN, &NoContent).unwrap();
	assert_eq!(report.and_then(|r| r.frame(inner)), Some(Rect::new(0, 0, 7, 1)));
	assert!(!engine.needs_layout());
}

#[test]
fn roots_remember_their_own_available_size() {
	let (mut engine, a) = engine_with_root();
	let b = engine
		.add_view(None, ViewLayout::default().width(Dim::fill(0)).height(Dim::fill(0)))
		.unwrap();
	engine.layout_if_needed(a, SCREEN, &NoContent).unwrap();
	engine.layout_if_needed(b, Size::new(20, 5), &NoContent).unwrap();

	assert_eq!(engine.layout_if_needed(a, SCREEN, &NoContent).unwrap(), None);
	assert_eq!(engine.layout_if_needed(b, Size::new(20, 5), &NoContent).unwrap(), None);
	assert_eq!(engine.pass_count(), 2);
	assert_eq!(engine.tree().frame(b), Some(Rect::new(0, 0, 20, 5)));
}

#[test]
fn setters_replace_expressions() {
	let (mut engine, root) = engine_with_root();
	let view = engine.add_view(Some(root), boxed(0, 4)).unwrap();
	engine.run_layout_pass(root, SCREEN, &NoContent).unwrap();

	engine.set_position(view, Axis::Horizontal, Pos::anchor_end(1)).unwrap();
	engine.set_position(view, Axis::Vertical, Pos::center()).unwrap();
	engine.set_adornment(root, Thickness::uniform(1)).unwrap();
	assert!(engine.needs_layout());

	engine.run_layout_pass(root, SCREEN, &NoContent).unwrap();
	assert_eq!(engine.tree().frame(view), Some(Rect::new(33, 4, 4, 1)));
	assert_eq!(engine.tree().screen_frame(view), Some(Rect::new(34, 5, 4, 1)));
}

#[test]
fn setters_reject_unknown_views() {
	let (mut engine, root) = engine_with_root();
	let view = engine.add_view(Some(root), ViewLayout::default()).unwrap();
	engine.remove_view(view).unwrap();

	assert_eq!(engine.set_size(view, Axis::Vertical, 1), Err(LayoutError::ViewNotFound(view)));
	assert_eq!(engine.invalidate_layout(view), Err(LayoutError::ViewNotFound(view)));
	assert_eq!(
		engine.on_layout_complete(view, |_, _| {}),
		Err(LayoutError::ViewNotFound(view))
	);
}

#[test]
fn failed_pass_keeps_previous_frames() {
	let (mut engine, root) = engine_with_root();
	let a = engine.add_view(Some(root), boxed(0, 3)).unwrap();
	let b = engine.add_view(Some(root), boxed(5, 3)).unwrap();
	engine.run_layout_pass(root, SCREEN, &NoContent).unwrap();

	engine.set_position(a, Axis::Horizontal, Pos::right(b)).unwrap();
	engine.set_position(b, Axis::Horizontal, Pos::right(a)).unwrap();
	let err = engine.run_layout_pass(root, SCREEN, &NoContent).unwrap_err();

	assert_eq!(err, LayoutError::UnresolvableCycle { views: vec![a, b] });
	assert!(err.is_fatal());
	assert_eq!(engine.tree().frame(a), Some(Rect::new(0, 0, 3, 1)));
	assert_eq!(engine.tree().frame(b), Some(Rect::new(5, 0, 3, 1)));
	assert!(engine.needs_layout());
	assert_eq!(engine.pass_count(), 1);
	assert_ne!(engine.last_phase(), LayoutPhase::Complete);
}

#[test]
fn hooks_see_committed_frames() {
	let (mut engine, root) = engine_with_root();
	let view = engine.add_view(Some(root), boxed(2, 5)).unwrap();
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&seen);
	engine
		.on_layout_complete(view, move |event, _| sink.borrow_mut().push(*event))
		.unwrap();

	engine.run_layout_pass(root, SCREEN, &NoContent).unwrap();
	assert_eq!(
		*seen.borrow(),
		vec![LayoutComplete {
			view,
			frame: Rect::new(2, 0, 5, 1),
			pass: 1,
		}]
	);
}

#[test]
fn hook_changes_apply_to_the_next_pass() {
	let (mut engine, root) = engine_with_root();
	let view = engine.add_view(Some(root), boxed(0, 1)).unwrap();
	// Grows by one cell after every pass, forever.
	engine
		.on_layout_complete(view, move |event, changes| {
			changes.set_size(event.view, Axis::Horizontal, event.frame.width + 1);
		})
		.unwrap();

	engine.run_layout_pass(root, SCREEN, &NoContent).unwrap();
	assert_eq!(engine.tree().frame(view).map(|f| f.width), Some(1));
	assert!(engine.needs_layout());

	engine.layout_if_needed(root, SCREEN, &NoContent).unwrap();
	assert_eq!(engine.tree().frame(view).map(|f| f.width), Some(2));
	assert_eq!(engine.pass_count(), 2);
}

#[test]
fn hook_changes_to_removed_views_are_dropped() {
	let (mut engine, root) = engine_with_root();
	let view = engine.add_view(Some(root), boxed(0, 1)).unwrap();
	let stale = engine.add_view(Some(root), boxed(0, 1)).unwrap();
	engine.remove_view(stale).unwrap();
	engine
		.on_layout_complete(view, move |_, changes| changes.invalidate_layout(stale))
		.unwrap();

	engine.run_layout_pass(root, SCREEN, &NoContent).unwrap();
	assert!(!engine.needs_layout());
}

#[test]
fn removing_a_view_drops_its_hooks() {
	let (mut engine, root) = engine_with_root();
	let panel = engine.add_view(Some(root), boxed(0, 10)).unwrap();
	let label = engine.add_view(Some(panel), boxed(1, 2)).unwrap();
	let calls = Rc::new(Cell::new(0));
	for view in [panel, label] {
		let calls = Rc::clone(&calls);
		engine
			.on_layout_complete(view, move |_, _| calls.set(calls.get() + 1))
			.unwrap();
	}

	engine.run_layout_pass(root, SCREEN, &NoContent).unwrap();
	assert_eq!(calls.get(), 2);

	assert_eq!(engine.remove_view(panel).unwrap(), vec![panel, label]);
	assert!(engine.needs_layout());
	engine.run_layout_pass(root, SCREEN, &NoContent).unwrap();
	assert_eq!(calls.get(), 2);
	assert_eq!(Rc::strong_count(&calls), 1);
}

#[test]
fn report_lists_diagnostics() {
	let (mut engine, root) = engine_with_root();
	let view = engine
		.add_view(Some(root), ViewLayout::default().width(Dim::percent(-20)).height(1))
		.unwrap();
	let report = engine.run_layout_pass(root, SCREEN, &NoContent).unwrap();
	assert_eq!(report.frame(view).map(|f| f.width), Some(0));
	assert_eq!(report.diagnostics.len(), 1);
	assert!(!report.diagnostics[0].is_fatal());
}

fn pos_strategy() -> impl Strategy<Value = Pos> {
	let modes = prop::sample::select(vec![
		AlignmentMode::Start,
		AlignmentMode::End,
		AlignmentMode::Center,
		AlignmentMode::Fill,
		AlignmentMode::FirstChildRestOpposite,
		AlignmentMode::LastChildRestOpposite,
	]);
	prop_oneof![
		(-5..30i32).prop_map(Pos::absolute),
		Just(Pos::center()),
		(-10..=120i32).prop_map(Pos::percent),
		(0..5i32).prop_map(Pos::anchor_end),
		(0..3i32, modes).prop_map(|(group, mode)| Pos::align(GroupId(group), mode)),
		(0..4i32).prop_map(|offset| Pos::center() - offset),
	]
}

fn dim_strategy() -> impl Strategy<Value = Dim> {
	prop_oneof![
		(-2..15i32).prop_map(Dim::absolute),
		(0..4i32).prop_map(Dim::fill),
		(0..=120i32).prop_map(Dim::percent),
		(0..=100i32).prop_map(Dim::percent_after_offset),
		Just(Dim::auto()),
		(0..4i32).prop_map(|margin| Dim::fill(margin) - 1),
	]
}

fn layout_strategy() -> impl Strategy<Value = (usize, ViewLayout)> {
	(
		any::<usize>(),
		pos_strategy(),
		pos_strategy(),
		dim_strategy(),
		dim_strategy(),
		0..2i32,
	)
		.prop_map(|(parent, x, y, width, height, border)| {
			let layout = ViewLayout::default()
				.x(x)
				.y(y)
				.width(width)
				.height(height)
				.adornment(Thickness::uniform(border));
			(parent, layout)
		})
}

proptest! {
	#[test]
	fn passes_are_idempotent(
		views in prop::collection::vec(layout_strategy(), 1..16),
		width in 0..80i32,
		height in 0..30i32,
	) {
		let (mut engine, root) = engine_with_root();
		let mut ids = vec![root];
		for (parent, layout) in views {
			let parent = ids[parent % ids.len()];
			ids.push(engine.add_view(Some(parent), layout).unwrap());
		}

		let available = Size::new(width, height);
		let first = engine.run_layout_pass(root, available, &NoContent).unwrap();
		let second = engine.run_layout_pass(root, available, &NoContent).unwrap();
		prop_assert_eq!(&first.frames, &second.frames);
		prop_assert_eq!(&first.diagnostics, &second.diagnostics);
		prop_assert!(second.frames.iter().all(|(_, frame)| frame.width >= 0 && frame.height >= 0));
	}
}
