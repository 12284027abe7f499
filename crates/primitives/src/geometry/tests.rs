use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::{Rect, Size, Thickness};
use crate::Axis;

#[test]
fn new_rect_clamps_negative_extents() {
	let rect = Rect::new(-3, 4, -10, 2);
	assert_eq!(rect.width, 0);
	assert_eq!(rect.height, 2);
	assert_eq!(rect.x, -3);
}

#[test]
fn rect_edges_are_exclusive() {
	let rect = Rect::new(10, 5, 3, 2);
	assert_eq!(rect.left(), 10);
	assert_eq!(rect.right(), 13);
	assert_eq!(rect.top(), 5);
	assert_eq!(rect.bottom(), 7);
}

#[test]
fn contains_uses_inclusive_origin_exclusive_max() {
	let rect = Rect::new(10, 5, 3, 2);
	assert!(rect.contains(10, 5));
	assert!(rect.contains(12, 6));
	assert!(!rect.contains(13, 6));
	assert!(!rect.contains(12, 7));
}

#[rstest]
#[case::none(Thickness::ZERO, Rect::new(0, 0, 10, 6))]
#[case::border(Thickness::uniform(1), Rect::new(1, 1, 8, 4))]
#[case::lopsided(Thickness::new(2, 0, 1, 3), Rect::new(2, 0, 7, 3))]
#[case::too_thick(Thickness::symmetric(6, 1), Rect::new(6, 1, 0, 4))]
fn inner_removes_adornment(#[case] thickness: Thickness, #[case] expected: Rect) {
	assert_eq!(Rect::new(0, 0, 10, 6).inner(thickness), expected);
}

#[test]
fn outer_undoes_inner() {
	let frame = Rect::new(4, 4, 10, 10);
	let t = Thickness::new(1, 2, 3, 1);
	assert_eq!(frame.inner(t).outer(t), frame);
}

#[test]
fn union_and_intersection() {
	let a = Rect::new(0, 0, 4, 4);
	let b = Rect::new(2, 2, 4, 4);
	assert_eq!(a.union(b), Rect::new(0, 0, 6, 6));
	assert_eq!(a.intersection(b), Rect::new(2, 2, 2, 2));
	assert!(a.intersects(b));
	assert!(a.intersection(Rect::new(10, 10, 1, 1)).is_empty());
}

#[test]
fn axis_accessors() {
	let rect = Rect::new(1, 2, 3, 4);
	assert_eq!(rect.origin(Axis::Horizontal), 1);
	assert_eq!(rect.origin(Axis::Vertical), 2);
	assert_eq!(rect.extent(Axis::Horizontal), 3);
	assert_eq!(rect.extent(Axis::Vertical), 4);
	assert_eq!(rect.with_origin(Axis::Vertical, -1), Rect::new(1, -1, 3, 4));
	assert_eq!(rect.with_extent(Axis::Horizontal, -5), Rect::new(1, 2, 0, 4));
}

#[test]
fn display_matches_geometry_string() {
	assert_eq!(Rect::new(-1, 2, 30, 4).to_string(), "30x4+-1+2");
	assert_eq!(Size::new(3, 4).to_string(), "3x4");
}

#[test]
fn thickness_stacks() {
	let border = Thickness::uniform(1);
	let padding = Thickness::symmetric(1, 0);
	assert_eq!(border + padding, Thickness::new(2, 1, 2, 1));
	assert_eq!((border + padding).horizontal(), 4);
	assert_eq!((border + padding).vertical(), 2);
}

#[test]
fn thickness_deserializes_partial_tables() {
	let t: Thickness = toml::from_str("left = 2\nbottom = 1").unwrap();
	assert_eq!(t, Thickness::new(2, 0, 0, 1));
}

proptest! {
	#[test]
	fn inner_never_grows(x in -50i32..50, y in -50i32..50, w in 0i32..100, h in 0i32..100, t in 0i32..60) {
		let rect = Rect::new(x, y, w, h);
		let inner = rect.inner(Thickness::uniform(t));
		prop_assert!(inner.width <= rect.width);
		prop_assert!(inner.height <= rect.height);
		prop_assert!(inner.width >= 0 && inner.height >= 0);
	}
}
