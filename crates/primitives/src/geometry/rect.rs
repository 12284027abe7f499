use core::cmp::{max, min};
use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Size, Thickness};
use crate::Axis;

/// A rectangular area in cell coordinates.
///
/// A `Rect` is the resolved output of a layout pass: the origin and extent of a view,
/// expressed relative to its parent's content box. The origin is the top-left corner; `x`
/// grows to the right and `y` grows downward.
///
/// Coordinates are signed. Layout expressions may legitimately place a view partly outside
/// its parent (`Pos::center() - 1` on a one-cell span, or an overflowing alignment group),
/// and the resolver keeps those values instead of clipping them. Arithmetic on edges
/// saturates at the `i32` range. Extents are never negative: [`Rect::new`] clamps them
/// to zero.
///
/// # Examples
///
/// ```rust
/// use trellis_primitives::{Rect, Thickness};
///
/// let frame = Rect::new(2, 1, 20, 10);
/// assert_eq!(frame.right(), 22);
/// assert_eq!(frame.inner(Thickness::uniform(1)), Rect::new(3, 2, 18, 8));
/// assert_eq!(frame.to_string(), "20x10+2+1");
/// ```
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Rect {
	/// The x coordinate of the top left corner.
	pub x: i32,
	/// The y coordinate of the top left corner.
	pub y: i32,
	/// The width; never negative.
	pub width: i32,
	/// The height; never negative.
	pub height: i32,
}

impl fmt::Display for Rect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
	}
}

impl Rect {
	/// A zero sized Rect at position 0,0
	pub const ZERO: Self = Self {
		x: 0,
		y: 0,
		width: 0,
		height: 0,
	};

	/// Creates a new `Rect`, clamping negative extents to zero.
	pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
		Self {
			x,
			y,
			width: if width < 0 { 0 } else { width },
			height: if height < 0 { 0 } else { height },
		}
	}

	/// The area of the `Rect` in cells.
	pub const fn area(self) -> i64 {
		(self.width as i64) * (self.height as i64)
	}

	/// Returns true if the `Rect` has no area.
	pub const fn is_empty(self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Returns the left coordinate of the `Rect`.
	pub const fn left(self) -> i32 {
		self.x
	}

	/// Returns the right coordinate of the `Rect`. This is the first coordinate outside of the
	/// `Rect`.
	pub const fn right(self) -> i32 {
		self.x.saturating_add(self.width)
	}

	/// Returns the top coordinate of the `Rect`.
	pub const fn top(self) -> i32 {
		self.y
	}

	/// Returns the bottom coordinate of the `Rect`. This is the first coordinate outside of the
	/// `Rect`.
	pub const fn bottom(self) -> i32 {
		self.y.saturating_add(self.height)
	}

	/// Returns the origin coordinate along `axis`.
	pub const fn origin(self, axis: Axis) -> i32 {
		match axis {
			Axis::Horizontal => self.x,
			Axis::Vertical => self.y,
		}
	}

	/// Returns the extent along `axis`.
	pub const fn extent(self, axis: Axis) -> i32 {
		match axis {
			Axis::Horizontal => self.width,
			Axis::Vertical => self.height,
		}
	}

	/// Returns a copy with the origin along `axis` replaced.
	#[must_use = "method returns the modified value"]
	pub const fn with_origin(self, axis: Axis, value: i32) -> Self {
		match axis {
			Axis::Horizontal => Self { x: value, ..self },
			Axis::Vertical => Self { y: value, ..self },
		}
	}

	/// Returns a copy with the extent along `axis` replaced (clamped to zero).
	#[must_use = "method returns the modified value"]
	pub const fn with_extent(self, axis: Axis, value: i32) -> Self {
		let value = if value < 0 { 0 } else { value };
		match axis {
			Axis::Horizontal => Self {
				width: value,
				..self
			},
			Axis::Vertical => Self {
				height: value,
				..self
			},
		}
	}

	/// Returns the content box inside this frame once `thickness` is removed from each side.
	///
	/// If the adornment is thicker than the `Rect`, the returned `Rect` keeps the inset origin
	/// and has no area along the exhausted axis.
	#[must_use = "method returns the modified value"]
	pub const fn inner(self, thickness: Thickness) -> Self {
		Self::new(
			self.x.saturating_add(thickness.left),
			self.y.saturating_add(thickness.top),
			self.width.saturating_sub(thickness.horizontal()),
			self.height.saturating_sub(thickness.vertical()),
		)
	}

	/// Returns a new `Rect` outside the current one, with `thickness` added on each side.
	#[must_use = "method returns the modified value"]
	pub const fn outer(self, thickness: Thickness) -> Self {
		Self::new(
			self.x.saturating_sub(thickness.left),
			self.y.saturating_sub(thickness.top),
			self.width.saturating_add(thickness.horizontal()),
			self.height.saturating_add(thickness.vertical()),
		)
	}

	/// Moves the `Rect` without modifying its size.
	#[must_use = "method returns the modified value"]
	pub const fn offset(self, dx: i32, dy: i32) -> Self {
		Self {
			x: self.x.saturating_add(dx),
			y: self.y.saturating_add(dy),
			..self
		}
	}

	/// Returns a new `Rect` that contains both the current one and the given one.
	#[must_use = "method returns the modified value"]
	pub fn union(self, other: Self) -> Self {
		let x1 = min(self.x, other.x);
		let y1 = min(self.y, other.y);
		let x2 = max(self.right(), other.right());
		let y2 = max(self.bottom(), other.bottom());
		Self::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
	}

	/// Returns a new `Rect` that is the intersection of the current one and the given one.
	///
	/// If the two `Rect`s do not intersect, the returned `Rect` will have no area.
	#[must_use = "method returns the modified value"]
	pub fn intersection(self, other: Self) -> Self {
		let x1 = max(self.x, other.x);
		let y1 = max(self.y, other.y);
		let x2 = min(self.right(), other.right());
		let y2 = min(self.bottom(), other.bottom());
		Self::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
	}

	/// Returns true if the two `Rect`s overlap.
	pub const fn intersects(self, other: Self) -> bool {
		self.x < other.right()
			&& self.right() > other.x
			&& self.y < other.bottom()
			&& self.bottom() > other.y
	}

	/// Returns true if the cell at `(x, y)` is inside the `Rect`.
	pub const fn contains(self, x: i32, y: i32) -> bool {
		x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
	}

	/// Converts the `Rect` into its size.
	pub const fn as_size(self) -> Size {
		Size {
			width: self.width,
			height: self.height,
		}
	}
}

impl From<Size> for Rect {
	/// Creates a new `Rect` with the given size at the origin.
	fn from(size: Size) -> Self {
		Self::new(0, 0, size.width, size.height)
	}
}
