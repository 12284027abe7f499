use core::ops::Add;

use serde::{Deserialize, Serialize};

/// Per-side thickness of a view's adornments.
///
/// A view's border, padding and margin each take cells away from the frame before children
/// are laid out. Their sum is the `Thickness` between the frame and the content box; adding
/// two thicknesses stacks the adornments.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Thickness {
	/// Cells removed from the left edge.
	pub left: i32,
	/// Cells removed from the top edge.
	pub top: i32,
	/// Cells removed from the right edge.
	pub right: i32,
	/// Cells removed from the bottom edge.
	pub bottom: i32,
}

impl Thickness {
	/// No adornment.
	pub const ZERO: Self = Self::uniform(0);

	/// Creates a thickness from explicit sides, clamping negative values to zero.
	pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
		const fn non_negative(v: i32) -> i32 {
			if v < 0 { 0 } else { v }
		}
		Self {
			left: non_negative(left),
			top: non_negative(top),
			right: non_negative(right),
			bottom: non_negative(bottom),
		}
	}

	/// The same thickness on every side, e.g. a single-line border.
	pub const fn uniform(value: i32) -> Self {
		Self::new(value, value, value, value)
	}

	/// `horizontal` cells on the left and right, `vertical` on the top and bottom.
	pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
		Self::new(horizontal, vertical, horizontal, vertical)
	}

	/// Total thickness along the horizontal axis.
	pub const fn horizontal(self) -> i32 {
		self.left.saturating_add(self.right)
	}

	/// Total thickness along the vertical axis.
	pub const fn vertical(self) -> i32 {
		self.top.saturating_add(self.bottom)
	}
}

impl Add for Thickness {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::new(
			self.left.saturating_add(rhs.left),
			self.top.saturating_add(rhs.top),
			self.right.saturating_add(rhs.right),
			self.bottom.saturating_add(rhs.bottom),
		)
	}
}
