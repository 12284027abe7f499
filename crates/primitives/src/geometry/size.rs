use core::fmt;

use serde::{Deserialize, Serialize};

use crate::Axis;

/// A width/height pair in cells.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Size {
	/// Horizontal extent.
	pub width: i32,
	/// Vertical extent.
	pub height: i32,
}

impl Size {
	/// A size with no extent.
	pub const ZERO: Self = Self {
		width: 0,
		height: 0,
	};

	/// Creates a new `Size`, clamping negative extents to zero.
	pub const fn new(width: i32, height: i32) -> Self {
		Self {
			width: if width < 0 { 0 } else { width },
			height: if height < 0 { 0 } else { height },
		}
	}

	/// Returns the extent along `axis`.
	pub const fn extent(self, axis: Axis) -> i32 {
		match axis {
			Axis::Horizontal => self.width,
			Axis::Vertical => self.height,
		}
	}

	/// Returns a copy with the extent along `axis` replaced.
	#[must_use = "method returns the modified value"]
	pub const fn with_extent(self, axis: Axis, value: i32) -> Self {
		match axis {
			Axis::Horizontal => Self::new(value, self.height),
			Axis::Vertical => Self::new(self.width, value),
		}
	}
}

impl From<(i32, i32)> for Size {
	fn from((width, height): (i32, i32)) -> Self {
		Self::new(width, height)
	}
}

impl fmt::Display for Size {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}x{}", self.width, self.height)
	}
}
