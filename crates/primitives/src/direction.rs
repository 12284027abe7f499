use serde::{Deserialize, Serialize};

/// One of the two layout axes.
///
/// Every position and size expression is attached to exactly one axis; the resolver handles
/// the horizontal and vertical axes independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
	/// X / width.
	Horizontal,
	/// Y / height.
	Vertical,
}

impl Axis {
	/// Both axes, horizontal first.
	pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

	/// Returns the perpendicular axis.
	pub const fn other(self) -> Self {
		match self {
			Self::Horizontal => Self::Vertical,
			Self::Vertical => Self::Horizontal,
		}
	}

	/// Returns the extent measured along this axis.
	pub const fn dimension(self) -> Dimension {
		match self {
			Self::Horizontal => Dimension::Width,
			Self::Vertical => Dimension::Height,
		}
	}
}

/// An extent of a view: its width or its height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
	/// Horizontal extent.
	Width,
	/// Vertical extent.
	Height,
}

impl Dimension {
	/// Returns the axis this dimension is measured along.
	pub const fn axis(self) -> Axis {
		match self {
			Self::Width => Axis::Horizontal,
			Self::Height => Axis::Vertical,
		}
	}
}

/// An edge of a view's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
	/// The left edge (`x`).
	Left,
	/// The top edge (`y`).
	Top,
	/// The right edge (`x + width`), exclusive.
	Right,
	/// The bottom edge (`y + height`), exclusive.
	Bottom,
}

impl Side {
	/// Returns the axis the edge coordinate lies on.
	pub const fn axis(self) -> Axis {
		match self {
			Self::Left | Self::Right => Axis::Horizontal,
			Self::Top | Self::Bottom => Axis::Vertical,
		}
	}

	/// Returns `true` for the far edges (right and bottom).
	pub const fn is_far(self) -> bool {
		matches!(self, Self::Right | Self::Bottom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn other_axis_flips() {
		assert_eq!(Axis::Horizontal.other(), Axis::Vertical);
		assert_eq!(Axis::Vertical.other(), Axis::Horizontal);
	}

	#[test]
	fn sides_map_to_axes() {
		assert_eq!(Side::Left.axis(), Axis::Horizontal);
		assert_eq!(Side::Bottom.axis(), Axis::Vertical);
		assert!(Side::Right.is_far());
		assert!(!Side::Top.is_far());
	}

	#[test]
	fn dimension_round_trips_through_axis() {
		for axis in Axis::ALL {
			assert_eq!(axis.dimension().axis(), axis);
		}
	}
}
