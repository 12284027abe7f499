//! Geometry value types for the trellis layout resolver: rectangles, sizes, adornment
//! thickness and the axis/side vocabulary used by layout expressions.

/// Axis, dimension and edge vocabulary.
pub mod direction;
/// Rectangles, sizes and adornment thickness.
pub mod geometry;

pub use direction::{Axis, Dimension, Side};
pub use geometry::{Rect, Size, Thickness};
