//! Position and size expressions.
//!
//! [`Pos`] and [`Dim`] are immutable values. Changing how a view is laid out means building
//! a new expression and handing it to
//! [`LayoutEngine::set_position`](crate::LayoutEngine::set_position) or
//! [`LayoutEngine::set_size`](crate::LayoutEngine::set_size), which replace the old one and
//! invalidate the layout. Nothing inside an expression observes changes.

mod dim;
mod pos;

use core::fmt;

pub use dim::{Dim, PercentBasis};
pub use pos::Pos;
use serde::{Deserialize, Serialize};

use crate::ViewId;

/// Arithmetic operator of a `Combine` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
	/// `left + right`
	#[serde(rename = "+", alias = "add")]
	Add,
	/// `left - right`
	#[serde(rename = "-", alias = "subtract")]
	Subtract,
}

impl Op {
	pub(crate) fn apply(self, left: i32, right: i32) -> i32 {
		match self {
			Self::Add => left.saturating_add(right),
			Self::Subtract => left.saturating_sub(right),
		}
	}
}

impl fmt::Display for Op {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Add => "+",
			Self::Subtract => "-",
		})
	}
}

/// Identifies an alignment group among the children of one parent.
///
/// Group ids are scoped by parent and axis: the same id under two different parents, or
/// on the X and Y axes of the same parent, names two independent groups.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i32);

impl fmt::Display for GroupId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "group {}", self.0)
	}
}

/// Collects the views an expression reads from.
pub(crate) type Targets = smallvec::SmallVec<[ViewId; 2]>;
