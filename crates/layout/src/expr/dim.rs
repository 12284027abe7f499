use core::fmt;
use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use trellis_primitives::Dimension;

use super::{Op, Targets};
use crate::resolve::{Deferred, EvalContext};
use crate::{LayoutError, ViewId};

/// What a [`Dim::Percent`] is a percentage of.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentBasis {
	/// The parent's whole content span.
	#[default]
	BeforeOffset,
	/// The part of the parent's content span after the view's own position.
	AfterOffset,
}

/// How a view's extent along one axis is computed.
///
/// Sizes never resolve below zero; negative results clamp.
///
/// # Examples
///
/// ```
/// use trellis_layout::Dim;
///
/// // Everything right of the view's position except a 2-cell margin.
/// let width = Dim::fill(2);
/// // Half the parent, minus one cell.
/// let height = Dim::percent(50) - 1;
/// # let _ = (width, height);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dim {
	/// A fixed extent. Negative values clamp to zero.
	Absolute(i32),
	/// Extends to the parent's far edge minus `margin`.
	Fill(i32),
	/// A percentage (0..=100) of the parent span.
	Percent {
		/// The percentage; out-of-range values clamp.
		percent: i32,
		/// Whole span, or the span after the view's position.
		basis: PercentBasis,
	},
	/// Derived from measured content (and absolutely placed children), clamped to
	/// `min..=max`.
	Auto {
		/// Lower bound.
		min: i32,
		/// Upper bound; `i32::MAX` for none.
		max: i32,
	},
	/// Copies the width or height of another view.
	Match {
		/// The view whose extent is read.
		target: ViewId,
		/// Which of its extents.
		dimension: Dimension,
	},
	/// Arithmetic over two sizes.
	Combine(Box<Dim>, Op, Box<Dim>),
}

impl Default for Dim {
	fn default() -> Self {
		Self::auto()
	}
}

impl Dim {
	/// A fixed extent.
	pub const fn absolute(cells: i32) -> Self {
		Self::Absolute(cells)
	}

	/// To the parent's far edge minus `margin`.
	pub const fn fill(margin: i32) -> Self {
		Self::Fill(margin)
	}

	/// A percentage of the parent's whole span.
	pub const fn percent(percent: i32) -> Self {
		Self::Percent {
			percent,
			basis: PercentBasis::BeforeOffset,
		}
	}

	/// A percentage of the parent span remaining after the view's position.
	pub const fn percent_after_offset(percent: i32) -> Self {
		Self::Percent {
			percent,
			basis: PercentBasis::AfterOffset,
		}
	}

	/// Content-driven with no bounds.
	pub const fn auto() -> Self {
		Self::auto_between(0, i32::MAX)
	}

	/// Content-driven, clamped to `min..=max`.
	pub const fn auto_between(min: i32, max: i32) -> Self {
		Self::Auto { min, max }
	}

	/// The width of `target`.
	pub const fn width_of(target: ViewId) -> Self {
		Self::Match {
			target,
			dimension: Dimension::Width,
		}
	}

	/// The height of `target`.
	pub const fn height_of(target: ViewId) -> Self {
		Self::Match {
			target,
			dimension: Dimension::Height,
		}
	}

	/// Returns `true` if the expression contains a content-driven node.
	pub fn is_auto(&self) -> bool {
		match self {
			Self::Auto { .. } => true,
			Self::Combine(left, _, right) => left.is_auto() || right.is_auto(),
			_ => false,
		}
	}

	/// Returns `true` if the extent depends on the parent's span.
	///
	/// Such views do not contribute to a content-driven parent's measured size.
	pub(crate) fn reads_parent(&self) -> bool {
		match self {
			Self::Fill(_) | Self::Percent { .. } => true,
			Self::Combine(left, _, right) => left.reads_parent() || right.reads_parent(),
			_ => false,
		}
	}

	/// Appends every view this expression reads from.
	pub(crate) fn targets(&self, out: &mut Targets) {
		match self {
			Self::Match { target, .. } => out.push(*target),
			Self::Combine(left, _, right) => {
				left.targets(out);
				right.targets(out);
			}
			_ => {}
		}
	}

	/// Resolves the expression to an extent, clamped to zero.
	///
	/// A negative `Absolute` at the top level is recorded as an invalid expression; negative
	/// intermediate values inside `Combine` are ordinary arithmetic.
	pub(crate) fn resolve(&self, cx: &mut EvalContext<'_>) -> Result<i32, Deferred> {
		if let Self::Absolute(cells) = self
			&& *cells < 0
		{
			cx.record(LayoutError::InvalidExpression {
				view: cx.view,
				reason: format!("absolute size {cells} is negative, clamped to 0"),
			});
		}
		Ok(self.eval(cx)?.max(0))
	}

	fn eval(&self, cx: &mut EvalContext<'_>) -> Result<i32, Deferred> {
		match self {
			Self::Absolute(cells) => Ok(*cells),
			Self::Fill(margin) => Ok(cx
				.span
				.saturating_sub(cx.own_position()?)
				.saturating_sub(*margin)),
			Self::Percent { percent, basis } => {
				let base = match basis {
					PercentBasis::BeforeOffset => cx.span,
					PercentBasis::AfterOffset => cx.span.saturating_sub(cx.own_position()?),
				};
				Ok(cx.percent_of(base, *percent))
			}
			Self::Auto { min, max } => {
				let max = (*max).max(*min);
				Ok(cx.content.clamp(*min, max))
			}
			Self::Match { target, dimension } => cx.extent(*target, *dimension),
			Self::Combine(left, op, right) => {
				let left = left.eval(cx)?;
				let right = right.eval(cx)?;
				Ok(op.apply(left, right))
			}
		}
	}
}

impl fmt::Display for Dim {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Absolute(cells) => write!(f, "{cells}"),
			Self::Fill(margin) => write!(f, "fill({margin})"),
			Self::Percent {
				percent,
				basis: PercentBasis::BeforeOffset,
			} => write!(f, "percent({percent})"),
			Self::Percent {
				percent,
				basis: PercentBasis::AfterOffset,
			} => write!(f, "percent_after_offset({percent})"),
			Self::Auto { min, max: i32::MAX } => write!(f, "auto(min: {min})"),
			Self::Auto { min, max } => write!(f, "auto({min}..={max})"),
			Self::Match { target, dimension } => write!(f, "{dimension:?}({target})"),
			Self::Combine(left, op, right) => write!(f, "({left} {op} {right})"),
		}
	}
}

impl From<i32> for Dim {
	fn from(cells: i32) -> Self {
		Self::Absolute(cells)
	}
}

impl Add<Dim> for Dim {
	type Output = Dim;

	fn add(self, rhs: Dim) -> Dim {
		Dim::Combine(Box::new(self), Op::Add, Box::new(rhs))
	}
}

impl Sub<Dim> for Dim {
	type Output = Dim;

	fn sub(self, rhs: Dim) -> Dim {
		Dim::Combine(Box::new(self), Op::Subtract, Box::new(rhs))
	}
}

impl Add<i32> for Dim {
	type Output = Dim;

	fn add(self, rhs: i32) -> Dim {
		self + Dim::Absolute(rhs)
	}
}

impl Sub<i32> for Dim {
	type Output = Dim;

	fn sub(self, rhs: i32) -> Dim {
		self - Dim::Absolute(rhs)
	}
}
