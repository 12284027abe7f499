use core::fmt;
use core::ops::{Add, Sub};

use trellis_primitives::Side;

use super::{GroupId, Op, Targets};
use crate::align::{AlignmentFlags, AlignmentMode};
use crate::resolve::{Deferred, EvalContext};
use crate::ViewId;

/// How a view's origin along one axis is computed.
///
/// Positions are relative to the parent's content box.
///
/// # Examples
///
/// ```
/// use trellis_layout::{AlignmentMode, GroupId, Pos};
///
/// // One cell left of centre.
/// let x = Pos::center() - 1;
/// // Three cells in from the far edge.
/// let y = Pos::anchor_end(3);
/// // A member of alignment group 1.
/// let z = Pos::align(GroupId(1), AlignmentMode::Center);
/// # let _ = (x, y, z);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pos {
	/// A fixed offset from the content box origin.
	Absolute(i32),
	/// Centred in the parent span: `(span - size) / 2`, rounded down.
	Center,
	/// A percentage (0..=100) of the parent span. Out-of-range values clamp.
	Percent(i32),
	/// Places the view so its far edge sits `margin` cells from the parent's far edge.
	AnchorEnd(i32),
	/// An edge of another view plus `offset`.
	Relative {
		/// The view whose edge is read.
		target: ViewId,
		/// Which edge.
		side: Side,
		/// Added to the edge coordinate.
		offset: i32,
	},
	/// A member of an alignment group, placed by [`align`](crate::align()).
	Align {
		/// The group, scoped to the parent and axis.
		group: GroupId,
		/// Distribution mode; the first member's mode wins if members disagree.
		mode: AlignmentMode,
		/// Spacing and pinning modifiers.
		flags: AlignmentFlags,
	},
	/// Arithmetic over two positions.
	Combine(Box<Pos>, Op, Box<Pos>),
}

impl Default for Pos {
	fn default() -> Self {
		Self::Absolute(0)
	}
}

impl Pos {
	/// A fixed offset.
	pub const fn absolute(cells: i32) -> Self {
		Self::Absolute(cells)
	}

	/// Centred in the parent.
	pub const fn center() -> Self {
		Self::Center
	}

	/// A percentage of the parent span.
	pub const fn percent(percent: i32) -> Self {
		Self::Percent(percent)
	}

	/// Far edge `margin` cells from the parent's far edge.
	pub const fn anchor_end(margin: i32) -> Self {
		Self::AnchorEnd(margin)
	}

	/// The left edge of `target`.
	pub const fn left(target: ViewId) -> Self {
		Self::edge(target, Side::Left)
	}

	/// The right edge of `target` (one past its last column).
	pub const fn right(target: ViewId) -> Self {
		Self::edge(target, Side::Right)
	}

	/// The top edge of `target`.
	pub const fn top(target: ViewId) -> Self {
		Self::edge(target, Side::Top)
	}

	/// The bottom edge of `target` (one past its last row).
	pub const fn bottom(target: ViewId) -> Self {
		Self::edge(target, Side::Bottom)
	}

	/// `side` of `target`.
	pub const fn edge(target: ViewId, side: Side) -> Self {
		Self::Relative {
			target,
			side,
			offset: 0,
		}
	}

	/// A member of alignment group `group`, without modifiers.
	pub const fn align(group: GroupId, mode: AlignmentMode) -> Self {
		Self::Align {
			group,
			mode,
			flags: AlignmentFlags::empty(),
		}
	}

	/// Replaces the alignment flags of an `Align` node (searching through `Combine`).
	///
	/// Other expressions are returned unchanged.
	#[must_use = "expressions are values; the result replaces the original"]
	pub fn with_flags(self, flags: AlignmentFlags) -> Self {
		match self {
			Self::Align { group, mode, .. } => Self::Align { group, mode, flags },
			Self::Combine(left, op, right) => Self::Combine(
				Box::new(left.with_flags(flags)),
				op,
				Box::new(right.with_flags(flags)),
			),
			other => other,
		}
	}

	/// Returns the alignment group this expression joins, if any.
	///
	/// The first `Align` node found (left operand first) decides membership, so
	/// `Pos::align(..) + 1` is still a group member whose position is offset by one.
	pub fn align_key(&self) -> Option<(GroupId, AlignmentMode, AlignmentFlags)> {
		match self {
			Self::Align { group, mode, flags } => Some((*group, *mode, *flags)),
			Self::Combine(left, _, right) => left.align_key().or_else(|| right.align_key()),
			_ => None,
		}
	}

	/// Returns `true` if evaluating needs the view's own extent along the axis.
	pub(crate) fn reads_own_size(&self) -> bool {
		match self {
			Self::Center | Self::AnchorEnd(_) => true,
			Self::Combine(left, _, right) => left.reads_own_size() || right.reads_own_size(),
			_ => false,
		}
	}

	/// Appends every view this expression reads from.
	pub(crate) fn targets(&self, out: &mut Targets) {
		match self {
			Self::Relative { target, .. } => out.push(*target),
			Self::Combine(left, _, right) => {
				left.targets(out);
				right.targets(out);
			}
			_ => {}
		}
	}

	/// Resolves the expression to a coordinate in the parent's content box.
	pub(crate) fn eval(&self, cx: &mut EvalContext<'_>) -> Result<i32, Deferred> {
		match self {
			Self::Absolute(cells) => Ok(*cells),
			Self::Center => Ok(cx.span.saturating_sub(cx.own_size()?).div_euclid(2)),
			Self::Percent(percent) => Ok(cx.percent_of(cx.span, *percent)),
			Self::AnchorEnd(margin) => Ok(cx
				.span
				.saturating_sub(*margin)
				.saturating_sub(cx.own_size()?)),
			Self::Relative {
				target,
				side,
				offset,
			} => Ok(cx.edge(*target, *side)?.saturating_add(*offset)),
			Self::Align { .. } => cx.group_offset(),
			Self::Combine(left, op, right) => {
				let left = left.eval(cx)?;
				let right = right.eval(cx)?;
				Ok(op.apply(left, right))
			}
		}
	}
}

impl fmt::Display for Pos {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Absolute(cells) => write!(f, "{cells}"),
			Self::Center => f.write_str("center()"),
			Self::Percent(percent) => write!(f, "percent({percent})"),
			Self::AnchorEnd(margin) => write!(f, "anchor_end({margin})"),
			Self::Relative {
				target,
				side,
				offset: 0,
			} => write!(f, "{side:?}({target})"),
			Self::Relative {
				target,
				side,
				offset,
			} => write!(f, "{side:?}({target}) + {offset}"),
			Self::Align { group, mode, .. } => write!(f, "align({group}, {mode})"),
			Self::Combine(left, op, right) => write!(f, "({left} {op} {right})"),
		}
	}
}

impl From<i32> for Pos {
	fn from(cells: i32) -> Self {
		Self::Absolute(cells)
	}
}

impl Add<Pos> for Pos {
	type Output = Pos;

	fn add(self, rhs: Pos) -> Pos {
		Pos::Combine(Box::new(self), Op::Add, Box::new(rhs))
	}
}

impl Sub<Pos> for Pos {
	type Output = Pos;

	fn sub(self, rhs: Pos) -> Pos {
		Pos::Combine(Box::new(self), Op::Subtract, Box::new(rhs))
	}
}

impl Add<i32> for Pos {
	type Output = Pos;

	fn add(self, rhs: i32) -> Pos {
		self + Pos::Absolute(rhs)
	}
}

impl Sub<i32> for Pos {
	type Output = Pos;

	fn sub(self, rhs: i32) -> Pos {
		self - Pos::Absolute(rhs)
	}
}
