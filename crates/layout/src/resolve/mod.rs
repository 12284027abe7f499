//! Evaluation of a single expression.
//!
//! [`Pos::eval`](crate::Pos) and [`Dim::eval`](crate::Dim) turn an expression into a cell
//! count against an [`EvalContext`]. An expression that needs something not yet known
//! (its own size, a sibling's edge, its group's offset) returns [`Deferred`] naming the
//! missing input, and the container solver retries it later in the same pass.

mod order;

pub(crate) use order::sibling_order;
use trellis_primitives::{Axis, Dimension, Side};

use crate::{LayoutError, ViewId};

/// One resolvable quantity of a view's frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Component {
	Position(Axis),
	Size(Axis),
}

/// Why an expression could not be evaluated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deferred {
	/// The view's own extent along the axis is needed (`Center`, `AnchorEnd`).
	OwnSize,
	/// The view's own position along the axis is needed (`Fill`, after-offset percent).
	OwnPosition,
	/// A component of another view is not resolved yet (a sibling, or a view of a
	/// container the pass has not finished).
	Sibling(ViewId, Component),
	/// The alignment group has not been placed yet.
	Group,
}

/// Result of asking for another view's component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
	Ready(i32),
	Pending,
	Missing,
}

/// Source of other views' resolved components, in the parent's content coordinates.
pub(crate) trait FrameLookup {
	fn lookup(&self, target: ViewId, component: Component) -> Lookup;
}

/// Everything an expression may read while being evaluated.
pub(crate) struct EvalContext<'a> {
	/// The view owning the expression.
	pub view: ViewId,
	/// Axis the expression is attached to.
	pub axis: Axis,
	/// Extent of the parent's content box along `axis`.
	pub span: i32,
	pub own_position: Option<i32>,
	pub own_size: Option<i32>,
	pub group_offset: Option<i32>,
	/// Measured frame extent along `axis`, for content-driven sizes.
	pub content: i32,
	pub frames: &'a dyn FrameLookup,
	pub diagnostics: &'a mut Vec<LayoutError>,
}

impl EvalContext<'_> {
	pub fn own_size(&self) -> Result<i32, Deferred> {
		self.own_size.ok_or(Deferred::OwnSize)
	}

	pub fn own_position(&self) -> Result<i32, Deferred> {
		self.own_position.ok_or(Deferred::OwnPosition)
	}

	pub fn group_offset(&self) -> Result<i32, Deferred> {
		self.group_offset.ok_or(Deferred::Group)
	}

	/// Takes `percent` of `base`, clamping the percentage into `0..=100`.
	pub fn percent_of(&mut self, base: i32, percent: i32) -> i32 {
		let clamped = percent.clamp(0, 100);
		if clamped != percent {
			self.record(LayoutError::InvalidExpression {
				view: self.view,
				reason: format!("percent {percent} is outside 0..=100, clamped to {clamped}"),
			});
		}
		((i64::from(base) * i64::from(clamped)) / 100) as i32
	}

	/// Coordinate of `side` of `target`.
	///
	/// A target that left the tree reads as 0.
	pub fn edge(&mut self, target: ViewId, side: Side) -> Result<i32, Deferred> {
		let axis = side.axis();
		let Some(origin) = self.component(target, Component::Position(axis))? else {
			return Ok(0);
		};
		if !side.is_far() {
			return Ok(origin);
		}
		let Some(extent) = self.component(target, Component::Size(axis))? else {
			return Ok(0);
		};
		Ok(origin.saturating_add(extent))
	}

	/// Width or height of `target`.
	pub fn extent(&mut self, target: ViewId, dimension: Dimension) -> Result<i32, Deferred> {
		Ok(self
			.component(target, Component::Size(dimension.axis()))?
			.unwrap_or(0))
	}

	fn component(&mut self, target: ViewId, component: Component) -> Result<Option<i32>, Deferred> {
		match self.frames.lookup(target, component) {
			Lookup::Ready(value) => Ok(Some(value)),
			Lookup::Pending => Err(Deferred::Sibling(target, component)),
			Lookup::Missing => {
				self.record(LayoutError::TargetNotInTree {
					view: self.view,
					target,
				});
				Ok(None)
			}
		}
	}

	pub fn record(&mut self, error: LayoutError) {
		if !self.diagnostics.contains(&error) {
			tracing::debug!(view = %self.view, %error, "Recovered layout diagnostic");
			self.diagnostics.push(error);
		}
	}
}
