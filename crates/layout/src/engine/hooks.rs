use trellis_primitives::{Axis, Rect, Thickness};

use crate::expr::{Dim, Pos};
use crate::ViewId;

/// Passed to layout-complete hooks for every view of a committed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutComplete {
	/// The view whose frame was resolved.
	pub view: ViewId,
	/// Its frame, relative to the parent's content box.
	pub frame: Rect,
	/// Number of the pass that produced the frame.
	pub pass: u64,
}

/// A layout-complete callback.
///
/// Hooks cannot touch the engine directly. Changes requested through [`PendingChanges`]
/// are applied once every hook of the pass has run and take effect in the next pass.
pub type LayoutHook = Box<dyn FnMut(&LayoutComplete, &mut PendingChanges)>;

#[derive(Debug, Clone)]
pub(super) enum Change {
	Position(ViewId, Axis, Pos),
	Size(ViewId, Axis, Dim),
	Adornment(ViewId, Thickness),
	Invalidate(ViewId),
}

/// Layout changes queued by hooks, in request order.
#[derive(Debug, Default, Clone)]
pub struct PendingChanges {
	changes: Vec<Change>,
}

impl PendingChanges {
	/// Queues [`LayoutEngine::set_position`](crate::LayoutEngine::set_position).
	pub fn set_position(&mut self, view: ViewId, axis: Axis, pos: impl Into<Pos>) {
		self.changes.push(Change::Position(view, axis, pos.into()));
	}

	/// Queues [`LayoutEngine::set_size`](crate::LayoutEngine::set_size).
	pub fn set_size(&mut self, view: ViewId, axis: Axis, dim: impl Into<Dim>) {
		self.changes.push(Change::Size(view, axis, dim.into()));
	}

	/// Queues [`LayoutEngine::set_adornment`](crate::LayoutEngine::set_adornment).
	pub fn set_adornment(&mut self, view: ViewId, adornment: Thickness) {
		self.changes.push(Change::Adornment(view, adornment));
	}

	/// Queues [`LayoutEngine::invalidate_layout`](crate::LayoutEngine::invalidate_layout).
	pub fn invalidate_layout(&mut self, view: ViewId) {
		self.changes.push(Change::Invalidate(view));
	}

	pub fn len(&self) -> usize {
		self.changes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.changes.is_empty()
	}

	pub(super) fn drain(&mut self) -> impl Iterator<Item = Change> + '_ {
		self.changes.drain(..)
	}
}
