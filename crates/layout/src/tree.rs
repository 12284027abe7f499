//! The view arena.
//!
//! [`ViewTree`] stores every view in generational slots. Each view has a parent link,
//! children in insertion order (the order alignment groups use), its [`ViewLayout`]
//! expressions, an optional debug name, and the frame committed by the last successful
//! layout pass.
//!
//! The tree is read-only outside the crate; mutations go through
//! [`LayoutEngine`](crate::LayoutEngine) so they can invalidate the layout.

use rustc_hash::FxHashMap;
use trellis_primitives::{Axis, Rect, Size, Thickness};

use crate::error::{LayoutError, Result};
use crate::expr::{Dim, Pos};
use crate::ViewId;

/// The layout expressions of one view.
///
/// Built with chained setters:
///
/// ```
/// use trellis_layout::{Dim, Pos, ViewLayout};
/// use trellis_primitives::Thickness;
///
/// let layout = ViewLayout::default()
/// 	.x(Pos::center())
/// 	.y(Pos::anchor_end(1))
/// 	.width(Dim::percent(50))
/// 	.height(Dim::absolute(3))
/// 	.adornment(Thickness::uniform(1));
/// # let _ = layout;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewLayout {
	/// Horizontal position.
	pub x: Pos,
	/// Vertical position.
	pub y: Pos,
	/// Horizontal extent.
	pub width: Dim,
	/// Vertical extent.
	pub height: Dim,
	/// Border + padding + margin between the frame and the content box.
	pub adornment: Thickness,
}

impl ViewLayout {
	/// Sets the horizontal position.
	#[must_use]
	pub fn x(mut self, pos: impl Into<Pos>) -> Self {
		self.x = pos.into();
		self
	}

	/// Sets the vertical position.
	#[must_use]
	pub fn y(mut self, pos: impl Into<Pos>) -> Self {
		self.y = pos.into();
		self
	}

	/// Sets the horizontal extent.
	#[must_use]
	pub fn width(mut self, dim: impl Into<Dim>) -> Self {
		self.width = dim.into();
		self
	}

	/// Sets the vertical extent.
	#[must_use]
	pub fn height(mut self, dim: impl Into<Dim>) -> Self {
		self.height = dim.into();
		self
	}

	/// Sets the adornment thickness.
	#[must_use]
	pub fn adornment(mut self, adornment: Thickness) -> Self {
		self.adornment = adornment;
		self
	}

	/// The position expression along `axis`.
	pub fn position(&self, axis: Axis) -> &Pos {
		match axis {
			Axis::Horizontal => &self.x,
			Axis::Vertical => &self.y,
		}
	}

	/// The size expression along `axis`.
	pub fn size(&self, axis: Axis) -> &Dim {
		match axis {
			Axis::Horizontal => &self.width,
			Axis::Vertical => &self.height,
		}
	}

	pub(crate) fn set_position(&mut self, axis: Axis, pos: Pos) {
		match axis {
			Axis::Horizontal => self.x = pos,
			Axis::Vertical => self.y = pos,
		}
	}

	pub(crate) fn set_size(&mut self, axis: Axis, dim: Dim) {
		match axis {
			Axis::Horizontal => self.width = dim,
			Axis::Vertical => self.height = dim,
		}
	}
}

/// A live view.
#[derive(Debug)]
pub(crate) struct ViewNode {
	pub parent: Option<ViewId>,
	pub children: Vec<ViewId>,
	pub layout: ViewLayout,
	pub name: Option<String>,
	/// Relative to the parent's content box.
	pub frame: Rect,
}

/// A slot in the view storage with generational tracking.
#[derive(Debug)]
struct Slot {
	/// Incremented each time the slot's view is removed.
	generation: u32,
	node: Option<ViewNode>,
}

/// Arena of views with parent/child links.
#[derive(Debug, Default)]
pub struct ViewTree {
	slots: Vec<Slot>,
	free: Vec<u32>,
	len: usize,
}

impl ViewTree {
	/// Creates an empty tree.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of live views.
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns `true` if the tree has no views.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns `true` if `view` is live (not removed, not stale).
	pub fn contains(&self, view: ViewId) -> bool {
		self.node(view).is_some()
	}

	pub(crate) fn node(&self, view: ViewId) -> Option<&ViewNode> {
		let slot = self.slots.get(view.index())?;
		if slot.generation != view.generation {
			return None;
		}
		slot.node.as_ref()
	}

	fn node_mut(&mut self, view: ViewId) -> Option<&mut ViewNode> {
		let slot = self.slots.get_mut(view.index())?;
		if slot.generation != view.generation {
			return None;
		}
		slot.node.as_mut()
	}

	/// Adds a view as the last child of `parent`, or as a new root.
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `parent` is not live.
	pub(crate) fn insert(&mut self, parent: Option<ViewId>, layout: ViewLayout) -> Result<ViewId> {
		if let Some(parent) = parent
			&& !self.contains(parent)
		{
			return Err(LayoutError::ViewNotFound(parent));
		}

		let node = ViewNode {
			parent,
			children: Vec::new(),
			layout,
			name: None,
			frame: Rect::ZERO,
		};
		let id = match self.free.pop() {
			Some(idx) => {
				let slot = &mut self.slots[idx as usize];
				slot.node = Some(node);
				ViewId::new(idx, slot.generation)
			}
			None => {
				let idx = self.slots.len() as u32;
				self.slots.push(Slot {
					generation: 0,
					node: Some(node),
				});
				ViewId::new(idx, 0)
			}
		};
		if let Some(parent) = parent
			&& let Some(node) = self.node_mut(parent)
		{
			node.children.push(id);
		}
		self.len += 1;
		Ok(id)
	}

	/// Removes `view` and its whole subtree, returning the removed ids in pre-order.
	///
	/// The slots' generations are bumped so any id still held elsewhere goes stale.
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `view` is not live.
	pub(crate) fn remove(&mut self, view: ViewId) -> Result<Vec<ViewId>> {
		let parent = self.node(view).ok_or(LayoutError::ViewNotFound(view))?.parent;
		let removed = self.subtree(view);

		if let Some(parent) = parent
			&& let Some(node) = self.node_mut(parent)
		{
			node.children.retain(|&child| child != view);
		}
		for &id in &removed {
			let slot = &mut self.slots[id.index()];
			slot.node = None;
			slot.generation = slot.generation.wrapping_add(1);
			self.free.push(id.idx);
		}
		self.len -= removed.len();
		Ok(removed)
	}

	/// Parent of `view`, or `None` for roots and unknown views.
	pub fn parent(&self, view: ViewId) -> Option<ViewId> {
		self.node(view)?.parent
	}

	/// Children of `view` in insertion order; empty for unknown views.
	pub fn children(&self, view: ViewId) -> &[ViewId] {
		match self.node(view) {
			Some(node) => &node.children,
			None => &[],
		}
	}

	/// Views without a parent, in slot order.
	pub fn roots(&self) -> Vec<ViewId> {
		self.iter()
			.filter(|&view| self.parent(view).is_none())
			.collect()
	}

	/// All live views in slot order.
	pub fn iter(&self) -> impl Iterator<Item = ViewId> + '_ {
		self.slots.iter().enumerate().filter_map(|(idx, slot)| {
			slot.node
				.as_ref()
				.map(|_| ViewId::new(idx as u32, slot.generation))
		})
	}

	/// `view` and its descendants in pre-order; empty for unknown views.
	pub fn subtree(&self, view: ViewId) -> Vec<ViewId> {
		let mut out = Vec::new();
		if !self.contains(view) {
			return out;
		}
		let mut stack = vec![view];
		while let Some(next) = stack.pop() {
			out.push(next);
			stack.extend(self.children(next).iter().rev());
		}
		out
	}

	/// Returns `true` if `view` is `ancestor` or one of its descendants.
	pub fn is_within(&self, view: ViewId, ancestor: ViewId) -> bool {
		let mut current = Some(view);
		while let Some(next) = current {
			if next == ancestor {
				return self.contains(next);
			}
			current = self.parent(next);
		}
		false
	}

	/// Number of ancestors of `view`.
	pub fn depth(&self, view: ViewId) -> usize {
		let mut depth = 0;
		let mut current = self.parent(view);
		while let Some(parent) = current {
			depth += 1;
			current = self.parent(parent);
		}
		depth
	}

	/// The layout expressions of `view`.
	pub fn layout(&self, view: ViewId) -> Option<&ViewLayout> {
		Some(&self.node(view)?.layout)
	}

	pub(crate) fn layout_mut(&mut self, view: ViewId) -> Option<&mut ViewLayout> {
		Some(&mut self.node_mut(view)?.layout)
	}

	/// Debug name of `view`, if one was set.
	pub fn name(&self, view: ViewId) -> Option<&str> {
		self.node(view)?.name.as_deref()
	}

	pub(crate) fn set_name(&mut self, view: ViewId, name: String) -> Result<()> {
		let node = self.node_mut(view).ok_or(LayoutError::ViewNotFound(view))?;
		node.name = Some(name);
		Ok(())
	}

	/// Finds the first live view (in slot order) named `name`.
	pub fn find_by_name(&self, name: &str) -> Option<ViewId> {
		self.iter().find(|&view| self.name(view) == Some(name))
	}

	/// The debug name of `view`, falling back to its id.
	pub fn label(&self, view: ViewId) -> String {
		self.name(view)
			.map_or_else(|| view.to_string(), ToOwned::to_owned)
	}

	/// Frame committed by the last successful pass, relative to the parent's content box.
	pub fn frame(&self, view: ViewId) -> Option<Rect> {
		Some(self.node(view)?.frame)
	}

	pub(crate) fn set_frame(&mut self, view: ViewId, frame: Rect) {
		if let Some(node) = self.node_mut(view) {
			node.frame = frame;
		}
	}

	/// Size of the area children of `view` are laid out in.
	pub fn content_size(&self, view: ViewId) -> Option<Size> {
		let node = self.node(view)?;
		Some(node.frame.inner(node.layout.adornment).as_size())
	}

	/// Frame of `view` in absolute (root) coordinates.
	pub fn screen_frame(&self, view: ViewId) -> Option<Rect> {
		self.screen_frame_with(view, &FxHashMap::default())
	}

	/// Like [`Self::screen_frame`], preferring frames from `overlay` over committed ones.
	pub(crate) fn screen_frame_with(
		&self,
		view: ViewId,
		overlay: &FxHashMap<ViewId, Rect>,
	) -> Option<Rect> {
		let node = self.node(view)?;
		let local = overlay.get(&view).copied().unwrap_or(node.frame);
		let Some(parent) = node.parent else {
			return Some(local);
		};
		let (dx, dy) = self.content_origin_with(parent, overlay)?;
		Some(local.offset(dx, dy))
	}

	/// Absolute origin of the content box of `view`.
	pub(crate) fn content_origin_with(
		&self,
		view: ViewId,
		overlay: &FxHashMap<ViewId, Rect>,
	) -> Option<(i32, i32)> {
		let screen = self.screen_frame_with(view, overlay)?;
		let adornment = self.layout(view)?.adornment;
		Some((
			screen.x.saturating_add(adornment.left),
			screen.y.saturating_add(adornment.top),
		))
	}
}
