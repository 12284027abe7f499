//! Bottom-up measurement of content-driven sizes.

use rustc_hash::FxHashMap;
use trellis_primitives::{Axis, Size};

use super::LayoutPass;
use crate::expr::{Dim, Pos};
use crate::tree::ViewLayout;
use crate::ViewId;

/// What a view would take up if nothing constrained it.
#[derive(Debug, Clone, Copy)]
pub(super) struct Natural {
	/// Frame extent: content or absolutely placed children, whichever is larger, plus
	/// adornment.
	pub size: Size,
	/// Far edges of the absolutely placed children, in content coordinates.
	pub children: Size,
	/// Width the content was measured at.
	pub measured_at: i32,
}

impl LayoutPass<'_> {
	/// Measures every view under `root`, children before parents.
	///
	/// Each view is measured at the widest content width it could take inside its
	/// parent's widest content width; the root's parent is `available_width` wide.
	pub(super) fn measure_subtree(&mut self, root: ViewId, available_width: i32) {
		let tree = self.tree;
		let order = tree.subtree(root);
		let mut bounds: FxHashMap<ViewId, i32> = FxHashMap::default();
		for &view in &order {
			let outer = tree
				.parent(view)
				.and_then(|parent| bounds.get(&parent).copied())
				.unwrap_or(available_width);
			if let Some(layout) = tree.layout(view) {
				bounds.insert(view, content_bound(layout, outer));
			}
		}
		for view in order.into_iter().rev() {
			if let Some(&measured_at) = bounds.get(&view) {
				self.measure_view(view, measured_at);
			}
		}
	}

	fn measure_view(&mut self, view: ViewId, measured_at: i32) {
		let tree = self.tree;
		let Some(layout) = tree.layout(view) else {
			return;
		};
		let adornment = layout.adornment;

		let mut children = Size::ZERO;
		for &child in tree.children(view) {
			let Some(child_layout) = tree.layout(child) else {
				continue;
			};
			let natural = self.natural.get(&child).map_or(Size::ZERO, |n| n.size);
			for axis in Axis::ALL {
				if let Some(far) = fixed_far_edge(child_layout, axis, natural.extent(axis)) {
					children = children.with_extent(axis, children.extent(axis).max(far));
				}
			}
		}

		let content = self.measure.measure(view, measured_at);
		let size = Size::new(
			content.width.max(children.width).saturating_add(adornment.horizontal()),
			content.height.max(children.height).saturating_add(adornment.vertical()),
		);
		tracing::trace!(view = %tree.label(view), %size, measured_at, "Measured natural size");
		self.natural.insert(
			view,
			Natural {
				size,
				children,
				measured_at,
			},
		);
	}

	/// Frame extent a content-driven size of `view` sees along `axis`.
	///
	/// With re-measurement enabled, the height is measured again at the resolved frame
	/// `width`; `None` means that width is not known yet.
	pub(super) fn content_extent(&self, view: ViewId, axis: Axis, width: Option<i32>) -> Option<i32> {
		let natural = self.natural.get(&view).copied()?;
		if axis == Axis::Horizontal || !self.config.remeasure_content() {
			return Some(natural.size.extent(axis));
		}

		let adornment = self.tree.layout(view)?.adornment;
		let content_width = width?.saturating_sub(adornment.horizontal()).max(0);
		if content_width == natural.measured_at {
			return Some(natural.size.height);
		}
		let content = self.measure.measure(view, content_width);
		Some(
			content
				.height
				.max(natural.children.height)
				.saturating_add(adornment.vertical()),
		)
	}
}

/// Widest content width a view may take when its parent's content is `outer` wide.
fn content_bound(layout: &ViewLayout, outer: i32) -> i32 {
	let widest = match layout.width {
		Dim::Absolute(cells) => cells,
		Dim::Auto { max, .. } => max.min(outer),
		_ => outer,
	};
	widest.saturating_sub(layout.adornment.horizontal()).max(0)
}

/// Far edge of a child whose position is absolute and whose size does not depend on the
/// parent.
fn fixed_far_edge(layout: &ViewLayout, axis: Axis, natural: i32) -> Option<i32> {
	let Pos::Absolute(origin) = layout.position(axis) else {
		return None;
	};
	Some(origin.saturating_add(fixed_extent(layout.size(axis), natural)?.max(0)))
}

fn fixed_extent(dim: &Dim, natural: i32) -> Option<i32> {
	match dim {
		Dim::Absolute(cells) => Some((*cells).max(0)),
		Dim::Auto { min, max } => Some(natural.clamp(*min, (*max).max(*min))),
		Dim::Combine(left, op, right) => Some(op.apply(
			fixed_extent(left, natural)?,
			fixed_extent(right, natural)?,
		)),
		Dim::Fill(_) | Dim::Percent { .. } | Dim::Match { .. } => None,
	}
}
