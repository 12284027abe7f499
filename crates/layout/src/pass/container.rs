//! Resolution of one container's children.
//!
//! Every child has four components (x, y, width, height). A round sweeps the children in
//! dependency order resolving sizes, places every alignment group whose members' sizes are
//! known, then sweeps again for positions, retrying a view's size as soon as its position
//! lands. Rounds repeat while they make progress. A round without progress first tries to
//! break a view's own position/size loop (`Center` with `Fill`, say) by evaluating its
//! position as if it were zero cells wide; if there is nothing to break, the container is
//! stuck on a cycle.
//!
//! A view outside the container is only read once the pass has resolved it. A container
//! that still waits on such a view is set aside with its progress kept, and its resolved
//! components stay visible to the other containers.

use core::cell::Cell;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::{SmallVec, smallvec};
use trellis_primitives::{Axis, Rect, Size};

use super::{LayoutPass, LayoutPhase};
use crate::align::{AlignmentFlags, AlignmentMode, align};
use crate::error::{LayoutError, Result};
use crate::expr::GroupId;
use crate::resolve::{Component, EvalContext, FrameLookup, Lookup, sibling_order};
use crate::tree::ViewTree;
use crate::ViewId;

const fn axis_index(axis: Axis) -> usize {
	match axis {
		Axis::Horizontal => 0,
		Axis::Vertical => 1,
	}
}

/// Resolution state of one child.
#[derive(Debug, Default, Clone)]
struct Slot {
	position: [Option<i32>; 2],
	size: [Option<i32>; 2],
	/// Size a `Fill`-mode group member asked for; the group decides the final one.
	requested: [Option<i32>; 2],
	group_offset: [Option<i32>; 2],
	/// Member of a `Fill`-mode group on the axis.
	filled: [bool; 2],
	/// Evaluate the position as if the size were 0.
	assume_zero: [bool; 2],
	/// Read a view outside the container that the pass has not resolved yet.
	waiting: bool,
}

impl Slot {
	fn is_resolved(&self) -> bool {
		self.position.iter().chain(&self.size).all(Option::is_some)
	}

	fn partial(&self) -> Partial {
		Partial {
			position: self.position,
			size: self.size,
		}
	}

	fn frame(&self) -> Rect {
		let [x, y] = self.position.map(|v| v.unwrap_or(0));
		let [width, height] = self.size.map(|v| v.unwrap_or(0));
		Rect::new(x, y, width, height)
	}

	/// Extent the view's alignment group sees.
	fn group_size(&self, axis: usize) -> Option<i32> {
		self.size[axis]
			.or(self.requested[axis])
			.or(self.assume_zero[axis].then_some(0))
	}
}

#[derive(Debug)]
struct Group {
	id: GroupId,
	axis: Axis,
	mode: AlignmentMode,
	flags: AlignmentFlags,
	/// Indices into the children, in insertion order.
	members: SmallVec<[usize; 4]>,
	placed: bool,
}

/// Components resolved so far for a view of a container that was set aside.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct Partial {
	position: [Option<i32>; 2],
	size: [Option<i32>; 2],
}

/// The children being solved and what they are solved against.
#[derive(Debug)]
struct Container {
	parent: Option<ViewId>,
	children: Vec<ViewId>,
	index: FxHashMap<ViewId, usize>,
	order: Vec<usize>,
	span: Size,
	/// Absolute origin of the parent's content box.
	origin: (i32, i32),
	bound: usize,
}

/// A container and its resolution progress.
#[derive(Debug)]
pub(super) struct Job {
	cx: Container,
	slots: Vec<Slot>,
	groups: Vec<Group>,
}

/// Where a job stopped.
#[derive(Debug)]
pub(super) enum Solved {
	/// Every child resolved; frames in child order.
	Done(Vec<Rect>),
	/// Waiting on views outside the container. `progressed` tells whether this attempt
	/// resolved or anchored anything.
	Waiting { progressed: bool },
}

impl Job {
	pub fn children(&self) -> &[ViewId] {
		&self.cx.children
	}

	/// Children not fully resolved, in insertion order.
	pub fn unresolved(&self) -> Vec<ViewId> {
		unresolved(&self.cx.children, &self.slots)
	}

	/// Publishes the resolved components of every child.
	pub fn publish(&self, partial: &mut FxHashMap<ViewId, Partial>) {
		for (&view, slot) in self.cx.children.iter().zip(&self.slots) {
			partial.insert(view, slot.partial());
		}
	}
}

/// Frames as seen from inside one container.
struct Frames<'s> {
	tree: &'s ViewTree,
	index: &'s FxHashMap<ViewId, usize>,
	slots: &'s [Slot],
	scratch: &'s FxHashMap<ViewId, Rect>,
	partial: &'s FxHashMap<ViewId, Partial>,
	members: &'s FxHashSet<ViewId>,
	origin: (i32, i32),
	/// Set when a lookup hit a view of this pass that is not resolved yet.
	waiting: &'s Cell<bool>,
}

impl Frames<'_> {
	fn pending(&self) -> Lookup {
		self.waiting.set(true);
		Lookup::Pending
	}
}

impl FrameLookup for Frames<'_> {
	fn lookup(&self, target: ViewId, component: Component) -> Lookup {
		if let Some(&i) = self.index.get(&target) {
			let slot = &self.slots[i];
			let value = match component {
				Component::Position(axis) => slot.position[axis_index(axis)],
				Component::Size(axis) => slot.size[axis_index(axis)],
			};
			return value.map_or(Lookup::Pending, Lookup::Ready);
		}

		// Views this pass lays out are read only once resolved; the rest are committed.
		if self.members.contains(&target) && !self.scratch.contains_key(&target) {
			let Some(partial) = self.partial.get(&target) else {
				return self.pending();
			};
			let value = match component {
				Component::Position(axis) => {
					let a = axis_index(axis);
					let Some(local) = partial.position[a] else {
						return self.pending();
					};
					let Some(origin) = self
						.tree
						.parent(target)
						.and_then(|parent| self.tree.content_origin_with(parent, self.scratch))
					else {
						return self.pending();
					};
					let (from, to) = match axis {
						Axis::Horizontal => (origin.0, self.origin.0),
						Axis::Vertical => (origin.1, self.origin.1),
					};
					local.saturating_add(from).saturating_sub(to)
				}
				Component::Size(axis) => match partial.size[axis_index(axis)] {
					Some(size) => size,
					None => return self.pending(),
				},
			};
			return Lookup::Ready(value);
		}

		let Some(screen) = self.tree.screen_frame_with(target, self.scratch) else {
			return Lookup::Missing;
		};
		let local = screen.offset(self.origin.0.saturating_neg(), self.origin.1.saturating_neg());
		Lookup::Ready(match component {
			Component::Position(axis) => local.origin(axis),
			Component::Size(axis) => local.extent(axis),
		})
	}
}

impl LayoutPass<'_> {
	/// Sets up the resolution of `children`.
	///
	/// The parent's frame must already be in the scratch map (or committed, for the pass
	/// root's parent).
	pub(super) fn start_job(&self, parent: Option<ViewId>, children: Vec<ViewId>, span: Size) -> Job {
		let tree = self.tree;
		let (order, acyclic) = sibling_order(tree, &children);
		let bound = self.config.relaxation_bound.unwrap_or_else(|| {
			children
				.iter()
				.map(|&child| tree.subtree(child).len())
				.sum()
		});
		tracing::trace!(
			parent = ?parent.map(|view| tree.label(view)),
			children = children.len(),
			%span,
			acyclic,
			bound,
			"Solving container"
		);

		let mut slots = vec![Slot::default(); children.len()];
		let groups = collect_groups(tree, &children, &mut slots);
		let cx = Container {
			parent,
			index: children.iter().enumerate().map(|(i, &view)| (view, i)).collect(),
			children,
			order,
			span,
			origin: parent
				.and_then(|parent| tree.content_origin_with(parent, &self.frames))
				.unwrap_or((0, 0)),
			bound,
		};
		Job { cx, slots, groups }
	}

	/// Runs rounds on `job` until it is resolved, waits on another container, or is stuck.
	///
	/// # Errors
	///
	/// [`LayoutError::UnresolvableCycle`] when the children depend on each other.
	pub(super) fn advance(&mut self, job: &mut Job) -> Result<Solved> {
		let Job { cx, slots, groups } = job;
		let mut progressed = false;
		let mut rounds = 0;
		loop {
			let progress = self.round(cx, slots, groups);
			progressed |= progress;
			if slots.iter().all(Slot::is_resolved) {
				return Ok(Solved::Done(slots.iter().map(Slot::frame).collect()));
			}
			// Anchoring a view starts a fresh relaxation.
			let stuck = if progress {
				rounds += 1;
				rounds > cx.bound
			} else if break_cycle(cx, slots) {
				progressed = true;
				rounds = 0;
				false
			} else if slots.iter().any(|slot| slot.waiting) {
				tracing::trace!(
					parent = ?cx.parent.map(|view| self.tree.label(view)),
					progressed,
					"Container waits on views outside it"
				);
				return Ok(Solved::Waiting { progressed });
			} else {
				true
			};
			if stuck {
				let views = unresolved(&cx.children, slots);
				tracing::debug!(
					stuck = views.len(),
					rounds,
					phase = %self.phase,
					"Container did not converge"
				);
				return Err(LayoutError::UnresolvableCycle { views });
			}
		}
	}

	/// One sizes, groups, positions sweep. Returns whether anything resolved.
	fn round(&mut self, cx: &Container, slots: &mut [Slot], groups: &mut [Group]) -> bool {
		let mut progress = false;
		for slot in slots.iter_mut() {
			slot.waiting = false;
		}

		self.phase = LayoutPhase::MeasuringSizes;
		for &i in &cx.order {
			for axis in Axis::ALL {
				progress |= self.try_size(cx, slots, i, axis);
			}
		}

		self.phase = LayoutPhase::ResolvingGroups;
		for group in groups.iter_mut().filter(|group| !group.placed) {
			progress |= place_group(group, slots, cx.span);
		}

		self.phase = LayoutPhase::ResolvingPositions;
		for &i in &cx.order {
			for axis in Axis::ALL {
				if self.try_position(cx, slots, i, axis) {
					progress = true;
					// Fill and after-offset percentages were waiting on this.
					self.try_size(cx, slots, i, axis);
				}
			}
		}
		progress
	}

	fn try_size(&mut self, cx: &Container, slots: &mut [Slot], i: usize, axis: Axis) -> bool {
		let a = axis_index(axis);
		if slots[i].size[a].is_some() || slots[i].requested[a].is_some() {
			return false;
		}
		let tree = self.tree;
		let view = cx.children[i];
		let Some(layout) = tree.layout(view) else {
			return false;
		};
		let dim = layout.size(axis);

		let content = if dim.is_auto() {
			match self.content_extent(view, axis, slots[i].size[axis_index(Axis::Horizontal)]) {
				Some(extent) => extent,
				None => return false,
			}
		} else {
			0
		};

		let waiting = Cell::new(false);
		let frames = Frames {
			tree,
			index: &cx.index,
			slots,
			scratch: &self.frames,
			partial: &self.partial,
			members: &self.members,
			origin: cx.origin,
			waiting: &waiting,
		};
		let mut eval = EvalContext {
			view,
			axis,
			span: cx.span.extent(axis),
			own_position: slots[i].position[a],
			own_size: None,
			group_offset: None,
			content,
			frames: &frames,
			diagnostics: &mut self.diagnostics,
		};
		let Ok(value) = dim.resolve(&mut eval) else {
			slots[i].waiting |= waiting.get();
			return false;
		};

		if slots[i].filled[a] {
			slots[i].requested[a] = Some(value);
		} else {
			slots[i].size[a] = Some(value);
		}
		true
	}

	fn try_position(&mut self, cx: &Container, slots: &mut [Slot], i: usize, axis: Axis) -> bool {
		let a = axis_index(axis);
		if slots[i].position[a].is_some() {
			return false;
		}
		let tree = self.tree;
		let view = cx.children[i];
		let Some(layout) = tree.layout(view) else {
			return false;
		};

		let waiting = Cell::new(false);
		let frames = Frames {
			tree,
			index: &cx.index,
			slots,
			scratch: &self.frames,
			partial: &self.partial,
			members: &self.members,
			origin: cx.origin,
			waiting: &waiting,
		};
		let mut eval = EvalContext {
			view,
			axis,
			span: cx.span.extent(axis),
			own_position: None,
			own_size: slots[i].size[a].or(slots[i].assume_zero[a].then_some(0)),
			group_offset: slots[i].group_offset[a],
			content: 0,
			frames: &frames,
			diagnostics: &mut self.diagnostics,
		};
		let Ok(value) = layout.position(axis).eval(&mut eval) else {
			slots[i].waiting |= waiting.get();
			return false;
		};
		slots[i].position[a] = Some(value);
		true
	}
}

fn unresolved(children: &[ViewId], slots: &[Slot]) -> Vec<ViewId> {
	children
		.iter()
		.zip(slots)
		.filter(|(_, slot)| !slot.is_resolved())
		.map(|(&view, _)| view)
		.collect()
}

/// Groups the children's `Align` positions by `(group, axis)` in insertion order.
///
/// The first member decides the group's mode and flags.
fn collect_groups(tree: &ViewTree, children: &[ViewId], slots: &mut [Slot]) -> Vec<Group> {
	let mut groups: Vec<Group> = Vec::new();
	for axis in Axis::ALL {
		for (i, &child) in children.iter().enumerate() {
			let Some((id, mode, flags)) = tree
				.layout(child)
				.and_then(|layout| layout.position(axis).align_key())
			else {
				continue;
			};
			match groups
				.iter_mut()
				.find(|group| group.id == id && group.axis == axis)
			{
				Some(group) => group.members.push(i),
				None => groups.push(Group {
					id,
					axis,
					mode,
					flags,
					members: smallvec![i],
					placed: false,
				}),
			}
		}
	}

	for group in groups.iter().filter(|group| group.mode == AlignmentMode::Fill) {
		for &member in &group.members {
			slots[member].filled[axis_index(group.axis)] = true;
		}
	}
	groups
}

/// Places `group` if every member's extent is known.
fn place_group(group: &mut Group, slots: &mut [Slot], span: Size) -> bool {
	let a = axis_index(group.axis);
	let mut sizes: SmallVec<[i32; 4]> = SmallVec::with_capacity(group.members.len());
	for &member in &group.members {
		let Some(size) = slots[member].group_size(a) else {
			return false;
		};
		sizes.push(size);
	}

	let placements = align(&sizes, span.extent(group.axis), group.mode, group.flags);
	for (&member, placement) in group.members.iter().zip(placements) {
		slots[member].group_offset[a] = Some(placement.offset);
		if group.mode == AlignmentMode::Fill {
			slots[member].size[a] = Some(placement.size);
		}
	}
	group.placed = true;
	tracing::trace!(
		group = %group.id,
		axis = ?group.axis,
		mode = %group.mode,
		members = group.members.len(),
		"Placed alignment group"
	);
	true
}

/// Lets the first view stuck on its own position/size evaluate its position at size 0.
///
/// Views waiting on another container are left alone.
fn break_cycle(cx: &Container, slots: &mut [Slot]) -> bool {
	for &i in &cx.order {
		for axis in Axis::ALL {
			let a = axis_index(axis);
			let slot = &mut slots[i];
			if !slot.waiting
				&& slot.position[a].is_none()
				&& slot.size[a].is_none()
				&& !slot.assume_zero[a]
			{
				slot.assume_zero[a] = true;
				tracing::debug!(
					view = %cx.children[i],
					?axis,
					"Anchoring position at provisional size 0"
				);
				return true;
			}
		}
	}
	false
}
