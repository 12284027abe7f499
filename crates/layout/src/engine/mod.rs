//! The public entry points: view mutation, invalidation, passes, and hooks.

mod hooks;

use core::fmt;

pub use hooks::{LayoutComplete, LayoutHook, PendingChanges};
use hooks::Change;
use rustc_hash::{FxHashMap, FxHashSet};
use trellis_primitives::{Axis, Rect, Size, Thickness};

use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::expr::{Dim, Pos};
use crate::measure::MeasureContent;
use crate::pass::{LayoutPass, LayoutPhase};
use crate::tree::{ViewLayout, ViewTree};
use crate::ViewId;

/// What a committed pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutReport {
	/// Number of this pass; increases by one per committed pass.
	pub pass: u64,
	/// Every view under the pass root, in pre-order, with its new frame.
	pub frames: Vec<(ViewId, Rect)>,
	/// Recovered problems: clamped expressions and stale targets.
	pub diagnostics: Vec<LayoutError>,
}

impl LayoutReport {
	/// The frame this pass gave `view`.
	pub fn frame(&self, view: ViewId) -> Option<Rect> {
		self.frames
			.iter()
			.find(|(id, _)| *id == view)
			.map(|&(_, frame)| frame)
	}
}

/// Owns a [`ViewTree`] and keeps its frames up to date.
///
/// Every mutation goes through the engine and records the view as needing layout.
/// Invalidations coalesce: any number of them before the next
/// [`layout_if_needed`](Self::layout_if_needed) cost one pass.
///
/// The engine is single-threaded. Hooks run synchronously at the end of a pass and can
/// only queue changes for the next one, so a hook that reacts to its own frame cannot
/// recurse.
pub struct LayoutEngine {
	tree: ViewTree,
	config: LayoutConfig,
	pending: FxHashSet<ViewId>,
	hooks: FxHashMap<ViewId, Vec<LayoutHook>>,
	passes: u64,
	/// Available size of the last committed pass, per pass root.
	last_available: FxHashMap<ViewId, Size>,
	last_phase: LayoutPhase,
}

impl Default for LayoutEngine {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for LayoutEngine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LayoutEngine")
			.field("views", &self.tree.len())
			.field("config", &self.config)
			.field("pending", &self.pending.len())
			.field("hooks", &self.hooks.values().map(Vec::len).sum::<usize>())
			.field("passes", &self.passes)
			.field("last_phase", &self.last_phase)
			.finish()
	}
}

impl LayoutEngine {
	/// Creates an engine with the default configuration.
	pub fn new() -> Self {
		Self::with_config(LayoutConfig::default())
	}

	pub fn with_config(config: LayoutConfig) -> Self {
		Self {
			tree: ViewTree::new(),
			config,
			pending: FxHashSet::default(),
			hooks: FxHashMap::default(),
			passes: 0,
			last_available: FxHashMap::default(),
			last_phase: LayoutPhase::NotStarted,
		}
	}

	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Replaces the configuration; the next [`layout_if_needed`](Self::layout_if_needed)
	/// runs a pass.
	pub fn set_config(&mut self, config: LayoutConfig) {
		self.config = config;
		self.last_available.clear();
	}

	pub fn tree(&self) -> &ViewTree {
		&self.tree
	}

	/// Number of committed passes.
	pub fn pass_count(&self) -> u64 {
		self.passes
	}

	/// Phase reached by the most recent pass; a failed pass reports where it stopped.
	pub fn last_phase(&self) -> LayoutPhase {
		self.last_phase
	}

	/// Adds a view as the last child of `parent`, or as a new root.
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `parent` is not in the tree.
	pub fn add_view(&mut self, parent: Option<ViewId>, layout: ViewLayout) -> Result<ViewId> {
		let view = self.tree.insert(parent, layout)?;
		self.pending.insert(view);
		Ok(view)
	}

	/// Removes `view` and its subtree, along with their hooks and pending invalidations.
	///
	/// Returns the removed ids in pre-order. Expressions elsewhere that still reference
	/// them resolve to 0 and report [`LayoutError::TargetNotInTree`].
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `view` is not in the tree.
	pub fn remove_view(&mut self, view: ViewId) -> Result<Vec<ViewId>> {
		let parent = self.tree.parent(view);
		let removed = self.tree.remove(view)?;
		for id in &removed {
			self.hooks.remove(id);
			self.pending.remove(id);
			self.last_available.remove(id);
		}
		if let Some(parent) = parent {
			self.pending.insert(parent);
		}
		tracing::trace!(%view, removed = removed.len(), "Removed view subtree");
		Ok(removed)
	}

	/// Sets the debug name shown in logs and reports.
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `view` is not in the tree.
	pub fn set_name(&mut self, view: ViewId, name: impl Into<String>) -> Result<()> {
		self.tree.set_name(view, name.into())
	}

	/// Replaces the X or Y expression of `view` and invalidates it.
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `view` is not in the tree.
	pub fn set_position(&mut self, view: ViewId, axis: Axis, pos: impl Into<Pos>) -> Result<()> {
		self.layout_mut(view)?.set_position(axis, pos.into());
		Ok(())
	}

	/// Replaces the width or height expression of `view` and invalidates it.
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `view` is not in the tree.
	pub fn set_size(&mut self, view: ViewId, axis: Axis, dim: impl Into<Dim>) -> Result<()> {
		self.layout_mut(view)?.set_size(axis, dim.into());
		Ok(())
	}

	/// Replaces the adornment thickness of `view` and invalidates it.
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `view` is not in the tree.
	pub fn set_adornment(&mut self, view: ViewId, adornment: Thickness) -> Result<()> {
		self.layout_mut(view)?.adornment = adornment;
		Ok(())
	}

	/// Replaces every expression of `view` at once and invalidates it.
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `view` is not in the tree.
	pub fn set_layout(&mut self, view: ViewId, layout: ViewLayout) -> Result<()> {
		*self.layout_mut(view)? = layout;
		Ok(())
	}

	/// Marks `view` as needing layout.
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `view` is not in the tree.
	pub fn invalidate_layout(&mut self, view: ViewId) -> Result<()> {
		if !self.tree.contains(view) {
			return Err(LayoutError::ViewNotFound(view));
		}
		self.pending.insert(view);
		Ok(())
	}

	/// Returns `true` if any view was invalidated and not laid out since.
	pub fn needs_layout(&self) -> bool {
		!self.pending.is_empty()
	}

	/// Returns `true` if `root` or one of its descendants was invalidated and not laid out
	/// since.
	pub fn needs_layout_under(&self, root: ViewId) -> bool {
		self.pending
			.iter()
			.any(|&view| self.tree.is_within(view, root))
	}

	/// Runs a pass if anything under `root` was invalidated or `available` differs from
	/// the last committed pass over `root`.
	///
	/// Returns `Ok(None)` when the frames are already current.
	///
	/// # Errors
	///
	/// As [`run_layout_pass`](Self::run_layout_pass).
	pub fn layout_if_needed(
		&mut self,
		root: ViewId,
		available: Size,
		measure: &dyn MeasureContent,
	) -> Result<Option<LayoutReport>> {
		let resized = self.last_available.get(&root) != Some(&available);
		if !resized && !self.needs_layout_under(root) {
			return Ok(None);
		}
		self.run_layout_pass(root, available, measure).map(Some)
	}

	/// Resolves the frames of `root` and its descendants against `available`.
	///
	/// On success the frames are committed, pending invalidations inside the subtree are
	/// cleared, and the layout-complete hooks of every view in the subtree run. Changes
	/// the hooks queue are applied afterwards and leave the engine needing layout again.
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `root` is not in the tree, and
	/// [`LayoutError::UnresolvableCycle`] if expressions depend on each other. With
	/// [`LayoutConfig::strict_expressions`], the first [`LayoutError::InvalidExpression`].
	/// On error no frame changes.
	pub fn run_layout_pass(
		&mut self,
		root: ViewId,
		available: Size,
		measure: &dyn MeasureContent,
	) -> Result<LayoutReport> {
		let _span = tracing::debug_span!(
			"layout.pass",
			pass = self.passes + 1,
			root = %self.tree.label(root),
			%available
		)
		.entered();

		let (result, phase) = {
			let mut pass = LayoutPass::new(&self.tree, &self.config, measure);
			(pass.run(root, available), pass.phase())
		};
		self.last_phase = phase;
		let outcome = result.inspect_err(|error| {
			tracing::warn!(%error, phase = %self.last_phase, "Layout pass failed, keeping previous frames");
		})?;

		self.passes += 1;
		for &(view, frame) in &outcome.frames {
			self.tree.set_frame(view, frame);
		}
		for (view, _) in &outcome.frames {
			self.pending.remove(view);
		}
		self.last_available.insert(root, available);
		tracing::debug!(
			views = outcome.frames.len(),
			diagnostics = outcome.diagnostics.len(),
			"Layout pass committed"
		);

		self.notify(&outcome.frames);
		Ok(LayoutReport {
			pass: self.passes,
			frames: outcome.frames,
			diagnostics: outcome.diagnostics,
		})
	}

	/// Registers `hook` to run whenever a pass commits a frame for `view`.
	///
	/// # Errors
	///
	/// [`LayoutError::ViewNotFound`] if `view` is not in the tree.
	pub fn on_layout_complete(
		&mut self,
		view: ViewId,
		hook: impl FnMut(&LayoutComplete, &mut PendingChanges) + 'static,
	) -> Result<()> {
		if !self.tree.contains(view) {
			return Err(LayoutError::ViewNotFound(view));
		}
		self.hooks.entry(view).or_default().push(Box::new(hook));
		Ok(())
	}

	fn layout_mut(&mut self, view: ViewId) -> Result<&mut ViewLayout> {
		let layout = self
			.tree
			.layout_mut(view)
			.ok_or(LayoutError::ViewNotFound(view))?;
		self.pending.insert(view);
		Ok(layout)
	}

	fn notify(&mut self, frames: &[(ViewId, Rect)]) {
		if self.hooks.is_empty() {
			return;
		}
		let mut changes = PendingChanges::default();
		for &(view, frame) in frames {
			let Some(hooks) = self.hooks.get_mut(&view) else {
				continue;
			};
			let event = LayoutComplete {
				view,
				frame,
				pass: self.passes,
			};
			for hook in hooks.iter_mut() {
				hook(&event, &mut changes);
			}
		}

		if changes.is_empty() {
			return;
		}
		tracing::trace!(changes = changes.len(), "Applying changes queued by layout hooks");
		for change in changes.drain() {
			let result = match change {
				Change::Position(view, axis, pos) => self.set_position(view, axis, pos),
				Change::Size(view, axis, dim) => self.set_size(view, axis, dim),
				Change::Adornment(view, adornment) => self.set_adornment(view, adornment),
				Change::Invalidate(view) => self.invalidate_layout(view),
			};
			if let Err(error) = result {
				tracing::debug!(%error, "Dropped queued layout change");
			}
		}
	}
}

#[cfg(test)]
mod tests;
