//! The layout pass.
//!
//! A pass first measures every view bottom-up ([`LayoutPhase::MeasuringSizes`]), then
//! solves one container at a time top-down: sizes, then alignment groups
//! ([`LayoutPhase::ResolvingGroups`]), then positions ([`LayoutPhase::ResolvingPositions`]).
//! A container's children are queued once their frames are final. A container that reads
//! a view of another container not resolved yet goes to the back of the queue; when every
//! queued container waits without progress, the pass fails on a cycle.
//!
//! Frames go to a scratch map. The engine commits them only when the whole pass succeeds,
//! so a failed pass leaves every view with its previous frame.

mod container;
mod natural;

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use strum::Display;
use trellis_primitives::{Rect, Size};

use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::measure::MeasureContent;
use crate::tree::ViewTree;
use crate::ViewId;
use container::{Job, Partial, Solved};
use natural::Natural;

/// Progress of a layout pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LayoutPhase {
	/// No pass has run.
	#[default]
	NotStarted,
	/// Measuring content and resolving sizes.
	MeasuringSizes,
	/// Placing alignment groups.
	ResolvingGroups,
	/// Resolving positions.
	ResolvingPositions,
	/// Every frame resolved.
	Complete,
}

/// Frames and diagnostics of a successful pass.
#[derive(Debug)]
pub(crate) struct PassOutcome {
	/// Every view under the root, in pre-order.
	pub frames: Vec<(ViewId, Rect)>,
	pub diagnostics: Vec<LayoutError>,
}

/// One run over a view subtree.
pub(crate) struct LayoutPass<'a> {
	tree: &'a ViewTree,
	config: &'a LayoutConfig,
	measure: &'a dyn MeasureContent,
	natural: FxHashMap<ViewId, Natural>,
	frames: FxHashMap<ViewId, Rect>,
	/// Resolved components of views whose container was set aside.
	partial: FxHashMap<ViewId, Partial>,
	/// Every view under the pass root.
	members: FxHashSet<ViewId>,
	diagnostics: Vec<LayoutError>,
	phase: LayoutPhase,
}

impl<'a> LayoutPass<'a> {
	pub fn new(tree: &'a ViewTree, config: &'a LayoutConfig, measure: &'a dyn MeasureContent) -> Self {
		Self {
			tree,
			config,
			measure,
			natural: FxHashMap::default(),
			frames: FxHashMap::default(),
			partial: FxHashMap::default(),
			members: FxHashSet::default(),
			diagnostics: Vec::new(),
			phase: LayoutPhase::NotStarted,
		}
	}

	/// The phase the pass reached; on failure, the phase it failed in.
	pub fn phase(&self) -> LayoutPhase {
		self.phase
	}

	/// Resolves `root` and its descendants against `available`.
	///
	/// The root is laid out as the only child of a container whose content box is
	/// `(0, 0, available)`.
	pub fn run(&mut self, root: ViewId, available: Size) -> Result<PassOutcome> {
		let tree = self.tree;
		if !tree.contains(root) {
			return Err(LayoutError::ViewNotFound(root));
		}

		self.members = tree.subtree(root).into_iter().collect();
		self.phase = LayoutPhase::MeasuringSizes;
		self.measure_subtree(root, available.width);

		self.solve(root, available)?;

		if self.config.strict_expressions
			&& let Some(error) = self
				.diagnostics
				.iter()
				.find(|error| matches!(error, LayoutError::InvalidExpression { .. }))
		{
			tracing::debug!(%error, "Strict expressions: failing the pass");
			return Err(error.clone());
		}

		self.phase = LayoutPhase::Complete;
		let frames = tree
			.subtree(root)
			.into_iter()
			.filter_map(|view| Some((view, *self.frames.get(&view)?)))
			.collect();
		Ok(PassOutcome {
			frames,
			diagnostics: core::mem::take(&mut self.diagnostics),
		})
	}

	/// Solves containers top-down, starting with the one holding only `root`.
	fn solve(&mut self, root: ViewId, available: Size) -> Result<()> {
		let tree = self.tree;
		let mut queue = VecDeque::from([self.start_job(tree.parent(root), vec![root], available)]);
		// Containers set aside in a row without any of them progressing.
		let mut idle = 0;
		while let Some(mut job) = queue.pop_front() {
			let frames = match self.advance(&mut job)? {
				Solved::Done(frames) => frames,
				Solved::Waiting { progressed } => {
					idle = if progressed { 0 } else { idle + 1 };
					if idle > queue.len() {
						let stuck: FxHashSet<ViewId> = core::iter::once(&job)
							.chain(&queue)
							.flat_map(Job::unresolved)
							.collect();
						let views = tree.subtree(root).into_iter().filter(|view| stuck.contains(view)).collect();
						return Err(LayoutError::UnresolvableCycle { views });
					}
					job.publish(&mut self.partial);
					queue.push_back(job);
					continue;
				}
			};
			idle = 0;

			for (&child, frame) in job.children().iter().zip(frames) {
				self.partial.remove(&child);
				self.frames.insert(child, frame);
			}
			for &child in job.children() {
				let grandchildren = tree.children(child);
				if grandchildren.is_empty() {
					continue;
				}
				let adornment = tree.layout(child).map(|layout| layout.adornment).unwrap_or_default();
				let content = self
					.frames
					.get(&child)
					.map_or(Size::ZERO, |frame| frame.inner(adornment).as_size());
				queue.push_back(self.start_job(Some(child), grandchildren.to_vec(), content));
			}
		}
		Ok(())
	}
}
