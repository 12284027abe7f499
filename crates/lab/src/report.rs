//! Frame reports in text and JSON.

use serde::Serialize;
use trellis_layout::{LayoutError, LayoutPhase, LayoutReport, Rect, Size, ViewTree};

/// The frames of one committed pass, labelled by view name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
	pub title: Option<String>,
	pub pass: u64,
	pub phase: LayoutPhase,
	pub available: Size,
	/// Pre-order, as the pass listed them.
	pub views: Vec<ViewFrame>,
	pub diagnostics: Vec<String>,
}

/// One row of a [`FrameReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewFrame {
	pub name: String,
	/// Distance from the pass root.
	pub depth: usize,
	/// Relative to the parent's content box.
	pub frame: Rect,
	/// In absolute coordinates.
	pub screen: Rect,
}

impl FrameReport {
	pub fn new(
		tree: &ViewTree,
		report: &LayoutReport,
		phase: LayoutPhase,
		available: Size,
		title: Option<&str>,
	) -> Self {
		let base_depth = report
			.frames
			.first()
			.map_or(0, |&(root, _)| tree.depth(root));
		let views = report
			.frames
			.iter()
			.map(|&(view, frame)| ViewFrame {
				name: tree.label(view),
				depth: tree.depth(view) - base_depth,
				frame,
				screen: tree.screen_frame(view).unwrap_or(frame),
			})
			.collect();
		Self {
			title: title.map(ToOwned::to_owned),
			pass: report.pass,
			phase,
			available,
			views,
			diagnostics: report
				.diagnostics
				.iter()
				.map(|error| describe_error(tree, error))
				.collect(),
		}
	}

	/// One line per view (`name  frame  screen frame`), indented by depth, then one
	/// `warning:` line per diagnostic.
	pub fn to_text(&self) -> String {
		let label = |view: &ViewFrame| format!("{}{}", "  ".repeat(view.depth), view.name);
		let name_width = self.views.iter().map(|view| label(view).len()).max().unwrap_or(0);
		let frame_width = self
			.views
			.iter()
			.map(|view| view.frame.to_string().len())
			.max()
			.unwrap_or(0);

		let mut out = format!(
			"# {} (pass {}, {}x{})\n",
			self.title.as_deref().unwrap_or("scene"),
			self.pass,
			self.available.width,
			self.available.height
		);
		for view in &self.views {
			out.push_str(&format!(
				"{:<name_width$}  {:<frame_width$}  screen {}\n",
				label(view),
				view.frame.to_string(),
				view.screen
			));
		}
		for diagnostic in &self.diagnostics {
			out.push_str(&format!("warning: {diagnostic}\n"));
		}
		out
	}

	/// Pretty-printed JSON.
	///
	/// # Errors
	///
	/// Only if serialization fails, which the report's types do not do.
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(self)
	}
}

/// Formats `error` with view names in place of ids.
pub fn describe_error(tree: &ViewTree, error: &LayoutError) -> String {
	match error {
		LayoutError::UnresolvableCycle { views } => {
			let names: Vec<String> = views.iter().map(|&view| tree.label(view)).collect();
			format!("unresolvable layout cycle among {}", names.join(", "))
		}
		LayoutError::InvalidExpression { view, reason } => {
			format!("invalid expression on {}: {reason}", tree.label(*view))
		}
		LayoutError::TargetNotInTree { view, target } => {
			format!("{} references {target}, which is not in the view tree", tree.label(*view))
		}
		LayoutError::ViewNotFound(_) => error.to_string(),
	}
}
