//! Error types for layout resolution and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::ViewId;

/// Errors and diagnostics produced while resolving a layout.
///
/// Only [`LayoutError::UnresolvableCycle`] and [`LayoutError::ViewNotFound`] are fatal.
/// The remaining variants are recovered locally: the offending value is clamped (or
/// resolved to 0) and the error is recorded in
/// [`LayoutReport::diagnostics`](crate::LayoutReport::diagnostics) while the pass completes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
	/// Expressions among these views depend on each other and cannot be ordered.
	#[error("unresolvable layout cycle among {}", format_views(views))]
	UnresolvableCycle {
		/// Views with at least one unresolved component, in sibling order.
		views: Vec<ViewId>,
	},

	/// An expression carried an out-of-range value that was clamped.
	#[error("invalid expression on {view}: {reason}")]
	InvalidExpression {
		/// The view whose expression was clamped.
		view: ViewId,
		/// What was out of range.
		reason: String,
	},

	/// An expression references a view that is no longer in the hierarchy.
	#[error("{view} references {target}, which is not in the view tree")]
	TargetNotInTree {
		/// The view holding the expression.
		view: ViewId,
		/// The stale reference.
		target: ViewId,
	},

	/// An API call named a view that does not exist.
	#[error("{0} is not in the view tree")]
	ViewNotFound(ViewId),
}

impl LayoutError {
	/// Returns `true` if the error aborts a layout pass.
	pub fn is_fatal(&self) -> bool {
		matches!(self, Self::UnresolvableCycle { .. } | Self::ViewNotFound(_))
	}
}

fn format_views(views: &[ViewId]) -> String {
	let names: Vec<String> = views.iter().map(ToString::to_string).collect();
	format!("[{}]", names.join(", "))
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur when loading a [`LayoutConfig`](crate::LayoutConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an unknown/mistyped key.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}
