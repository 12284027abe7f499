//! Tunables for the layout pass.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Layout pass configuration.
///
/// Every field has a default, so an empty TOML document is a valid configuration:
///
/// ```toml
/// # Measurement rounds for content-driven width/height co-dependency.
/// content_iterations = 2
/// # Relaxation rounds per container; defaults to the number of views in the subtree.
/// relaxation_bound = 16
/// # Treat clamped out-of-range expressions as fatal.
/// strict_expressions = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
	/// Measurement rounds for content-driven sizes.
	///
	/// Round one measures content at the widest width the view may take. Round two
	/// re-measures the height once the width is resolved, which is what lets wrapped
	/// text grow taller when its width is constrained. Values above 2 behave like 2 and
	/// 0 behaves like 1.
	pub content_iterations: usize,

	/// Upper bound on relaxation rounds per container.
	///
	/// `None` uses the number of views in the container's subtree.
	pub relaxation_bound: Option<usize>,

	/// Fail the pass instead of clamping out-of-range expressions.
	pub strict_expressions: bool,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			content_iterations: 2,
			relaxation_bound: None,
			strict_expressions: false,
		}
	}
}

impl LayoutConfig {
	/// Parses a configuration from TOML.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Toml`] on malformed TOML, unknown keys, or mistyped values.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	/// Reads and parses a configuration file.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Io`] if the file cannot be read, or [`ConfigError::Toml`] if
	/// its contents do not parse.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	/// Whether the height of a content-driven view is re-measured at its resolved width.
	pub(crate) fn remeasure_content(&self) -> bool {
		self.content_iterations >= 2
	}
}
