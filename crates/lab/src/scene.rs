//! Declarative TOML scenes.
//!
//! A scene is a list of `[[view]]` tables. Each view has a unique `name`, an optional
//! `parent` declared earlier in the file, and `x`/`y`/`width`/`height` expressions. A bare
//! integer is an absolute value; a table picks the expression by `kind`:
//!
//! ```toml
//! title = "Dialog"
//! terminal = { width = 40, height = 10 }
//!
//! [[view]]
//! name = "window"
//! width = { kind = "fill" }
//! height = { kind = "fill" }
//! border = 1
//!
//! [[view]]
//! name = "ok"
//! parent = "window"
//! text = "[ Ok ]"
//! x = { kind = "align", group = 0, mode = "center", add_space = true }
//! y = { kind = "anchor_end", margin = 0 }
//! ```
//!
//! Expressions may reference views declared anywhere in the file by name.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use trellis_layout::{
	AlignmentFlags, AlignmentMode, Dim, Dimension, GroupId, LayoutConfig, LayoutEngine,
	LayoutError, Op, PercentBasis, Pos, Side, Size, TextContent, Thickness, ViewId, ViewLayout,
	ViewTree,
};

/// Available size used when neither the scene nor the caller gives one.
pub const DEFAULT_SIZE: Size = Size::new(80, 25);

/// Errors loading or building a scene.
#[derive(Debug, Error)]
pub enum SceneError {
	/// Malformed TOML, an unknown key, or an expression that fits no `kind`.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The scene file could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the scene file.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// `parent` does not name a view declared earlier.
	#[error("view `{view}` names unknown parent `{parent}` (parents must be declared first)")]
	UnknownParent {
		/// The child view.
		view: String,
		/// The missing parent name.
		parent: String,
	},

	/// An expression references a name no view has.
	#[error("view `{view}` references unknown view `{target}`")]
	UnknownTarget {
		/// The view holding the expression.
		view: String,
		/// The missing name.
		target: String,
	},

	/// Two views share a name.
	#[error("view name `{0}` is used more than once")]
	DuplicateName(String),

	/// A scene has exactly one view without a parent.
	#[error("a scene needs exactly one root view, found {0}")]
	RootCount(usize),

	/// The engine rejected a view.
	#[error(transparent)]
	Layout(#[from] LayoutError),
}

/// A parsed scene file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
	/// Shown in reports.
	pub title: Option<String>,
	/// Default available size.
	pub terminal: Option<Terminal>,
	/// Layout configuration for this scene.
	pub config: Option<LayoutConfig>,
	/// Views in declaration order.
	#[serde(default, rename = "view")]
	pub views: Vec<ViewSpec>,
}

/// The `terminal` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Terminal {
	pub width: i32,
	pub height: i32,
}

/// One `[[view]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewSpec {
	pub name: String,
	pub parent: Option<String>,
	#[serde(default)]
	pub x: PosSpec,
	#[serde(default)]
	pub y: PosSpec,
	#[serde(default)]
	pub width: DimSpec,
	#[serde(default)]
	pub height: DimSpec,
	/// Uniform border thickness, added to `adornment`.
	#[serde(default)]
	pub border: i32,
	#[serde(default)]
	pub adornment: Thickness,
	/// Content measured for `auto` sizes.
	pub text: Option<String>,
}

/// A position: absolute cells or an expression table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PosSpec {
	Cells(i32),
	Expr(PosExpr),
}

impl Default for PosSpec {
	fn default() -> Self {
		Self::Cells(0)
	}
}

/// Position expression tables, selected by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum PosExpr {
	Absolute {
		cells: i32,
	},
	Center {
		#[serde(default)]
		offset: i32,
	},
	Percent {
		percent: i32,
		#[serde(default)]
		offset: i32,
	},
	AnchorEnd {
		#[serde(default)]
		margin: i32,
		#[serde(default)]
		offset: i32,
	},
	Relative {
		of: String,
		side: Side,
		#[serde(default)]
		offset: i32,
	},
	Align {
		group: i32,
		#[serde(default)]
		mode: AlignmentMode,
		#[serde(default)]
		add_space: bool,
		#[serde(default)]
		ignore_first_or_last: bool,
		#[serde(default)]
		offset: i32,
	},
	Combine {
		left: Box<PosSpec>,
		op: Op,
		right: Box<PosSpec>,
	},
}

/// A size: absolute cells or an expression table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DimSpec {
	Cells(i32),
	Expr(DimExpr),
}

impl Default for DimSpec {
	fn default() -> Self {
		Self::Expr(DimExpr::Auto { min: 0, max: None })
	}
}

/// Size expression tables, selected by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum DimExpr {
	Absolute {
		cells: i32,
	},
	Fill {
		#[serde(default)]
		margin: i32,
	},
	Percent {
		percent: i32,
		#[serde(default)]
		basis: PercentBasis,
		#[serde(default)]
		offset: i32,
	},
	Auto {
		#[serde(default)]
		min: i32,
		max: Option<i32>,
	},
	Match {
		of: String,
		dimension: Dimension,
		#[serde(default)]
		offset: i32,
	},
	Combine {
		left: Box<DimSpec>,
		op: Op,
		right: Box<DimSpec>,
	},
}

/// A scene loaded into an engine.
#[derive(Debug)]
pub struct BuiltScene {
	pub engine: LayoutEngine,
	pub root: ViewId,
	/// Texts of the views that have one.
	pub content: TextContent,
}

type Lookup<'a> = dyn Fn(&str) -> Result<ViewId, SceneError> + 'a;

impl Scene {
	/// Parses a scene from TOML.
	///
	/// # Errors
	///
	/// [`SceneError::Toml`] on malformed input.
	pub fn from_toml_str(input: &str) -> Result<Self, SceneError> {
		Ok(toml::from_str(input)?)
	}

	/// Reads and parses a scene file.
	///
	/// # Errors
	///
	/// [`SceneError::Io`] if the file cannot be read, [`SceneError::Toml`] if it does not
	/// parse.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| SceneError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	/// The available size: explicit overrides first, then the `terminal` table, then
	/// [`DEFAULT_SIZE`].
	pub fn available(&self, width: Option<i32>, height: Option<i32>) -> Size {
		let base = self
			.terminal
			.map_or(DEFAULT_SIZE, |terminal| Size::new(terminal.width, terminal.height));
		Size::new(width.unwrap_or(base.width), height.unwrap_or(base.height))
	}

	/// Builds an engine with the scene's own configuration.
	///
	/// # Errors
	///
	/// As [`Self::build_with`].
	pub fn build(&self) -> Result<BuiltScene, SceneError> {
		self.build_with(self.config.clone().unwrap_or_default())
	}

	/// Adds every view to a new engine configured with `config`.
	///
	/// # Errors
	///
	/// [`SceneError::RootCount`], [`SceneError::DuplicateName`],
	/// [`SceneError::UnknownParent`], or [`SceneError::UnknownTarget`] for a malformed
	/// view hierarchy.
	pub fn build_with(&self, config: LayoutConfig) -> Result<BuiltScene, SceneError> {
		let roots = self.views.iter().filter(|view| view.parent.is_none()).count();
		if roots != 1 {
			return Err(SceneError::RootCount(roots));
		}

		let mut engine = LayoutEngine::with_config(config);
		let mut content = TextContent::new();
		let mut ids = Vec::with_capacity(self.views.len());
		let mut root = None;
		for spec in &self.views {
			if engine.tree().find_by_name(&spec.name).is_some() {
				return Err(SceneError::DuplicateName(spec.name.clone()));
			}
			let parent = match &spec.parent {
				Some(parent) => Some(engine.tree().find_by_name(parent).ok_or_else(|| {
					SceneError::UnknownParent {
						view: spec.name.clone(),
						parent: parent.clone(),
					}
				})?),
				None => None,
			};
			let view = engine.add_view(parent, ViewLayout::default())?;
			engine.set_name(view, spec.name.as_str())?;
			if parent.is_none() {
				root = Some(view);
			}
			if let Some(text) = &spec.text {
				content.insert(view, text.as_str());
			}
			ids.push(view);
		}

		// Second sweep so expressions can name views declared later.
		for (spec, &view) in self.views.iter().zip(&ids) {
			let layout = spec.layout(engine.tree())?;
			engine.set_layout(view, layout)?;
		}

		let root = root.ok_or(SceneError::RootCount(0))?;
		tracing::debug!(
			title = self.title.as_deref().unwrap_or("untitled"),
			views = ids.len(),
			"Built scene"
		);
		Ok(BuiltScene {
			engine,
			root,
			content,
		})
	}
}

impl ViewSpec {
	/// Converts the tables to expressions, resolving names against `tree`.
	///
	/// # Errors
	///
	/// [`SceneError::UnknownTarget`] if an expression names a view not in `tree`.
	pub fn layout(&self, tree: &ViewTree) -> Result<ViewLayout, SceneError> {
		let lookup = |target: &str| {
			tree.find_by_name(target)
				.ok_or_else(|| SceneError::UnknownTarget {
					view: self.name.clone(),
					target: target.to_owned(),
				})
		};
		Ok(ViewLayout::default()
			.x(self.x.to_pos(&lookup)?)
			.y(self.y.to_pos(&lookup)?)
			.width(self.width.to_dim(&lookup)?)
			.height(self.height.to_dim(&lookup)?)
			.adornment(self.adornment + Thickness::uniform(self.border)))
	}
}

impl PosSpec {
	fn to_pos(&self, lookup: &Lookup<'_>) -> Result<Pos, SceneError> {
		let expr = match self {
			Self::Cells(cells) => return Ok(Pos::absolute(*cells)),
			Self::Expr(expr) => expr,
		};
		Ok(match expr {
			PosExpr::Absolute { cells } => Pos::absolute(*cells),
			PosExpr::Center { offset } => offset_pos(Pos::center(), *offset),
			PosExpr::Percent { percent, offset } => offset_pos(Pos::percent(*percent), *offset),
			PosExpr::AnchorEnd { margin, offset } => {
				offset_pos(Pos::anchor_end(*margin), *offset)
			}
			PosExpr::Relative { of, side, offset } => Pos::Relative {
				target: lookup(of)?,
				side: *side,
				offset: *offset,
			},
			PosExpr::Align {
				group,
				mode,
				add_space,
				ignore_first_or_last,
				offset,
			} => {
				let mut flags = AlignmentFlags::empty();
				flags.set(AlignmentFlags::ADD_SPACE_BETWEEN_ITEMS, *add_space);
				flags.set(AlignmentFlags::IGNORE_FIRST_OR_LAST, *ignore_first_or_last);
				offset_pos(Pos::align(GroupId(*group), *mode).with_flags(flags), *offset)
			}
			PosExpr::Combine { left, op, right } => {
				Pos::Combine(Box::new(left.to_pos(lookup)?), *op, Box::new(right.to_pos(lookup)?))
			}
		})
	}
}

impl DimSpec {
	fn to_dim(&self, lookup: &Lookup<'_>) -> Result<Dim, SceneError> {
		let expr = match self {
			Self::Cells(cells) => return Ok(Dim::absolute(*cells)),
			Self::Expr(expr) => expr,
		};
		Ok(match expr {
			DimExpr::Absolute { cells } => Dim::absolute(*cells),
			DimExpr::Fill { margin } => Dim::fill(*margin),
			DimExpr::Percent {
				percent,
				basis,
				offset,
			} => offset_dim(
				Dim::Percent {
					percent: *percent,
					basis: *basis,
				},
				*offset,
			),
			DimExpr::Auto { min, max } => Dim::auto_between(*min, max.unwrap_or(i32::MAX)),
			DimExpr::Match {
				of,
				dimension,
				offset,
			} => offset_dim(
				Dim::Match {
					target: lookup(of)?,
					dimension: *dimension,
				},
				*offset,
			),
			DimExpr::Combine { left, op, right } => {
				Dim::Combine(Box::new(left.to_dim(lookup)?), *op, Box::new(right.to_dim(lookup)?))
			}
		})
	}
}

fn offset_pos(pos: Pos, offset: i32) -> Pos {
	match offset {
		0 => pos,
		n if n > 0 => pos + n,
		n => pos - n.saturating_neg(),
	}
}

fn offset_dim(dim: Dim, offset: i32) -> Dim {
	match offset {
		0 => dim,
		n if n > 0 => dim + n,
		n => dim - n.saturating_neg(),
	}
}

#[cfg(test)]
mod tests;
