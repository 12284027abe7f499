//! Declarative relative-layout resolution for terminal view trees.
//!
//! Views describe where they go with immutable [`Pos`] and [`Dim`] expressions: absolute
//! cells, centred, percentages of the parent, anchored to the far edge, relative to a
//! sibling's edge, or as members of an alignment group. [`LayoutEngine::run_layout_pass`]
//! turns those expressions into concrete [`Rect`] frames.
//!
//! # Pass structure
//!
//! A pass walks the tree once bottom-up to measure content-driven sizes, then top-down one
//! container at a time: sibling sizes first, then every alignment group through
//! [`align()`], then the remaining positions. Expressions that reference a sibling that is
//! not resolved yet are deferred and retried; a dependency cycle fails the pass with
//! [`LayoutError::UnresolvableCycle`] and leaves the previous frames in place.
//!
//! # Modules
//!
//! - `expr` - [`Pos`] and [`Dim`] expression values
//! - `align` - the [`align()`] function for alignment groups
//! - `tree` - the [`ViewTree`] arena and [`ViewLayout`]
//! - `resolve` - evaluation of a single expression
//! - `pass` - the layout pass
//! - `engine` - [`LayoutEngine`]: invalidation, hooks, and the public entry points
//! - `measure` - [`MeasureContent`] and the text measurer
//!
//! # Example
//!
//! ```
//! use trellis_layout::{Dim, LayoutEngine, NoContent, Pos, ViewLayout};
//! use trellis_primitives::{Rect, Size};
//!
//! let mut engine = LayoutEngine::new();
//! let root = engine.add_view(None, ViewLayout::default().width(Dim::fill(0)).height(Dim::fill(0)))?;
//! let label = engine.add_view(
//! 	Some(root),
//! 	ViewLayout::default()
//! 		.x(Pos::center() - 1)
//! 		.width(Dim::absolute(1))
//! 		.height(Dim::absolute(1)),
//! )?;
//!
//! engine.run_layout_pass(root, Size::new(21, 5), &NoContent)?;
//! assert_eq!(engine.tree().frame(label), Some(Rect::new(9, 0, 1, 1)));
//! # Ok::<(), trellis_layout::LayoutError>(())
//! ```

mod align;
mod config;
mod engine;
mod error;
mod expr;
mod id;
mod measure;
mod pass;
mod resolve;
mod tree;

pub use align::{AlignmentFlags, AlignmentMode, Placement, align};
pub use config::LayoutConfig;
pub use engine::{LayoutComplete, LayoutEngine, LayoutHook, LayoutReport, PendingChanges};
pub use error::{ConfigError, LayoutError, Result};
pub use expr::{Dim, GroupId, Op, PercentBasis, Pos};
pub use id::ViewId;
pub use measure::{MeasureContent, NoContent, TextContent, measure_text};
pub use pass::LayoutPhase;
pub use tree::{ViewLayout, ViewTree};
pub use trellis_primitives::{Axis, Dimension, Rect, Side, Size, Thickness};
