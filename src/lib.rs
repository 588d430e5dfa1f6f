//! Layout of scratch-file evaluation output in a split preview pane.
//!
//! Output arrives per source expression. [`OutputLayout`] packs it into a
//! dedicated preview document, line-aligned with the source where possible,
//! folds blocks that grow taller than the expression that produced them, and
//! exposes the source/preview line alignments that [`SyncScroll`] turns into a
//! two-way line mapping. The document, folding and highlighting surfaces are
//! injected through the [`TargetDocument`], [`Folding`] and [`Markup`] traits;
//! in-memory implementations are provided.

extern crate xi_rope as rope;

pub mod config;
pub mod document;
pub mod error;
pub mod expression;
pub mod folding;
pub mod handler;
pub mod interval;
pub mod layout;
pub mod markup;
pub mod output;
pub mod scroll;

pub use config::{FoldPolicy, PreviewConfig};
pub use document::{RopeDocument, TargetDocument};
pub use error::{ConfigError, LayoutError};
pub use expression::SourceExpression;
pub use folding::{FoldHandle, FoldRegion, FoldRegistry, Folding};
pub use handler::{InlineOutputHandler, LayoutDependentHandler, OutputHandler, PaneLayout, PreviewOutputHandler};
pub use interval::{Interval, IntervalSet};
pub use layout::{OutputBlock, OutputLayout};
pub use markup::{Highlighter, Highlights, Markup};
pub use output::{count_new_lines, Output, OutputKind};
pub use scroll::SyncScroll;
