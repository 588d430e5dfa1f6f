//! Line mapping between the source pane and the preview pane, so that both
//! can be scrolled together.

use std::cmp;

use crate::document::TargetDocument;
use crate::folding::Folding;
use crate::layout::OutputLayout;
use crate::markup::Markup;

type Anchor = (usize, usize);

/// Piecewise line mapping built from `(source line, preview line)` anchors.
///
/// Anchors are the document starts, one pair per output block and the
/// document ends. Between two anchors lines advance one to one until the next
/// anchor on the target side is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncScroll {
    anchors: Vec<Anchor>,
}

impl SyncScroll {
    pub fn new(alignments: &[Anchor], source_line_count: usize, preview_line_count: usize) -> SyncScroll {
        let mut anchors = Vec::with_capacity(alignments.len() + 2);
        anchors.push((0, 0));
        anchors.extend_from_slice(alignments);
        anchors.push((source_line_count, preview_line_count));
        SyncScroll { anchors }
    }

    pub fn from_layout<D, F, M>(layout: &OutputLayout<D, F, M>, source_line_count: usize) -> SyncScroll
        where D: TargetDocument,
              F: Folding,
              M: Markup
    {
        SyncScroll::new(&layout.alignments(), source_line_count, layout.document().line_count())
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Preview line to show next to `source_line`.
    pub fn preview_line(&self, source_line: usize) -> usize {
        transfer(&self.anchors, source_line, |a| a.0, |a| a.1)
    }

    /// Source line to show next to `preview_line`.
    pub fn source_line(&self, preview_line: usize) -> usize {
        transfer(&self.anchors, preview_line, |a| a.1, |a| a.0)
    }
}

fn transfer<F, T>(anchors: &[Anchor], line: usize, from: F, to: T) -> usize
    where F: Fn(&Anchor) -> usize,
          T: Fn(&Anchor) -> usize
{
    let idx = anchors.partition_point(|a| from(a) <= line);
    let prev = &anchors[idx.saturating_sub(1)];
    match anchors.get(idx) {
        Some(next) => cmp::min(to(prev) + (line - from(prev)), to(next)),
        None => to(prev),
    }
}
