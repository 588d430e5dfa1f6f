use std::collections::HashMap;

use crate::interval::{Interval, IntervalSet};
use crate::output::OutputKind;

/// Highlighting surface for rendered output. Best effort; nothing in the
/// layout depends on what it does with the ranges.
pub trait Markup {
    fn add_range_highlighter(&mut self, start: usize, end: usize, kind: OutputKind);

    fn remove_all_highlighters(&mut self) {}
}

/// Highlighting is optional.
impl Markup for () {
    fn add_range_highlighter(&mut self, _: usize, _: usize, _: OutputKind) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlighter {
    pub range: Interval,
    pub kind: OutputKind,
}

/// In-memory markup layer: every highlighter in creation order, plus the
/// merged coverage per output kind.
#[derive(Default, Debug)]
pub struct Highlights {
    highlighters: Vec<Highlighter>,
    coverage: HashMap<OutputKind, IntervalSet>,
}

impl Highlights {
    pub fn new() -> Highlights {
        Highlights::default()
    }

    pub fn highlighters(&self) -> &[Highlighter] {
        &self.highlighters
    }

    pub fn coverage(&self, kind: OutputKind) -> Option<&IntervalSet> {
        self.coverage.get(&kind)
    }

    /// Kind of the last highlighter covering `offset`, if any.
    pub fn kind_at(&self, offset: usize) -> Option<OutputKind> {
        self.highlighters.iter().rev()
            .find(|h| h.range.contains(offset))
            .map(|h| h.kind)
    }

    pub fn clear(&mut self) {
        self.highlighters.clear();
        self.coverage.clear();
    }
}

impl Markup for Highlights {
    fn add_range_highlighter(&mut self, start: usize, end: usize, kind: OutputKind) {
        if start > end {
            return;
        }
        let range = Interval::new(start, end);
        self.highlighters.push(Highlighter { range, kind });
        self.coverage.entry(kind).or_insert_with(IntervalSet::new).add(range);
    }

    fn remove_all_highlighters(&mut self) {
        self.clear();
    }
}
