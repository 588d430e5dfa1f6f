//! Vertical layout of evaluation output in the preview pane.
//!
//! Every source expression that produced output owns one [`OutputBlock`]. Blocks
//! are kept in source order and packed into the preview document so that each
//! one starts no earlier than its source expression would suggest, right after
//! whatever the previous block rendered. A block whose output is taller than
//! its source expression gets a fold region over the overflowing lines.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use tracing::{debug, trace, warn};

use crate::config::FoldPolicy;
use crate::document::TargetDocument;
use crate::error::LayoutError;
use crate::expression::SourceExpression;
use crate::folding::Folding;
use crate::markup::Markup;
use crate::output::{count_new_lines, Output};

/// Output rendered for a single source expression.
#[derive(Debug)]
pub struct OutputBlock<H> {
    source: SourceExpression,
    outputs: Vec<Output>,
    line_start: usize,
    fold_region: Option<H>,
}

impl<H: Copy> OutputBlock<H> {
    fn new(source: SourceExpression, line_start: usize) -> OutputBlock<H> {
        OutputBlock {
            source,
            outputs: Vec::new(),
            line_start,
            fold_region: None,
        }
    }

    pub fn source(&self) -> SourceExpression {
        self.source
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// First preview line of this block.
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    /// Last preview line of this block (inclusive).
    pub fn line_end(&self) -> usize {
        self.line_start + count_new_lines(&self.outputs)
    }

    pub fn height(&self) -> usize {
        self.line_end() - self.line_start + 1
    }

    /// Lines rendered beyond the height of the source expression.
    pub fn overflow(&self) -> usize {
        self.height().saturating_sub(self.source.height())
    }

    pub fn fold_region(&self) -> Option<H> {
        self.fold_region
    }
}

/// Layout table of output blocks, keyed by the first source line of their
/// expression, together with the preview surfaces it writes to.
pub struct OutputLayout<D, F: Folding, M> {
    document: D,
    folding: F,
    markup: M,
    policy: FoldPolicy,
    blocks: BTreeMap<usize, OutputBlock<F::Handle>>,
}

impl<D, F, M> OutputLayout<D, F, M>
where D: TargetDocument,
      F: Folding,
      M: Markup
{
    pub fn new(document: D, folding: F, markup: M) -> Self {
        Self::with_policy(document, folding, markup, FoldPolicy::default())
    }

    pub fn with_policy(document: D, folding: F, markup: M, policy: FoldPolicy) -> Self {
        OutputLayout {
            document,
            folding,
            markup,
            policy,
            blocks: BTreeMap::new(),
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn folding(&self) -> &F {
        &self.folding
    }

    pub fn markup(&self) -> &M {
        &self.markup
    }

    pub fn policy(&self) -> &FoldPolicy {
        &self.policy
    }

    pub fn block(&self, expression: &SourceExpression) -> Option<&OutputBlock<F::Handle>> {
        self.blocks.get(&expression.line_start())
    }

    /// Blocks in source order.
    pub fn blocks(&self) -> impl Iterator<Item = &OutputBlock<F::Handle>> {
        self.blocks.values()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// `(source line, preview line)` pairs, one per block, in source order.
    pub fn alignments(&self) -> Vec<(usize, usize)> {
        self.blocks.values()
            .map(|b| (b.source.line_start(), b.line_start))
            .collect()
    }

    /// Registers an empty block for `expression` after all existing ones.
    ///
    /// Fails without touching the table if the expression already has a block.
    pub fn append_block(&mut self, expression: SourceExpression) -> Result<(), LayoutError> {
        if self.blocks.contains_key(&expression.line_start()) {
            return Err(LayoutError::InvariantViolation {
                line_start: expression.line_start(),
                line_end: expression.line_end(),
            });
        }
        self.insert_block(expression);
        Ok(())
    }

    /// Appends `output` to the block of `expression`, creating the block on
    /// first output, and re-lays out every block from there on.
    pub fn add_output(&mut self, expression: SourceExpression, output: Output) {
        let key = expression.line_start();
        if !self.blocks.contains_key(&key) {
            self.insert_block(expression);
        }

        self.print_output(key, output);

        let tail: Vec<SourceExpression> = self.blocks.range(key..)
            .map(|(_, b)| b.source)
            .collect();
        for source in tail {
            self.recalculate_position(&source);
            self.update_folding(&source);
        }
    }

    /// Preview line at which the block of `expression` starts, given the
    /// blocks currently registered before it.
    pub fn compute_block_line_start(&self, expression: &SourceExpression) -> usize {
        let previous = match self.blocks.range(..expression.line_start()).next_back() {
            Some((_, block)) => block,
            None => return expression.line_start(),
        };

        let distance_between_sources = expression.line_start().saturating_sub(previous.source.line_end());
        let compensation = previous.source.height().saturating_sub(previous.height());
        previous.line_end() + compensation + distance_between_sources
    }

    /// Replaces the fold region of the block of `expression` so that it
    /// covers exactly the lines past the source height, or drops it if the
    /// block fits.
    pub fn update_folding(&mut self, expression: &SourceExpression) {
        let key = expression.line_start();
        let is_last_block = self.blocks.range((Excluded(key), Unbounded)).next().is_none();
        let policy = &self.policy;
        let document = &self.document;
        let block = match self.blocks.get_mut(&key) {
            Some(block) => block,
            None => return,
        };

        self.folding.batch(|folding| {
            if let Some(old) = block.fold_region.take() {
                folding.remove_fold_region(old);
            }

            if block.height() <= block.source.height() {
                return;
            }

            let first_folded_line = block.line_start + (block.source.height() - 1);
            let placeholder = format!("{}...", document.line_content(first_folded_line));
            let start = document.line_start_offset(first_folded_line);
            let end = document.line_end_offset(block.line_end());

            match folding.add_fold_region(start, end, &placeholder) {
                Some(handle) => {
                    let expanded = policy.is_expanded(is_last_block, block.overflow());
                    folding.set_expanded(handle, expanded);
                    trace!(first_folded_line, line_end = block.line_end(), expanded, "fold region updated");
                    block.fold_region = Some(handle);
                }
                None => warn!(start, end, "folding surface refused region for {:?}", block.source),
            }
        });
    }

    /// Forgets every block, removes their fold regions and empties the
    /// preview document.
    pub fn clear(&mut self) {
        let handles: Vec<F::Handle> = self.blocks.values().filter_map(|b| b.fold_region).collect();
        self.folding.batch(|folding| {
            for handle in handles {
                folding.remove_fold_region(handle);
            }
        });
        self.blocks.clear();
        self.markup.remove_all_highlighters();
        self.document.set_text("");
        debug!("preview layout cleared");
    }

    fn insert_block(&mut self, expression: SourceExpression) {
        let line_start = self.compute_block_line_start(&expression);
        debug!(source = ?expression, line_start, "output block created");
        self.blocks.insert(expression.line_start(), OutputBlock::new(expression, line_start));

        // the previous block stops being the last one
        let previous = self.blocks.range(..expression.line_start()).next_back().map(|(_, b)| b.source);
        if let Some(previous) = previous {
            self.update_folding(&previous);
        }
    }

    fn recalculate_position(&mut self, expression: &SourceExpression) {
        let line_start = self.compute_block_line_start(expression);
        if let Some(block) = self.blocks.get_mut(&expression.line_start()) {
            if block.line_start != line_start {
                trace!(source = ?expression, from = block.line_start, to = line_start, "block moved");
            }
            block.line_start = line_start;
        }
    }

    fn print_output(&mut self, key: usize, output: Output) {
        let block = match self.blocks.get_mut(&key) {
            Some(block) => block,
            None => return,
        };

        let line = if block.outputs.is_empty() { block.line_start } else { block.line_end() + 1 };
        let kind = output.kind;
        self.document.insert_text_at_line(line, &output.text);
        block.outputs.push(output);

        let start = self.document.line_start_offset(line);
        let end = self.document.line_end_offset(block.line_end());
        self.markup.add_range_highlighter(start, end, kind);
        debug!(line, line_end = block.line_end(), ?kind, "output appended");
    }
}
