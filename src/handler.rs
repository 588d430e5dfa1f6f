//! Routing of evaluator events to the pane that renders them.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::PreviewConfig;
use crate::document::TargetDocument;
use crate::expression::SourceExpression;
use crate::folding::Folding;
use crate::layout::OutputLayout;
use crate::markup::Markup;
use crate::output::Output;

/// Receives the events of one scratch evaluation run.
pub trait OutputHandler {
    fn on_start(&mut self) {}

    fn handle(&mut self, expression: SourceExpression, output: Output);

    /// Evaluator-level failure not tied to an expression.
    fn error(&mut self, message: &str);

    fn on_finish(&mut self) {}

    /// Drops everything rendered so far.
    fn clear(&mut self);
}

/// Renders output as blocks in the preview pane.
pub struct PreviewOutputHandler<D, F: Folding, M> {
    layout: OutputLayout<D, F, M>,
    skip_blank_output: bool,
    errors: Vec<String>,
}

impl<D, F, M> PreviewOutputHandler<D, F, M>
where D: TargetDocument,
      F: Folding,
      M: Markup
{
    pub fn new(document: D, folding: F, markup: M, config: &PreviewConfig) -> Self {
        PreviewOutputHandler {
            layout: OutputLayout::with_policy(document, folding, markup, config.fold.clone()),
            skip_blank_output: config.skip_blank_output,
            errors: Vec::new(),
        }
    }

    pub fn layout(&self) -> &OutputLayout<D, F, M> {
        &self.layout
    }

    /// Evaluator errors reported since the last `clear`.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl<D, F, M> OutputHandler for PreviewOutputHandler<D, F, M>
where D: TargetDocument,
      F: Folding,
      M: Markup
{
    fn handle(&mut self, expression: SourceExpression, output: Output) {
        if self.skip_blank_output && output.is_blank() {
            return;
        }
        self.layout.add_output(expression, output);
    }

    fn error(&mut self, message: &str) {
        warn!(reason = message, "scratch evaluation failed");
        self.errors.push(message.to_owned());
    }

    fn clear(&mut self) {
        self.layout.clear();
        self.errors.clear();
    }
}

/// Renders output inline, next to the last line of its expression, for when
/// no preview pane is shown.
#[derive(Default)]
pub struct InlineOutputHandler {
    lines: BTreeMap<usize, Vec<Output>>,
    errors: Vec<String>,
    skip_blank_output: bool,
}

impl InlineOutputHandler {
    pub fn new(config: &PreviewConfig) -> InlineOutputHandler {
        InlineOutputHandler {
            skip_blank_output: config.skip_blank_output,
            ..InlineOutputHandler::default()
        }
    }

    pub fn outputs_at(&self, line: usize) -> &[Output] {
        self.lines.get(&line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Single-line rendering of everything printed for `line`.
    pub fn rendered(&self, line: usize) -> Option<String> {
        let outputs = self.lines.get(&line)?;
        let parts: Vec<String> = outputs.iter()
            .map(|o| o.text.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect();
        Some(parts.join("; "))
    }

    /// Source lines that carry inline output, ascending.
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.keys().copied()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl OutputHandler for InlineOutputHandler {
    fn handle(&mut self, expression: SourceExpression, output: Output) {
        if self.skip_blank_output && output.is_blank() {
            return;
        }
        self.lines.entry(expression.line_end()).or_insert_with(Vec::new).push(output);
    }

    fn error(&mut self, message: &str) {
        warn!(reason = message, "scratch evaluation failed");
        self.errors.push(message.to_owned());
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.errors.clear();
    }
}

/// Which panes of the scratch editor are visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaneLayout {
    EditorOnly,
    EditorAndPreview,
    PreviewOnly,
}

/// Sends output to the preview handler whenever the preview pane is visible
/// and to the inline handler otherwise. Lifecycle events reach both.
pub struct LayoutDependentHandler<N, P> {
    no_preview: N,
    with_preview: P,
    layout: PaneLayout,
}

impl<N, P> LayoutDependentHandler<N, P>
where N: OutputHandler,
      P: OutputHandler
{
    pub fn new(no_preview: N, with_preview: P, layout: PaneLayout) -> Self {
        LayoutDependentHandler { no_preview, with_preview, layout }
    }

    pub fn pane_layout(&self) -> PaneLayout {
        self.layout
    }

    pub fn set_pane_layout(&mut self, layout: PaneLayout) {
        if self.layout != layout {
            debug!(from = ?self.layout, to = ?layout, "scratch pane layout changed");
        }
        self.layout = layout;
    }

    pub fn no_preview(&self) -> &N {
        &self.no_preview
    }

    pub fn with_preview(&self) -> &P {
        &self.with_preview
    }

    fn target(&mut self) -> &mut dyn OutputHandler {
        match self.layout {
            PaneLayout::EditorOnly => &mut self.no_preview,
            PaneLayout::EditorAndPreview | PaneLayout::PreviewOnly => &mut self.with_preview,
        }
    }
}

impl<N, P> OutputHandler for LayoutDependentHandler<N, P>
where N: OutputHandler,
      P: OutputHandler
{
    fn on_start(&mut self) {
        self.no_preview.on_start();
        self.with_preview.on_start();
    }

    fn handle(&mut self, expression: SourceExpression, output: Output) {
        self.target().handle(expression, output);
    }

    fn error(&mut self, message: &str) {
        self.target().error(message);
    }

    fn on_finish(&mut self) {
        self.no_preview.on_finish();
        self.with_preview.on_finish();
    }

    fn clear(&mut self) {
        self.no_preview.clear();
        self.with_preview.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{InlineOutputHandler, LayoutDependentHandler, OutputHandler, PaneLayout, PreviewOutputHandler};
    use crate::config::PreviewConfig;
    use crate::document::RopeDocument;
    use crate::expression::SourceExpression;
    use crate::folding::FoldRegistry;
    use crate::markup::Highlights;
    use crate::output::Output;

    fn preview(config: &PreviewConfig) -> PreviewOutputHandler<RopeDocument, FoldRegistry, Highlights> {
        PreviewOutputHandler::new(RopeDocument::new(), FoldRegistry::new(), Highlights::new(), config)
    }

    #[test]
    fn preview_skips_blank_output() {
        let mut handler = preview(&PreviewConfig::default());
        handler.handle(SourceExpression::line(0), Output::text("  "));
        assert!(handler.layout().is_empty());
        handler.handle(SourceExpression::line(0), Output::text("1"));
        assert_eq!(handler.layout().len(), 1);
    }

    #[test]
    fn preview_keeps_blank_output_when_configured() {
        let config = PreviewConfig { skip_blank_output: false, ..PreviewConfig::default() };
        let mut handler = preview(&config);
        handler.handle(SourceExpression::line(0), Output::text(""));
        assert_eq!(handler.layout().len(), 1);
    }

    #[test]
    fn preview_clear_resets_document_and_errors() {
        let mut handler = preview(&PreviewConfig::default());
        handler.handle(SourceExpression::line(0), Output::text("1\n2"));
        handler.error("compilation failed");
        assert_eq!(handler.errors(), &["compilation failed".to_owned()]);
        handler.clear();
        assert!(handler.layout().is_empty());
        assert!(handler.layout().folding().is_empty());
        assert_eq!(handler.layout().document().text(), "");
        assert!(handler.errors().is_empty());
    }

    #[test]
    fn inline_collects_by_last_source_line() {
        let mut handler = InlineOutputHandler::new(&PreviewConfig::default());
        handler.handle(SourceExpression::new(0, 2), Output::text("res0: Int = 1"));
        handler.handle(SourceExpression::new(0, 2), Output::error("warning:\n  shadowed"));
        handler.handle(SourceExpression::line(3), Output::text(""));
        assert_eq!(handler.rendered(2).unwrap(), "res0: Int = 1; warning: shadowed");
        assert_eq!(handler.outputs_at(2).len(), 2);
        assert!(handler.rendered(3).is_none());
        assert_eq!(handler.lines().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn layout_selects_target() {
        let config = PreviewConfig::default();
        let mut handler = LayoutDependentHandler::new(
            InlineOutputHandler::new(&config), preview(&config), PaneLayout::EditorOnly);

        handler.on_start();
        handler.handle(SourceExpression::line(0), Output::text("inline"));
        handler.set_pane_layout(PaneLayout::EditorAndPreview);
        handler.handle(SourceExpression::line(1), Output::text("preview"));
        handler.error("boom");
        handler.on_finish();

        assert_eq!(handler.no_preview().rendered(0).unwrap(), "inline");
        assert!(handler.no_preview().rendered(1).is_none());
        assert_eq!(handler.with_preview().layout().alignments(), vec![(1, 1)]);
        assert_eq!(handler.with_preview().errors().len(), 1);
        assert!(handler.no_preview().errors().is_empty());

        handler.clear();
        assert!(handler.no_preview().rendered(0).is_none());
        assert!(handler.with_preview().layout().is_empty());
    }
}
