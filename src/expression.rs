use std::fmt;

/// A contiguous, inclusive line range `[line_start, line_end]` of the scratch
/// source that produced one or more outputs.
///
/// Expressions are handed out by the evaluator in increasing `line_start`
/// order; the layout relies on that and does not re-check it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceExpression {
    line_start: usize,
    line_end: usize,
}

impl SourceExpression {
    pub fn new(line_start: usize, line_end: usize) -> SourceExpression {
        assert!(line_start <= line_end, "expression ends before it starts: {}..={}", line_start, line_end);
        SourceExpression { line_start, line_end }
    }

    /// Expression covering a single source line.
    pub fn line(line: usize) -> SourceExpression {
        SourceExpression { line_start: line, line_end: line }
    }

    pub fn line_start(&self) -> usize {
        self.line_start
    }

    pub fn line_end(&self) -> usize {
        self.line_end
    }

    pub fn height(&self) -> usize {
        self.line_end - self.line_start + 1
    }
}

impl fmt::Debug for SourceExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}..={}]", self.line_start, self.line_end)
    }
}
