use rope::rope::count_newlines;

/// Classification of an evaluator output fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Output,
    Error,
}

/// One unit of evaluator output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub kind: OutputKind,
}

impl Output {
    pub fn new<S: Into<String>>(text: S, kind: OutputKind) -> Output {
        Output { text: text.into(), kind }
    }

    pub fn text<S: Into<String>>(text: S) -> Output {
        Output::new(text, OutputKind::Output)
    }

    pub fn error<S: Into<String>>(text: S) -> Output {
        Output::new(text, OutputKind::Error)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Number of line breaks the fragments occupy once rendered. Every fragment
/// after the first starts on a fresh line.
pub fn count_new_lines(outputs: &[Output]) -> usize {
    let embedded: usize = outputs.iter().map(|o| count_newlines(&o.text)).sum();
    embedded + outputs.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::{count_new_lines, Output};

    #[test]
    fn separators_between_fragments() {
        assert_eq!(count_new_lines(&[]), 0);
        assert_eq!(count_new_lines(&[Output::text("x")]), 0);
        assert_eq!(count_new_lines(&[Output::text("x"), Output::text("y")]), 1);
        assert_eq!(count_new_lines(&[Output::text("a\nb"), Output::error("c\nd\n")]), 4);
    }

    #[test]
    fn blank_detection() {
        assert!(Output::text("  \n\t").is_blank());
        assert!(!Output::error(" e ").is_blank());
    }
}
