use rope::{LinesMetric, Rope};

/// Line-addressed text sink the layout writes block output into.
///
/// Lines are 0-based. A document always has at least one (possibly empty)
/// line; offsets are byte offsets.
pub trait TargetDocument {
    /// Total length in bytes.
    fn len(&self) -> usize;

    fn line_count(&self) -> usize;

    fn line_start_offset(&self, line: usize) -> usize;

    /// Offset of the end of `line`, excluding its line break.
    fn line_end_offset(&self, line: usize) -> usize;

    /// Text of `line` without its line break.
    fn line_content(&self, line: usize) -> String;

    fn insert(&mut self, offset: usize, text: &str);

    fn set_text(&mut self, text: &str);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `text` at the start of `line`, first padding the document with
    /// line breaks if it is too short to have such a line.
    fn insert_text_at_line(&mut self, line: usize, text: &str) {
        while self.line_count() <= line {
            let end = self.len();
            self.insert(end, "\n");
        }
        let offset = self.line_start_offset(line);
        self.insert(offset, text);
    }
}

/// In-memory preview document backed by a rope.
#[derive(Clone, Default)]
pub struct RopeDocument {
    inner: Rope,
}

impl RopeDocument {
    pub fn new() -> RopeDocument {
        RopeDocument::default()
    }

    pub fn from_text(text: &str) -> RopeDocument {
        RopeDocument { inner: Rope::from(text) }
    }

    pub fn text(&self) -> String {
        String::from(&self.inner)
    }

    pub fn rope(&self) -> &Rope {
        &self.inner
    }

    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.inner.line_of_offset(offset)
    }
}

impl TargetDocument for RopeDocument {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn line_count(&self) -> usize {
        self.inner.measure::<LinesMetric>() + 1
    }

    fn line_start_offset(&self, line: usize) -> usize {
        assert!(line < self.line_count(), "line {} out of bounds ({} lines)", line, self.line_count());
        self.inner.offset_of_line(line)
    }

    fn line_end_offset(&self, line: usize) -> usize {
        assert!(line < self.line_count(), "line {} out of bounds ({} lines)", line, self.line_count());
        if line + 1 == self.line_count() {
            self.inner.len()
        } else {
            self.inner.offset_of_line(line + 1) - 1
        }
    }

    fn line_content(&self, line: usize) -> String {
        let beg = self.line_start_offset(line);
        let end = self.line_end_offset(line);
        self.inner.slice_to_cow(beg..end).into_owned()
    }

    fn insert(&mut self, offset: usize, text: &str) {
        self.inner.edit(offset..offset, text);
    }

    fn set_text(&mut self, text: &str) {
        self.inner = Rope::from(text);
    }
}

#[cfg(test)]
mod tests {
    use super::{RopeDocument, TargetDocument};

    #[test]
    fn empty_document_has_one_line() {
        let doc = RopeDocument::new();
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line_start_offset(0), 0);
        assert_eq!(doc.line_end_offset(0), 0);
        assert_eq!(doc.line_content(0), "");
    }

    #[test]
    fn line_offsets() {
        let doc = RopeDocument::from_text("ab\n\ncde");
        assert_eq!(doc.line_count(), 3);
        assert_eq!((doc.line_start_offset(0), doc.line_end_offset(0)), (0, 2));
        assert_eq!((doc.line_start_offset(1), doc.line_end_offset(1)), (3, 3));
        assert_eq!((doc.line_start_offset(2), doc.line_end_offset(2)), (4, 7));
        assert_eq!(doc.line_content(2), "cde");
        assert_eq!(doc.line_of_offset(4), 2);
    }

    #[test]
    fn insert_at_line_pads_short_document() {
        let mut doc = RopeDocument::new();
        doc.insert_text_at_line(2, "x");
        assert_eq!(doc.text(), "\n\nx");
        doc.insert_text_at_line(0, "top");
        assert_eq!(doc.text(), "top\n\nx");
    }

    #[test]
    fn insert_into_existing_line_prepends() {
        let mut doc = RopeDocument::from_text("a\nb");
        doc.insert_text_at_line(1, "z");
        assert_eq!(doc.text(), "a\nzb");
    }

    #[test]
    fn set_text_replaces_everything() {
        let mut doc = RopeDocument::from_text("a\nb\nc");
        doc.set_text("");
        assert!(doc.is_empty());
        assert_eq!(doc.line_count(), 1);
    }
}
