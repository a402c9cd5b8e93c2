//! # Composed Documents
//!
//! The output of every composer: an ordered list of [`Line`]s followed by a
//! terminal [`CutDirective`].
//!
//! ```
//! use denpyo::document::{CutDirective, DocumentBuilder, DocumentKind, Emphasis, Line};
//!
//! let mut builder = DocumentBuilder::new(DocumentKind::PlainText, 32);
//! builder.push(Line::new("Hello").emphasis(Emphasis::Bold));
//! builder.push(Line::blank());
//! let doc = builder.finish(CutDirective::partial());
//!
//! assert_eq!(doc.text(), "Hello\n\n");
//! assert!(doc.cut().partial);
//! ```
//!
//! A [`ComposedDocument`] has no mutators. Builders are consumed by
//! [`DocumentBuilder::finish`], so nothing can be appended after the cut.

use serde::Serialize;

/// The document variants a composer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// Customer-facing receipt with tax-law sections (領収書).
    TaxInvoice,
    /// Cashier/kitchen slip without tax-law sections (会計伝票).
    OrderSlip,
    /// Free text, printed as given.
    PlainText,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TaxInvoice => "tax invoice",
            Self::OrderSlip => "order slip",
            Self::PlainText => "plain text",
        }
    }
}

/// Printer emphasis hint for a line. Sinks without styling ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Bold,
    /// Double size, used for titles and the amount banner.
    Large,
    /// Small print for trailing identifiers.
    Reduced,
}

/// One printed row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Line {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Emphasis>,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: None,
        }
    }

    pub fn blank() -> Self {
        Self::new("")
    }

    pub fn emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = Some(emphasis);
        self
    }

    /// Width in printer columns.
    pub fn width(&self) -> usize {
        crate::layout::text_width(&self.text)
    }
}

/// How the paper is cut after the last line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CutDirective {
    /// Partial cut leaves a hinge so the slip stays on the roll.
    pub partial: bool,
}

impl CutDirective {
    pub fn partial() -> Self {
        Self { partial: true }
    }

    pub fn full() -> Self {
        Self { partial: false }
    }
}

/// A finished document. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ComposedDocument {
    kind: DocumentKind,
    width: usize,
    lines: Vec<Line>,
    cut: CutDirective,
}

impl ComposedDocument {
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Page width the document was laid out for.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn cut(&self) -> CutDirective {
        self.cut
    }

    /// The character stream handed to the output sink: every line followed by `\n`.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.text.len() + 1).sum());
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }

    /// True when some line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }
}

/// Accumulates lines for one document. Consumed by [`finish`](Self::finish).
#[derive(Debug)]
pub struct DocumentBuilder {
    kind: DocumentKind,
    width: usize,
    lines: Vec<Line>,
}

impl DocumentBuilder {
    pub fn new(kind: DocumentKind, width: usize) -> Self {
        Self {
            kind,
            width,
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line>) {
        self.lines.extend(lines);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append the cut and seal the document.
    pub fn finish(self, cut: CutDirective) -> ComposedDocument {
        ComposedDocument {
            kind: self.kind,
            width: self.width,
            lines: self.lines,
            cut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc = DocumentBuilder::new(DocumentKind::PlainText, 32).finish(CutDirective::full());
        assert!(doc.lines().is_empty());
        assert_eq!(doc.text(), "");
        assert!(!doc.cut().partial);
    }

    #[test]
    fn test_text_joins_lines() {
        let mut builder = DocumentBuilder::new(DocumentKind::OrderSlip, 32);
        builder.push(Line::new("a"));
        builder.extend([Line::new("b"), Line::blank()]);
        assert_eq!(builder.len(), 3);
        assert!(!builder.is_empty());

        let doc = builder.finish(CutDirective::partial());
        assert_eq!(doc.text(), "a\nb\n\n");
        assert_eq!(doc.kind(), DocumentKind::OrderSlip);
        assert_eq!(doc.width(), 32);
    }

    #[test]
    fn test_line_width_counts_columns() {
        assert_eq!(Line::new("領 収 書").width(), 8);
        assert_eq!(Line::new("¥1,000").width(), 6);
        assert_eq!(Line::new("金額  ¥52,000－").width(), 15);
    }

    #[test]
    fn test_emphasis_serializes_only_when_set() {
        let plain = serde_json::to_string(&Line::new("x")).unwrap();
        assert_eq!(plain, r#"{"text":"x"}"#);
        let bold = serde_json::to_string(&Line::new("x").emphasis(Emphasis::Bold)).unwrap();
        assert_eq!(bold, r#"{"text":"x","emphasis":"bold"}"#);
    }
}
