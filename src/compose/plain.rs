//! Free text, printed line by line.

use tracing::debug;

use super::FEED_LINES;
use crate::document::{ComposedDocument, CutDirective, DocumentBuilder, DocumentKind, Line};
use crate::layout::Layout;

/// Split `text` on newlines (a trailing newline does not add an empty line),
/// then feed and cut.
pub fn compose(text: &str, layout: &Layout) -> ComposedDocument {
    let mut doc = DocumentBuilder::new(DocumentKind::PlainText, layout.width());

    let body = text.strip_suffix('\n').unwrap_or(text);
    if !body.is_empty() {
        for line in body.split('\n') {
            doc.push(Line::new(line.strip_suffix('\r').unwrap_or(line)));
        }
    }
    if doc.is_empty() {
        debug!("empty text, printing feed only");
    }

    for _ in 0..FEED_LINES {
        doc.push(Line::blank());
    }
    doc.finish(CutDirective::partial())
}
