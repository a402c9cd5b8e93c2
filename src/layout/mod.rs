//! # Layout Engine
//!
//! Fixed-width text primitives for a page of `width` characters.
//!
//! Widths are counted in printer columns: kanji, kana and full-width forms
//! take two, everything else one. Nothing here ever clips text: a line that
//! does not fit is emitted whole and the printer wraps it.
//!
//! ```
//! use denpyo::layout::{Layout, Rule};
//!
//! let layout = Layout::new(32);
//! let row = layout.justify("小計:", &layout.currency(1_000));
//! assert_eq!(row.width(), 32);
//! assert_eq!(layout.rule(Rule::Section).text, "=".repeat(32));
//! ```

use unicode_width::UnicodeWidthStr;

use crate::document::Line;
use crate::printer::PrinterConfig;

/// Separator styles used throughout the documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rule {
    /// `================` between sections
    #[default]
    Section,
    /// `----------------` around the item list
    Items,
}

impl Rule {
    pub fn char(self) -> char {
        match self {
            Rule::Section => '=',
            Rule::Items => '-',
        }
    }
}

/// Layout primitives bound to one page width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    width: usize,
}

impl Layout {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Layout for a printer profile.
    pub fn for_printer(config: &PrinterConfig) -> Self {
        Self::new(config.columns())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Center `text`, padding both sides. Text at least as wide as the page
    /// is returned unchanged.
    pub fn center(&self, text: &str) -> Line {
        let len = text_width(text);
        if len >= self.width {
            return Line::new(text);
        }
        let left = (self.width - len) / 2;
        let right = self.width - len - left;
        Line::new(format!("{}{}{}", " ".repeat(left), text, " ".repeat(right)))
    }

    /// Right-align `text`.
    pub fn right(&self, text: &str) -> Line {
        let pad = self.width.saturating_sub(text_width(text));
        Line::new(format!("{}{}", " ".repeat(pad), text))
    }

    /// Right-align a block of rows as a unit. Shorter rows are padded to
    /// the widest one first, so every row starts in the same column.
    pub fn right_block<S: AsRef<str>>(&self, rows: &[S]) -> Vec<Line> {
        let widest = rows.iter().map(|r| text_width(r.as_ref())).max().unwrap_or(0);
        rows.iter()
            .map(|r| self.right(&pad_end(r.as_ref(), widest)))
            .collect()
    }

    /// `left` flush left, `right` flush right, at least one space between.
    pub fn justify(&self, left: &str, right: &str) -> Line {
        self.justify_width(left, right, self.width)
    }

    /// [`justify`](Self::justify) against an explicit width.
    pub fn justify_width(&self, left: &str, right: &str, width: usize) -> Line {
        let used = text_width(left) + text_width(right);
        let spaces = width.saturating_sub(used).max(1);
        Line::new(format!("{}{}{}", left, " ".repeat(spaces), right))
    }

    /// Yen amount with thousands separators: `¥1,234,567`.
    ///
    /// The magnitude is printed without a sign; callers that need one use
    /// [`signed_currency`](Self::signed_currency).
    pub fn currency(&self, amount: i64) -> String {
        format!("¥{}", group_thousands(amount.unsigned_abs()))
    }

    /// Currency with a caller-supplied sign: `+¥300`, `-¥1,200`.
    pub fn signed_currency(&self, sign: char, amount: i64) -> String {
        format!("{}{}", sign, self.currency(amount))
    }

    /// Full-width separator.
    pub fn rule(&self, rule: Rule) -> Line {
        self.rule_width(rule.char(), self.width)
    }

    pub fn rule_width(&self, ch: char, width: usize) -> Line {
        Line::new(ch.to_string().repeat(width))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::for_printer(&PrinterConfig::default())
    }
}

/// Width of `text` in printer columns.
pub fn text_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Pad `text` with trailing spaces to `width` columns. Wider text is
/// returned unchanged.
pub fn pad_end(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text_width(text));
    format!("{}{}", text, " ".repeat(pad))
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
