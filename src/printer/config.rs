//! # Printer Configuration
//!
//! This module defines the device profiles a document can be composed for.
//! A profile fixes the page width in columns; composers never hardcode it.
//!
//! ## Supported Printers
//!
//! | Model | Paper | Width (dots) | Columns |
//! |-------|-------|--------------|---------|
//! | SII MP-B20 | 58mm | 384 | 32 |
//! | Star TSP650II | 80mm | 576 | 48 |
//!
//! ## Usage
//!
//! ```
//! use denpyo::printer::PrinterConfig;
//!
//! let config = PrinterConfig::by_name("mp-b20").unwrap();
//! assert_eq!(config.columns(), 32);
//! ```

use serde::Serialize;

use crate::error::{DenpyoError, Result};

/// Width of one Font A character cell in dots.
const DOTS_PER_CHAR: u16 = 12;

/// # Printer Configuration
///
/// Defines the hardware characteristics relevant to text layout.
///
/// ```text
/// columns = width_dots / 12
///
/// MP-B20:   384 / 12 = 32
/// TSP650II: 576 / 12 = 48
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Short identifier accepted on the command line
    pub id: &'static str,

    /// Maximum print width in dots
    pub width_dots: u16,

    /// Resolution in dots per inch
    pub dpi: u16,
}

impl PrinterConfig {
    /// # SII MP-B20
    ///
    /// 58mm mobile printer used at the register. 32 columns.
    pub const MP_B20: Self = Self {
        name: "SII MP-B20",
        id: "mp-b20",
        width_dots: 384,
        dpi: 203,
    };

    /// # Star TSP650II
    ///
    /// 80mm desktop printer. 48 columns.
    pub const TSP650II: Self = Self {
        name: "Star TSP650II",
        id: "tsp650ii",
        width_dots: 576,
        dpi: 203,
    };

    /// Characters per line with Font A.
    #[inline]
    pub fn columns(&self) -> usize {
        (self.width_dots / DOTS_PER_CHAR) as usize
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / (self.dpi as f32 / 25.4)
    }

    /// List all built-in profiles.
    pub fn built_in() -> &'static [Self] {
        &[Self::MP_B20, Self::TSP650II]
    }

    /// Look up a profile by id, display name, or column count ("32", "48").
    pub fn by_name(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::built_in()
            .iter()
            .find(|p| {
                p.id.eq_ignore_ascii_case(wanted)
                    || p.name == wanted
                    || p.columns().to_string() == wanted
            })
            .copied()
            .ok_or_else(|| {
                DenpyoError::Configuration(format!(
                    "Unknown printer profile '{}'. Use 'mp-b20' (32 columns) or 'tsp650ii' (48 columns)",
                    s
                ))
            })
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::MP_B20
    }
}

// ============================================================================
// TESTS
// ============================================================================
