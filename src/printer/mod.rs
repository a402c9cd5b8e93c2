//! # Printer Module
//!
//! This module provides printer-specific configurations.
//!
//! ## Modules
//!
//! - [`config`]: Device profiles and page widths

pub mod config;

pub use config::PrinterConfig;
