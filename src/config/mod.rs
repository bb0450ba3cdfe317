//! Configuration module for fincalc
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Ledger display settings (exchange rate, USD toggle)
//! - Diagnostic logging setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use logging::init_tracing;
pub use paths::FincalcPaths;
pub use settings::Settings;
