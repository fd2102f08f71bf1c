//! # mf-scaffold-cli
//!
//! CLI library for scaffolding C# models from an M-Files vault schema
//! snapshot.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`console`] - Coloured terminal host for progress and warnings
//! - [`writer`] - Filesystem project writer with dry-run support
//! - [`error`] - Error types and handling

pub mod config;
pub mod console;
pub mod error;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use console::ConsoleHost;
pub use error::{CliError, CliResult};
pub use writer::FsProjectWriter;

use mf_scaffold::schema::SchemaElementKind;

/// Parse a kind name as typed on the command line
/// (`property-definition`, `PropertyDefinition`, `property_definition`).
pub fn parse_kind(value: &str) -> Result<SchemaElementKind, String> {
    let wanted: String = value.chars().filter(|c| *c != '-' && *c != '_').collect();
    SchemaElementKind::ALL
        .iter()
        .copied()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(&wanted))
        .ok_or_else(|| {
            let known: Vec<_> = SchemaElementKind::ALL.iter().map(|k| k.as_str()).collect();
            format!("unknown element kind '{value}' (expected one of: {})", known.join(", "))
        })
}
