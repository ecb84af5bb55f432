//! Error types with rich diagnostics using miette
//!
//! Configuration errors carry source spans so a broken JSON file points at
//! the offending character.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::interact::Field;
use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors that occur while importing or exporting a chart configuration
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("configuration is not valid JSON")]
    #[diagnostic(code(nightingale::config::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
    },

    #[error("configuration must be a JSON object, found {found}")]
    #[diagnostic(
        code(nightingale::config::not_an_object),
        help("a configuration looks like {{\"data\": [...], \"innerRadius\": 50}}")
    )]
    NotAnObject { found: &'static str },

    #[error("failed to serialize configuration")]
    #[diagnostic(code(nightingale::config::serialize))]
    Serialize(#[source] serde_json::Error),
}

impl ConfigError {
    /// Build a `Syntax` error from a serde_json error, pointing at its line and column.
    pub fn syntax(name: &str, text: &str, err: &serde_json::Error) -> Self {
        let offset = byte_offset(text, err.line(), err.column());
        ConfigError::Syntax {
            message: err.to_string(),
            src: NamedSource::new(name, text.to_string()),
            span: SourceSpan::from((offset, 0)),
        }
    }
}

/// serde_json reports 1-based lines and columns; columns count bytes.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while serializing a scene
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("XML serialization error: {message}")]
    #[diagnostic(code(nightingale::render::serialize))]
    Serialize { message: String },
}

// ============================================================================
// Edit Errors
// ============================================================================

/// Errors from inline text edits. The edited item keeps its previous value.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("invalid number for {field}: {source}")]
    #[diagnostic(
        code(nightingale::edit::invalid_number),
        help("the previous value was kept")
    )]
    InvalidNumber {
        field: Field,
        #[source]
        source: NumericError,
    },

    #[error("{field} cannot be edited from here")]
    #[diagnostic(code(nightingale::edit::not_editable))]
    NotEditable { field: Field },

    #[error("no editor is open")]
    #[diagnostic(code(nightingale::edit::closed))]
    Closed,
}
