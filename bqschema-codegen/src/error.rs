//! Error types for bqschema-codegen

use thiserror::Error;

/// Result type alias for bqschema-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("unsupported field type: {0}")]
    UnsupportedFieldType(String),

    #[error("column `{column}`: {source}")]
    Column {
        column: String,
        #[source]
        source: Box<CodegenError>,
    },

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Failed to format generated code: {0}")]
    FormatError(String),
}

impl CodegenError {
    /// Whether this error only invalidates a single table.
    ///
    /// Table-scoped errors are logged and the table is skipped; everything
    /// else aborts the run.
    pub fn is_table_scoped(&self) -> bool {
        match self {
            CodegenError::UnsupportedFieldType(_) | CodegenError::InvalidTable(_) => true,
            CodegenError::Column { source, .. } => source.is_table_scoped(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CodegenError {
    fn from(err: reqwest::Error) -> Self {
        CodegenError::CatalogError(err.to_string())
    }
}

impl From<syn::Error> for CodegenError {
    fn from(err: syn::Error) -> Self {
        CodegenError::FormatError(err.to_string())
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}
