//! Metadata structures for BigQuery table schemas

use std::fmt;

/// Metadata for a BigQuery table
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    /// Table identifier within its dataset (e.g. `orders`)
    pub table_id: String,

    /// Table description, empty when none is set
    pub description: String,

    /// Fully qualified id (e.g. `my-project:sales.orders`)
    pub full_id: String,

    /// Columns in table order
    pub columns: Vec<ColumnSchema>,
}

/// Metadata for a column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    /// Column name as defined in BigQuery
    pub name: String,

    /// Semantic column type
    pub field_type: FieldType,

    /// Column mode
    pub mode: FieldMode,

    /// Column description (if any)
    pub description: Option<String>,
}

impl ColumnSchema {
    /// Create a nullable column with no description
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            mode: FieldMode::default(),
            description: None,
        }
    }
}

impl TableSchema {
    /// Create a table schema; `full_id` defaults to the table id
    pub fn new(table_id: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        let table_id = table_id.into();
        Self {
            full_id: table_id.clone(),
            table_id,
            description: String::new(),
            columns,
        }
    }
}

/// BigQuery semantic column type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Bytes,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Date,
    Time,
    DateTime,
    Numeric,
    Geography,
    Record,
    /// A type name this tool does not know, kept verbatim
    Unknown(String),
}

impl FieldType {
    /// Parse a BigQuery type name, accepting the standard SQL aliases
    pub fn parse(type_name: &str) -> Self {
        match type_name.trim().to_uppercase().as_str() {
            "STRING" => FieldType::String,
            "BYTES" => FieldType::Bytes,
            "INTEGER" | "INT64" => FieldType::Integer,
            "FLOAT" | "FLOAT64" => FieldType::Float,
            "BOOLEAN" | "BOOL" => FieldType::Boolean,
            "TIMESTAMP" => FieldType::Timestamp,
            "DATE" => FieldType::Date,
            "TIME" => FieldType::Time,
            "DATETIME" => FieldType::DateTime,
            "NUMERIC" | "BIGNUMERIC" | "DECIMAL" | "BIGDECIMAL" => FieldType::Numeric,
            "GEOGRAPHY" => FieldType::Geography,
            "RECORD" | "STRUCT" => FieldType::Record,
            _ => FieldType::Unknown(type_name.to_string()),
        }
    }

    /// Canonical BigQuery type name
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "STRING",
            FieldType::Bytes => "BYTES",
            FieldType::Integer => "INTEGER",
            FieldType::Float => "FLOAT",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Timestamp => "TIMESTAMP",
            FieldType::Date => "DATE",
            FieldType::Time => "TIME",
            FieldType::DateTime => "DATETIME",
            FieldType::Numeric => "NUMERIC",
            FieldType::Geography => "GEOGRAPHY",
            FieldType::Record => "RECORD",
            FieldType::Unknown(name) => name,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BigQuery column mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldMode {
    #[default]
    Nullable,
    Required,
    Repeated,
}

impl FieldMode {
    /// Parse a mode name; BigQuery treats a missing or unknown mode as NULLABLE
    pub fn parse(mode: Option<&str>) -> Self {
        match mode.map(|m| m.trim().to_uppercase()).as_deref() {
            Some("REQUIRED") => FieldMode::Required,
            Some("REPEATED") => FieldMode::Repeated,
            _ => FieldMode::Nullable,
        }
    }
}

impl fmt::Display for FieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldMode::Nullable => "NULLABLE",
            FieldMode::Required => "REQUIRED",
            FieldMode::Repeated => "REPEATED",
        };
        f.write_str(name)
    }
}
