//! BigQuery to Rust type mapping

use crate::catalog::FieldType;
use crate::error::{CodegenError, Result};

/// Represents a Rust type for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RustType {
    Bool,
    I64,
    F64,
    String,
    Bytes,
    BigRational,
    DateTimeUtc,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
}

impl RustType {
    pub const ALL: [RustType; 10] = [
        RustType::Bool,
        RustType::I64,
        RustType::F64,
        RustType::String,
        RustType::Bytes,
        RustType::BigRational,
        RustType::DateTimeUtc,
        RustType::NaiveDate,
        RustType::NaiveTime,
        RustType::NaiveDateTime,
    ];

    /// Get the type string for code generation
    pub fn to_type_string(&self) -> &'static str {
        match self {
            RustType::Bool => "bool",
            RustType::I64 => "i64",
            RustType::F64 => "f64",
            RustType::String => "String",
            RustType::Bytes => "Vec<u8>",
            RustType::BigRational => "BigRational",
            RustType::DateTimeUtc => "DateTime<Utc>",
            RustType::NaiveDate => "NaiveDate",
            RustType::NaiveTime => "NaiveTime",
            RustType::NaiveDateTime => "NaiveDateTime",
        }
    }

    /// The `use` path this type needs, if it is not in the prelude
    pub fn import(&self) -> Option<&'static str> {
        match self {
            RustType::BigRational => Some("num_rational::BigRational"),
            RustType::DateTimeUtc => Some("chrono::{DateTime, Utc}"),
            RustType::NaiveDate => Some("chrono::NaiveDate"),
            RustType::NaiveTime => Some("chrono::NaiveTime"),
            RustType::NaiveDateTime => Some("chrono::NaiveDateTime"),
            RustType::Bool
            | RustType::I64
            | RustType::F64
            | RustType::String
            | RustType::Bytes => None,
        }
    }
}

/// Whether `name` is an identifier some field type refers to unqualified.
///
/// A generated struct with such a name would shadow the type for every
/// other struct in the document.
pub fn is_reserved_type_name(name: &str) -> bool {
    RustType::ALL.iter().any(|rust_type| {
        rust_type
            .to_type_string()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .any(|ident| !ident.is_empty() && ident == name)
    })
}

/// Map a BigQuery column type to the Rust type that holds it.
///
/// `RECORD` and unknown types are rejected with
/// [`CodegenError::UnsupportedFieldType`].
pub fn map_field_type(field_type: &FieldType) -> Result<RustType> {
    match field_type {
        FieldType::String | FieldType::Geography => Ok(RustType::String),
        FieldType::Bytes => Ok(RustType::Bytes),
        FieldType::Integer => Ok(RustType::I64),
        FieldType::Float => Ok(RustType::F64),
        FieldType::Boolean => Ok(RustType::Bool),
        FieldType::Timestamp => Ok(RustType::DateTimeUtc),
        FieldType::Date => Ok(RustType::NaiveDate),
        FieldType::Time => Ok(RustType::NaiveTime),
        FieldType::DateTime => Ok(RustType::NaiveDateTime),
        FieldType::Numeric => Ok(RustType::BigRational),
        FieldType::Record | FieldType::Unknown(_) => {
            Err(CodegenError::UnsupportedFieldType(field_type.to_string()))
        }
    }
}
