//! Struct generator - generates Rust structs from table schemas

use tracing::debug;

use crate::catalog::{ColumnSchema, TableSchema};
use crate::error::{CodegenError, Result};

use super::naming::{is_valid_identifier, to_field_name, to_struct_name};
use super::type_mapper::{is_reserved_type_name, map_field_type, RustType};

/// One struct field, derived from a column
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedField {
    /// Field identifier (capitalized column name)
    pub name: String,

    /// Original column name, carried in the rename tag
    pub column: String,

    pub rust_type: RustType,
}

impl GeneratedField {
    /// Build the field for a column
    pub fn from_column(column: &ColumnSchema) -> Result<Self> {
        let wrap = |source: CodegenError| CodegenError::Column {
            column: column.name.clone(),
            source: Box::new(source),
        };

        let rust_type = map_field_type(&column.field_type).map_err(wrap)?;

        let name = to_field_name(&column.name);
        if !is_valid_identifier(&name) {
            return Err(wrap(CodegenError::InvalidTable(format!(
                "field name `{}` is not a valid Rust identifier",
                name
            ))));
        }

        Ok(Self {
            name,
            column: column.name.clone(),
            rust_type,
        })
    }

    /// Type string for the declaration
    pub fn type_name(&self) -> &'static str {
        self.rust_type.to_type_string()
    }

    /// Import needed by the field's type
    pub fn import(&self) -> Option<&'static str> {
        self.rust_type.import()
    }
}

/// The declaration for one table plus the imports its fields need
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedStruct {
    pub name: String,
    pub code: String,
    /// Imports in column order, duplicates included
    pub imports: Vec<String>,
}

/// Generate the struct declaration for a table.
///
/// Fails on an empty table id or on the first column whose type can't be
/// mapped; no partial code is returned.
pub fn generate_struct(table: &TableSchema) -> Result<GeneratedStruct> {
    if table.table_id.is_empty() {
        return Err(CodegenError::InvalidTable(format!(
            "table id is empty. table schema dump: {:?}",
            table
        )));
    }

    let struct_name = to_struct_name(&table.table_id);
    if !is_valid_identifier(&struct_name) {
        return Err(CodegenError::InvalidTable(format!(
            "struct name `{}` derived from table `{}` is not a valid Rust identifier",
            struct_name, table.full_id
        )));
    }
    if is_reserved_type_name(&struct_name) {
        return Err(CodegenError::InvalidTable(format!(
            "struct name `{}` derived from table `{}` would shadow a field type",
            struct_name, table.full_id
        )));
    }
    debug!("Generating struct {} for {}", struct_name, table.full_id);

    let fields = table
        .columns
        .iter()
        .map(GeneratedField::from_column)
        .collect::<Result<Vec<_>>>()?;

    let mut code = String::new();

    code.push_str(&format!(
        "/// {} is BigQuery table `{}` schema struct.\n",
        struct_name,
        doc_safe(&table.full_id)
    ));
    code.push_str(&doc_lines("Description: ", &table.description));

    code.push_str("#[allow(non_snake_case)]\n");
    code.push_str("#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]\n");
    code.push_str(&format!("pub struct {} {{\n", struct_name));

    let mut imports = Vec::new();
    for field in &fields {
        if let Some(import) = field.import() {
            imports.push(import.to_string());
        }
        code.push_str(&format!("    #[serde(rename = {:?})]\n", field.column));
        code.push_str(&format!("    pub {}: {},\n", field.name, field.type_name()));
    }

    code.push_str("}\n\n");

    Ok(GeneratedStruct {
        name: struct_name,
        code,
        imports,
    })
}

/// Render `text` as `///` lines, the first one prefixed with `label`.
/// Always yields at least one line, even for empty text.
fn doc_lines(label: &str, text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = text.lines().map(doc_safe);
    let mut doc = format!("/// {}{}", label, lines.next().unwrap_or_default());
    doc = doc.trim_end().to_string();
    doc.push('\n');
    for line in lines {
        let line = format!("/// {}", line);
        doc.push_str(line.trim_end());
        doc.push('\n');
    }
    doc
}

/// Replace characters a doc comment can't carry with spaces.
///
/// Control characters (a bare `\r` included) are rejected by the lexer, and
/// bidirectional overrides are denied by rustc.
fn doc_safe(text: &str) -> String {
    text.chars()
        .map(|c| {
            let bidi = matches!(c, '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}');
            if bidi || (c.is_control() && c != '\t') {
                ' '
            } else {
                c
            }
        })
        .collect()
}
