//! Document assembly - header, imports and structs in one source file

use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::catalog::TableSchema;
use crate::error::{CodegenError, Result};

use super::format::format_document;
use super::imports::render_imports;
use super::struct_generator::{generate_struct, GeneratedStruct};

/// A table left out of the document, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedTable {
    pub table_id: String,
    pub reason: String,
}

/// Outcome of one generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Formatted source document
    pub document: String,

    /// Struct names, in document order
    pub generated: Vec<String>,

    /// Tables that could not be turned into structs
    pub skipped: Vec<SkippedTable>,
}

/// Render the generated-file banner.
///
/// Inner doc comments are used so the banner survives formatting.
pub fn render_header(module_name: &str, dataset: &str, regenerate_command: &str) -> String {
    format!(
        "//! Code generated by bqschema-codegen; DO NOT EDIT.\n\
         //!\n\
         //! Regenerate with: `{}`\n\
         //!\n\
         //! Module `{}`: schema structs for BigQuery dataset `{}`.\n\n",
        regenerate_command, module_name, dataset
    )
}

/// Concatenate header, import block and struct declarations
pub fn assemble(header: &str, import_block: &str, structs: &[GeneratedStruct]) -> String {
    let mut code = String::with_capacity(
        header.len() + import_block.len() + structs.iter().map(|s| s.code.len()).sum::<usize>(),
    );
    code.push_str(header);
    code.push_str(import_block);
    for generated in structs {
        code.push_str(&generated.code);
    }
    code
}

/// Generate the document for `tables`, in the given order.
///
/// A table whose struct can't be generated, or whose struct name is already
/// taken by an earlier table, is logged and skipped; a document that fails to
/// parse or format aborts the run.
pub fn generate_document(tables: &[TableSchema], header: &str) -> Result<GenerationReport> {
    let mut structs = Vec::new();
    let mut skipped = Vec::new();
    let mut names = HashSet::new();

    for table in tables {
        let generated = generate_struct(table).and_then(|generated| {
            if names.contains(&generated.name) {
                Err(CodegenError::InvalidTable(format!(
                    "struct name `{}` is already used by another table",
                    generated.name
                )))
            } else {
                Ok(generated)
            }
        });

        match generated {
            Ok(generated) => {
                names.insert(generated.name.clone());
                structs.push(generated);
            }
            Err(e) if e.is_table_scoped() => {
                warn!("Skipping table `{}`: {}", table.table_id, e);
                skipped.push(SkippedTable {
                    table_id: table.table_id.clone(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    let imports: Vec<&str> = structs
        .iter()
        .flat_map(|s| s.imports.iter().map(String::as_str))
        .collect();
    let import_block = render_imports(&imports);
    debug!("Import block: {:?}", import_block);

    let raw = assemble(header, &import_block, &structs);
    let document = format_document(&raw)?;

    info!(
        "Generated {} structs ({} tables skipped)",
        structs.len(),
        skipped.len()
    );

    Ok(GenerationReport {
        document,
        generated: structs.into_iter().map(|s| s.name).collect(),
        skipped,
    })
}
