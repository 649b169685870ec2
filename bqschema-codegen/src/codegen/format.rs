//! Formatting and import cleanup for generated documents
//!
//! The raw document is parsed with `syn`; a parse failure means the
//! generator produced malformed code and is fatal. `use` leaves whose name
//! never appears in the file are dropped, then the file is pretty-printed
//! with `prettyplease`.

use std::collections::HashSet;
use syn::visit::Visit;
use syn::{Item, UseTree};

use crate::error::{CodegenError, Result};

/// Parse, prune unused imports, and pretty-print a generated document
pub fn format_document(code: &str) -> Result<String> {
    let mut file = syn::parse_file(code)
        .map_err(|e| CodegenError::FormatError(format!("generated code does not parse: {}", e)))?;

    let used = used_idents(&file);
    file.items = file
        .items
        .into_iter()
        .filter_map(|item| match item {
            Item::Use(mut item_use) => {
                prune_use_tree(&mut item_use.tree, &used).then_some(Item::Use(item_use))
            }
            other => Some(other),
        })
        .collect();

    Ok(prettyplease::unparse(&file))
}

/// Collects every identifier used in a path outside of `use` items
#[derive(Default)]
struct IdentCollector {
    idents: HashSet<String>,
}

impl<'ast> Visit<'ast> for IdentCollector {
    fn visit_item_use(&mut self, _: &'ast syn::ItemUse) {}

    fn visit_path_segment(&mut self, segment: &'ast syn::PathSegment) {
        self.idents.insert(segment.ident.to_string());
        syn::visit::visit_path_segment(self, segment);
    }
}

fn used_idents(file: &syn::File) -> HashSet<String> {
    let mut collector = IdentCollector::default();
    collector.visit_file(file);
    collector.idents
}

/// Remove unused leaves from a use tree. Returns false when nothing is left.
fn prune_use_tree(tree: &mut UseTree, used: &HashSet<String>) -> bool {
    match tree {
        UseTree::Path(path) => prune_use_tree(&mut path.tree, used),
        UseTree::Name(name) => used.contains(&name.ident.to_string()),
        UseTree::Rename(rename) => used.contains(&rename.rename.to_string()),
        UseTree::Glob(_) => true,
        UseTree::Group(group) => {
            let items = std::mem::take(&mut group.items);
            group.items = items
                .into_iter()
                .filter_map(|mut item| prune_use_tree(&mut item, used).then_some(item))
                .collect();
            !group.items.is_empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_and_keeps_docs() {
        let code = "//! Generated.\n\n/// Orders doc.\npub struct Orders { pub Id: i64 }\n";
        let formatted = format_document(code).unwrap();
        assert!(formatted.starts_with("//! Generated.\n"));
        assert!(formatted.contains("/// Orders doc.\npub struct Orders {\n    pub Id: i64,\n}\n"));
    }

    #[test]
    fn test_prunes_unused_imports() {
        let code = "use {chrono::{DateTime, Utc}, chrono::NaiveDate, num_rational::BigRational};\n\
                    pub struct Events { pub Ts: DateTime<Utc>, pub Day: NaiveDate }\n";
        let formatted = format_document(code).unwrap();
        assert!(formatted.contains("DateTime"));
        assert!(formatted.contains("Utc"));
        assert!(formatted.contains("chrono::NaiveDate"));
        assert!(!formatted.contains("BigRational"));
    }

    #[test]
    fn test_drops_fully_unused_use() {
        let code = "use chrono::NaiveTime;\npub struct Empty {}\n";
        let formatted = format_document(code).unwrap();
        assert!(!formatted.contains("use "));
        assert!(formatted.contains("pub struct Empty"));
    }

    #[test]
    fn test_malformed_code_is_fatal() {
        let err = format_document("pub struct Broken {").unwrap_err();
        assert!(matches!(err, CodegenError::FormatError(_)));
    }
}
