//! bqschema-codegen: Generate Rust structs from the tables of a BigQuery dataset
//!
//! Every table of the dataset becomes one struct whose fields mirror the
//! table's columns, so query results can be deserialized into typed records:
//!
//! - Struct and field names are the table id / column name with the first
//!   character upper-cased
//! - Every field carries `#[serde(rename = "<column>")]` with the original
//!   column name
//! - Only the `use` statements the mapped types need are emitted
//!
//! Tables containing `RECORD` columns (or types this tool does not know) are
//! skipped with a warning; the rest of the dataset is still generated.
//!
//! # Library Usage
//!
//! ```rust,ignore
//! fn main() {
//!     let report = bqschema_codegen::CodegenBuilder::new("my-project", "sales")
//!         .output_file("src/bqtableschema.rs")
//!         .generate()
//!         .expect("Failed to generate BigQuery structs");
//!
//!     for skipped in &report.skipped {
//!         eprintln!("skipped {}: {}", skipped.table_id, skipped.reason);
//!     }
//! }
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! bqschema-codegen --project my-project --dataset sales --output src/bqtableschema.rs
//! ```

pub mod catalog;
pub mod codegen;
pub mod config;
pub mod error;

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

pub use catalog::{
    BigQueryCatalog, JsonFileCatalog, StaticCatalog, TableCatalog, TableSchema,
};
pub use codegen::{GenerationReport, SkippedTable};
pub use config::CodegenConfig;
pub use error::{CodegenError, Result};

/// Main entry point: generate the document and write it to `config.output_file`.
///
/// In dry-run mode the document is returned but not written.
pub fn generate(config: &CodegenConfig) -> Result<GenerationReport> {
    let catalog = build_catalog(config)?;
    let report = generate_with_catalog(catalog.as_ref(), config)?;

    if config.dry_run {
        info!("Dry run: not writing {:?}", config.output_file);
    } else {
        info!("Writing {:?}", config.output_file);
        std::fs::write(&config.output_file, &report.document)?;
    }

    Ok(report)
}

/// Generate the document from an already constructed catalog
pub fn generate_with_catalog(
    catalog: &dyn TableCatalog,
    config: &CodegenConfig,
) -> Result<GenerationReport> {
    info!("Listing tables of dataset {}", config.dataset);
    let tables = catalog.list_tables(&config.dataset)?;
    info!("Found {} tables", tables.len());

    let tables = filter_tables(tables, &config.include_tables, &config.exclude_tables);
    debug!(
        "After filtering: {} tables (include={}, exclude={})",
        tables.len(),
        config.include_tables,
        config.exclude_tables
    );

    let header = codegen::render_header(
        &config.module_name,
        &config.dataset,
        &config.regenerate_command(),
    );
    codegen::generate_document(&tables, &header)
}

/// Build the catalog the configuration asks for
pub fn build_catalog(config: &CodegenConfig) -> Result<Box<dyn TableCatalog>> {
    if let Some(schema_file) = &config.schema_file {
        debug!("Using schema file {:?}", schema_file);
        return Ok(Box::new(JsonFileCatalog::new(schema_file)));
    }

    let token: Box<dyn catalog::AccessTokenProvider> =
        match (&config.access_token, &config.keyfile) {
            (Some(token), _) => Box::new(catalog::StaticToken::new(token.clone())),
            (None, Some(keyfile)) => {
                Box::new(catalog::GoogleCredentials::from_key_file(keyfile)?)
            }
            (None, None) => Box::new(catalog::GoogleCredentials::application_default()),
        };
    let catalog = BigQueryCatalog::new(
        config.project_id.clone(),
        token,
        Duration::from_secs(config.timeout_secs),
    )?
    .base_url(config.api_base_url.clone());

    Ok(Box::new(catalog))
}

/// Filter tables based on include/exclude patterns
fn filter_tables(tables: Vec<TableSchema>, include: &str, exclude: &str) -> Vec<TableSchema> {
    let include_all = include.trim() == "*" || include.trim().is_empty();
    let include_set: HashSet<String> = if include_all {
        HashSet::new()
    } else {
        include.split(',').map(|s| s.trim().to_string()).collect()
    };
    let exclude_set: HashSet<String> = exclude
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    tables
        .into_iter()
        .filter(|t| {
            let name = &t.table_id;
            let included = include_all || include_set.contains(name);
            let excluded = exclude_set.contains(name);
            included && !excluded
        })
        .collect()
}

/// Builder pattern for programmatic configuration
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder for a project and dataset
    pub fn new(project_id: &str, dataset: &str) -> Self {
        Self {
            config: CodegenConfig::default_with_dataset(project_id, dataset),
        }
    }

    /// Set the output file
    pub fn output_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config.output_file = path.as_ref().to_path_buf();
        self
    }

    /// Read tables from a JSON schema file instead of the BigQuery API
    pub fn schema_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config.schema_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Authenticate with a service-account key file
    pub fn keyfile(mut self, path: impl AsRef<Path>) -> Self {
        self.config.keyfile = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use a fixed OAuth2 access token
    pub fn access_token(mut self, token: &str) -> Self {
        self.config.access_token = Some(token.to_string());
        self
    }

    /// Set tables to include
    pub fn include_tables(mut self, tables: &[&str]) -> Self {
        self.config.include_tables = tables.join(",");
        self
    }

    /// Set tables to exclude
    pub fn exclude_tables(mut self, tables: &[&str]) -> Self {
        self.config.exclude_tables = tables.join(",");
        self
    }

    /// Set the module name declared in the generated header
    pub fn module_name(mut self, name: &str) -> Self {
        self.config.module_name = name.to_string();
        self
    }

    /// Enable dry run mode (generate without writing the file)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// Validate the configuration and generate the code
    pub fn generate(self) -> Result<GenerationReport> {
        self.config.validate()?;
        generate(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnSchema, FieldType};

    fn tables() -> Vec<TableSchema> {
        ["orders", "events", "tmp_orders"]
            .iter()
            .map(|id| TableSchema::new(*id, vec![ColumnSchema::new("id", FieldType::Integer)]))
            .collect()
    }

    fn ids(tables: &[TableSchema]) -> Vec<&str> {
        tables.iter().map(|t| t.table_id.as_str()).collect()
    }

    #[test]
    fn test_filter_tables_include_all() {
        let filtered = filter_tables(tables(), "*", "");
        assert_eq!(ids(&filtered), vec!["orders", "events", "tmp_orders"]);
    }

    #[test]
    fn test_filter_tables_include_and_exclude() {
        let filtered = filter_tables(tables(), "orders, tmp_orders", "tmp_orders");
        assert_eq!(ids(&filtered), vec!["orders"]);

        let filtered = filter_tables(tables(), "", "events");
        assert_eq!(ids(&filtered), vec!["orders", "tmp_orders"]);
    }

    #[test]
    fn test_generate_with_catalog_applies_filters() {
        let mut config = CodegenConfig::default_with_dataset("my-project", "sales");
        config.exclude_tables = "tmp_orders".into();

        let report = generate_with_catalog(&StaticCatalog::new(tables()), &config).unwrap();
        assert_eq!(report.generated, vec!["Orders", "Events"]);
        assert!(report
            .document
            .contains("bqschema-codegen --project my-project --dataset sales"));
    }

    #[test]
    fn test_catalog_error_is_fatal() {
        struct Failing;
        impl TableCatalog for Failing {
            fn list_tables(&self, dataset: &str) -> Result<Vec<TableSchema>> {
                Err(CodegenError::CatalogError(format!("Not found: Dataset {}", dataset)))
            }
        }

        let config = CodegenConfig::default_with_dataset("p", "missing");
        let err = generate_with_catalog(&Failing, &config).unwrap_err();
        assert!(matches!(err, CodegenError::CatalogError(_)));
    }

    #[test]
    fn test_build_catalog_rejects_malformed_keyfile() {
        let dir = tempfile::tempdir().unwrap();
        let keyfile = dir.path().join("key.json");
        std::fs::write(&keyfile, "not json").unwrap();

        let mut config = CodegenConfig::default_with_dataset("p", "sales");
        config.keyfile = Some(keyfile);
        assert!(matches!(
            build_catalog(&config),
            Err(CodegenError::ConfigError(_))
        ));

        // A static token wins over the key file
        config.access_token = Some("t0k".into());
        assert!(build_catalog(&config).is_ok());
    }

    #[test]
    fn test_build_catalog_prefers_schema_file() {
        let mut config = CodegenConfig::default_with_dataset("p", "sales");
        config.schema_file = Some("/no/such/file.json".into());
        let catalog = build_catalog(&config).unwrap();
        assert!(matches!(
            catalog.list_tables("sales"),
            Err(CodegenError::CatalogError(_))
        ));
    }
}
