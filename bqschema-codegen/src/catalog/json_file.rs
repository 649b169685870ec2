//! Offline catalog backed by a JSON schema file

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::metadata::TableSchema;
use super::resource::TableResource;
use super::TableCatalog;
use crate::error::{CodegenError, Result};

/// A file holds either one table resource or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaFile {
    Many(Vec<TableResource>),
    One(Box<TableResource>),
}

/// Reads table resources in the shape printed by `bq show --format=json`.
///
/// Only tables whose `tableReference.datasetId` matches the requested
/// dataset are returned, in file order.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse table schemas from JSON text
    pub fn parse(json: &str, dataset: &str) -> Result<Vec<TableSchema>> {
        let resources = match serde_json::from_str::<SchemaFile>(json)? {
            SchemaFile::Many(resources) => resources,
            SchemaFile::One(resource) => vec![*resource],
        };

        Ok(resources
            .into_iter()
            .filter(|r| {
                let keep = r.table_reference.dataset_id == dataset;
                if !keep {
                    debug!(
                        "Ignoring {} (dataset {} != {})",
                        r.table_reference.table_id, r.table_reference.dataset_id, dataset
                    );
                }
                keep
            })
            .map(TableSchema::from)
            .collect())
    }
}

impl TableCatalog for JsonFileCatalog {
    fn list_tables(&self, dataset: &str) -> Result<Vec<TableSchema>> {
        debug!("Reading table schemas from {:?}", self.path);
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            CodegenError::CatalogError(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Self::parse(&json, dataset)
    }
}
