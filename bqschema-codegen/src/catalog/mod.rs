//! Table catalogs: where table schemas come from

mod bigquery;
mod credentials;
mod json_file;
mod metadata;
pub(crate) mod resource;

pub use bigquery::*;
pub use credentials::*;
pub use json_file::*;
pub use metadata::*;

use crate::error::Result;

/// Lists the tables of a dataset together with their schemas.
///
/// An `Err` means the listing itself failed; an empty dataset is `Ok(vec![])`.
pub trait TableCatalog {
    /// Return every table of `dataset`, in enumeration order
    fn list_tables(&self, dataset: &str) -> Result<Vec<TableSchema>>;
}

/// In-memory catalog that returns its tables verbatim for any dataset
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tables: Vec<TableSchema>,
}

impl StaticCatalog {
    pub fn new(tables: Vec<TableSchema>) -> Self {
        Self { tables }
    }
}

impl TableCatalog for StaticCatalog {
    fn list_tables(&self, _dataset: &str) -> Result<Vec<TableSchema>> {
        Ok(self.tables.clone())
    }
}
