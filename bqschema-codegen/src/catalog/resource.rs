//! BigQuery REST `Table` resource, as returned by `tables.get` and `bq show --format=json`

use serde::Deserialize;

use super::metadata::{ColumnSchema, FieldMode, FieldType, TableSchema};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TableResource {
    #[serde(default)]
    pub id: Option<String>,
    pub table_reference: TableReference,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Option<SchemaResource>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TableReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SchemaResource {
    #[serde(default)]
    pub fields: Vec<FieldResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FieldResource {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One page of `tables.list`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TableListPage {
    #[serde(default)]
    pub tables: Vec<TableListEntry>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TableListEntry {
    pub table_reference: TableReference,
}

impl TableReference {
    /// `project:dataset.table`, the form BigQuery uses for `Table.id`
    pub fn full_id(&self) -> String {
        format!("{}:{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}

impl From<TableResource> for TableSchema {
    fn from(resource: TableResource) -> Self {
        let full_id = resource
            .id
            .unwrap_or_else(|| resource.table_reference.full_id());
        let columns = resource
            .schema
            .unwrap_or_default()
            .fields
            .into_iter()
            .map(|field| ColumnSchema {
                field_type: FieldType::parse(&field.field_type),
                mode: FieldMode::parse(field.mode.as_deref()),
                description: field.description,
                name: field.name,
            })
            .collect();

        TableSchema {
            table_id: resource.table_reference.table_id,
            description: resource.description.unwrap_or_default(),
            full_id,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_resource_to_schema() {
        let json = r#"{
            "kind": "bigquery#table",
            "id": "my-project:sales.orders",
            "tableReference": {
                "projectId": "my-project",
                "datasetId": "sales",
                "tableId": "orders"
            },
            "description": "All orders",
            "schema": {
                "fields": [
                    {"name": "id", "type": "INTEGER", "mode": "REQUIRED"},
                    {"name": "total", "type": "FLOAT", "description": "gross"}
                ]
            }
        }"#;

        let resource: TableResource = serde_json::from_str(json).unwrap();
        let table = TableSchema::from(resource);
        assert_eq!(table.table_id, "orders");
        assert_eq!(table.full_id, "my-project:sales.orders");
        assert_eq!(table.description, "All orders");
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0].mode, FieldMode::Required);
        assert_eq!(table.columns[1].field_type, FieldType::Float);
        assert_eq!(table.columns[1].description.as_deref(), Some("gross"));
    }

    #[test]
    fn test_missing_id_and_schema() {
        let json = r#"{
            "tableReference": {"projectId": "p", "datasetId": "d", "tableId": "empty"}
        }"#;

        let resource: TableResource = serde_json::from_str(json).unwrap();
        let table = TableSchema::from(resource);
        assert_eq!(table.full_id, "p:d.empty");
        assert!(table.description.is_empty());
        assert!(table.columns.is_empty());
    }

    #[test]
    fn test_list_page_without_tables() {
        let page: TableListPage = serde_json::from_str(r#"{"kind": "bigquery#tableList"}"#).unwrap();
        assert!(page.tables.is_empty());
        assert!(page.next_page_token.is_none());
    }
}
