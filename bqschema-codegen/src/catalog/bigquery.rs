//! BigQuery REST API catalog
//!
//! Lists tables with `tables.list` (following `nextPageToken`) and fetches
//! each table's schema with `tables.get`. Uses the blocking reqwest client;
//! every failure is returned as [`CodegenError::CatalogError`] and no request
//! is retried.

use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use super::credentials::AccessTokenProvider;
use super::metadata::TableSchema;
use super::resource::{TableListPage, TableReference, TableResource};
use super::TableCatalog;
use crate::error::{CodegenError, Result};

/// Default BigQuery REST endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Page size requested from `tables.list`
const LIST_PAGE_SIZE: &str = "1000";

/// Table catalog backed by the BigQuery REST API
pub struct BigQueryCatalog {
    client: Client,
    base_url: String,
    project_id: String,
    token: Box<dyn AccessTokenProvider>,
}

impl BigQueryCatalog {
    /// Create a catalog for `project_id` with a default HTTP client
    pub fn new(
        project_id: impl Into<String>,
        token: Box<dyn AccessTokenProvider>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("bqschema-codegen/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, project_id, token))
    }

    /// Create a catalog around an existing HTTP client
    pub fn with_client(
        client: Client,
        project_id: impl Into<String>,
        token: Box<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            client,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            project_id: project_id.into(),
            token,
        }
    }

    /// Point the catalog at another endpoint (emulators, tests)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            CodegenError::CatalogError(format!("Invalid API base URL {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                CodegenError::CatalogError(format!("Invalid API base URL {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
        token: &str,
    ) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .bearer_auth(token)
            .send()
            .map_err(|e| CodegenError::CatalogError(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CodegenError::CatalogError(format!(
                "GET {} returned {}: {}",
                url,
                status,
                body.trim()
            )));
        }

        response.json::<T>().map_err(|e| {
            CodegenError::CatalogError(format!("Failed to decode response from {}: {}", url, e))
        })
    }

    /// Enumerate table references of a dataset, following pagination
    fn list_table_references(&self, dataset: &str, token: &str) -> Result<Vec<TableReference>> {
        let url = self.endpoint(&[
            "projects",
            self.project_id.as_str(),
            "datasets",
            dataset,
            "tables",
        ])?;

        let mut references = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page: TableListPage = {
                let mut query = vec![("maxResults", LIST_PAGE_SIZE)];
                if let Some(page_token) = page_token.as_deref() {
                    query.push(("pageToken", page_token));
                }
                self.get_json(url.clone(), &query, token)?
            };
            references.extend(page.tables.into_iter().map(|t| t.table_reference));

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(references)
    }

    /// Fetch one table's metadata
    fn get_table(&self, reference: &TableReference, token: &str) -> Result<TableSchema> {
        let url = self.endpoint(&[
            "projects",
            reference.project_id.as_str(),
            "datasets",
            reference.dataset_id.as_str(),
            "tables",
            reference.table_id.as_str(),
        ])?;
        let resource: TableResource = self.get_json(url, &[], token)?;
        Ok(TableSchema::from(resource))
    }
}

impl TableCatalog for BigQueryCatalog {
    fn list_tables(&self, dataset: &str) -> Result<Vec<TableSchema>> {
        let token = self.token.access_token()?;

        let references = self.list_table_references(dataset, &token)?;
        info!(
            "Found {} tables in {}:{}",
            references.len(),
            self.project_id,
            dataset
        );

        references
            .iter()
            .map(|reference| self.get_table(reference, &token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticToken;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serve `connections` HTTP requests, answering each with `route(request_line)`.
    /// Returns the base URL and a handle yielding the request lines seen.
    fn serve<F>(connections: usize, route: F) -> (String, JoinHandle<Vec<String>>)
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/bigquery/v2", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            for stream in listener.incoming().take(connections) {
                let mut stream = stream.unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                let request = String::from_utf8_lossy(&request).to_string();
                let request_line = request.lines().next().unwrap_or_default().to_string();

                let (status, body) = route(&request_line);
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
                seen.push(request_line);
            }
            seen
        });

        (base_url, handle)
    }

    fn catalog(base_url: &str) -> BigQueryCatalog {
        let client = Client::builder().no_proxy().build().unwrap();
        BigQueryCatalog::with_client(client, "my-project", Box::new(StaticToken::new("t0k")))
            .base_url(base_url)
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let catalog = catalog("https://example.test/bigquery/v2/");
        let url = catalog
            .endpoint(&["projects", "p", "datasets", "d", "tables"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/bigquery/v2/projects/p/datasets/d/tables"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let catalog = catalog("not a url");
        assert!(matches!(
            catalog.endpoint(&["projects"]),
            Err(CodegenError::CatalogError(_))
        ));
    }

    #[test]
    fn test_list_tables_follows_pages() {
        let (base_url, handle) = serve(4, |line| {
            let body = if line.contains("pageToken=page2") {
                r#"{"tables": [{"tableReference": {"projectId": "my-project", "datasetId": "sales", "tableId": "events"}}]}"#
            } else if line.contains("/tables?") {
                r#"{"tables": [{"tableReference": {"projectId": "my-project", "datasetId": "sales", "tableId": "orders"}}], "nextPageToken": "page2"}"#
            } else if line.contains("/tables/orders") {
                r#"{"id": "my-project:sales.orders", "tableReference": {"projectId": "my-project", "datasetId": "sales", "tableId": "orders"}, "schema": {"fields": [{"name": "id", "type": "INTEGER"}]}}"#
            } else {
                r#"{"tableReference": {"projectId": "my-project", "datasetId": "sales", "tableId": "events"}, "schema": {"fields": [{"name": "ts", "type": "TIMESTAMP"}]}}"#
            };
            (200, body.to_string())
        });

        let tables = catalog(&base_url).list_tables("sales").unwrap();
        let seen = handle.join().unwrap();

        let ids: Vec<&str> = tables.iter().map(|t| t.table_id.as_str()).collect();
        assert_eq!(ids, vec!["orders", "events"]);
        assert_eq!(tables[0].full_id, "my-project:sales.orders");
        assert_eq!(tables[1].full_id, "my-project:sales.events");
        assert_eq!(seen.len(), 4);
        assert!(seen[0].starts_with("GET /bigquery/v2/projects/my-project/datasets/sales/tables?"));
    }

    #[test]
    fn test_empty_dataset_is_ok() {
        let (base_url, handle) = serve(1, |_| (200, r#"{"kind": "bigquery#tableList"}"#.to_string()));

        let tables = catalog(&base_url).list_tables("empty").unwrap();
        handle.join().unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_http_error_is_catalog_error() {
        let (base_url, handle) = serve(1, |_| {
            (404, r#"{"error": {"message": "Not found: Dataset"}}"#.to_string())
        });

        let err = catalog(&base_url).list_tables("missing").unwrap_err();
        handle.join().unwrap();
        match err {
            CodegenError::CatalogError(message) => {
                assert!(message.contains("404"));
                assert!(message.contains("Not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
