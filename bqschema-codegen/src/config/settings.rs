//! Configuration settings for bqschema-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::codegen::is_valid_identifier;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Google Cloud project that owns the dataset
    #[serde(default)]
    pub project_id: String,

    /// BigQuery dataset to introspect
    #[serde(default)]
    pub dataset: String,

    /// Path of the generated source file
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Read table schemas from this JSON file instead of the BigQuery API
    #[serde(default)]
    pub schema_file: Option<PathBuf>,

    /// OAuth2 access token; takes precedence over `keyfile`
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,

    /// Service-account key file; when neither this nor `access_token` is set,
    /// Application Default Credentials are used
    #[serde(default)]
    pub keyfile: Option<PathBuf>,

    /// BigQuery REST endpoint
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// HTTP timeout for API calls, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Module name declared in the generated header
    #[serde(default = "default_module_name")]
    pub module_name: String,

    /// Tables to include (comma-separated, or "*" for all)
    #[serde(default = "default_include_tables")]
    pub include_tables: String,

    /// Tables to exclude (comma-separated)
    #[serde(default = "default_exclude_tables")]
    pub exclude_tables: String,

    /// Dry run mode - print the document instead of writing it
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_output_file() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_FILE)
}
fn default_api_base_url() -> String {
    defaults::API_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    defaults::TIMEOUT_SECS
}
fn default_module_name() -> String {
    defaults::MODULE_NAME.to_string()
}
fn default_include_tables() -> String {
    defaults::INCLUDE_TABLES.to_string()
}
fn default_exclude_tables() -> String {
    defaults::EXCLUDE_TABLES.to_string()
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: String::new(),
            output_file: default_output_file(),
            schema_file: None,
            access_token: None,
            keyfile: None,
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            module_name: default_module_name(),
            include_tables: default_include_tables(),
            exclude_tables: default_exclude_tables(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Create a default config for the given project and dataset
    pub fn default_with_dataset(project_id: &str, dataset: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            dataset: dataset.to_string(),
            ..Default::default()
        }
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("bqschema-codegen").required(false));
        }

        // Override with environment variables (BQSCHEMA_PROJECT_ID, BQSCHEMA_DATASET, ...)
        builder = builder.add_source(Environment::with_prefix("BQSCHEMA").try_parsing(true));

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.dataset.is_empty() {
            return Err(CodegenError::ValidationError(
                "dataset is required (set --dataset or BIGQUERY_DATASET)".into(),
            ));
        }

        match &self.schema_file {
            Some(schema_file) => {
                if !schema_file.exists() {
                    return Err(CodegenError::ValidationError(format!(
                        "Schema file not found: {}",
                        schema_file.display()
                    )));
                }
            }
            None => {
                if self.project_id.is_empty() {
                    return Err(CodegenError::ValidationError(
                        "project_id is required (set --project or GCLOUD_PROJECT_ID)".into(),
                    ));
                }
                if let Some(keyfile) = &self.keyfile {
                    if !keyfile.exists() {
                        return Err(CodegenError::ValidationError(format!(
                            "Key file not found: {}",
                            keyfile.display()
                        )));
                    }
                }
                if self.api_base_url.is_empty() {
                    return Err(CodegenError::ValidationError(
                        "api_base_url must not be empty".into(),
                    ));
                }
            }
        }

        if !is_valid_identifier(&self.module_name) {
            return Err(CodegenError::ValidationError(format!(
                "module_name `{}` is not a valid Rust identifier",
                self.module_name
            )));
        }

        if self.output_file.as_os_str().is_empty() && !self.dry_run {
            return Err(CodegenError::ValidationError(
                "output_file is required".into(),
            ));
        }

        Ok(())
    }

    /// Command line that reproduces this run, for the generated header
    pub fn regenerate_command(&self) -> String {
        let mut args = vec![defaults::PROGRAM_NAME.to_string()];
        match &self.schema_file {
            Some(schema_file) => {
                args.push("--schema-file".into());
                args.push(shell_quote(&schema_file.display().to_string()));
            }
            None => {
                args.push("--project".into());
                args.push(shell_quote(&self.project_id));
            }
        }
        args.push("--dataset".into());
        args.push(shell_quote(&self.dataset));
        if self.module_name != defaults::MODULE_NAME {
            args.push("--module-name".into());
            args.push(shell_quote(&self.module_name));
        }
        args.push("--output".into());
        args.push(shell_quote(&self.output_file.display().to_string()));
        args.join(" ")
    }
}

fn shell_quote(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:".contains(c))
    {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
