//! Default configuration values - single source of truth

/// Default output file
pub const OUTPUT_FILE: &str = "bqtableschema.generated.rs";

/// Default module name declared in the generated header
pub const MODULE_NAME: &str = "bqtableschema";

/// Default include tables pattern (all tables)
pub const INCLUDE_TABLES: &str = "*";

/// Default exclude tables pattern (none)
pub const EXCLUDE_TABLES: &str = "";

/// Default BigQuery REST endpoint
pub const API_BASE_URL: &str = crate::catalog::DEFAULT_API_BASE_URL;

/// Default HTTP timeout for BigQuery API calls, in seconds
pub const TIMEOUT_SECS: u64 = 30;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Name of the executable, used in the regeneration command
pub const PROGRAM_NAME: &str = "bqschema-codegen";
