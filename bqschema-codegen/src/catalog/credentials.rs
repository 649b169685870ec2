//! OAuth2 access tokens for the BigQuery REST API

use gcp_auth::{CustomServiceAccount, TokenProvider};
use std::path::Path;
use tracing::debug;

use crate::error::{CodegenError, Result};

/// Scope requested for every token
pub const BIGQUERY_SCOPES: &[&str] = &["https://www.googleapis.com/auth/bigquery.readonly"];

/// Supplies OAuth2 bearer tokens for API calls
pub trait AccessTokenProvider {
    fn access_token(&self) -> Result<String>;
}

/// A token fixed at construction time
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl AccessTokenProvider for StaticToken {
    fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

enum CredentialSource {
    KeyFile(CustomServiceAccount),
    ApplicationDefault,
}

/// Google credentials: a service-account key file, or Application Default
/// Credentials (`GOOGLE_APPLICATION_CREDENTIALS`, the gcloud user login, or
/// the metadata server).
pub struct GoogleCredentials {
    source: CredentialSource,
}

impl GoogleCredentials {
    /// Load a service-account key file. A missing or malformed file is a
    /// configuration error.
    pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading service account key from {:?}", path);
        let account = CustomServiceAccount::from_file(path).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Invalid service account key file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self {
            source: CredentialSource::KeyFile(account),
        })
    }

    /// Resolve credentials the way Google client libraries do, on first use
    pub fn application_default() -> Self {
        Self {
            source: CredentialSource::ApplicationDefault,
        }
    }
}

impl std::fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.source {
            CredentialSource::KeyFile(_) => f.write_str("GoogleCredentials(KeyFile)"),
            CredentialSource::ApplicationDefault => {
                f.write_str("GoogleCredentials(ApplicationDefault)")
            }
        }
    }
}

impl AccessTokenProvider for GoogleCredentials {
    fn access_token(&self) -> Result<String> {
        // gcp_auth is async; the rest of the crate is not
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                CodegenError::CatalogError(format!("Failed to start auth runtime: {}", e))
            })?;

        let token = runtime
            .block_on(async {
                match &self.source {
                    CredentialSource::KeyFile(account) => account.token(BIGQUERY_SCOPES).await,
                    CredentialSource::ApplicationDefault => match gcp_auth::provider().await {
                        Ok(provider) => provider.token(BIGQUERY_SCOPES).await,
                        Err(e) => Err(e),
                    },
                }
            })
            .map_err(|e| {
                CodegenError::CatalogError(format!("Failed to obtain access token: {}", e))
            })?;

        debug!("Obtained access token via {:?}", self);
        Ok(token.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token_is_redacted() {
        let token = StaticToken::new("secret");
        assert_eq!(token.access_token().unwrap(), "secret");
        assert_eq!(format!("{:?}", token), "StaticToken(***)");
    }

    #[test]
    fn test_missing_key_file_is_config_error() {
        let err = GoogleCredentials::from_key_file("/no/such/key.json").unwrap_err();
        match err {
            CodegenError::ConfigError(message) => assert!(message.contains("/no/such/key.json")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_key_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, r#"{"type": "service_account"}"#).unwrap();

        assert!(matches!(
            GoogleCredentials::from_key_file(&path),
            Err(CodegenError::ConfigError(_))
        ));
    }

    #[test]
    fn test_application_default_is_lazy() {
        let credentials = GoogleCredentials::application_default();
        assert_eq!(
            format!("{:?}", credentials),
            "GoogleCredentials(ApplicationDefault)"
        );
    }
}
