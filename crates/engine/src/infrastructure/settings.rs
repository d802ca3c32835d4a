//! Engine settings loaded from the environment.
//!
//! `.env.local` and `.env` at the repository root are loaded first (see
//! `main.rs`); real environment variables win over both.

use std::time::Duration;

use crate::infrastructure::firestore::{
    FirestoreConfig, DEFAULT_COLLECTION, DEFAULT_FIRESTORE_BASE_URL, DEFAULT_FIRESTORE_DATABASE,
    DEFAULT_TIMEOUT,
};

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{variable} has invalid value {value:?}: {reason}")]
    Invalid {
        variable: &'static str,
        value: String,
        reason: String,
    },
    #[error("{variable} is required when {requirement}")]
    Missing {
        variable: &'static str,
        requirement: &'static str,
    },
}

/// Which remote item store backs the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local map, lost on exit
    Memory,
    Firestore(FirestoreConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub server_host: String,
    pub server_port: u16,
    pub collection: String,
    pub backend: StoreBackend,
    /// `*` or a comma-separated origin list; `None` disables CORS
    pub cors_allowed_origins: Option<String>,
}

impl EngineSettings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_host = var("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());
        let port = var("SERVER_PORT")
            .map(|v| ("SERVER_PORT", v))
            .or_else(|| var("PORT").map(|v| ("PORT", v)));
        let server_port = match port {
            Some((variable, value)) => value.parse::<u16>().map_err(|e| SettingsError::Invalid {
                variable,
                reason: e.to_string(),
                value,
            })?,
            None => DEFAULT_SERVER_PORT,
        };
        let collection =
            var("INVENTORY_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        if collection.contains('/') {
            return Err(SettingsError::Invalid {
                variable: "INVENTORY_COLLECTION",
                value: collection,
                reason: "must be a single path segment".to_string(),
            });
        }

        let backend = match var("STORE_BACKEND").as_deref().unwrap_or("memory") {
            "memory" => StoreBackend::Memory,
            "firestore" => {
                let project_id = var("FIRESTORE_PROJECT_ID").ok_or(SettingsError::Missing {
                    variable: "FIRESTORE_PROJECT_ID",
                    requirement: "STORE_BACKEND=firestore",
                })?;
                let timeout = match var("FIRESTORE_TIMEOUT_SECS") {
                    Some(value) => value
                        .parse::<u64>()
                        .map(Duration::from_secs)
                        .map_err(|e| SettingsError::Invalid {
                            variable: "FIRESTORE_TIMEOUT_SECS",
                            reason: e.to_string(),
                            value,
                        })?,
                    None => DEFAULT_TIMEOUT,
                };
                StoreBackend::Firestore(FirestoreConfig {
                    base_url: var("FIRESTORE_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_FIRESTORE_BASE_URL.to_string()),
                    project_id,
                    database: var("FIRESTORE_DATABASE")
                        .unwrap_or_else(|| DEFAULT_FIRESTORE_DATABASE.to_string()),
                    collection: collection.clone(),
                    api_key: var("FIRESTORE_API_KEY"),
                    timeout,
                })
            }
            other => {
                return Err(SettingsError::Invalid {
                    variable: "STORE_BACKEND",
                    value: other.to_string(),
                    reason: "expected `memory` or `firestore`".to_string(),
                })
            }
        };

        Ok(Self {
            server_host,
            server_port,
            collection,
            backend,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        })
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<EngineSettings, SettingsError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_memory_backend() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.backend, StoreBackend::Memory);
        assert_eq!(s.collection, "inventory");
        assert_eq!(s.bind_address(), "0.0.0.0:3000");
        assert!(s.cors_allowed_origins.is_none());
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        assert_eq!(settings(&[("PORT", "8080")]).unwrap().server_port, 8080);
        assert_eq!(
            settings(&[("PORT", "8080"), ("SERVER_PORT", "9000")])
                .unwrap()
                .server_port,
            9000
        );
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = settings(&[("SERVER_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { variable: "SERVER_PORT", .. }));
    }

    #[test]
    fn firestore_requires_project() {
        let err = settings(&[("STORE_BACKEND", "firestore")]).unwrap_err();
        assert!(matches!(err, SettingsError::Missing { variable: "FIRESTORE_PROJECT_ID", .. }));
    }

    #[test]
    fn firestore_backend_reads_all_fields() {
        let s = settings(&[
            ("STORE_BACKEND", "firestore"),
            ("FIRESTORE_PROJECT_ID", "pantry-app"),
            ("FIRESTORE_API_KEY", "secret"),
            ("FIRESTORE_TIMEOUT_SECS", "5"),
            ("INVENTORY_COLLECTION", "pantry"),
        ])
        .unwrap();
        let StoreBackend::Firestore(config) = s.backend else {
            panic!("expected firestore backend");
        };
        assert_eq!(config.project_id, "pantry-app");
        assert_eq!(config.database, "(default)");
        assert_eq!(config.collection, "pantry");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = settings(&[("STORE_BACKEND", "redis")]).unwrap_err();
        assert!(err.to_string().contains("STORE_BACKEND"));
    }

    #[test]
    fn nested_collection_is_rejected() {
        assert!(settings(&[("INVENTORY_COLLECTION", "a/b")]).is_err());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let s = settings(&[("CORS_ALLOWED_ORIGINS", "  "), ("SERVER_HOST", "")]).unwrap();
        assert!(s.cors_allowed_origins.is_none());
        assert_eq!(s.server_host, "0.0.0.0");
    }
}
