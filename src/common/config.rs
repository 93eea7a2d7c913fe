use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "BANK_LEDGER_CONFIG";

/// What the engine does when a transfer's credit leg fails after the debit committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferFailurePolicy {
    /// Credit the amount back to the source, then return the credit leg's error.
    #[default]
    Compensate,
    /// Leave the debit in place and return `TransferPartiallyApplied`.
    Report,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Json,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub transfer_failure_policy: TransferFailurePolicy,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            transfer_failure_policy: TransferFailurePolicy::default(),
            log_filter: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl LedgerConfig {
    pub fn from_json(s: &str) -> Result<Self, AppError> {
        serde_json::from_str(s).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Loads `path` if given, else the file named by `BANK_LEDGER_CONFIG`, else defaults.
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        match path {
            Some(p) => Self::from_file(p),
            None => match std::env::var(CONFIG_ENV) {
                Ok(p) if !p.trim().is_empty() => Self::from_file(p.trim()),
                _ => Ok(Self::default()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = LedgerConfig::from_json(r#"{"transfer_failure_policy":"report"}"#).unwrap();
        assert_eq!(cfg.transfer_failure_policy, TransferFailurePolicy::Report);
        assert_eq!(cfg.log_filter, "info");
        assert_eq!(cfg.log_format, LogFormat::Json);

        assert_eq!(LedgerConfig::from_json("{}").unwrap(), LedgerConfig::default());
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = LedgerConfig::from_json(r#"{"transfer_failure_policy":"ignore"}"#).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = LedgerConfig::load(Some("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("not/here.json")));
    }
}
