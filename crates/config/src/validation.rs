//! Configuration validation

use crate::{AppConfig, ConfigError, Result};
use std::collections::HashSet;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the entire application configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if let Err(e) = validate_log_level(&config.telemetry.log_level) {
        errors.push(e);
    }

    if config.orchestrator.default_timeout_ms == 0 {
        errors.push(ValidationIssue::new(
            "orchestrator.default_timeout_ms",
            "must be greater than 0",
        ));
    }

    for (marketplace_id, timeout_ms) in &config.orchestrator.marketplace_timeouts_ms {
        if *timeout_ms == 0 {
            errors.push(ValidationIssue::new(
                format!("orchestrator.marketplace_timeouts_ms.{marketplace_id}"),
                "must be greater than 0",
            ));
        }
    }

    if config.orchestrator.max_batch_size == 0 {
        errors.push(ValidationIssue::new(
            "orchestrator.max_batch_size",
            "must be greater than 0",
        ));
    }

    // Validate catalog entries
    let mut seen_ids = HashSet::new();
    for (idx, entry) in config.catalog.iter().enumerate() {
        if entry.id.is_empty() {
            errors.push(ValidationIssue::new(
                format!("catalog[{idx}].id"),
                "marketplace ID is required",
            ));
        }

        if entry.name.is_empty() {
            errors.push(ValidationIssue::new(
                format!("catalog[{idx}].name"),
                "marketplace name is required",
            ));
        }

        if entry.tier == 0 {
            errors.push(ValidationIssue::new(
                format!("catalog[{idx}].tier"),
                "tier numbering starts at 1",
            ));
        }

        if !seen_ids.insert(entry.id.as_str()) {
            errors.push(ValidationIssue::new(
                format!("catalog[{idx}].id"),
                format!("duplicate marketplace ID '{}'", entry.id),
            ));
        }
    }

    // Timeout overrides must point at configured marketplaces, when a
    // custom catalog is given at all.
    if !config.catalog.is_empty() {
        for marketplace_id in config.orchestrator.marketplace_timeouts_ms.keys() {
            if !seen_ids.contains(marketplace_id.as_str()) {
                errors.push(ValidationIssue::new(
                    format!("orchestrator.marketplace_timeouts_ms.{marketplace_id}"),
                    "marketplace not present in catalog",
                ));
            }
        }
    }

    if !errors.is_empty() {
        let error_msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ConfigError::ValidationError(error_msg));
    }

    Ok(())
}

/// Validate log level
fn validate_log_level(level: &str) -> std::result::Result<(), ValidationIssue> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationIssue::new(
            "telemetry.log_level",
            format!(
                "invalid log level '{level}', must be one of: trace, debug, info, warn, error"
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigLoader;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn rejects_invalid_log_level() {
        let config = ConfigLoader::from_toml(
            r#"
            [telemetry]
            log_level = "loud"
        "#,
        )
        .unwrap();

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_zero_timeout_and_batch() {
        let config = ConfigLoader::from_toml(
            r#"
            [orchestrator]
            default_timeout_ms = 0
            max_batch_size = 0
        "#,
        )
        .unwrap();

        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("default_timeout_ms"));
        assert!(err.contains("max_batch_size"));
    }

    #[test]
    fn rejects_duplicate_catalog_ids() {
        let config = ConfigLoader::from_toml(
            r#"
            [[catalog]]
            id = "ebay"
            name = "eBay"
            tier = 1
            integration_mode = "api_auto_publish"
            requires_credentials = true

            [[catalog]]
            id = "ebay"
            name = "eBay again"
            tier = 2
            integration_mode = "manual_copy_paste"
            requires_credentials = false
        "#,
        )
        .unwrap();

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_timeout_override_for_unknown_marketplace() {
        let config = ConfigLoader::from_toml(
            r#"
            [orchestrator.marketplace_timeouts_ms]
            nosuch = 5000

            [[catalog]]
            id = "ebay"
            name = "eBay"
            tier = 1
            integration_mode = "api_auto_publish"
            requires_credentials = true
        "#,
        )
        .unwrap();

        assert!(validate_config(&config).is_err());
    }
}
