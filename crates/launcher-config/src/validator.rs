//! Configuration validation.

use std::fmt;

use url::Url;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// `Err(ConfigError::Rejected)` when any error was found.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.is_valid() {
            Ok(self.warnings)
        } else {
            Err(ConfigError::Rejected(self.errors))
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Smallest item quota that still fits an empty origin zone.
const MIN_ITEM_QUOTA: usize = 64;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_storage(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_launcher(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_storage(config: &Config, result: &mut ValidationResult) {
        if config.storage.path.trim().is_empty() {
            result.add_error(ValidationError::new("storage.path", "Storage path cannot be empty"));
        }

        if let Some(quota) = config.storage.item_quota_bytes {
            if quota < MIN_ITEM_QUOTA {
                result.add_error(ValidationError::new(
                    "storage.item_quota_bytes",
                    format!("Item quota must be at least {} bytes", MIN_ITEM_QUOTA),
                ));
            }
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.host.is_empty() {
            result.add_error(ValidationError::new("browser.host", "Host cannot be empty"));
        }

        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new("browser.debug_port", "Port cannot be 0"));
        }

        if !matches!(config.browser.host.as_str(), "127.0.0.1" | "localhost" | "::1") {
            result.add_warning(ValidationWarning::new(
                "browser.host",
                "DevTools endpoint is not on the loopback interface",
            ));
        }
    }

    fn validate_launcher(config: &Config, result: &mut ValidationResult) {
        match Url::parse(&config.launcher.page_url) {
            Ok(url) => {
                if url.query().is_some() {
                    result.add_warning(ValidationWarning::new(
                        "launcher.page_url",
                        "Query parameters on the page URL are replaced by launch parameters",
                    ));
                }
            }
            Err(e) => {
                result.add_error(ValidationError::new(
                    "launcher.page_url",
                    format!("Invalid URL: {}", e),
                ));
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) && !level.contains('=') {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!("Unrecognized log level '{}'", config.logging.level),
            ));
        }

        if config.logging.max_files == 0 {
            result.add_error(ValidationError::new(
                "logging.max_files",
                "max_files must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
