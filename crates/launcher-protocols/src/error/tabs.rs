//! Tab host errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(String),

    #[error("Window not found: {0}")]
    WindowNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Browser unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = TabError::NotFound("tab-7".to_string());
        let display = err.to_string();
        assert!(display.contains("not found"));
        assert!(display.contains("tab-7"));
    }

    #[test]
    fn test_permission_denied_error() {
        let err = TabError::PermissionDenied("tabs".to_string());
        assert_eq!(err.to_string(), "Permission denied: tabs");
    }

    #[test]
    fn test_error_debug() {
        let err = TabError::Unavailable("closed".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("Unavailable"));
    }
}
