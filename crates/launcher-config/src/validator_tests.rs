use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_empty_storage_path() {
    let mut config = Config::default();
    config.storage.path = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "storage.path"));
}

#[test]
fn test_validate_tiny_quota() {
    let mut config = Config::default();
    config.storage.item_quota_bytes = Some(10);

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "storage.item_quota_bytes"));
}

#[test]
fn test_validate_invalid_port() {
    let mut config = Config::default();
    config.browser.debug_port = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "browser.debug_port"));
}

#[test]
fn test_validate_remote_host_warning() {
    let mut config = Config::default();
    config.browser.host = "10.0.0.5".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "browser.host"));
}

#[test]
fn test_validate_invalid_page_url() {
    let mut config = Config::default();
    config.launcher.page_url = "not a url".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "launcher.page_url"));
}

#[test]
fn test_validate_page_url_with_query_warning() {
    let mut config = Config::default();
    config.launcher.page_url = "http://127.0.0.1:7878/launcher.html?mode=current".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "launcher.page_url"));
}

#[test]
fn test_validate_log_level() {
    let mut config = Config::default();
    config.logging.level = "loud".to_string();
    let result = ConfigValidator::validate(&config);
    assert!(result.warnings.iter().any(|w| w.path == "logging.level"));

    config.logging.level = "launcher_core=debug".to_string();
    let result = ConfigValidator::validate(&config);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_zero_max_files() {
    let mut config = Config::default();
    config.logging.max_files = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "logging.max_files"));
}

#[test]
fn test_into_result_rejects_errors() {
    let mut config = Config::default();
    config.browser.debug_port = 0;
    config.browser.host = "10.0.0.5".to_string();

    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    let ConfigError::Rejected(errors) = err else {
        panic!("expected rejection, got {:?}", err);
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "browser.debug_port: Port cannot be 0");
}

#[test]
fn test_into_result_passes_warnings_through() {
    let mut config = Config::default();
    config.logging.level = "loud".to_string();

    let warnings = ConfigValidator::validate(&config).into_result().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].path, "logging.level");
}
