use crate::config::types::{Config, FetchConfig, SourceConfig, StoreConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_store_config(&config.store)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates the index page source configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.index_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid index-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "index-url must use HTTP or HTTPS scheme, got: {}",
            url.scheme()
        )));
    }

    if config.page_cache_path.is_empty() {
        return Err(ConfigError::Validation(
            "page-cache-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the store layout configuration
fn validate_store_config(config: &StoreConfig) -> Result<(), ConfigError> {
    if config.root_dir.is_empty() {
        return Err(ConfigError::Validation(
            "root-dir cannot be empty".to_string(),
        ));
    }

    validate_extension(&config.target_extension)
}

/// Validates a target extension string
///
/// The extension must carry a leading dot, must be lowercase (canonical
/// names are lowercased and the scanner matches case-sensitively), and must
/// contain only alphanumeric characters after the dot.
fn validate_extension(extension: &str) -> Result<(), ConfigError> {
    let Some(suffix) = extension.strip_prefix('.') else {
        return Err(ConfigError::Validation(format!(
            "target-extension must start with '.', got '{}'",
            extension
        )));
    };

    if suffix.is_empty() {
        return Err(ConfigError::Validation(
            "target-extension cannot be a bare dot".to_string(),
        ));
    }

    if !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "target-extension must be alphanumeric after the dot, got '{}'",
            extension
        )));
    }

    if suffix.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ConfigError::Validation(format!(
            "target-extension must be lowercase, got '{}'",
            extension
        )));
    }

    Ok(())
}

/// Validates download behavior configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_downloads < 1 || config.max_concurrent_downloads > 64 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-downloads must be between 1 and 64, got {}",
            config.max_concurrent_downloads
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension(".pdf").is_ok());
        assert!(validate_extension(".epub").is_ok());

        assert!(validate_extension("pdf").is_err());
        assert!(validate_extension(".").is_err());
        assert!(validate_extension("").is_err());
        assert!(validate_extension(".PDF").is_err());
        assert!(validate_extension(".p df").is_err());
        assert!(validate_extension(".tar.gz").is_err());
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_reject_bad_index_url() {
        let mut config = Config::default();
        config.source.index_url = "not a url".to_string();
        assert!(validate(&config).is_err());

        config.source.index_url = "ftp://example.com/files/".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_reject_empty_store_dir() {
        let mut config = Config::default();
        config.store.root_dir = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_reject_concurrency_out_of_bounds() {
        let mut config = Config::default();
        config.fetch.max_concurrent_downloads = 0;
        assert!(validate(&config).is_err());

        config.fetch.max_concurrent_downloads = 65;
        assert!(validate(&config).is_err());
    }
}
