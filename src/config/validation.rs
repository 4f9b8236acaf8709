use crate::config::types::{
    Config, CrawlConfig, CrawlerConfig, OutputConfig, ScopeConfig, SummarizerConfig,
    UserAgentConfig,
};
use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Upper bound on concurrent fetches
const MAX_CONCURRENT_FETCHES: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_scope_config(&config.scope)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_summarizer_config(&config.summarizer)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the settings of one crawl before anything is dispatched
pub fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 and delay >= 0 always hold for the unsigned types
    validate_concurrency(config.max_concurrent_fetches)?;

    if config.crawl_timeout == Some(Duration::ZERO) {
        return Err(ConfigError::Validation(
            "crawl timeout must be greater than zero".to_string(),
        ));
    }

    for pattern in config.scope.patterns() {
        validate_domain_pattern(pattern)?;
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_concurrency(config.max_concurrent_fetches as usize)?;

    if config.fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch-timeout-secs must be greater than zero".to_string(),
        ));
    }

    if config.crawl_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "crawl-timeout-secs must be greater than zero".to_string(),
        ));
    }

    if config.dynamic && !cfg!(feature = "render") {
        return Err(ConfigError::Validation(
            "dynamic fetching requires building with the `render` feature".to_string(),
        ));
    }

    Ok(())
}

fn validate_concurrency(max_concurrent_fetches: usize) -> Result<(), ConfigError> {
    if !(1..=MAX_CONCURRENT_FETCHES).contains(&max_concurrent_fetches) {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES, max_concurrent_fetches
        )));
    }
    Ok(())
}

/// Validates scope configuration
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    for pattern in &config.allowed_domains {
        validate_domain_pattern(pattern)?;
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    Ok(())
}

/// Validates summarizer configuration
fn validate_summarizer_config(config: &SummarizerConfig) -> Result<(), ConfigError> {
    if config.chunk_size == 0 {
        return Err(ConfigError::Validation(
            "chunk-size must be greater than zero".to_string(),
        ));
    }

    if config.max_length == 0 {
        return Err(ConfigError::Validation(
            "max-length must be greater than zero".to_string(),
        ));
    }

    if config.min_length > config.max_length {
        return Err(ConfigError::Validation(format!(
            "min-length ({}) cannot exceed max-length ({})",
            config.min_length, config.max_length
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates a domain pattern (supports `*.` wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    let domain = pattern.strip_prefix("*.").unwrap_or(pattern);

    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain pattern '{}' is empty",
            pattern
        )));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    Ok(())
}
