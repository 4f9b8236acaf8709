use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use rufus::config::load_config;
///
/// let config = load_config(Path::new("rufus.toml")).unwrap();
/// println!("Max depth: {}", config.crawler.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// The hash is recorded in the crawl report so two reports can be traced
/// back to the same configuration.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&content)))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let config_content = r#"
[crawler]
max-depth = 3
delay-ms = 250
fetch-timeout-secs = 10
max-concurrent-fetches = 4
follow-irrelevant-links = false
crawl-timeout-secs = 60

[scope]
allowed-domains = ["example.com", "*.example.org"]
same-domain = true

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"

[summarizer]
chunk-size = 300
min-length = 20
max-length = 80

[output]
report-path = "out/report.json"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_depth, 3);
        assert_eq!(config.crawler.delay_ms, 250);
        assert_eq!(config.crawler.max_concurrent_fetches, 4);
        assert!(!config.crawler.follow_irrelevant_links);
        assert_eq!(config.crawler.crawl_timeout_secs, Some(60));
        assert_eq!(config.scope.allowed_domains.len(), 2);
        assert!(config.scope.same_domain);
        assert_eq!(
            config.user_agent.header_value(),
            "TestCrawler/1.0 (+https://example.com/about)"
        );
        assert_eq!(config.summarizer.chunk_size, 300);
        assert_eq!(config.output.report_path, "out/report.json");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("[crawler]\nmax-depth = 1\n").unwrap();

        assert_eq!(config.crawler.max_depth, 1);
        assert_eq!(config.crawler.delay_ms, 1000);
        assert_eq!(config.crawler.fetch_timeout_secs, 5);
        assert!(config.crawler.follow_irrelevant_links);
        assert_eq!(config.user_agent.crawler_name, "RufusBot");
        assert_eq!(config.summarizer.max_length, 150);
        assert_eq!(config.output.report_path, "report.json");
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.crawler.max_depth, 2);
        assert!(config.scope.allowed_domains.is_empty());
    }

    #[test]
    fn test_negative_depth_rejected() {
        let result = parse_config("[crawler]\nmax-depth = -1\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/rufus.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[crawler]\nmax-concurrent-fetches = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_config_hash() {
        let file1 = create_temp_config("[crawler]\nmax-depth = 1\n");
        let file2 = create_temp_config("[crawler]\nmax-depth = 2\n");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        assert_eq!(hash1, compute_config_hash(file1.path()).unwrap());
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, compute_config_hash(file2.path()).unwrap());

        let (config, hash) = load_config_with_hash(file1.path()).unwrap();
        assert_eq!(config.crawler.max_depth, 1);
        assert_eq!(hash, hash1);
    }
}
