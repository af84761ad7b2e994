//! Engine configuration.
//!
//! The host application constructs a `RegistryConfig` and hands it to
//! `RestClient` and `CacheManager`. Persistence of the configuration
//! itself is the host's concern.

use std::path::PathBuf;
use std::time::Duration;

/// Application name used for the default cache directory path
const APP_NAME: &str = "campuscache";

/// HTTP request timeout in seconds.
/// 30s allows for slow remote responses while failing fast enough that a
/// mutation settles on a status in reasonable time.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Base URL of the remote persistence service.
    pub base_url: String,
    /// Directory holding the collection snapshot files.
    pub cache_dir: PathBuf,
    pub request_timeout: Duration,
}

impl RegistryConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cache_dir: default_cache_dir(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_cache_dir(mut self, cache_dir: PathBuf) -> Self {
        self.cache_dir = cache_dir;
        self
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("./cache"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_override() {
        let config = RegistryConfig::new("https://registry.example.org/api")
            .with_cache_dir(PathBuf::from("/tmp/campuscache-test"));
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/campuscache-test"));
        assert_eq!(config.base_url, "https://registry.example.org/api");
    }
}
