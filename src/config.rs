use std::{path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://api.thecatapi.com/v1";
pub const DEFAULT_LIMIT: u32 = 30;
pub const DEFAULT_STORAGE_PREFIX: &str = "cat-gallery";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub limit: u32,
    /// pause between the search response arriving and it being parsed
    pub parse_delay: Duration,
    /// pause between rendering and hiding the busy overlay
    pub settle_delay: Duration,
    pub storage_prefix: String,
    pub data_path: PathBuf,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            limit: DEFAULT_LIMIT,
            parse_delay: Duration::from_millis(1000),
            settle_delay: Duration::from_millis(750),
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            data_path: default_data_path(),
            output: PathBuf::from("cat-gallery.html"),
        }
    }
}

impl Config {
    pub fn categories_key(&self) -> String {
        format!("{}-categories", self.storage_prefix)
    }

    pub fn names_key(&self) -> String {
        format!("{}-names", self.storage_prefix)
    }

    pub fn without_delays(mut self) -> Self {
        self.parse_delay = Duration::ZERO;
        self.settle_delay = Duration::ZERO;
        self
    }
}

pub fn default_data_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("cat-gallery"))
        .unwrap_or_else(|| PathBuf::from("./.cat-gallery"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let config = Config::default();
        assert_eq!(config.categories_key(), "cat-gallery-categories");
        assert_eq!(config.names_key(), "cat-gallery-names");
        assert_eq!(config.limit, 30);
    }

    #[test]
    fn test_without_delays() {
        let config = Config::default().without_delays();
        assert!(config.parse_delay.is_zero());
        assert!(config.settle_delay.is_zero());
    }
}
