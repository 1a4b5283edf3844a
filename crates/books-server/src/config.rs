use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use books_core::{ClientConfig, ScraperConfig};

/// Service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub scraper: ScraperConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to
    /// defaults for anything unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ScraperConfig::default();
        let client_defaults = ClientConfig::default();

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let full_scrape_budget = match lookup("BOOKS_FULL_BUDGET") {
            Some(v) => v.parse().context("BOOKS_FULL_BUDGET must be a valid number")?,
            None => defaults.full_scrape_budget,
        };
        let polite_delay_ms = match lookup("BOOKS_DELAY_MS") {
            Some(v) => v.parse().context("BOOKS_DELAY_MS must be a valid number")?,
            None => client_defaults.polite_delay_ms,
        };
        let timeout_secs = match lookup("BOOKS_TIMEOUT_SECS") {
            Some(v) => v.parse().context("BOOKS_TIMEOUT_SECS must be a valid number")?,
            None => client_defaults.timeout_secs,
        };

        Ok(Self {
            port,
            scraper: ScraperConfig {
                root_url: lookup("BOOKS_ROOT_URL").unwrap_or(defaults.root_url),
                output_path: lookup("BOOKS_OUTPUT_PATH")
                    .map(Into::into)
                    .unwrap_or(defaults.output_path),
                full_scrape_budget,
                client: ClientConfig {
                    user_agent: client_defaults.user_agent,
                    timeout_secs,
                    polite_delay_ms,
                },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.scraper.root_url, "https://books.toscrape.com/");
        assert_eq!(config.scraper.output_path, PathBuf::from("BooksData.json"));
        assert_eq!(config.scraper.full_scrape_budget, 1000);
        assert_eq!(config.scraper.client.polite_delay_ms, 1500);
        assert_eq!(config.scraper.client.timeout_secs, 30);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "3000"),
            ("BOOKS_ROOT_URL", "http://localhost:9000/"),
            ("BOOKS_OUTPUT_PATH", "/tmp/out.json"),
            ("BOOKS_FULL_BUDGET", "2000"),
            ("BOOKS_DELAY_MS", "0"),
            ("BOOKS_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.scraper.root_url, "http://localhost:9000/");
        assert_eq!(config.scraper.output_path, PathBuf::from("/tmp/out.json"));
        assert_eq!(config.scraper.full_scrape_budget, 2000);
        assert_eq!(config.scraper.client.polite_delay_ms, 0);
        assert_eq!(config.scraper.client.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_number() {
        let result = Config::from_lookup(lookup_from(&[("BOOKS_FULL_BUDGET", "lots")]));
        assert!(result.is_err());
    }
}
