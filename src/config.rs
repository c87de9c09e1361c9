// Runtime configuration.
// Read from PAWDEX_* environment variables with defaults for everything but the API keys.

use std::path::PathBuf;

use crate::error::{PawError, Result};
use crate::paths;
use crate::repository::RepositoryOptions;
use crate::store::RefreshPolicy;

pub const DEFAULT_CAT_API_URL: &str = "https://api.thecatapi.com/v1";
pub const DEFAULT_DOG_API_URL: &str = "https://api.thedogapi.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub cat_api_key: String,
    pub dog_api_key: String,
    pub cat_api_url: String,
    pub dog_api_url: String,
    pub page_size: u32,
    pub image_limit: u32,
    pub refresh_policy: RefreshPolicy,
    pub data_dir: PathBuf,
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(PawError::MissingApiKey(name));

        let (data_dir, config_dir, cache_dir) = match var("PAWDEX_DATA_DIR") {
            Some(dir) => {
                let dir = PathBuf::from(dir);
                (dir.clone(), dir.clone(), dir)
            }
            None => (
                paths::data_dir().ok_or_else(no_home)?,
                paths::config_dir().ok_or_else(no_home)?,
                paths::cache_dir().ok_or_else(no_home)?,
            ),
        };

        Ok(Self {
            cat_api_key: required("PAWDEX_CAT_API_KEY")?,
            dog_api_key: required("PAWDEX_DOG_API_KEY")?,
            cat_api_url: var("PAWDEX_CAT_API_URL").unwrap_or_else(|| DEFAULT_CAT_API_URL.to_string()),
            dog_api_url: var("PAWDEX_DOG_API_URL").unwrap_or_else(|| DEFAULT_DOG_API_URL.to_string()),
            page_size: parse_number("PAWDEX_PAGE_SIZE", var("PAWDEX_PAGE_SIZE"), 20)?,
            image_limit: parse_number("PAWDEX_IMAGE_LIMIT", var("PAWDEX_IMAGE_LIMIT"), 5)?,
            refresh_policy: match var("PAWDEX_REFRESH_POLICY") {
                Some(policy) => policy.parse()?,
                None => RefreshPolicy::default(),
            },
            data_dir,
            config_dir,
            cache_dir,
        })
    }

    pub fn repository_options(&self) -> RepositoryOptions {
        RepositoryOptions {
            page_size: self.page_size,
            image_limit: self.image_limit,
            policy: self.refresh_policy,
        }
    }

    pub fn database_path(&self) -> PathBuf {
        paths::database_path(&self.data_dir)
    }

    pub fn prefs_path(&self) -> PathBuf {
        paths::prefs_path(&self.config_dir)
    }

    pub fn log_path(&self) -> PathBuf {
        paths::log_path(&self.cache_dir)
    }
}

fn no_home() -> PawError {
    PawError::Config("cannot determine a home directory; set PAWDEX_DATA_DIR".to_string())
}

fn parse_number(name: &str, value: Option<String>, default: u32) -> Result<u32> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(0) | Err(_) => Err(PawError::Config(format!(
                "{} must be a positive integer, got {:?}",
                name, raw
            ))),
            Ok(n) => Ok(n),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    const KEYS: [(&str, &str); 3] = [
        ("PAWDEX_CAT_API_KEY", "cat"),
        ("PAWDEX_DOG_API_KEY", "dog"),
        ("PAWDEX_DATA_DIR", "/tmp/pawdex"),
    ];

    #[test]
    fn test_defaults() {
        let config = config_from(&KEYS).unwrap();
        assert_eq!(config.cat_api_url, DEFAULT_CAT_API_URL);
        assert_eq!(config.dog_api_url, DEFAULT_DOG_API_URL);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.image_limit, 5);
        assert_eq!(config.refresh_policy, RefreshPolicy::KeepFavorites);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/pawdex/pawdex.db"));
        assert_eq!(config.prefs_path(), PathBuf::from("/tmp/pawdex/prefs.json"));
    }

    #[test]
    fn test_missing_key() {
        let err = config_from(&[("PAWDEX_CAT_API_KEY", "cat"), ("PAWDEX_DATA_DIR", "/tmp/p")])
            .unwrap_err();
        assert!(matches!(err, PawError::MissingApiKey("PAWDEX_DOG_API_KEY")));

        let err = config_from(&[
            ("PAWDEX_CAT_API_KEY", "  "),
            ("PAWDEX_DOG_API_KEY", "dog"),
            ("PAWDEX_DATA_DIR", "/tmp/p"),
        ])
        .unwrap_err();
        assert!(matches!(err, PawError::MissingApiKey("PAWDEX_CAT_API_KEY")));
    }

    #[test]
    fn test_overrides() {
        let mut vars = KEYS.to_vec();
        vars.extend([
            ("PAWDEX_PAGE_SIZE", "50"),
            ("PAWDEX_IMAGE_LIMIT", "2"),
            ("PAWDEX_REFRESH_POLICY", "replace"),
            ("PAWDEX_CAT_API_URL", "http://localhost:9000"),
        ]);

        let config = config_from(&vars).unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.image_limit, 2);
        assert_eq!(config.refresh_policy, RefreshPolicy::Replace);
        assert_eq!(config.cat_api_url, "http://localhost:9000");

        let options = config.repository_options();
        assert_eq!(options.page_size, 50);
        assert_eq!(options.policy, RefreshPolicy::Replace);
    }

    #[test]
    fn test_invalid_values() {
        for (name, value) in [
            ("PAWDEX_PAGE_SIZE", "0"),
            ("PAWDEX_PAGE_SIZE", "lots"),
            ("PAWDEX_REFRESH_POLICY", "merge"),
        ] {
            let mut vars = KEYS.to_vec();
            vars.push((name, value));
            assert!(matches!(config_from(&vars), Err(PawError::Config(_))), "{}={}", name, value);
        }
    }
}
