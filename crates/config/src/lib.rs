use dotenv::dotenv;
use dotenv::from_path;
use std::env;
use thiserror::Error;

pub const DEFAULT_API_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_PORT: u16 = 8080;
pub const DEFAULT_MINIMUM_AGE: u32 = 18;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to load .env file from path {path}: {reason}")]
    EnvFile { path: String, reason: String },

    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_host: String,
    pub api_port: u16,
    /// Youngest age, in whole years, a user may have.
    pub minimum_age: u32,
    pub cors_permissive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            api_port: DEFAULT_API_PORT,
            minimum_age: DEFAULT_MINIMUM_AGE,
            cors_permissive: true,
        }
    }
}

impl Config {
    /// Load configuration from a specified `.env` file path or default to the root `.env` file.
    pub fn from_env(env_path: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = env_path {
            from_path(path).map_err(|e| ConfigError::EnvFile {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        } else {
            // A missing root `.env` is fine; plain environment variables still apply
            dotenv().ok();
        }

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Config {
            api_host: lookup("API_HOST").unwrap_or(defaults.api_host),
            api_port: parse_or(&lookup, "API_PORT", defaults.api_port)?,
            minimum_age: parse_or(&lookup, "MINIMUM_AGE", defaults.minimum_age)?,
            cors_permissive: parse_or(&lookup, "CORS_PERMISSIVE", defaults.cors_permissive)?,
        })
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: format!("'{}' ({})", raw, e),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_address(), "0.0.0.0:8080");
        assert_eq!(config.minimum_age, 18);
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "3000"),
            ("MINIMUM_AGE", " 21 "),
            ("CORS_PERMISSIVE", "false"),
        ]))
        .unwrap();

        assert_eq!(config.api_address(), "127.0.0.1:3000");
        assert_eq!(config.minimum_age, 21);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn test_rejects_invalid_numbers() {
        let err = Config::from_lookup(lookup(&[("MINIMUM_AGE", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "MINIMUM_AGE", .. }));

        let err = Config::from_lookup(lookup(&[("API_PORT", "70000")])).unwrap_err();
        assert!(err.to_string().starts_with("Invalid API_PORT: '70000'"));
    }

    #[test]
    fn test_missing_env_file_is_reported() {
        let err = Config::from_env(Some("/nonexistent/user-registry.env")).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile { .. }));
    }
}
