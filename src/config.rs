//! Configuration management for the contact submission core.
//!
//! This module handles loading and validating configuration from environment
//! variables. The embedding application owns the composition root; it loads a
//! `Config` once and constructs the clients and the form controller from it.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default Supabase table receiving contact/appointment rows.
pub const DEFAULT_CONTACT_TABLE: &str = "suri_contact_message_appointment";

/// Google's siteverify endpoint for reCAPTCHA v3.
pub const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Configuration for the contact submission core.
#[derive(Debug, Clone)]
pub struct Config {
    /// Supabase project base URL (the REST API lives under `/rest/v1`)
    pub supabase_url: String,

    /// Supabase anonymous key, sent as both `apikey` and bearer token
    pub supabase_anon_key: String,

    /// Table receiving submissions (default: `suri_contact_message_appointment`)
    pub contact_table: String,

    /// reCAPTCHA server-side secret. Confidential; never logged.
    pub recaptcha_secret_key: String,

    /// reCAPTCHA verification endpoint (overridable for tests)
    pub recaptcha_verify_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SUPABASE_URL`: Supabase project base URL
    /// - `SUPABASE_ANON_KEY`: Supabase anonymous key
    /// - `RECAPTCHA_SECRET_KEY`: reCAPTCHA server-side secret
    ///
    /// Optional environment variables:
    /// - `CONTACT_TABLE`: target table (default: `suri_contact_message_appointment`)
    /// - `RECAPTCHA_VERIFY_URL`: verification endpoint (default: Google siteverify)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present; don't fail if it doesn't exist.
        let _ = dotenvy::dotenv();

        let supabase_url =
            env::var("SUPABASE_URL").map_err(|_| ConfigError::MissingVar("SUPABASE_URL".to_string()))?;

        let supabase_anon_key = env::var("SUPABASE_ANON_KEY")
            .map_err(|_| ConfigError::MissingVar("SUPABASE_ANON_KEY".to_string()))?;

        let recaptcha_secret_key = env::var("RECAPTCHA_SECRET_KEY")
            .map_err(|_| ConfigError::MissingVar("RECAPTCHA_SECRET_KEY".to_string()))?;

        if !supabase_url.starts_with("http://") && !supabase_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "SUPABASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if supabase_anon_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "SUPABASE_ANON_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        if recaptcha_secret_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "RECAPTCHA_SECRET_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let contact_table =
            env::var("CONTACT_TABLE").unwrap_or_else(|_| DEFAULT_CONTACT_TABLE.to_string());

        if contact_table.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CONTACT_TABLE".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let recaptcha_verify_url =
            env::var("RECAPTCHA_VERIFY_URL").unwrap_or_else(|_| DEFAULT_VERIFY_URL.to_string());

        if !recaptcha_verify_url.starts_with("http://")
            && !recaptcha_verify_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                var: "RECAPTCHA_VERIFY_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            supabase_url,
            supabase_anon_key,
            contact_table,
            recaptcha_secret_key,
            recaptcha_verify_url,
            request_timeout,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            contact_table: DEFAULT_CONTACT_TABLE.to_string(),
            recaptcha_secret_key: String::new(),
            recaptcha_verify_url: DEFAULT_VERIFY_URL.to_string(),
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    fn clear_all() {
        for var in [
            "SUPABASE_URL",
            "SUPABASE_ANON_KEY",
            "CONTACT_TABLE",
            "RECAPTCHA_SECRET_KEY",
            "RECAPTCHA_VERIFY_URL",
            "REQUEST_TIMEOUT",
            "LOG_LEVEL",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.contact_table, DEFAULT_CONTACT_TABLE);
        assert_eq!(config.recaptcha_verify_url, DEFAULT_VERIFY_URL);
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.log_level, "error");
    }

    #[test]
    #[serial]
    fn test_config_from_env_missing_required() {
        clear_all();

        let result = Config::from_env();
        assert!(result.is_err());
        match result {
            Err(ConfigError::MissingVar(var)) => assert_eq!(var, "SUPABASE_URL"),
            other => panic!("Expected MissingVar error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        clear_all();
        let mut guard = EnvGuard::new();
        guard.set("SUPABASE_URL", "not-a-url");
        guard.set("SUPABASE_ANON_KEY", "anon-key");
        guard.set("RECAPTCHA_SECRET_KEY", "secret");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "SUPABASE_URL");
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_empty_secret() {
        clear_all();
        let mut guard = EnvGuard::new();
        guard.set("SUPABASE_URL", "https://example.supabase.co");
        guard.set("SUPABASE_ANON_KEY", "anon-key");
        guard.set("RECAPTCHA_SECRET_KEY", "   ");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "RECAPTCHA_SECRET_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        clear_all();
        let mut guard = EnvGuard::new();
        guard.set("SUPABASE_URL", "https://example.supabase.co");
        guard.set("SUPABASE_ANON_KEY", "anon-key-123");
        guard.set("RECAPTCHA_SECRET_KEY", "secret-456");
        guard.set("CONTACT_TABLE", "contact_rows_test");
        guard.set("REQUEST_TIMEOUT", "5");

        let result = Config::from_env();
        assert!(
            result.is_ok(),
            "Config should be valid with all required fields set: {:?}",
            result.err()
        );

        let config = result.unwrap();
        assert_eq!(config.supabase_url, "https://example.supabase.co");
        assert_eq!(config.supabase_anon_key, "anon-key-123");
        assert_eq!(config.recaptcha_secret_key, "secret-456");
        assert_eq!(config.contact_table, "contact_rows_test");
        assert_eq!(config.recaptcha_verify_url, DEFAULT_VERIFY_URL);
        assert_eq!(config.request_timeout, 5);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_TIMEOUT_U64", "42");

        let result = Config::parse_env_u64("TEST_TIMEOUT_U64", 10);
        assert_eq!(result.unwrap(), 42);

        let result = Config::parse_env_u64("NONEXISTENT_TIMEOUT", 10);
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_TIMEOUT_INVALID", "not-a-number");

        let result = Config::parse_env_u64("TEST_TIMEOUT_INVALID", 10);
        assert!(result.is_err());
    }
}
