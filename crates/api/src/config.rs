use giftigo_logo::DEFAULT_API_URL;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// How `main` renders log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Credentials for the brand logo search provider.
#[derive(Debug, Clone)]
pub struct BrandLogoConfig {
    pub api_url: String,
    pub api_key: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
    /// PostgreSQL URL. `None` runs on the in-memory store.
    pub database_url: Option<String>,
    /// `None` when `BRAND_LOGO_API_KEY` is unset.
    pub brand_logo: Option<BrandLogoConfig>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `HOST`                 | `0.0.0.0`                   |
    /// | `PORT`                 | `3000`                      |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `LOG_FORMAT`           | `pretty`                    |
    /// | `DATABASE_URL`         | unset (in-memory store)     |
    /// | `BRAND_LOGO_API_KEY`   | unset (logo search off)     |
    /// | `BRAND_LOGO_API_URL`   | `https://api.brandfetch.io` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                expected: "a valid u16",
                value: raw,
            })?,
            None => 3000,
        };

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                expected: "a valid u64",
                value: raw,
            })?,
            None => 30,
        };

        let log_format = match var("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    expected: "'pretty' or 'json'",
                    value: other.to_string(),
                })
            }
        };

        let brand_logo = var("BRAND_LOGO_API_KEY").map(|api_key| BrandLogoConfig {
            api_url: var("BRAND_LOGO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            api_key,
        });

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            log_format,
            database_url: var("DATABASE_URL"),
            brand_logo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let c = config(&[]).unwrap();
        assert_eq!(c.host, "0.0.0.0");
        assert_eq!(c.port, 3000);
        assert_eq!(c.cors_origins, vec!["http://localhost:5173".to_string()]);
        assert_eq!(c.request_timeout_secs, 30);
        assert_eq!(c.log_format, LogFormat::Pretty);
        assert!(c.database_url.is_none());
        assert!(c.brand_logo.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let c = config(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("LOG_FORMAT", "json"),
            ("DATABASE_URL", "postgres://localhost/giftigo"),
            ("BRAND_LOGO_API_KEY", "secret"),
        ])
        .unwrap();
        assert_eq!(c.port, 8080);
        assert_eq!(c.cors_origins.len(), 2);
        assert_eq!(c.log_format, LogFormat::Json);
        assert_eq!(c.database_url.as_deref(), Some("postgres://localhost/giftigo"));
        let logo = c.brand_logo.unwrap();
        assert_eq!(logo.api_key, "secret");
        assert_eq!(logo.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let c = config(&[("DATABASE_URL", "  "), ("BRAND_LOGO_API_KEY", "")]).unwrap();
        assert!(c.database_url.is_none());
        assert!(c.brand_logo.is_none());
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert_matches!(
            config(&[("PORT", "http")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
        assert_matches!(
            config(&[("LOG_FORMAT", "xml")]),
            Err(ConfigError::Invalid { var: "LOG_FORMAT", .. })
        );
    }
}
