use std::str::FromStr;

/// Project README that `GET /` redirects to unless overridden.
pub const DEFAULT_README_URL: &str =
    "https://github.com/code-game-project/codegame-share/blob/main/README.md";

/// A configuration variable that is set but cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{var} has an invalid value '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// SQLite database URL.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Timeout for each call to a remote game server (default: `10`).
    pub remote_timeout_secs: u64,
    /// Target of the `GET /` redirect.
    pub readme_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                            |
    /// | `PORT`                 | `8080`                               |
    /// | `DATABASE_URL`         | `sqlite://database.sqlite?mode=rwc`  |
    /// | `CORS_ORIGINS`         | `*`                                  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                 |
    /// | `REMOTE_TIMEOUT_SECS`  | `10`                                 |
    /// | `README_URL`           | project README on GitHub             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let string = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());

        let cors_origins = string("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: string("HOST", "0.0.0.0"),
            port: parse(&lookup, "PORT", 8080)?,
            database_url: string("DATABASE_URL", "sqlite://database.sqlite?mode=rwc"),
            cors_origins,
            request_timeout_secs: parse(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            remote_timeout_secs: parse(&lookup, "REMOTE_TIMEOUT_SECS", 10)?,
            readme_url: string("README_URL", DEFAULT_README_URL),
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite://database.sqlite?mode=rwc");
        assert_eq!(config.cors_origins, vec!["*"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.remote_timeout_secs, 10);
        assert_eq!(config.readme_url, DEFAULT_README_URL);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = from_map(&[
            ("PORT", "9000"),
            ("CORS_ORIGINS", "https://a.example.com, https://b.example.com,"),
            ("REMOTE_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert_eq!(config.remote_timeout_secs, 3);
    }

    #[test]
    fn invalid_number_names_the_variable() {
        let err = from_map(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.var, "PORT");
        assert_eq!(err.to_string(), "PORT has an invalid value 'eighty'");
    }
}
