use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Bounds for the one-shot migrate-to-kobo tool: how long to wait for a
/// connection, and how long the whole back-fill may run before it is aborted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u64,
}

fn default_max_wait_secs() -> u64 {
    10
}

fn default_max_duration_secs() -> u64 {
    60
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            max_wait_secs: default_max_wait_secs(),
            max_duration_secs: default_max_duration_secs(),
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str)
                    .map_err(|e| format!("Failed to parse config file: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // No config file: build from environment variables and defaults.
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // The database URL has no sensible default
                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and no config.toml was found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 3000u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    migration: MigrationConfig {
                        max_wait_secs: get_env_parse(
                            "MIGRATION_MAX_WAIT_SECS",
                            default_max_wait_secs(),
                        ),
                        max_duration_secs: get_env_parse(
                            "MIGRATION_MAX_DURATION_SECS",
                            default_max_duration_secs(),
                        ),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Environment variables override the file when both are present.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("MIGRATION_MAX_WAIT_SECS")
            && let Ok(n) = v.parse()
        {
            config.migration.max_wait_secs = n;
        }
        if let Ok(v) = env::var("MIGRATION_MAX_DURATION_SECS")
            && let Ok(n) = v.parse()
        {
            config.migration.max_duration_secs = n;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [database]
            url = "postgres://localhost/ledger"
            max_connections = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.migration.max_wait_secs, 10);
        assert_eq!(config.migration.max_duration_secs, 60);
    }

    #[test]
    fn test_migration_section_overrides() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [database]
            url = "postgres://localhost/ledger"
            max_connections = 5

            [migration]
            max_wait_secs = 2
            max_duration_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.migration.max_wait_secs, 2);
        assert_eq!(config.migration.max_duration_secs, 30);
    }
}
