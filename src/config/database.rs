use crate::core::{AppError, Result};
use crate::db::{Database, LibsqlClient};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default path of the file-backed database
pub const DEFAULT_DATABASE_PATH: &str = "./local.db";

/// Storage location, resolved once at start-up
#[derive(Clone, PartialEq)]
pub enum DatabaseConfig {
    /// File-backed SQLite database
    Local { path: String, max_connections: u32 },
    /// Hosted libSQL database reached over HTTP
    Remote { url: String, auth_token: String },
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseConfig::Local {
                path,
                max_connections,
            } => f
                .debug_struct("Local")
                .field("path", path)
                .field("max_connections", max_connections)
                .finish(),
            DatabaseConfig::Remote { url, .. } => f
                .debug_struct("Remote")
                .field("url", url)
                .field("auth_token", &"<redacted>")
                .finish(),
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid DATABASE_MAX_CONNECTIONS".to_string()))?;

        Ok(Self::resolve(
            env::var("TURSO_DATABASE_URL").ok(),
            env::var("TURSO_AUTH_TOKEN").ok(),
            env::var("DATABASE_PATH").ok(),
            max_connections,
        ))
    }

    /// Pick the remote store only when both credentials are present and non-empty
    pub fn resolve(
        remote_url: Option<String>,
        auth_token: Option<String>,
        local_path: Option<String>,
        max_connections: u32,
    ) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        match (non_empty(remote_url), non_empty(auth_token)) {
            (Some(url), Some(auth_token)) => DatabaseConfig::Remote { url, auth_token },
            _ => DatabaseConfig::Local {
                path: non_empty(local_path).unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
                max_connections,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let DatabaseConfig::Local {
            max_connections: 0, ..
        } = self
        {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Short description for logs; never includes the auth token
    pub fn describe(&self) -> String {
        match self {
            DatabaseConfig::Local { path, .. } => format!("local sqlite at {}", path),
            DatabaseConfig::Remote { url, .. } => format!("remote libsql at {}", url),
        }
    }

    /// Open the storage handle
    pub async fn connect(&self) -> Result<Database> {
        match self {
            DatabaseConfig::Local {
                path,
                max_connections,
            } => {
                let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", path))?
                    .create_if_missing(true)
                    .foreign_keys(true);

                let pool = SqlitePoolOptions::new()
                    .max_connections(*max_connections)
                    .acquire_timeout(Duration::from_secs(30))
                    .idle_timeout(Duration::from_secs(600)) // 10 minutes
                    .max_lifetime(Duration::from_secs(1800)) // 30 minutes
                    .connect_with(options)
                    .await?;

                Ok(Database::Sqlite(pool))
            }
            DatabaseConfig::Remote { url, auth_token } => {
                Ok(Database::Remote(LibsqlClient::new(url, auth_token.clone())?))
            }
        }
    }
}
