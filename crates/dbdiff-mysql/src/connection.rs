//! Connection settings for a live MySQL database.

use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 3306;

/// Where and how to reach a MySQL server, and which database to read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MySqlConnection {
    /// Server host; `localhost` when absent.
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: Option<String>,
    /// The database whose schema is read.
    pub dbname: String,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

impl MySqlConnection {
    /// Creates settings for `dbname` on localhost.
    #[must_use]
    pub fn new(user: impl Into<String>, dbname: impl Into<String>) -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            user: user.into(),
            password: None,
            dbname: dbname.into(),
        }
    }

    /// Returns the host, defaulting to `localhost`.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or("localhost")
    }

    /// Human-readable description used in output headers.
    #[must_use]
    pub fn description(&self) -> String {
        format!("Database: {}@{}", self.dbname, self.host())
    }

    /// Builds the sqlx connect options.
    #[must_use]
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(self.host())
            .port(self.port)
            .username(&self.user)
            .database(&self.dbname);
        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}
