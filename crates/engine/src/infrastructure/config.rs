//! Engine configuration read from the environment.

/// Settings the binary needs to start. Every field has a default, so an empty
/// environment yields a working local setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:cardbattle.db?mode=rwc".into(),
            db_max_connections: 10,
            server_host: "0.0.0.0".into(),
            server_port: 8080,
        }
    }
}

impl EngineConfig {
    /// Read `DATABASE_URL`, `DB_MAX_CONNECTIONS`, `SERVER_HOST` and
    /// `SERVER_PORT` (falling back to `PORT`). Unparseable numbers keep their
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.db_max_connections),
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: lookup("SERVER_PORT")
                .or_else(|| lookup("PORT"))
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
