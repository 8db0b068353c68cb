//! Server settings read from the environment.

use std::env;
use std::path::PathBuf;

const DEFAULT_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "gradeplan.db";
const DEFAULT_DATABASE_NAME: &str = "app_db";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// SQLite path of the document store (`:memory:` is accepted)
    pub database_url: String,
    /// Whether `DATABASE_URL` was set explicitly
    pub database_url_set: bool,
    pub database_name: String,
    /// Optional JSON file with planner settings
    pub planner_config_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL").filter(|v| !v.is_empty());

        Self {
            address: lookup("GRADEPLAN_ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            port: lookup("GRADEPLAN_PORT")
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            database_url_set: database_url.is_some(),
            database_url: database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            database_name: lookup("DATABASE_NAME")
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            planner_config_path: lookup("GRADEPLAN_PLANNER_CONFIG").map(PathBuf::from),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
