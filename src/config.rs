use std::env;

use crate::app::utils::expand_path;

pub const DEFAULT_DATABASE: &str = "portfolio.db";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings read from the environment (and a `.env` file, if present).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    pub database: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        Self {
            database: env::var("PORTFOLIO_DB").unwrap_or(defaults.database),
            log_filter: env::var("PORTFOLIO_LOG").unwrap_or(defaults.log_filter),
        }
    }

    pub fn with_database(mut self, database: Option<String>) -> Self {
        if let Some(database) = database {
            self.database = database;
        }
        self
    }

    pub fn database_path(&self) -> String {
        expand_path(&self.database)
    }
}
