use std::path::{Path, PathBuf};

/// Engine configuration
///
/// Every field can be overridden through the environment (a `.env`
/// file is honored when present):
///
/// | Variable  | Default                 | Purpose                |
/// |-----------|-------------------------|------------------------|
/// | WORK_DIR  | /var/lib/laundry-engine | Working directory      |
/// | LOG_LEVEL | info                    | Tracing level filter   |
/// | LOG_DIR   | (stdout only)           | Daily rolling log dir  |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// Tracing level: trace | debug | info | warn | error
    pub log_level: String,
    /// Optional directory for daily rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/laundry-engine".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Configuration rooted at a custom working directory
    ///
    /// Mostly used by tests.
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    /// Path of the embedded database under the working directory
    pub fn db_path(&self) -> PathBuf {
        Path::new(&self.work_dir).join("db")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_path_lives_under_work_dir() {
        let config = Config::with_work_dir("/tmp/laundry-test");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/laundry-test/db"));
    }
}
