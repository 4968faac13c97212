/// Engine configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | COMANDA_DB_PATH | comanda.db | SQLite database file |
/// | COMANDA_KITCHEN_REFRESH_SECS | 30 | kitchen feed re-poll interval |
///
/// Construction never fails; unset or unparsable values fall back to the
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub db_path: String,
    /// Kitchen feed re-poll interval in seconds
    pub kitchen_refresh_secs: u64,
}

pub const DEFAULT_DB_PATH: &str = "comanda.db";
pub const DEFAULT_KITCHEN_REFRESH_SECS: u64 = 30;

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables use the defaults.
    pub fn from_env() -> Self {
        Self {
            db_path: std::env::var("COMANDA_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.into()),
            kitchen_refresh_secs: std::env::var("COMANDA_KITCHEN_REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_KITCHEN_REFRESH_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.into(),
            kitchen_refresh_secs: DEFAULT_KITCHEN_REFRESH_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let config = Config::default();
        assert_eq!(config.db_path, "comanda.db");
        assert_eq!(config.kitchen_refresh_secs, 30);
    }
}
