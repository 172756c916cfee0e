//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Page size for issue listings when none is requested
    pub default_list_limit: i64,

    /// Largest page size a client may request
    pub max_list_limit: i64,

    /// Number of days covered by the analytics trend
    pub trend_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://issueflow.db".to_string(),
            port: 8000,
            environment: "development".to_string(),
            db_max_connections: 5,
            default_list_limit: 100,
            max_list_limit: 1000,
            trend_days: 7,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup; missing, unparsable or
    /// out-of-range values fall back to the defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<i64>().ok());

        let max_list_limit = parse("MAX_LIST_LIMIT")
            .filter(|v| *v >= 1)
            .unwrap_or(defaults.max_list_limit);

        // Never larger than the max, never below one
        let default_list_limit = parse("DEFAULT_LIST_LIMIT")
            .filter(|v| *v >= 1)
            .unwrap_or(defaults.default_list_limit)
            .min(max_list_limit);

        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or(defaults.database_url),

            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),

            environment: lookup("ENVIRONMENT")
                .unwrap_or(defaults.environment),

            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|n: &u32| *n > 0)
                .unwrap_or(defaults.db_max_connections),

            default_list_limit,
            max_list_limit,

            trend_days: lookup("TREND_DAYS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|d: &u32| *d > 0)
                .unwrap_or(defaults.trend_days),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Effective page size for a listing request, always in `1..=max_list_limit`
    pub fn list_limit(&self, requested: Option<i64>) -> i64 {
        let max = self.max_list_limit.max(1);
        requested
            .unwrap_or(self.default_list_limit)
            .clamp(1, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// `from_env` tests share the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_lookup_uses_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.database_url, "sqlite://issueflow.db");
        assert_eq!(config.port, 8000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.default_list_limit, 100);
        assert_eq!(config.max_list_limit, 1000);
        assert_eq!(config.trend_days, 7);
        assert!(!config.is_production());
    }

    #[test]
    fn test_values_are_read() {
        let config = from_pairs(&[
            ("DATABASE_URL", "sqlite://other.db"),
            ("PORT", "9090"),
            ("ENVIRONMENT", "production"),
            ("DB_MAX_CONNECTIONS", "2"),
            ("DEFAULT_LIST_LIMIT", "20"),
            ("MAX_LIST_LIMIT", "50"),
            ("TREND_DAYS", "14"),
        ]);
        assert_eq!(config.database_url, "sqlite://other.db");
        assert_eq!(config.port, 9090);
        assert!(config.is_production());
        assert_eq!(config.db_max_connections, 2);
        assert_eq!(config.default_list_limit, 20);
        assert_eq!(config.max_list_limit, 50);
        assert_eq!(config.trend_days, 14);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = from_pairs(&[
            ("PORT", "eighty"),
            ("DB_MAX_CONNECTIONS", "-3"),
            ("DEFAULT_LIST_LIMIT", "lots"),
            ("MAX_LIST_LIMIT", ""),
            ("TREND_DAYS", "week"),
        ]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.default_list_limit, 100);
        assert_eq!(config.max_list_limit, 1000);
        assert_eq!(config.trend_days, 7);
    }

    #[test]
    fn test_non_positive_values_fall_back() {
        let config = from_pairs(&[
            ("DB_MAX_CONNECTIONS", "0"),
            ("DEFAULT_LIST_LIMIT", "0"),
            ("MAX_LIST_LIMIT", "-1"),
            ("TREND_DAYS", "0"),
        ]);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.default_list_limit, 100);
        assert_eq!(config.max_list_limit, 1000);
        assert_eq!(config.trend_days, 7);
    }

    #[test]
    fn test_default_limit_never_exceeds_max() {
        let config = from_pairs(&[("MAX_LIST_LIMIT", "10")]);
        assert_eq!(config.max_list_limit, 10);
        assert_eq!(config.default_list_limit, 10);
    }

    #[test]
    fn test_list_limit_is_clamped() {
        let config = Config { default_list_limit: 100, max_list_limit: 1000, ..Config::default() };
        assert_eq!(config.list_limit(None), 100);
        assert_eq!(config.list_limit(Some(5)), 5);
        assert_eq!(config.list_limit(Some(5000)), 1000);
        assert_eq!(config.list_limit(Some(0)), 1);

        // Hand-built configs with bad bounds still yield a positive limit
        let broken = Config { default_list_limit: 0, max_list_limit: -1, ..Config::default() };
        assert_eq!(broken.list_limit(None), 1);
        assert_eq!(broken.list_limit(Some(3)), 1);
    }

    #[test]
    fn test_from_env_reads_and_clears() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        env::set_var("PORT", "8123");
        env::set_var("MAX_LIST_LIMIT", "0");
        env::set_var("TREND_DAYS", "3");
        let config = Config::from_env();
        assert_eq!(config.port, 8123);
        assert_eq!(config.max_list_limit, 1000);
        assert_eq!(config.trend_days, 3);

        env::remove_var("PORT");
        env::remove_var("MAX_LIST_LIMIT");
        env::remove_var("TREND_DAYS");
        let config = Config::from_env();
        assert_eq!(config.port, 8000);
        assert_eq!(config.trend_days, 7);
    }
}
