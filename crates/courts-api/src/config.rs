use std::env;
use std::path::PathBuf;
use std::time::Duration;

use courts_core::config::SearchConfig;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_API_VERSION: &str = "v1";
const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost", "http://localhost:3000"];
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub api_version: String,
    pub database_url: Option<String>,
    pub config_path: Option<PathBuf>,
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            api_version: DEFAULT_API_VERSION.to_string(),
            database_url: None,
            config_path: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("COURTS_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(defaults.port);

        let cors_origins = env::var("COURTS_CORS_ORIGINS")
            .ok()
            .map(|raw| parse_origins(&raw))
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.cors_origins);

        let api_version = env::var("API_VERSION")
            .ok()
            .map(|v| v.trim().trim_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_version);

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());

        let config_path = env::var("COURTS_CONFIG").ok().map(PathBuf::from);

        let request_timeout = env::var("COURTS_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self { port, cors_origins, api_version, database_url, config_path, request_timeout }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Check if PostgreSQL storage is configured
    pub fn uses_postgres(&self) -> bool {
        self.database_url.is_some()
    }

    /// Prefix under which the facility routes are mounted
    pub fn facilities_prefix(&self) -> String {
        format!("/api/{}/facilities", self.api_version)
    }

    /// Resolve search settings: defaults, then the optional TOML file, then environment
    pub fn load_search_config(&self) -> courts_core::Result<SearchConfig> {
        let mut config = SearchConfig::with_defaults();

        if let Some(path) = &self.config_path {
            config = config.load_from_file(path)?;
        }

        let config = config.load_from_env();
        config.validate()?;
        Ok(config)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const VARS: [&str; 9] = [
        "COURTS_PORT",
        "COURTS_CORS_ORIGINS",
        "API_VERSION",
        "DATABASE_URL",
        "COURTS_CONFIG",
        "COURTS_REQUEST_TIMEOUT_SECS",
        "COURTS_MAX_RADIUS_KM",
        "COURTS_EARTH_RADIUS_KM",
        "COURTS_CANDIDATE_STRATEGY",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = ApiConfig::from_env();

        assert_eq!(config.port, 8000);
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.cors_origins, vec!["http://localhost", "http://localhost:3000"]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(!config.uses_postgres());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.facilities_prefix(), "/api/v1/facilities");
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        clear_env();
        env::set_var("COURTS_PORT", "9100");
        env::set_var("COURTS_CORS_ORIGINS", "https://courts.example, ,https://admin.example");
        env::set_var("API_VERSION", "/v2/");
        env::set_var("DATABASE_URL", "postgresql://localhost/courts");
        env::set_var("COURTS_REQUEST_TIMEOUT_SECS", "5");

        let config = ApiConfig::from_env();
        clear_env();

        assert_eq!(config.port, 9100);
        assert_eq!(config.cors_origins, vec!["https://courts.example", "https://admin.example"]);
        assert_eq!(config.facilities_prefix(), "/api/v2/facilities");
        assert!(config.uses_postgres());
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    #[serial]
    fn test_unparseable_values_fall_back() {
        clear_env();
        env::set_var("COURTS_PORT", "not-a-port");
        env::set_var("COURTS_REQUEST_TIMEOUT_SECS", "0");
        env::set_var("DATABASE_URL", "  ");

        let config = ApiConfig::from_env();
        clear_env();

        assert_eq!(config.port, 8000);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(!config.uses_postgres());
    }

    #[test]
    #[serial]
    fn test_search_config_layers_file_and_env() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_radius_km = 25.0\ncandidate_strategy = \"full_scan\"").unwrap();

        env::set_var("COURTS_CONFIG", file.path());
        env::set_var("COURTS_MAX_RADIUS_KM", "30");

        let search = ApiConfig::from_env().load_search_config().unwrap();
        clear_env();

        assert_eq!(search.limits().max_radius_km, 30.0);
        assert_eq!(search.strategy(), courts_core::config::CandidateStrategy::FullScan);
    }
}
