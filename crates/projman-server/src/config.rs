//! Server configuration

use anyhow::{Context, anyhow};
use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default listening port
pub const DEFAULT_PORT: u16 = 4000;

/// Default document store location
pub const DEFAULT_DATABASE_URL: &str = "lmdb://./data";

/// Default limit for buffered request bodies (1MB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Deployment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: GraphiQL enabled, relaxed CSP
    Development,
    /// Anything deployed
    #[default]
    Production,
    /// Automated tests
    Test,
}

impl Environment {
    /// Whether the interactive GraphiQL page is served
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(anyhow!("Unknown environment: {}", other)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        })
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind
    pub host: IpAddr,
    /// Listening port
    pub port: u16,
    /// Deployment mode
    pub environment: Environment,
    /// Document store connection string
    pub database_url: String,
    /// Pre-built front-end served for every non-API path
    pub static_dir: Option<PathBuf>,
    /// Batch `Project.client` lookups through a DataLoader
    pub batch_client_lookups: bool,
    /// Upper bound for JSON bodies buffered by the sanitizer
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            environment: Environment::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            static_dir: None,
            batch_client_lookups: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// `config/server.toml` structure; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    host: Option<IpAddr>,
    port: Option<u16>,
    environment: Option<Environment>,
    database_url: Option<String>,
    static_dir: Option<PathBuf>,
    batch_client_lookups: Option<bool>,
    max_body_bytes: Option<usize>,
}

/// Environment variables, in lookup order for each setting
const HOST_VARS: &[&str] = &["PROJMAN_HOST"];
const PORT_VARS: &[&str] = &["PROJMAN_PORT", "PORT"];
const ENV_VARS: &[&str] = &["PROJMAN_ENV", "NODE_ENV"];
const DATABASE_VARS: &[&str] = &["PROJMAN_DATABASE_URL", "MONGO_URI"];
const STATIC_DIR_VARS: &[&str] = &["PROJMAN_STATIC_DIR"];
const BATCH_VARS: &[&str] = &["PROJMAN_BATCH_CLIENT_LOOKUPS"];
const MAX_BODY_VARS: &[&str] = &["PROJMAN_MAX_BODY_BYTES"];

impl Config {
    /// Load `server.toml` from `config_dir`
    ///
    /// Returns None if the file doesn't exist or can't be parsed.
    pub fn from_file(config_dir: impl AsRef<Path>) -> Option<ConfigFile> {
        let config_path = config_dir.as_ref().join("server.toml");

        if !config_path.exists() {
            tracing::debug!("Server config file not found: {:?}", config_path);
            return None;
        }

        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str::<ConfigFile>(&content) {
                Ok(file) => {
                    tracing::info!("Loaded server configuration from {:?}", config_path);
                    Some(file)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file {:?}: {}", config_path, e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file {:?}: {}", config_path, e);
                None
            }
        }
    }

    /// Load configuration from environment variables and config file
    /// Priority: Environment variables > config file > defaults
    pub fn load(config_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = Self::from_file(config_dir).unwrap_or_default();
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge defaults, a config file and a variable lookup
    pub fn resolve(
        file: ConfigFile,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let first = |keys: &[&'static str]| {
            keys.iter().find_map(|key| {
                lookup(*key)
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (*key, v))
            })
        };

        let mut config = Config::default();

        if let Some(host) = file.host {
            config.host = host;
        }
        if let Some(port) = file.port {
            config.port = port;
        }
        if let Some(environment) = file.environment {
            config.environment = environment;
        }
        if let Some(url) = file.database_url {
            config.database_url = url;
        }
        if file.static_dir.is_some() {
            config.static_dir = file.static_dir;
        }
        if let Some(batch) = file.batch_client_lookups {
            config.batch_client_lookups = batch;
        }
        if let Some(max) = file.max_body_bytes {
            config.max_body_bytes = max;
        }

        if let Some((key, value)) = first(HOST_VARS) {
            config.host = value
                .trim()
                .parse::<IpAddr>()
                .with_context(|| format!("Invalid {}: {}", key, value))?;
        }
        if let Some((key, value)) = first(PORT_VARS) {
            config.port = value
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid {}: {}", key, value))?;
        }
        if let Some((key, value)) = first(ENV_VARS) {
            config.environment = value
                .parse::<Environment>()
                .with_context(|| format!("Invalid {}: {}", key, value))?;
        }
        if let Some((_, value)) = first(DATABASE_VARS) {
            config.database_url = value;
        }
        if let Some((_, value)) = first(STATIC_DIR_VARS) {
            config.static_dir = Some(PathBuf::from(value));
        }
        if let Some((key, value)) = first(BATCH_VARS) {
            config.batch_client_lookups = value
                .trim()
                .parse::<bool>()
                .with_context(|| format!("Invalid {}: {}", key, value))?;
        }
        if let Some((key, value)) = first(MAX_BODY_VARS) {
            config.max_body_bytes = value
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid {}: {}", key, value))?;
        }

        Ok(config)
    }

    /// Get the bind address
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Set a new environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set a static assets directory
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Set the database connection string
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// Enable or disable batched client lookups
    pub fn with_batch_client_lookups(mut self, enabled: bool) -> Self {
        self.batch_client_lookups = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.port, 4000);
        assert_eq!(config.addr().ip(), IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)));
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database_url, "lmdb://./data");
        assert!(config.static_dir.is_none());
        assert!(!config.batch_client_lookups);
    }

    #[test]
    fn test_resolve_without_sources_is_default() {
        let config = Config::resolve(ConfigFile::default(), lookup(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_resolve_env_overrides() {
        let config = Config::resolve(
            ConfigFile::default(),
            lookup(&[
                ("PROJMAN_HOST", "0.0.0.0"),
                ("PORT", "8080"),
                ("NODE_ENV", "development"),
                ("MONGO_URI", "memory://"),
                ("PROJMAN_STATIC_DIR", "client/build"),
                ("PROJMAN_BATCH_CLIENT_LOOKUPS", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert!(config.environment.is_development());
        assert_eq!(config.database_url, "memory://");
        assert_eq!(config.static_dir, Some(PathBuf::from("client/build")));
        assert!(config.batch_client_lookups);
    }

    #[test]
    fn test_prefixed_vars_win_over_legacy_names() {
        let config = Config::resolve(
            ConfigFile::default(),
            lookup(&[("PROJMAN_PORT", "5000"), ("PORT", "6000")]),
        )
        .unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_empty_var_is_ignored() {
        let config = Config::resolve(ConfigFile::default(), lookup(&[("PORT", "  ")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = Config::resolve(ConfigFile::default(), lookup(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid PORT"));

        assert!(
            Config::resolve(ConfigFile::default(), lookup(&[("PROJMAN_ENV", "staging")])).is_err()
        );
        assert!(
            Config::resolve(
                ConfigFile::default(),
                lookup(&[("PROJMAN_BATCH_CLIENT_LOOKUPS", "maybe")])
            )
            .is_err()
        );
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!(" Production ".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
        assert_eq!(Environment::Development.to_string(), "development");
    }

    #[test]
    fn test_from_file_not_found() {
        assert!(Config::from_file("/nonexistent/path").is_none());
    }

    #[test]
    fn test_example_file_parses() {
        let example = include_str!("../../../config/server.toml.example");
        let file: ConfigFile = toml::from_str(example).unwrap();
        let config = Config::resolve(file, lookup(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_from_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("server.toml"),
            r#"
port = 7000
environment = "development"
database_url = "memory://"
static_dir = "public"
"#,
        )
        .unwrap();

        let file = Config::from_file(dir.path()).unwrap();
        let config = Config::resolve(file, lookup(&[("PROJMAN_ENV", "production")])).unwrap();

        assert_eq!(config.port, 7000);
        assert_eq!(config.database_url, "memory://");
        assert_eq!(config.static_dir, Some(PathBuf::from("public")));
        // Environment variables take priority over the file
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("server.toml"), "invalid toml content [").unwrap();
        assert!(Config::from_file(dir.path()).is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = Config::default()
            .with_environment(Environment::Test)
            .with_static_dir("/srv/app")
            .with_database_url("memory://")
            .with_batch_client_lookups(true);

        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.static_dir, Some(PathBuf::from("/srv/app")));
        assert_eq!(config.database_url, "memory://");
        assert!(config.batch_client_lookups);
    }
}
