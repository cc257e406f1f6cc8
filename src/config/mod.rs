//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SEMANTLE_*` environment variables; the
//! CLI layers its flags on top of the result.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{DEFAULT_MIN_SIMILARITY, DEFAULT_TOP_K};

/// Default data directory, matching the static asset layout served to clients.
pub const DEFAULT_DATA_DIR: &str = "./public/data";
/// Wordlist filename inside the data directory.
pub const DEFAULT_WORDLIST_FILENAME: &str = "semantle_wordlist.txt";
/// History filename inside the data directory.
pub const DEFAULT_HISTORY_FILENAME: &str = "history.json";
/// Snapshot filename inside the data directory.
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "daily.json";

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SEMANTLE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding the wordlist, history and snapshot. Default: `./public/data`.
    pub data_dir: PathBuf,

    /// Explicit wordlist path (else `<data_dir>/semantle_wordlist.txt`).
    pub wordlist_path: Option<PathBuf>,

    /// Explicit history path (else `<data_dir>/history.json`).
    pub history_path: Option<PathBuf>,

    /// Explicit snapshot path (else `<data_dir>/daily.json`).
    pub snapshot_path: Option<PathBuf>,

    /// Word vectors file. When unset the stub oracle is used.
    pub vectors_path: Option<PathBuf>,

    /// Raw similarity threshold. Default: `-0.5`.
    pub min_similarity: f64,

    /// Max records per snapshot (`0` = unbounded). Default: `10_000`.
    pub top_k: usize,

    /// Attach normalized `score` fields. Default: `false`.
    pub normalize: bool,

    /// Invocations come from the trusted scheduler.
    pub cron_trigger: bool,

    /// Development mode opens the generation trigger.
    pub development: bool,

    /// Bearer token accepted by the generation trigger.
    pub cron_secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            wordlist_path: None,
            history_path: None,
            snapshot_path: None,
            vectors_path: None,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            top_k: DEFAULT_TOP_K,
            normalize: false,
            cron_trigger: false,
            development: false,
            cron_secret: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SEMANTLE_PORT";
    const ENV_BIND_ADDR: &'static str = "SEMANTLE_BIND_ADDR";
    const ENV_DATA_DIR: &'static str = "SEMANTLE_DATA_DIR";
    const ENV_WORDLIST_PATH: &'static str = "SEMANTLE_WORDLIST_PATH";
    const ENV_HISTORY_PATH: &'static str = "SEMANTLE_HISTORY_PATH";
    const ENV_SNAPSHOT_PATH: &'static str = "SEMANTLE_SNAPSHOT_PATH";
    const ENV_VECTORS_PATH: &'static str = "SEMANTLE_VECTORS_PATH";
    const ENV_MIN_SIMILARITY: &'static str = "SEMANTLE_MIN_SIMILARITY";
    const ENV_TOP_K: &'static str = "SEMANTLE_TOP_K";
    const ENV_NORMALIZE: &'static str = "SEMANTLE_NORMALIZE";
    const ENV_CRON: &'static str = "SEMANTLE_CRON";
    const ENV_ENV: &'static str = "SEMANTLE_ENV";
    const ENV_CRON_SECRET: &'static str = "SEMANTLE_CRON_SECRET";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let data_dir = Self::parse_path_from_env(Self::ENV_DATA_DIR, defaults.data_dir);
        let wordlist_path = Self::parse_optional_path_from_env(Self::ENV_WORDLIST_PATH);
        let history_path = Self::parse_optional_path_from_env(Self::ENV_HISTORY_PATH);
        let snapshot_path = Self::parse_optional_path_from_env(Self::ENV_SNAPSHOT_PATH);
        let vectors_path = Self::parse_optional_path_from_env(Self::ENV_VECTORS_PATH);
        let min_similarity =
            Self::parse_number_from_env(Self::ENV_MIN_SIMILARITY, defaults.min_similarity)?;
        let top_k = Self::parse_number_from_env(Self::ENV_TOP_K, defaults.top_k)?;
        let normalize = Self::parse_flag_from_env(Self::ENV_NORMALIZE);
        let cron_trigger = Self::parse_flag_from_env(Self::ENV_CRON);
        let development = env::var(Self::ENV_ENV)
            .map(|v| v.trim().eq_ignore_ascii_case("development"))
            .unwrap_or(false);
        let cron_secret = env::var(Self::ENV_CRON_SECRET)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(Self {
            port,
            bind_addr,
            data_dir,
            wordlist_path,
            history_path,
            snapshot_path,
            vectors_path,
            min_similarity,
            top_k,
            normalize,
            cron_trigger,
            development,
            cron_secret,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.exists() && !self.data_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.data_dir.clone(),
            });
        }

        if !(-1.0..=1.0).contains(&self.min_similarity) {
            return Err(ConfigError::InvalidThreshold {
                value: self.min_similarity,
            });
        }

        if let Some(ref path) = self.vectors_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        let wordlist = self.wordlist_path();
        if wordlist.exists() && !wordlist.is_file() {
            return Err(ConfigError::NotAFile { path: wordlist });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn wordlist_path(&self) -> PathBuf {
        self.wordlist_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_WORDLIST_FILENAME))
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_HISTORY_FILENAME))
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_SNAPSHOT_FILENAME))
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidNumber {
                    name: var_name,
                    value: value.clone(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_flag_from_env(var_name: &str) -> bool {
        env::var(var_name)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }
}
