use std::{env, fmt, fs, io, path, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "TORWATCH_";

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file {path}: {source}")]
    ReadFailed {
        path: path::PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write config file {path}: {source}")]
    WriteFailed {
        path: path::PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    ParseFailed {
        path: path::PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
    #[error("invalid value `{value}` for {name}")]
    InvalidEnv { name: String, value: String },
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("could not determine a config directory, set XDG_CONFIG_HOME or HOME")]
    ConfigPathUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub proxy: Proxy,
    pub target: Target,
    pub telegram: Telegram,
}

/// SOCKS5 proxy every request is tunneled through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proxy {
    /// `host:port` of the SOCKS5 endpoint
    pub address: String,
    /// Bound on a full request/response cycle
    pub timeout_seconds: u64,
    /// URL fetched once at startup to prove the proxy path works
    pub check_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub url: String,
    /// Responses slower than this are reported as slow
    pub slow_threshold_ms: u64,
    pub poll_interval_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telegram {
    /// Full `sendMessage` URL, bot token included
    pub endpoint: String,
    pub chat_id: String,
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/torwatch/config.toml or
/// $HOME/.config/...)
pub fn default_config_path() -> Result<path::PathBuf, Error> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(Error::ConfigPathUnavailable);
    };

    Ok(path.join("torwatch/config.toml"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy: Proxy {
                address: "127.0.0.1:9150".into(),
                timeout_seconds: 10,
                check_url: "http://check.torproject.org/".into(),
            },
            target: Target {
                url: "https://example.com".into(),
                slow_threshold_ms: 100,
                poll_interval_seconds: 300,
            },
            telegram: Telegram {
                endpoint: "https://api.telegram.org/bot<BotAPI>/sendMessage".into(),
                chat_id: "numbers".into(),
            },
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        writeln!(f, "Current Configuration:")?;
        write_title_1(f, "Proxy")?;
        write_1(f, "SOCKS5 Address", &self.proxy.address)?;
        write_1(f, "Request Timeout (s)", &self.proxy.timeout_seconds)?;
        write_1(f, "Connectivity Check", &self.proxy.check_url)?;
        write_title_1(f, "Target")?;
        write_1(f, "URL", &self.target.url)?;
        write_1(f, "Slow Threshold (ms)", &self.target.slow_threshold_ms)?;
        write_1(f, "Poll Interval (s)", &self.target.poll_interval_seconds)?;
        write_title_1(f, "Telegram")?;
        write_1(f, "Endpoint", &redact_bot_token(&self.telegram.endpoint))?;
        write_1(f, "Chat ID", &self.telegram.chat_id)?;

        Ok(())
    }
}

/// Hide the bot token in `.../bot<token>/sendMessage` style URLs.
fn redact_bot_token(endpoint: &str) -> String {
    match endpoint.find("/bot") {
        Some(start) => {
            let token_start = start + "/bot".len();
            let token_end = endpoint[token_start..]
                .find('/')
                .map(|offset| token_start + offset)
                .unwrap_or(endpoint.len());
            format!("{}***{}", &endpoint[..token_start], &endpoint[token_end..])
        }
        None => endpoint.to_string(),
    }
}

/// Parse an override, keeping the current value when the variable is unset.
fn override_value<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    current: &mut T,
) -> Result<(), Error> {
    let key = format!("{ENV_PREFIX}{name}");
    if let Some(raw) = lookup(&key) {
        *current = raw
            .trim()
            .parse()
            .map_err(|_| Error::InvalidEnv { name: key, value: raw.clone() })?;
    }
    Ok(())
}

fn validate_url(field: &str, raw: &str) -> Result<(), Error> {
    let url = Url::parse(raw).map_err(|err| Error::Invalid(format!("{field}: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Invalid(format!("{field}: unsupported scheme `{other}`"))),
    }
}

impl Config {
    /// Load the config file, apply `TORWATCH_*` environment overrides and
    /// validate the result.
    pub fn load(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let mut config = Self::from_config(optional_path)?;
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/torwatch/config.toml
    ///  or the specified path, with the name config.toml if one does not exist
    ///
    /// ```no_run
    /// let cfg = torwatch::config::Config::from_config(None::<&std::path::Path>)?;
    /// println!("{}", cfg);
    /// # Ok::<(), torwatch::config::Error>(())
    /// ```
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|source| Error::ReadFailed { path: config_path.clone(), source })?;
            toml::from_str(raw_string.as_str())
                .map_err(|source| Error::ParseFailed { path: config_path, source })
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            Ok(config)
        }
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), Error> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| Error::WriteFailed { path: parent.to_path_buf(), source })?;
        }

        fs::write(path, config_str)
            .map_err(|source| Error::WriteFailed { path: path.to_path_buf(), source })
    }

    /// Apply `TORWATCH_*` overrides looked up through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), Error> {
        override_value(&lookup, "PROXY_ADDRESS", &mut self.proxy.address)?;
        override_value(&lookup, "TIMEOUT_SECONDS", &mut self.proxy.timeout_seconds)?;
        override_value(&lookup, "CHECK_URL", &mut self.proxy.check_url)?;
        override_value(&lookup, "TARGET_URL", &mut self.target.url)?;
        override_value(&lookup, "SLOW_THRESHOLD_MS", &mut self.target.slow_threshold_ms)?;
        override_value(&lookup, "POLL_INTERVAL_SECONDS", &mut self.target.poll_interval_seconds)?;
        override_value(&lookup, "TELEGRAM_ENDPOINT", &mut self.telegram.endpoint)?;
        override_value(&lookup, "TELEGRAM_CHAT_ID", &mut self.telegram.chat_id)?;
        Ok(())
    }

    /// Reject values the probing loop cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.proxy.address.trim().is_empty() {
            return Err(Error::Invalid("proxy.address must not be empty".into()));
        }
        if self.proxy.timeout_seconds == 0 {
            return Err(Error::Invalid("proxy.timeout_seconds must be greater than 0".into()));
        }
        if self.target.slow_threshold_ms == 0 {
            return Err(Error::Invalid("target.slow_threshold_ms must be greater than 0".into()));
        }
        if self.target.poll_interval_seconds == 0 {
            return Err(Error::Invalid("target.poll_interval_seconds must be greater than 0".into()));
        }
        if self.telegram.chat_id.trim().is_empty() {
            return Err(Error::Invalid("telegram.chat_id must not be empty".into()));
        }
        validate_url("proxy.check_url", &self.proxy.check_url)?;
        validate_url("target.url", &self.target.url)?;
        validate_url("telegram.endpoint", &self.telegram.endpoint)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.proxy.timeout_seconds)
    }

    pub fn slow_threshold(&self) -> Duration {
        Duration::from_millis(self.target.slow_threshold_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.target.poll_interval_seconds)
    }
}
