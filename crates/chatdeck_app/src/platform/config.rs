use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chatdeck_engine::{
    FeedConnector, FeedError, HttpFeedConnector, HttpFeedSettings, PollSettings, ReplayConnector,
};
use chatdeck_logging::LogDestination;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub bind: String,
    pub poll_interval_ms: u64,
    pub log: LogDestination,
    pub log_level: String,
    pub feed: FeedConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
            poll_interval_ms: 2000,
            log: LogDestination::Terminal,
            log_level: "info".to_string(),
            feed: FeedConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum FeedConfig {
    Http {
        base_url: String,
        #[serde(default = "default_connect_timeout_ms")]
        connect_timeout_ms: u64,
        #[serde(default)]
        request_timeout_ms: Option<u64>,
    },
    Replay {
        dir: PathBuf,
    },
}

impl Default for FeedConfig {
    fn default() -> Self {
        let settings = HttpFeedSettings::default();
        FeedConfig::Http {
            base_url: settings.base_url,
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: None,
        }
    }
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

impl AppConfig {
    /// Command-line flags win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(bind) = &cli.bind {
            self.bind = bind.clone();
        }
        if let Some(interval) = cli.poll_interval_ms {
            self.poll_interval_ms = interval;
        }
        if cli.verbose {
            self.log_level = "debug".to_string();
        }
        if let Some(dir) = &cli.replay_dir {
            self.feed = FeedConfig::Replay { dir: dir.clone() };
        } else if let Some(url) = &cli.feed_url {
            match &mut self.feed {
                FeedConfig::Http { base_url, .. } => *base_url = url.clone(),
                FeedConfig::Replay { .. } => {
                    self.feed = FeedConfig::Http {
                        base_url: url.clone(),
                        connect_timeout_ms: default_connect_timeout_ms(),
                        request_timeout_ms: None,
                    }
                }
            }
        }
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn build_connector(&self) -> Result<Arc<dyn FeedConnector>, FeedError> {
        match &self.feed {
            FeedConfig::Http {
                base_url,
                connect_timeout_ms,
                request_timeout_ms,
            } => {
                let connector = HttpFeedConnector::new(HttpFeedSettings {
                    base_url: base_url.clone(),
                    connect_timeout: Duration::from_millis(*connect_timeout_ms),
                    request_timeout: request_timeout_ms.map(Duration::from_millis),
                })?;
                Ok(Arc::new(connector))
            }
            FeedConfig::Replay { dir } => Ok(Arc::new(ReplayConnector::new(dir.clone()))),
        }
    }
}

/// Reads the config file. `Ok(None)` when the file does not exist.
pub(crate) fn load_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
