//! Node configuration, loaded from TOML and overridable from the environment.

use std::{fmt, fs, io, path::PathBuf, time::Duration};

use alloy_primitives::Address;
use bluewater_execution::{ExecutionConfig, engine_api::jwt::parse_jwt_secret};
use bluewater_types::{fork::ForkConfig, slot::Epoch};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tokio::runtime::{Builder as RtBuilder, Runtime};
use tracing::warn;
use url::Url;

use crate::error::Error;

pub use crate::file::load_config;

pub const ENV_EPBS_FORK_EPOCH: &str = "BLUEWATER_EPBS_FORK_EPOCH";
pub const ENV_ENGINE_URL: &str = "BLUEWATER_ENGINE_URL";
pub const ENV_JWT_SECRET: &str = "BLUEWATER_JWT_SECRET";
pub const ENV_FEE_RECIPIENT: &str = "BLUEWATER_FEE_RECIPIENT";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fork: ForkConfig,
    pub execution: ExecutionSettings,
    pub proposer: ProposerSettings,
    pub logging: LoggingConfig,
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Apply environment variable overrides.
    ///
    /// Supported variables:
    /// - BLUEWATER_EPBS_FORK_EPOCH
    /// - BLUEWATER_ENGINE_URL
    /// - BLUEWATER_JWT_SECRET (path to the hex secret file)
    /// - BLUEWATER_FEE_RECIPIENT
    pub fn apply_env_overrides(&mut self) {
        fn get(key: &str) -> Option<String> {
            std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }

        if let Some(v) = get(ENV_EPBS_FORK_EPOCH) {
            match v.parse::<u64>() {
                Ok(epoch) => self.fork.epbs_fork_epoch = Epoch::new(epoch),
                Err(_) => warn!(value = %v, "Invalid {ENV_EPBS_FORK_EPOCH}, ignoring"),
            }
        }

        if let Some(v) = get(ENV_ENGINE_URL) {
            match v.parse::<Url>() {
                Ok(url) => self.execution.engine_url = url,
                Err(_) => warn!(value = %v, "Invalid {ENV_ENGINE_URL}, ignoring"),
            }
        }

        if let Some(v) = get(ENV_JWT_SECRET) {
            self.execution.jwt_secret_path = Some(PathBuf::from(v));
        }

        if let Some(v) = get(ENV_FEE_RECIPIENT) {
            match v.parse::<Address>() {
                Ok(address) => self.execution.fee_recipient = address,
                Err(_) => warn!(value = %v, "Invalid {ENV_FEE_RECIPIENT}, ignoring"),
            }
        }
    }

    /// Engine client settings, with the JWT secret read from disk.
    pub fn execution_config(&self) -> Result<ExecutionConfig, Error> {
        let path = self.execution.jwt_secret_path.as_ref().ok_or(Error::MissingJwtSecret)?;
        let contents = fs::read_to_string(path).map_err(|_| Error::OpenFile(path.clone()))?;
        let secret = parse_jwt_secret(&contents)
            .map_err(|e| Error::JwtSecret(path.clone(), e.to_string()))?;

        let mut config = ExecutionConfig::new(self.execution.engine_url.clone(), secret);
        config.request_timeout = self.execution.engine_timeout_ms.map(Duration::from_millis);
        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionSettings {
    /// Authenticated Engine API endpoint.
    pub engine_url: Url,
    /// File holding the hex-encoded JWT secret shared with the execution client.
    pub jwt_secret_path: Option<PathBuf>,
    /// Address that receives the priority fees of locally built payloads.
    pub fee_recipient: Address,
    /// Per-call Engine API timeout in milliseconds.
    pub engine_timeout_ms: Option<u64>,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            engine_url: default_engine_url(),
            jwt_secret_path: None,
            fee_recipient: Address::ZERO,
            engine_timeout_ms: None,
        }
    }
}

fn default_engine_url() -> Url {
    Url::parse("http://127.0.0.1:8551").expect("default engine URL is valid")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposerSettings {
    /// Deadline for a whole `GetLocalHeader` request, in milliseconds. Zero disables it.
    pub request_timeout_ms: u64,
}

impl ProposerSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

impl Default for ProposerSettings {
    fn default() -> Self {
        Self { request_timeout_ms: 4_000 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(level)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plaintext,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "flavor", rename_all = "snake_case")]
pub enum RuntimeConfig {
    SingleThreaded,
    /// Zero worker threads means one per core.
    MultiThreaded {
        #[serde(default)]
        worker_threads: usize,
    },
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::MultiThreaded { worker_threads: 0 }
    }
}

impl RuntimeConfig {
    /// Build the tokio runtime the subcommands run on.
    pub fn build_runtime(&self) -> io::Result<Runtime> {
        let mut builder = match *self {
            Self::SingleThreaded => RtBuilder::new_current_thread(),
            Self::MultiThreaded { worker_threads } => {
                let mut builder = RtBuilder::new_multi_thread();
                if worker_threads > 0 {
                    builder.worker_threads(worker_threads);
                }
                builder
            }
        };

        builder.thread_name("bluewater-worker").enable_all().build()
    }
}
