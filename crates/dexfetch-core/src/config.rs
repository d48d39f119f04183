use crate::retry::RetryPolicy;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// When periodic checkpoints are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckpointCadence {
    /// After every N rows appended in the current run.
    #[default]
    NewItems,
    /// After a row whose identifier is a multiple of N.
    AbsoluteId,
}

/// Configuration loaded from `~/.config/dexfetch/config.toml`.
/// Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Identifiers `1..=limit` are fetched.
    pub limit: u32,
    /// Primary endpoint; `{base_url}/{id}` is requested per identifier.
    pub base_url: String,
    /// Resumable partial table.
    pub checkpoint_path: PathBuf,
    /// Complete table written once the range is exhausted.
    pub final_path: PathBuf,
    /// Attempts per fetch, including the first.
    pub max_attempts: u32,
    /// Timeout for a single attempt, in seconds.
    pub per_attempt_timeout_secs: f64,
    /// Pause after a failed attempt, in seconds.
    pub retry_backoff_secs: f64,
    /// Pause after each attempted identifier, in seconds.
    pub inter_request_delay_secs: f64,
    /// Checkpoint period (see `checkpoint_cadence`).
    pub checkpoint_every_n: u32,
    pub checkpoint_cadence: CheckpointCadence,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            limit: 1025,
            base_url: "https://pokeapi.co/api/v2/pokemon/".to_string(),
            checkpoint_path: PathBuf::from("data/raw/pokemon_partial.csv"),
            final_path: PathBuf::from("data/raw/pokemon_raw.csv"),
            max_attempts: 3,
            per_attempt_timeout_secs: 5.0,
            retry_backoff_secs: 1.0,
            inter_request_delay_secs: 0.2,
            checkpoint_every_n: 50,
            checkpoint_cadence: CheckpointCadence::NewItems,
        }
    }
}

/// Smallest per-attempt timeout libcurl can enforce.
pub const MIN_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(1);

fn secs(name: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value)
        .with_context(|| format!("{name} must be a non-negative number of seconds, got {value}"))
}

impl FetchConfig {
    /// Reject values the fetch loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }
        if self.checkpoint_every_n == 0 {
            bail!("checkpoint_every_n must be at least 1");
        }
        let timeout = secs("per_attempt_timeout_secs", self.per_attempt_timeout_secs)?;
        // curl reads a 0 ms timeout as "wait forever".
        if timeout < MIN_ATTEMPT_TIMEOUT {
            bail!(
                "per_attempt_timeout_secs must be at least 0.001, got {}",
                self.per_attempt_timeout_secs
            );
        }
        secs("retry_backoff_secs", self.retry_backoff_secs)?;
        secs("inter_request_delay_secs", self.inter_request_delay_secs)?;
        url::Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url: {}", self.base_url))?;
        if self.checkpoint_path == self.final_path {
            bail!(
                "checkpoint_path and final_path must differ (both {})",
                self.final_path.display()
            );
        }
        Ok(())
    }

    pub fn per_attempt_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.per_attempt_timeout_secs).unwrap_or_default()
    }

    pub fn inter_request_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.inter_request_delay_secs).unwrap_or_default()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            backoff: Duration::try_from_secs_f64(self.retry_backoff_secs).unwrap_or_default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dexfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<FetchConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
