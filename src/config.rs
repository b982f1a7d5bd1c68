use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::drivers::classifier::{DEFAULT_ALPHA_THRESHOLD, DEFAULT_BETA_THRESHOLD};
use crate::drivers::smoother::DEFAULT_SMOOTHING;
use crate::drivers::{EmaSmoother, MoodClassifier, PipelineError};

/// Operating parameters of the mood pipeline. Missing fields in a JSON file
/// fall back to the reference values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sample_rate_hz: f64,
    pub window_samples: usize,
    pub smoothing: f64,
    pub alpha_threshold: f64,
    pub beta_threshold: f64,
    pub cycle_delay_ms: u64,
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 128.0,
            window_samples: 128,
            smoothing: DEFAULT_SMOOTHING,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            beta_threshold: DEFAULT_BETA_THRESHOLD,
            cycle_delay_ms: 50,
            seed: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PipelineConfig =
            serde_json::from_str(json).context("failed to parse pipeline config JSON")?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Analysis window length in seconds.
    pub fn window_secs(&self) -> f64 {
        self.window_samples as f64 / self.sample_rate_hz
    }

    pub fn cycle_delay(&self) -> Duration {
        Duration::from_millis(self.cycle_delay_ms)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0) {
            return Err(PipelineError::InvalidSampleRate(self.sample_rate_hz));
        }
        if self.window_samples == 0 {
            return Err(PipelineError::InvalidWindow {
                samples: self.window_samples,
                sample_rate_hz: self.sample_rate_hz,
            });
        }
        EmaSmoother::new(self.smoothing)?;
        MoodClassifier::new(self.alpha_threshold, self.beta_threshold)?;
        Ok(())
    }
}
