// src/types.rs
use serde::Serialize;
use std::fmt;

// 情绪标签
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MoodLabel {
    Calm,
    Focus,
    Stress,
    Unknown,
}

impl MoodLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            MoodLabel::Calm => "CALM",
            MoodLabel::Focus => "FOCUS",
            MoodLabel::Stress => "STRESS",
            MoodLabel::Unknown => "UNKNOWN",
        }
    }

    /// Display colour used by both presenters.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            MoodLabel::Calm => (100, 200, 255),
            MoodLabel::Focus => (255, 200, 100),
            MoodLabel::Stress => (255, 50, 50),
            MoodLabel::Unknown => (200, 200, 200),
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative power in the alpha, beta and gamma bands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BandPowers {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl BandPowers {
    pub const ZERO: BandPowers = BandPowers { alpha: 0.0, beta: 0.0, gamma: 0.0 };

    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.alpha, self.beta, self.gamma]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// `coeff * observation + (1 - coeff) * self`, elementwise.
    pub fn blend(&self, observation: &BandPowers, coeff: f64) -> BandPowers {
        let keep = 1.0 - coeff;
        BandPowers {
            alpha: coeff * observation.alpha + keep * self.alpha,
            beta: coeff * observation.beta + keep * self.beta,
            gamma: coeff * observation.gamma + keep * self.gamma,
        }
    }

    /// Largest absolute elementwise difference.
    #[cfg(test)]
    pub fn max_abs_diff(&self, other: &BandPowers) -> f64 {
        self.as_array()
            .iter()
            .zip(other.as_array())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

// 单个处理周期的输出
#[derive(Clone, Copy, Debug, Serialize)]
pub struct MoodFrame {
    pub label: MoodLabel,
    pub raw: BandPowers,
    pub smoothed: BandPowers,
    pub window_secs: f64,
    pub chunk_start_secs: f64,
    pub has_artifact: bool,
}

// 界面发给后台的命令
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineCommand {
    TriggerArtifact,
    Stop,
}

// 后台发给界面的消息
#[derive(Clone, Debug)]
pub enum MoodMessage {
    Update {
        label: MoodLabel,
        features: BandPowers,
        window_secs: f64,
    },
    Stopped,
}
