//! Threshold rules mapping a smoothed band vector to a mood label.
//!
//! Rules are checked in order and the first match wins:
//! 1. CALM   `alpha > beta * alpha_thresh && alpha > gamma * 1.1`
//! 2. FOCUS  `beta > alpha * beta_thresh || beta + 0.8 * gamma > alpha * 1.25`
//! 3. STRESS `gamma > 0.5`
//! 4. UNKNOWN otherwise
//!
//! All comparisons are strict.
use crate::drivers::error::PipelineError;
use crate::types::{BandPowers, MoodLabel};

pub const DEFAULT_ALPHA_THRESHOLD: f64 = 1.2;
pub const DEFAULT_BETA_THRESHOLD: f64 = 1.2;

const CALM_GAMMA_RATIO: f64 = 1.1;
const FOCUS_GAMMA_WEIGHT: f64 = 0.8;
const FOCUS_COMBINED_RATIO: f64 = 1.25;
const STRESS_GAMMA_LEVEL: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoodClassifier {
    alpha_thresh: f64,
    beta_thresh: f64,
}

impl MoodClassifier {
    pub fn new(alpha_thresh: f64, beta_thresh: f64) -> Result<Self, PipelineError> {
        for (name, value) in [("alpha_threshold", alpha_thresh), ("beta_threshold", beta_thresh)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PipelineError::InvalidThreshold { name, value });
            }
        }
        Ok(Self {
            alpha_thresh,
            beta_thresh,
        })
    }

    pub fn classify(&self, bands: &BandPowers) -> MoodLabel {
        let BandPowers { alpha, beta, gamma } = *bands;
        if alpha > beta * self.alpha_thresh && alpha > gamma * CALM_GAMMA_RATIO {
            MoodLabel::Calm
        } else if beta > alpha * self.beta_thresh
            || (beta + FOCUS_GAMMA_WEIGHT * gamma) > alpha * FOCUS_COMBINED_RATIO
        {
            MoodLabel::Focus
        } else if gamma > STRESS_GAMMA_LEVEL {
            MoodLabel::Stress
        } else {
            MoodLabel::Unknown
        }
    }
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self {
            alpha_thresh: DEFAULT_ALPHA_THRESHOLD,
            beta_thresh: DEFAULT_BETA_THRESHOLD,
        }
    }
}
