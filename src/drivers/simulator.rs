//! Single-channel EEG-like signal synthesis.
//!
//! Each chunk is the sum of three rhythmic components (alpha 10 Hz, beta 20 Hz,
//! gamma 40 Hz), a slow 0.2 Hz baseline wander and white Gaussian noise. Phases
//! are redrawn for every chunk. A blink-like transient can be requested with
//! [`EegSimulator::trigger_artifact`]; it lands in the next chunk only.
use std::f64::consts::TAU;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::drivers::error::PipelineError;
use crate::drivers::source::{SignalChunk, SignalSource};

pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 250.0;

/// Sinusoidal component of the synthetic signal.
#[derive(Clone, Copy, Debug)]
struct Rhythm {
    freq_hz: f64,
    amplitude: f64,
}

// Draw order matters for seeded reproducibility: alpha, beta, gamma, baseline.
const RHYTHMS: [Rhythm; 4] = [
    Rhythm { freq_hz: 10.0, amplitude: 0.8 },
    Rhythm { freq_hz: 20.0, amplitude: 0.5 },
    Rhythm { freq_hz: 40.0, amplitude: 0.25 },
    Rhythm { freq_hz: 0.2, amplitude: 0.15 },
];
const NOISE_STD: f64 = 0.35;

const ARTIFACT_PEAK: f64 = 25.0;
const ARTIFACT_CENTER_FRACTION: f64 = 0.2;
const ARTIFACT_WIDTH_FRACTION: f64 = 0.02;

pub struct EegSimulator {
    sample_rate_hz: f64,
    elapsed_secs: f64,
    rng: StdRng,
    artifact_pending: bool,
}

impl EegSimulator {
    /// `seed = None` seeds from OS entropy.
    pub fn new(sample_rate_hz: f64, seed: Option<u64>) -> Result<Self, PipelineError> {
        if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
            return Err(PipelineError::InvalidSampleRate(sample_rate_hz));
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            sample_rate_hz,
            elapsed_secs: 0.0,
            rng,
            artifact_pending: false,
        })
    }

    #[cfg(test)]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    #[cfg(test)]
    pub fn artifact_pending(&self) -> bool {
        self.artifact_pending
    }

    pub fn trigger_artifact(&mut self) {
        self.artifact_pending = true;
    }

    /// Produce `floor(fs * duration_secs)` samples covering
    /// `[elapsed, elapsed + duration_secs)` and advance the time base.
    pub fn next_chunk(&mut self, duration_secs: f64) -> SignalChunk {
        let start_secs = self.elapsed_secs;
        if !(duration_secs.is_finite() && duration_secs > 0.0) {
            warn!("ignoring chunk request with duration {duration_secs}s");
            return SignalChunk {
                start_secs,
                duration_secs: 0.0,
                sample_rate_hz: self.sample_rate_hz,
                samples: Vec::new(),
                has_artifact: false,
            };
        }
        // fs * d is usually integral; absorb rounding error like 127.99999999999999.
        let n = (self.sample_rate_hz * duration_secs + 1e-9).floor() as usize;
        let step = duration_secs / n.max(1) as f64;

        let phases: [f64; 4] = std::array::from_fn(|_| self.rng.gen::<f64>() * TAU);
        let mut samples: Vec<f64> = (0..n)
            .map(|i| {
                let t = start_secs + i as f64 * step;
                RHYTHMS
                    .iter()
                    .zip(phases)
                    .map(|(r, phase)| r.amplitude * (TAU * r.freq_hz * t + phase).sin())
                    .sum::<f64>()
            })
            .collect();
        for sample in samples.iter_mut() {
            let z: f64 = self.rng.sample(StandardNormal);
            *sample += NOISE_STD * z;
        }

        let has_artifact = self.artifact_pending;
        if has_artifact {
            self.add_blink(&mut samples);
            self.artifact_pending = false;
        }

        self.elapsed_secs += duration_secs;
        SignalChunk {
            start_secs,
            duration_secs,
            sample_rate_hz: self.sample_rate_hz,
            samples,
            has_artifact,
        }
    }

    // Gaussian bump centred at 20% of the chunk. Not carried into the next chunk.
    fn add_blink(&mut self, samples: &mut [f64]) {
        let n = samples.len();
        let center = (ARTIFACT_CENTER_FRACTION * n as f64).floor();
        let sigma = (ARTIFACT_WIDTH_FRACTION * n as f64).floor().max(1.0);
        let sign = if self.rng.gen::<f64>() > 0.5 { 1.0 } else { -1.0 };
        info!("injecting blink artifact at sample {center} (sign {sign:+})");
        for (x, sample) in samples.iter_mut().enumerate() {
            let z = (x as f64 - center) / sigma;
            *sample += sign * ARTIFACT_PEAK * (-0.5 * z * z).exp();
        }
    }
}

impl Default for EegSimulator {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            elapsed_secs: 0.0,
            rng: StdRng::from_entropy(),
            artifact_pending: false,
        }
    }
}

impl SignalSource for EegSimulator {
    fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }
    fn next_chunk(&mut self, duration_secs: f64) -> Option<SignalChunk> {
        Some(EegSimulator::next_chunk(self, duration_secs))
    }
    fn trigger_artifact(&mut self) {
        EegSimulator::trigger_artifact(self);
    }
}
