use log::debug;
use crate::config::PipelineConfig;
use crate::drivers::classifier::MoodClassifier;
use crate::drivers::error::PipelineError;
use crate::drivers::fft::compute_relative_bands;
use crate::drivers::smoother::EmaSmoother;
use crate::drivers::source::SignalSource;
use crate::types::MoodFrame;
/// One generate → analyze → smooth → classify chain.
pub struct MoodPipeline<S: SignalSource> {
    source: S,
    smoother: EmaSmoother,
    classifier: MoodClassifier,
    window_secs: f64,
}
impl<S: SignalSource> MoodPipeline<S> {
    pub fn new(source: S, config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let sample_rate_hz = source.sample_rate_hz();
        if sample_rate_hz != config.sample_rate_hz {
            return Err(PipelineError::SampleRateMismatch {
                expected: config.sample_rate_hz,
                actual: sample_rate_hz,
            });
        }
        Ok(Self {
            source,
            smoother: EmaSmoother::new(config.smoothing)?,
            classifier: MoodClassifier::new(config.alpha_threshold, config.beta_threshold)?,
            window_secs: config.window_secs(),
        })
    }
    pub fn window_secs(&self) -> f64 {
        self.window_secs
    }
    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }
    pub fn trigger_artifact(&mut self) {
        self.source.trigger_artifact();
    }
    /// Run one cycle. `None` once a finite source has nothing left.
    pub fn step(&mut self) -> Result<Option<MoodFrame>, PipelineError> {
        let Some(chunk) = self.source.next_chunk(self.window_secs) else {
            return Ok(None);
        };
        let raw = compute_relative_bands(&chunk.samples, chunk.sample_rate_hz);
        let smoothed = self.smoother.update(raw);
        let label = self.classifier.classify(&smoothed);
        debug!(
            "t={:.2}..{:.2}s raw=({:.3}, {:.3}, {:.3}) smoothed=({:.3}, {:.3}, {:.3}) -> {label}",
            chunk.start_secs,
            chunk.end_secs(),
            raw.alpha,
            raw.beta,
            raw.gamma,
            smoothed.alpha,
            smoothed.beta,
            smoothed.gamma,
        );
        Ok(Some(MoodFrame {
            label,
            raw,
            smoothed,
            window_secs: self.window_secs,
            chunk_start_secs: chunk.start_secs,
            has_artifact: chunk.has_artifact,
        }))
    }
}
