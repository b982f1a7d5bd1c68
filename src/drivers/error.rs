use thiserror::Error;
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),
    #[error("sample rate mismatch: expected {expected}, got {actual}")]
    SampleRateMismatch { expected: f64, actual: f64 },
    #[error("analysis window must hold at least one sample: {samples} samples at {sample_rate_hz} Hz")]
    InvalidWindow { samples: usize, sample_rate_hz: f64 },
    #[error("smoothing coefficient must lie in (0, 1], got {0}")]
    InvalidSmoothing(f64),
    #[error("threshold `{name}` must be positive and finite, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("presenter failed: {0}")]
    Presenter(String),
}
impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::Presenter(value.to_string())
    }
}
impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::Presenter(value.to_string())
    }
}
