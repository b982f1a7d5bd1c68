use crate::drivers::error::PipelineError;
use crate::types::BandPowers;
pub const DEFAULT_SMOOTHING: f64 = 0.35;
/// Exponential moving average over band-power vectors.
#[derive(Clone, Debug)]
pub struct EmaSmoother {
    coeff: f64,
    state: Option<BandPowers>,
}
impl EmaSmoother {
    /// `coeff` weights the newest observation and must lie in (0, 1].
    pub fn new(coeff: f64) -> Result<Self, PipelineError> {
        if !(coeff > 0.0 && coeff <= 1.0) {
            return Err(PipelineError::InvalidSmoothing(coeff));
        }
        Ok(Self { coeff, state: None })
    }
    #[cfg(test)]
    pub fn state(&self) -> Option<BandPowers> {
        self.state
    }
    pub fn update(&mut self, observation: BandPowers) -> BandPowers {
        let next = match self.state {
            None => observation,
            Some(prev) => prev.blend(&observation, self.coeff),
        };
        self.state = Some(next);
        next
    }
    #[cfg(test)]
    pub fn reset(&mut self) {
        self.state = None;
    }
}
impl Default for EmaSmoother {
    fn default() -> Self {
        Self {
            coeff: DEFAULT_SMOOTHING,
            state: None,
        }
    }
}
