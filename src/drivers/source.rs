#[cfg(test)]
use std::collections::VecDeque;
/// Contiguous window of single-channel samples.
#[derive(Clone, Debug)]
pub struct SignalChunk {
    pub start_secs: f64,
    pub duration_secs: f64,
    pub sample_rate_hz: f64,
    pub samples: Vec<f64>,
    pub has_artifact: bool,
}
impl SignalChunk {
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.duration_secs
    }
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    /// Largest absolute sample value together with its index.
    #[cfg(test)]
    pub fn peak(&self) -> Option<(usize, f64)> {
        self.samples
            .iter()
            .map(|v| v.abs())
            .enumerate()
            .fold(None, |best, (idx, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((idx, v)),
            })
    }
}
/// Trait representing something that can yield signal chunks on demand.
pub trait SignalSource {
    fn sample_rate_hz(&self) -> f64;
    /// `None` once a finite source is exhausted.
    fn next_chunk(&mut self, duration_secs: f64) -> Option<SignalChunk>;
    /// Request a one-shot transient in the next chunk. Sources that cannot
    /// inject artifacts ignore it.
    fn trigger_artifact(&mut self) {}
}
/// In-memory source for deterministic playback in tests.
#[cfg(test)]
pub struct ManualSource {
    sample_rate_hz: f64,
    elapsed_secs: f64,
    queue: VecDeque<Vec<f64>>,
}
#[cfg(test)]
impl ManualSource {
    pub fn new(sample_rate_hz: f64, chunks: impl IntoIterator<Item = Vec<f64>>) -> Self {
        Self {
            sample_rate_hz,
            elapsed_secs: 0.0,
            queue: chunks.into_iter().collect(),
        }
    }
}
#[cfg(test)]
impl SignalSource for ManualSource {
    fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }
    fn next_chunk(&mut self, duration_secs: f64) -> Option<SignalChunk> {
        let samples = self.queue.pop_front()?;
        let chunk = SignalChunk {
            start_secs: self.elapsed_secs,
            duration_secs,
            sample_rate_hz: self.sample_rate_hz,
            samples,
            has_artifact: false,
        };
        self.elapsed_secs += duration_secs;
        Some(chunk)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn manual_source_drains_in_order() {
        let mut source = ManualSource::new(4.0, vec![vec![1.0; 4], vec![-3.0, 2.0]]);
        let first = source.next_chunk(1.0).unwrap();
        let second = source.next_chunk(1.0).unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(second.start_secs, first.end_secs());
        assert_eq!(second.peak(), Some((0, 3.0)));
        assert!(source.next_chunk(1.0).is_none());
    }
}
