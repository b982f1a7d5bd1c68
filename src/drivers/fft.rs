use rustfft::{num_complex::Complex64, FftPlanner};
use crate::types::BandPowers;
/// Inclusive frequency range in Hz.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandRange {
    pub low_hz: f64,
    pub high_hz: f64,
}
impl BandRange {
    pub const fn new(low_hz: f64, high_hz: f64) -> Self {
        Self { low_hz, high_hz }
    }
    pub fn contains(&self, freq_hz: f64) -> bool {
        self.low_hz <= freq_hz && freq_hz <= self.high_hz
    }
}
pub const ALPHA_BAND: BandRange = BandRange::new(8.0, 12.0);
pub const BETA_BAND: BandRange = BandRange::new(13.0, 30.0);
// Shares the 30 Hz edge with BETA_BAND; a bin at exactly 30 Hz counts in both.
pub const GAMMA_BAND: BandRange = BandRange::new(30.0, 45.0);
/// Guards the normalisation against an all-silent chunk.
pub const ENERGY_EPSILON: f64 = 1e-12;
/// One-sided power spectrum of a real signal.
#[derive(Clone, Debug)]
pub struct PowerSpectrum {
    pub frequencies_hz: Vec<f64>,
    pub power: Vec<f64>,
}
impl PowerSpectrum {
    /// Bins `k * fs / n` for `k = 0..=n/2`, power `|X_k|^2`.
    pub fn compute(samples: &[f64], sample_rate_hz: f64) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self {
                frequencies_hz: Vec::new(),
                power: Vec::new(),
            };
        }
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n);
        let mut buffer: Vec<Complex64> = samples.iter().map(|&v| Complex64::new(v, 0.0)).collect();
        fft.process(&mut buffer);
        let bins = n / 2 + 1;
        let resolution = sample_rate_hz / n as f64;
        let frequencies_hz = (0..bins).map(|k| k as f64 * resolution).collect();
        let power = buffer.iter().take(bins).map(|c| c.norm_sqr()).collect();
        Self {
            frequencies_hz,
            power,
        }
    }
    pub fn band_energy(&self, band: BandRange) -> f64 {
        self.frequencies_hz
            .iter()
            .zip(&self.power)
            .filter(|(freq, _)| band.contains(**freq))
            .map(|(_, p)| *p)
            .sum()
    }
}
/// Relative alpha/beta/gamma power of one chunk. Empty input gives all zeros.
pub fn compute_relative_bands(samples: &[f64], sample_rate_hz: f64) -> BandPowers {
    if samples.is_empty() {
        return BandPowers::ZERO;
    }
    let spectrum = PowerSpectrum::compute(samples, sample_rate_hz);
    let alpha = spectrum.band_energy(ALPHA_BAND);
    let beta = spectrum.band_energy(BETA_BAND);
    let gamma = spectrum.band_energy(GAMMA_BAND);
    let total = alpha + beta + gamma + ENERGY_EPSILON;
    BandPowers::new(alpha / total, beta / total, gamma / total)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::simulator::EegSimulator;
    use std::f64::consts::TAU;
    fn tone(freq_hz: f64, sample_rate_hz: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (TAU * freq_hz * i as f64 / sample_rate_hz).sin())
            .collect()
    }
    #[test]
    fn empty_chunk_is_all_zero() {
        assert_eq!(compute_relative_bands(&[], 128.0), BandPowers::ZERO);
        assert_eq!(compute_relative_bands(&[], 1.0), BandPowers::ZERO);
    }
    #[test]
    fn frequency_grid_matches_real_fft_layout() {
        let spectrum = PowerSpectrum::compute(&vec![0.0; 128], 128.0);
        assert_eq!(spectrum.frequencies_hz.len(), 65);
        assert_eq!(spectrum.frequencies_hz[10], 10.0);
        assert_eq!(spectrum.frequencies_hz.last().copied(), Some(64.0));
        let odd = PowerSpectrum::compute(&vec![0.0; 9], 9.0);
        assert_eq!(odd.frequencies_hz.len(), 5);
    }
    #[test]
    fn ratios_sum_to_one_for_simulated_chunks() {
        let mut sim = EegSimulator::new(128.0, Some(9)).unwrap();
        for k in 0..25 {
            if k % 7 == 3 {
                sim.trigger_artifact();
            }
            let chunk = sim.next_chunk(1.0);
            let bands = compute_relative_bands(&chunk.samples, 128.0);
            assert!((bands.sum() - 1.0).abs() < 1e-9, "sum {}", bands.sum());
            for v in bands.as_array() {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }
    #[test]
    fn pure_tones_land_in_their_band() {
        let alpha = compute_relative_bands(&tone(10.0, 128.0, 128), 128.0);
        assert!(alpha.alpha > 0.999);
        let beta = compute_relative_bands(&tone(20.0, 128.0, 128), 128.0);
        assert!(beta.beta > 0.999);
        let gamma = compute_relative_bands(&tone(40.0, 128.0, 128), 128.0);
        assert!(gamma.gamma > 0.999);
    }
    #[test]
    fn thirty_hz_bin_counts_in_beta_and_gamma() {
        let spectrum = PowerSpectrum::compute(&tone(30.0, 128.0, 128), 128.0);
        let beta = spectrum.band_energy(BETA_BAND);
        let gamma = spectrum.band_energy(GAMMA_BAND);
        assert!(beta > 0.0);
        assert!((beta - gamma).abs() < 1e-6 * beta);

        let bands = compute_relative_bands(&tone(30.0, 128.0, 128), 128.0);
        assert!((bands.beta - 0.5).abs() < 1e-6);
        assert!((bands.gamma - 0.5).abs() < 1e-6);
        assert!(bands.alpha < 1e-6);
    }
    #[test]
    fn band_edges_are_inclusive() {
        let at_eight = compute_relative_bands(&tone(8.0, 128.0, 128), 128.0);
        assert!(at_eight.alpha > 0.999);
        let at_forty_five = compute_relative_bands(&tone(45.0, 128.0, 128), 128.0);
        assert!(at_forty_five.gamma > 0.999);
    }
    #[test]
    fn silence_is_guarded_by_epsilon() {
        let bands = compute_relative_bands(&vec![0.0; 128], 128.0);
        assert_eq!(bands, BandPowers::ZERO);
        let dc = compute_relative_bands(&vec![3.0; 128], 128.0);
        assert!(dc.sum().is_finite());
    }
    #[test]
    fn input_is_left_untouched() {
        let chunk = tone(10.0, 128.0, 64);
        let copy = chunk.clone();
        let _ = compute_relative_bands(&chunk, 128.0);
        assert_eq!(chunk, copy);
    }
}
