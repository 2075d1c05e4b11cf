// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! BPSK carrier modulation.
//!
//! The chip stream is held piecewise-constant for `samples_per_chip`
//! samples and multiplied by a sine carrier. The carrier starts at phase 0
//! on every call; no oscillator state survives between calls.

use std::f64::consts::PI;

use crate::codec::config::CodecConfig;
use crate::det_math::det_sin;

/// Sine oscillator at a fixed frequency and sample rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carrier {
    freq: f64,
    sample_rate: u32,
}

impl Carrier {
    pub fn new(freq: f64, sample_rate: u32) -> Self {
        Self { freq, sample_rate }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.carrier_freq, config.sample_rate)
    }

    /// Carrier value at sample index `n`: `sin(2π f n / fs)`.
    ///
    /// The phase is reduced to one cycle before the sine so long signals
    /// keep full precision.
    #[inline]
    pub fn sample(&self, n: usize) -> f64 {
        let cycles = self.freq * n as f64 / self.sample_rate as f64;
        let frac = cycles - cycles.floor();
        det_sin(2.0 * PI * frac)
    }

    /// First `len` carrier samples.
    pub fn replica(&self, len: usize) -> Vec<f32> {
        (0..len).map(|n| self.sample(n) as f32).collect()
    }
}

/// Hold each chip for `samples_per_chip` samples.
pub fn upsample(chips: &[f32], samples_per_chip: usize) -> Vec<f32> {
    let mut baseband = Vec::with_capacity(chips.len() * samples_per_chip);
    for &chip in chips {
        baseband.extend(std::iter::repeat(chip).take(samples_per_chip));
    }
    baseband
}

/// Upsample `chips` and multiply onto the configured carrier.
///
/// Output length is `chips.len() * samples_per_chip`.
pub fn modulate(chips: &[f32], config: &CodecConfig) -> Vec<f32> {
    let carrier = Carrier::from_config(config);
    let mut signal = upsample(chips, config.samples_per_chip());
    for (n, s) in signal.iter_mut().enumerate() {
        *s = (*s as f64 * carrier.sample(n)) as f32;
    }
    tracing::trace!(chips = chips.len(), samples = signal.len(), "modulated chip stream");
    signal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrier_starts_at_zero_phase() {
        let c = Carrier::new(12_000.0, 44_100);
        assert_eq!(c.sample(0), 0.0);
        let expected = (2.0 * PI * 12_000.0 / 44_100.0).sin();
        assert!((c.sample(1) - expected).abs() < 1e-12);
    }

    #[test]
    fn carrier_matches_direct_phase_far_out() {
        let c = Carrier::new(12_000.0, 44_100);
        let n = 1_000_003usize;
        let direct = (2.0 * PI * 12_000.0 * n as f64 / 44_100.0).sin();
        assert!((c.sample(n) - direct).abs() < 1e-6);
    }

    #[test]
    fn upsample_repeats() {
        assert_eq!(upsample(&[1.0, -1.0], 3), vec![1.0, 1.0, 1.0, -1.0, -1.0, -1.0]);
        assert!(upsample(&[], 44).is_empty());
    }

    #[test]
    fn modulate_length_and_sign() {
        let cfg = CodecConfig::default();
        let signal = modulate(&[1.0, -1.0], &cfg);
        assert_eq!(signal.len(), 88);
        let carrier = Carrier::from_config(&cfg).replica(88);
        for n in 0..44 {
            assert_eq!(signal[n], carrier[n]);
            assert_eq!(signal[44 + n], -carrier[44 + n]);
        }
    }

    #[test]
    fn modulate_is_stateless() {
        let cfg = CodecConfig::default();
        assert_eq!(modulate(&[1.0, -1.0, 1.0], &cfg), modulate(&[1.0, -1.0, 1.0], &cfg));
    }

    #[test]
    fn peak_amplitude_bounded() {
        let cfg = CodecConfig::default();
        let signal = modulate(&[1.0; 31], &cfg);
        assert!(signal.iter().all(|s| s.abs() <= 1.0));
    }
}
