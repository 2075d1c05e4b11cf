// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Coherent demodulation and PN correlation.
//!
//! 1. Multiply the waveform by a local carrier replica at the *assumed*
//!    frequency and sample rate (no carrier recovery).
//! 2. Cut the product into consecutive bit windows of
//!    `31 * samples_per_chip` samples, starting at sample 0 (no alignment
//!    search).
//! 3. Average each chip-sized sub-block, dot the 31 averages with the PN
//!    code, and decide 1 if the correlation is positive, else 0.
//!
//! A trailing partial window is dropped. Frequency or sample-rate mismatch
//! is not detected; it simply produces wrong bits.
//!
//! With the `parallel` feature the windows are correlated on the rayon
//! pool. Each window is independent so the output is identical.

use crate::codec::config::CodecConfig;
use crate::codec::modulation::Carrier;
use crate::codec::pn::{PnCode, SPREADING_FACTOR};

/// Multiply `waveform` sample-by-sample by the configured carrier.
pub fn mix_down(waveform: &[f32], config: &CodecConfig) -> Vec<f32> {
    let carrier = Carrier::from_config(config);
    waveform
        .iter()
        .enumerate()
        .map(|(n, &s)| (s as f64 * carrier.sample(n)) as f32)
        .collect()
}

/// Collapse one bit window back to one mean value per chip.
///
/// `window` must hold `31 * samples_per_chip` samples.
pub fn chip_means(window: &[f32], samples_per_chip: usize) -> [f32; SPREADING_FACTOR] {
    debug_assert_eq!(window.len(), SPREADING_FACTOR * samples_per_chip);
    let mut means = [0.0f32; SPREADING_FACTOR];
    for (mean, chunk) in means.iter_mut().zip(window.chunks_exact(samples_per_chip)) {
        let sum: f64 = chunk.iter().map(|&s| s as f64).sum();
        *mean = (sum / samples_per_chip as f64) as f32;
    }
    means
}

/// Correlation score of every complete bit window (positive leans to 1).
pub fn correlate(waveform: &[f32], config: &CodecConfig, pn: &PnCode) -> Vec<f64> {
    let samples_per_chip = config.samples_per_chip();
    let samples_per_bit = config.samples_per_bit();
    if samples_per_chip == 0 {
        return Vec::new();
    }

    let mixed = mix_down(waveform, config);
    let score = |window: &[f32]| pn.correlate(&chip_means(window, samples_per_chip));

    #[cfg(feature = "parallel")]
    let scores: Vec<f64> = {
        use rayon::prelude::*;
        mixed.par_chunks_exact(samples_per_bit).map(score).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let scores: Vec<f64> = mixed.chunks_exact(samples_per_bit).map(score).collect();

    tracing::trace!(samples = waveform.len(), windows = scores.len(), "correlated bit windows");
    scores
}

/// Hard bit decisions for every complete bit window.
pub fn demodulate(waveform: &[f32], config: &CodecConfig, pn: &PnCode) -> Vec<u8> {
    correlate(waveform, config, pn)
        .into_iter()
        .map(|score| u8::from(score > 0.0))
        .collect()
}
