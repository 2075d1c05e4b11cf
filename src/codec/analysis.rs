// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Measurement helpers for verifying a link: achieved SNR, a coarse
//! magnitude spectrum, and bit error rate.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::codec::masking::mean_power;
use crate::det_math::{det_hypot, det_sincos};

/// Largest number of leading samples the spectrum looks at.
pub const SPECTRUM_WINDOW: usize = 4096;

/// SNR in dB of `noisy` relative to `original`, over their common length.
///
/// Returns `f64::INFINITY` when the two are identical.
pub fn measure_snr_db(original: &[f32], noisy: &[f32]) -> f64 {
    let n = original.len().min(noisy.len());
    let original = &original[..n];
    let noise: Vec<f32> = noisy[..n].iter().zip(original.iter()).map(|(&y, &x)| y - x).collect();

    let noise_power = mean_power(&noise);
    if noise_power == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (mean_power(original) / noise_power).log10()
}

/// Magnitudes of the first `n_bins` DFT bins of the leading
/// [`SPECTRUM_WINDOW`] samples.
///
/// Bin `k` sits at `k * sample_rate / window_len` Hz. Fewer than `n_bins`
/// values come back if the window itself is shorter.
pub fn magnitude_spectrum(samples: &[f32], n_bins: usize) -> Vec<f64> {
    let window = &samples[..samples.len().min(SPECTRUM_WINDOW)];
    let len = window.len();

    (0..n_bins.min(len))
        .map(|k| {
            let mut acc = Complex64::new(0.0, 0.0);
            for (n, &x) in window.iter().enumerate() {
                // (k * n) mod len keeps the twiddle argument inside one turn
                let angle = -2.0 * PI * ((k * n) % len) as f64 / len as f64;
                let (s, c) = det_sincos(angle);
                acc += Complex64::new(c, s) * x as f64;
            }
            det_hypot(acc.re, acc.im)
        })
        .collect()
}

/// Fraction of `sent` bits that `received` got wrong.
///
/// Bits missing from the end of `received` count as errors. An empty
/// `sent` gives 0.0.
pub fn bit_error_rate(sent: &[u8], received: &[u8]) -> f64 {
    if sent.is_empty() {
        return 0.0;
    }
    let compared = sent.len().min(received.len());
    let flipped = sent.iter().zip(received.iter()).filter(|(a, b)| (*a & 1) != (*b & 1)).count();
    let missing = sent.len() - compared;
    (flipped + missing) as f64 / sent.len() as f64
}
