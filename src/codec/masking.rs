// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Burying the modulated signal at a target SNR.
//!
//! Two targets share one scaling rule, `amplitude = sqrt(reference_power * ratio)`:
//!
//! - [`MaskTarget::Noise`]: Gaussian noise with
//!   `std = sqrt(signal_power / snr_linear)` is added to the signal, then the
//!   sum is rescaled so its peak is exactly [`NOISE_HEADROOM`].
//! - [`MaskTarget::Carrier`]: the signal is scaled by
//!   `sqrt(carrier_power * snr_linear)` and added into a copy of existing
//!   audio. A signal longer than the carrier is truncated; carrier audio past
//!   the signal is untouched. The result is rescaled to [`CARRIER_HEADROOM`]
//!   only if its peak exceeds 1.0.
//!
//! Noise comes from an ordinary caller-supplied RNG, never from the secure
//! source used for salts and nonces.

use rand::Rng;

use crate::codec::config::SnrDb;
use crate::det_math::det_sincos;

/// Peak amplitude after noise masking.
pub const NOISE_HEADROOM: f32 = 0.95;
/// Peak amplitude after carrier embedding, when rescaling is needed.
pub const CARRIER_HEADROOM: f32 = 0.99;

/// Substitute for a zero reference power.
const POWER_FLOOR: f64 = 1e-9;

/// Where the modulated signal is hidden.
#[derive(Debug, Clone, Copy)]
pub enum MaskTarget<'a> {
    /// Synthesized Gaussian noise.
    Noise,
    /// Existing cover audio (mono samples in [-1, 1]).
    Carrier(&'a [f32]),
}

/// Mean of squared samples; 0 for an empty slice.
pub fn mean_power(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&s| s as f64 * s as f64).sum::<f64>() / samples.len() as f64
}

/// Largest absolute sample value.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |m, &s| m.max(s.abs()))
}

/// Scale `samples` so the peak equals `target`. Silence is left as is.
pub fn normalize_peak(samples: &mut [f32], target: f32) {
    let p = peak(samples);
    if p > 0.0 {
        let gain = target / p;
        for s in samples.iter_mut() {
            *s *= gain;
        }
    }
}

/// `len` samples of zero-mean Gaussian noise (Box-Muller).
pub fn gaussian_noise<R: Rng + ?Sized>(rng: &mut R, len: usize, std_dev: f64) -> Vec<f32> {
    let mut noise = Vec::with_capacity(len + 1);
    while noise.len() < len {
        // u1 in (0, 1] keeps ln() finite
        let u1 = 1.0 - rng.gen::<f64>();
        let u2 = rng.gen::<f64>();
        let r = (-2.0 * u1.ln()).sqrt() * std_dev;
        let (s, c) = det_sincos(2.0 * std::f64::consts::PI * u2);
        noise.push((r * c) as f32);
        noise.push((r * s) as f32);
    }
    noise.truncate(len);
    noise
}

fn relative_amplitude(reference_power: f64, power_ratio: f64) -> f64 {
    (reference_power.max(POWER_FLOOR) * power_ratio).sqrt()
}

/// Mixes a modulated signal into noise or cover audio at a fixed SNR.
#[derive(Debug, Clone, Copy, Default)]
pub struct Masker {
    snr: SnrDb,
}

impl Masker {
    pub fn new(snr: SnrDb) -> Self {
        Self { snr }
    }

    pub fn snr(&self) -> SnrDb {
        self.snr
    }

    /// Hide `modulated` in `target`.
    ///
    /// `rng` is only drawn from for [`MaskTarget::Noise`].
    pub fn mix<R: Rng + ?Sized>(&self, modulated: &[f32], target: MaskTarget<'_>, rng: &mut R) -> Vec<f32> {
        match target {
            MaskTarget::Noise => self.mask_with_noise(modulated, rng),
            MaskTarget::Carrier(cover) => self.embed_in_carrier(modulated, cover),
        }
    }

    fn mask_with_noise<R: Rng + ?Sized>(&self, modulated: &[f32], rng: &mut R) -> Vec<f32> {
        let noise_std = relative_amplitude(mean_power(modulated), 1.0 / self.snr.linear());
        let noise = gaussian_noise(rng, modulated.len(), noise_std);

        let mut masked: Vec<f32> = modulated.iter().zip(noise.iter()).map(|(&s, &n)| s + n).collect();
        normalize_peak(&mut masked, NOISE_HEADROOM);

        tracing::debug!(snr_db = self.snr.db(), noise_std, samples = masked.len(), "masked signal in noise");
        masked
    }

    fn embed_in_carrier(&self, modulated: &[f32], cover: &[f32]) -> Vec<f32> {
        let amplitude = relative_amplitude(mean_power(cover), self.snr.linear()) as f32;
        let overlap = modulated.len().min(cover.len());
        if overlap < modulated.len() {
            tracing::debug!(
                signal = modulated.len(),
                carrier = cover.len(),
                "carrier shorter than signal, truncating"
            );
        }

        let mut output = cover.to_vec();
        for (out, &s) in output[..overlap].iter_mut().zip(modulated.iter()) {
            *out += s * amplitude;
        }
        if peak(&output) > 1.0 {
            normalize_peak(&mut output, CARRIER_HEADROOM);
        }

        tracing::debug!(snr_db = self.snr.db(), amplitude, samples = output.len(), "embedded signal in carrier");
        output
    }
}
