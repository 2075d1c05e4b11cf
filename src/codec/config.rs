// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Session parameters shared by the encoder and the receiver.
//!
//! There is no in-band negotiation: both sides must construct the same
//! [`CodecConfig`] (sample rate, carrier frequency, chip duration, KDF
//! iterations) or decoding silently yields garbage.

use crate::codec::error::{CodecError, Result};
use crate::codec::pn::SPREADING_FACTOR;

/// Default audio sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default carrier frequency in Hz.
pub const DEFAULT_CARRIER_FREQ: f64 = 12_000.0;

/// Duration of one chip in seconds (1 ms).
pub const CHIP_DURATION_SECS: f64 = 0.001;

/// PBKDF2-HMAC-SHA256 iteration count of the `MILCODEC_V2` format.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Most deeply buried legal SNR.
pub const MIN_SNR_DB: f64 = -30.0;
/// Least deeply buried legal SNR.
pub const MAX_SNR_DB: f64 = -10.0;
/// SNR used when the caller does not pick one.
pub const DEFAULT_SNR_DB: f64 = -20.0;

/// Immutable codec configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodecConfig {
    /// Audio sample rate in Hz.
    pub sample_rate: u32,
    /// Carrier frequency in Hz. Must be below Nyquist.
    pub carrier_freq: f64,
    /// Chip duration in seconds.
    pub chip_duration: f64,
    /// PBKDF2 iterations for the password-derived key.
    pub kdf_iterations: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            carrier_freq: DEFAULT_CARRIER_FREQ,
            chip_duration: CHIP_DURATION_SECS,
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
        }
    }
}

impl CodecConfig {
    pub fn with_carrier_freq(mut self, carrier_freq: f64) -> Self {
        self.carrier_freq = carrier_freq;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_kdf_iterations(mut self, kdf_iterations: u32) -> Self {
        self.kdf_iterations = kdf_iterations;
        self
    }

    /// Audio samples per chip: `round(sample_rate * chip_duration)`.
    ///
    /// 44 at the default 44.1 kHz, 48 at 48 kHz.
    pub fn samples_per_chip(&self) -> usize {
        let spc = (self.sample_rate as f64 * self.chip_duration).round();
        if spc.is_finite() && spc > 0.0 { spc as usize } else { 0 }
    }

    /// Audio samples carrying one payload bit.
    pub fn samples_per_bit(&self) -> usize {
        SPREADING_FACTOR * self.samples_per_chip()
    }

    /// Check that the configuration can actually carry a signal.
    ///
    /// # Errors
    /// [`CodecError::InvalidConfig`] naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(CodecError::InvalidConfig("sample rate must be positive"));
        }
        if !self.carrier_freq.is_finite() || self.carrier_freq <= 0.0 {
            return Err(CodecError::InvalidConfig("carrier frequency must be positive and finite"));
        }
        if self.carrier_freq >= self.sample_rate as f64 / 2.0 {
            return Err(CodecError::InvalidConfig("carrier frequency must be below Nyquist"));
        }
        if !self.chip_duration.is_finite() || self.chip_duration <= 0.0 {
            return Err(CodecError::InvalidConfig("chip duration must be positive and finite"));
        }
        if self.samples_per_chip() == 0 {
            return Err(CodecError::InvalidConfig("chip shorter than one sample"));
        }
        if self.kdf_iterations == 0 {
            return Err(CodecError::InvalidConfig("KDF iteration count must be at least 1"));
        }
        Ok(())
    }
}

/// Target signal-to-noise ratio in dB, always inside [`MIN_SNR_DB`, `MAX_SNR_DB`].
///
/// Out-of-range requests are clamped, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SnrDb(f64);

impl SnrDb {
    /// Clamp `db` into the legal range. Non-finite input (NaN, ±∞) falls
    /// back to [`DEFAULT_SNR_DB`].
    pub fn new(db: f64) -> Self {
        if !db.is_finite() {
            return Self(DEFAULT_SNR_DB);
        }
        Self(db.clamp(MIN_SNR_DB, MAX_SNR_DB))
    }

    pub fn db(self) -> f64 {
        self.0
    }

    /// Power ratio `10^(dB/10)`.
    pub fn linear(self) -> f64 {
        10f64.powf(self.0 / 10.0)
    }
}

impl Default for SnrDb {
    fn default() -> Self {
        Self(DEFAULT_SNR_DB)
    }
}

impl From<f64> for SnrDb {
    fn from(db: f64) -> Self {
        Self::new(db)
    }
}
