// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Encode/decode orchestration.
//!
//! Encode: seal -> frame -> spread -> modulate -> mask.
//! Decode: demodulate -> correlate -> extract -> open.
//!
//! Every call is a pure function of its inputs plus the two injected
//! random sources; a [`Codec`] holds only immutable configuration and can
//! be shared across threads.

use rand::{CryptoRng, Rng, RngCore};

use crate::codec::config::{CodecConfig, SnrDb, DEFAULT_SAMPLE_RATE};
use crate::codec::correlator;
use crate::codec::crypto::{self, HEADER_LEN};
use crate::codec::error::Result;
use crate::codec::frame::{self, LENGTH_PREFIX_BYTES};
use crate::codec::masking::{MaskTarget, Masker};
use crate::codec::modulation;
use crate::codec::pn::PnCode;
use crate::codec::spreading;

/// A configured DSSS codec.
#[derive(Debug, Clone)]
pub struct Codec {
    config: CodecConfig,
    pn: PnCode,
}

impl Default for Codec {
    fn default() -> Self {
        Self { config: CodecConfig::default(), pn: PnCode::default() }
    }
}

impl Codec {
    /// Build a codec from a validated configuration and the reference PN code.
    ///
    /// # Errors
    /// [`CodecError::InvalidConfig`](crate::CodecError::InvalidConfig) from
    /// [`CodecConfig::validate`].
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, pn: PnCode::default() })
    }

    /// Replace the spreading code. Both ends must use the same one.
    pub fn with_pn_code(mut self, pn: PnCode) -> Self {
        self.pn = pn;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn pn_code(&self) -> &PnCode {
        &self.pn
    }

    /// Samples an encode produces for a plaintext of `plaintext_len` bytes.
    ///
    /// Saturates at `usize::MAX` for lengths no waveform could hold.
    pub fn required_samples(&self, plaintext_len: usize) -> usize {
        (LENGTH_PREFIX_BYTES + HEADER_LEN)
            .saturating_add(plaintext_len)
            .saturating_mul(8)
            .saturating_mul(self.config.samples_per_bit())
    }

    /// Largest plaintext whose whole frame fits in `carrier_len` samples.
    pub fn capacity_bytes(&self, carrier_len: usize) -> usize {
        let bits = carrier_len / self.config.samples_per_bit().max(1);
        (bits / 8).saturating_sub(LENGTH_PREFIX_BYTES + HEADER_LEN)
    }

    /// Frame, spread and modulate raw bytes. No encryption, no masking.
    pub fn modulate_frame(&self, payload: &[u8]) -> Result<Vec<f32>> {
        let bits = frame::frame(payload)?;
        let chips = spreading::spread(&bits, &self.pn);
        Ok(modulation::modulate(&chips, &self.config))
    }

    /// Hard bit decisions for every complete bit window of `waveform`.
    pub fn demodulate_bits(&self, waveform: &[f32]) -> Vec<u8> {
        correlator::demodulate(waveform, &self.config, &self.pn)
    }

    /// Demodulate and strip the length prefix. Inverse of [`Codec::modulate_frame`].
    ///
    /// # Errors
    /// Format errors from [`frame::extract`].
    pub fn demodulate_frame(&self, waveform: &[f32]) -> Result<Vec<u8>> {
        frame::extract(&self.demodulate_bits(waveform))
    }

    /// Encrypt and hide `payload`, using the thread-local CSPRNG for the
    /// envelope and for the masking noise.
    pub fn encode(
        &self,
        payload: &[u8],
        password: &str,
        snr: SnrDb,
        target: MaskTarget<'_>,
    ) -> Result<Vec<f32>> {
        self.encode_with_rng(payload, password, snr, target, &mut rand::thread_rng(), &mut rand::thread_rng())
    }

    /// Encrypt and hide `payload` with explicit random sources.
    ///
    /// `secure_rng` only produces the salt and nonce. `noise_rng` only
    /// produces masking noise and may be a seeded, non-cryptographic RNG.
    pub fn encode_with_rng<S, N>(
        &self,
        payload: &[u8],
        password: &str,
        snr: SnrDb,
        target: MaskTarget<'_>,
        secure_rng: &mut S,
        noise_rng: &mut N,
    ) -> Result<Vec<f32>>
    where
        S: RngCore + CryptoRng + ?Sized,
        N: Rng + ?Sized,
    {
        let sealed = crypto::seal_with_rng(payload, password, self.config.kdf_iterations, secure_rng);
        let modulated = self.modulate_frame(&sealed)?;
        let waveform = Masker::new(snr).mix(&modulated, target, noise_rng);

        tracing::debug!(
            payload_bytes = payload.len(),
            sealed_bytes = sealed.len(),
            samples = waveform.len(),
            snr_db = snr.db(),
            "encoded payload"
        );
        Ok(waveform)
    }

    /// Recover the plaintext from `waveform`.
    ///
    /// A wrong password or a carrier/sample-rate mismatch is not an error:
    /// it returns wrong bytes (or a format error if the length prefix or
    /// magic came out garbled).
    ///
    /// # Errors
    /// Format errors from [`frame::extract`] and [`crypto::open`].
    pub fn decode(&self, waveform: &[f32], password: &str) -> Result<Vec<u8>> {
        let sealed = self.demodulate_frame(waveform)?;
        let plaintext = crypto::open(&sealed, password, self.config.kdf_iterations)?;

        tracing::debug!(samples = waveform.len(), plaintext_bytes = plaintext.len(), "decoded payload");
        Ok(plaintext)
    }
}

/// Encode `payload` at the default 44.1 kHz sample rate.
///
/// `snr_db` is clamped to [-30, -10]. With `carrier_audio` the signal is
/// embedded in that audio; otherwise it is masked in Gaussian noise.
///
/// # Errors
/// [`CodecError::InvalidConfig`](crate::CodecError::InvalidConfig) if
/// `carrier_freq` is not below Nyquist.
pub fn encode(
    payload: &[u8],
    password: &str,
    snr_db: f64,
    carrier_freq: f64,
    carrier_audio: Option<&[f32]>,
) -> Result<Vec<f32>> {
    let codec = Codec::new(
        CodecConfig::default()
            .with_carrier_freq(carrier_freq)
            .with_sample_rate(DEFAULT_SAMPLE_RATE),
    )?;
    let target = match carrier_audio {
        Some(cover) => MaskTarget::Carrier(cover),
        None => MaskTarget::Noise,
    };
    codec.encode(payload, password, SnrDb::new(snr_db), target)
}

/// Decode a waveform produced by [`encode`] (or [`Codec::encode`]) with the
/// given carrier frequency and sample rate.
///
/// # Errors
/// [`CodecError::InvalidConfig`](crate::CodecError::InvalidConfig) for an
/// unusable carrier/sample rate, format errors for a garbled frame.
pub fn decode(waveform: &[f32], password: &str, carrier_freq: f64, sample_rate: u32) -> Result<Vec<u8>> {
    let codec = Codec::new(
        CodecConfig::default()
            .with_carrier_freq(carrier_freq)
            .with_sample_rate(sample_rate),
    )?;
    codec.decode(waveform, password)
}
