// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # milcodec-core
//!
//! Pure-Rust covert audio codec. A text or binary payload is encrypted,
//! length-framed, spread with a 31-chip PN sequence, BPSK-modulated onto an
//! audio carrier and then hidden below the noise floor (or inside cover
//! audio) at -10 to -30 dB SNR. The receiver recovers it by coherent
//! correlation against the same PN code.
//!
//! All processing is deterministic given the random sources, and the
//! carrier oscillator uses [`det_math`] so waveforms are bit-identical
//! across platforms.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use milcodec_core::{encode, decode};
//!
//! let waveform = encode(b"HELLO", "passphrase", -20.0, 12_000.0, None).unwrap();
//! let payload = decode(&waveform, "passphrase", 12_000.0, 44_100).unwrap();
//! assert_eq!(payload, b"HELLO");
//! ```

pub mod det_math;
pub mod codec;

pub use codec::{encode, decode, Codec, CodecConfig, CodecError, MaskTarget, Masker, PnCode, SnrDb};
pub use codec::config::{
    DEFAULT_CARRIER_FREQ, DEFAULT_KDF_ITERATIONS, DEFAULT_SAMPLE_RATE, DEFAULT_SNR_DB, MAX_SNR_DB, MIN_SNR_DB,
};
pub use codec::analysis::{bit_error_rate, measure_snr_db};
pub use codec::pcm::{from_pcm16, to_pcm16};
