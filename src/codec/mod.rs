// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Covert audio transport: DSSS spreading, BPSK modulation and
//! low-SNR masking of an encrypted, length-framed payload.
//!
//! The stages, in encode order:
//!
//! - [`crypto`]: PBKDF2-HMAC-SHA256 key, ChaCha20 keystream, `MILCODEC_V2` envelope.
//! - [`frame`]: 32-bit big-endian length prefix, MSB-first bit stream.
//! - [`spreading`]: each bit becomes the 31-chip [`PnCode`] or its inverse.
//! - [`modulation`]: chips are held for one chip period and multiplied by the carrier.
//! - [`masking`]: the modulated signal is buried in noise or cover audio.
//!
//! Decode runs [`correlator`] (coherent mix-down and PN correlation), then
//! [`frame::extract`] and [`crypto::open`]. [`pcm`] and [`analysis`] are
//! helpers for getting audio in and out and for measuring a channel.

pub mod error;
pub mod config;
pub mod pn;
pub mod crypto;
pub mod frame;
pub mod spreading;
pub mod modulation;
pub mod correlator;
pub mod masking;
pub mod pcm;
pub mod analysis;
mod pipeline;

pub use config::{CodecConfig, SnrDb};
pub use error::{CodecError, Result};
pub use masking::{MaskTarget, Masker};
pub use pipeline::{decode, encode, Codec};
pub use pn::{PnCode, SPREADING_FACTOR};
