// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the codec.
//!
//! [`CodecError`] covers the explicit failures of the encode/decode
//! pipeline. Wrong passwords and carrier mismatches are *not* errors: the
//! stream cipher carries no authentication tag, so they surface as wrong
//! bytes instead.

use core::fmt;

/// Errors that can occur during encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The sealed blob does not start with the `MILCODEC_V2` magic.
    MissingMagic,
    /// The sealed blob is shorter than magic + salt + nonce.
    BlobTooShort { len: usize },
    /// Fewer than 32 bits were recovered, so the length prefix is missing.
    MissingLengthHeader { available_bits: usize },
    /// The length prefix declares more bytes than the recovered bits hold.
    FrameTruncated { declared_bytes: usize, available_bytes: usize },
    /// The payload does not fit the 32-bit length prefix.
    PayloadTooLarge { len: usize },
    /// A configuration value makes the codec unusable.
    InvalidConfig(&'static str),
}

impl CodecError {
    /// True for the malformed-input family (bad magic, short blob,
    /// missing or inconsistent length prefix).
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::MissingMagic
                | Self::BlobTooShort { .. }
                | Self::MissingLengthHeader { .. }
                | Self::FrameTruncated { .. }
        )
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMagic => write!(f, "not a Milcodec blob (magic header missing)"),
            Self::BlobTooShort { len } => {
                write!(f, "sealed blob too short: {len} bytes, header needs 39")
            }
            Self::MissingLengthHeader { available_bits } => {
                write!(f, "no length header: only {available_bits} bits recovered")
            }
            Self::FrameTruncated { declared_bytes, available_bytes } => write!(
                f,
                "frame truncated: header declares {declared_bytes} bytes, {available_bytes} available"
            ),
            Self::PayloadTooLarge { len } => {
                write!(f, "payload of {len} bytes exceeds the 32-bit length prefix")
            }
            Self::InvalidConfig(reason) => write!(f, "invalid codec configuration: {reason}"),
        }
    }
}

impl std::error::Error for CodecError {}

/// Convenience alias used throughout the codec.
pub type Result<T> = core::result::Result<T, CodecError>;
