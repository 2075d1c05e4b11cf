// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Length-prefixed bit framing.
//!
//! ```text
//! [4 bytes ] payload length N (big-endian u32)
//! [N bytes ] payload (normally a sealed blob)
//! ```
//!
//! The frame is expanded MSB-first into one bit per element before
//! spreading. On the way back, [`extract`] reads the prefix and keeps
//! exactly `N` bytes; any trailing bits (e.g. from carrier audio longer
//! than the message) are ignored.

use crate::codec::error::{CodecError, Result};

/// Size of the length prefix in bytes.
pub const LENGTH_PREFIX_BYTES: usize = 4;
/// Size of the length prefix in bits.
pub const LENGTH_PREFIX_BITS: usize = LENGTH_PREFIX_BYTES * 8;

/// Prepend the big-endian length prefix to `payload`.
///
/// # Errors
/// [`CodecError::PayloadTooLarge`] if `payload.len()` does not fit in a u32.
pub fn frame_bytes(payload: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(payload.len())
        .map_err(|_| CodecError::PayloadTooLarge { len: payload.len() })?;

    let mut framed = Vec::with_capacity(LENGTH_PREFIX_BYTES + payload.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(payload);
    Ok(framed)
}

/// Frame `payload` and expand it to bits (MSB first).
pub fn frame(payload: &[u8]) -> Result<Vec<u8>> {
    Ok(bytes_to_bits(&frame_bytes(payload)?))
}

/// Read the length prefix from `bits` and return the payload it declares.
///
/// Never reads past the end of `bits`: a prefix that claims more data than
/// is present is an error, not a short read.
///
/// # Errors
/// - [`CodecError::MissingLengthHeader`] if fewer than 32 bits are given.
/// - [`CodecError::FrameTruncated`] if fewer than `N * 8` bits follow the prefix.
pub fn extract(bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() < LENGTH_PREFIX_BITS {
        return Err(CodecError::MissingLengthHeader { available_bits: bits.len() });
    }

    let header = bits_to_bytes(&bits[..LENGTH_PREFIX_BITS]);
    let declared = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;

    let body = &bits[LENGTH_PREFIX_BITS..];
    let available = body.len() / 8;
    if declared > available {
        return Err(CodecError::FrameTruncated { declared_bytes: declared, available_bytes: available });
    }

    Ok(bits_to_bytes(&body[..declared * 8]))
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((bits.len() + 7) / 8);
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}
