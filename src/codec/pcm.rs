// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! 16-bit PCM sample conversion.
//!
//! Persisted waveforms are conventionally mono 16-bit PCM. Reading and
//! writing the container (WAV etc.) is left to the caller; these helpers
//! only map between float samples and `i16`.

use crate::codec::masking::normalize_peak;

/// Peak level used when quantizing, leaving a little headroom below full scale.
pub const PCM_HEADROOM: f32 = 0.99;

const FULL_SCALE: f32 = 32_767.0;

/// Peak-normalize to [`PCM_HEADROOM`] and quantize to `i16`.
pub fn to_pcm16(samples: &[f32]) -> Vec<i16> {
    let mut scaled = samples.to_vec();
    normalize_peak(&mut scaled, PCM_HEADROOM);
    scaled
        .iter()
        .map(|&s| (s * FULL_SCALE).round().clamp(-FULL_SCALE, FULL_SCALE) as i16)
        .collect()
}

/// Map `i16` samples back to floats in [-1, 1].
pub fn from_pcm16(samples: &[i16]) -> Vec<f32> {
    samples.iter().map(|&s| (s as f32 / FULL_SCALE).max(-1.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_maps_to_headroom() {
        let pcm = to_pcm16(&[0.0, 0.25, -0.5]);
        assert_eq!(pcm[0], 0);
        assert_eq!(pcm[2], -32_439); // -0.99 * 32767
        assert_eq!(pcm[1], 16_220);
    }

    #[test]
    fn silence_stays_silent() {
        assert_eq!(to_pcm16(&[0.0; 4]), vec![0; 4]);
        assert!(to_pcm16(&[]).is_empty());
    }

    #[test]
    fn back_to_float() {
        let f = from_pcm16(&[0, 32_767, -32_768]);
        assert_eq!(f[0], 0.0);
        assert_eq!(f[1], 1.0);
        assert_eq!(f[2], -1.0);
    }
}
