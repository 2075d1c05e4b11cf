// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Pseudo-noise spreading code.
//!
//! A fixed 31-chip ±1 sequence. Encoder and receiver must use the same
//! code; it is a value passed into the spreader and correlator rather than
//! shared global state.

/// Chips per bit (length of the PN code).
pub const SPREADING_FACTOR: usize = 31;

/// The `MILCODEC_V2` spreading sequence as 0/1 bits (0 maps to -1).
const REFERENCE_BITS: [u8; SPREADING_FACTOR] = [
    1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 0, 1, 1, 1, 0, 1,
    0, 1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 1, 1, 0, 0,
];

/// A 31-chip spreading code with values in {-1, +1}.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PnCode {
    chips: [f32; SPREADING_FACTOR],
}

impl PnCode {
    /// Build a code from 0/1 bits; any non-zero value counts as 1.
    pub fn from_bits(bits: &[u8; SPREADING_FACTOR]) -> Self {
        let mut chips = [0.0f32; SPREADING_FACTOR];
        for (chip, &bit) in chips.iter_mut().zip(bits.iter()) {
            *chip = if bit != 0 { 1.0 } else { -1.0 };
        }
        Self { chips }
    }

    pub fn chips(&self) -> &[f32; SPREADING_FACTOR] {
        &self.chips
    }

    /// Dot product of `values` (one per chip) against the code.
    pub fn correlate(&self, values: &[f32; SPREADING_FACTOR]) -> f64 {
        self.chips
            .iter()
            .zip(values.iter())
            .map(|(&c, &v)| c as f64 * v as f64)
            .sum()
    }
}

impl Default for PnCode {
    fn default() -> Self {
        Self::from_bits(&REFERENCE_BITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_code_is_balanced() {
        let pn = PnCode::default();
        // 16 ones and 15 zeros
        let sum: f32 = pn.chips().iter().sum();
        assert_eq!(sum, 1.0);
        assert!(pn.chips().iter().all(|&c| c == 1.0 || c == -1.0));
    }

    #[test]
    fn reference_code_pinned() {
        let pn = PnCode::default();
        let head: Vec<f32> = pn.chips()[..8].to_vec();
        assert_eq!(head, vec![1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0]);
        assert_eq!(pn.chips()[30], -1.0);
    }

    #[test]
    fn self_correlation_peaks() {
        let pn = PnCode::default();
        assert_eq!(pn.correlate(pn.chips()), SPREADING_FACTOR as f64);
        let mut inverted = *pn.chips();
        for c in inverted.iter_mut() {
            *c = -*c;
        }
        assert_eq!(pn.correlate(&inverted), -(SPREADING_FACTOR as f64));
    }

    #[test]
    fn periodic_autocorrelation_is_two_valued() {
        let pn = PnCode::default();
        for shift in 1..SPREADING_FACTOR {
            let mut rotated = [0.0f32; SPREADING_FACTOR];
            for i in 0..SPREADING_FACTOR {
                rotated[i] = pn.chips()[(i + shift) % SPREADING_FACTOR];
            }
            // m-sequence: every cyclic shift correlates to exactly -1
            assert_eq!(pn.correlate(&rotated), -1.0, "shift {shift}");
        }
    }
}
