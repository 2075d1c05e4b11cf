// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Direct-sequence spreading.
//!
//! Each bit becomes one copy of the PN code: `+PN` for a 1, `-PN` for a 0.
//! The receiver's correlation averages uncorrelated noise over all 31
//! chips, which is where the processing gain comes from.

use crate::codec::pn::{PnCode, SPREADING_FACTOR};

/// Spread `bits` (0/1, any non-zero counts as 1) into a chip stream of
/// length `bits.len() * 31`.
pub fn spread(bits: &[u8], pn: &PnCode) -> Vec<f32> {
    let mut chips = Vec::with_capacity(bits.len() * SPREADING_FACTOR);
    for &bit in bits {
        let sign = if bit != 0 { 1.0 } else { -1.0 };
        chips.extend(pn.chips().iter().map(|&c| c * sign));
    }
    chips
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_is_bits_times_31() {
        let pn = PnCode::default();
        assert_eq!(spread(&[], &pn).len(), 0);
        assert_eq!(spread(&[1, 0, 1], &pn).len(), 93);
    }

    #[test]
    fn one_is_code_zero_is_inverse() {
        let pn = PnCode::default();
        let chips = spread(&[1, 0], &pn);
        assert_eq!(&chips[..31], &pn.chips()[..]);
        for (a, b) in chips[31..].iter().zip(pn.chips().iter()) {
            assert_eq!(*a, -*b);
        }
    }

    #[test]
    fn custom_code_is_used() {
        let pn = PnCode::from_bits(&[1; SPREADING_FACTOR]);
        let chips = spread(&[0], &pn);
        assert!(chips.iter().all(|&c| c == -1.0));
    }
}
