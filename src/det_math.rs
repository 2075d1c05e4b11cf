// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Deterministic trig for the carrier oscillator, masking noise and
//! spectrum analysis.
//!
//! Transmitter and receiver each synthesize the carrier locally, so a
//! waveform encoded on one platform is demodulated against a replica built
//! on another. Everything here is built from IEEE 754 basic operations
//! (add, mul, floor, sqrt) instead of the platform libm, so both replicas
//! agree bit for bit.
//!
//! Polynomial coefficients are the FDLIBM `k_sin.c` / `k_cos.c` minimax
//! sets (< 1 ULP on [-π/4, π/4]).

use std::f64::consts::PI;

/// π/2 split for Cody-Waite reduction; the sum carries ~70 bits.
const PIO2_HI: f64 = f64::from_bits(0x3FF921FB54442D18);
const PIO2_LO: f64 = f64::from_bits(0x3C91A62633145C07);

/// sin(r) = r + r³·(S1 + r²·S2 + … + r¹⁰·S6)
const SIN_COEFFS: [f64; 6] = [
    f64::from_bits(0xBFC5555555555549),
    f64::from_bits(0x3F8111111110F8A6),
    f64::from_bits(0xBF2A01A019C161D5),
    f64::from_bits(0x3EC71DE357B1FE7D),
    f64::from_bits(0xBE5AE5E68A2B9CEB),
    f64::from_bits(0x3DE5D93A5ACFD57C),
];

/// cos(r) = 1 - r²/2 + r⁴·(C1 + r²·C2 + … + r¹⁰·C6)
const COS_COEFFS: [f64; 6] = [
    f64::from_bits(0x3FA5555555555549),
    f64::from_bits(0xBF56C16C16C15177),
    f64::from_bits(0x3EFA01A019CB1590),
    f64::from_bits(0xBE927E4F809C52AD),
    f64::from_bits(0x3E21EE9EBDB4B1C4),
    f64::from_bits(0xBDA8FAE9BE8838D4),
];

/// `coeffs[0] + z·(coeffs[1] + z·(…))`, innermost term first.
#[inline]
fn horner(coeffs: &[f64], z: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| c + z * acc)
}

#[inline]
fn sin_poly(r: f64) -> f64 {
    let z = r * r;
    let tail = horner(&SIN_COEFFS[1..], z);
    r + z * r * (SIN_COEFFS[0] + z * tail)
}

#[inline]
fn cos_poly(r: f64) -> f64 {
    let z = r * r;
    1.0 - (0.5 * z - z * (z * horner(&COS_COEFFS, z)))
}

/// Reduce `x` to `r` in [-π/4, π/4] plus its quadrant (0..=3).
/// `None` for NaN and infinities.
#[inline]
fn quadrant(x: f64) -> Option<(f64, u8)> {
    if !x.is_finite() {
        return None;
    }
    let n = (x * (2.0 / PI) + 0.5).floor();
    let r = (x - n * PIO2_HI) - n * PIO2_LO;
    Some((r, (n as i64 & 3) as u8))
}

/// Deterministic sine. NaN for non-finite input.
pub fn det_sin(x: f64) -> f64 {
    match quadrant(x) {
        Some((r, 0)) => sin_poly(r),
        Some((r, 1)) => cos_poly(r),
        Some((r, 2)) => -sin_poly(r),
        Some((r, _)) => -cos_poly(r),
        None => f64::NAN,
    }
}

/// Deterministic `(sin x, cos x)` sharing one range reduction.
pub fn det_sincos(x: f64) -> (f64, f64) {
    let Some((r, q)) = quadrant(x) else {
        return (f64::NAN, f64::NAN);
    };
    let (s, c) = (sin_poly(r), cos_poly(r));
    match q {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    }
}

/// Deterministic `sqrt(x² + y²)`, scaled so large inputs do not overflow.
pub fn det_hypot(x: f64, y: f64) -> f64 {
    let (a, b) = (x.abs(), y.abs());
    let (big, small) = if a >= b { (a, b) } else { (b, a) };
    if big == 0.0 {
        return 0.0;
    }
    let t = small / big;
    big * (1.0 + t * t).sqrt()
}
