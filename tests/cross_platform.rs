// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Cross-platform determinism tests.
//!
//! The carrier oscillator runs on `det_math`, the PN code is a fixed table,
//! and the envelope is a pure function of (password, salt, nonce). Pinning
//! their outputs here means a waveform encoded on one platform decodes on
//! every other.
//!
//! If any pinned value changes, cross-platform encode/decode is broken.

use milcodec_core::codec::crypto::{self, HEADER_LEN, MAGIC};
use milcodec_core::codec::modulation::{self, Carrier};
use milcodec_core::codec::spreading;
use milcodec_core::det_math::det_sin;
use milcodec_core::{CodecConfig, PnCode, DEFAULT_KDF_ITERATIONS};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn pin_pn_code() {
    let expected = "1111100011011101010000100101100";
    let chips: String = PnCode::default()
        .chips()
        .iter()
        .map(|&c| if c > 0.0 { '1' } else { '0' })
        .collect();
    assert_eq!(chips, expected);
}

#[test]
fn pin_carrier_samples() {
    let carrier = Carrier::new(12_000.0, 44_100);
    let expected = [
        (0usize, 0.0f64),
        (1, 0.990366961494838),
        (2, -0.27426751067493077),
        (3, -0.9144126230158125),
        (4, 0.5275005885087654),
    ];
    for (n, want) in expected {
        let got = carrier.sample(n);
        assert!((got - want).abs() < 1e-12, "n={n}: {got} vs {want}");
    }
}

#[test]
fn pin_modulated_bit() {
    let config = CodecConfig::default();
    let chips = spreading::spread(&[1], &PnCode::default());
    let wave = modulation::modulate(&chips, &config);
    assert_eq!(wave.len(), 31 * 44);

    // Chip 0 is +1; chips 5 and 30 are -1.
    assert!((wave[1] - 0.990_366_96).abs() < 1e-6);
    assert!((wave[220] - 0.754_475_85).abs() < 1e-6);
    assert!((wave[1363] - 0.664_352_28).abs() < 1e-6);
}

#[test]
fn carrier_phase_survives_long_signals() {
    // One hour in, the cycle-reduced phase must still match a direct computation.
    let carrier = Carrier::new(12_000.0, 44_100);
    let n = 44_100 * 3_600 + 1;
    let cycles = 12_000.0 * n as f64 / 44_100.0;
    let want = det_sin(2.0 * std::f64::consts::PI * (cycles - cycles.floor()));
    assert_eq!(carrier.sample(n), want);
    assert!((carrier.sample(n) - carrier.sample(1)).abs() < 1e-6);
}

#[test]
fn pin_envelope_known_answer() {
    let salt: [u8; 16] = core::array::from_fn(|i| i as u8);
    let nonce: [u8; 12] = core::array::from_fn(|i| i as u8);
    let blob = crypto::seal_with(b"HELLO", "correct horse", DEFAULT_KDF_ITERATIONS, &salt, &nonce);

    assert_eq!(blob.len(), HEADER_LEN + 5);
    assert_eq!(&blob[..MAGIC.len()], MAGIC);
    assert_eq!(&blob[11..27], &salt);
    assert_eq!(&blob[27..39], &nonce);
    assert_eq!(hex(&blob[HEADER_LEN..]), "a041482525");

    let opened = crypto::open(&blob, "correct horse", DEFAULT_KDF_ITERATIONS).unwrap();
    assert_eq!(opened, b"HELLO");
}

#[test]
fn pin_key_derivation() {
    let key = crypto::derive_key("pw", &[7; 16], 1_000);
    assert_eq!(hex(&key[..]), "1d15c9ed756cbfcb7d3c55f10a13b607c1f7ed045210e461a9ae9236b1f83201");
}
