// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Bit error rate versus SNR through the raw spreading/modulation chain.
//!
//! Bypasses the envelope so the measured BER is the channel's alone.

use milcodec_core::codec::masking::mean_power;
use milcodec_core::codec::{modulation, spreading};
use milcodec_core::{bit_error_rate, measure_snr_db};
use milcodec_core::{Codec, MaskTarget, Masker, SnrDb};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const BITS: usize = 2_000;

fn random_bits(seed: u64) -> Vec<u8> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..BITS).map(|_| rng.gen_range(0..2u8)).collect()
}

fn channel_ber(snr_db: f64, seed: u64) -> f64 {
    let codec = Codec::default();
    let bits = random_bits(seed);
    let chips = spreading::spread(&bits, codec.pn_code());
    let clean = modulation::modulate(&chips, codec.config());

    let mut noise_rng = ChaCha20Rng::seed_from_u64(seed + 1_000);
    let noisy = Masker::new(SnrDb::new(snr_db)).mix(&clean, MaskTarget::Noise, &mut noise_rng);
    bit_error_rate(&bits, &codec.demodulate_bits(&noisy))
}

/// BER averaged over several independent bit/noise seeds.
fn mean_ber(snr_db: f64) -> f64 {
    const TRIALS: u64 = 4;
    (0..TRIALS).map(|seed| channel_ber(snr_db, 100 + seed)).sum::<f64>() / TRIALS as f64
}

#[test]
fn ber_is_monotonic_in_snr() {
    let ber_10 = mean_ber(-10.0);
    let ber_20 = mean_ber(-20.0);
    let ber_30 = mean_ber(-30.0);

    assert!(ber_10 <= ber_20, "-10 dB: {ber_10}, -20 dB: {ber_20}");
    assert!(ber_20 <= ber_30, "-20 dB: {ber_20}, -30 dB: {ber_30}");
}

#[test]
fn ber_levels() {
    assert!(channel_ber(-10.0, 2) < 0.001);
    assert!(channel_ber(-20.0, 3) < 0.01);

    // Processing gain is ~15 dB; -30 dB leaves roughly 1 sigma per bit.
    let ber_30 = channel_ber(-30.0, 4);
    assert!(ber_30 > 0.03 && ber_30 < 0.25, "-30 dB: {ber_30}");
}

#[test]
fn snr_outside_range_is_clamped() {
    // -60 dB behaves like -30 dB, not like pure noise.
    let ber = channel_ber(-60.0, 4);
    assert!(ber < 0.25, "clamped BER {ber}");
    assert_eq!(ber, channel_ber(-30.0, 4));
}

#[test]
fn masked_signal_sits_at_requested_snr() {
    let codec = Codec::default();
    let bits = random_bits(9);
    let chips = spreading::spread(&bits[..200], codec.pn_code());
    let clean = modulation::modulate(&chips, codec.config());

    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let noisy = Masker::new(SnrDb::new(-20.0)).mix(&clean, MaskTarget::Noise, &mut rng);

    // noisy = k * (clean + noise), and P(clean + noise) = 101 * P(clean) at -20 dB.
    let scale = (101.0 * mean_power(&clean) / mean_power(&noisy)).sqrt() as f32;
    let rescaled: Vec<f32> = noisy.iter().map(|s| s * scale).collect();
    let measured = measure_snr_db(&clean, &rescaled);
    assert!((measured + 20.0).abs() < 0.5, "measured {measured} dB");
}
