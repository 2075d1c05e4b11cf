// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! End-to-end run of the codec with channel statistics.
//!
//! ```text
//! RUST_LOG=debug cargo run --example roundtrip -- "HELLO" passphrase -20
//! ```

use std::env;
use std::process::ExitCode;

use milcodec_core::codec::crypto;
use milcodec_core::codec::frame;
use milcodec_core::{bit_error_rate, measure_snr_db, to_pcm16, from_pcm16};
use milcodec_core::{Codec, MaskTarget, Masker, SnrDb};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    let message = args.get(1).map(String::as_str).unwrap_or("HELLO");
    let password = args.get(2).map(String::as_str).unwrap_or("passphrase");
    let snr = SnrDb::new(args.get(3).and_then(|s| s.parse().ok()).unwrap_or(-20.0));

    let codec = Codec::default();
    let config = codec.config();

    let sealed = crypto::seal(message.as_bytes(), password, config.kdf_iterations);
    let clean = match codec.modulate_frame(&sealed) {
        Ok(wave) => wave,
        Err(e) => {
            eprintln!("modulation failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    let masked = Masker::new(snr).mix(&clean, MaskTarget::Noise, &mut rand::thread_rng());

    // Through 16-bit PCM, as it would be written to a WAV file.
    let received = from_pcm16(&to_pcm16(&masked));

    println!("message       : {message:?} ({} bytes)", message.len());
    println!("sealed frame  : {} bytes", sealed.len() + frame::LENGTH_PREFIX_BYTES);
    println!(
        "waveform      : {} samples ({:.2} s at {} Hz)",
        received.len(),
        received.len() as f64 / config.sample_rate as f64,
        config.sample_rate
    );

    let scale = (clean.iter().zip(&received).map(|(&c, &r)| c as f64 * r as f64).sum::<f64>()
        / clean.iter().map(|&c| c as f64 * c as f64).sum::<f64>()) as f32;
    let reference: Vec<f32> = clean.iter().map(|&c| c * scale).collect();
    println!("target SNR    : {:.1} dB", snr.db());
    println!("measured SNR  : {:.1} dB", measure_snr_db(&reference, &received));

    let sent_bits = frame::frame(&sealed).unwrap_or_default();
    let got_bits = codec.demodulate_bits(&received);
    println!("bit error rate: {:.5}", bit_error_rate(&sent_bits, &got_bits));

    match codec.decode(&received, password) {
        Ok(plaintext) => {
            println!("decoded       : {:?}", String::from_utf8_lossy(&plaintext));
            if plaintext == message.as_bytes() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("decode failed: {e}");
            ExitCode::FAILURE
        }
    }
}
