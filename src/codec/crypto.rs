// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Password-derived encryption envelope.
//!
//! Sealed blob layout (`MILCODEC_V2`):
//!
//! ```text
//! [11 bytes] magic "MILCODEC_V2"
//! [16 bytes] PBKDF2 salt
//! [12 bytes] ChaCha20 nonce
//! [N bytes ] ciphertext (same length as plaintext)
//! ```
//!
//! The key is PBKDF2-HMAC-SHA256 (100,000 iterations by default) over the
//! password and a fresh random salt. Encryption is raw IETF ChaCha20 with
//! block counter 0.
//!
//! There is no authentication tag. Opening with the wrong password
//! succeeds and returns unrelated bytes; callers must validate the
//! plaintext themselves (e.g. by attempting a UTF-8 decode).

use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::ChaCha20;
use hmac::Hmac;
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::codec::error::{CodecError, Result};

/// Format identifier at the start of every sealed blob.
pub const MAGIC: &[u8; 11] = b"MILCODEC_V2";
/// PBKDF2 salt length in bytes.
pub const SALT_LEN: usize = 16;
/// ChaCha20 nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// Derived key length in bytes.
pub const KEY_LEN: usize = 32;
/// Fixed header: magic(11) + salt(16) + nonce(12) = 39 bytes.
pub const HEADER_LEN: usize = MAGIC.len() + SALT_LEN + NONCE_LEN;

/// Derive the 32-byte ChaCha20 key from password + salt.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN], iterations: u32) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, iterations, &mut *key)
        .expect("HMAC accepts keys of any length");
    key
}

fn apply_keystream(key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN], data: &mut [u8]) {
    let mut cipher = ChaCha20::new(key.into(), nonce.into());
    cipher.apply_keystream(data);
}

/// Seal `plaintext` with a fresh salt and nonce from the thread-local CSPRNG.
pub fn seal(plaintext: &[u8], password: &str, iterations: u32) -> Vec<u8> {
    seal_with_rng(plaintext, password, iterations, &mut rand::thread_rng())
}

/// Seal `plaintext`, drawing salt and nonce from `rng`.
///
/// `rng` must be cryptographically secure; it is never used for anything
/// but the salt and nonce.
pub fn seal_with_rng<R: RngCore + CryptoRng + ?Sized>(
    plaintext: &[u8],
    password: &str,
    iterations: u32,
    rng: &mut R,
) -> Vec<u8> {
    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);

    seal_with(plaintext, password, iterations, &salt, &nonce)
}

/// Seal with caller-provided salt and nonce.
///
/// Reusing a (password, salt, nonce) triple for two plaintexts leaks their
/// XOR. Only fixed test vectors should call this directly.
pub fn seal_with(
    plaintext: &[u8],
    password: &str,
    iterations: u32,
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Vec<u8> {
    let key = derive_key(password, salt, iterations);

    let mut blob = Vec::with_capacity(HEADER_LEN + plaintext.len());
    blob.extend_from_slice(MAGIC);
    blob.extend_from_slice(salt);
    blob.extend_from_slice(nonce);
    blob.extend_from_slice(plaintext);

    apply_keystream(&key, nonce, &mut blob[HEADER_LEN..]);
    blob
}

/// Parsed view of a sealed blob.
pub struct SealedParts<'a> {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: &'a [u8],
}

/// Split a sealed blob into salt, nonce and ciphertext.
///
/// # Errors
/// - [`CodecError::BlobTooShort`] if `blob` is shorter than [`HEADER_LEN`].
/// - [`CodecError::MissingMagic`] if it does not start with [`MAGIC`].
pub fn parse_sealed(blob: &[u8]) -> Result<SealedParts<'_>> {
    if blob.len() < HEADER_LEN {
        // A short blob that is not even a magic prefix is reported as such.
        if !MAGIC.starts_with(blob) && !blob.starts_with(MAGIC) {
            return Err(CodecError::MissingMagic);
        }
        return Err(CodecError::BlobTooShort { len: blob.len() });
    }
    if !blob.starts_with(MAGIC) {
        return Err(CodecError::MissingMagic);
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&blob[MAGIC.len()..MAGIC.len() + SALT_LEN]);

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&blob[MAGIC.len() + SALT_LEN..HEADER_LEN]);

    Ok(SealedParts { salt, nonce, ciphertext: &blob[HEADER_LEN..] })
}

/// Open a sealed blob.
///
/// A wrong password is not detected: the result is simply wrong bytes of
/// the same length.
///
/// # Errors
/// Format errors from [`parse_sealed`].
pub fn open(blob: &[u8], password: &str, iterations: u32) -> Result<Vec<u8>> {
    let parts = parse_sealed(blob)?;
    let key = derive_key(password, &parts.salt, iterations);

    let mut plaintext = parts.ciphertext.to_vec();
    apply_keystream(&key, &parts.nonce, &mut plaintext);
    Ok(plaintext)
}
