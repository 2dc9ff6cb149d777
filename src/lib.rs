// Copyright 2019 Stichting Organism
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A textbook RSA cryptosystem: key generation, PKCS#1 v1.5 and OAEP/MGF1
//! padding, CRT decryption, and whole-file signing and verification.
//!
//! This crate is deliberately **not** constant-time, not side-channel
//! hardened, and not compatible with standard RSA key file formats — keys
//! are a raw concatenation of big-endian big integers (see [`codec`]). It
//! is a teaching-grade implementation of the algorithm, not a general crypto
//! library.
//!
//! The interactive menu a command-line front end would wrap this crate with
//! is out of scope; [`generate_keypair`], [`encrypt_file`], [`decrypt_file`],
//! [`sign_file`], and [`verify_file`] are the operations such a front end
//! would call.

#[macro_use]
extern crate lazy_static;

pub mod bigint;
pub mod codec;
pub mod config;
pub mod digest;
pub mod error;
pub mod keygen;
pub mod mgf1;
pub mod padding;
pub mod pipeline;
pub mod primes;
pub mod rng;
pub mod signing;

pub use codec::{decode_private_key, decode_public_key, encode_private_key, encode_public_key};
pub use config::RsaConfig;
pub use digest::{DigestProvider, Sha256Provider};
pub use error::{Result, RsaError};
pub use keygen::{PrivateKey, PublicKey, PUBLIC_EXPONENT};
pub use padding::PaddingKind;

/// The process-default CSPRNG every public entry point expects a caller to
/// pass by `&mut` when no deterministic seed is required.
pub use rand::rngs::OsRng;

use std::fs;
use std::path::Path;

use rand_core::RngCore;
use rug::Integer;

/// Generates a fresh RSA key pair per `config`.
pub fn generate_keypair(
    config: &RsaConfig,
    rng: &mut dyn RngCore,
) -> Result<(PublicKey, PrivateKey)> {
    keygen::generate_keypair(config.bits, config.mr_rounds, rng)
}

fn require_absent(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(RsaError::FileExists(path.to_path_buf()));
    }
    Ok(())
}

fn require_present(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(RsaError::FileMissing(path.to_path_buf()));
    }
    Ok(())
}

/// Writes a public key blob to `path`. Fails if `path` already exists.
pub fn write_public_key_file(path: &Path, public: &PublicKey) -> Result<()> {
    require_absent(path)?;
    let blob = codec::encode_public_key(&public.n)?;
    fs::write(path, blob)?;
    Ok(())
}

/// Writes a private key blob to `path`. Fails if `path` already exists.
pub fn write_private_key_file(path: &Path, private: &PrivateKey) -> Result<()> {
    require_absent(path)?;
    let blob =
        codec::encode_private_key(&private.d, &private.p, &private.q, &private.q_inv_mod_p)?;
    fs::write(path, blob)?;
    Ok(())
}

/// Reads a public key blob from `path`.
pub fn read_public_key_file(path: &Path) -> Result<PublicKey> {
    require_present(path)?;
    let blob = fs::read(path)?;
    let n = codec::decode_public_key(&blob)?;
    Ok(PublicKey {
        n,
        e: Integer::from(PUBLIC_EXPONENT),
    })
}

/// Reads a private key blob from `path`.
pub fn read_private_key_file(path: &Path) -> Result<PrivateKey> {
    require_present(path)?;
    let blob = fs::read(path)?;
    let (d, p, q, q_inv_mod_p) = codec::decode_private_key(&blob)?;
    Ok(PrivateKey {
        d,
        p,
        q,
        q_inv_mod_p,
    })
}

/// Encrypts the file at `path_in` under `public`, writing the ciphertext
/// blob to `path_out`.
pub fn encrypt_file(
    path_in: &Path,
    path_out: &Path,
    public: &PublicKey,
    padding: PaddingKind,
    rng: &mut dyn RngCore,
) -> Result<()> {
    require_present(path_in)?;
    require_absent(path_out)?;

    let data = fs::read(path_in)?;
    let records = pipeline::encrypt_bytes(&data, &public.e, &public.n, padding, rng)?;

    let n_bytes = bigint::byte_len(&public.n);
    let mut out = Vec::new();
    for c in &records {
        codec::write_record(&mut out, c, n_bytes)?;
    }
    fs::write(path_out, out)?;
    Ok(())
}

/// Decrypts the ciphertext blob at `path_in` under `private`, writing the
/// recovered plaintext to `path_out`.
pub fn decrypt_file(
    path_in: &Path,
    path_out: &Path,
    private: &PrivateKey,
    padding: PaddingKind,
    use_crt: bool,
) -> Result<()> {
    require_present(path_in)?;
    require_absent(path_out)?;

    let blob = fs::read(path_in)?;
    let mut cursor = &blob[..];
    let records = codec::read_all_records(&mut cursor)?;

    let plaintext = if use_crt {
        pipeline::decrypt_bytes_crt(&records, private, padding)?
    } else {
        pipeline::decrypt_bytes_direct(&records, &private.d, &private.n(), padding)?
    };

    fs::write(path_out, plaintext)?;
    Ok(())
}

/// Signs the file at `path_in` under `private`, writing the signature blob
/// to `path_out`.
pub fn sign_file(
    path_in: &Path,
    path_out: &Path,
    private: &PrivateKey,
    padding: PaddingKind,
    rng: &mut dyn RngCore,
) -> Result<()> {
    require_present(path_in)?;
    require_absent(path_out)?;

    let provider = Sha256Provider;
    let records = signing::sign_file(&provider, path_in, private, padding, rng)?;

    let n_bytes = bigint::byte_len(&private.n());
    let mut out = Vec::new();
    for c in &records {
        codec::write_record(&mut out, c, n_bytes)?;
    }
    fs::write(path_out, out)?;
    Ok(())
}

/// Verifies the signature blob at `sig_path` over the file at `path_in`
/// under `public`.
pub fn verify_file(
    path_in: &Path,
    sig_path: &Path,
    public: &PublicKey,
    padding: PaddingKind,
) -> Result<bool> {
    require_present(path_in)?;
    require_present(sig_path)?;

    let blob = fs::read(sig_path)?;
    let mut cursor = &blob[..];
    let records = codec::read_all_records(&mut cursor)?;

    let provider = Sha256Provider;
    signing::verify_file(&provider, path_in, &records, public, padding)
}
