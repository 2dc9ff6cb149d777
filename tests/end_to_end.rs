//! End-to-end round-trip scenarios exercising the public API the way a
//! consuming CLI would: generate a key pair, then encrypt/decrypt or
//! sign/verify a file on disk.

use rand::rngs::StdRng;
use rand::RngCore;
use rand::SeedableRng;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use textbook_rsa::{
    decrypt_file, encrypt_file, generate_keypair, sign_file, verify_file, PaddingKind, RsaConfig,
};

fn write_temp(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut f = fs::File::create(&path).unwrap();
    f.write_all(contents).unwrap();
    path
}

// Surfaces the crate's debug!/trace! pipeline logging under
// `RUST_LOG=textbook_rsa=trace cargo test -- --nocapture`; a no-op on repeat
// calls across tests in the same process.
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// S1: a small single-block file round-trips under PKCS#1 v1.5, direct
/// (non-CRT) decryption.
#[test]
fn s1_small_file_round_trips_classic() {
    init_logger();
    let dir = tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(10_001);
    let config = RsaConfig::new(1024, PaddingKind::Pkcs1v15);
    let (public, private) = generate_keypair(&config, &mut rng).unwrap();

    let plain_path = write_temp(dir.path(), "plain.txt", b"hello, rsa");
    let cipher_path = dir.path().join("cipher.bin");
    let out_path = dir.path().join("out.txt");

    encrypt_file(&plain_path, &cipher_path, &public, PaddingKind::Pkcs1v15, &mut rng).unwrap();
    decrypt_file(&cipher_path, &out_path, &private, PaddingKind::Pkcs1v15, false).unwrap();

    assert_eq!(fs::read(&out_path).unwrap(), b"hello, rsa");
}

/// S2: the same ciphertext decrypts identically via the CRT (Garner) path.
#[test]
fn s2_crt_decryption_matches_classic() {
    let dir = tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(10_002);
    let config = RsaConfig::new(1024, PaddingKind::Pkcs1v15);
    let (public, private) = generate_keypair(&config, &mut rng).unwrap();

    let plain_path = write_temp(dir.path(), "plain.txt", b"hello, rsa, via crt");
    let cipher_direct = dir.path().join("cipher_direct.bin");
    let out_direct = dir.path().join("out_direct.txt");
    let out_crt = dir.path().join("out_crt.txt");

    encrypt_file(&plain_path, &cipher_direct, &public, PaddingKind::Pkcs1v15, &mut rng).unwrap();
    decrypt_file(&cipher_direct, &out_direct, &private, PaddingKind::Pkcs1v15, false).unwrap();
    decrypt_file(&cipher_direct, &out_crt, &private, PaddingKind::Pkcs1v15, true).unwrap();

    let direct = fs::read(&out_direct).unwrap();
    let crt = fs::read(&out_crt).unwrap();
    assert_eq!(direct, crt);
    assert_eq!(direct, b"hello, rsa, via crt");
}

/// S3: a multi-block file spanning several plaintext blocks round-trips
/// byte-for-byte under PKCS#1 v1.5.
#[test]
fn s3_multi_block_file_round_trips() {
    let dir = tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(10_003);
    let config = RsaConfig::new(1024, PaddingKind::Pkcs1v15);
    let (public, private) = generate_keypair(&config, &mut rng).unwrap();

    let data = vec![0xA5u8; 5000];
    let plain_path = write_temp(dir.path(), "plain.bin", &data);
    let cipher_path = dir.path().join("cipher.bin");
    let out_path = dir.path().join("out.bin");

    encrypt_file(&plain_path, &cipher_path, &public, PaddingKind::Pkcs1v15, &mut rng).unwrap();
    decrypt_file(&cipher_path, &out_path, &private, PaddingKind::Pkcs1v15, true).unwrap();

    assert_eq!(fs::read(&out_path).unwrap(), data);
}

/// S4: an empty file still signs and verifies, producing exactly one
/// signature record.
#[test]
fn s4_empty_file_sign_and_verify() {
    let dir = tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(10_004);
    let config = RsaConfig::new(1024, PaddingKind::Pkcs1v15);
    let (public, private) = generate_keypair(&config, &mut rng).unwrap();

    let plain_path = write_temp(dir.path(), "empty.bin", b"");
    let sig_path = dir.path().join("sig.bin");

    sign_file(&plain_path, &sig_path, &private, PaddingKind::Pkcs1v15, &mut rng).unwrap();
    assert!(verify_file(&plain_path, &sig_path, &public, PaddingKind::Pkcs1v15).unwrap());
}

/// S5: flipping a single bit in the signed file invalidates the signature.
#[test]
fn s5_tampered_file_fails_verification() {
    let dir = tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(10_005);
    let config = RsaConfig::new(1024, PaddingKind::Pkcs1v15);
    let (public, private) = generate_keypair(&config, &mut rng).unwrap();

    let plain_path = write_temp(dir.path(), "msg.bin", b"the original contract text");
    let sig_path = dir.path().join("sig.bin");
    sign_file(&plain_path, &sig_path, &private, PaddingKind::Pkcs1v15, &mut rng).unwrap();

    let tampered_path = write_temp(dir.path(), "tampered.bin", b"the 0riginal contract text");
    assert!(!verify_file(&tampered_path, &sig_path, &public, PaddingKind::Pkcs1v15).unwrap());
}

/// S6: a larger modulus with OAEP padding round-trips a multi-block random
/// payload, decrypted via the CRT path.
#[test]
fn s6_oaep_2048_multi_block_round_trips() {
    let dir = tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(10_006);
    let config = RsaConfig::new(2048, PaddingKind::Oaep);
    let (public, private) = generate_keypair(&config, &mut rng).unwrap();

    let mut data = vec![0u8; 512];
    rng.fill_bytes(&mut data);
    let plain_path = write_temp(dir.path(), "plain.bin", &data);
    let cipher_path = dir.path().join("cipher.bin");
    let out_path = dir.path().join("out.bin");

    encrypt_file(&plain_path, &cipher_path, &public, PaddingKind::Oaep, &mut rng).unwrap();
    decrypt_file(&cipher_path, &out_path, &private, PaddingKind::Oaep, true).unwrap();

    assert_eq!(fs::read(&out_path).unwrap(), data);
}
