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

//! The RSA block pipeline: fixed-width block framing, padding, and modular
//! exponentiation (straight or CRT), in both directions.

use log::trace;
use rand_core::RngCore;
use rug::Integer;

use crate::bigint;
use crate::error::Result;
use crate::keygen::PrivateKey;
use crate::padding::{self, PaddingKind};

/// Splits `data` into padded, encrypted block integers under `(exponent,
/// modulus)`.
///
/// A zero-length `data` still produces exactly one block (the empty final
/// chunk), so that signing an empty file or encrypting an empty message
/// yields a well-formed one-record ciphertext rather than an empty stream.
pub fn encrypt_bytes(
    data: &[u8],
    exponent: &Integer,
    modulus: &Integer,
    padding: PaddingKind,
    rng: &mut dyn RngCore,
) -> Result<Vec<Integer>> {
    let scheme = padding::scheme(padding);
    let n_bytes = bigint::byte_len(modulus);
    let w_in = scheme.plaintext_width(n_bytes);

    let mut records = Vec::new();
    let mut offset = 0usize;

    loop {
        let end = (offset + w_in).min(data.len());
        let is_last = end == data.len();
        let block = &data[offset..end];

        let padded = scheme.wrap(block, is_last, n_bytes, rng)?;
        let m = bigint::from_be_bytes(&padded);
        debug_assert!(m < *modulus);
        let c = bigint::mod_pow(&m, exponent, modulus);
        trace!("encrypted block [{}, {}) -> {} bytes", offset, end, n_bytes);
        records.push(c);

        offset = end;
        if is_last {
            break;
        }
    }

    Ok(records)
}

/// Recovers plaintext bytes from a sequence of decrypted message integers
/// (already `c^exp mod n`, before padding is stripped).
fn strip_padding(
    messages: &[Integer],
    n_bytes: usize,
    padding: PaddingKind,
) -> Result<Vec<u8>> {
    let scheme = padding::scheme(padding);
    let count = messages.len();
    let mut out = Vec::new();
    for (i, m) in messages.iter().enumerate() {
        let is_last = i + 1 == count;
        let padded = bigint::to_be_bytes_padded(m, scheme.padded_width(n_bytes));
        let chunk = scheme.unwrap(&padded, is_last, n_bytes)?;
        out.extend_from_slice(&chunk);
    }
    Ok(out)
}

/// Direct decryption: `m = c^exp mod modulus` for every record.
///
/// Used both for decrypting under the private exponent and for verifying a
/// signature under the public exponent (which has no CRT parameters).
pub fn decrypt_bytes_direct(
    records: &[Integer],
    exponent: &Integer,
    modulus: &Integer,
    padding: PaddingKind,
) -> Result<Vec<u8>> {
    let n_bytes = bigint::byte_len(modulus);
    let messages: Vec<Integer> = records
        .iter()
        .map(|c| bigint::mod_pow(c, exponent, modulus))
        .collect();
    strip_padding(&messages, n_bytes, padding)
}

/// CRT (Garner) decryption using the retained prime factors.
///
/// `mp = c^(d mod (p-1)) mod p`, `mq = c^(d mod (q-1)) mod q`,
/// `m = mp + p * ((mq - mp) * qInvModP mod q)`.
pub fn decrypt_bytes_crt(
    records: &[Integer],
    private: &PrivateKey,
    padding: PaddingKind,
) -> Result<Vec<u8>> {
    let n = private.n();
    let n_bytes = bigint::byte_len(&n);

    let dp = Integer::from(&private.d % Integer::from(&private.p - 1));
    let dq = Integer::from(&private.d % Integer::from(&private.q - 1));

    let messages: Vec<Integer> = records
        .iter()
        .map(|c| {
            let mp = bigint::mod_pow(c, &dp, &private.p);
            let mq = bigint::mod_pow(c, &dq, &private.q);

            let mut diff = Integer::from(&mq - &mp) * &private.q_inv_mod_p;
            diff = Integer::from(diff % &private.q);
            if diff < 0 {
                diff += &private.q;
            }
            mp + Integer::from(&private.p * diff)
        })
        .collect();

    strip_padding(&messages, n_bytes, padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::generate_keypair;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn encrypt_decrypt_direct_round_trips_pkcs1v15() {
        let mut rng = StdRng::seed_from_u64(1001);
        let (public, private) = generate_keypair(512, 10, &mut rng).unwrap();

        let data = b"the quick brown fox jumps over the lazy dog, repeatedly, to make more than one block";
        let records = encrypt_bytes(data, &public.e, &public.n, PaddingKind::Pkcs1v15, &mut rng).unwrap();
        assert!(records.len() >= 2);

        let out = decrypt_bytes_direct(&records, &private.d, &private.n(), PaddingKind::Pkcs1v15).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn crt_and_direct_decryption_agree() {
        let mut rng = StdRng::seed_from_u64(1002);
        let (public, private) = generate_keypair(512, 10, &mut rng).unwrap();

        let data = b"hello, CRT";
        let records = encrypt_bytes(data, &public.e, &public.n, PaddingKind::Pkcs1v15, &mut rng).unwrap();

        let direct = decrypt_bytes_direct(&records, &private.d, &private.n(), PaddingKind::Pkcs1v15).unwrap();
        let crt = decrypt_bytes_crt(&records, &private, PaddingKind::Pkcs1v15).unwrap();
        assert_eq!(direct, crt);
        assert_eq!(direct, data);
    }

    #[test]
    fn empty_input_still_produces_one_record() {
        let mut rng = StdRng::seed_from_u64(1003);
        let (public, private) = generate_keypair(512, 10, &mut rng).unwrap();

        let records = encrypt_bytes(&[], &public.e, &public.n, PaddingKind::Oaep, &mut rng).unwrap();
        assert_eq!(records.len(), 1);

        let out = decrypt_bytes_direct(&records, &private.d, &private.n(), PaddingKind::Oaep).unwrap();
        assert_eq!(out, Vec::<u8>::new());
    }

    #[test]
    fn oaep_round_trips_multi_block() {
        let mut rng = StdRng::seed_from_u64(1004);
        let (public, private) = generate_keypair(1024, 10, &mut rng).unwrap();

        let data = vec![0xFFu8; 300];
        let records = encrypt_bytes(&data, &public.e, &public.n, PaddingKind::Oaep, &mut rng).unwrap();
        let out = decrypt_bytes_crt(&records, &private, PaddingKind::Oaep).unwrap();
        assert_eq!(out, data);
    }
}
