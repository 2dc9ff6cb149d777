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

//! RSA key pair generation.

use log::debug;
use rand_core::RngCore;
use rug::Integer;

use crate::bigint::mod_inverse;
use crate::error::{Result, RsaError};
use crate::primes;

/// The fixed public exponent used throughout this crate.
pub const PUBLIC_EXPONENT: u32 = 65537;

/// An RSA public key: `(n, e)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub n: Integer,
    pub e: Integer,
}

/// An RSA private key, retaining the prime factors for CRT decryption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    pub d: Integer,
    pub p: Integer,
    pub q: Integer,
    pub q_inv_mod_p: Integer,
}

impl PrivateKey {
    /// `n = p*q`, recomputed on demand rather than stored redundantly.
    pub fn n(&self) -> Integer {
        Integer::from(&self.p * &self.q)
    }
}

/// Generates an RSA key pair with modulus bit length `bits`.
///
/// Loops generating fresh `p`/`q` candidates until `n = p*q` lands exactly at
/// `bits` bits (rejecting the rare carry that overflows past the target
/// length) and the modular inverse of `e` mod `phi` exists. With `e = 65537`
/// fixed and freshly sieved primes, the no-inverse case is cryptographically
/// unreachable; the loop still checks for it and retries rather than
/// asserting it away.
pub fn generate_keypair(
    bits: u32,
    mr_rounds: u32,
    rng: &mut dyn RngCore,
) -> Result<(PublicKey, PrivateKey)> {
    let e = Integer::from(PUBLIC_EXPONENT);
    let max_attempts = 64;

    for attempt in 0..max_attempts {
        let p_bits = bits / 2;
        let q_bits = (bits + 1) / 2;
        debug!(
            "keygen attempt {}: sampling {}-bit p, {}-bit q",
            attempt, p_bits, q_bits
        );

        let p = primes::generate_prime(p_bits, mr_rounds, rng);
        let q = primes::generate_prime(q_bits, mr_rounds, rng);

        let n = Integer::from(&p * &q);
        if n.significant_bits() != bits {
            continue;
        }

        let phi = Integer::from(&p - 1) * Integer::from(&q - 1);
        let d = match mod_inverse(&e, &phi) {
            Some(d) => d,
            None => continue,
        };
        let q_inv_mod_p = match mod_inverse(&q, &p) {
            Some(inv) => inv,
            None => continue,
        };

        let public = PublicKey { n, e };
        let private = PrivateKey {
            d,
            p,
            q,
            q_inv_mod_p,
        };
        return Ok((public, private));
    }

    Err(RsaError::KeyGenerationExhausted(max_attempts))
}
