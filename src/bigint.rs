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

//! Thin helpers layered on top of [`rug::Integer`], the GMP-backed substrate
//! every other module in this crate is built on.
//!
//! Arithmetic helpers here return an owned `Integer` rather than writing
//! through an output parameter, and never retain references to their
//! arguments once they return.

use rug::integer::Order;
use rug::Integer;

/// Number of bytes needed to hold `n` in base-256 (`|n|₂₅₆`).
pub fn byte_len(n: &Integer) -> usize {
    if *n == 0 {
        return 1;
    }
    ((n.significant_bits() as usize) + 7) / 8
}

/// Parses a big-endian byte string into an `Integer`.
pub fn from_be_bytes(bytes: &[u8]) -> Integer {
    Integer::from_digits(bytes, Order::Msf)
}

/// Serialises `n` as big-endian bytes, left-padded with zeros to exactly
/// `width` bytes.
///
/// # Panics
///
/// Panics if `n` does not fit in `width` bytes. Callers in this crate only
/// ever call this with `width = |n_modulus|₂₅₆`, under which every block
/// integer produced by the pipeline fits by construction.
pub fn to_be_bytes_padded(n: &Integer, width: usize) -> Vec<u8> {
    let raw = n.to_digits::<u8>(Order::Msf);
    assert!(raw.len() <= width, "integer does not fit in {} bytes", width);
    let mut out = vec![0u8; width - raw.len()];
    out.extend_from_slice(&raw);
    out
}

/// Modular exponentiation by repeated squaring: `base^exp mod modulus`.
///
/// Mirrors the square-and-multiply structure of the reference `exp_mod`
/// routine bit for bit, just expressed as a pure function instead of writing
/// through an output parameter.
pub fn mod_pow(base: &Integer, exp: &Integer, modulus: &Integer) -> Integer {
    debug_assert!(*exp >= 0);
    if *modulus == 1 {
        return Integer::from(0);
    }
    let mut result = Integer::from(1);
    let mut a = Integer::from(base % modulus);
    let mut b = exp.clone();
    while b > 0 {
        if b.is_odd() {
            result = (result * &a) % modulus;
            b -= 1;
        }
        a = (a.clone() * &a) % modulus;
        b /= 2;
    }
    result
}

/// Iterative extended Euclidean algorithm.
///
/// Returns `(gcd, x, y)` such that `a*x + b*y = gcd`.
pub fn extended_gcd(a: &Integer, b: &Integer) -> (Integer, Integer, Integer) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (Integer::from(1), Integer::from(0));
    let (mut old_y, mut y) = (Integer::from(0), Integer::from(1));

    while r != 0 {
        let q = Integer::from(&old_r / &r);
        let new_r = old_r - Integer::from(&q * &r);
        old_r = r;
        r = new_r;

        let new_x = old_x - Integer::from(&q * &x);
        old_x = x;
        x = new_x;

        let new_y = old_y - Integer::from(&q * &y);
        old_y = y;
        y = new_y;
    }

    (old_r, old_x, old_y)
}

/// Modular inverse of `a` modulo `m`, or `None` when `gcd(a, m) != 1`.
///
/// `Option` keeps the no-inverse case from being silently mistaken for a
/// valid inverse of zero.
pub fn mod_inverse(a: &Integer, m: &Integer) -> Option<Integer> {
    let (gcd, x, _y) = extended_gcd(a, m);
    if gcd != 1 {
        return None;
    }
    let mut inv = Integer::from(&x % m);
    if inv < 0 {
        inv += m;
    }
    Some(inv)
}
