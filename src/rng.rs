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

//! Randomness source: uniform big integers drawn from an injected
//! [`RngCore`], rather than a process-wide generator mutated by every draw.
//!
//! Every caller in [`crate::primes`], [`crate::keygen`] and [`crate::padding`]
//! takes `rng: &mut dyn RngCore` explicitly; this module owns none of them.

use rand_core::RngCore;
use rug::integer::Order;
use rug::Integer;

/// Draws a uniformly random integer with exactly `bits` bits set (the top bit
/// is always 1).
pub fn random_bits(rng: &mut dyn RngCore, bits: u32) -> Integer {
    assert!(bits > 0);
    let byte_len = ((bits as usize) + 7) / 8;
    let mut buf = vec![0u8; byte_len];
    rng.fill_bytes(&mut buf);

    let mut n = Integer::from_digits(&buf, Order::Msf);
    let extra_bits = (byte_len * 8) as u32 - bits;
    // Clear the bits above the requested width, then force the top bit on.
    n >>= extra_bits;
    n.set_bit(bits - 1, true);
    n
}

/// Draws a uniformly random integer in `[0, bound)` by rejection sampling
/// over integers with the same bit width as `bound`.
pub fn random_below(rng: &mut dyn RngCore, bound: &Integer) -> Integer {
    assert!(*bound > 0);
    let bits = bound.significant_bits();
    loop {
        let byte_len = ((bits as usize) + 7) / 8;
        let mut buf = vec![0u8; byte_len];
        rng.fill_bytes(&mut buf);
        let mut candidate = Integer::from_digits(&buf, Order::Msf);
        let extra_bits = (byte_len * 8) as u32 - bits;
        candidate >>= extra_bits;
        if candidate < *bound {
            return candidate;
        }
    }
}

/// Draws a uniformly random integer in `[low, high]` inclusive.
///
/// Used by Miller-Rabin to pick a witness `a` in `[2, n-2]`.
pub fn random_range_inclusive(rng: &mut dyn RngCore, low: &Integer, high: &Integer) -> Integer {
    assert!(low <= high);
    let span = Integer::from(high - low) + 1;
    low.clone() + random_below(rng, &span)
}

/// Fills `buf` with uniformly random bytes, each constrained to `[16, 255]`.
///
/// Used by both padding engines for their random-filler bytes: the reference
/// implementation rejects zero (and, for PKCS#1 v1.5, anything below the
/// `0x10` marker nibble) so the marker byte and the padding bytes around it
/// stay unambiguous when scanning for the `0x00` separator.
pub fn fill_nonzero_high_nibble(rng: &mut dyn RngCore, buf: &mut [u8]) {
    for b in buf.iter_mut() {
        loop {
            let mut byte = [0u8; 1];
            rng.fill_bytes(&mut byte);
            if byte[0] >= 0x10 {
                *b = byte[0];
                break;
            }
        }
    }
}
