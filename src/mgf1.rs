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

//! MGF1 mask generation built by iterating SHA-256 over `seed || counter`.
//!
//! Accumulates directly into an in-memory buffer of the known output length
//! rather than through a scratch file.

use rug::Integer;
use sha2::{Digest, Sha256};

use crate::bigint;
use crate::error::{Result, RsaError};

/// Output length bound: `2^37` bytes, per RFC 8017's MGF1 limit. Unreachable
/// at any RSA modulus size this crate targets, but checked defensively.
const MAX_OUTPUT_LEN: u64 = 1u64 << 37;

/// Encodes `seed` as exactly 16 lowercase hex digits (8 bytes, big-endian),
/// the seed half of the MGF1 input this crate uses.
pub fn seed_hex(seed: &Integer) -> String {
    format!("{:016x}", seed_as_u64(seed))
}

// Internal: the seeds this crate ever masks with MGF1 are at most 8 bytes
// (a random OAEP seed width or an encoded block length), so they fit a u64
// without going through a variable-width `Integer` formatter.
fn seed_as_u64(seed: &Integer) -> u64 {
    let bytes = bigint::to_be_bytes_padded(seed, 8);
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes);
    u64::from_be_bytes(buf)
}

/// `I2OSP(c, 8)`: encodes a counter as exactly 8 lowercase hex digits.
fn i2osp_counter_hex(counter: u64) -> String {
    format!("{:08x}", counter)
}

/// Produces an `len_bytes`-byte mask from `seed` by iterating SHA-256 over
/// `seedHex || I2OSP(counter, 8)` for counter = 0, 1, ....
pub fn mgf1(seed: &Integer, len_bytes: usize) -> Result<Vec<u8>> {
    if len_bytes as u64 >= MAX_OUTPUT_LEN {
        return Err(RsaError::Mgf1OutputTooLong(len_bytes as u64));
    }

    let seed_hex = seed_hex(seed);
    let mut out = Vec::with_capacity(len_bytes);
    let mut counter: u64 = 0;
    while out.len() < len_bytes {
        let mut hasher = Sha256::new();
        hasher.update(seed_hex.as_bytes());
        hasher.update(i2osp_counter_hex(counter).as_bytes());
        let digest = hasher.finalize();
        out.extend_from_slice(&digest);
        counter += 1;
    }
    out.truncate(len_bytes);
    Ok(out)
}
