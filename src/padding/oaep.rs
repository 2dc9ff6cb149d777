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

//! An OAEP-like padding built on [`crate::mgf1`].
//!
//! This is deliberately **not** RFC 8017-conformant OAEP: the seed slot
//! doubles as a length field on the final block (carrying the raw payload
//! length instead of fresh randomness), which standard OAEP never does. This
//! is the only way a short final block's exact length survives the round
//! trip, since no other field in the block carries it (see DESIGN.md).
//!
//! XOR here operates on the underlying bytes directly rather than
//! hex-digit-by-hex-digit; the two are mathematically equivalent and this
//! does not change any observable byte of the padded block.

use rand_core::RngCore;

use super::{xor_bytes, PaddingScheme};
use crate::bigint;
use crate::error::{Result, RsaError};
use crate::mgf1;
use crate::rng::fill_nonzero_high_nibble;

/// Width in bytes of the trailing `Y` half (an 8-byte seed, masked).
const SEED_WIDTH: usize = 8;

pub struct Oaep;

impl PaddingScheme for Oaep {
    fn plaintext_width(&self, n_bytes: usize) -> usize {
        // Total padded width is n_bytes - 1 (see padded_width), split into
        // an 8-byte Y half and an X half holding the masked plaintext.
        n_bytes - 1 - SEED_WIDTH
    }

    fn padded_width(&self, n_bytes: usize) -> usize {
        // One byte short of the modulus width, so the padded block's
        // integer value is always strictly less than 256^(n_bytes-1), and
        // therefore less than the modulus itself (whose minimal n_bytes-byte
        // representation is already at least that large). A full n_bytes-wide
        // block can't make that guarantee: its top byte is as good as
        // uniform, so roughly 1 in 256 blocks would encode a value at or
        // above the modulus.
        n_bytes - 1
    }

    fn wrap(
        &self,
        block: &[u8],
        is_last: bool,
        n_bytes: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<u8>> {
        let w_in = self.plaintext_width(n_bytes);
        assert!(block.len() <= w_in, "block exceeds plaintext width");

        let seed_bytes = if is_last {
            (block.len() as u64).to_be_bytes().to_vec()
        } else {
            let mut buf = vec![0u8; SEED_WIDTH];
            fill_nonzero_high_nibble(rng, &mut buf);
            buf
        };
        let seed = bigint::from_be_bytes(&seed_bytes);

        let mut plaintext_padded = block.to_vec();
        plaintext_padded.resize(w_in, 0);

        let mask = mgf1::mgf1(&seed, w_in)?;
        let x = xor_bytes(&plaintext_padded, &mask);

        let x_prefix = bigint::from_be_bytes(&x[..SEED_WIDTH]);
        let y_mask = mgf1::mgf1(&x_prefix, SEED_WIDTH)?;
        let y = xor_bytes(&bigint::to_be_bytes_padded(&seed, SEED_WIDTH), &y_mask);

        let mut out = Vec::with_capacity(self.padded_width(n_bytes));
        out.extend_from_slice(&x);
        out.extend_from_slice(&y);
        debug_assert_eq!(out.len(), self.padded_width(n_bytes));
        Ok(out)
    }

    fn unwrap(&self, padded: &[u8], is_last: bool, n_bytes: usize) -> Result<Vec<u8>> {
        if padded.len() != self.padded_width(n_bytes) {
            return Err(RsaError::InvalidPadding("padded block has the wrong width"));
        }
        let w_in = self.plaintext_width(n_bytes);
        let x = &padded[..w_in];
        let y = &padded[w_in..];

        let x_prefix = bigint::from_be_bytes(&x[..SEED_WIDTH]);
        let y_mask = mgf1::mgf1(&x_prefix, SEED_WIDTH)?;
        let seed_bytes = xor_bytes(y, &y_mask);
        let seed = bigint::from_be_bytes(&seed_bytes);

        let mask = mgf1::mgf1(&seed, w_in)?;
        let plaintext_padded = xor_bytes(x, &mask);

        if is_last {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&seed_bytes);
            let len = u64::from_be_bytes(buf) as usize;
            if len > w_in {
                return Err(RsaError::InvalidPadding(
                    "decoded payload length exceeds block width",
                ));
            }
            Ok(plaintext_padded[..len].to_vec())
        } else {
            Ok(plaintext_padded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn wrap_unwrap_round_trips_full_block() {
        let scheme = Oaep;
        let mut rng = StdRng::seed_from_u64(21);
        let n_bytes = 256;
        let w_in = scheme.plaintext_width(n_bytes);
        let data = vec![0x5A; w_in];

        let padded = scheme.wrap(&data, false, n_bytes, &mut rng).unwrap();
        assert_eq!(padded.len(), scheme.padded_width(n_bytes));
        let out = scheme.unwrap(&padded, false, n_bytes).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn wrap_unwrap_round_trips_final_short_block() {
        let scheme = Oaep;
        let mut rng = StdRng::seed_from_u64(22);
        let n_bytes = 256;
        let data = b"hello";

        let padded = scheme.wrap(data, true, n_bytes, &mut rng).unwrap();
        assert_eq!(padded.len(), scheme.padded_width(n_bytes));
        let out = scheme.unwrap(&padded, true, n_bytes).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn padded_block_integer_is_always_below_the_modulus_scale() {
        // The padded block's integer value is at most 256^(n_bytes-1) - 1,
        // strictly below the smallest n_bytes-byte modulus (256^(n_bytes-1)),
        // for any top byte value the mask could produce.
        let scheme = Oaep;
        let mut rng = StdRng::seed_from_u64(24);
        let n_bytes = 128;
        let data = vec![0xFFu8; scheme.plaintext_width(n_bytes)];

        let padded = scheme.wrap(&data, false, n_bytes, &mut rng).unwrap();
        assert_eq!(padded.len(), n_bytes - 1);
    }

    #[test]
    fn wrap_is_randomized_across_calls_for_intermediate_blocks() {
        let scheme = Oaep;
        let mut rng = StdRng::seed_from_u64(23);
        let n_bytes = 256;
        let data = vec![0u8; scheme.plaintext_width(n_bytes)];

        let a = scheme.wrap(&data, false, n_bytes, &mut rng).unwrap();
        let b = scheme.wrap(&data, false, n_bytes, &mut rng).unwrap();
        assert_ne!(a, b);
    }
}
