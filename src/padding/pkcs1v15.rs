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

//! A PKCS#1 v1.5-style byte padding.
//!
//! Every padded block is `0x10 || PS || 0x00 || M`, where `PS` is at least
//! 8 random bytes in `[0x10, 0xff]`. The leading `0x10` nibble is a marker
//! the unwrap side scans for, not the `0x00 0x02` header of the standard;
//! this crate does not aim for interoperability with standards-conformant
//! PKCS#1 v1.5 implementations.

use rand_core::RngCore;

use super::PaddingScheme;
use crate::error::{Result, RsaError};
use crate::rng::fill_nonzero_high_nibble;

/// Minimum count of random filler bytes between the marker and the `0x00`
/// separator.
const MIN_PAD_BYTES: usize = 8;

const MARKER: u8 = 0x10;

pub struct Pkcs1v15;

impl PaddingScheme for Pkcs1v15 {
    fn plaintext_width(&self, n_bytes: usize) -> usize {
        n_bytes - 11
    }

    fn wrap(
        &self,
        block: &[u8],
        _is_last: bool,
        n_bytes: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<u8>> {
        let w_in = self.plaintext_width(n_bytes);
        assert!(block.len() <= w_in, "block exceeds plaintext width");

        // marker(1) + pad + separator(1) + data = n_bytes
        let pad_len = n_bytes - 2 - block.len();
        debug_assert!(pad_len >= MIN_PAD_BYTES);

        let mut padded = Vec::with_capacity(n_bytes);
        padded.push(MARKER);
        let mut pad = vec![0u8; pad_len];
        fill_nonzero_high_nibble(rng, &mut pad);
        padded.extend_from_slice(&pad);
        padded.push(0x00);
        padded.extend_from_slice(block);

        debug_assert_eq!(padded.len(), n_bytes);
        Ok(padded)
    }

    fn unwrap(&self, padded: &[u8], _is_last: bool, n_bytes: usize) -> Result<Vec<u8>> {
        if padded.len() != n_bytes {
            return Err(RsaError::InvalidPadding("padded block has the wrong width"));
        }
        if padded[0] != MARKER {
            return Err(RsaError::InvalidPadding("missing 0x10 marker byte"));
        }

        let sep = padded[1..]
            .iter()
            .position(|&b| b == 0x00)
            .ok_or(RsaError::InvalidPadding("missing 0x00 separator"))?;
        let data_start = 1 + sep + 1;
        if sep < MIN_PAD_BYTES {
            return Err(RsaError::InvalidPadding("padding shorter than minimum"));
        }

        Ok(padded[data_start..].to_vec())
    }
}
