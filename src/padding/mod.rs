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

//! Padding engines, factored behind one [`PaddingScheme`] trait.
//!
//! PKCS#1 v1.5 and OAEP share the same block-framing shape (pad a chunk up
//! to the modulus width, strip it back down on the way out) even though
//! their byte layouts differ; a single trait lets [`crate::pipeline`] stay
//! ignorant of which variant it's driving.

pub mod oaep;
pub mod pkcs1v15;

use rand_core::RngCore;

use crate::error::Result;

/// Which padding engine a pipeline operation should use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaddingKind {
    Pkcs1v15,
    Oaep,
}

/// A block padding/unpadding strategy over a fixed modulus width.
///
/// `block.len()` on the way in, and the returned `Vec<u8>`'s length on the
/// way out, carry the payload length implicitly: the true chunk length is
/// always recoverable from the slice length itself, with no separate
/// length parameter to keep in sync.
pub trait PaddingScheme {
    /// Usable plaintext bytes per block (`W_in`) for a modulus of
    /// `n_bytes` bytes.
    fn plaintext_width(&self, n_bytes: usize) -> usize;

    /// Total byte width of a padded block for a modulus of `n_bytes` bytes.
    ///
    /// Must stay strictly below `n_bytes` unless the scheme otherwise
    /// guarantees the encoded integer is less than the modulus (as
    /// [`Pkcs1v15`]'s leading `0x10` marker byte does): a full `n_bytes`-wide
    /// block can encode a value at or above the modulus, corrupting the
    /// round trip. Defaults to `n_bytes`.
    fn padded_width(&self, n_bytes: usize) -> usize {
        n_bytes
    }

    /// Builds a padded block of exactly `padded_width(n_bytes)` bytes from
    /// `block` (`block.len() <= plaintext_width(n_bytes)`).
    fn wrap(
        &self,
        block: &[u8],
        is_last: bool,
        n_bytes: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<u8>>;

    /// Recovers the plaintext chunk from a padded block of exactly
    /// `padded_width(n_bytes)` bytes.
    fn unwrap(&self, padded: &[u8], is_last: bool, n_bytes: usize) -> Result<Vec<u8>>;
}

pub use oaep::Oaep;
pub use pkcs1v15::Pkcs1v15;

/// Returns the [`PaddingScheme`] implementation for `kind`.
pub fn scheme(kind: PaddingKind) -> Box<dyn PaddingScheme> {
    match kind {
        PaddingKind::Pkcs1v15 => Box::new(Pkcs1v15),
        PaddingKind::Oaep => Box::new(Oaep),
    }
}

pub(crate) fn xor_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}
