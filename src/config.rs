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

//! Runtime configuration for a key generation or pipeline session.
//!
//! There is no file-based configuration format; a plain struct constructed
//! by the caller is all the ambient "configuration" concern needs here.

use crate::padding::PaddingKind;
use crate::primes::DEFAULT_ROUNDS;

/// Settings for one key generation or pipeline session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RsaConfig {
    /// Target modulus bit length `B`.
    pub bits: u32,
    /// Miller-Rabin security rounds (defaults to 10).
    pub mr_rounds: u32,
    /// Which padding engine to drive the block pipeline with.
    pub padding: PaddingKind,
}

impl RsaConfig {
    pub fn new(bits: u32, padding: PaddingKind) -> Self {
        RsaConfig {
            bits,
            mr_rounds: DEFAULT_ROUNDS,
            padding,
        }
    }

    pub fn with_rounds(mut self, mr_rounds: u32) -> Self {
        self.mr_rounds = mr_rounds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ten_miller_rabin_rounds() {
        let cfg = RsaConfig::new(1024, PaddingKind::Pkcs1v15);
        assert_eq!(cfg.mr_rounds, 10);
    }

    #[test]
    fn with_rounds_overrides_default() {
        let cfg = RsaConfig::new(1024, PaddingKind::Oaep).with_rounds(20);
        assert_eq!(cfg.mr_rounds, 20);
    }
}
