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

//! An abstract digest provider, standing in for the reference
//! implementation's shell-out to an external `sha256sum`-alike.
//!
//! Any conforming SHA-256 implementation satisfies this trait; the default
//! implementation computes it in-process with [`sha2`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest as _, Sha256};

use crate::error::Result;

/// Capability for hashing a file or byte string to a 32-byte SHA-256 digest.
pub trait DigestProvider {
    fn sha256_file(&self, path: &Path) -> Result<[u8; 32]>;
    fn sha256_bytes(&self, data: &[u8]) -> [u8; 32];
}

/// The crate's default digest provider: SHA-256 computed in-process.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Provider;

impl DigestProvider for Sha256Provider {
    fn sha256_file(&self, path: &Path) -> Result<[u8; 32]> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(hasher.finalize().into())
    }

    fn sha256_bytes(&self, data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }
}
