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

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the RSA key generation, padding, and block pipeline.
///
/// Miller-Rabin reporting a candidate composite is not represented here: the
/// sieve loop in [`crate::primes`] treats that as a signal to keep searching,
/// never as a failure the caller observes.
#[derive(Debug, Error)]
pub enum RsaError {
    #[error("output file already exists: {0}")]
    FileExists(PathBuf),

    #[error("input file not found: {0}")]
    FileMissing(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("key generation did not converge after {0} attempts")]
    KeyGenerationExhausted(u32),

    #[error("mgf1 output length {0} bytes exceeds the 2^37 byte bound")]
    Mgf1OutputTooLong(u64),

    #[error("padded block is malformed: {0}")]
    InvalidPadding(&'static str),

    #[error("ciphertext record length prefix is corrupt")]
    CorruptRecord,

    #[error("key blob is malformed: {0}")]
    InvalidKeyBlob(&'static str),
}

pub type Result<T> = std::result::Result<T, RsaError>;
