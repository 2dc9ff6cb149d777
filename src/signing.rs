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

//! Sign/verify orchestration: digest-then-RSA over a file, and the matching
//! decrypt-then-compare on the way back.

use std::path::Path;

use log::info;
use rand_core::RngCore;
use rug::Integer;

use crate::digest::DigestProvider;
use crate::error::Result;
use crate::keygen::{PrivateKey, PublicKey};
use crate::padding::PaddingKind;
use crate::pipeline;

/// Signs `path`'s SHA-256 digest under `private`, returning the signature as
/// a sequence of ciphertext-shaped block integers.
pub fn sign_bytes(
    digest_provider: &dyn DigestProvider,
    data: &[u8],
    private: &PrivateKey,
    padding: PaddingKind,
    rng: &mut dyn RngCore,
) -> Result<Vec<Integer>> {
    let hash = digest_provider.sha256_bytes(data);
    pipeline::encrypt_bytes(&hash, &private.d, &private.n(), padding, rng)
}

/// Signs the file at `path`.
pub fn sign_file(
    digest_provider: &dyn DigestProvider,
    path: &Path,
    private: &PrivateKey,
    padding: PaddingKind,
    rng: &mut dyn RngCore,
) -> Result<Vec<Integer>> {
    let hash = digest_provider.sha256_file(path)?;
    info!("signing {} ({} byte digest)", path.display(), hash.len());
    pipeline::encrypt_bytes(&hash, &private.d, &private.n(), padding, rng)
}

/// Verifies a signature over `data` under `public`.
///
/// Decrypts the signature under the public exponent (always direct: the
/// public key carries no CRT parameters) and compares the recovered digest
/// byte-for-byte against a freshly computed SHA-256 of `data`.
pub fn verify_bytes(
    digest_provider: &dyn DigestProvider,
    data: &[u8],
    signature: &[Integer],
    public: &PublicKey,
    padding: PaddingKind,
) -> Result<bool> {
    let recovered =
        pipeline::decrypt_bytes_direct(signature, &public.e, &public.n, padding)?;
    let expected = digest_provider.sha256_bytes(data);
    Ok(recovered == expected)
}

/// Verifies a signature over the file at `path`.
pub fn verify_file(
    digest_provider: &dyn DigestProvider,
    path: &Path,
    signature: &[Integer],
    public: &PublicKey,
    padding: PaddingKind,
) -> Result<bool> {
    let recovered =
        pipeline::decrypt_bytes_direct(signature, &public.e, &public.n, padding)?;
    let expected = digest_provider.sha256_file(path)?;
    Ok(recovered == expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::Sha256Provider;
    use crate::keygen::generate_keypair;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sign_then_verify_succeeds() {
        let mut rng = StdRng::seed_from_u64(2001);
        let (public, private) = generate_keypair(512, 10, &mut rng).unwrap();
        let provider = Sha256Provider;
        let data = b"a message worth signing";

        let sig = sign_bytes(&provider, data, &private, PaddingKind::Pkcs1v15, &mut rng).unwrap();
        assert!(verify_bytes(&provider, data, &sig, &public, PaddingKind::Pkcs1v15).unwrap());
    }

    #[test]
    fn tampering_with_the_message_invalidates_the_signature() {
        let mut rng = StdRng::seed_from_u64(2002);
        let (public, private) = generate_keypair(512, 10, &mut rng).unwrap();
        let provider = Sha256Provider;
        let data = b"original message";
        let mut tampered = data.to_vec();
        tampered[0] ^= 0xFF;

        let sig = sign_bytes(&provider, data, &private, PaddingKind::Pkcs1v15, &mut rng).unwrap();
        assert!(!verify_bytes(&provider, &tampered, &sig, &public, PaddingKind::Pkcs1v15).unwrap());
    }

    #[test]
    fn tampering_with_the_signature_invalidates_it() {
        let mut rng = StdRng::seed_from_u64(2003);
        let (public, private) = generate_keypair(512, 10, &mut rng).unwrap();
        let provider = Sha256Provider;
        let data = b"original message";

        let mut sig = sign_bytes(&provider, data, &private, PaddingKind::Pkcs1v15, &mut rng).unwrap();
        sig[0] += 1;
        assert!(!verify_bytes(&provider, data, &sig, &public, PaddingKind::Pkcs1v15).unwrap());
    }

    #[test]
    fn empty_file_signs_and_verifies() {
        let mut rng = StdRng::seed_from_u64(2004);
        let (public, private) = generate_keypair(512, 10, &mut rng).unwrap();
        let provider = Sha256Provider;

        let sig = sign_bytes(&provider, b"", &private, PaddingKind::Oaep, &mut rng).unwrap();
        assert!(verify_bytes(&provider, b"", &sig, &public, PaddingKind::Oaep).unwrap());
    }
}
