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

//! Raw big-integer serialisation with a length prefix.
//!
//! Every on-disk artefact this crate produces (key blobs, ciphertext,
//! signatures) is a sequence of `[u32 big-endian length][big-endian bytes]`
//! records; there is no header, OID, or other framing, and no compatibility
//! with any standard key-file format.

use std::convert::TryFrom;
use std::io::{self, Read, Write};

use rug::Integer;

use crate::bigint;
use crate::error::{Result, RsaError};

/// Writes one record: a 4-byte big-endian length prefix followed by the
/// integer's big-endian bytes, padded to exactly `width` bytes.
pub fn write_record<W: Write>(w: &mut W, value: &Integer, width: usize) -> Result<()> {
    let bytes = bigint::to_be_bytes_padded(value, width);
    let len = u32::try_from(bytes.len()).map_err(|_| RsaError::CorruptRecord)?;
    w.write_all(&len.to_be_bytes())?;
    w.write_all(&bytes)?;
    Ok(())
}

/// Reads one record, or `Ok(None)` at a clean end of stream.
pub fn read_record<R: Read>(r: &mut R) -> Result<Option<Integer>> {
    let mut len_buf = [0u8; 4];
    match r.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }
    let len = u32::from_be_bytes(len_buf) as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)
        .map_err(|_| RsaError::CorruptRecord)?;
    Ok(Some(bigint::from_be_bytes(&buf)))
}

/// Reads every record in `r` until a clean end of stream.
pub fn read_all_records<R: Read>(r: &mut R) -> Result<Vec<Integer>> {
    let mut out = Vec::new();
    while let Some(value) = read_record(r)? {
        out.push(value);
    }
    Ok(out)
}

/// Public key blob: a single record holding `n`.
pub fn encode_public_key(n: &Integer) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_record(&mut buf, n, bigint::byte_len(n))?;
    Ok(buf)
}

/// Decodes a public key blob produced by [`encode_public_key`].
pub fn decode_public_key(blob: &[u8]) -> Result<Integer> {
    let mut cursor = blob;
    read_record(&mut cursor)?.ok_or(RsaError::InvalidKeyBlob("empty public key blob"))
}

/// Private key blob: four records, `d`, `p`, `q`, `qInvModP`, in that order.
pub fn encode_private_key(d: &Integer, p: &Integer, q: &Integer, q_inv_mod_p: &Integer) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_record(&mut buf, d, bigint::byte_len(d))?;
    write_record(&mut buf, p, bigint::byte_len(p))?;
    write_record(&mut buf, q, bigint::byte_len(q))?;
    write_record(&mut buf, q_inv_mod_p, bigint::byte_len(q_inv_mod_p))?;
    Ok(buf)
}

/// Decodes a private key blob produced by [`encode_private_key`], returning
/// `(d, p, q, qInvModP)`.
pub fn decode_private_key(blob: &[u8]) -> Result<(Integer, Integer, Integer, Integer)> {
    let mut cursor = blob;
    let d = read_record(&mut cursor)?.ok_or(RsaError::InvalidKeyBlob("missing d"))?;
    let p = read_record(&mut cursor)?.ok_or(RsaError::InvalidKeyBlob("missing p"))?;
    let q = read_record(&mut cursor)?.ok_or(RsaError::InvalidKeyBlob("missing q"))?;
    let q_inv_mod_p =
        read_record(&mut cursor)?.ok_or(RsaError::InvalidKeyBlob("missing qInvModP"))?;
    Ok((d, p, q, q_inv_mod_p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips() {
        let n = Integer::from(123456789u64);
        let mut buf = Vec::new();
        write_record(&mut buf, &n, bigint::byte_len(&n)).unwrap();

        let mut cursor = &buf[..];
        let decoded = read_record(&mut cursor).unwrap().unwrap();
        assert_eq!(decoded, n);
        assert!(read_record(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn public_key_blob_round_trips() {
        let n = Integer::from_str_radix("ABCDEF0123456789", 16).unwrap();
        let blob = encode_public_key(&n).unwrap();
        let decoded = decode_public_key(&blob).unwrap();
        assert_eq!(decoded, n);
    }

    #[test]
    fn private_key_blob_round_trips() {
        let d = Integer::from(17);
        let p = Integer::from(61);
        let q = Integer::from(53);
        let qinv = Integer::from(38);
        let blob = encode_private_key(&d, &p, &q, &qinv).unwrap();
        let (d2, p2, q2, qinv2) = decode_private_key(&blob).unwrap();
        assert_eq!((d2, p2, q2, qinv2), (d, p, q, qinv));
    }

    #[test]
    fn read_all_records_collects_every_record() {
        let values: Vec<Integer> = (1u64..=5).map(Integer::from).collect();
        let mut buf = Vec::new();
        for v in &values {
            write_record(&mut buf, v, bigint::byte_len(v)).unwrap();
        }
        let mut cursor = &buf[..];
        let decoded = read_all_records(&mut cursor).unwrap();
        assert_eq!(decoded, values);
    }
}
