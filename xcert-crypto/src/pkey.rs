// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! A thin OpenSSL wrapper exposing exactly the public-key operations the
//! chain verifier needs: signature verification, algorithm/strength
//! introspection for profile checks, and nothing else.

use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Public};
use openssl::sign::{RsaPssSaltlen, Verifier};

use xcert_asn1::common::DigestAlgorithm;

use crate::error::{CryptoError, CryptoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKeyKind {
    Rsa,
    Ec,
    Ed25519,
    Other,
}

pub struct PublicKey {
    inner: PKey<Public>,
    kind: PublicKeyKind,
}

impl PublicKey {
    /// Parses a `SubjectPublicKeyInfo` DER encoding (spki_raw span).
    pub fn from_spki_der(der: &[u8]) -> CryptoResult<Self> {
        let inner = PKey::public_key_from_der(der)?;
        let kind = match inner.id() {
            openssl::pkey::Id::RSA => PublicKeyKind::Rsa,
            openssl::pkey::Id::EC => PublicKeyKind::Ec,
            openssl::pkey::Id::ED25519 => PublicKeyKind::Ed25519,
            _ => PublicKeyKind::Other,
        };
        Ok(PublicKey { inner, kind })
    }

    pub fn kind(&self) -> PublicKeyKind {
        self.kind
    }

    pub fn bit_length(&self) -> u32 {
        self.inner.bits()
    }

    /// The curve's OpenSSL NID, for EC keys only.
    pub fn curve_nid(&self) -> Option<openssl::nid::Nid> {
        self.inner.ec_key().ok().and_then(|ec| ec.group().curve_name())
    }

    /// Verifies `signature` over `tbs` using `digest` (ignored for
    /// Ed25519, which is digest-less). `use_pss` selects RSASSA-PSS
    /// padding over PKCS#1 v1.5 for RSA keys; `salt_len` is only
    /// meaningful when `use_pss` is set.
    pub fn verify(
        &self,
        digest: Option<DigestAlgorithm>,
        tbs: &[u8],
        signature: &[u8],
        use_pss: bool,
        salt_len: u16,
    ) -> CryptoResult<bool> {
        if self.kind == PublicKeyKind::Ed25519 {
            let mut verifier = Verifier::new_without_digest(&self.inner)?;
            return Ok(verifier.verify_oneshot(signature, tbs).unwrap_or(false));
        }

        let md = match digest {
            Some(DigestAlgorithm::Sha1) => MessageDigest::sha1(),
            Some(DigestAlgorithm::Sha256) => MessageDigest::sha256(),
            Some(DigestAlgorithm::Sha384) => MessageDigest::sha384(),
            Some(DigestAlgorithm::Sha512) => MessageDigest::sha512(),
            None => return Err(CryptoError::UnsupportedAlgorithm),
        };

        let mut verifier = Verifier::new(md, &self.inner)?;
        if use_pss && self.kind == PublicKeyKind::Rsa {
            verifier.set_rsa_padding(openssl::rsa::Padding::PKCS1_PSS)?;
            verifier.set_rsa_pss_saltlen(RsaPssSaltlen::custom(salt_len as i32))?;
            verifier.set_rsa_mgf1_md(md)?;
        }
        verifier.update(tbs)?;
        Ok(verifier.verify(signature).unwrap_or(false))
    }
}

/// Computes a standalone digest, used by the trust-anchor lookup path
/// (matching a child's `authorityKeyIdentifier` against a root's key hash)
/// rather than signature verification.
pub fn digest(alg: DigestAlgorithm, data: &[u8]) -> CryptoResult<Vec<u8>> {
    let md = match alg {
        DigestAlgorithm::Sha1 => MessageDigest::sha1(),
        DigestAlgorithm::Sha256 => MessageDigest::sha256(),
        DigestAlgorithm::Sha384 => MessageDigest::sha384(),
        DigestAlgorithm::Sha512 => MessageDigest::sha512(),
    };
    Ok(openssl::hash::hash(md, data)?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_lengths() {
        assert_eq!(digest(DigestAlgorithm::Sha1, b"abc").unwrap().len(), 20);
        assert_eq!(digest(DigestAlgorithm::Sha256, b"abc").unwrap().len(), 32);
        assert_eq!(digest(DigestAlgorithm::Sha384, b"abc").unwrap().len(), 48);
        assert_eq!(digest(DigestAlgorithm::Sha512, b"abc").unwrap().len(), 64);
    }
}
