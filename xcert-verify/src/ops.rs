// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! `CryptoOps`: the capability trait design notes (spec.md §9) describe for
//! bignum/signature backends, narrowed to the handful of operations the
//! chain verifier actually calls. An `OpensslOps` implementation backs it
//! with `xcert-crypto`; tests substitute a stub that records calls instead
//! of doing real cryptography.
//!
//! The trait speaks plain spans and a small `KeyInfo` struct rather than
//! `xcert_crypto::PublicKey` directly, so neither `xcert-verify`'s public
//! API nor its tests need to construct a real OpenSSL key.

use xcert_asn1::common::DigestAlgorithm;

use crate::error::{FatalError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Rsa,
    RsaPss,
    Ec,
    Ed25519,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcCurve {
    P256,
    P384,
    P521,
    Other,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyInfo {
    pub kind: KeyKind,
    pub bit_length: u32,
    pub curve: Option<EcCurve>,
}

pub trait CryptoOps {
    /// Decodes a `SubjectPublicKeyInfo` DER span far enough to answer the
    /// profile's key-strength questions (spec.md §4.E.2/§4.E.4's
    /// `BAD_KEY` check), without keeping the key context alive past the
    /// call.
    fn key_info(&self, spki_der: &[u8]) -> Result<KeyInfo>;

    /// Verifies `signature` over `tbs` using the key encoded in
    /// `spki_der`, selecting padding/salt length for RSASSA-PSS via
    /// `use_pss`/`salt_len` (ignored for non-RSA keys). `Ok(false)` means a
    /// clean verification failure (spec.md §7 item 2's flag-word stratum);
    /// `Err` means the backend itself failed to decode the key or run the
    /// primitive (§7 item 3's fatal stratum), which callers must never fold
    /// into a verification-defect flag.
    fn verify(
        &self,
        spki_der: &[u8],
        md: Option<DigestAlgorithm>,
        tbs: &[u8],
        signature: &[u8],
        use_pss: bool,
        salt_len: u16,
    ) -> Result<bool>;

    /// Computes a standalone digest, used by the trust-anchor lookup path.
    fn digest(&self, alg: DigestAlgorithm, data: &[u8]) -> Result<Vec<u8>>;
}

/// The production [`CryptoOps`] implementation, backed by OpenSSL through
/// `xcert-crypto`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpensslOps;

impl CryptoOps for OpensslOps {
    fn key_info(&self, spki_der: &[u8]) -> Result<KeyInfo> {
        let key = xcert_crypto::PublicKey::from_spki_der(spki_der).map_err(FatalError::from)?;
        let kind = match key.kind() {
            xcert_crypto::PublicKeyKind::Rsa => KeyKind::Rsa,
            xcert_crypto::PublicKeyKind::Ec => KeyKind::Ec,
            xcert_crypto::PublicKeyKind::Ed25519 => KeyKind::Ed25519,
            xcert_crypto::PublicKeyKind::Other => KeyKind::Other,
        };
        let curve = key.curve_nid().map(|nid| match nid {
            openssl::nid::Nid::X9_62_PRIME256V1 => EcCurve::P256,
            openssl::nid::Nid::SECP384R1 => EcCurve::P384,
            openssl::nid::Nid::SECP521R1 => EcCurve::P521,
            _ => EcCurve::Other,
        });
        Ok(KeyInfo {
            kind,
            bit_length: key.bit_length(),
            curve,
        })
    }

    fn verify(
        &self,
        spki_der: &[u8],
        md: Option<DigestAlgorithm>,
        tbs: &[u8],
        signature: &[u8],
        use_pss: bool,
        salt_len: u16,
    ) -> Result<bool> {
        let key = xcert_crypto::PublicKey::from_spki_der(spki_der).map_err(FatalError::from)?;
        key.verify(md, tbs, signature, use_pss, salt_len)
            .map_err(FatalError::from)
    }

    fn digest(&self, alg: DigestAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
        xcert_crypto::pkey::digest(alg, data).map_err(FatalError::from)
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use super::*;

    /// A `CryptoOps` stub for chain-verifier tests: `verify` always
    /// returns a caller-supplied canned answer and `key_info` returns a
    /// caller-supplied canned `KeyInfo`, so tests can exercise
    /// find-parent's control flow without real signatures or keys.
    pub struct StubOps {
        pub verify_result: bool,
        pub key_info_result: KeyInfo,
    }

    impl StubOps {
        pub fn new(verify_result: bool, key_info_result: KeyInfo) -> Self {
            StubOps {
                verify_result,
                key_info_result,
            }
        }

        pub fn accepting() -> Self {
            StubOps::new(
                true,
                KeyInfo {
                    kind: KeyKind::Rsa,
                    bit_length: 2048,
                    curve: None,
                },
            )
        }
    }

    impl CryptoOps for StubOps {
        fn key_info(&self, _spki_der: &[u8]) -> Result<KeyInfo> {
            Ok(self.key_info_result)
        }

        fn verify(
            &self,
            _spki_der: &[u8],
            _md: Option<DigestAlgorithm>,
            _tbs: &[u8],
            _signature: &[u8],
            _use_pss: bool,
            _salt_len: u16,
        ) -> Result<bool> {
            Ok(self.verify_result)
        }

        fn digest(&self, _alg: DigestAlgorithm, _data: &[u8]) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }
}
