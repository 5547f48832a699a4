// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! `Profile`: the cryptographic acceptability record spec.md §3 describes
//! (allowed hash bitset, allowed PK-algorithm bitset, allowed curve bitset,
//! minimum RSA bit length), plus the three built-in constants it promises
//! (`default`, `next`, `suite_b`). This replaces the teacher's CA/B
//! Forum-specific `Policy`/`ExtensionPolicy` machinery, which checked a much
//! wider set of RFC 5280 extension-conformance rules than this system's
//! profile concept covers; the teacher's permitted-algorithm *tables*
//! (`WEBPKI_PERMITTED_SPKI_ALGORITHMS` / `WEBPKI_PERMITTED_SIGNATURE_ALGORITHMS`)
//! are what `default` is grounded on.

use xcert_asn1::common::{DigestAlgorithm, PublicKeyAlgorithm};

use crate::ops::{EcCurve, KeyKind};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HashSet: u8 {
        const SHA1   = 1 << 0;
        const SHA256 = 1 << 1;
        const SHA384 = 1 << 2;
        const SHA512 = 1 << 3;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PkSet: u8 {
        const RSA     = 1 << 0;
        const RSA_PSS = 1 << 1;
        const EC      = 1 << 2;
        const ED25519 = 1 << 3;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CurveSet: u8 {
        const P256 = 1 << 0;
        const P384 = 1 << 1;
        const P521 = 1 << 2;
    }
}

/// A cryptographic acceptability profile (spec.md §3's "Profile" record).
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub allowed_hashes: HashSet,
    pub allowed_pk_algorithms: PkSet,
    pub allowed_curves: CurveSet,
    pub min_rsa_bits: u32,
}

impl Profile {
    /// The Web PKI baseline this crate ships, grounded in the teacher's
    /// CA/B Forum 7.1.3.1/7.1.3.2 permitted-algorithm tables: SHA-256
    /// upward, RSA/RSA-PSS/EC, P-256/P-384/P-521, 2048-bit RSA minimum.
    pub const fn default_profile() -> Self {
        Profile {
            allowed_hashes: HashSet::SHA256
                .union(HashSet::SHA384)
                .union(HashSet::SHA512),
            allowed_pk_algorithms: PkSet::RSA.union(PkSet::RSA_PSS).union(PkSet::EC),
            allowed_curves: CurveSet::P256.union(CurveSet::P384).union(CurveSet::P521),
            min_rsa_bits: 2048,
        }
    }

    /// A forward-looking profile that additionally accepts Ed25519 and
    /// raises the RSA floor, for deployments that can assume modern peers.
    pub const fn next_profile() -> Self {
        Profile {
            allowed_hashes: HashSet::SHA256.union(HashSet::SHA384).union(HashSet::SHA512),
            allowed_pk_algorithms: PkSet::RSA
                .union(PkSet::RSA_PSS)
                .union(PkSet::EC)
                .union(PkSet::ED25519),
            allowed_curves: CurveSet::P256.union(CurveSet::P384).union(CurveSet::P521),
            min_rsa_bits: 3072,
        }
    }

    /// NSA Suite B: SHA-256/SHA-384, EC only, P-256/P-384 only.
    pub const fn suite_b_profile() -> Self {
        Profile {
            allowed_hashes: HashSet::SHA256.union(HashSet::SHA384),
            allowed_pk_algorithms: PkSet::EC,
            allowed_curves: CurveSet::P256.union(CurveSet::P384),
            min_rsa_bits: 0,
        }
    }

    pub fn permits_md(&self, md: Option<DigestAlgorithm>) -> bool {
        let bit = match md {
            Some(DigestAlgorithm::Sha1) => HashSet::SHA1,
            Some(DigestAlgorithm::Sha256) => HashSet::SHA256,
            Some(DigestAlgorithm::Sha384) => HashSet::SHA384,
            Some(DigestAlgorithm::Sha512) => HashSet::SHA512,
            // Ed25519 carries no separate digest identifier; it is gated
            // solely by `permits_pk`.
            None => return true,
        };
        self.allowed_hashes.contains(bit)
    }

    pub fn permits_pk(&self, pk: PublicKeyAlgorithm) -> bool {
        let bit = match pk {
            PublicKeyAlgorithm::Rsa => PkSet::RSA,
            PublicKeyAlgorithm::RsaPss => PkSet::RSA_PSS,
            PublicKeyAlgorithm::Ec => PkSet::EC,
            PublicKeyAlgorithm::Ed25519 => PkSet::ED25519,
            PublicKeyAlgorithm::Other => return false,
        };
        self.allowed_pk_algorithms.contains(bit)
    }

    /// `BAD_KEY`: key strength/curve is outside this profile. RSA/RSA-PSS
    /// keys are checked against `min_rsa_bits`; EC keys against
    /// `allowed_curves`; Ed25519 has a fixed strength and always passes.
    pub fn permits_key_strength(&self, kind: KeyKind, bit_length: u32, curve: Option<EcCurve>) -> bool {
        match kind {
            KeyKind::Rsa | KeyKind::RsaPss => bit_length >= self.min_rsa_bits,
            KeyKind::Ec => match curve {
                Some(EcCurve::P256) => self.allowed_curves.contains(CurveSet::P256),
                Some(EcCurve::P384) => self.allowed_curves.contains(CurveSet::P384),
                Some(EcCurve::P521) => self.allowed_curves.contains(CurveSet::P521),
                _ => false,
            },
            KeyKind::Ed25519 => true,
            KeyKind::Other => false,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::default_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_permits_sha256_rsa() {
        let p = Profile::default_profile();
        assert!(p.permits_md(Some(DigestAlgorithm::Sha256)));
        assert!(p.permits_pk(PublicKeyAlgorithm::Rsa));
        assert!(!p.permits_md(Some(DigestAlgorithm::Sha1)));
    }

    #[test]
    fn test_default_profile_rsa_strength() {
        let p = Profile::default_profile();
        assert!(p.permits_key_strength(KeyKind::Rsa, 2048, None));
        assert!(!p.permits_key_strength(KeyKind::Rsa, 1024, None));
    }

    #[test]
    fn test_suite_b_rejects_rsa() {
        let p = Profile::suite_b_profile();
        assert!(!p.permits_pk(PublicKeyAlgorithm::Rsa));
        assert!(p.permits_key_strength(KeyKind::Ec, 256, Some(EcCurve::P256)));
    }

    #[test]
    fn test_ed25519_only_in_next_profile() {
        assert!(!Profile::default_profile().permits_pk(PublicKeyAlgorithm::Ed25519));
        assert!(Profile::next_profile().permits_pk(PublicKeyAlgorithm::Ed25519));
    }
}
