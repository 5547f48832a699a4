// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! CRL checking (spec.md §4.E.5). Per spec.md §1/§6, "CRL parsing itself is
//! external" -- this module consumes already-decoded CRL fields as an
//! opaque per-CRL capability, the same way the chain verifier consumes
//! hash/signature primitives through [`crate::ops::CryptoOps`]. There is no
//! counterpart to this in the teacher, whose revocation checking is done on
//! the Python side; the shape here is grounded in spec.md's field list.

use xcert_asn1::common::{DigestAlgorithm, PublicKeyAlgorithm};
use xcert_asn1::reader::CalendarTime;

use crate::chain::BadCert;
use crate::error::Result;
use crate::ops::CryptoOps;
use crate::policy::Profile;

/// One revoked-certificate entry from a CRL's `revokedCertificates` list.
pub struct RevokedEntry<'a> {
    pub serial: &'a [u8],
    pub revocation_date: CalendarTime,
}

/// A single already-decoded CRL, handed in as an opaque capability (spec.md
/// §6: "the core consumes `(issuer_raw, this_update, next_update, tbs, sig,
/// sig_md, sig_pk, sig_opts, revoked_entries)` per CRL").
pub struct Crl<'a> {
    pub issuer_raw: &'a [u8],
    pub this_update: CalendarTime,
    pub next_update: CalendarTime,
    pub tbs: &'a [u8],
    pub sig: &'a [u8],
    pub sig_md: Option<DigestAlgorithm>,
    pub sig_pk: PublicKeyAlgorithm,
    /// `true` when `sig_pk` is `RsaPss` and the signature uses PSS padding;
    /// `salt_len` is meaningful only in that case.
    pub use_pss: bool,
    pub salt_len: u16,
    pub revoked_entries: &'a [RevokedEntry<'a>],
}

/// Checks `crl` against `child_serial`, given the parent's subject (for the
/// issuer match) and SPKI (for signature verification), and the current
/// time. Folds every applicable bit from spec.md §4.E.5's list; a CRL whose
/// issuer does not match `parent_subject_raw` is skipped entirely (not
/// merely "not applicable" -- it is not this parent's CRL).
pub fn check_crl(
    crl: &Crl<'_>,
    parent_subject_raw: &[u8],
    parent_key_usage: u16,
    parent_spki_der: &[u8],
    child_serial: &[u8],
    now: CalendarTime,
    profile: &Profile,
    check_key_usage: bool,
    ops: &impl CryptoOps,
) -> Result<BadCert> {
    if crl.issuer_raw != parent_subject_raw {
        return Ok(BadCert::empty());
    }

    let mut flags = BadCert::empty();

    if !profile.permits_md(crl.sig_md) {
        flags |= BadCert::BADCRL_BAD_MD;
    }
    if !profile.permits_pk(crl.sig_pk) {
        flags |= BadCert::BADCRL_BAD_PK;
    }

    if check_key_usage && parent_key_usage & xcert_asn1::extensions::key_usage_bit::CRL_SIGN == 0 {
        flags |= BadCert::BADCRL_NOT_TRUSTED;
    }

    if !ops.verify(
        parent_spki_der,
        crl.sig_md,
        crl.tbs,
        crl.sig,
        crl.use_pss,
        crl.salt_len,
    )? {
        flags |= BadCert::BADCRL_NOT_TRUSTED;
    }

    if let Ok(key_info) = ops.key_info(parent_spki_der) {
        if !profile.permits_key_strength(key_info.kind, key_info.bit_length, key_info.curve) {
            flags |= BadCert::BADCERT_BAD_KEY;
        }
    }

    if crl.next_update < now {
        flags |= BadCert::BADCRL_EXPIRED;
    }
    if crl.this_update > now {
        flags |= BadCert::BADCRL_FUTURE;
    }

    for entry in crl.revoked_entries {
        if entry.serial == child_serial && entry.revocation_date < now {
            log::debug!("check_crl: certificate serial marked revoked");
            flags |= BadCert::BADCERT_REVOKED;
            break;
        }
    }

    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::tests_support::StubOps;

    fn time(year: u16) -> CalendarTime {
        CalendarTime {
            year,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    #[test]
    fn test_wrong_issuer_is_skipped() {
        let crl = Crl {
            issuer_raw: b"issuer-a",
            this_update: time(2020),
            next_update: time(2099),
            tbs: b"",
            sig: b"",
            sig_md: Some(DigestAlgorithm::Sha256),
            sig_pk: PublicKeyAlgorithm::Rsa,
            use_pss: false,
            salt_len: 0,
            revoked_entries: &[],
        };
        let flags = check_crl(
            &crl,
            b"issuer-b",
            0xffff,
            &[],
            b"serial",
            time(2025),
            &Profile::default_profile(),
            true,
            &StubOps::accepting(),
        )
        .unwrap();
        assert!(flags.is_empty());
    }

    #[test]
    fn test_revoked_serial_sets_bit() {
        let revoked = [RevokedEntry {
            serial: b"abc",
            revocation_date: time(2024),
        }];
        let crl = Crl {
            issuer_raw: b"issuer-a",
            this_update: time(2020),
            next_update: time(2099),
            tbs: b"tbs",
            sig: b"sig",
            sig_md: Some(DigestAlgorithm::Sha256),
            sig_pk: PublicKeyAlgorithm::Rsa,
            use_pss: false,
            salt_len: 0,
            revoked_entries: &revoked,
        };
        let flags = check_crl(
            &crl,
            b"issuer-a",
            0xffff,
            &[],
            b"abc",
            time(2025),
            &Profile::default_profile(),
            true,
            &StubOps::accepting(),
        )
        .unwrap();
        assert!(flags.contains(BadCert::BADCERT_REVOKED));
    }

    #[test]
    fn test_expired_crl_sets_bit() {
        let crl = Crl {
            issuer_raw: b"issuer-a",
            this_update: time(2020),
            next_update: time(2021),
            tbs: b"tbs",
            sig: b"sig",
            sig_md: Some(DigestAlgorithm::Sha256),
            sig_pk: PublicKeyAlgorithm::Rsa,
            use_pss: false,
            salt_len: 0,
            revoked_entries: &[],
        };
        let flags = check_crl(
            &crl,
            b"issuer-a",
            0xffff,
            &[],
            b"abc",
            time(2025),
            &Profile::default_profile(),
            true,
            &StubOps::accepting(),
        )
        .unwrap();
        assert!(flags.contains(BadCert::BADCRL_EXPIRED));
    }
}
