// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! The chain verifier (spec.md §4.E): host-name check, end-entity key
//! check, iterative path construction, two-pass find-parent, CRL checking,
//! and the verdict-callback flag merge. This is the component every other
//! module in this crate exists to feed.
//!
//! There is no teacher counterpart for the flag-word/`Profile` model this
//! walks (the teacher reports a single `ValidationError` and stops at the
//! first failure); the control flow here is grounded directly in spec.md's
//! algorithm rather than adapted from teacher source. The teacher's
//! `verify`-family functions are the grounding for style: an iterative loop
//! over a `Vec` of slots, not recursion, and errors threaded with `?`.

use xcert_asn1::common::{AlgorithmParameters, DigestAlgorithm, PublicKeyAlgorithm};
use xcert_asn1::extensions::key_usage_bit;
use xcert_asn1::name::{dns_names_match, iter_general_names, rdn_sequences_equal, GeneralName, RdnSequence};
use xcert_asn1::reader::CalendarTime;

use crate::certificate::Certificate;
use crate::config::VerifierConfig;
use crate::crl::{check_crl, Crl};
use crate::error::{FatalError, Result};
use crate::ops::{CryptoOps, KeyKind};
use crate::policy::Profile;
use crate::trust_store::TrustStore;
use crate::types::DNSName;

bitflags::bitflags! {
    /// The 32-bit defect-flag word (spec.md §6's canonical bit table).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BadCert: u32 {
        const BADCERT_EXPIRED       = 1 << 0;
        const BADCERT_REVOKED       = 1 << 1;
        const BADCERT_CN_MISMATCH   = 1 << 2;
        const BADCERT_NOT_TRUSTED   = 1 << 3;
        const BADCRL_NOT_TRUSTED    = 1 << 4;
        const BADCRL_EXPIRED        = 1 << 5;
        const BADCERT_MISSING       = 1 << 6;
        const BADCERT_SKIP_VERIFY   = 1 << 7;
        const BADCERT_FUTURE        = 1 << 8;
        const BADCRL_FUTURE         = 1 << 9;
        const BADCERT_KEY_USAGE     = 1 << 10;
        const BADCERT_EXT_KEY_USAGE = 1 << 11;
        const BADCERT_NS_CERT_TYPE  = 1 << 12;
        const BADCERT_BAD_MD        = 1 << 13;
        const BADCERT_BAD_PK        = 1 << 14;
        const BADCERT_BAD_KEY       = 1 << 15;
        const BADCRL_BAD_MD         = 1 << 16;
        const BADCRL_BAD_PK         = 1 << 17;
        const BADCRL_BAD_KEY        = 1 << 18;
        const BADCERT_OTHER         = 1 << 19;
    }
}

/// One slot of the built chain: the certificate found at that depth and the
/// defects accumulated against it.
pub struct ChainSlot<'a> {
    pub certificate: Certificate<'a>,
    pub flags: BadCert,
}

/// The chain verifier's full output (spec.md §4.E: "a 32-bit defect-flag
/// word and a built chain").
pub struct ChainResult<'a> {
    pub chain: Vec<ChainSlot<'a>>,
    pub flags: BadCert,
}

impl ChainResult<'_> {
    /// `true` iff the merged flag word is `0` -- the "no defect" case spec.md
    /// §7 distinguishes from `CERT_VERIFY_FAILED`.
    pub fn is_clean(&self) -> bool {
        self.flags.is_empty()
    }
}

/// The restart/cooperative-yield state (spec.md §4.E.7, §9's "tagged union"
/// design note). `OpensslOps`'s signature verification is synchronous, so
/// `InSignatureVerify` is never produced by the implementation in this
/// crate; the variant exists so a future incremental backend can populate
/// it without changing this enum's shape or `verify_chain`'s signature.
pub enum RestartContext<'a> {
    None,
    InFindParent {
        candidates: Vec<Certificate<'a>>,
        scan_index: usize,
        fallback: Option<Certificate<'a>>,
        searching_trusted_roots: bool,
    },
    InSignatureVerify {
        token: (),
    },
}

impl Default for RestartContext<'_> {
    fn default() -> Self {
        RestartContext::None
    }
}

/// Borrowed view of the handful of `Frame` fields the chain walk needs,
/// captured inside a single `with_frame` call so the cache's mutex is held
/// only for the duration of that call (spec.md §5).
struct FrameView<'a> {
    der: &'a [u8],
    valid_from: CalendarTime,
    valid_to: CalendarTime,
    issuer_raw: &'a [u8],
    subject_raw: &'a [u8],
    subject_alt_raw: Option<&'a [u8]>,
    tbs: &'a [u8],
    sig: &'a [u8],
    sig_alg_raw: &'a [u8],
    sig_md: Option<DigestAlgorithm>,
    sig_pk: PublicKeyAlgorithm,
    pubkey_raw: &'a [u8],
    ca_istrue: bool,
    max_pathlen: u64,
    key_usage: u16,
    version: u8,
    serial: &'a [u8],
}

fn snapshot<'a>(f: &xcert_asn1::Frame<'a>) -> FrameView<'a> {
    FrameView {
        der: f.raw.as_bytes(),
        valid_from: f.valid_from,
        valid_to: f.valid_to,
        issuer_raw: f.issuer_raw.as_bytes(),
        subject_raw: f.subject_raw.as_bytes(),
        subject_alt_raw: f.subject_alt_raw,
        tbs: f.tbs.as_bytes(),
        sig: f.sig,
        sig_alg_raw: f.sig_alg.as_bytes(),
        sig_md: f.sig_md,
        sig_pk: f.sig_pk,
        pubkey_raw: f.pubkey_raw.as_bytes(),
        ca_istrue: f.ca_istrue,
        max_pathlen: f.max_pathlen,
        key_usage: f.key_usage,
        version: f.version,
        serial: f.serial.as_bytes(),
    }
}

/// Extracts `(use_pss, salt_len)` from a signature `AlgorithmIdentifier`'s
/// raw DER, defaulting to RFC 4055's SHA-1/20-byte default when the
/// optional `RSASSA-PSS-params` is itself absent.
fn pss_params(sig_alg_raw: &[u8]) -> (bool, u16) {
    let parsed: std::result::Result<xcert_asn1::common::AlgorithmIdentifier<'_>, _> =
        asn1::parse_single(sig_alg_raw);
    let Ok(alg) = parsed else {
        return (false, 0);
    };
    match alg.params {
        AlgorithmParameters::RsaPss(Some(params)) => (true, params.salt_length),
        AlgorithmParameters::RsaPss(None) => (true, 20),
        _ => (false, 0),
    }
}

fn key_kind_to_pk_algorithm(kind: KeyKind) -> PublicKeyAlgorithm {
    match kind {
        KeyKind::Rsa => PublicKeyAlgorithm::Rsa,
        KeyKind::RsaPss => PublicKeyAlgorithm::RsaPss,
        KeyKind::Ec => PublicKeyAlgorithm::Ec,
        KeyKind::Ed25519 => PublicKeyAlgorithm::Ed25519,
        KeyKind::Other => PublicKeyAlgorithm::Other,
    }
}

fn self_issued(issuer_raw: &[u8], subject_raw: &[u8]) -> Result<bool> {
    let issuer = RdnSequence::parse(issuer_raw)?;
    let subject = RdnSequence::parse(subject_raw)?;
    Ok(rdn_sequences_equal(&issuer, &subject))
}

/// Host-name check (spec.md §4.E.1). SAN absence is required before the
/// subject-CN fallback is attempted; a SAN that is present but carries no
/// `dNSName` entry does not fall back to the subject CN (spec.md §9's open
/// question, resolved that way).
fn check_host_name(view: &FrameView<'_>, host: DNSName<'_>) -> Result<bool> {
    let target = host.as_str().as_bytes();
    if let Some(san) = view.subject_alt_raw {
        for gn in iter_general_names(san)? {
            if let GeneralName::DnsName(pattern) = gn {
                if dns_names_match(target, pattern) {
                    return Ok(true);
                }
            }
        }
        return Ok(false);
    }
    let subject = RdnSequence::parse(view.subject_raw)?;
    for cn in subject.common_names() {
        if dns_names_match(target, cn) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Result of a single find-parent search (spec.md §4.E.4): the matched
/// certificate and whether its signature over the child actually verified
/// (a non-root fallback may still be returned with `signature_ok == false`
/// is impossible for non-top searches by construction; `top` searches skip
/// signature failures outright).
struct ParentMatch<'a> {
    parent: Certificate<'a>,
    signature_ok: bool,
}

/// `find_parent` (spec.md §4.E.4). `top` selects the trusted-roots search,
/// whose signature-failure candidates are skipped rather than remembered as
/// a fallback.
#[allow(clippy::too_many_arguments)]
fn find_parent<'a>(
    child_view: &FrameView<'_>,
    use_pss: bool,
    salt_len: u16,
    candidates: &[Certificate<'a>],
    top: bool,
    path_cnt: u32,
    self_cnt: u32,
    check_key_usage: bool,
    now: CalendarTime,
    ops: &impl CryptoOps,
) -> Result<Option<ParentMatch<'a>>> {
    let mut fallback: Option<ParentMatch<'a>> = None;

    for candidate in candidates {
        let view = candidate.with_frame(snapshot)?;

        let parent_valid = view.valid_from <= now && now <= view.valid_to;

        let subject_matches_issuer = {
            let subject = RdnSequence::parse(view.subject_raw)?;
            let issuer = RdnSequence::parse(child_view.issuer_raw)?;
            rdn_sequences_equal(&subject, &issuer)
        };
        let ca_ok = (top && view.version < 3) || view.ca_istrue;
        let key_cert_sign_ok =
            !check_key_usage || view.key_usage & key_usage_bit::KEY_CERT_SIGN != 0;
        let parent_match = subject_matches_issuer && ca_ok && key_cert_sign_ok;

        let budget = 1i64 + path_cnt as i64 - self_cnt as i64;
        let path_len_ok = !(view.max_pathlen > 0 && (view.max_pathlen as i64) < budget);

        if !parent_match || !path_len_ok {
            log::debug!(
                "find_parent: candidate rejected (subject_matches_issuer={subject_matches_issuer}, ca_ok={ca_ok}, path_len_ok={path_len_ok})"
            );
            continue;
        }

        let signature_ok = ops.verify(
            view.pubkey_raw,
            child_view.sig_md,
            child_view.tbs,
            child_view.sig,
            use_pss,
            salt_len,
        )?;
        if top && !signature_ok {
            continue;
        }

        let candidate_match = ParentMatch {
            parent: candidate.clone(),
            signature_ok,
        };
        if parent_valid {
            return Ok(Some(candidate_match));
        }
        if fallback.is_none() {
            log::warn!("find_parent: remembering out-of-validity parent as fallback");
            fallback = Some(candidate_match);
        }
    }

    Ok(fallback)
}

/// Verdict-adjustment callback signature (spec.md §6): invoked once per
/// chain slot, top to bottom, and may clear or add flags.
pub type VerdictCallback<'a> = dyn FnMut(&Certificate<'a>, usize, &mut BadCert) -> Result<()> + 'a;

/// The chain verifier's entry point (spec.md §4.E). `intermediates` is the
/// caller-supplied pool of untrusted certificates searched on the second
/// find-parent pass; `crls` is skipped entirely when `trust_store` is
/// callback-backed, per spec.md §6's "when present, CRL checking is
/// disabled (by contract)".
#[allow(clippy::too_many_arguments)]
pub fn verify_chain<'a>(
    ee: &Certificate<'a>,
    intermediates: &[Certificate<'a>],
    trust_store: &TrustStore<'a>,
    crls: &[Crl<'_>],
    profile: &Profile,
    host: Option<DNSName<'_>>,
    config: &VerifierConfig,
    now: CalendarTime,
    ops: &impl CryptoOps,
    mut verdict: Option<&mut VerdictCallback<'a>>,
) -> Result<ChainResult<'a>> {
    let mut chain: Vec<ChainSlot<'a>> = Vec::new();
    let mut child = ee.clone();
    let mut child_is_trusted = false;
    let mut path_cnt: u32 = 0;
    let mut self_cnt: u32 = 0;

    loop {
        chain.push(ChainSlot {
            certificate: child.clone(),
            flags: BadCert::empty(),
        });
        if chain.len() > config.max_intermediate_ca as usize + 1 {
            log::warn!("verify_chain: chain depth {} exceeds max_intermediate_ca", chain.len());
            return Err(FatalError::ChainTooLong);
        }
        let idx = chain.len() - 1;

        let view = child.with_frame(snapshot)?;

        let mut flags = BadCert::empty();
        if view.valid_to < now {
            flags |= BadCert::BADCERT_EXPIRED;
        }
        if view.valid_from > now {
            flags |= BadCert::BADCERT_FUTURE;
        }

        if idx == 0 {
            if let Some(host) = host {
                if !check_host_name(&view, host)? {
                    flags |= BadCert::BADCERT_CN_MISMATCH;
                }
            }
            let ee_key_info = child.with_key_info(ops, view.pubkey_raw, |k| *k)?;
            if !profile.permits_pk(key_kind_to_pk_algorithm(ee_key_info.kind)) {
                flags |= BadCert::BADCERT_BAD_PK;
            }
            if !profile.permits_key_strength(ee_key_info.kind, ee_key_info.bit_length, ee_key_info.curve)
            {
                flags |= BadCert::BADCERT_BAD_KEY;
            }
        }

        if child_is_trusted {
            chain[idx].flags |= flags;
            break;
        }

        let is_self_issued = self_issued(view.issuer_raw, view.subject_raw)?;

        if !profile.permits_md(view.sig_md) {
            flags |= BadCert::BADCERT_BAD_MD;
        }
        if !profile.permits_pk(view.sig_pk) {
            flags |= BadCert::BADCERT_BAD_PK;
        }

        if idx == 0 && is_self_issued && trust_store.contains_der(view.der) {
            chain[idx].flags |= flags;
            break;
        }

        chain[idx].flags |= flags;

        let (use_pss, salt_len) = pss_params(view.sig_alg_raw);

        let trusted_candidates = trust_store.candidates(&child);
        let mut found = find_parent(
            &view,
            use_pss,
            salt_len,
            &trusted_candidates,
            true,
            path_cnt,
            self_cnt,
            config.check_key_usage,
            now,
            ops,
        )?;
        let mut parent_is_trusted = found.is_some();
        if found.is_none() {
            found = find_parent(
                &view,
                use_pss,
                salt_len,
                intermediates,
                false,
                path_cnt,
                self_cnt,
                config.check_key_usage,
                now,
                ops,
            )?;
            parent_is_trusted = false;
        }

        let Some(found) = found else {
            log::debug!("verify_chain: no parent found at depth {idx}");
            chain[idx].flags |= BadCert::BADCERT_NOT_TRUSTED;
            break;
        };

        if !parent_is_trusted && chain.len() > config.max_intermediate_ca as usize {
            log::warn!("verify_chain: path length exceeds max_intermediate_ca={}", config.max_intermediate_ca);
            return Err(FatalError::ChainTooLong);
        }

        if !found.signature_ok {
            log::debug!("verify_chain: parent signature did not verify at depth {idx}");
            chain[idx].flags |= BadCert::BADCERT_NOT_TRUSTED;
        }

        let parent_view = found.parent.with_frame(snapshot)?;
        let parent_key_info = found
            .parent
            .with_key_info(ops, parent_view.pubkey_raw, |k| *k)?;
        if !profile.permits_key_strength(
            parent_key_info.kind,
            parent_key_info.bit_length,
            parent_key_info.curve,
        ) {
            chain[idx].flags |= BadCert::BADCERT_BAD_KEY;
        }

        if !trust_store.is_callback_backed() {
            for crl in crls {
                chain[idx].flags |= check_crl(
                    crl,
                    parent_view.subject_raw,
                    parent_view.key_usage,
                    parent_view.pubkey_raw,
                    view.serial,
                    now,
                    profile,
                    config.check_key_usage,
                    ops,
                )?;
            }
        }

        if chain.len() >= 2 && is_self_issued {
            self_cnt += 1;
        }

        child = found.parent;
        child_is_trusted = parent_is_trusted;
        path_cnt += 1;
    }

    for (depth, slot) in chain.iter_mut().enumerate() {
        if let Some(cb) = verdict.as_deref_mut() {
            cb(&slot.certificate, depth, &mut slot.flags)?;
        }
    }

    let flags = chain
        .iter()
        .fold(BadCert::empty(), |acc, slot| acc | slot.flags);

    Ok(ChainResult { chain, flags })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::tests_support::StubOps;
    use crate::ops::KeyInfo;
    use xcert_asn1::oid;

    fn der_len(len: usize) -> Vec<u8> {
        if len < 0x80 {
            vec![len as u8]
        } else {
            let bytes = len.to_be_bytes();
            let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
            let trimmed = &bytes[first_nonzero..];
            let mut v = vec![0x80 | trimmed.len() as u8];
            v.extend(trimmed);
            v
        }
    }

    fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
        let mut v = vec![tag];
        v.extend(der_len(content.len()));
        v.extend_from_slice(content);
        v
    }

    fn sha256_rsa_alg() -> Vec<u8> {
        tlv(0x30, &tlv(0x06, &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0b]))
    }

    fn atv(oid: &[u8], value: &[u8]) -> Vec<u8> {
        let mut v = Vec::new();
        v.extend(tlv(0x06, oid));
        v.extend(tlv(0x0c, value));
        v
    }

    fn cn_name(cn: &str) -> Vec<u8> {
        let atom = atv(oid::COMMON_NAME_OID, cn.as_bytes());
        let rdn = tlv(0x31, &atom);
        tlv(0x30, &rdn)
    }

    fn basic_constraints_ext(ca: bool, pathlen: Option<u8>) -> Vec<u8> {
        let mut body = Vec::new();
        if ca {
            body.extend(tlv(0x01, &[0xff]));
        }
        if let Some(p) = pathlen {
            body.extend(tlv(0x02, &[p]));
        }
        let value = tlv(0x30, &body);
        ext_der(oid::BASIC_CONSTRAINTS_OID, true, &value)
    }

    fn key_usage_ext(byte: u8) -> Vec<u8> {
        let value = tlv(0x03, &[0x01, byte]);
        ext_der(oid::KEY_USAGE_OID, true, &value)
    }

    fn ext_der(oid: &[u8], critical: bool, value: &[u8]) -> Vec<u8> {
        let mut body = tlv(0x06, oid);
        if critical {
            body.extend(tlv(0x01, &[0xff]));
        }
        body.extend(tlv(0x04, value));
        tlv(0x30, &body)
    }

    #[allow(clippy::too_many_arguments)]
    fn build_cert(
        cn: &str,
        issuer_cn: &str,
        valid_from: &str,
        valid_to: &str,
        version3: bool,
        extensions: &[Vec<u8>],
    ) -> Vec<u8> {
        let serial = tlv(0x02, &[0x01]);
        let sig_alg = sha256_rsa_alg();
        let issuer = cn_name(issuer_cn);
        let validity = tlv(
            0x30,
            &[tlv(0x17, valid_from.as_bytes()), tlv(0x17, valid_to.as_bytes())].concat(),
        );
        let subject = cn_name(cn);
        let spki = tlv(0x30, &[sha256_rsa_alg(), tlv(0x03, &[0x00, 0x01])].concat());

        let mut tbs_body = Vec::new();
        if version3 {
            tbs_body.extend(tlv(0xa0, &tlv(0x02, &[0x02])));
        }
        tbs_body.extend(serial);
        tbs_body.extend(sig_alg.clone());
        tbs_body.extend(issuer);
        tbs_body.extend(validity);
        tbs_body.extend(subject);
        tbs_body.extend(spki);
        if version3 && !extensions.is_empty() {
            let ext_seq = tlv(0x30, &extensions.concat());
            tbs_body.extend(tlv(0xa3, &ext_seq));
        }
        let tbs = tlv(0x30, &tbs_body);
        let sig = tlv(0x03, &[0x00, 0x01]);
        let cert_body: Vec<u8> = [tbs, sig_alg, sig].concat();
        tlv(0x30, &cert_body)
    }

    fn accepting_key_info() -> KeyInfo {
        KeyInfo {
            kind: KeyKind::Rsa,
            bit_length: 2048,
            curve: None,
        }
    }
    #[test]
    fn test_self_signed_trusted_root_is_clean() {
        let root_der = build_cert(
            "root",
            "root",
            "200101000000Z",
            "300101000000Z",
            true,
            &[basic_constraints_ext(true, None), key_usage_ext(0x06)],
        );
        let root = Certificate::from_der(&root_der);
        let store = TrustStore::List(vec![root.clone()]);
        let ops = StubOps::new(true, accepting_key_info());
        let now = CalendarTime {
            year: 2025,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        };
        let result = verify_chain(
            &root,
            &[],
            &store,
            &[],
            &Profile::default_profile(),
            None,
            &VerifierConfig::default(),
            now,
            &ops,
            None,
        )
        .unwrap();
        assert!(result.is_clean(), "unexpected flags: {:?}", result.flags);
    }

    #[test]
    fn test_expired_ee_sets_bit() {
        let root_der = build_cert(
            "root",
            "root",
            "200101000000Z",
            "300101000000Z",
            true,
            &[basic_constraints_ext(true, None), key_usage_ext(0x06)],
        );
        let ee_der = build_cert(
            "ee",
            "root",
            "200101000000Z",
            "210101000000Z",
            true,
            &[],
        );
        let root = Certificate::from_der(&root_der);
        let ee = Certificate::from_der(&ee_der);
        let store = TrustStore::List(vec![root]);
        let ops = StubOps::new(true, accepting_key_info());
        let now = CalendarTime {
            year: 2025,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        };
        let result = verify_chain(
            &ee,
            &[],
            &store,
            &[],
            &Profile::default_profile(),
            None,
            &VerifierConfig::default(),
            now,
            &ops,
            None,
        )
        .unwrap();
        assert!(result.flags.contains(BadCert::BADCERT_EXPIRED));
    }

    #[test]
    fn test_intermediate_without_ca_bit_is_not_trusted() {
        let root_der = build_cert(
            "root",
            "root",
            "200101000000Z",
            "300101000000Z",
            true,
            &[basic_constraints_ext(true, None), key_usage_ext(0x06)],
        );
        let intermediate_der = build_cert(
            "intermediate",
            "root",
            "200101000000Z",
            "300101000000Z",
            true,
            &[basic_constraints_ext(false, None)],
        );
        let ee_der = build_cert(
            "ee",
            "intermediate",
            "200101000000Z",
            "300101000000Z",
            true,
            &[],
        );
        let root = Certificate::from_der(&root_der);
        let intermediate = Certificate::from_der(&intermediate_der);
        let ee = Certificate::from_der(&ee_der);
        let store = TrustStore::List(vec![root]);
        let ops = StubOps::new(true, accepting_key_info());
        let now = CalendarTime {
            year: 2025,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        };
        let result = verify_chain(
            &ee,
            &[intermediate],
            &store,
            &[],
            &Profile::default_profile(),
            None,
            &VerifierConfig::default(),
            now,
            &ops,
            None,
        )
        .unwrap();
        assert!(result.flags.contains(BadCert::BADCERT_NOT_TRUSTED));
        assert_eq!(result.chain.len(), 1, "chain should terminate at the EE");
    }

    #[test]
    fn test_chain_too_long_is_fatal() {
        let root_der = build_cert(
            "root",
            "root",
            "200101000000Z",
            "300101000000Z",
            true,
            &[basic_constraints_ext(true, None), key_usage_ext(0x06)],
        );
        let root = Certificate::from_der(&root_der);

        let mut intermediate_ders = Vec::new();
        for i in 0..10u8 {
            let issuer = if i == 0 {
                "root".to_string()
            } else {
                format!("i{}", i - 1)
            };
            intermediate_ders.push(build_cert(
                &format!("i{i}"),
                &issuer,
                "200101000000Z",
                "300101000000Z",
                true,
                &[basic_constraints_ext(true, None), key_usage_ext(0x06)],
            ));
        }
        let intermediates: Vec<Certificate<'_>> =
            intermediate_ders.iter().map(|d| Certificate::from_der(d)).collect();

        let ee_der = build_cert("ee", "i9", "200101000000Z", "300101000000Z", true, &[]);
        let ee = Certificate::from_der(&ee_der);

        let store = TrustStore::List(vec![root]);
        let mut config = VerifierConfig::default();
        config.max_intermediate_ca = 8;
        let ops = StubOps::new(true, accepting_key_info());
        let now = CalendarTime {
            year: 2025,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        };
        let result = verify_chain(
            &ee,
            &intermediates,
            &store,
            &[],
            &Profile::default_profile(),
            None,
            &config,
            now,
            &ops,
            None,
        );
        assert!(matches!(result, Err(FatalError::ChainTooLong)));
    }

    #[test]
    fn test_wildcard_host_match() {
        let root_der = build_cert(
            "root",
            "root",
            "200101000000Z",
            "300101000000Z",
            true,
            &[basic_constraints_ext(true, None), key_usage_ext(0x06)],
        );
        let san_ext = {
            let dns_name = tlv(0x82, b"*.example.com");
            ext_der(oid::SUBJECT_ALTERNATIVE_NAME_OID, false, &dns_name)
        };
        let ee_der = build_cert(
            "ee",
            "root",
            "200101000000Z",
            "300101000000Z",
            true,
            &[san_ext],
        );
        let root = Certificate::from_der(&root_der);
        let ee = Certificate::from_der(&ee_der);
        let store = TrustStore::List(vec![root]);
        let ops = StubOps::new(true, accepting_key_info());
        let now = CalendarTime {
            year: 2025,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        };

        let host = DNSName::new("a.example.com").unwrap();
        let result = verify_chain(
            &ee,
            &[],
            &store,
            &[],
            &Profile::default_profile(),
            Some(host),
            &VerifierConfig::default(),
            now,
            &ops,
            None,
        )
        .unwrap();
        assert!(!result.flags.contains(BadCert::BADCERT_CN_MISMATCH));

        let bad_host = DNSName::new("example.com").unwrap();
        let result = verify_chain(
            &ee,
            &[],
            &store,
            &[],
            &Profile::default_profile(),
            Some(bad_host),
            &VerifierConfig::default(),
            now,
            &ops,
            None,
        )
        .unwrap();
        assert!(result.flags.contains(BadCert::BADCERT_CN_MISMATCH));
    }
}
