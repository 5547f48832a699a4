// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! The frame parser (component B): a single breadth-first pass over a
//! certificate's DER that populates a [`Frame`] of sub-spans and scalars
//! without copying any payload bytes.
//!
//! The outer walk uses the hand-rolled [`Cursor`] (mirroring the tag
//! reader's span-only data model); self-contained sub-structures
//! (`AlgorithmIdentifier`, `Time`) are handed off to the `asn1` crate's
//! derive-based decoders via [`Cursor::get_tag_full`], so this file never
//! re-implements their grammar.

use crate::common::{AlgorithmIdentifier, DigestAlgorithm, PublicKeyAlgorithm};
use crate::error::{Error, ErrorKind, Result};
use crate::extensions::{self, ExtFlags};
use crate::name::RdnSequence;
use crate::reader::{CalendarTime, Cursor, TAG_SEQUENCE};
use crate::span::RawSpan;

/// A fully populated frame (spec §3): spans and scalars pointing into the
/// certificate's own DER buffer.
#[derive(Debug)]
pub struct Frame<'a> {
    pub raw: RawSpan<'a>,
    pub tbs: RawSpan<'a>,
    pub serial: RawSpan<'a>,
    pub pubkey_raw: RawSpan<'a>,
    pub issuer_raw: RawSpan<'a>,
    pub subject_raw: RawSpan<'a>,
    pub sig: &'a [u8],
    pub sig_alg: RawSpan<'a>,
    pub v3_ext: Option<RawSpan<'a>>,
    pub subject_alt_raw: Option<&'a [u8]>,
    pub ext_key_usage_raw: Option<&'a [u8]>,
    pub crt_policies_raw: Option<&'a [u8]>,
    pub issuer_id: Option<(u8, &'a [u8])>,
    pub subject_id: Option<(u8, &'a [u8])>,

    pub version: u8,
    pub sig_md: Option<DigestAlgorithm>,
    pub sig_pk: PublicKeyAlgorithm,
    pub valid_from: CalendarTime,
    pub valid_to: CalendarTime,
    pub ca_istrue: bool,
    pub max_pathlen: u64,
    pub ext_types: u32,
    pub key_usage: u16,
    pub ns_cert_type: u8,
}

impl<'a> Frame<'a> {
    /// Runs the breadth-first parse of spec §4.B over `der`, a single DER
    /// certificate. Trailing bytes beyond the declared `Certificate`
    /// encoding are tolerated but excluded from `raw`.
    pub fn parse(der: &'a [u8]) -> Result<Self> {
        if der.is_empty() {
            return Err(Error::new(ErrorKind::InvalidLength, "empty certificate"));
        }

        // Step 1-3: outer Certificate ::= SEQUENCE { tbs, sig_alg, sig }.
        let mut outer = Cursor::new(der);
        let cert_body = outer.get_tag(TAG_SEQUENCE)?;
        let raw = RawSpan::new(&der[..cert_body.len() + tlv_header_len(cert_body.len())]);

        let mut cur = Cursor::new(cert_body);
        let tbs_full = cur.read_tlv_full()?;
        let tbs_body = {
            let mut t = Cursor::new(tbs_full);
            t.get_tag(TAG_SEQUENCE)?
        };
        let tbs = RawSpan::new(tbs_full);

        let outer_sig_alg_full = cur.get_tag_full(TAG_SEQUENCE)?;
        let sig_alg_span = RawSpan::new(outer_sig_alg_full);
        let outer_sig_alg: AlgorithmIdentifier<'_> = asn1::parse_single(outer_sig_alg_full)?;

        let (_, sig_bytes) = cur.get_bitstring()?;

        if !cur.is_empty() {
            return Err(Error::new(ErrorKind::InvalidFormat, "certificate trailer"));
        }

        // Re-enter tbsCertificate.
        let mut tbs_cur = Cursor::new(tbs_body);

        let version = match tbs_cur.get_optional_tag(0xa0) {
            Some(content) => {
                let mut vc = Cursor::new(content);
                let v = vc.get_small_uint()?;
                if !vc.is_empty() {
                    return Err(Error::new(ErrorKind::InvalidVersion, "version trailer"));
                }
                match v {
                    0 => 1,
                    1 => 2,
                    2 => 3,
                    _ => return Err(Error::new(ErrorKind::UnknownVersion, "version")),
                }
            }
            None => 1,
        };

        let serial_start = tbs_cur.position();
        let serial_bytes = tbs_cur.get_int_bytes()?;
        let serial = RawSpan::new(&tbs_body[serial_start..tbs_cur.position()]);
        let _ = serial_bytes;

        let inner_sig_alg_full = tbs_cur.get_tag_full(TAG_SEQUENCE)?;
        if inner_sig_alg_full != outer_sig_alg_full {
            log::debug!("Frame::parse: inner/outer signatureAlgorithm mismatch");
            return Err(Error::new(ErrorKind::SigMismatch, "signatureAlgorithm mismatch"));
        }
        let (sig_md, sig_pk) = outer_sig_alg.sig_md_pk();

        let issuer_full = tbs_cur.read_tlv_full()?;
        {
            let mut ic = Cursor::new(issuer_full);
            ic.get_tag(TAG_SEQUENCE)?;
        }
        let issuer_raw = RawSpan::new(issuer_full);
        validate_name_structure(issuer_full)?;

        let validity_body = tbs_cur.get_tag(TAG_SEQUENCE)?;
        let (valid_from, valid_to) = {
            let mut vc = Cursor::new(validity_body);
            let from = vc.get_time()?;
            let to = vc.get_time()?;
            if !vc.is_empty() {
                return Err(Error::new(ErrorKind::InvalidFormat, "validity trailer"));
            }
            (from, to)
        };

        let subject_full = tbs_cur.read_tlv_full()?;
        {
            let mut sc = Cursor::new(subject_full);
            sc.get_tag(TAG_SEQUENCE)?;
        }
        let subject_raw = RawSpan::new(subject_full);
        validate_name_structure(subject_full)?;

        let spki_full = tbs_cur.get_tag_full(TAG_SEQUENCE)?;
        let pubkey_raw = RawSpan::new(spki_full);

        let issuer_id = tbs_cur
            .get_optional_tag(0x81)
            .map(|content| (1u8, content));
        let subject_id = tbs_cur
            .get_optional_tag(0x82)
            .map(|content| (2u8, content));

        let mut ext_flags = ExtFlags::default();
        let mut v3_ext = None;
        if version == 3 {
            if let Some(ext_outer) = tbs_cur.get_optional_tag(0xa3) {
                let mut ec = Cursor::new(ext_outer);
                let start = ec.position();
                let body = ec.get_tag(TAG_SEQUENCE)?;
                v3_ext = Some(RawSpan::new(&ext_outer[start..ec.position()]));
                ext_flags = extensions::walk_extensions(body, true)?;
                if !ec.is_empty() {
                    return Err(Error::new(ErrorKind::InvalidExtensions, "extensions trailer"));
                }
            }
        }

        if !tbs_cur.is_empty() {
            return Err(Error::new(ErrorKind::InvalidFormat, "tbsCertificate trailer"));
        }

        Ok(Frame {
            raw,
            tbs,
            serial,
            pubkey_raw,
            issuer_raw,
            subject_raw,
            sig: sig_bytes,
            sig_alg: sig_alg_span,
            v3_ext,
            subject_alt_raw: ext_flags.subject_alt_raw,
            ext_key_usage_raw: ext_flags.ext_key_usage_raw,
            crt_policies_raw: ext_flags.crt_policies_raw,
            issuer_id,
            subject_id,
            version,
            sig_md,
            sig_pk,
            valid_from,
            valid_to,
            ca_istrue: ext_flags.ca_istrue,
            max_pathlen: ext_flags.max_pathlen,
            ext_types: ext_flags.ext_types,
            key_usage: ext_flags.key_usage,
            ns_cert_type: ext_flags.ns_cert_type,
        })
    }

    /// The user-visible path length constraint, undoing the `+1` storage
    /// bias (spec §3). `None` means the extension was absent or carried no
    /// `pathLenConstraint`.
    pub fn pathlen_constraint(&self) -> Option<u64> {
        if self.max_pathlen == 0 {
            None
        } else {
            Some(self.max_pathlen - 1)
        }
    }

    pub fn issuer(&self) -> Result<RdnSequence<'a>> {
        RdnSequence::parse(self.issuer_raw.as_bytes())
    }

    pub fn subject(&self) -> Result<RdnSequence<'a>> {
        RdnSequence::parse(self.subject_raw.as_bytes())
    }
}

/// Structural sanity check for `issuer`/`subject` (spec §3's "verified by
/// self-compare" invariant): the span must parse as a well-formed RDN
/// sequence, even though the caller may never materialize it further.
fn validate_name_structure(raw: &[u8]) -> Result<()> {
    RdnSequence::parse(Cursor::new(raw).get_tag(TAG_SEQUENCE)?).map(|_| ())
}

fn tlv_header_len(content_len: usize) -> usize {
    if content_len < 0x80 {
        2
    } else {
        let mut n = content_len;
        let mut nbytes = 0;
        while n > 0 {
            n >>= 8;
            nbytes += 1;
        }
        2 + nbytes
    }
}
