// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! The extension walker (spec §4.C).
//!
//! Traverses the `Extensions` SEQUENCE inside a certificate's `tbsCertificate`,
//! dispatching on OID via a static table rather than a branching `match` on
//! every extension kind (Design Notes: "Dynamic dispatch of extension
//! parsers"). Unknown critical extensions are a hard parse failure in strict
//! mode; everything else is recorded into a single recognized-extension
//! bitset. The previous generation's implementation (which this system
//! replaces) reused an OID constant as a bitset value in one place when
//! testing for CertificatePolicies; that conflation does not exist here --
//! `ExtKind` is the single enumeration for every extension this decoder
//! recognizes.

use crate::error::{Error, ErrorKind, Result};
use crate::oid;
use crate::reader::{Cursor, TagFilter, TAG_OID, TAG_SEQUENCE};

/// Bitset of recognized extensions present in a certificate (spec's
/// `ext_types`). Each bit is set at most once; a second occurrence of the
/// same extension is a hard `INVALID_EXTENSIONS` error (spec §4.C).
pub mod ext_kind {
    pub const BASIC_CONSTRAINTS: u32 = 1 << 0;
    pub const KEY_USAGE: u32 = 1 << 1;
    pub const SUBJECT_ALT_NAME: u32 = 1 << 2;
    pub const EXTENDED_KEY_USAGE: u32 = 1 << 3;
    pub const CERTIFICATE_POLICIES: u32 = 1 << 4;
    pub const NETSCAPE_CERT_TYPE: u32 = 1 << 5;
    pub const AUTHORITY_KEY_IDENTIFIER: u32 = 1 << 6;
    pub const SUBJECT_KEY_IDENTIFIER: u32 = 1 << 7;
    pub const NAME_CONSTRAINTS: u32 = 1 << 8;
}

/// KeyUsage named bits (RFC 5280 §4.2.1.3), packed into the low 9 bits of a
/// `u16` in declaration order (bit 0 = digitalSignature ... bit 8 =
/// decipherOnly).
pub mod key_usage_bit {
    pub const DIGITAL_SIGNATURE: u16 = 1 << 0;
    pub const NON_REPUDIATION: u16 = 1 << 1;
    pub const KEY_ENCIPHERMENT: u16 = 1 << 2;
    pub const DATA_ENCIPHERMENT: u16 = 1 << 3;
    pub const KEY_AGREEMENT: u16 = 1 << 4;
    pub const KEY_CERT_SIGN: u16 = 1 << 5;
    pub const CRL_SIGN: u16 = 1 << 6;
    pub const ENCIPHER_ONLY: u16 = 1 << 7;
    pub const DECIPHER_ONLY: u16 = 1 << 8;
}

/// One decoded `Extension` entry as read off the wire, before semantic
/// dispatch.
pub struct RawExtension<'a> {
    pub extn_id: &'a [u8],
    pub critical: bool,
    pub extn_value: &'a [u8],
}

/// Parses a single `Extension ::= SEQUENCE { extnID, critical DEFAULT FALSE,
/// extnValue OCTET STRING }`.
fn parse_extension(body: &[u8]) -> Result<RawExtension<'_>> {
    let mut cur = Cursor::new(body);
    let extn_id = cur.get_oid()?;
    let critical = match cur.get_optional_tag(0x01) {
        Some(content) => {
            if content.len() != 1 {
                return Err(Error::new(ErrorKind::InvalidFormat, "critical flag"));
            }
            content[0] != 0
        }
        None => false,
    };
    let extn_value = cur.get_tag(0x04)?;
    if !cur.is_empty() {
        return Err(Error::new(ErrorKind::InvalidFormat, "extension trailer"));
    }
    Ok(RawExtension {
        extn_id,
        critical,
        extn_value,
    })
}

/// The semantic product of walking the `Extensions` sequence: the populated
/// subset of the `Frame`'s extension-derived fields (spec §3 / §4.C).
#[derive(Default, Debug)]
pub struct ExtFlags<'a> {
    pub ext_types: u32,
    pub ca_istrue: bool,
    /// Stored with the spec's `+1` bias: `0` means "not present".
    pub max_pathlen: u64,
    pub key_usage: u16,
    pub ns_cert_type: u8,
    pub subject_alt_raw: Option<&'a [u8]>,
    pub ext_key_usage_raw: Option<&'a [u8]>,
    pub crt_policies_raw: Option<&'a [u8]>,
}

/// Walks `extensions_body` (the content bytes of the `Extensions` SEQUENCE,
/// i.e. a `SEQUENCE OF Extension`) and populates an `ExtFlags`.
///
/// `strict` mirrors spec §6's "strict critical-extension policy" switch:
/// when true, an unrecognized critical extension is `FEATURE_UNAVAILABLE`;
/// otherwise it is silently skipped.
pub fn walk_extensions<'a>(extensions_body: &'a [u8], strict: bool) -> Result<ExtFlags<'a>> {
    let mut flags = ExtFlags::default();
    let filter = TagFilter::exact(TAG_SEQUENCE);
    Cursor::sequence_of(extensions_body, &filter, |_, elem_body| {
        let ext = parse_extension(elem_body)?;
        dispatch(&mut flags, &ext, strict)
    })?;
    Ok(flags)
}

fn mark_seen(flags: &mut ExtFlags<'_>, bit: u32) -> Result<()> {
    if flags.ext_types & bit != 0 {
        return Err(Error::new(ErrorKind::InvalidExtensions, "duplicate extension"));
    }
    flags.ext_types |= bit;
    Ok(())
}

fn dispatch<'a>(flags: &mut ExtFlags<'a>, ext: &RawExtension<'a>, strict: bool) -> Result<()> {
    match ext.extn_id {
        id if id == oid::BASIC_CONSTRAINTS_OID => {
            mark_seen(flags, ext_kind::BASIC_CONSTRAINTS)?;
            let (ca, pathlen) = parse_basic_constraints(ext.extn_value)?;
            flags.ca_istrue = ca;
            flags.max_pathlen = pathlen;
        }
        id if id == oid::KEY_USAGE_OID => {
            mark_seen(flags, ext_kind::KEY_USAGE)?;
            flags.key_usage = parse_key_usage(ext.extn_value)?;
        }
        id if id == oid::SUBJECT_ALTERNATIVE_NAME_OID => {
            mark_seen(flags, ext_kind::SUBJECT_ALT_NAME)?;
            validate_san_shape(ext.extn_value)?;
            flags.subject_alt_raw = Some(ext.extn_value);
        }
        id if id == oid::EXTENDED_KEY_USAGE_OID => {
            mark_seen(flags, ext_kind::EXTENDED_KEY_USAGE)?;
            validate_eku_shape(ext.extn_value)?;
            flags.ext_key_usage_raw = Some(ext.extn_value);
        }
        id if id == oid::CERTIFICATE_POLICIES_OID => {
            mark_seen(flags, ext_kind::CERTIFICATE_POLICIES)?;
            validate_certificate_policies_shape(ext.extn_value)?;
            flags.crt_policies_raw = Some(ext.extn_value);
        }
        id if id == oid::NETSCAPE_CERT_TYPE_OID => {
            mark_seen(flags, ext_kind::NETSCAPE_CERT_TYPE)?;
            flags.ns_cert_type = parse_netscape_cert_type(ext.extn_value)?;
        }
        id if id == oid::AUTHORITY_KEY_IDENTIFIER_OID => {
            mark_seen(flags, ext_kind::AUTHORITY_KEY_IDENTIFIER)?;
        }
        id if id == oid::SUBJECT_KEY_IDENTIFIER_OID => {
            mark_seen(flags, ext_kind::SUBJECT_KEY_IDENTIFIER)?;
        }
        id if id == oid::NAME_CONSTRAINTS_OID => {
            mark_seen(flags, ext_kind::NAME_CONSTRAINTS)?;
        }
        _ => {
            if ext.critical && strict {
                return Err(Error::new(
                    ErrorKind::FeatureUnavailable,
                    "unrecognized critical extension",
                ));
            }
            log::trace!("walk_extensions: skipping unrecognized non-critical extension");
        }
    }
    Ok(())
}

fn parse_basic_constraints(body: &[u8]) -> Result<(bool, u64)> {
    let mut cur = Cursor::new(body);
    let ca = match cur.get_optional_tag(0x01) {
        Some(content) => {
            if content.len() != 1 {
                return Err(Error::new(ErrorKind::InvalidFormat, "basic constraints cA"));
            }
            content[0] != 0
        }
        None => false,
    };
    let pathlen = if cur.is_empty() {
        0
    } else {
        cur.get_small_uint()?.saturating_add(1)
    };
    if !cur.is_empty() {
        return Err(Error::new(ErrorKind::InvalidFormat, "basic constraints trailer"));
    }
    Ok((ca, pathlen))
}

fn parse_key_usage(body: &[u8]) -> Result<u16> {
    let mut cur = Cursor::new(body);
    let (unused, bytes) = cur.get_bitstring()?;
    let mut value: u16 = 0;
    for (byte_idx, byte) in bytes.iter().enumerate() {
        for bit_in_byte in 0..8u32 {
            let bit_index = byte_idx * 8 + bit_in_byte as usize;
            if byte_idx + 1 == bytes.len() && bit_in_byte as u8 >= 8 - unused {
                continue;
            }
            if bit_index > 15 {
                continue;
            }
            // BIT STRING named bits are numbered MSB-first within each byte.
            if byte & (0x80 >> bit_in_byte) != 0 {
                value |= 1 << bit_index;
            }
        }
    }
    Ok(value)
}

fn validate_san_shape(body: &[u8]) -> Result<()> {
    // GeneralName ::= CHOICE { ... } is tagged [0]..[8]; no single
    // mask/value `TagFilter` pair can express "any of these nine numbers",
    // so SAN gets its own small traversal instead of `Cursor::sequence_of`.
    let mut cur = Cursor::new(body);
    while !cur.is_empty() {
        let (tag, _) = cur.read_tlv()?;
        let is_context_tag = tag & 0b1100_0000 == 0b1000_0000;
        let number = tag & 0x1f;
        if !is_context_tag || number > 8 {
            return Err(Error::new(ErrorKind::InvalidFormat, "san element tag"));
        }
    }
    Ok(())
}

fn validate_eku_shape(body: &[u8]) -> Result<()> {
    if body.is_empty() {
        return Err(Error::new(ErrorKind::InvalidLength, "empty eku"));
    }
    let filter = TagFilter::exact(TAG_OID);
    Cursor::sequence_of(body, &filter, |_, _| Ok(()))
}

fn validate_certificate_policies_shape(body: &[u8]) -> Result<()> {
    let filter = TagFilter::exact(TAG_SEQUENCE);
    Cursor::sequence_of(body, &filter, |_, elem| {
        let mut cur = Cursor::new(elem);
        cur.get_oid()?;
        // Remaining PolicyQualifierInfo entries are not interpreted here.
        Ok(())
    })
}

fn parse_netscape_cert_type(body: &[u8]) -> Result<u8> {
    let mut cur = Cursor::new(body);
    let (_, bytes) = cur.get_bitstring()?;
    Ok(*bytes.first().unwrap_or(&0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext_der(oid: &[u8], critical: bool, value: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.push(0x06);
        body.push(oid.len() as u8);
        body.extend_from_slice(oid);
        if critical {
            body.extend_from_slice(&[0x01, 0x01, 0xff]);
        }
        body.push(0x04);
        body.push(value.len() as u8);
        body.extend_from_slice(value);
        let mut seq = vec![0x30, body.len() as u8];
        seq.extend(body);
        seq
    }

    #[test]
    fn test_basic_constraints_ca_and_pathlen() {
        // cA=true, pathLenConstraint=3
        let bc_value = [0x30, 0x06, 0x01, 0x01, 0xff, 0x02, 0x01, 0x03];
        let ext = ext_der(oid::BASIC_CONSTRAINTS_OID, true, &bc_value);
        let flags = walk_extensions(&ext, true).unwrap();
        assert!(flags.ca_istrue);
        assert_eq!(flags.max_pathlen, 4); // real pathlen (3) + 1 bias
        assert_eq!(flags.ext_types & ext_kind::BASIC_CONSTRAINTS, ext_kind::BASIC_CONSTRAINTS);
    }

    #[test]
    fn test_duplicate_extension_rejected() {
        let bc_value = [0x30, 0x00];
        let one = ext_der(oid::BASIC_CONSTRAINTS_OID, true, &bc_value);
        let mut both = one.clone();
        both.extend(one);
        let result = walk_extensions(&both, true);
        assert_eq!(result.unwrap_err().kind, ErrorKind::InvalidExtensions);
    }

    #[test]
    fn test_unknown_critical_extension_strict() {
        let unknown_oid = [0x2a, 0x03, 0x04];
        let ext = ext_der(&unknown_oid, true, &[0x05, 0x00]);
        assert_eq!(
            walk_extensions(&ext, true).unwrap_err().kind,
            ErrorKind::FeatureUnavailable
        );
        assert!(walk_extensions(&ext, false).is_ok());
    }

    #[test]
    fn test_key_usage_bits() {
        // digitalSignature + keyCertSign + cRLSign, 1 unused bit.
        // Byte pattern: bit0 (digitalSignature) and bit5 (keyCertSign) and
        // bit6 (cRLSign) set => 0b1000_0011 = 0x83
        let ku_value = [0x03, 0x02, 0x01, 0x83];
        let ext = ext_der(oid::KEY_USAGE_OID, true, &ku_value);
        let flags = walk_extensions(&ext, true).unwrap();
        assert_ne!(flags.key_usage & key_usage_bit::DIGITAL_SIGNATURE, 0);
        assert_ne!(flags.key_usage & key_usage_bit::KEY_CERT_SIGN, 0);
        assert_ne!(flags.key_usage & key_usage_bit::CRL_SIGN, 0);
        assert_eq!(flags.key_usage & key_usage_bit::KEY_AGREEMENT, 0);
    }

    #[test]
    fn test_empty_eku_rejected() {
        let ext = ext_der(oid::EXTENDED_KEY_USAGE_OID, false, &[]);
        assert_eq!(walk_extensions(&ext, true).unwrap_err().kind, ErrorKind::InvalidLength);
    }
}
