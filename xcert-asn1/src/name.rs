// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! RDN sequences, `GeneralName`, and the name/DNS comparators used by the
//! lazy detail layer (spec §4.D) and the chain verifier's host-name check
//! (spec §4.E.1).

use crate::error::{Error, ErrorKind, Result};
use crate::oid;
use crate::reader::{Cursor, TagFilter, TAG_SEQUENCE, TAG_SET};

/// One atom of a (possibly multi-valued) RDN: `(OID, tag, value)`. The
/// `merged_with_next` flag mirrors spec §3's `merged_flag` -- it is set when
/// this atom shares its top-level RDN (its `SET OF`) with the atom that
/// follows it.
#[derive(Debug, Clone, Copy)]
pub struct RdnAtom<'a> {
    pub oid: &'a [u8],
    pub tag: u8,
    pub value: &'a [u8],
    pub merged_with_next: bool,
}

/// The RDN sequence produced lazily from `subject_raw`/`issuer_raw` (spec
/// §3/§4.D). A `Vec` stands in for the C original's singly linked chain --
/// iteration order and multi-valued-RDN grouping (via `merged_with_next`)
/// are preserved exactly, which is all downstream comparators need.
#[derive(Debug, Clone, Default)]
pub struct RdnSequence<'a> {
    pub atoms: Vec<RdnAtom<'a>>,
}

impl<'a> RdnSequence<'a> {
    /// Parses `Name ::= RDNSequence ::= SEQUENCE OF RelativeDistinguishedName`
    /// (`RelativeDistinguishedName ::= SET OF AttributeTypeAndValue`) out of
    /// `raw`. An empty `raw` span yields an empty chain, not a failure (spec
    /// §4.D).
    pub fn parse(raw: &'a [u8]) -> Result<Self> {
        if raw.is_empty() {
            return Ok(RdnSequence::default());
        }
        let mut atoms = Vec::new();
        let rdn_filter = TagFilter::exact(TAG_SET);
        let outer_filter = TagFilter::exact(TAG_SEQUENCE);
        Cursor::sequence_of(raw, &outer_filter, |_, rdn_body| {
            let mut rdn_atoms = Vec::new();
            Cursor::sequence_of(rdn_body, &rdn_filter, |_, atv_body| {
                let mut cur = Cursor::new(atv_body);
                let oid = cur.get_oid()?;
                let (tag, value) = cur.read_tlv()?;
                if !cur.is_empty() {
                    return Err(Error::new(ErrorKind::InvalidFormat, "AttributeTypeAndValue trailer"));
                }
                rdn_atoms.push((oid, tag, value));
                Ok(())
            })?;
            if rdn_atoms.is_empty() {
                return Err(Error::new(ErrorKind::InvalidFormat, "empty RDN"));
            }
            let n = rdn_atoms.len();
            for (i, (oid, tag, value)) in rdn_atoms.into_iter().enumerate() {
                atoms.push(RdnAtom {
                    oid,
                    tag,
                    value,
                    merged_with_next: i + 1 < n,
                });
            }
            Ok(())
        })?;
        Ok(RdnSequence { atoms })
    }

    /// Splits the flat atom list back into its top-level RDNs (groups of
    /// atoms chained by `merged_with_next`).
    pub fn rdns(&self) -> Vec<&[RdnAtom<'a>]> {
        let mut out = Vec::new();
        let mut start = 0;
        for (i, atom) in self.atoms.iter().enumerate() {
            if !atom.merged_with_next {
                out.push(&self.atoms[start..=i]);
                start = i + 1;
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns the string value of every `commonName` (`2.5.4.3`) atom, used
    /// by the host-name check's subject-CN fallback (spec §4.E.1).
    pub fn common_names(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.atoms
            .iter()
            .filter(|a| a.oid == oid::COMMON_NAME_OID)
            .map(|a| a.value)
    }
}

/// String-type tags for which comparison is case-insensitive and
/// whitespace-folding (spec §4.D's name comparator). Byte-equality is used
/// for every other tag.
fn is_folded_string_tag(tag: u8) -> bool {
    matches!(tag & 0x1f, 0x0c | 0x13 | 0x14 | 0x16 | 0x1e) // UTF8String, PrintableString, T61String, IA5String, BMPString
}

fn fold(value: &[u8]) -> Vec<u8> {
    // Collapse runs of ASCII whitespace to a single space and lowercase
    // ASCII letters, matching the "case-insensitive, whitespace-folding"
    // comparator spec §4.D specifies for foldable string types.
    let mut out = Vec::with_capacity(value.len());
    let mut last_was_space = false;
    for &b in value {
        if b.is_ascii_whitespace() {
            if !last_was_space && !out.is_empty() {
                out.push(b' ');
            }
            last_was_space = true;
        } else {
            out.push(b.to_ascii_lowercase());
            last_was_space = false;
        }
    }
    while out.last() == Some(&b' ') {
        out.pop();
    }
    out
}

fn atom_values_equal(a: &RdnAtom<'_>, b: &RdnAtom<'_>) -> bool {
    if a.oid != b.oid {
        return false;
    }
    if is_folded_string_tag(a.tag) && is_folded_string_tag(b.tag) {
        fold(a.value) == fold(b.value)
    } else {
        a.value == b.value
    }
}

/// The RDN comparator of spec §4.D: same number of top-level RDNs, same
/// number of atoms per RDN (by position), and every atom pair OID-equal and
/// value-equal under the per-type comparator above. Also used as the
/// issuer/subject self-compare structural sanity check (spec §3).
pub fn rdn_sequences_equal(a: &RdnSequence<'_>, b: &RdnSequence<'_>) -> bool {
    let (a_rdns, b_rdns) = (a.rdns(), b.rdns());
    if a_rdns.len() != b_rdns.len() {
        return false;
    }
    a_rdns.iter().zip(b_rdns.iter()).all(|(ra, rb)| {
        ra.len() == rb.len() && ra.iter().zip(rb.iter()).all(|(x, y)| atom_values_equal(x, y))
    })
}

/// `GeneralName` entries relevant to this decoder (RFC 5280 §4.2.1.6); other
/// choices are preserved as an opaque tagged span.
#[derive(Debug, Clone, Copy)]
pub enum GeneralName<'a> {
    Rfc822Name(&'a [u8]),
    DnsName(&'a [u8]),
    DirectoryName(&'a [u8]),
    Uri(&'a [u8]),
    IpAddress(&'a [u8]),
    RegisteredId(&'a [u8]),
    Other(u8, &'a [u8]),
}

/// Iterates the `SubjectAlternativeName` raw span into typed `GeneralName`
/// entries. The shape was already validated by the extension walker (spec
/// §4.C); this is the lazy materialization step (spec §4.D).
pub fn iter_general_names(raw: &[u8]) -> Result<Vec<GeneralName<'_>>> {
    let mut out = Vec::new();
    let mut cur = Cursor::new(raw);
    while !cur.is_empty() {
        let (tag, content) = cur.read_tlv()?;
        let number = tag & 0x1f;
        let gn = match number {
            1 => GeneralName::Rfc822Name(content),
            2 => GeneralName::DnsName(content),
            4 => GeneralName::DirectoryName(content),
            6 => GeneralName::Uri(content),
            7 => GeneralName::IpAddress(content),
            8 => GeneralName::RegisteredId(content),
            n => GeneralName::Other(n, content),
        };
        out.push(gn);
    }
    Ok(out)
}

/// DNS wildcard matching (spec §4.D, "DNS wildcard match"), implemented
/// exactly to spec rather than the stricter RFC 6125 §6.4.3 rule some
/// libraries use (see DESIGN.md for the rationale).
pub fn dns_names_match(candidate: &[u8], pattern: &[u8]) -> bool {
    if ascii_eq_ignore_case_no_trailing_dot(candidate, pattern) {
        return true;
    }
    let Some(pattern_tail_after_star) = pattern.strip_prefix(b"*.") else {
        return false;
    };
    let Some(dot_pos) = candidate.iter().position(|&b| b == b'.') else {
        return false;
    };
    if dot_pos == 0 {
        return false;
    }
    let candidate_tail = &candidate[dot_pos + 1..];
    pattern_tail_after_star.eq_ignore_ascii_case(candidate_tail)
}

fn ascii_eq_ignore_case_no_trailing_dot(a: &[u8], b: &[u8]) -> bool {
    fn strip(s: &[u8]) -> &[u8] {
        if s.last() == Some(&b'.') {
            &s[..s.len() - 1]
        } else {
            s
        }
    }
    strip(a).eq_ignore_ascii_case(strip(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atv(oid: &'static [u8], tag: u8, value: &'static [u8]) -> Vec<u8> {
        let mut v = Vec::new();
        v.push(0x06);
        v.push(oid.len() as u8);
        v.extend_from_slice(oid);
        v.push(tag);
        v.push(value.len() as u8);
        v.extend_from_slice(value);
        v
    }

    fn rdn(atoms: &[Vec<u8>]) -> Vec<u8> {
        let body: Vec<u8> = atoms.iter().flatten().copied().collect();
        let mut v = vec![0x31, body.len() as u8];
        v.extend(body);
        v
    }

    fn name(rdns: &[Vec<u8>]) -> Vec<u8> {
        let body: Vec<u8> = rdns.iter().flatten().copied().collect();
        let mut v = vec![0x30, body.len() as u8];
        v.extend(body);
        v
    }

    #[test]
    fn test_parse_and_common_names() {
        let cn = atv(oid::COMMON_NAME_OID, 0x0c, b"example.com");
        let der = name(&[rdn(&[cn])]);
        let parsed = RdnSequence::parse(&der).unwrap();
        let names: Vec<_> = parsed.common_names().collect();
        assert_eq!(names, vec![b"example.com".as_slice()]);
    }

    #[test]
    fn test_empty_name_is_empty_chain() {
        let parsed = RdnSequence::parse(&[]).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_multivalued_rdn_merged_flag() {
        let cn = atv(oid::COMMON_NAME_OID, 0x0c, b"example.com");
        let org = atv(oid::ORGANIZATION_NAME_OID, 0x0c, b"Example Org");
        let der = name(&[rdn(&[cn, org])]);
        let parsed = RdnSequence::parse(&der).unwrap();
        assert_eq!(parsed.atoms.len(), 2);
        assert!(parsed.atoms[0].merged_with_next);
        assert!(!parsed.atoms[1].merged_with_next);
        assert_eq!(parsed.rdns().len(), 1);
    }

    #[test]
    fn test_rdn_equal_case_insensitive() {
        let a = name(&[rdn(&[atv(oid::COMMON_NAME_OID, 0x0c, b"Example.COM")])]);
        let b = name(&[rdn(&[atv(oid::COMMON_NAME_OID, 0x0c, b"example.com")])]);
        let pa = RdnSequence::parse(&a).unwrap();
        let pb = RdnSequence::parse(&b).unwrap();
        assert!(rdn_sequences_equal(&pa, &pb));
    }

    #[test]
    fn test_rdn_not_equal_different_rdn_count() {
        let a = name(&[rdn(&[atv(oid::COMMON_NAME_OID, 0x0c, b"example.com")])]);
        let b = name(&[
            rdn(&[atv(oid::COMMON_NAME_OID, 0x0c, b"example.com")]),
            rdn(&[atv(oid::COUNTRY_NAME_OID, 0x13, b"US")]),
        ]);
        let pa = RdnSequence::parse(&a).unwrap();
        let pb = RdnSequence::parse(&b).unwrap();
        assert!(!rdn_sequences_equal(&pa, &pb));
    }

    #[test]
    fn test_dns_exact_match() {
        assert!(dns_names_match(b"example.com", b"example.com"));
        assert!(dns_names_match(b"EXAMPLE.com", b"example.com"));
        assert!(dns_names_match(b"example.com.", b"example.com"));
        assert!(!dns_names_match(b"foo.example.com", b"example.com"));
    }

    #[test]
    fn test_dns_wildcard_match() {
        assert!(dns_names_match(b"foo.example.com", b"*.example.com"));
        assert!(!dns_names_match(b"example.com", b"*.example.com"));
        assert!(!dns_names_match(b"a.b.example.com", b"*.example.com"));
    }
}
