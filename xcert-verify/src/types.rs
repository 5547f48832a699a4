// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! `DNSName`/`DNSPattern`/`IPAddress`, the typed wrappers the host-name
//! check (spec.md §4.E.1) validates candidate host names against. The
//! general shape mirrors the teacher's own `DNSName`/`DNSPattern` pair, but
//! the matching predicate itself defers entirely to
//! `xcert_asn1::name::dns_names_match`, which implements spec.md §4.D's
//! rule rather than the teacher's stricter RFC 6125 §6.4.3 restriction (see
//! DESIGN.md).

use std::fmt;
use std::net::IpAddr;

/// A validated, non-empty ASCII host name supplied by the caller as the
/// verification target (spec.md §6, "Input: host name").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DNSName<'a>(&'a str);

impl<'a> DNSName<'a> {
    pub fn new(value: &'a str) -> Option<Self> {
        if value.is_empty() || !value.is_ascii() {
            return None;
        }
        Some(DNSName(value))
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl fmt::Display for DNSName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A `dNSName` SAN entry or subject `CN=` atom, compared against a
/// [`DNSName`] target under spec.md §4.D's wildcard rule.
#[derive(Debug, Clone, Copy)]
pub struct DNSPattern<'a>(&'a [u8]);

impl<'a> DNSPattern<'a> {
    pub fn new(value: &'a [u8]) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        Some(DNSPattern(value))
    }

    pub fn matches(&self, name: &DNSName<'_>) -> bool {
        xcert_asn1::name::dns_names_match(name.as_str().as_bytes(), self.0)
    }
}

/// A `iPAddress` SAN entry, compared by raw octets (RFC 5280 §4.2.1.6: 4
/// octets for IPv4, 16 for IPv6 -- netmask-suffixed `iPAddress` values in
/// `NameConstraints` are out of scope per spec.md §1's non-goals).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IPAddress(IpAddr);

impl IPAddress {
    pub fn from_str(s: &str) -> Option<Self> {
        s.parse().ok().map(IPAddress)
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes.len() {
            4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(bytes);
                Some(IPAddress(IpAddr::from(octets)))
            }
            16 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(bytes);
                Some(IPAddress(IpAddr::from(octets)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_pattern_wildcard() {
        let name = DNSName::new("a.example.com").unwrap();
        let pattern = DNSPattern::new(b"*.example.com").unwrap();
        assert!(pattern.matches(&name));

        let bare = DNSName::new("example.com").unwrap();
        assert!(!pattern.matches(&bare));
    }

    #[test]
    fn test_ip_address_roundtrip() {
        let a = IPAddress::from_str("127.0.0.1").unwrap();
        let b = IPAddress::from_bytes(&[127, 0, 0, 1]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_empty_dns_name() {
        assert!(DNSName::new("").is_none());
    }
}
