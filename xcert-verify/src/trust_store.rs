// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! Trust material (spec.md §6): either a fixed list of trust anchors or a
//! caller-supplied lookup callback queried per hop. Per spec.md, "when
//! present, CRL checking is disabled (by contract)" -- a callback-backed
//! store cannot be assumed to enumerate every anchor a CRL issuer might
//! need to be checked against.

use crate::certificate::Certificate;

pub enum TrustStore<'a> {
    /// A fixed list of trust anchors, checked as both candidate parents and
    /// as the "byte-equals a trusted root" shortcut (spec.md §4.E.3).
    List(Vec<Certificate<'a>>),
    /// A lookup callback invoked with the child certificate at each hop
    /// where anchors are needed.
    Lookup(Box<dyn Fn(&Certificate<'a>) -> Vec<Certificate<'a>> + 'a>),
}

impl<'a> TrustStore<'a> {
    pub fn candidates(&self, child: &Certificate<'a>) -> Vec<Certificate<'a>> {
        match self {
            TrustStore::List(list) => list.clone(),
            TrustStore::Lookup(f) => f(child),
        }
    }

    /// Whether this store was constructed from a lookup callback, in which
    /// case CRL checking must be disabled per spec.md §6.
    pub fn is_callback_backed(&self) -> bool {
        matches!(self, TrustStore::Lookup(_))
    }

    /// The "EE-locally-trusted shortcut" check (spec.md §4.E.3): does any
    /// anchor's DER byte-equal `der`? Only meaningful for a fixed list --
    /// a callback store is queried with `candidates` instead.
    pub fn contains_der(&self, der: &[u8]) -> bool {
        match self {
            TrustStore::List(list) => list.iter().any(|c| c.der() == der),
            TrustStore::Lookup(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_store_is_not_callback_backed() {
        let store = TrustStore::List(Vec::new());
        assert!(!store.is_callback_backed());
    }

    #[test]
    fn test_lookup_store_is_callback_backed() {
        let store: TrustStore<'_> = TrustStore::Lookup(Box::new(|_| Vec::new()));
        assert!(store.is_callback_backed());
    }
}
