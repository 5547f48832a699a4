// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! Well-known OIDs, stored as their raw DER content bytes (no tag/length).
//!
//! Matching an OID read off the wire reduces to a byte-slice comparison
//! against one of these constants -- there is no need to decode the
//! dotted-notation value anywhere on the verification hot path.

pub const SHA1_OID: &[u8] = &[0x2b, 0x0e, 0x03, 0x02, 0x1a];
pub const SHA256_OID: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01];
pub const SHA384_OID: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x02];
pub const SHA512_OID: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03];

pub const RSA_ENCRYPTION_OID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01];
pub const RSASSA_PSS_OID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0a];
pub const RSA_WITH_SHA1_OID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x05];
pub const RSA_WITH_SHA256_OID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0b];
pub const RSA_WITH_SHA384_OID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0c];
pub const RSA_WITH_SHA512_OID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0d];

pub const EC_PUBLIC_KEY_OID: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01];
pub const ECDSA_WITH_SHA256_OID: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x02];
pub const ECDSA_WITH_SHA384_OID: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x03];
pub const ECDSA_WITH_SHA512_OID: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x04];

pub const EC_SECP256R1_OID: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07];
pub const EC_SECP384R1_OID: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x22];
pub const EC_SECP521R1_OID: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x23];

pub const MGF1_OID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x08];
pub const ED25519_OID: &[u8] = &[0x2b, 0x65, 0x70];

// Extensions (id-ce-*), RFC 5280 §4.2.
pub const BASIC_CONSTRAINTS_OID: &[u8] = &[0x55, 0x1d, 0x13];
pub const KEY_USAGE_OID: &[u8] = &[0x55, 0x1d, 0x0f];
pub const SUBJECT_ALTERNATIVE_NAME_OID: &[u8] = &[0x55, 0x1d, 0x11];
pub const EXTENDED_KEY_USAGE_OID: &[u8] = &[0x55, 0x1d, 0x25];
pub const CERTIFICATE_POLICIES_OID: &[u8] = &[0x55, 0x1d, 0x20];
pub const AUTHORITY_KEY_IDENTIFIER_OID: &[u8] = &[0x55, 0x1d, 0x23];
pub const SUBJECT_KEY_IDENTIFIER_OID: &[u8] = &[0x55, 0x1d, 0x0e];
pub const NAME_CONSTRAINTS_OID: &[u8] = &[0x55, 0x1d, 0x1e];
pub const CRL_DISTRIBUTION_POINTS_OID: &[u8] = &[0x55, 0x1d, 0x1f];
pub const POLICY_CONSTRAINTS_OID: &[u8] = &[0x55, 0x1d, 0x24];
pub const AUTHORITY_INFORMATION_ACCESS_OID: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x01, 0x01];
// Netscape Certificate Type, a pre-RFC5280 legacy extension still seen in
// some older CA bundles.
pub const NETSCAPE_CERT_TYPE_OID: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x86, 0xf8, 0x42, 0x01, 0x01];

// Extended key usages (id-kp-*), RFC 5280 §4.2.1.12.
pub const EKU_ANY_OID: &[u8] = &[0x55, 0x1d, 0x25, 0x00];
pub const EKU_SERVER_AUTH_OID: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x01];
pub const EKU_CLIENT_AUTH_OID: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x02];
pub const EKU_CODE_SIGNING_OID: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x03];
pub const EKU_EMAIL_PROTECTION_OID: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x04];
pub const EKU_TIME_STAMPING_OID: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x08];
pub const EKU_OCSP_SIGNING_OID: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x09];

// Name attribute types (RFC 4519 / X.520).
pub const COMMON_NAME_OID: &[u8] = &[0x55, 0x04, 0x03];
pub const COUNTRY_NAME_OID: &[u8] = &[0x55, 0x04, 0x06];
pub const ORGANIZATION_NAME_OID: &[u8] = &[0x55, 0x04, 0x0a];
pub const ORGANIZATIONAL_UNIT_NAME_OID: &[u8] = &[0x55, 0x04, 0x0b];

/// `asn1::ObjectIdentifier` counterparts of a handful of the above, for use
/// with the `#[defined_by(...)]` derive attribute in `common.rs`, which
/// compares against a typed `ObjectIdentifier` rather than the raw DER
/// content bytes the hand-rolled `Cursor` path in `extensions`/`name` uses.
pub mod typed {
    pub const SHA1_OID: asn1::ObjectIdentifier = asn1::oid!(1, 3, 14, 3, 2, 26);
    pub const SHA256_OID: asn1::ObjectIdentifier = asn1::oid!(2, 16, 840, 1, 101, 3, 4, 2, 1);
    pub const SHA384_OID: asn1::ObjectIdentifier = asn1::oid!(2, 16, 840, 1, 101, 3, 4, 2, 2);
    pub const SHA512_OID: asn1::ObjectIdentifier = asn1::oid!(2, 16, 840, 1, 101, 3, 4, 2, 3);

    pub const ED25519_OID: asn1::ObjectIdentifier = asn1::oid!(1, 3, 101, 112);

    pub const RSA_ENCRYPTION_OID: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 113549, 1, 1, 1);
    pub const RSASSA_PSS_OID: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 113549, 1, 1, 10);
    pub const RSA_WITH_SHA1_OID: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 113549, 1, 1, 5);
    pub const RSA_WITH_SHA256_OID: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 113549, 1, 1, 11);
    pub const RSA_WITH_SHA384_OID: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 113549, 1, 1, 12);
    pub const RSA_WITH_SHA512_OID: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 113549, 1, 1, 13);

    pub const EC_PUBLIC_KEY_OID: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 10045, 2, 1);
    pub const ECDSA_WITH_SHA256_OID: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 10045, 4, 3, 2);
    pub const ECDSA_WITH_SHA384_OID: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 10045, 4, 3, 3);
    pub const ECDSA_WITH_SHA512_OID: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 10045, 4, 3, 4);

    pub const MGF1_OID: asn1::ObjectIdentifier = asn1::oid!(1, 2, 840, 113549, 1, 1, 8);
}
