// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! `AlgorithmIdentifier` and `Time`, decoded through the `asn1` crate's
//! derive machinery rather than the hand-rolled cursor in `reader` -- these
//! are exactly the kind of tagged, enumerable sub-structure the `asn1` crate
//! is good at, and the frame parser hands it self-contained TLV encodings
//! (via `Cursor::get_tag_full`) to decode.
//!
//! `DssSignature`, `DHParams`, `UnvalidatedVisibleString`, `RawTlv`,
//! `Asn1ReadableOrWritable`, and the old `DNSName`/`DNSPattern` pair are
//! dropped here -- the first three belong to CSR/key-exchange signing
//! machinery out of scope here, and DNS matching lives in `name.rs` against
//! the wildcard rule this crate uses.

use crate::oid;

#[derive(asn1::Asn1Read, asn1::Asn1Write, PartialEq, Hash, Clone, Eq, Debug)]
pub struct AlgorithmIdentifier<'a> {
    pub oid: asn1::DefinedByMarker<asn1::ObjectIdentifier>,
    #[defined_by(oid)]
    pub params: AlgorithmParameters<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicKeyAlgorithm {
    Rsa,
    RsaPss,
    Ec,
    Ed25519,
    Other,
}

impl AlgorithmIdentifier<'_> {
    /// Classifies this identifier into the `(sig_md, sig_pk)` pair the
    /// `Frame`'s scalar fields record. The digest slot is `None` for
    /// algorithms with no message-digest component (e.g. Ed25519).
    pub fn sig_md_pk(&self) -> (Option<DigestAlgorithm>, PublicKeyAlgorithm) {
        use AlgorithmParameters::*;
        match &self.params {
            RsaWithSha1(_) => (Some(DigestAlgorithm::Sha1), PublicKeyAlgorithm::Rsa),
            RsaWithSha256(_) => (Some(DigestAlgorithm::Sha256), PublicKeyAlgorithm::Rsa),
            RsaWithSha384(_) => (Some(DigestAlgorithm::Sha384), PublicKeyAlgorithm::Rsa),
            RsaWithSha512(_) => (Some(DigestAlgorithm::Sha512), PublicKeyAlgorithm::Rsa),
            RsaPss(params) => {
                let md = params
                    .as_ref()
                    .map(|p| p.hash_algorithm.digest())
                    .unwrap_or(Some(DigestAlgorithm::Sha1));
                (md, PublicKeyAlgorithm::RsaPss)
            }
            EcDsaWithSha256(_) => (Some(DigestAlgorithm::Sha256), PublicKeyAlgorithm::Ec),
            EcDsaWithSha384(_) => (Some(DigestAlgorithm::Sha384), PublicKeyAlgorithm::Ec),
            EcDsaWithSha512(_) => (Some(DigestAlgorithm::Sha512), PublicKeyAlgorithm::Ec),
            Ed25519 => (None, PublicKeyAlgorithm::Ed25519),
            Rsa(_) => (None, PublicKeyAlgorithm::Rsa),
            Ec(_) => (None, PublicKeyAlgorithm::Ec),
            Sha1(_) | Sha256(_) | Sha384(_) | Sha512(_) => (self.digest(), PublicKeyAlgorithm::Other),
            Other(_, _) => (None, PublicKeyAlgorithm::Other),
        }
    }

    fn digest(&self) -> Option<DigestAlgorithm> {
        match &self.params {
            AlgorithmParameters::Sha1(_) => Some(DigestAlgorithm::Sha1),
            AlgorithmParameters::Sha256(_) => Some(DigestAlgorithm::Sha256),
            AlgorithmParameters::Sha384(_) => Some(DigestAlgorithm::Sha384),
            AlgorithmParameters::Sha512(_) => Some(DigestAlgorithm::Sha512),
            _ => None,
        }
    }
}

#[derive(asn1::Asn1DefinedByRead, asn1::Asn1DefinedByWrite, PartialEq, Eq, Hash, Clone, Debug)]
pub enum AlgorithmParameters<'a> {
    #[defined_by(oid::typed::SHA1_OID)]
    Sha1(Option<asn1::Null>),
    #[defined_by(oid::typed::SHA256_OID)]
    Sha256(Option<asn1::Null>),
    #[defined_by(oid::typed::SHA384_OID)]
    Sha384(Option<asn1::Null>),
    #[defined_by(oid::typed::SHA512_OID)]
    Sha512(Option<asn1::Null>),

    #[defined_by(oid::typed::ED25519_OID)]
    Ed25519,

    #[defined_by(oid::typed::ECDSA_WITH_SHA256_OID)]
    EcDsaWithSha256(Option<asn1::Null>),
    #[defined_by(oid::typed::ECDSA_WITH_SHA384_OID)]
    EcDsaWithSha384(Option<asn1::Null>),
    #[defined_by(oid::typed::ECDSA_WITH_SHA512_OID)]
    EcDsaWithSha512(Option<asn1::Null>),

    #[defined_by(oid::typed::RSA_WITH_SHA1_OID)]
    RsaWithSha1(Option<asn1::Null>),
    #[defined_by(oid::typed::RSA_WITH_SHA256_OID)]
    RsaWithSha256(Option<asn1::Null>),
    #[defined_by(oid::typed::RSA_WITH_SHA384_OID)]
    RsaWithSha384(Option<asn1::Null>),
    #[defined_by(oid::typed::RSA_WITH_SHA512_OID)]
    RsaWithSha512(Option<asn1::Null>),

    // RsaPssParameters must be present in the signature AlgorithmIdentifier
    // but is omitted from the SubjectPublicKeyInfo's, where it has no
    // meaning.
    #[defined_by(oid::typed::RSASSA_PSS_OID)]
    RsaPss(Option<Box<RsaPssParameters<'a>>>),

    #[defined_by(oid::typed::RSA_ENCRYPTION_OID)]
    Rsa(Option<()>),
    #[defined_by(oid::typed::EC_PUBLIC_KEY_OID)]
    Ec(EcParameters<'a>),

    #[default]
    Other(asn1::ObjectIdentifier, Option<asn1::Tlv<'a>>),
}

#[derive(asn1::Asn1Read, asn1::Asn1Write, PartialEq, Eq, Hash, Clone, Debug)]
pub enum EcParameters<'a> {
    NamedCurve(asn1::ObjectIdentifier),
    #[explicit(0)]
    Explicit(asn1::Tlv<'a>),
}

#[derive(asn1::Asn1Read, asn1::Asn1Write, Hash, PartialEq, Eq, Clone)]
pub struct SubjectPublicKeyInfo<'a> {
    pub algorithm: AlgorithmIdentifier<'a>,
    pub subject_public_key: asn1::BitString<'a>,
}

#[derive(asn1::Asn1Read, asn1::Asn1Write, PartialEq, Eq, Hash, Clone)]
pub enum Time {
    UtcTime(asn1::UtcTime),
    GeneralizedTime(asn1::GeneralizedTime),
}

impl Time {
    pub fn as_datetime(&self) -> &asn1::DateTime {
        match self {
            Time::UtcTime(data) => data.as_datetime(),
            Time::GeneralizedTime(data) => data.as_datetime(),
        }
    }
}

// RSA-PSS ASN.1 default hash algorithm.
pub const PSS_SHA1_HASH_ALG: AlgorithmIdentifier<'_> = AlgorithmIdentifier {
    oid: asn1::DefinedByMarker::marker(),
    params: AlgorithmParameters::Sha1(Some(())),
};

// This is defined as an AlgorithmIdentifier in RFC 4055, but the mask
// generation algorithm **must** contain an AlgorithmIdentifier in its
// params, so we define it this way.
#[derive(asn1::Asn1Read, asn1::Asn1Write, Hash, Clone, PartialEq, Eq, Debug)]
pub struct MaskGenAlgorithm<'a> {
    pub oid: asn1::ObjectIdentifier,
    pub params: AlgorithmIdentifier<'a>,
}

// RSA-PSS ASN.1 default mask gen algorithm.
pub const PSS_SHA1_MASK_GEN_ALG: MaskGenAlgorithm<'_> = MaskGenAlgorithm {
    oid: oid::typed::MGF1_OID,
    params: PSS_SHA1_HASH_ALG,
};

// From RFC 4055 section 3.1:
// RSASSA-PSS-params  ::=  SEQUENCE  {
//     hashAlgorithm      [0] HashAlgorithm DEFAULT sha1Identifier,
//     maskGenAlgorithm   [1] MaskGenAlgorithm DEFAULT mgf1SHA1Identifier,
//     saltLength         [2] INTEGER DEFAULT 20,
//     trailerField       [3] INTEGER DEFAULT 1  }
#[derive(asn1::Asn1Read, asn1::Asn1Write, Hash, Clone, PartialEq, Eq, Debug)]
pub struct RsaPssParameters<'a> {
    #[explicit(0)]
    #[default(PSS_SHA1_HASH_ALG)]
    pub hash_algorithm: AlgorithmIdentifier<'a>,
    #[explicit(1)]
    #[default(PSS_SHA1_MASK_GEN_ALG)]
    pub mask_gen_algorithm: MaskGenAlgorithm<'a>,
    #[explicit(2)]
    #[default(20u16)]
    pub salt_length: u16,
    #[explicit(3)]
    #[default(1u8)]
    pub _trailer_field: u8,
}

#[derive(asn1::Asn1Read, asn1::Asn1Write, PartialEq, Eq, Hash, Clone)]
pub struct AttributeTypeValue<'a> {
    pub type_id: asn1::ObjectIdentifier,
    pub value: asn1::Tlv<'a>,
}
