// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! The two error strata that sit above `xcert_asn1::Error` (structural parse
//! failures, stratum 1): verification defects are reported through the flag
//! word, not through `Result`, so the only `Result`-carried error left here
//! is stratum 3 -- conditions a correct implementation should never observe
//! in practice (mutex poisoning, a callback failing, a hash backend erroring
//! out), all of which unwind the whole verification rather than being folded
//! into the flag word.

use std::fmt;

#[derive(Debug)]
pub enum FatalError {
    /// A certificate or CRL byte span failed to parse where the frame
    /// parser should already have guaranteed well-formedness.
    Malformed(xcert_asn1::Error),
    /// The cryptographic backend failed on an operation that does not
    /// itself express pass/fail (hashing, key parsing).
    Crypto(xcert_crypto::CryptoError),
    /// A per-certificate cache mutex was poisoned by a panicking holder.
    CachePoisoned,
    /// A user-supplied verdict or root-lookup callback returned an error.
    CallbackFailed,
    /// The chain exceeded `max_intermediate_ca + 1` entries, or find-parent
    /// recursed past its bound -- spec's "could not even complete the
    /// search" status.
    ChainTooLong,
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalError::Malformed(e) => write!(f, "malformed certificate data: {e}"),
            FatalError::Crypto(e) => write!(f, "cryptographic backend error: {e}"),
            FatalError::CachePoisoned => f.write_str("certificate cache mutex poisoned"),
            FatalError::CallbackFailed => f.write_str("caller-supplied callback failed"),
            FatalError::ChainTooLong => f.write_str("chain exceeded maximum intermediate count"),
        }
    }
}

impl std::error::Error for FatalError {}

impl From<xcert_asn1::Error> for FatalError {
    fn from(e: xcert_asn1::Error) -> Self {
        FatalError::Malformed(e)
    }
}

impl From<xcert_crypto::CryptoError> for FatalError {
    fn from(e: xcert_crypto::CryptoError) -> Self {
        FatalError::Crypto(e)
    }
}

pub type Result<T> = std::result::Result<T, FatalError>;

/// Policy-construction failures: raised only while building a [`crate::policy::Profile`]
/// or [`crate::config::VerifierConfig`] from caller input, never during the
/// chain walk itself (which reports defects through the flag word).
#[derive(Debug)]
pub enum ValidationError {
    Other(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Other(s) => f.write_str(s),
        }
    }
}

impl std::error::Error for ValidationError {}
