// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

use std::fmt;

#[derive(Debug)]
pub enum CryptoError {
    /// The key or signature encoding could not be parsed by the underlying
    /// library. Carries no further detail -- OpenSSL's own error stack is
    /// not exposed past this boundary.
    InvalidEncoding,
    /// The algorithm, curve, or padding combination is not one this
    /// backend implements.
    UnsupportedAlgorithm,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::InvalidEncoding => f.write_str("invalid key or signature encoding"),
            CryptoError::UnsupportedAlgorithm => f.write_str("unsupported algorithm"),
        }
    }
}

impl std::error::Error for CryptoError {}

impl From<openssl::error::ErrorStack> for CryptoError {
    fn from(_: openssl::error::ErrorStack) -> Self {
        CryptoError::InvalidEncoding
    }
}

pub type CryptoResult<T> = std::result::Result<T, CryptoError>;
