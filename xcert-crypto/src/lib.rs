// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

#![forbid(unsafe_code)]

//! The cryptographic primitives this system consumes as external
//! collaborators (hash functions, signature verification, public-key
//! parsing, bignum arithmetic) -- an OpenSSL-backed implementation behind
//! a small capability trait, so the verification engine in `xcert-verify`
//! never touches `openssl` directly.

pub mod error;
pub mod pkey;

pub use error::{CryptoError, CryptoResult};
pub use pkey::{PublicKey, PublicKeyKind};
