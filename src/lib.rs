// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

#![forbid(unsafe_code)]

//! Public facade over `xcert-asn1`, `xcert-crypto`, and `xcert-verify`:
//! parse a DER certificate, build a [`Certificate`], and hand it to
//! [`verify_chain`] along with a [`TrustStore`] and a [`Profile`]. PEM
//! framing is an external concern (spec.md §6) -- callers decode PEM with
//! their own tooling (the `pem` crate in this repo's own tests) and hand
//! this crate DER.

pub use xcert_asn1::{certificate::Frame, reader::CalendarTime, Error as ParseError, ErrorKind as ParseErrorKind};
pub use xcert_crypto::{CryptoError, PublicKey, PublicKeyKind};
pub use xcert_verify::cache::Cache;
pub use xcert_verify::certificate::Certificate;
pub use xcert_verify::chain::{verify_chain, BadCert, ChainResult, ChainSlot, RestartContext, VerdictCallback};
pub use xcert_verify::config::{VerifierConfig, DEFAULT_MAX_INTERMEDIATE_CA};
pub use xcert_verify::crl::{check_crl, Crl, RevokedEntry};
pub use xcert_verify::error::{FatalError, Result, ValidationError};
pub use xcert_verify::ops::{CryptoOps, EcCurve, KeyInfo, KeyKind, OpensslOps};
pub use xcert_verify::policy::{CurveSet, HashSet, PkSet, Profile};
pub use xcert_verify::trust_store::TrustStore;
pub use xcert_verify::types::{DNSName, DNSPattern, IPAddress};

/// The current wall-clock time as a [`CalendarTime`], for callers that
/// don't already have one on hand (most do, from whatever clock or test
/// harness is driving them). No `chrono` dependency is carried for this --
/// civil-from-days is the well-known algorithm, good proleptic Gregorian
/// for any date this crate will ever see.
pub fn now() -> CalendarTime {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    calendar_time_from_unix_secs(secs)
}

fn calendar_time_from_unix_secs(secs: u64) -> CalendarTime {
    let days = (secs / 86400) as i64;
    let time_of_day = (secs % 86400) as u32;
    let (year, month, day) = civil_from_days(days);
    CalendarTime {
        year: year as u16,
        month: month as u8,
        day: day as u8,
        hour: (time_of_day / 3600) as u8,
        minute: ((time_of_day / 60) % 60) as u8,
        second: (time_of_day % 60) as u8,
    }
}

/// Howard Hinnant's `civil_from_days`: days since the Unix epoch to a
/// proleptic-Gregorian `(year, month, day)`.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}
