// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! Every behavior-affecting knob from spec.md §6, gathered into one struct
//! the way the teacher gathers CA/B-style policy knobs into `Policy::new`'s
//! parameter list -- except these are orthogonal toggles rather than a
//! profile, so they get their own `Default`-able struct instead of living on
//! `Profile`.

/// A default reasonable maximum intermediate-CA depth. mbedTLS defaults to
/// 8; OpenSSL defaults to 100, which spec.md §3 calls "far more permissive
/// than necessary" -- 8 is kept here for the same reason the teacher picked
/// it for its own `DEFAULT_MAX_CHAIN_DEPTH`.
pub const DEFAULT_MAX_INTERMEDIATE_CA: u8 = 8;

#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Cap on intermediate CAs in a built chain. The chain array's capacity
    /// is `max_intermediate_ca + 2` (spec.md §3).
    pub max_intermediate_ca: u8,

    /// Unknown critical extensions fail the parse (`FEATURE_UNAVAILABLE`)
    /// rather than being skipped.
    pub strict_critical_extensions: bool,

    /// Honor a `[3] Extensions` field on a non-v3 certificate rather than
    /// treating its presence as a structural error.
    pub accept_extensions_in_non_v3: bool,

    /// Enforce `keyCertSign`/`cRLSign` bits during find-parent and CRL
    /// checking. Disabling this is a deliberate policy relaxation, not a
    /// parse-time concern.
    pub check_key_usage: bool,

    /// Enforce that an EE's `extKeyUsage`, when present, is compatible with
    /// the caller's intended purpose.
    pub check_extended_key_usage: bool,

    /// Materialize the frame and public-key cache entries eagerly at
    /// construction rather than on first access.
    pub eager_parse: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        VerifierConfig {
            max_intermediate_ca: DEFAULT_MAX_INTERMEDIATE_CA,
            strict_critical_extensions: true,
            accept_extensions_in_non_v3: false,
            check_key_usage: true,
            check_extended_key_usage: false,
            eager_parse: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_spec_constants() {
        let cfg = VerifierConfig::default();
        assert_eq!(cfg.max_intermediate_ca, 8);
        assert!(cfg.strict_critical_extensions);
        assert!(!cfg.accept_extensions_in_non_v3);
    }
}
