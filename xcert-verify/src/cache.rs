// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! Component D, the lazy detail layer: an acquire/release pair over a
//! certificate's [`Frame`] and a second over its key-strength info, each
//! guarded by its own mutex (spec.md §5: "two independent mutexes ... never
//! taken while holding another certificate's mutex of the same kind").
//!
//! The acquire/release discipline is expressed as a scoped closure rather
//! than a guard type the caller must remember to drop: `with_frame` locks,
//! parses on first access, hands the frame to the closure, and unlocks when
//! the closure returns. This makes "release is guaranteed on all exit
//! paths" a property of the borrow checker rather than caller discipline.

use std::sync::Mutex;

use xcert_asn1::Frame;

use crate::error::{FatalError, Result};
use crate::ops::{CryptoOps, KeyInfo};

/// The per-certificate cache (spec.md §3's "Cache"): at most one
/// materialized [`Frame`] and at most one materialized [`KeyInfo`].
pub struct Cache<'a> {
    frame: Mutex<Option<Frame<'a>>>,
    key_info: Mutex<Option<KeyInfo>>,
}

impl<'a> Cache<'a> {
    pub fn new() -> Self {
        Cache {
            frame: Mutex::new(None),
            key_info: Mutex::new(None),
        }
    }

    /// Ensures the frame is materialized (parsing `der` via components A/B/C
    /// on first access) and calls `f` with a shared borrow of it, holding
    /// the mutex only for the duration of the call.
    pub fn with_frame<R>(
        &self,
        der: &'a [u8],
        f: impl FnOnce(&Frame<'a>) -> R,
    ) -> Result<R> {
        let mut guard = self.frame.lock().map_err(|_| FatalError::CachePoisoned)?;
        if guard.is_none() {
            *guard = Some(Frame::parse(der)?);
        }
        Ok(f(guard.as_ref().expect("just inserted")))
    }

    /// Ensures the SPKI has been decoded into key-strength info and calls
    /// `f` with a shared borrow of it.
    pub fn with_key_info<R>(
        &self,
        ops: &impl CryptoOps,
        spki_der: &[u8],
        f: impl FnOnce(&KeyInfo) -> R,
    ) -> Result<R> {
        let mut guard = self.key_info.lock().map_err(|_| FatalError::CachePoisoned)?;
        if guard.is_none() {
            *guard = Some(ops.key_info(spki_der)?);
        }
        Ok(f(guard.as_ref().expect("just inserted")))
    }

    /// Drops both cached entries, bounding peak memory (spec.md §3's
    /// lifecycle note).
    pub fn flush(&self) {
        if let Ok(mut guard) = self.frame.lock() {
            *guard = None;
        }
        if let Ok(mut guard) = self.key_info.lock() {
            *guard = None;
        }
    }
}

impl Default for Cache<'_> {
    fn default() -> Self {
        Cache::new()
    }
}
