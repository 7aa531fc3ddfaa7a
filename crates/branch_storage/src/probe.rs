//! Availability probing.
//!
//! A backend can be present and still unusable: Web Storage may throw on
//! write in private browsing, and cookie writes are silently dropped on some
//! `file:` pages. The probe writes a throwaway marker, reads it back and
//! removes it. Any failure only disqualifies the candidate.

use crate::adapter::StorageAdapter;
use crate::error::HostResult;

/// Value written under the probe marker.
pub const PROBE_VALUE: &str = "probe";

/// Scoped cleanup for a probe write.
///
/// The cleanup runs exactly once: explicitly through [`ProbeGuard::release`],
/// whose result counts towards the probe outcome, or on drop when the probe
/// bails out early, in which case its result is ignored.
pub struct ProbeGuard<F>
where
    F: FnMut() -> HostResult<()>,
{
    cleanup: Option<F>,
}

impl<F> ProbeGuard<F>
where
    F: FnMut() -> HostResult<()>,
{
    /// Arms a guard around `cleanup`.
    pub fn new(cleanup: F) -> Self {
        Self {
            cleanup: Some(cleanup),
        }
    }

    /// Runs the cleanup now and reports its result.
    pub fn release(mut self) -> HostResult<()> {
        match self.cleanup.take() {
            Some(mut cleanup) => cleanup(),
            None => Ok(()),
        }
    }
}

impl<F> Drop for ProbeGuard<F>
where
    F: FnMut() -> HostResult<()>,
{
    fn drop(&mut self) {
        if let Some(mut cleanup) = self.cleanup.take() {
            if let Err(err) = cleanup() {
                tracing::debug!(%err, "probe cleanup failed");
            }
        }
    }
}

/// Returns true if `adapter` survives a marker round trip.
///
/// Never fails: a rejected probe is logged and reported as `false`.
pub fn is_available(adapter: &dyn StorageAdapter, marker: &str) -> bool {
    match adapter.probe(marker) {
        Ok(()) => {
            tracing::debug!(backend = %adapter.kind(), "storage backend available");
            true
        }
        Err(err) => {
            tracing::debug!(backend = %adapter.kind(), %err, "storage backend unavailable");
            false
        }
    }
}
