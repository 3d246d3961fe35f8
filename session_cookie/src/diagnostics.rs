//! Side channel for request-time warnings.
//!
//! Cookie construction never fails because of a suspicious host or an odd
//! User-Agent. It reports those through a [`DiagnosticsSink`] instead, so the
//! caller decides where the messages go.

/// Receiver of human readable warnings produced while building cookies.
pub trait DiagnosticsSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// Default sink forwarding every message to `tracing::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
