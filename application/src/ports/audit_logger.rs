//! Port for the catalog mutation audit log.
//!
//! Defines the [`AuditLogger`] trait for recording catalog mutations
//! (submissions, bulk updates, bulk deletes) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures what changed in a
//! machine-readable format (JSONL).

use serde_json::Value;

/// A structured audit event.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields. The adapter adds the timestamp when it writes the record.
pub struct AuditEvent {
    /// Event type identifier (e.g., "question_created", "questions_deleted").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AuditEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging audit events.
///
/// `log` is synchronous and infallible; a failed write must never fail the
/// mutation that produced it.
pub trait AuditLogger: Send + Sync {
    fn log(&self, event: AuditEvent);
}

/// No-op implementation for tests and when the audit log is disabled.
pub struct NoAuditLogger;

impl AuditLogger for NoAuditLogger {
    fn log(&self, _event: AuditEvent) {}
}
