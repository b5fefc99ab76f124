// ── Audit trail ──
//
// One record per caller-facing operation attempt, written after the
// operation completes. Recording is best-effort: `AuditSink::record`
// returns nothing, and sinks swallow (and log) their own failures so an
// audit problem can never change an operation's result.

mod jsonl;
mod mongo;
mod store;

pub use jsonl::JsonlAuditSink;
pub use mongo::MongoAuditSink;
pub use store::{AuditError, AuditStore, DEFAULT_COLLECTION, DEFAULT_DATABASE, is_mongo_uri};

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

// ── Record ───────────────────────────────────────────────────────────

/// Which caller-facing operation a record describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuditAction {
    Authenticate,
    ListDevices,
    ShowInterfaces,
}

/// Outcome of the operation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuditStatus {
    Success,
    Failure,
}

/// Immutable description of one operation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub status: AuditStatus,
    pub device_ip: Option<String>,
    pub message: Option<String>,
}

impl AuditRecord {
    pub fn success(action: AuditAction) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            status: AuditStatus::Success,
            device_ip: None,
            message: None,
        }
    }

    pub fn failure(action: AuditAction, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            status: AuditStatus::Failure,
            device_ip: None,
            message: Some(message.into()),
        }
    }

    /// Build the record for an operation result: success, or failure with
    /// the error's display text.
    pub fn from_outcome<T, E: std::fmt::Display>(
        action: AuditAction,
        outcome: &Result<T, E>,
    ) -> Self {
        match outcome {
            Ok(_) => Self::success(action),
            Err(e) => Self::failure(action, e.to_string()),
        }
    }

    pub fn with_device_ip(mut self, device_ip: impl Into<String>) -> Self {
        self.device_ip = Some(device_ip.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == AuditStatus::Success
    }
}

// ── Sink ─────────────────────────────────────────────────────────────

/// Receives audit records, fire-and-forget.
///
/// `record` must not panic and has no way to report failure. Concurrent
/// calls may interleave; each record stands alone.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: AuditRecord);
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _record: AuditRecord) {}
}

/// Emits each record as a structured `tracing` event on the `dnacly::audit` target.
///
/// The fallback when no document store is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: AuditRecord) {
        info!(
            target: "dnacly::audit",
            timestamp = %record.timestamp.to_rfc3339(),
            action = %record.action,
            status = %record.status,
            device_ip = record.device_ip.as_deref(),
            message = record.message.as_deref(),
            "audit"
        );
    }
}

/// Keeps records in memory for later inspection.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: AuditRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn record_serializes_with_wire_field_names() {
        let mut record =
            AuditRecord::failure(AuditAction::ShowInterfaces, "Device 10.0.0.9 not found.")
                .with_device_ip("10.0.0.9");
        record.timestamp = "2024-05-01T12:00:00Z".parse().unwrap();

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "timestamp": "2024-05-01T12:00:00Z",
                "action": "show_interfaces",
                "status": "failure",
                "device_ip": "10.0.0.9",
                "message": "Device 10.0.0.9 not found."
            })
        );
    }

    #[test]
    fn success_has_no_message() {
        let record = AuditRecord::success(AuditAction::Authenticate);
        assert!(record.is_success());
        assert!(record.message.is_none());
        assert!(record.device_ip.is_none());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["device_ip"], serde_json::Value::Null);
        assert_eq!(value["message"], serde_json::Value::Null);
    }

    #[test]
    fn outcome_maps_to_status() {
        let ok: Result<(), String> = Ok(());
        let err: Result<(), String> = Err("boom".into());

        assert!(AuditRecord::from_outcome(AuditAction::ListDevices, &ok).is_success());
        let failed = AuditRecord::from_outcome(AuditAction::ListDevices, &err);
        assert_eq!(failed.status, AuditStatus::Failure);
        assert_eq!(failed.message.as_deref(), Some("boom"));
    }

    #[test]
    fn action_names_match_serde() {
        assert_eq!(AuditAction::ListDevices.to_string(), "list_devices");
        assert_eq!(AuditAction::ShowInterfaces.as_ref(), "show_interfaces");
        assert_eq!(AuditStatus::Success.to_string(), "success");
    }

    #[test]
    fn memory_sink_keeps_order() {
        let sink = MemoryAuditSink::new();
        assert!(sink.is_empty());
        sink.record(AuditRecord::success(AuditAction::Authenticate));
        sink.record(AuditRecord::failure(AuditAction::ListDevices, "x"));

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].action, AuditAction::Authenticate);
        assert_eq!(records[1].action, AuditAction::ListDevices);
    }

    #[test]
    fn null_and_tracing_sinks_accept_records() {
        NullAuditSink.record(AuditRecord::success(AuditAction::Authenticate));
        TracingAuditSink.record(AuditRecord::failure(AuditAction::ListDevices, "offline"));
    }
}
