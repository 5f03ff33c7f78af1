// crates/serverless-contracts-core/src/audit.rs
// ============================================================================
// Module: Contract Audit Logging
// Description: Structured audit events for contract invocations and requests.
// Purpose: Emit redacted JSON-line audit records without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Server adapters record one `contract_invocation` event per wrapped
//! invocation and client executors record one `contract_request` event per
//! outbound call. Sinks decide where the JSON lines go.
//! Invariants:
//! - Payloads are never recorded; only a body presence flag is kept.
//! - Sinks never fail the caller; write errors are dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::http::HttpMethod;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Event label for server-side invocations.
const INVOCATION_EVENT: &str = "contract_invocation";
/// Event label for client-side requests.
const REQUEST_EVENT: &str = "contract_request";

/// Audit outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// The call completed successfully.
    Ok,
    /// The call failed.
    Error,
}

/// Contract audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Contract identifier.
    pub contract_id: String,
    /// HTTP verb bound to the contract.
    pub method: HttpMethod,
    /// Route template of the contract.
    pub path: String,
    /// Call outcome.
    pub outcome: AuditOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Response status code when one was produced.
    pub status_code: Option<u16>,
    /// Whether a request body was present.
    pub body_present: bool,
}

/// Inputs required to construct an audit event.
#[derive(Debug, Clone)]
pub struct AuditEventParams {
    /// Contract identifier.
    pub contract_id: String,
    /// HTTP verb bound to the contract.
    pub method: HttpMethod,
    /// Route template of the contract.
    pub path: String,
    /// Call outcome.
    pub outcome: AuditOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Response status code when one was produced.
    pub status_code: Option<u16>,
    /// Whether a request body was present.
    pub body_present: bool,
}

impl AuditEvent {
    /// Creates a server-side invocation event with a consistent timestamp.
    #[must_use]
    pub fn invocation(params: AuditEventParams) -> Self {
        Self::with_label(INVOCATION_EVENT, params)
    }

    /// Creates a client-side request event with a consistent timestamp.
    #[must_use]
    pub fn request(params: AuditEventParams) -> Self {
        Self::with_label(REQUEST_EVENT, params)
    }

    /// Builds an event for the given label.
    fn with_label(event: &'static str, params: AuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event,
            timestamp_ms,
            contract_id: params.contract_id,
            method: params.method,
            path: params.path,
            outcome: params.outcome,
            error_kind: params.error_kind,
            status_code: params.status_code,
            body_present: params.body_present,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for contract events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &AuditEvent);
}

/// No-op audit sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a shared writer.
#[derive(Debug)]
pub struct WriterAuditSink<W> {
    /// Writer guarded for concurrent recorders.
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterAuditSink<W> {
    /// Wraps a writer.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WriterAuditSink<File> {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open_append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> AuditSink for WriterAuditSink<W> {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut writer) = self.writer.lock()
        {
            let _ = writeln!(writer, "{payload}");
            let _ = writer.flush();
        }
    }
}
