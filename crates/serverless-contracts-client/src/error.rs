// crates/serverless-contracts-client/src/error.rs
// ============================================================================
// Module: Client Errors
// Description: Failure taxonomy for request building and execution.
// Purpose: Give callers stable, matchable error kinds.
// Dependencies: serverless-contracts-core, thiserror
// ============================================================================

//! ## Overview
//! [`ClientError`] covers every way a contract call can fail, from path
//! filling through transport and response decoding.
//! Invariants:
//! - Template, validation, and transport errors are wrapped unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serverless_contracts_core::TemplateError;
use serverless_contracts_core::ValidationError;
use thiserror::Error;

use crate::transport::TransportError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Client errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Transport failures are carried unchanged.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The path template could not be filled.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Arguments or response body disagree with the contract.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The injected transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The endpoint answered with a non-2xx status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response text (lossy UTF-8).
        body: String,
    },
    /// The response body could not be decoded into the output type.
    #[error("response decode failed: {0}")]
    ResponseDecode(String),
}

impl ClientError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Template(err) => err.kind(),
            Self::Validation(err) => err.kind(),
            Self::Transport(err) => err.kind(),
            Self::UnexpectedStatus {
                ..
            } => "unexpected_status",
            Self::ResponseDecode(_) => "response_decode",
        }
    }
}
