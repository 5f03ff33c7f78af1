// crates/serverless-contracts-server/src/error.rs
// ============================================================================
// Module: Server Adapter Errors
// Description: Failure taxonomy for invocation decoding and dispatch.
// Purpose: Give platform dispatchers stable, matchable error kinds.
// Dependencies: serverless-contracts-core, thiserror
// ============================================================================

//! ## Overview
//! [`ServerError`] is returned by every adapter step. Handler errors are
//! boxed and carried as-is.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serverless_contracts_core::AuthorizerType;
use serverless_contracts_core::ValidationError;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Boxed error returned by business handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Server adapter errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - [`ServerError::Handler`] carries the handler's own error unchanged.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The wire event envelope could not be read.
    #[error("invalid invocation event: {0}")]
    InvalidEvent(String),
    /// The request body is not valid base64 or JSON.
    #[error("body decode failed: {0}")]
    BodyDecode(String),
    /// The authorizer section required by the contract is absent.
    #[error("missing {authorizer} authorizer context at requestContext.{field}")]
    MissingAuthorizerContext {
        /// Authorizer declared by the contract.
        authorizer: AuthorizerType,
        /// Missing request-context field.
        field: &'static str,
    },
    /// Input or output failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Handler output could not be serialized.
    #[error("response encode failed: {0}")]
    Encode(String),
    /// The handler failed.
    #[error("handler failed: {0}")]
    Handler(BoxError),
}

impl ServerError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEvent(_) => "invalid_event",
            Self::BodyDecode(_) => "body_decode",
            Self::MissingAuthorizerContext {
                ..
            } => "missing_authorizer_context",
            Self::Validation(err) => err.kind(),
            Self::Encode(_) => "encode",
            Self::Handler(_) => "handler",
        }
    }
}
