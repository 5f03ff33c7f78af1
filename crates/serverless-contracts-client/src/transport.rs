// crates/serverless-contracts-client/src/transport.rs
// ============================================================================
// Module: Transport Abstraction
// Description: Injected transport used by the request executor.
// Purpose: Keep network I/O outside the contract engine.
// Dependencies: async-trait, thiserror
// ============================================================================

//! ## Overview
//! [`Transport`] is the only I/O seam of the executor. Implementations send a
//! [`RequestDescriptor`] and return the raw status, headers, and body bytes.
//! Non-2xx statuses are responses, not transport errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::request::RequestDescriptor;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Transport errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The descriptor could not be turned into a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The request failed in flight.
    #[error("request failed: {0}")]
    Request(String),
    /// The response body exceeded the configured limit.
    #[error("response exceeds {limit} bytes")]
    ResponseTooLarge {
        /// Maximum accepted body size.
        limit: usize,
    },
}

impl TransportError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::Request(_) => "transport",
            Self::ResponseTooLarge {
                ..
            } => "response_too_large",
        }
    }
}

/// Raw transport response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers (lower-case names).
    pub headers: BTreeMap<String, String>,
    /// Response body bytes.
    pub body: Vec<u8>,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sends request descriptors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot be sent or read.
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError>;
}
