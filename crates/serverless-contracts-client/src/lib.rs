// crates/serverless-contracts-client/src/lib.rs
// ============================================================================
// Module: Serverless Contracts Client Library
// Description: Client-side request builder and executor for contracts.
// Purpose: Call contract endpoints with the same shapes the server enforces.
// Dependencies: crate::{error, executor, http, request, transport}
// ============================================================================

//! ## Overview
//! [`build_request`] turns request arguments into a transport-neutral
//! [`RequestDescriptor`] without I/O. [`execute`] sends it through an
//! injected [`Transport`] exactly once and decodes the body into the caller's
//! output type. [`ReqwestTransport`] is the HTTP binding.
//! Invariants:
//! - Path parameters are substituted before any channel check.
//! - No retries and no caching.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod executor;
pub mod http;
pub mod request;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ClientError;
pub use executor::ContractClient;
pub use executor::ContractResponse;
pub use executor::execute;
pub use executor::execute_with;
pub use http::ReqwestTransport;
pub use request::RequestArguments;
pub use request::RequestDescriptor;
pub use request::build_request;
pub use transport::Transport;
pub use transport::TransportError;
pub use transport::TransportResponse;
