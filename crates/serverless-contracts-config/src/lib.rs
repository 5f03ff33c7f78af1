// crates/serverless-contracts-config/src/lib.rs
// ============================================================================
// Module: Serverless Contracts Config Library
// Description: Canonical config model, validation, and runtime conversion.
// Purpose: Single source of truth for serverless-contracts.toml semantics.
// Dependencies: serverless-contracts-client, serverless-contracts-core, serde, toml
// ============================================================================

//! ## Overview
//! `serverless-contracts-config` defines the configuration model shared by
//! server adapters and clients. It provides strict, fail-closed validation
//! and conversions into [`serverless_contracts_core::ValidationSettings`],
//! [`serverless_contracts_client::ReqwestTransport`], and audit sinks.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
