// crates/serverless-contracts-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Example configuration kept in sync with the config model by the load tests.

/// Returns a canonical example `serverless-contracts.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[validation]
mode = "enforce"
validate_output = true

[client]
base_url = "https://api.example.com/prod"
timeout_ms = 30000

[client.default_headers]
x-api-key = "replace-me"

[audit]
sink = "stderr"
"#,
    )
}
