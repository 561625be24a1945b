//! Tracing/logging setup shared by binaries and harnesses embedding the
//! engine. The engine crates themselves only emit `tracing` events; whether
//! and how those events are collected is decided here, once per process.

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_json();
}

/// Tracing subscriber configuration.
pub mod tracing;
