//! Observability setup for Folio.

pub mod tracing_setup;
