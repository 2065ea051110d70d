//! Approval desk for tenant and guest parking assignments.
//!
//! The `approvals` module holds the core: the registration model, the
//! slot-assignment rules, the store and dispatch-log abstractions, and the
//! HTTP router the operator console talks to. `config`, `telemetry`, and
//! `error` carry the service plumbing.

pub mod approvals;
pub mod config;
pub mod error;
pub mod telemetry;
