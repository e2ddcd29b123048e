//! Core data pipeline for the Alertrix disaster-alert dashboard.
//!
//! Everything in this crate is pure and host-testable: the domain model,
//! severity classification, wire-shape normalization, snapshot filtering and
//! aggregation, report validation, and map viewport math. The UI crate owns
//! all I/O and feeds payloads through these functions unchanged.

pub mod filter;
pub mod geo;
pub mod model;
pub mod report;
pub mod severity;
pub mod wire;
