//! siteledger: payment reconciliation and financial-status engine for a
//! trades-business back office.
//!
//! The engine is a pure pipeline over an already-fetched snapshot of
//! client, job, invoice, and payment records; see [`reconcile`] for the
//! stages and the public compute surface.

pub mod config;
pub mod error;
pub mod reconcile;
pub mod telemetry;
