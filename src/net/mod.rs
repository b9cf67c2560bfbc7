//! Networking modules for the back-office REST store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues authenticated HTTP calls, `types` defines the wire schema for
//! the supplier-integration endpoints, and `error` is the shared failure type.

pub mod api;
pub mod error;
pub mod types;
