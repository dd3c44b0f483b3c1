//! Domain rules for the LC Hub event-operations backend.
//!
//! This crate has zero internal dependencies so it can be used by the
//! persistence layer, the API server, and any future CLI tooling. It holds
//! the shared id/timestamp types, the error taxonomy, role capabilities,
//! the event-lifecycle and sub-workflow state machines, the task
//! assignment/acceptance protocol rules, action-token helpers, and the
//! notification reason/dedupe-key catalogue.

pub mod assignment;
pub mod catering;
pub mod error;
pub mod event_status;
pub mod flyer;
pub mod notify;
pub mod roles;
pub mod room;
pub mod token;
pub mod types;
