//! Event lifecycle states.
//!
//! The lifecycle is linear in intent (`DRAFT` through `ARCHIVED`) but the
//! setter is deliberately permissive: any authenticated actor may move an
//! event to any state at any time. `ARCHIVED` is also reachable through the
//! dedicated archive operation and is terminal in practice.

use serde::{Deserialize, Serialize};

/// Top-level status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Draft,
    Planning,
    Ready,
    InProgress,
    Completed,
    Archived,
}

impl EventStatus {
    /// The stored (and wire) representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "DRAFT",
            EventStatus::Planning => "PLANNING",
            EventStatus::Ready => "READY",
            EventStatus::InProgress => "IN_PROGRESS",
            EventStatus::Completed => "COMPLETED",
            EventStatus::Archived => "ARCHIVED",
        }
    }

    /// Parse a stored status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(EventStatus::Draft),
            "PLANNING" => Some(EventStatus::Planning),
            "READY" => Some(EventStatus::Ready),
            "IN_PROGRESS" => Some(EventStatus::InProgress),
            "COMPLETED" => Some(EventStatus::Completed),
            "ARCHIVED" => Some(EventStatus::Archived),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Draft => "Draft",
            EventStatus::Planning => "Planning",
            EventStatus::Ready => "Ready",
            EventStatus::InProgress => "In Progress",
            EventStatus::Completed => "Completed",
            EventStatus::Archived => "Archived",
        }
    }
}

/// Validate a target status for the permissive setter.
///
/// Every known state is reachable from every other; only unknown strings
/// are rejected. Recording a retrospective uses `COMPLETED` through the
/// same path as part of one atomic update.
pub fn validate_target_status(target: &str) -> Result<EventStatus, String> {
    EventStatus::parse(target).ok_or_else(|| format!("Unknown event status '{target}'"))
}
