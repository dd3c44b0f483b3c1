//! Flyer design status.

use serde::{Deserialize, Serialize};

/// Design progress of the flyer/marketing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlyerStatus {
    NotStarted,
    InProgress,
    Done,
}

impl FlyerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlyerStatus::NotStarted => "NOT_STARTED",
            FlyerStatus::InProgress => "IN_PROGRESS",
            FlyerStatus::Done => "DONE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NOT_STARTED" => Some(FlyerStatus::NotStarted),
            "IN_PROGRESS" => Some(FlyerStatus::InProgress),
            "DONE" => Some(FlyerStatus::Done),
            _ => None,
        }
    }

    /// Terminal for the reminder sweep.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlyerStatus::Done)
    }
}
