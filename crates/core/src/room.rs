//! Room reservation status.

use serde::{Deserialize, Serialize};

/// Status of a room reservation. Accepting the task advances `PENDING` to
/// `ACCEPTED`; confirming the booking stamps `confirmed_at` the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Pending,
    Accepted,
    Confirmed,
    Cancelled,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Pending => "PENDING",
            RoomStatus::Accepted => "ACCEPTED",
            RoomStatus::Confirmed => "CONFIRMED",
            RoomStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(RoomStatus::Pending),
            "ACCEPTED" => Some(RoomStatus::Accepted),
            "CONFIRMED" => Some(RoomStatus::Confirmed),
            "CANCELLED" => Some(RoomStatus::Cancelled),
            _ => None,
        }
    }

    /// Terminal for the reminder sweep.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoomStatus::Confirmed | RoomStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for s in [
            RoomStatus::Pending,
            RoomStatus::Accepted,
            RoomStatus::Confirmed,
            RoomStatus::Cancelled,
        ] {
            assert_eq!(RoomStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(RoomStatus::parse("BOOKED"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(RoomStatus::Confirmed.is_terminal());
        assert!(RoomStatus::Cancelled.is_terminal());
        assert!(!RoomStatus::Pending.is_terminal());
        assert!(!RoomStatus::Accepted.is_terminal());
    }
}
