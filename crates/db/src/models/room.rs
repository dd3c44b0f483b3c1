//! Room reservation entity model and DTOs.

use lchub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `room_reservations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoomReservation {
    pub id: DbId,
    pub event_id: DbId,
    pub room_name: Option<String>,
    pub reservation_url: Option<String>,
    pub confirmation_id: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub confirmed_at: Option<Timestamp>,
    pub assignee_id: Option<DbId>,
    pub accepted_at: Option<Timestamp>,
    pub reminder_sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Mutable reservation fields for the upsert path. Identity and the
/// assignment fields are preserved across updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRoomReservation {
    pub room_name: Option<String>,
    pub reservation_url: Option<String>,
    pub confirmation_id: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}
