//! Flyer task entity model and DTOs.

use lchub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `flyer_tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FlyerTask {
    pub id: DbId,
    pub event_id: DbId,
    pub flyer_url: Option<String>,
    pub design_status: String,
    pub dist_email: bool,
    pub dist_whatsapp: bool,
    pub dist_teams: bool,
    pub dist_other: Option<String>,
    pub notes: Option<String>,
    pub assignee_id: Option<DbId>,
    pub accepted_at: Option<Timestamp>,
    pub reminder_sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Mutable flyer fields for the upsert path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFlyerTask {
    pub flyer_url: Option<String>,
    pub design_status: Option<String>,
    pub dist_email: Option<bool>,
    pub dist_whatsapp: Option<bool>,
    pub dist_teams: Option<bool>,
    pub dist_other: Option<String>,
    pub notes: Option<String>,
}
