//! Reminder sweep: stale, unaccepted task assignments get one nudge.
//!
//! The sweep is stateless and idempotent. Eligibility is gated on
//! `reminder_sent_at` (stamped after each send, cleared on reassignment),
//! so overlapping invocations -- the interval loop below plus the
//! `/reminders/run` endpoint, or two external schedulers -- do not
//! duplicate reminders. The dispatcher's dedupe key is the secondary net.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use lchub_core::assignment::{TaskKind, REMINDER_STALENESS_DAYS};
use lchub_db::repositories::{CateringRepo, FlyerRepo, RoomRepo};

use crate::notify::Notifier;

/// How often the in-process sweep runs by default.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;

/// Run one sweep over all three sub-workflow tables, returning the number
/// of reminders sent.
pub async fn run_reminder_sweep(pool: &PgPool, notifier: &Notifier) -> Result<u64, sqlx::Error> {
    let cutoff = Utc::now() - chrono::Duration::days(REMINDER_STALENESS_DAYS);
    let mut sent = 0u64;

    for candidate in CateringRepo::find_reminder_candidates(pool, cutoff).await? {
        notifier
            .send_task_reminder(pool, &candidate, TaskKind::Catering)
            .await?;
        CateringRepo::set_reminder_sent(pool, candidate.record_id).await?;
        sent += 1;
    }

    for candidate in RoomRepo::find_reminder_candidates(pool, cutoff).await? {
        notifier
            .send_task_reminder(pool, &candidate, TaskKind::Room)
            .await?;
        RoomRepo::set_reminder_sent(pool, candidate.record_id).await?;
        sent += 1;
    }

    for candidate in FlyerRepo::find_reminder_candidates(pool, cutoff).await? {
        notifier
            .send_task_reminder(pool, &candidate, TaskKind::Flyer)
            .await?;
        FlyerRepo::set_reminder_sent(pool, candidate.record_id).await?;
        sent += 1;
    }

    Ok(sent)
}

/// Run the periodic reminder loop until `cancel` is triggered.
///
/// Deployments with an external scheduler can rely on the
/// `/reminders/run` endpoint instead; running both is harmless.
pub async fn run(pool: PgPool, notifier: std::sync::Arc<Notifier>, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("REMINDER_SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS);

    tracing::info!(interval_secs, "Reminder sweep job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Reminder sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                match run_reminder_sweep(&pool, &notifier).await {
                    Ok(sent) => {
                        if sent > 0 {
                            tracing::info!(sent, "Reminder sweep: reminders sent");
                        } else {
                            tracing::debug!("Reminder sweep: nothing stale");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Reminder sweep failed");
                    }
                }
            }
        }
    }
}
