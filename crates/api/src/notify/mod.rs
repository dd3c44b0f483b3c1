//! Notification dispatcher.
//!
//! [`Notifier::send`] is the single choke point for outbound email: it
//! enforces per-dedupe-key suppression against the `email_logs` table,
//! attempts delivery (SMTP when configured, dry mode otherwise), and
//! appends exactly one log row per non-suppressed call. Transport failures
//! degrade to a `FAILED` row and never abort the triggering business
//! operation.
//!
//! The higher-level helpers (`send_task_assignment`,
//! `send_approval_request`, ...) own recipient fan-out and dedupe-key
//! construction; the approval request also issues the single-use decision
//! tokens embedded in its links.

pub mod mailer;
pub mod templates;

use chrono::{Duration, Utc};
use sqlx::PgPool;

use lchub_core::assignment::TaskKind;
use lchub_core::notify::{self as reasons, DEDUPE_WINDOW_HOURS};
use lchub_core::roles::{ROLE_FINANCE, ROLE_PAYMENT_ADMIN};
use lchub_core::token::{self, TokenType};
use lchub_core::types::DbId;
use lchub_db::models::email_log::CreateEmailLog;
use lchub_db::models::event::Event;
use lchub_db::models::reminder::ReminderCandidate;
use lchub_db::models::user::User;
use lchub_db::repositories::{ActionTokenRepo, EmailLogRepo, UserRepo};

use self::mailer::EmailConfig;

/// One outbound message, before dedupe and delivery.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub reason: &'static str,
    pub event_id: Option<DbId>,
    pub recipient_id: Option<DbId>,
    pub dedupe_key: Option<String>,
}

/// Builds messages, enforces deduplication, and records every attempt.
pub struct Notifier {
    /// SMTP configuration; `None` selects dry mode.
    smtp: Option<EmailConfig>,
    /// Public base URL for links embedded in messages.
    app_url: String,
}

impl Notifier {
    pub fn new(smtp: Option<EmailConfig>, app_url: String) -> Self {
        Self { smtp, app_url }
    }

    /// Construct from environment variables.
    pub fn from_env(app_url: String) -> Self {
        let smtp = EmailConfig::from_env();
        if smtp.is_none() {
            tracing::warn!("SMTP_HOST not set, email delivery runs in dry mode");
        }
        Self::new(smtp, app_url)
    }

    /// Dispatch one message. Returns `true` when an actual delivery
    /// attempt succeeded (or ran in dry mode), `false` when the dedupe
    /// window suppressed the send or the transport failed.
    ///
    /// Suppression is a silent no-op: no transport contact, no new log
    /// row. Every other call appends exactly one `email_logs` row.
    pub async fn send(&self, pool: &PgPool, email: OutboundEmail) -> Result<bool, sqlx::Error> {
        if let Some(key) = &email.dedupe_key {
            let since = Utc::now() - Duration::hours(DEDUPE_WINDOW_HOURS);
            if EmailLogRepo::find_recent_by_dedupe_key(pool, key, since)
                .await?
                .is_some()
            {
                tracing::debug!(dedupe_key = %key, "Notification suppressed by dedupe window");
                return Ok(false);
            }
        }

        let status = match &self.smtp {
            Some(config) => {
                match mailer::deliver(config, &email.to, &email.subject, &email.body).await {
                    Ok(()) => {
                        tracing::info!(to = %email.to, reason = email.reason, "Notification email sent");
                        reasons::STATUS_SENT
                    }
                    Err(e) => {
                        tracing::error!(to = %email.to, error = %e, "Notification email failed");
                        reasons::STATUS_FAILED
                    }
                }
            }
            None => {
                tracing::info!(
                    to = %email.to,
                    subject = %email.subject,
                    reason = email.reason,
                    "Dry mode: notification logged without transport"
                );
                reasons::STATUS_SENT
            }
        };

        EmailLogRepo::create(
            pool,
            &CreateEmailLog {
                to_email: email.to,
                subject: email.subject,
                reason: email.reason.to_string(),
                status: status.to_string(),
                event_id: email.event_id,
                recipient_id: email.recipient_id,
                dedupe_key: email.dedupe_key,
            },
        )
        .await?;

        Ok(status == reasons::STATUS_SENT)
    }

    /// Notify a lead that a task was assigned to them.
    pub async fn send_task_assignment(
        &self,
        pool: &PgPool,
        event: &Event,
        kind: TaskKind,
        assignee: &User,
    ) -> Result<(), sqlx::Error> {
        let (subject, body) = templates::task_assignment(
            &self.app_url,
            event.id,
            &event.title,
            kind.label(),
            &assignee.name,
        );
        self.send(
            pool,
            OutboundEmail {
                to: assignee.email.clone(),
                subject,
                body,
                reason: reasons::REASON_TASK_ASSIGNMENT,
                event_id: Some(event.id),
                recipient_id: Some(assignee.id),
                dedupe_key: Some(reasons::task_assignment_key(event.id, kind, assignee.id)),
            },
        )
        .await?;
        Ok(())
    }

    /// Ask every active finance approver to decide a catering request.
    ///
    /// Each recipient gets their own set of single-use decision tokens so
    /// the one-click links act as that recipient.
    pub async fn send_approval_request(
        &self,
        pool: &PgPool,
        event: &Event,
    ) -> Result<(), sqlx::Error> {
        let approvers = UserRepo::list_active_by_roles(pool, &[ROLE_FINANCE]).await?;

        for user in approvers {
            let approve = issue_token(pool, event.id, user.id, TokenType::Approve).await?;
            let reject = issue_token(pool, event.id, user.id, TokenType::Reject).await?;
            let changes = issue_token(pool, event.id, user.id, TokenType::RequestChanges).await?;

            let (subject, body) = templates::approval_request(
                &self.app_url,
                event.id,
                &event.title,
                &user.name,
                &approve,
                &reject,
                &changes,
            );
            self.send(
                pool,
                OutboundEmail {
                    to: user.email.clone(),
                    subject,
                    body,
                    reason: reasons::REASON_APPROVAL_REQUEST,
                    event_id: Some(event.id),
                    recipient_id: Some(user.id),
                    dedupe_key: Some(reasons::approval_request_key(event.id, user.id)),
                },
            )
            .await?;
        }
        Ok(())
    }

    /// Ask payment processors (payment admins and finance) to pay an
    /// approved catering order.
    pub async fn send_payment_request(
        &self,
        pool: &PgPool,
        event: &Event,
    ) -> Result<(), sqlx::Error> {
        let processors =
            UserRepo::list_active_by_roles(pool, &[ROLE_PAYMENT_ADMIN, ROLE_FINANCE]).await?;

        for user in processors {
            let (subject, body) =
                templates::payment_request(&self.app_url, event.id, &event.title, &user.name);
            self.send(
                pool,
                OutboundEmail {
                    to: user.email.clone(),
                    subject,
                    body,
                    reason: reasons::REASON_PAYMENT_REQUEST,
                    event_id: Some(event.id),
                    recipient_id: Some(user.id),
                    dedupe_key: Some(reasons::payment_request_key(event.id, user.id)),
                },
            )
            .await?;
        }
        Ok(())
    }

    /// Remind an assignee about a stale, unaccepted task.
    pub async fn send_task_reminder(
        &self,
        pool: &PgPool,
        candidate: &ReminderCandidate,
        kind: TaskKind,
    ) -> Result<(), sqlx::Error> {
        let (subject, body) = templates::task_reminder(
            &self.app_url,
            candidate.event_id,
            &candidate.event_title,
            kind.label(),
            &candidate.assignee_name,
        );
        self.send(
            pool,
            OutboundEmail {
                to: candidate.assignee_email.clone(),
                subject,
                body,
                reason: reasons::REASON_TASK_REMINDER,
                event_id: Some(candidate.event_id),
                recipient_id: Some(candidate.assignee_id),
                dedupe_key: Some(reasons::task_reminder_key(
                    candidate.event_id,
                    kind,
                    candidate.assignee_id,
                )),
            },
        )
        .await?;
        Ok(())
    }
}

/// Issue and persist a single-use decision token bound to an actor, an
/// event, and one decision.
pub async fn issue_token(
    pool: &PgPool,
    event_id: DbId,
    user_id: DbId,
    token_type: TokenType,
) -> Result<String, sqlx::Error> {
    let opaque = token::generate_token();
    let expires_at = Utc::now() + Duration::hours(token::DEFAULT_TTL_HOURS);
    ActionTokenRepo::create(
        pool,
        &opaque,
        token_type.as_str(),
        event_id,
        user_id,
        expires_at,
    )
    .await?;
    Ok(opaque)
}
