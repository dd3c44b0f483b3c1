//! Action-token generation and use-validation.
//!
//! An action token is a single-use, time-limited credential embedded in an
//! outbound email. It binds an actor, an event, and one catering decision,
//! letting the recipient act with one click and no session. Tokens are kept
//! forever as an audit trail; consumption sets `used_at` exactly once.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::catering::CateringDecision;
use crate::types::Timestamp;

/// Random bytes per token; hex-encoded to twice this many characters.
pub const TOKEN_BYTES: usize = 32;

/// Default token lifetime.
pub const DEFAULT_TTL_HOURS: i64 = 72;

/// The decision a token is authorized to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    Approve,
    Reject,
    RequestChanges,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Approve => "APPROVE",
            TokenType::Reject => "REJECT",
            TokenType::RequestChanges => "REQUEST_CHANGES",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "APPROVE" => Some(TokenType::Approve),
            "REJECT" => Some(TokenType::Reject),
            "REQUEST_CHANGES" => Some(TokenType::RequestChanges),
            _ => None,
        }
    }

    /// The catering decision this token applies when resolved.
    pub fn decision(&self) -> CateringDecision {
        match self {
            TokenType::Approve => CateringDecision::Approved,
            TokenType::Reject => CateringDecision::Rejected,
            TokenType::RequestChanges => CateringDecision::ChangesRequested,
        }
    }
}

/// Why a token cannot be used.
///
/// `AlreadyUsed` and `Expired` carry distinct user-facing copy so the
/// recipient knows whether retrying in-app makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("This action link is invalid or has already been used")]
    NotFound,
    #[error("This action has already been processed")]
    AlreadyUsed,
    #[error("This action link has expired")]
    Expired,
}

/// Generate a fresh opaque token string: [`TOKEN_BYTES`] random bytes,
/// lowercase hex.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Check whether a stored token may be used at `now`.
///
/// The used check comes before the expiry check: a consumed token reports
/// `AlreadyUsed` even after its expiry has also passed.
pub fn validate_for_use(
    used_at: Option<Timestamp>,
    expires_at: Timestamp,
    now: Timestamp,
) -> Result<(), TokenError> {
    if used_at.is_some() {
        return Err(TokenError::AlreadyUsed);
    }
    if expires_at < now {
        return Err(TokenError::Expired);
    }
    Ok(())
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes
            .as_ref()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}
