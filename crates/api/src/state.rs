use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notify::Notifier;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lchub_db::DbPool,
    /// Server configuration (accessed by extractors and handlers).
    pub config: Arc<ServerConfig>,
    /// Notification dispatcher (dedupe + SMTP/dry delivery + email log).
    pub notifier: Arc<Notifier>,
}
