//! Staff notification configuration.
//!
//! A single row (id = 1) is the only source of truth for where rental
//! alerts go. Legacy environment-variable configuration is imported once
//! at startup and never consulted again.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The `notification_settings` singleton row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationSettings {
    pub id: DbId,
    /// Push topic URL alerts are POSTed to (e.g. an ntfy topic).
    pub push_topic: Option<String>,
    /// Phone number for the fallback text-message channel.
    pub phone_number: Option<String>,
    pub push_enabled: bool,
    pub phone_enabled: bool,
    /// Set once when legacy env config was imported (or found absent).
    pub legacy_imported_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// DTO for updating notification settings (admin only).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNotificationSettings {
    pub push_topic: Option<String>,
    pub phone_number: Option<String>,
    pub push_enabled: Option<bool>,
    pub phone_enabled: Option<bool>,
}
