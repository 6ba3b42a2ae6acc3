//! Repository for the `notification_settings` singleton row.

use sqlx::PgPool;

use crate::models::notification_settings::{NotificationSettings, UpdateNotificationSettings};

const COLUMNS: &str = "id, push_topic, phone_number, push_enabled, phone_enabled, \
                       legacy_imported_at, updated_at";

/// The singleton row id.
const SETTINGS_ID: i64 = 1;

/// Provides access to the notification configuration.
pub struct NotificationSettingsRepo;

impl NotificationSettingsRepo {
    /// Load the settings row. The row is seeded by migration, so this
    /// only fails on connection errors.
    pub async fn get(pool: &PgPool) -> Result<NotificationSettings, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_settings WHERE id = $1");
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(SETTINGS_ID)
            .fetch_one(pool)
            .await
    }

    /// Apply an admin update. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateNotificationSettings,
    ) -> Result<NotificationSettings, sqlx::Error> {
        let query = format!(
            "UPDATE notification_settings SET
                push_topic = COALESCE($2, push_topic),
                phone_number = COALESCE($3, phone_number),
                push_enabled = COALESCE($4, push_enabled),
                phone_enabled = COALESCE($5, phone_enabled)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(SETTINGS_ID)
            .bind(&input.push_topic)
            .bind(&input.phone_number)
            .bind(input.push_enabled)
            .bind(input.phone_enabled)
            .fetch_one(pool)
            .await
    }

    /// One-time import of legacy environment configuration.
    ///
    /// Writes `push_topic`/`phone_number` from the legacy values and
    /// stamps `legacy_imported_at` — but only if no import ever ran.
    /// Later calls (and later env changes) are no-ops: after the stamp,
    /// the database row is the single source of truth. Returns `true`
    /// when this call performed the import.
    pub async fn import_legacy(
        pool: &PgPool,
        push_topic: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notification_settings SET
                push_topic = COALESCE($2, push_topic),
                phone_number = COALESCE($3, phone_number),
                legacy_imported_at = NOW()
             WHERE id = $1 AND legacy_imported_at IS NULL",
        )
        .bind(SETTINGS_ID)
        .bind(push_topic)
        .bind(phone_number)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
