//! Staff notification router.
//!
//! [`NotificationRouter`] subscribes to the event bus and forwards
//! `rental.created` events to the staff channels configured in the
//! `notification_settings` row: push topic first, phone text as the
//! fallback. Delivery failures never affect the mutation that published
//! the event; when both channels fail the notification is logged and
//! dropped.

use atelier_db::models::notification_settings::NotificationSettings;
use atelier_db::repositories::NotificationSettingsRepo;
use atelier_db::DbPool;
use tokio::sync::broadcast;

use atelier_events::{PhoneConfig, PhoneDelivery, PlatformEvent, PushDelivery};

/// Background task routing platform events to staff channels.
pub struct NotificationRouter {
    pool: DbPool,
    push: PushDelivery,
    phone: Option<PhoneDelivery>,
}

impl NotificationRouter {
    /// Build a router. `phone_config` is `None` when no gateway is
    /// configured; the fallback channel is then skipped.
    pub fn new(pool: DbPool, phone_config: Option<PhoneConfig>) -> Self {
        Self {
            pool,
            push: PushDelivery::new(),
            phone: phone_config.map(PhoneDelivery::new),
        }
    }

    /// Run the routing loop until the event bus closes.
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if event.event_type == "rental.created" {
                        self.notify_staff(&event).await;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Deliver a staff notification for one event, falling back from
    /// push to phone.
    async fn notify_staff(&self, event: &PlatformEvent) {
        let settings = match NotificationSettingsRepo::get(&self.pool).await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load notification settings");
                return;
            }
        };

        let (title, body) = render_rental_created(event);

        if let Some(topic) = push_target(&settings) {
            match self.push.deliver(topic, &title, &body).await {
                Ok(()) => {
                    tracing::info!(topic, "Staff push notification sent");
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, topic, "Push delivery failed, trying phone fallback");
                }
            }
        }

        match (&self.phone, phone_target(&settings)) {
            (Some(phone), Some(number)) => {
                if let Err(e) = phone.deliver(number, &body).await {
                    tracing::error!(error = %e, "Phone fallback delivery failed, notification dropped");
                }
            }
            _ => {
                tracing::warn!(
                    event_type = %event.event_type,
                    "No usable notification channel, notification dropped"
                );
            }
        }
    }
}

fn push_target(settings: &NotificationSettings) -> Option<&str> {
    if !settings.push_enabled {
        return None;
    }
    settings.push_topic.as_deref().filter(|t| !t.is_empty())
}

fn phone_target(settings: &NotificationSettings) -> Option<&str> {
    if !settings.phone_enabled {
        return None;
    }
    settings.phone_number.as_deref().filter(|n| !n.is_empty())
}

/// Render the staff-facing text for a `rental.created` event.
fn render_rental_created(event: &PlatformEvent) -> (String, String) {
    let contract = event.payload["contract_number"].as_str().unwrap_or("?");
    let customer = event.payload["customer_name"].as_str().unwrap_or("?");
    let start = event.payload["rental_start_date"].as_str().unwrap_or("?");
    let end = event.payload["rental_end_date"].as_str().unwrap_or("?");
    let items = event.payload["item_count"].as_i64().unwrap_or(0);

    (
        format!("New rental {contract}"),
        format!("{customer} booked {items} item(s), {start} to {end}"),
    )
}
