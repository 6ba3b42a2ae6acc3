//! Atelier event bus and staff notification infrastructure.
//!
//! Building blocks for the platform-wide event system:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] — the canonical domain event envelope.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `events` table.
//! - [`delivery`] — external delivery channels (push topic, phone
//!   message fallback).

pub mod bus;
pub mod delivery;
pub mod persistence;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::phone::{PhoneConfig, PhoneDelivery};
pub use delivery::push::PushDelivery;
pub use persistence::EventPersistence;
