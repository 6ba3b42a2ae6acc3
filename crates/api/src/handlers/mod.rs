pub mod auth;
pub mod banners;
pub mod catalog;
pub mod categories;
pub mod colors;
pub mod customers;
pub mod dashboard;
pub mod notification_settings;
pub mod products;
pub mod rentals;
pub mod sizes;
pub mod users;
