pub mod availability_repo;
pub mod banner_repo;
pub mod category_repo;
pub mod color_repo;
pub mod customer_repo;
pub mod dashboard_repo;
pub mod event_repo;
pub mod notification_settings_repo;
pub mod product_image_repo;
pub mod product_repo;
pub mod refresh_token_repo;
pub mod rental_item_repo;
pub mod rental_repo;
pub mod size_repo;
pub mod user_repo;

pub use availability_repo::AvailabilityRepo;
pub use banner_repo::BannerRepo;
pub use category_repo::CategoryRepo;
pub use color_repo::ColorRepo;
pub use customer_repo::CustomerRepo;
pub use dashboard_repo::DashboardRepo;
pub use event_repo::EventRepo;
pub use notification_settings_repo::NotificationSettingsRepo;
pub use product_image_repo::ProductImageRepo;
pub use product_repo::ProductRepo;
pub use refresh_token_repo::RefreshTokenRepo;
pub use rental_item_repo::RentalItemRepo;
pub use rental_repo::RentalRepo;
pub use size_repo::SizeRepo;
pub use user_repo::UserRepo;
