pub mod auth;
pub mod catalog;
pub mod dealers;

pub use auth::{AuthService, RegisterOutcome};
pub use catalog::CatalogService;
pub use dealers::DealerService;
