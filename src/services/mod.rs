pub mod admin_service;
pub mod admin_view;
pub mod auth_service;
pub mod availability;
pub mod customer_service;
pub mod session;

pub use admin_service::*;
pub use admin_view::build_view;
pub use auth_service::*;
pub use availability::*;
pub use customer_service::*;
pub use session::*;
