// Re-export all models organized by domain
pub mod admin;
pub mod api;
pub mod calendar;
pub mod errors;
pub mod lenient;
pub mod records;

pub use admin::*;
pub use api::*;
pub use calendar::*;
pub use errors::*;
pub use records::*;
