pub mod field_update;
pub mod user_service;

pub use field_update::{FieldUpdater, UserField};
pub use user_service::UserService;
