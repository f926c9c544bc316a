pub mod repositories;
pub mod storage;

pub use repositories::*;
pub use storage::*;
