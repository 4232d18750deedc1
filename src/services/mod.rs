pub mod directory_service;
pub mod cognito_service;
pub mod membership_service;
pub mod snapshot_service;
pub mod storage_service;
#[cfg(test)]
pub mod testing;

pub use directory_service::*;
pub use cognito_service::*;
pub use storage_service::*;
