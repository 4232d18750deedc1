use std::env;
use std::path::PathBuf;

use crate::utils::AppError;

/// Local file written before upload
pub const BACKUP_FILE: &str = "cognito_backup.json";
/// Object key the snapshot is stored under; each run overwrites it
pub const BACKUP_KEY: &str = "backups/cognito_backup.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub user_pool_id: String,
    pub backup_bucket: String,
    pub backup_key: String,
    pub local_path: PathBuf,
}

impl Config {
    /// Reads `USER_POOL_ID` and `BACKUP_BUCKET` from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::ConfigError(format!("{} must be set", name)))
        };

        Ok(Self {
            user_pool_id: required("USER_POOL_ID")?,
            backup_bucket: required("BACKUP_BUCKET")?,
            backup_key: BACKUP_KEY.to_string(),
            local_path: PathBuf::from(BACKUP_FILE),
        })
    }
}
