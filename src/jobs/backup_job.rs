// ==================== COGNITO BACKUP JOB ====================
// Reads groups, users and memberships from the user pool, joins them and
// uploads the snapshot. One run per invocation.

use crate::{
    config::Config,
    services::directory_service,
    services::membership_service,
    services::snapshot_service,
    services::{DirectoryService, ObjectStore},
    utils::AppError,
};
use chrono::Utc;

#[derive(Debug, Clone, PartialEq)]
pub struct BackupSummary {
    pub groups: usize,
    pub users: usize,
    pub memberships: usize,
}

/// Executa o backup completo: leitura, join, arquivo local e upload
pub async fn run_backup(
    config: &Config,
    directory: &dyn DirectoryService,
    store: &dyn ObjectStore,
) -> Result<BackupSummary, AppError> {
    let started = Utc::now();
    log::info!("💾 Starting backup of user pool {}", config.user_pool_id);

    // 1. Directory reader
    let groups = directory_service::get_groups(directory, &config.user_pool_id).await?;
    let users = directory_service::get_users(directory, &config.user_pool_id).await?;
    let users_in_group =
        directory_service::build_membership_index(directory, &config.user_pool_id, &groups)
            .await?;

    // 2. Membership join
    let users_with_groups = membership_service::join_users(&groups, users, &users_in_group);
    let memberships = users_with_groups
        .iter()
        .filter_map(|user| user.groups())
        .map(|groups| groups.len())
        .sum();

    // 3. Snapshot: local file first, then upload
    snapshot_service::write_backup_to_file(&config.local_path, &users_with_groups).await?;
    store
        .upload_file(&config.backup_bucket, &config.backup_key, &config.local_path)
        .await?;

    let summary = BackupSummary {
        groups: groups.len(),
        users: users_with_groups.len(),
        memberships,
    };

    log::info!(
        "📊 Backup summary: {} groups, {} users, {} memberships in {}ms",
        summary.groups,
        summary.users,
        summary.memberships,
        (Utc::now() - started).num_milliseconds()
    );

    Ok(summary)
}
