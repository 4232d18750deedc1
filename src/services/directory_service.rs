use async_trait::async_trait;
use std::collections::HashSet;
use std::future::Future;

use crate::models::{MembershipIndex, Page, UserRecord};
use crate::utils::AppError;

/// Read-only list operations of a user directory.
///
/// Every call returns one page plus the token for the next one; `None` asks
/// for the first page.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn list_groups(
        &self,
        pool_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>, AppError>;

    async fn list_users(
        &self,
        pool_id: &str,
        pagination_token: Option<String>,
    ) -> Result<Page<UserRecord>, AppError>;

    /// Usernames of the members of `group_name`.
    async fn list_users_in_group(
        &self,
        pool_id: &str,
        group_name: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>, AppError>;
}

/// Follows continuation tokens until the service stops returning one,
/// concatenating pages in the order received. An empty token ends the listing.
pub async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0;

    loop {
        let page = fetch(next_token.take()).await?;
        pages += 1;
        items.extend(page.items);

        match page.next_token {
            Some(token) if !token.is_empty() => next_token = Some(token),
            _ => break,
        }
    }

    log::debug!("   📄 Collected {} items across {} pages", items.len(), pages);
    Ok(items)
}

/// Busca todos os grupos do user pool
pub async fn get_groups(
    directory: &dyn DirectoryService,
    pool_id: &str,
) -> Result<Vec<String>, AppError> {
    log::info!("👥 Fetching groups for user pool {}", pool_id);

    let groups = collect_pages(move |token| directory.list_groups(pool_id, token)).await?;

    log::info!("✅ Found {} groups", groups.len());
    Ok(groups)
}

/// Busca todos os usuários do user pool
pub async fn get_users(
    directory: &dyn DirectoryService,
    pool_id: &str,
) -> Result<Vec<UserRecord>, AppError> {
    log::info!("👤 Fetching users for user pool {}", pool_id);

    let users = collect_pages(move |token| directory.list_users(pool_id, token)).await?;

    log::info!("✅ Found {} users", users.len());
    Ok(users)
}

/// Paginates the group's own member listing with the group-scoped token.
pub async fn get_users_in_group(
    directory: &dyn DirectoryService,
    pool_id: &str,
    group_name: &str,
) -> Result<HashSet<String>, AppError> {
    let members = collect_pages(move |token| {
        directory.list_users_in_group(pool_id, group_name, token)
    })
    .await?;

    log::debug!("   👥 Group {}: {} members", group_name, members.len());
    Ok(members.into_iter().collect())
}

/// Lists the members of every group once, so the join never goes back to the
/// directory.
pub async fn build_membership_index(
    directory: &dyn DirectoryService,
    pool_id: &str,
    groups: &[String],
) -> Result<MembershipIndex, AppError> {
    log::info!("🔗 Building membership index for {} groups", groups.len());

    let mut index = MembershipIndex::new();
    for group in groups {
        let members = get_users_in_group(directory, pool_id, group).await?;
        index.insert(group.clone(), members);
    }

    Ok(index)
}
