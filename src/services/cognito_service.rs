use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::error::DisplayErrorContext;
use aws_sdk_cognitoidentityprovider::primitives::DateTime as SmithyDateTime;
use aws_sdk_cognitoidentityprovider::types::UserType;
use aws_sdk_cognitoidentityprovider::Client;
use chrono::{DateTime, Utc};

use crate::models::{AttributeValue, Page, UserRecord};
use crate::services::DirectoryService;
use crate::utils::AppError;

/// Cognito user pool listing via `ListGroups`, `ListUsers` and `ListUsersInGroup`.
pub struct CognitoDirectory {
    client: Client,
}

impl CognitoDirectory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Rounds to the nearest microsecond. Cognito sends epoch seconds as floats, so
/// `.123` arrives as `.122999906` and would otherwise render as `.122999`.
fn to_chrono(value: &SmithyDateTime) -> Option<DateTime<Utc>> {
    let micros = (i64::from(value.subsec_nanos()) + 500) / 1_000;
    let secs = value.secs() + micros / 1_000_000;
    let nanos = (micros % 1_000_000) * 1_000;
    DateTime::<Utc>::from_timestamp(secs, nanos as u32)
}

/// Converts a Cognito user into a record keyed the way the Cognito API names
/// its fields. Absent optional fields are left out.
pub fn user_record_from(user: &UserType) -> UserRecord {
    let mut record = match user.username() {
        Some(username) => UserRecord::with_username(username),
        None => UserRecord::new(),
    };

    let attributes = user
        .attributes()
        .iter()
        .map(|attribute| {
            AttributeValue::Map(vec![
                ("Name".to_string(), attribute.name().into()),
                ("Value".to_string(), attribute.value().into()),
            ])
        })
        .collect();
    record.insert("Attributes", AttributeValue::List(attributes));

    if let Some(created) = user.user_create_date().and_then(to_chrono) {
        record.insert("UserCreateDate", created);
    }
    if let Some(modified) = user.user_last_modified_date().and_then(to_chrono) {
        record.insert("UserLastModifiedDate", modified);
    }

    record.insert("Enabled", user.enabled());

    if let Some(status) = user.user_status() {
        record.insert("UserStatus", status.as_str());
    }

    if !user.mfa_options().is_empty() {
        let options = user
            .mfa_options()
            .iter()
            .map(|option| {
                let mut entries: Vec<(String, AttributeValue)> = Vec::new();
                if let Some(medium) = option.delivery_medium() {
                    entries.push(("DeliveryMedium".to_string(), medium.as_str().into()));
                }
                if let Some(name) = option.attribute_name() {
                    entries.push(("AttributeName".to_string(), name.into()));
                }
                AttributeValue::Map(entries)
            })
            .collect();
        record.insert("MFAOptions", AttributeValue::List(options));
    }

    record
}

#[async_trait]
impl DirectoryService for CognitoDirectory {
    async fn list_groups(
        &self,
        pool_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>, AppError> {
        let output = self
            .client
            .list_groups()
            .user_pool_id(pool_id)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                AppError::DirectoryError(format!("ListGroups failed: {}", DisplayErrorContext(&e)))
            })?;

        let groups: Vec<String> = output
            .groups()
            .iter()
            .filter_map(|group| group.group_name().map(str::to_string))
            .collect();

        log::debug!("   📄 ListGroups page: {} groups", groups.len());
        Ok(Page::new(groups, output.next_token().map(str::to_string)))
    }

    async fn list_users(
        &self,
        pool_id: &str,
        pagination_token: Option<String>,
    ) -> Result<Page<UserRecord>, AppError> {
        let output = self
            .client
            .list_users()
            .user_pool_id(pool_id)
            .set_pagination_token(pagination_token)
            .send()
            .await
            .map_err(|e| {
                AppError::DirectoryError(format!("ListUsers failed: {}", DisplayErrorContext(&e)))
            })?;

        let users: Vec<UserRecord> = output.users().iter().map(user_record_from).collect();

        log::debug!("   📄 ListUsers page: {} users", users.len());
        Ok(Page::new(users, output.pagination_token().map(str::to_string)))
    }

    async fn list_users_in_group(
        &self,
        pool_id: &str,
        group_name: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>, AppError> {
        let output = self
            .client
            .list_users_in_group()
            .user_pool_id(pool_id)
            .group_name(group_name)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                AppError::DirectoryError(format!(
                    "ListUsersInGroup {} failed: {}",
                    group_name,
                    DisplayErrorContext(&e)
                ))
            })?;

        let members: Vec<String> = output
            .users()
            .iter()
            .filter_map(|user| user.username().map(str::to_string))
            .collect();

        Ok(Page::new(members, output.next_token().map(str::to_string)))
    }
}
