//! In-memory doubles for the directory and object-store seams.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{Page, UserRecord};
use crate::services::{DirectoryService, ObjectStore};
use crate::utils::AppError;

/// Serves pre-built pages. The continuation token is the index of the next
/// page, prefixed by the listing it belongs to so tokens cannot cross over.
#[derive(Default)]
pub struct InMemoryDirectory {
    group_pages: Vec<Vec<String>>,
    user_pages: Vec<Vec<UserRecord>>,
    member_pages: HashMap<String, Vec<Vec<String>>>,
    fail: bool,
    list_users_calls: AtomicUsize,
    list_users_in_group_calls: AtomicUsize,
}

fn strings(page: Vec<&str>) -> Vec<String> {
    page.into_iter().map(str::to_string).collect()
}

fn serve<T: Clone>(pages: &[Vec<T>], scope: &str, token: Option<String>) -> Result<Page<T>, AppError> {
    let index = match token {
        None => 0,
        Some(token) => token
            .strip_prefix(scope)
            .and_then(|rest| rest.strip_prefix(':'))
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or_else(|| AppError::DirectoryError(format!("Invalid token {} for {}", token, scope)))?,
    };

    let items = pages.get(index).cloned().unwrap_or_default();
    let next_token = if index + 1 < pages.len() {
        Some(format!("{}:{}", scope, index + 1))
    } else {
        None
    };
    Ok(Page::new(items, next_token))
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_pages(mut self, pages: Vec<Vec<&str>>) -> Self {
        self.group_pages = pages.into_iter().map(strings).collect();
        self
    }

    pub fn with_user_pages(mut self, pages: Vec<Vec<&str>>) -> Self {
        self.user_pages = pages
            .into_iter()
            .map(|page| page.into_iter().map(UserRecord::with_username).collect())
            .collect();
        self
    }

    pub fn with_user_records(mut self, pages: Vec<Vec<UserRecord>>) -> Self {
        self.user_pages = pages;
        self
    }

    pub fn with_members(mut self, group: &str, pages: Vec<Vec<&str>>) -> Self {
        self.member_pages
            .insert(group.to_string(), pages.into_iter().map(strings).collect());
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn list_users_calls(&self) -> usize {
        self.list_users_calls.load(Ordering::SeqCst)
    }

    pub fn list_users_in_group_calls(&self) -> usize {
        self.list_users_in_group_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::DirectoryError("AccessDeniedException".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryService for InMemoryDirectory {
    async fn list_groups(
        &self,
        _pool_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>, AppError> {
        self.check()?;
        serve(&self.group_pages, "groups", next_token)
    }

    async fn list_users(
        &self,
        _pool_id: &str,
        pagination_token: Option<String>,
    ) -> Result<Page<UserRecord>, AppError> {
        self.list_users_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        serve(&self.user_pages, "users", pagination_token)
    }

    async fn list_users_in_group(
        &self,
        _pool_id: &str,
        group_name: &str,
        next_token: Option<String>,
    ) -> Result<Page<String>, AppError> {
        self.list_users_in_group_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let pages = self.member_pages.get(group_name).map(Vec::as_slice).unwrap_or(&[]);
        serve(pages, group_name, next_token)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub bucket: String,
    pub key: String,
    pub body: String,
}

/// Records uploads instead of sending them anywhere.
#[derive(Default)]
pub struct InMemoryStore {
    uploads: Mutex<Vec<Upload>>,
    fail: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::StorageError("NoSuchBucket".to_string()));
        }
        let body = tokio::fs::read_to_string(path).await?;
        self.uploads.lock().unwrap().push(Upload {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body,
        });
        Ok(())
    }
}
