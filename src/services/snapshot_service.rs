use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::Path;

use crate::models::{Snapshot, UserRecord};
use crate::utils::AppError;

/// Renders `{"Users": [...]}` with 4-space indentation.
pub fn render_snapshot(users: &[UserRecord]) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    Snapshot { users }.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Serializes first, so an unserializable record leaves any previous file untouched.
pub async fn write_backup_to_file(path: &Path, users: &[UserRecord]) -> Result<(), AppError> {
    let json = render_snapshot(users)?;

    tokio::fs::write(path, &json)
        .await
        .map_err(|e| AppError::IoError(format!("Failed to write {}: {}", path.display(), e)))?;

    log::info!("📝 Wrote {} users ({} bytes) to {}", users.len(), json.len(), path.display());
    Ok(())
}
