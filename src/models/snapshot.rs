use serde::Serialize;

use super::UserRecord;

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    #[serde(rename = "Users")]
    pub users: &'a [UserRecord],
}
