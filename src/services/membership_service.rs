use crate::models::{AttributeValue, MembershipIndex, UserRecord, GROUPS_FIELD};

/// Attaches `Groups` to a user: every group, in listing order, whose member
/// set contains the user's username.
pub fn add_groups_to_user(
    groups: &[String],
    mut user: UserRecord,
    users_in_group: &MembershipIndex,
) -> UserRecord {
    let user_groups: Vec<AttributeValue> = match user.username() {
        Some(username) => groups
            .iter()
            .filter(|group| {
                users_in_group
                    .get(group.as_str())
                    .map_or(false, |members| members.contains(username))
            })
            .map(|group| AttributeValue::from(group.as_str()))
            .collect(),
        None => Vec::new(),
    };

    user.insert(GROUPS_FIELD, AttributeValue::List(user_groups));
    user
}

pub fn join_users(
    groups: &[String],
    users: Vec<UserRecord>,
    users_in_group: &MembershipIndex,
) -> Vec<UserRecord> {
    users
        .into_iter()
        .map(|user| add_groups_to_user(groups, user, users_in_group))
        .collect()
}
