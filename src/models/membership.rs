use std::collections::{HashMap, HashSet};

/// Group name -> usernames listed in that group.
pub type MembershipIndex = HashMap<String, HashSet<String>>;
