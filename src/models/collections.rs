// Nomes das collections auditadas
pub const USERS: &str = "users";
pub const PROFILES: &str = "profiles";
pub const SUBSCRIPTIONS: &str = "subscriptions";
pub const USER_SETTINGS: &str = "user_settings";

/// Collections the application expects; missing ones are created lazily on first write.
pub const REQUIRED_COLLECTIONS: [&str; 4] = [USERS, PROFILES, SUBSCRIPTIONS, USER_SETTINGS];
