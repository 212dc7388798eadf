mod sqlite;

pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::migrate::{MigrationRegistry, MigrationReport, MigrationStatus};
use crate::types::*;

/// Tables whose rows can be soft-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    SshKey,
    User,
    UserGroup,
    HostGroup,
    Acl,
    UserRole,
    Session,
}

impl Entity {
    pub fn table(&self) -> &'static str {
        match self {
            Self::SshKey => "ssh_keys",
            Self::User => "users",
            Self::UserGroup => "user_groups",
            Self::HostGroup => "host_groups",
            Self::Acl => "acls",
            Self::UserRole => "user_roles",
            Self::Session => "sessions",
        }
    }
}

/// Store defines the database interface.
///
/// Lookups and counts only see rows that are not soft-deleted. Creates report
/// a name already taken by a live row as `Error::AlreadyExists`. Ids on models
/// passed to `create_*` are ignored; the new row id is returned.
pub trait Store: Send + Sync {
    // Migration operations
    fn migrate(&self, registry: &MigrationRegistry, now: DateTime<Utc>) -> Result<MigrationReport>;
    fn migrate_to(
        &self,
        registry: &MigrationRegistry,
        target: &str,
        now: DateTime<Utc>,
    ) -> Result<MigrationReport>;
    fn rollback_to(&self, registry: &MigrationRegistry, target: &str) -> Result<Vec<String>>;
    fn rollback_last(&self, registry: &MigrationRegistry) -> Result<Option<String>>;
    fn migration_status(&self, registry: &MigrationRegistry) -> Result<Vec<MigrationStatus>>;
    fn applied_migrations(&self) -> Result<Vec<MigrationRecord>>;

    // SSH key operations
    fn create_ssh_key(&self, key: &SshKey) -> Result<i64>;
    fn get_ssh_key_by_name(&self, name: &str) -> Result<Option<SshKey>>;
    fn count_ssh_keys(&self) -> Result<i64>;

    // Group operations
    fn create_host_group(&self, group: &HostGroup) -> Result<i64>;
    fn get_host_group_by_name(&self, name: &str) -> Result<Option<HostGroup>>;
    fn count_host_groups(&self) -> Result<i64>;
    fn create_user_group(&self, group: &UserGroup) -> Result<i64>;
    fn get_user_group_by_name(&self, name: &str) -> Result<Option<UserGroup>>;
    fn count_user_groups(&self) -> Result<i64>;

    // ACL operations (many-to-many with both group kinds)
    fn create_acl(&self, acl: &Acl, user_group_ids: &[i64], host_group_ids: &[i64]) -> Result<i64>;
    fn list_acls(&self) -> Result<Vec<Acl>>;
    fn count_acls(&self) -> Result<i64>;
    fn list_acl_user_groups(&self, acl_id: i64) -> Result<Vec<UserGroup>>;
    fn list_acl_host_groups(&self, acl_id: i64) -> Result<Vec<HostGroup>>;

    // User operations (many-to-many with groups and roles)
    fn create_user(&self, user: &User, group_ids: &[i64], role_ids: &[i64]) -> Result<i64>;
    fn get_user_by_name(&self, name: &str) -> Result<Option<User>>;
    fn count_users(&self) -> Result<i64>;
    fn list_user_groups(&self, user_id: i64) -> Result<Vec<UserGroup>>;
    fn list_user_roles(&self, user_id: i64) -> Result<Vec<UserRole>>;

    // Role operations
    fn create_user_role(&self, role: &UserRole) -> Result<i64>;
    fn get_user_role_by_name(&self, name: &str) -> Result<Option<UserRole>>;

    // Session operations
    fn create_session(&self, session: &Session) -> Result<i64>;
    fn get_session(&self, id: i64) -> Result<Option<Session>>;
    /// Moves every `active` session to `closed`. Returns how many moved.
    fn close_active_sessions(&self, err_msg: &str, at: DateTime<Utc>) -> Result<usize>;

    fn soft_delete(&self, entity: Entity, id: i64, at: DateTime<Utc>) -> Result<bool>;
}
