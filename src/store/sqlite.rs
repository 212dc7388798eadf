use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{Entity, Store};
use crate::error::{Error, Result};
use crate::migrate::{self, MigrationRegistry, MigrationReport, MigrationStatus};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }

    fn count(&self, table: &str) -> Result<i64> {
        let conn = self.conn();
        let count = conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE deleted_at IS NULL"),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Reads a nullable timestamp column; rows written outside this store may
/// leave it empty.
fn get_datetime(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    Ok(row
        .get::<_, Option<String>>(idx)?
        .map(|s| parse_datetime(&s))
        .unwrap_or_default())
}

fn conflict(e: rusqlite::Error, what: impl FnOnce() -> String) -> Error {
    match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::AlreadyExists(what())
        }
        e => Error::from(e),
    }
}

const SSH_KEY_COLUMNS: &str =
    "id, name, type, length, fingerprint, priv_key, pub_key, comment, created_at, updated_at";

fn ssh_key_from_row(row: &Row<'_>) -> rusqlite::Result<SshKey> {
    Ok(SshKey {
        id: row.get(0)?,
        name: row.get(1)?,
        key_type: row.get(2)?,
        length: row.get(3)?,
        fingerprint: row.get(4)?,
        priv_key: row.get(5)?,
        pub_key: row.get(6)?,
        comment: row.get(7)?,
        created_at: get_datetime(row, 8)?,
        updated_at: get_datetime(row, 9)?,
    })
}

const GROUP_COLUMNS: &str = "id, name, comment, created_at, updated_at";

fn user_group_from_row(row: &Row<'_>) -> rusqlite::Result<UserGroup> {
    Ok(UserGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        comment: row.get(2)?,
        created_at: get_datetime(row, 3)?,
        updated_at: get_datetime(row, 4)?,
    })
}

fn host_group_from_row(row: &Row<'_>) -> rusqlite::Result<HostGroup> {
    Ok(HostGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        comment: row.get(2)?,
        created_at: get_datetime(row, 3)?,
        updated_at: get_datetime(row, 4)?,
    })
}

const ACL_COLUMNS: &str = "id, host_pattern, action, weight, comment, created_at, updated_at";

fn acl_from_row(row: &Row<'_>) -> rusqlite::Result<Acl> {
    let action: String = row.get(2)?;
    Ok(Acl {
        id: row.get(0)?,
        host_pattern: row.get(1)?,
        action: AclAction::from_str(&action).unwrap_or_else(|| {
            tracing::error!("Invalid ACL action in database: '{}'", action);
            AclAction::Deny
        }),
        weight: row.get(3)?,
        comment: row.get(4)?,
        created_at: get_datetime(row, 5)?,
        updated_at: get_datetime(row, 6)?,
    })
}

const USER_COLUMNS: &str =
    "id, name, email, comment, is_admin, invite_token, created_at, updated_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        comment: row.get(3)?,
        is_admin: row.get(4)?,
        invite_token: row.get(5)?,
        created_at: get_datetime(row, 6)?,
        updated_at: get_datetime(row, 7)?,
    })
}

const ROLE_COLUMNS: &str = "id, name, created_at, updated_at";

fn role_from_row(row: &Row<'_>) -> rusqlite::Result<UserRole> {
    Ok(UserRole {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: get_datetime(row, 2)?,
        updated_at: get_datetime(row, 3)?,
    })
}

const SESSION_COLUMNS: &str =
    "id, status, user_id, host_id, err_msg, comment, created_at, updated_at, stopped_at";

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    let status: String = row.get(1)?;
    Ok(Session {
        id: row.get(0)?,
        status: SessionStatus::from_str(&status).unwrap_or(SessionStatus::Unknown),
        user_id: row.get(2)?,
        host_id: row.get(3)?,
        err_msg: row.get(4)?,
        comment: row.get(5)?,
        created_at: get_datetime(row, 6)?,
        updated_at: get_datetime(row, 7)?,
        stopped_at: row.get::<_, Option<String>>(8)?.map(|s| parse_datetime(&s)),
    })
}

impl Store for SqliteStore {
    // Migration operations

    fn migrate(&self, registry: &MigrationRegistry, now: DateTime<Utc>) -> Result<MigrationReport> {
        migrate::apply(&mut self.conn(), registry, now)
    }

    fn migrate_to(
        &self,
        registry: &MigrationRegistry,
        target: &str,
        now: DateTime<Utc>,
    ) -> Result<MigrationReport> {
        migrate::apply_to(&mut self.conn(), registry, target, now)
    }

    fn rollback_to(&self, registry: &MigrationRegistry, target: &str) -> Result<Vec<String>> {
        migrate::rollback_to(&mut self.conn(), registry, target)
    }

    fn rollback_last(&self, registry: &MigrationRegistry) -> Result<Option<String>> {
        migrate::rollback_last(&mut self.conn(), registry)
    }

    fn migration_status(&self, registry: &MigrationRegistry) -> Result<Vec<MigrationStatus>> {
        migrate::status(&self.conn(), registry)
    }

    fn applied_migrations(&self) -> Result<Vec<MigrationRecord>> {
        migrate::applied_records(&self.conn())
    }

    // SSH key operations

    fn create_ssh_key(&self, key: &SshKey) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO ssh_keys (name, type, length, fingerprint, priv_key, pub_key, comment, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                key.name,
                key.key_type,
                key.length,
                key.fingerprint,
                key.priv_key,
                key.pub_key,
                key.comment,
                format_datetime(&key.created_at),
                format_datetime(&key.updated_at),
            ],
        )
        .map_err(|e| conflict(e, || format!("ssh key '{}'", key.name)))?;
        Ok(conn.last_insert_rowid())
    }

    fn get_ssh_key_by_name(&self, name: &str) -> Result<Option<SshKey>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {SSH_KEY_COLUMNS} FROM ssh_keys WHERE name = ?1 AND deleted_at IS NULL"),
            params![name],
            ssh_key_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn count_ssh_keys(&self) -> Result<i64> {
        self.count("ssh_keys")
    }

    // Group operations

    fn create_host_group(&self, group: &HostGroup) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO host_groups (name, comment, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                group.name,
                group.comment,
                format_datetime(&group.created_at),
                format_datetime(&group.updated_at),
            ],
        )
        .map_err(|e| conflict(e, || format!("host group '{}'", group.name)))?;
        Ok(conn.last_insert_rowid())
    }

    fn get_host_group_by_name(&self, name: &str) -> Result<Option<HostGroup>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {GROUP_COLUMNS} FROM host_groups WHERE name = ?1 AND deleted_at IS NULL"),
            params![name],
            host_group_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn count_host_groups(&self) -> Result<i64> {
        self.count("host_groups")
    }

    fn create_user_group(&self, group: &UserGroup) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO user_groups (name, comment, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                group.name,
                group.comment,
                format_datetime(&group.created_at),
                format_datetime(&group.updated_at),
            ],
        )
        .map_err(|e| conflict(e, || format!("user group '{}'", group.name)))?;
        Ok(conn.last_insert_rowid())
    }

    fn get_user_group_by_name(&self, name: &str) -> Result<Option<UserGroup>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {GROUP_COLUMNS} FROM user_groups WHERE name = ?1 AND deleted_at IS NULL"),
            params![name],
            user_group_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn count_user_groups(&self) -> Result<i64> {
        self.count("user_groups")
    }

    // ACL operations

    fn create_acl(&self, acl: &Acl, user_group_ids: &[i64], host_group_ids: &[i64]) -> Result<i64> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO acls (host_pattern, action, weight, comment, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                acl.host_pattern,
                acl.action.as_str(),
                acl.weight,
                acl.comment,
                format_datetime(&acl.created_at),
                format_datetime(&acl.updated_at),
            ],
        )?;
        let acl_id = tx.last_insert_rowid();

        for group_id in user_group_ids {
            tx.execute(
                "INSERT INTO user_group_acls (user_group_id, acl_id) VALUES (?1, ?2)",
                params![group_id, acl_id],
            )?;
        }
        for group_id in host_group_ids {
            tx.execute(
                "INSERT INTO host_group_acls (host_group_id, acl_id) VALUES (?1, ?2)",
                params![group_id, acl_id],
            )?;
        }

        tx.commit()?;
        Ok(acl_id)
    }

    fn list_acls(&self) -> Result<Vec<Acl>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ACL_COLUMNS} FROM acls WHERE deleted_at IS NULL ORDER BY weight DESC, id"
        ))?;

        let rows = stmt.query_map([], acl_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn count_acls(&self) -> Result<i64> {
        self.count("acls")
    }

    fn list_acl_user_groups(&self, acl_id: i64) -> Result<Vec<UserGroup>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT g.id, g.name, g.comment, g.created_at, g.updated_at
             FROM user_groups g
             INNER JOIN user_group_acls ga ON g.id = ga.user_group_id
             WHERE ga.acl_id = ?1 AND g.deleted_at IS NULL
             ORDER BY g.name",
        )?;

        let rows = stmt.query_map(params![acl_id], user_group_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_acl_host_groups(&self, acl_id: i64) -> Result<Vec<HostGroup>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT g.id, g.name, g.comment, g.created_at, g.updated_at
             FROM host_groups g
             INNER JOIN host_group_acls ga ON g.id = ga.host_group_id
             WHERE ga.acl_id = ?1 AND g.deleted_at IS NULL
             ORDER BY g.name",
        )?;

        let rows = stmt.query_map(params![acl_id], host_group_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // User operations

    fn create_user(&self, user: &User, group_ids: &[i64], role_ids: &[i64]) -> Result<i64> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO users (name, email, comment, is_admin, invite_token, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.name,
                user.email,
                user.comment,
                user.is_admin,
                user.invite_token,
                format_datetime(&user.created_at),
                format_datetime(&user.updated_at),
            ],
        )
        .map_err(|e| conflict(e, || format!("user '{}'", user.name)))?;
        let user_id = tx.last_insert_rowid();

        for group_id in group_ids {
            tx.execute(
                "INSERT INTO user_user_groups (user_id, user_group_id) VALUES (?1, ?2)",
                params![user_id, group_id],
            )?;
        }
        for role_id in role_ids {
            tx.execute(
                "INSERT INTO user_user_roles (user_id, user_role_id) VALUES (?1, ?2)",
                params![user_id, role_id],
            )?;
        }

        tx.commit()?;
        Ok(user_id)
    }

    fn get_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE name = ?1 AND deleted_at IS NULL"),
            params![name],
            user_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn count_users(&self) -> Result<i64> {
        self.count("users")
    }

    fn list_user_groups(&self, user_id: i64) -> Result<Vec<UserGroup>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT g.id, g.name, g.comment, g.created_at, g.updated_at
             FROM user_groups g
             INNER JOIN user_user_groups ug ON g.id = ug.user_group_id
             WHERE ug.user_id = ?1 AND g.deleted_at IS NULL
             ORDER BY g.name",
        )?;

        let rows = stmt.query_map(params![user_id], user_group_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_user_roles(&self, user_id: i64) -> Result<Vec<UserRole>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT r.id, r.name, r.created_at, r.updated_at
             FROM user_roles r
             INNER JOIN user_user_roles ur ON r.id = ur.user_role_id
             WHERE ur.user_id = ?1 AND r.deleted_at IS NULL
             ORDER BY r.name",
        )?;

        let rows = stmt.query_map(params![user_id], role_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Role operations

    fn create_user_role(&self, role: &UserRole) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO user_roles (name, created_at, updated_at) VALUES (?1, ?2, ?3)",
            params![
                role.name,
                format_datetime(&role.created_at),
                format_datetime(&role.updated_at),
            ],
        )
        .map_err(|e| conflict(e, || format!("user role '{}'", role.name)))?;
        Ok(conn.last_insert_rowid())
    }

    fn get_user_role_by_name(&self, name: &str) -> Result<Option<UserRole>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {ROLE_COLUMNS} FROM user_roles WHERE name = ?1 AND deleted_at IS NULL"),
            params![name],
            role_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    // Session operations

    fn create_session(&self, session: &Session) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO sessions (status, user_id, host_id, err_msg, comment, created_at, updated_at, stopped_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                session.status.as_str(),
                session.user_id,
                session.host_id,
                session.err_msg,
                session.comment,
                format_datetime(&session.created_at),
                format_datetime(&session.updated_at),
                session.stopped_at.as_ref().map(format_datetime),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn get_session(&self, id: i64) -> Result<Option<Session>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"),
            params![id],
            session_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn close_active_sessions(&self, err_msg: &str, at: DateTime<Utc>) -> Result<usize> {
        let rows = self.conn().execute(
            "UPDATE sessions SET status = ?1, err_msg = ?2, stopped_at = ?3, updated_at = ?3
             WHERE status = ?4",
            params![
                SessionStatus::Closed.as_str(),
                err_msg,
                format_datetime(&at),
                SessionStatus::Active.as_str(),
            ],
        )?;
        Ok(rows)
    }

    fn soft_delete(&self, entity: Entity, id: i64, at: DateTime<Utc>) -> Result<bool> {
        let rows = self.conn().execute(
            &format!(
                "UPDATE {} SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
                entity.table()
            ),
            params![format_datetime(&at), id],
        )?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn migrated_store(temp: &TempDir) -> SqliteStore {
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.migrate(&migrate::registry(), Utc::now()).unwrap();
        store
    }

    fn user_group(name: &str) -> UserGroup {
        UserGroup {
            id: 0,
            name: name.to_string(),
            comment: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn user(name: &str) -> User {
        User {
            id: 0,
            name: name.to_string(),
            email: format!("{name}@example.com"),
            comment: String::new(),
            is_admin: false,
            invite_token: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn session(status: SessionStatus) -> Session {
        Session {
            id: 0,
            status,
            user_id: None,
            host_id: None,
            err_msg: String::new(),
            comment: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            stopped_at: None,
        }
    }

    #[test]
    fn test_migrate_creates_tables() {
        let temp = TempDir::new().unwrap();
        let store = migrated_store(&temp);

        let conn = store.conn();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        for table in [
            "settings",
            "ssh_keys",
            "hosts",
            "host_host_groups",
            "user_keys",
            "users",
            "user_user_groups",
            "user_groups",
            "user_group_acls",
            "host_groups",
            "host_group_acls",
            "acls",
            "user_roles",
            "user_user_roles",
            "sessions",
            "migrations",
        ] {
            assert!(tables.contains(&table.to_string()), "missing table {table}");
        }
    }

    #[test]
    fn test_duplicate_live_name_rejected() {
        let temp = TempDir::new().unwrap();
        let store = migrated_store(&temp);

        store.create_user_group(&user_group("ops")).unwrap();
        let result = store.create_user_group(&user_group("ops"));
        assert!(matches!(result, Err(Error::AlreadyExists(_))));
        assert_eq!(store.count_user_groups().unwrap(), 1);
    }

    #[test]
    fn test_name_reusable_after_soft_delete() {
        let temp = TempDir::new().unwrap();
        let store = migrated_store(&temp);

        let first = store.create_user_group(&user_group("ops")).unwrap();
        assert!(store.soft_delete(Entity::UserGroup, first, Utc::now()).unwrap());
        assert!(store.get_user_group_by_name("ops").unwrap().is_none());

        let second = store.create_user_group(&user_group("ops")).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.get_user_group_by_name("ops").unwrap().unwrap().id, second);

        assert!(!store.soft_delete(Entity::UserGroup, first, Utc::now()).unwrap());
    }

    #[test]
    fn test_user_memberships() {
        let temp = TempDir::new().unwrap();
        let store = migrated_store(&temp);

        let group = store.create_user_group(&user_group("ops")).unwrap();
        let admin = store.get_user_role_by_name("admin").unwrap().unwrap();
        let id = store.create_user(&user("alice"), &[group], &[admin.id]).unwrap();

        let groups = store.list_user_groups(id).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "ops");

        let roles = store.list_user_roles(id).unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "admin");
    }

    #[test]
    fn test_failed_user_create_leaves_no_rows() {
        let temp = TempDir::new().unwrap();
        let store = migrated_store(&temp);

        store.create_user(&user("alice"), &[], &[]).unwrap();
        let result = store.create_user(&user("alice"), &[1], &[1]);
        assert!(matches!(result, Err(Error::AlreadyExists(_))));
        assert_eq!(store.count_users().unwrap(), 1);

        let memberships: i64 = store
            .conn()
            .query_row("SELECT COUNT(*) FROM user_user_groups", [], |row| row.get(0))
            .unwrap();
        assert_eq!(memberships, 0);
    }

    #[test]
    fn test_close_active_sessions_only_touches_active() {
        let temp = TempDir::new().unwrap();
        let store = migrated_store(&temp);

        let active = store.create_session(&session(SessionStatus::Active)).unwrap();
        let mut closed = session(SessionStatus::Closed);
        closed.err_msg = "eof".to_string();
        let closed = store.create_session(&closed).unwrap();

        let count = store.close_active_sessions("halted", Utc::now()).unwrap();
        assert_eq!(count, 1);

        let active = store.get_session(active).unwrap().unwrap();
        assert_eq!(active.status, SessionStatus::Closed);
        assert_eq!(active.err_msg, "halted");
        assert!(active.stopped_at.is_some());

        let closed = store.get_session(closed).unwrap().unwrap();
        assert_eq!(closed.err_msg, "eof");
        assert!(closed.stopped_at.is_none());
    }

    #[test]
    fn test_ssh_key_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = migrated_store(&temp);

        let key = SshKey {
            id: 0,
            name: "deploy".to_string(),
            key_type: "rsa".to_string(),
            length: 2048,
            fingerprint: "SHA256:abc".to_string(),
            priv_key: "private".to_string(),
            pub_key: "ssh-rsa AAAA".to_string(),
            comment: "test".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = store.create_ssh_key(&key).unwrap();

        let fetched = store.get_ssh_key_by_name("deploy").unwrap().unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.length, 2048);
        assert_eq!(fetched.priv_key, "private");

        let result = store.create_ssh_key(&key);
        assert!(matches!(result, Err(Error::AlreadyExists(_))));
    }
}
