//! The production migration history.
//!
//! Append new steps at the end. Never reorder, renumber or edit a step that
//! has shipped: databases in the field have already recorded it.

mod names;
mod roles;
mod sessions;
mod tables;

use super::{Migration, MigrationRegistry};

static STEPS: &[Migration] = &[
    Migration::new("1", tables::create_settings, tables::drop_settings),
    Migration::new("2", tables::create_ssh_keys, tables::drop_ssh_keys),
    Migration::new("3", tables::create_hosts, tables::drop_hosts),
    Migration::new("4", tables::create_user_keys, tables::drop_user_keys),
    Migration::new("5", tables::create_users, tables::drop_users),
    Migration::new("6", tables::create_user_groups, tables::drop_user_groups),
    Migration::new("7", tables::create_host_groups, tables::drop_host_groups),
    Migration::new("8", tables::create_acls, tables::drop_acls),
    Migration::new("9", names::unique_setting_names, names::drop_setting_names),
    Migration::new("10", names::unique_ssh_key_names, names::drop_ssh_key_names),
    Migration::new("11", names::unique_host_names, names::drop_host_names),
    Migration::new("12", names::unique_user_names, names::drop_user_names),
    Migration::new("13", names::unique_user_group_names, names::drop_user_group_names),
    Migration::new("14", names::unique_host_group_names, names::drop_host_group_names),
    Migration::new("15", roles::create_user_roles, roles::drop_user_roles),
    Migration::one_way("16", roles::users_with_roles),
    Migration::new("17", roles::create_admin_role, roles::remove_admin_role),
    Migration::one_way("18", roles::backfill_admin_role),
    Migration::one_way("19", roles::users_without_admin_flag),
    Migration::new("20", roles::create_listhosts_role, roles::remove_listhosts_role),
    Migration::new("21", sessions::create_sessions, sessions::drop_sessions),
];

/// The registry every server start applies.
pub fn registry() -> MigrationRegistry {
    MigrationRegistry {
        migrations: STEPS.to_vec(),
    }
}
