//! Steps 9 to 14: names unique among rows that are not soft-deleted.

use rusqlite::Transaction;

use crate::error::Result;
use crate::migrate::schema::{drop_index, recreate_live_name_index};

pub(super) fn unique_setting_names(tx: &Transaction<'_>) -> Result<()> {
    recreate_live_name_index(tx, "uix_settings_name", "settings")
}

pub(super) fn drop_setting_names(tx: &Transaction<'_>) -> Result<()> {
    drop_index(tx, "uix_settings_name")
}

pub(super) fn unique_ssh_key_names(tx: &Transaction<'_>) -> Result<()> {
    recreate_live_name_index(tx, "uix_keys_name", "ssh_keys")
}

pub(super) fn drop_ssh_key_names(tx: &Transaction<'_>) -> Result<()> {
    drop_index(tx, "uix_keys_name")
}

pub(super) fn unique_host_names(tx: &Transaction<'_>) -> Result<()> {
    recreate_live_name_index(tx, "uix_hosts_name", "hosts")
}

pub(super) fn drop_host_names(tx: &Transaction<'_>) -> Result<()> {
    drop_index(tx, "uix_hosts_name")
}

pub(super) fn unique_user_names(tx: &Transaction<'_>) -> Result<()> {
    recreate_live_name_index(tx, "uix_users_name", "users")
}

pub(super) fn drop_user_names(tx: &Transaction<'_>) -> Result<()> {
    drop_index(tx, "uix_users_name")
}

pub(super) fn unique_user_group_names(tx: &Transaction<'_>) -> Result<()> {
    recreate_live_name_index(tx, "uix_usergroups_name", "user_groups")
}

pub(super) fn drop_user_group_names(tx: &Transaction<'_>) -> Result<()> {
    drop_index(tx, "uix_usergroups_name")
}

pub(super) fn unique_host_group_names(tx: &Transaction<'_>) -> Result<()> {
    recreate_live_name_index(tx, "uix_hostgroups_name", "host_groups")
}

pub(super) fn drop_host_group_names(tx: &Transaction<'_>) -> Result<()> {
    drop_index(tx, "uix_hostgroups_name")
}
