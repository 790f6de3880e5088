use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{
    ActivityRecord, AdminView, CredentialRecord, MergedUserRow, SortDirection, SortKey, SortSpec,
    NO_LOGIN_SENTINEL,
};

/// Builds the admin user table: credentials joined with their activity,
/// sorted by `sort`, then narrowed by `search`.
///
/// `search` is matched case-insensitively as a substring of the username and
/// is not trimmed, so a search made of spaces still filters.
pub fn build_view(
    credentials: &[CredentialRecord],
    activity: &[ActivityRecord],
    sort: SortSpec,
    search: &str,
) -> AdminView {
    let mut rows = merge_activity(credentials, activity);
    let total = rows.len();
    let all_stats_zero = !rows.is_empty() && rows.iter().all(MergedUserRow::has_no_activity);

    sort_rows(&mut rows, sort);
    let rows = filter_rows(rows, search);

    AdminView {
        rows,
        total,
        all_stats_zero,
    }
}

/// One row per credential; usernames are joined by exact string equality.
pub fn merge_activity(
    credentials: &[CredentialRecord],
    activity: &[ActivityRecord],
) -> Vec<MergedUserRow> {
    let stats: HashMap<&str, &ActivityRecord> = activity
        .iter()
        .map(|record| (record.username.as_str(), record))
        .collect();

    credentials
        .iter()
        .map(|credential| {
            let (query_count, last_login) = match stats.get(credential.username.as_str()) {
                Some(record) => (record.query_count, record.last_login.clone()),
                None => (0, NO_LOGIN_SENTINEL.to_string()),
            };

            MergedUserRow {
                username: credential.username.clone(),
                password: credential.password.clone(),
                query_count,
                last_login,
            }
        })
        .collect()
}

fn compare(a: &MergedUserRow, b: &MergedUserRow, key: SortKey) -> Ordering {
    match key {
        SortKey::Username => a.username.cmp(&b.username),
        SortKey::QueryCount => a.query_count.cmp(&b.query_count),
        SortKey::LastLogin => a.last_login.cmp(&b.last_login),
    }
}

pub fn sort_rows(rows: &mut [MergedUserRow], sort: SortSpec) {
    // sort_by is stable: ties keep their relative order in both directions
    rows.sort_by(|a, b| {
        let ordering = compare(a, b, sort.key);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

pub fn filter_rows(rows: Vec<MergedUserRow>, search: &str) -> Vec<MergedUserRow> {
    if search.is_empty() {
        return rows;
    }

    let needle = search.to_lowercase();
    rows.into_iter()
        .filter(|row| row.username.to_lowercase().contains(&needle))
        .collect()
}
