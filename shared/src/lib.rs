use std::{cmp::Reverse, collections::BTreeMap};

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

mod challenge;
mod error;
mod scoring;
mod timeperiod;

pub use challenge::*;
pub use error::*;
pub use scoring::*;
pub use timeperiod::*;

/// Stable chat-platform identifier of a community member.
pub type MemberId = u64;

/// Members in first-seen order. The order is persisted and breaks rank ties.
pub type MemberTable = IndexMap<MemberId, Member>;

/// Monthly snapshots of the member table, keyed by `YYYY-MM`.
pub type Archive = BTreeMap<MonthKey, MemberTable>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Member {
    #[serde(alias = "username")]
    pub display_name: String,
    #[serde(alias = "xp")]
    pub current_xp: i64,
    #[serde(default)]
    pub weekly_xp: BTreeMap<WeekKey, i64>,
    #[serde(alias = "total_xp")]
    pub lifetime_xp: i64,
    #[serde(default)]
    pub badges: IndexSet<String>,
}

impl Member {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Default::default()
        }
    }

    /// The amount is applied as given, negative values included. Counters
    /// saturate at the bounds of `i64`.
    pub fn add_xp(&mut self, amount: i64, week: &str) {
        self.current_xp = self.current_xp.saturating_add(amount);
        self.lifetime_xp = self.lifetime_xp.saturating_add(amount);
        let bucket = self.weekly_xp.entry(week.to_string()).or_default();
        *bucket = bucket.saturating_add(amount);
    }

    /// Corrects the visible monthly score only. Lifetime XP and the weekly
    /// buckets keep recording what was awarded, so a removal is never
    /// mirrored there.
    pub fn remove_xp(&mut self, amount: i64) {
        self.current_xp = self.current_xp.saturating_sub(amount).max(0);
    }

    pub fn add_badge(&mut self, label: impl Into<String>) -> bool {
        self.badges.insert(label.into())
    }

    pub fn week_xp(&self, week: &str) -> i64 {
        self.weekly_xp.get(week).copied().unwrap_or_default()
    }
}

/// Members ordered by current XP, highest first. Equal scores keep the
/// table's first-seen order.
pub fn standings(table: &MemberTable) -> Vec<(MemberId, &Member)> {
    table
        .iter()
        .map(|(id, member)| (*id, member))
        .sorted_by_key(|(_, member)| Reverse(member.current_xp))
        .collect()
}

/// 1-based rank in [`standings`], 0 when the member is absent.
pub fn rank(table: &MemberTable, id: MemberId) -> usize {
    standings(table)
        .iter()
        .position(|(member_id, _)| *member_id == id)
        .map(|index| index + 1)
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HallOfFameEntry {
    pub member_id: MemberId,
    pub display_name: String,
    pub total_xp: i64,
}

/// Sums every member's archived monthly XP. The most recent month's display
/// name wins. Ties keep the order in which members first appear.
pub fn hall_of_fame_totals(archive: &Archive) -> Vec<HallOfFameEntry> {
    let mut totals: IndexMap<MemberId, HallOfFameEntry> = IndexMap::new();
    for table in archive.values() {
        for (id, member) in table {
            let entry = totals.entry(*id).or_insert_with(|| HallOfFameEntry {
                member_id: *id,
                display_name: String::new(),
                total_xp: 0,
            });
            entry.display_name.clone_from(&member.display_name);
            entry.total_xp += member.current_xp;
        }
    }

    totals
        .into_values()
        .sorted_by_key(|entry| Reverse(entry.total_xp))
        .collect()
}
