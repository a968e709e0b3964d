use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

use super::*;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Placement {
    #[strum(serialize = "1st")]
    #[serde(rename = "1st")]
    First,
    #[strum(serialize = "2nd")]
    #[serde(rename = "2nd")]
    Second,
    #[strum(serialize = "3rd")]
    #[serde(rename = "3rd")]
    Third,
    #[strum(serialize = "participation")]
    #[serde(rename = "participation")]
    Participation,
}

impl Placement {
    pub fn parse(label: &str) -> Result<Self> {
        Self::from_str(label.trim()).map_err(|_| Error::UnknownPlacement(label.to_string()))
    }

    /// Podium placements earn a badge tied to the challenge week.
    pub fn badge(&self, week: u32) -> Option<String> {
        match self {
            Placement::First => Some(format!("🥇 Winner W{week}")),
            Placement::Second => Some(format!("🥈 2nd Place W{week}")),
            Placement::Third => Some(format!("🥉 3rd Place W{week}")),
            Placement::Participation => None,
        }
    }

    pub const fn medal(&self) -> &'static str {
        match self {
            Placement::First => "🥇",
            Placement::Second => "🥈",
            Placement::Third => "🥉",
            Placement::Participation => "🎖️",
        }
    }
}

/// XP awarded per placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpTable {
    pub first: i64,
    pub second: i64,
    pub third: i64,
    pub participation: i64,
}

impl Default for XpTable {
    fn default() -> Self {
        Self {
            first: 10,
            second: 7,
            third: 5,
            participation: 2,
        }
    }
}

impl XpTable {
    pub const fn xp(&self, placement: Placement) -> i64 {
        match placement {
            Placement::First => self.first,
            Placement::Second => self.second,
            Placement::Third => self.third,
            Placement::Participation => self.participation,
        }
    }

    pub fn xp_for_label(&self, label: &str) -> Result<i64> {
        Placement::parse(label).map(|placement| self.xp(placement))
    }
}
