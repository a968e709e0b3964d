use chrono::{DateTime, Datelike, Utc};

use super::*;

pub use strum::IntoEnumIterator;

/// `YYYY-MM`, key of a monthly archive snapshot.
pub type MonthKey = String;
/// `week_N`, key of a per-week XP bucket.
pub type WeekKey = String;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TimePeriod {
    Week,
    Month,
}

impl TimePeriod {
    pub fn time_string(&self, timestamp: DateTime<Utc>) -> String {
        match self {
            TimePeriod::Week => week_string(timestamp.iso_week().week()),
            TimePeriod::Month => format!("{:04}-{:02}", timestamp.year(), timestamp.month()),
        }
    }

    pub fn current(&self) -> String {
        self.time_string(Utc::now())
    }
}

pub fn week_string(week: u32) -> WeekKey {
    format!("week_{week}")
}

pub fn current_iso_week() -> u32 {
    Utc::now().iso_week().week()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn month_and_week_strings() {
        let date = Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(TimePeriod::Month.time_string(date), "2025-03");
        assert_eq!(TimePeriod::Week.time_string(date), "week_10");

        // ISO week of early January can belong to the previous year
        let date = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(TimePeriod::Week.time_string(date), "week_53");
    }
}
