use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use tracing::{info, instrument};

use crate::messages::MsgCategory;

use super::*;

/// Friday evening heads-up that a new challenge is coming.
#[derive(Debug, Clone)]
pub struct WeeklyReminder {
    pub now: DateTime<Utc>,
}

impl WeeklyReminder {
    pub fn is_due(now: DateTime<Utc>) -> bool {
        now.weekday() == Weekday::Fri && now.hour() == 20
    }

    /// Identifies the ISO week so the reminder is sent once per week.
    pub fn week_id(now: DateTime<Utc>) -> String {
        let week = now.iso_week();
        format!("{}-W{:02}", week.year(), week.week())
    }

    #[instrument(skip(self, context), fields(now = %self.now))]
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let week = self.now.iso_week().week();
        let text = context
            .messages
            .format(MsgCategory::WeeklyReminder, vec![("week", week.to_string())])?;
        info!("Sending weekly reminder for week {week}");

        Ok(EventResult::Announced(Announcement {
            channel: context.settings.exercise_channel.clone(),
            text,
            challenge: None,
        }))
    }
}
