use chrono::{DateTime, Datelike, Timelike, Utc};
use tracing::{info, instrument, warn};

use shared::TimePeriod;

use crate::messages::MsgCategory;

use super::*;

/// Archives the leaderboard during the first hour of a month.
#[derive(Debug, Clone)]
pub struct MonthlyRollover {
    pub now: DateTime<Utc>,
}

impl MonthlyRollover {
    pub fn is_due(now: DateTime<Utc>) -> bool {
        now.day() == 1 && now.hour() == 0
    }

    /// The snapshot is filed under the month that is just starting.
    pub fn month(&self) -> String {
        TimePeriod::Month.time_string(self.now)
    }

    #[instrument(skip(self, context), fields(now = %self.now))]
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let month = self.month();
        let mut store = context.lock().await;
        // A restart inside the rollover hour must not archive the zeroed table
        if store.get_hall_of_fame().contains_key(&month) {
            warn!("{month} is already archived. Skipping");
            return Ok(EventResult::Skipped);
        }

        store.rollover_period_as(month.clone())?;
        drop(store);
        info!("Monthly reset completed for {month}");

        let text = context
            .messages
            .format(MsgCategory::MonthlyRollover, vec![("month", month)])?;
        Ok(EventResult::Announced(Announcement {
            channel: context.settings.exercise_channel.clone(),
            text,
            challenge: None,
        }))
    }
}
