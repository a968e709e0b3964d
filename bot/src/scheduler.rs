use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument};

use crate::events::{
    actions::{MonthlyRollover, WeeklyReminder},
    Action, Announcement, Context, EventResult,
};

/// Where timer announcements go. The chat adapter implements this; without
/// one they are only logged.
pub trait Announcer: Send + Sync {
    fn announce(&self, announcement: &Announcement);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnnouncer;

impl Announcer for TracingAnnouncer {
    fn announce(&self, announcement: &Announcement) {
        info!(channel = %announcement.channel, "{}", announcement.text);
    }
}

/// Decides which calendar actions are due at a tick.
#[derive(Debug, Default)]
pub struct Schedule {
    last_reminder: Option<String>,
}

impl Schedule {
    pub fn due_actions(&mut self, now: DateTime<Utc>) -> Vec<Action> {
        let mut actions = Vec::new();
        // Deduplicated by the store: an archived month is never rolled twice
        if MonthlyRollover::is_due(now) {
            actions.push(Action::MonthlyRollover(MonthlyRollover { now }));
        }

        if WeeklyReminder::is_due(now) {
            let week = WeeklyReminder::week_id(now);
            if self.last_reminder.as_deref() != Some(week.as_str()) {
                self.last_reminder = Some(week);
                actions.push(Action::WeeklyReminder(WeeklyReminder { now }));
            }
        }
        actions
    }
}

pub async fn run(context: Context, announcer: impl Announcer, tick: Duration) {
    tracing::warn!("Starting scheduler with a tick of {}s", tick.as_secs());

    let mut schedule = Schedule::default();
    let mut interval = tokio::time::interval(tick);
    loop {
        interval.tick().await;
        let actions = schedule.due_actions(Utc::now());
        if actions.is_empty() {
            debug!("Nothing due");
            continue;
        }

        for action in actions {
            execute(context.clone(), &announcer, action).await;
        }
    }
}

#[instrument(skip(context, announcer, action), fields(action = %action))]
async fn execute(context: Context, announcer: &impl Announcer, action: Action) {
    match action.execute(context).await {
        Ok(EventResult::Announced(announcement)) => announcer.announce(&announcement),
        Ok(result) => debug!("Action finished with {result:?}"),
        Err(e) => error!("Failed to execute {action}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;

    use crate::events::commands::tests::TestContext;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Announcement>>);

    impl Announcer for &Recorder {
        fn announce(&self, announcement: &Announcement) {
            self.0.lock().unwrap().push(announcement.clone());
        }
    }

    #[test]
    fn reminder_fires_once_per_week() {
        let mut schedule = Schedule::default();
        let at = |d, h, m| Utc.with_ymd_and_hms(2025, 4, d, h, m, 0).unwrap();

        assert!(schedule.due_actions(at(4, 19, 0)).is_empty());
        let actions = schedule.due_actions(at(4, 20, 0));
        assert!(matches!(actions[..], [Action::WeeklyReminder(_)]));
        assert!(schedule.due_actions(at(4, 20, 30)).is_empty());
        // The following Friday
        assert_eq!(schedule.due_actions(at(11, 20, 5)).len(), 1);
    }

    #[test]
    fn rollover_is_due_on_first_hour() {
        let mut schedule = Schedule::default();
        let first = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        let actions = schedule.due_actions(first);
        assert!(matches!(actions[..], [Action::MonthlyRollover(_)]));
    }

    #[tokio::test]
    async fn announcements_reach_announcer() {
        let ctx = TestContext::new();
        let recorder = Recorder::default();
        let now = Utc.with_ymd_and_hms(2025, 4, 4, 20, 0, 0).unwrap();

        execute(
            ctx.context.clone(),
            &&recorder,
            Action::WeeklyReminder(WeeklyReminder { now }),
        )
        .await;
        let announced = recorder.0.lock().unwrap();
        assert_eq!(announced.len(), 1);
        assert_eq!(announced[0].channel, "exercice");
    }
}
