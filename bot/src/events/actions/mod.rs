mod reminder;
mod rollover;
mod submission;

use super::*;

pub use reminder::*;
pub use rollover::*;
pub use submission::*;

/// Things that happen without a command: messages in the submission channel
/// and the two calendar timers.
#[derive(Debug, Clone)]
pub enum Action {
    TrackSubmission(TrackSubmission),
    MonthlyRollover(MonthlyRollover),
    WeeklyReminder(WeeklyReminder),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::TrackSubmission(_) => write!(f, "TrackSubmission"),
            Action::MonthlyRollover(_) => write!(f, "MonthlyRollover"),
            Action::WeeklyReminder(_) => write!(f, "WeeklyReminder"),
        }
    }
}

impl Action {
    pub async fn execute(&self, context: Context) -> anyhow::Result<EventResult> {
        match self {
            Action::TrackSubmission(action) => action.execute(&context).await,
            Action::MonthlyRollover(action) => action.execute(&context).await,
            Action::WeeklyReminder(action) => action.execute(&context).await,
        }
    }
}
