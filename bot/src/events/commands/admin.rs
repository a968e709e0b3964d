use tracing::{info, instrument};

use crate::messages::MsgCategory;

use super::*;

/// Manual rollover. Unlike the monthly timer it runs even when the current
/// month was already archived, replacing that snapshot.
#[derive(Debug, Clone)]
pub struct ResetMonth;

impl ResetMonth {
    #[instrument(skip(self, context))]
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let month = context.lock().await.rollover_period()?;
        info!("Monthly leaderboard reset by command for {month}");
        context.reply(MsgCategory::MonthReset, vec![("month", month)], false)
    }
}
