use shared::Challenge;
use tokio::sync::MutexGuard;

use crate::{messages::MsgCategory, store::Store};

use super::*;

impl Context {
    pub async fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().await
    }

    pub fn reply(
        &self,
        msg: MsgCategory,
        args: Vec<(&'static str, String)>,
        ephemeral: bool,
    ) -> anyhow::Result<EventResult> {
        let text = self.messages.format(msg, args)?;
        Ok(EventResult::reply(text, ephemeral))
    }

    // Errors are only shown to the caller and never touch the store
    pub fn reply_with_error(
        &self,
        msg: MsgCategory,
        args: Vec<(&'static str, String)>,
    ) -> anyhow::Result<EventResult> {
        let text = self.messages.format(msg, args)?;
        Ok(EventResult::RepliedWithError(Reply {
            text,
            ephemeral: true,
        }))
    }

    pub fn is_trainer(&self, caller: &Caller) -> bool {
        caller.is_trainer(&self.settings.allowed_roles)
    }
}

/// The challenge awards and listings refer to: the active one, else the latest.
pub(crate) fn current_or_latest(store: &Store) -> Option<Challenge> {
    store
        .get_active_challenge()
        .or_else(|| store.get_latest_challenge())
        .cloned()
}
