use chrono::{DateTime, Utc};
use tracing::{debug, instrument, trace};

use shared::{MessageRef, Submission};

use super::*;

/// A message posted somewhere the bot can see.
#[derive(Debug, Clone)]
pub struct TrackSubmission {
    pub author: Participant,
    pub author_is_bot: bool,
    pub channel_name: String,
    pub message: MessageRef,
    pub sent_at: DateTime<Utc>,
}

impl TrackSubmission {
    #[instrument(skip(self, context), fields(author = self.author.id, channel = %self.channel_name))]
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        if self.author_is_bot || self.channel_name != context.settings.submission_channel {
            trace!("Not a submission. Skipping");
            return Ok(EventResult::Skipped);
        }

        let mut store = context.lock().await;
        let Some(challenge) = store.get_active_challenge().map(|challenge| challenge.id) else {
            debug!("Submission from {} without an active challenge", self.author.name);
            return Ok(EventResult::Skipped);
        };

        store.add_submission(
            challenge,
            Submission::new(self.author.id, self.message, self.sent_at),
        )?;
        debug!("{} submitted to challenge #{challenge}", self.author.name);
        Ok(EventResult::Acknowledged)
    }
}

#[cfg(test)]
mod tests {
    use crate::{events::commands::tests::TestContext, tests::new_challenge};

    use super::*;

    fn message(channel: &str, is_bot: bool) -> Action {
        Action::TrackSubmission(TrackSubmission {
            author: Participant::new(8, "frank"),
            author_is_bot: is_bot,
            channel_name: channel.to_string(),
            message: MessageRef {
                channel_id: 77,
                message_id: 88,
            },
            sent_at: Utc::now(),
        })
    }

    async fn run(ctx: &TestContext, action: Action) -> EventResult {
        action.execute(ctx.context.clone()).await.unwrap()
    }

    #[tokio::test]
    async fn submission_needs_active_challenge() {
        let ctx = TestContext::new();
        assert_eq!(
            run(&ctx, message("code-wars-submissions", false)).await,
            EventResult::Skipped
        );

        ctx.context
            .lock()
            .await
            .create_challenge(new_challenge("a"))
            .unwrap();
        assert_eq!(
            run(&ctx, message("code-wars-submissions", false)).await,
            EventResult::Acknowledged
        );

        let store = ctx.context.lock().await;
        let submissions = &store.get_challenge(1).unwrap().submissions;
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].user_id, 8);
        assert_eq!(submissions[0].message_id, 88);
        assert_eq!(submissions[0].channel_id, 77);
    }

    #[tokio::test]
    async fn other_channels_and_bots_are_ignored() {
        let ctx = TestContext::new();
        ctx.context
            .lock()
            .await
            .create_challenge(new_challenge("a"))
            .unwrap();

        assert_eq!(run(&ctx, message("general", false)).await, EventResult::Skipped);
        assert_eq!(
            run(&ctx, message("code-wars-submissions", true)).await,
            EventResult::Skipped
        );
        assert!(ctx
            .context
            .lock()
            .await
            .get_challenge(1)
            .unwrap()
            .submissions
            .is_empty());
    }

    #[tokio::test]
    async fn closed_challenge_takes_no_submissions() {
        let ctx = TestContext::new();
        {
            let mut store = ctx.context.lock().await;
            store.create_challenge(new_challenge("a")).unwrap();
            store.close_challenge(1).unwrap();
        }

        assert_eq!(
            run(&ctx, message("code-wars-submissions", false)).await,
            EventResult::Skipped
        );
    }
}
