use chrono::Utc;
use tracing::{debug, info, instrument};

use shared::{current_iso_week, ChallengeId, ChallengeUpdate, MessageRef, NewChallenge};

use crate::{events::common::current_or_latest, messages::MsgCategory};

use super::*;

const DEFAULT_DIFFICULTY: &str = "Medium";
const MAX_LISTED_SUBMISSIONS: usize = 25;

#[derive(Debug, Clone)]
pub struct PostChallenge {
    pub title: String,
    pub description: String,
    pub difficulty: Option<String>,
}

impl PostChallenge {
    #[instrument(skip(self, context, caller), fields(title = %self.title))]
    pub async fn execute(&self, context: &Context, caller: &Caller) -> anyhow::Result<EventResult> {
        let week = current_iso_week();
        let difficulty = self
            .difficulty
            .clone()
            .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string());

        let id = context.lock().await.create_challenge(NewChallenge {
            title: self.title.clone(),
            description: self.description.clone(),
            difficulty: difficulty.clone(),
            week,
            creator_id: caller.member.id,
            created_at: Utc::now(),
        })?;
        info!("Challenge #{id} posted by {}", caller.member.name);

        let announcement = context.messages.format(
            MsgCategory::ChallengeAnnouncement,
            vec![
                ("title", self.title.clone()),
                ("description", self.description.clone()),
                ("difficulty", difficulty),
                ("week", week.to_string()),
                ("author", caller.member.name.clone()),
            ],
        )?;
        let text = context
            .messages
            .format(MsgCategory::ChallengePosted, vec![("id", id.to_string())])?;

        Ok(EventResult::Replied {
            reply: Reply {
                text,
                ephemeral: true,
            },
            announcement: Some(Announcement {
                channel: context.settings.exercise_channel.clone(),
                text: announcement,
                challenge: Some(id),
            }),
        })
    }
}

/// Records where the announcement of a challenge ended up.
#[derive(Debug, Clone)]
pub struct AttachAnnouncement {
    pub challenge: ChallengeId,
    pub message: MessageRef,
}

impl AttachAnnouncement {
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        context
            .lock()
            .await
            .update_challenge(self.challenge, ChallengeUpdate::posted(self.message))?;
        debug!(
            "Challenge #{} announced in message {}",
            self.challenge, self.message.message_id
        );
        Ok(EventResult::Skipped)
    }
}

#[derive(Debug, Clone)]
pub struct CloseChallenge;

impl CloseChallenge {
    #[instrument(skip(self, context))]
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let mut store = context.lock().await;
        let Some(challenge) = store.get_active_challenge().cloned() else {
            debug!("No active challenge to close");
            return context.reply_with_error(MsgCategory::ErrorNoActiveChallenge, vec![]);
        };

        store.close_challenge(challenge.id)?;
        drop(store);
        info!("Closed challenge #{}", challenge.id);

        context.reply(
            MsgCategory::ChallengeClosed,
            vec![
                ("title", challenge.title),
                ("submissions", challenge.submissions.len().to_string()),
                ("week", challenge.week.to_string()),
            ],
            false,
        )
    }
}

#[derive(Debug, Clone)]
pub struct ListSubmissions;

impl ListSubmissions {
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let store = context.lock().await;
        let Some(challenge) = current_or_latest(&store) else {
            return context.reply_with_error(MsgCategory::ErrorNoChallenge, vec![]);
        };

        if challenge.submissions.is_empty() {
            return context.reply_with_error(MsgCategory::ErrorNoSubmissions, vec![]);
        }

        let mut text = context.messages.format(
            MsgCategory::SubmissionsHeader,
            vec![
                ("title", challenge.title.clone()),
                ("count", challenge.submissions.len().to_string()),
            ],
        )?;
        for (idx, submission) in challenge
            .submissions
            .iter()
            .take(MAX_LISTED_SUBMISSIONS)
            .enumerate()
        {
            let name = store
                .get_member(submission.user_id)
                .map(|member| member.display_name.clone())
                .unwrap_or_else(|| submission.user_id.to_string());
            text.push_str(&format!(
                "\n{}. {} - message {} in channel {}",
                idx + 1,
                name,
                submission.message_id,
                submission.channel_id
            ));
        }

        Ok(EventResult::reply(text, true))
    }
}
