use std::sync::Arc;

use tokio::sync::Mutex;

use shared::{ChallengeId, MemberId};

use crate::{config::Settings, messages::MessageLoader, store::Store};

pub mod actions;
pub mod commands;
pub(crate) mod common;

pub use actions::Action;
pub use commands::Command;

/// Everything a command or action needs. Cheap to clone; the Store behind the
/// mutex is the single serialization point for all reads and writes.
#[derive(Clone, Debug)]
pub struct Context {
    pub store: Arc<Mutex<Store>>,
    pub messages: Arc<MessageLoader>,
    pub settings: Arc<Settings>,
}

impl Context {
    pub fn new(store: Store, messages: MessageLoader, settings: Settings) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            messages: messages.into(),
            settings: settings.into(),
        }
    }
}

/// A member as the chat platform reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: MemberId,
    pub name: String,
}

impl Participant {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The member who invoked a command, with the role names the platform reports.
#[derive(Debug, Clone)]
pub struct Caller {
    pub member: Participant,
    pub roles: Vec<String>,
    pub is_administrator: bool,
}

impl Caller {
    pub fn new(member: Participant, roles: Vec<String>, is_administrator: bool) -> Self {
        Self {
            member,
            roles,
            is_administrator,
        }
    }

    pub fn is_trainer(&self, allowed_roles: &[String]) -> bool {
        self.roles
            .iter()
            .any(|role| allowed_roles.contains(&role.to_lowercase()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Only the caller should see it.
    pub ephemeral: bool,
}

/// A message for a named channel. `challenge` is set when the platform should
/// report the posted message back through `Command::AttachAnnouncement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub channel: String,
    pub text: String,
    pub challenge: Option<ChallengeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    Replied {
        reply: Reply,
        announcement: Option<Announcement>,
    },
    RepliedWithError(Reply),
    Announced(Announcement),
    /// The platform should confirm with a reaction.
    Acknowledged,
    Skipped,
}

impl EventResult {
    pub fn reply(text: String, ephemeral: bool) -> Self {
        Self::Replied {
            reply: Reply { text, ephemeral },
            announcement: None,
        }
    }

    pub fn reply_text(&self) -> Option<&str> {
        match self {
            EventResult::Replied { reply, .. } | EventResult::RepliedWithError(reply) => {
                Some(&reply.text)
            }
            _ => None,
        }
    }
}
