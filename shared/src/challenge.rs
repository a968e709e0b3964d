use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserializer;

use super::*;

pub type ChallengeId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChallengeStatus {
    #[default]
    Active,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub channel_id: u64,
    pub message_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub user_id: MemberId,
    pub message_id: u64,
    pub channel_id: u64,
    #[serde(deserialize_with = "utc_or_naive")]
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(user_id: MemberId, message: MessageRef, submitted_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            message_id: message.message_id,
            channel_id: message.channel_id,
            submitted_at,
        }
    }

    pub const fn message(&self) -> MessageRef {
        MessageRef {
            channel_id: self.channel_id,
            message_id: self.message_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: ChallengeId,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub week: u32,
    #[serde(alias = "posted_by")]
    pub creator_id: MemberId,
    #[serde(alias = "posted_at", deserialize_with = "utc_or_naive")]
    pub created_at: DateTime<Utc>,
    pub status: ChallengeStatus,
    #[serde(default, alias = "message_id", skip_serializing_if = "Option::is_none")]
    pub message_ref: Option<u64>,
    #[serde(default, alias = "channel_id", skip_serializing_if = "Option::is_none")]
    pub channel_ref: Option<u64>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl Challenge {
    pub fn from_new(id: ChallengeId, new: NewChallenge) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            difficulty: new.difficulty,
            week: new.week,
            creator_id: new.creator_id,
            created_at: new.created_at,
            status: ChallengeStatus::Active,
            message_ref: None,
            channel_ref: None,
            submissions: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ChallengeStatus::Active
    }

    pub fn week_key(&self) -> WeekKey {
        week_string(self.week)
    }

    pub fn message(&self) -> Option<MessageRef> {
        Some(MessageRef {
            channel_id: self.channel_ref?,
            message_id: self.message_ref?,
        })
    }

    /// Merges the given fields. Status only ever moves from active to closed.
    pub fn apply(&mut self, update: ChallengeUpdate) -> Result<()> {
        if update.status == Some(ChallengeStatus::Active) && !self.is_active() {
            return Err(Error::ChallengeClosed(self.id));
        }

        let ChallengeUpdate {
            title,
            description,
            difficulty,
            status,
            message,
        } = update;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(message) = message {
            self.channel_ref = Some(message.channel_id);
            self.message_ref = Some(message.message_id);
        }
        Ok(())
    }
}

/// RFC 3339, or a timestamp without offset which is taken as UTC. Older
/// challenge files only contain the latter.
fn utc_or_naive<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// Fields supplied by the poster; the Store assigns the id and the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChallenge {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub week: u32,
    pub creator_id: MemberId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub status: Option<ChallengeStatus>,
    pub message: Option<MessageRef>,
}

impl ChallengeUpdate {
    pub fn close() -> Self {
        Self {
            status: Some(ChallengeStatus::Closed),
            ..Default::default()
        }
    }

    pub fn posted(message: MessageRef) -> Self {
        Self {
            message: Some(message),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn challenge() -> Challenge {
        Challenge::from_new(
            1,
            NewChallenge {
                title: "FizzBuzz".to_string(),
                description: "Classic".to_string(),
                difficulty: "Easy".to_string(),
                week: 14,
                creator_id: 7,
                created_at: Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap(),
            },
        )
    }

    #[test]
    fn close_is_one_way() {
        let mut challenge = challenge();
        challenge.apply(ChallengeUpdate::close()).unwrap();
        assert_eq!(challenge.status, ChallengeStatus::Closed);

        let reopen = ChallengeUpdate {
            status: Some(ChallengeStatus::Active),
            ..Default::default()
        };
        assert!(matches!(
            challenge.apply(reopen),
            Err(Error::ChallengeClosed(1))
        ));
        assert_eq!(challenge.status, ChallengeStatus::Closed);
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let mut challenge = challenge();
        let message = MessageRef {
            channel_id: 10,
            message_id: 20,
        };
        challenge.apply(ChallengeUpdate::posted(message)).unwrap();
        assert_eq!(challenge.message(), Some(message));
        assert_eq!(challenge.title, "FizzBuzz");
        assert!(challenge.is_active());
        assert_eq!(challenge.week_key(), "week_14");
    }

    #[test]
    fn legacy_challenge_fields_are_accepted() {
        let legacy = r#"{
            "id": 3,
            "title": "t",
            "description": "d",
            "difficulty": "Hard",
            "week": 9,
            "posted_by": 55,
            "posted_at": "2025-02-28T20:00:00Z",
            "status": "closed",
            "message_id": 99,
            "channel_id": 98
        }"#;
        let challenge: Challenge = serde_json::from_str(legacy).unwrap();
        assert_eq!(challenge.creator_id, 55);
        assert_eq!(challenge.status, ChallengeStatus::Closed);
        assert_eq!(
            challenge.message(),
            Some(MessageRef {
                channel_id: 98,
                message_id: 99
            })
        );
        assert!(challenge.submissions.is_empty());
    }

    #[test]
    fn timestamps_without_offset_are_utc() {
        let legacy = r#"{
            "id": 4,
            "title": "t",
            "description": "d",
            "difficulty": "Easy",
            "week": 14,
            "posted_by": 55,
            "posted_at": "2025-04-04T20:00:00.123456",
            "status": "active",
            "submissions": [
                {"user_id": 7, "message_id": 8, "channel_id": 9, "submitted_at": "2025-04-05T09:30:00"}
            ]
        }"#;
        let challenge: Challenge = serde_json::from_str(legacy).unwrap();
        assert_eq!(
            challenge.created_at,
            Utc.with_ymd_and_hms(2025, 4, 4, 20, 0, 0).unwrap()
                + chrono::Duration::microseconds(123_456)
        );
        assert_eq!(
            challenge.submissions[0].submitted_at,
            Utc.with_ymd_and_hms(2025, 4, 5, 9, 30, 0).unwrap()
        );

        let garbled = legacy.replace("2025-04-04T", "yesterday ");
        assert!(serde_json::from_str::<Challenge>(&garbled).is_err());
    }
}
