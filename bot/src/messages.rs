use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::error;

use shared::{HallOfFameEntry, Member, MemberId};

use crate::config::Settings;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum MsgCategory {
    ChallengePosted,
    ChallengeAnnouncement,
    ChallengeClosed,
    WinnersAnnounced,
    PointsGiven,
    XpAdded,
    XpRemoved,
    MonthReset,
    MonthlyRollover,
    WeeklyReminder,
    SubmissionsHeader,
    LeaderboardHeader,
    HallOfFameHeader,
    Stats,
    Help,
    EmptyLeaderboard,
    EmptyHallOfFame,
    ErrorRightsViolation,
    ErrorAdminOnly,
    ErrorNoActiveChallenge,
    ErrorNoChallenge,
    ErrorInvalidPosition,
    ErrorMemberNotFound,
    ErrorNoSubmissions,
    ErrorNoStats,
}

impl std::fmt::Display for MsgCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Messages {
    message: Vec<String>,
    variables: HashSet<String>,
}

impl Messages {
    pub fn new(message: Vec<String>, variables: HashSet<String>) -> Self {
        Self { message, variables }
    }

    pub fn format(&self, values: HashMap<&'static str, String>) -> anyhow::Result<String> {
        let mut formatted_message = self
            .message
            .choose(&mut thread_rng())
            .ok_or_else(|| anyhow::anyhow!("Failed to choose randomly an message"))?
            .clone();
        for key in self.variables.iter() {
            if let Some(value) = values.get(key.as_str()) {
                formatted_message = formatted_message.replace(&format!("{{{}}}", key), value);
            } else {
                error!(
                    "The message expects a variable: {}, but it wasn't provided",
                    key
                );
            }
        }
        Ok(formatted_message)
    }

    fn partial_format(&mut self, values: &HashMap<&'static str, String>) {
        for message in self.message.iter_mut() {
            for (key, value) in values {
                *message = message.replace(&format!("{{{key}}}"), value);
                self.variables.remove(key.to_owned());
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageLoader {
    pub challenge_posted: Messages,
    pub challenge_announcement: Messages,
    pub challenge_closed: Messages,
    pub winners_announced: Messages,
    pub points_given: Messages,
    pub xp_added: Messages,
    pub xp_removed: Messages,
    pub month_reset: Messages,
    pub monthly_rollover: Messages,
    pub weekly_reminder: Messages,

    // Listings
    pub submissions_header: Messages,
    pub leaderboard_header: Messages,
    pub hall_of_fame_header: Messages,
    pub stats: Messages,
    pub help: Messages,
    pub empty_leaderboard: Messages,
    pub empty_hall_of_fame: Messages,

    // Errors
    pub error_rights_violation: Messages,
    pub error_admin_only: Messages,
    pub error_no_active_challenge: Messages,
    pub error_no_challenge: Messages,
    pub error_invalid_position: Messages,
    pub error_member_not_found: Messages,
    pub error_no_submissions: Messages,
    pub error_no_stats: Messages,
}

impl MessageLoader {
    pub fn load_from_file(file_path: &Path, settings: &Settings) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(file_path)?;
        Self::load_from_str(&file_content, settings)
    }

    pub fn load_from_str(content: &str, settings: &Settings) -> anyhow::Result<Self> {
        let mut result: Self = toml::from_str(content)?;
        result.postprocess_messages(settings);
        tracing::trace!("Loaded messages: {:#?}", result);
        Ok(result)
    }

    fn postprocess_messages(&mut self, settings: &Settings) {
        let values = vec![
            ("exercise_channel", settings.exercise_channel.clone()),
            ("submission_channel", settings.submission_channel.clone()),
        ]
        .into_iter()
        .collect::<HashMap<_, _>>();

        let array_of_messages = vec![
            &mut self.challenge_posted,
            &mut self.challenge_announcement,
            &mut self.challenge_closed,
            &mut self.winners_announced,
            &mut self.points_given,
            &mut self.xp_added,
            &mut self.xp_removed,
            &mut self.month_reset,
            &mut self.monthly_rollover,
            &mut self.weekly_reminder,
            &mut self.submissions_header,
            &mut self.leaderboard_header,
            &mut self.hall_of_fame_header,
            &mut self.stats,
            &mut self.help,
            &mut self.empty_leaderboard,
            &mut self.empty_hall_of_fame,
            &mut self.error_rights_violation,
            &mut self.error_admin_only,
            &mut self.error_no_active_challenge,
            &mut self.error_no_challenge,
            &mut self.error_invalid_position,
            &mut self.error_member_not_found,
            &mut self.error_no_submissions,
            &mut self.error_no_stats,
        ];
        for message in array_of_messages {
            message.partial_format(&values);
        }
    }

    pub fn get_message(&self, category: MsgCategory) -> &Messages {
        match category {
            MsgCategory::ChallengePosted => &self.challenge_posted,
            MsgCategory::ChallengeAnnouncement => &self.challenge_announcement,
            MsgCategory::ChallengeClosed => &self.challenge_closed,
            MsgCategory::WinnersAnnounced => &self.winners_announced,
            MsgCategory::PointsGiven => &self.points_given,
            MsgCategory::XpAdded => &self.xp_added,
            MsgCategory::XpRemoved => &self.xp_removed,
            MsgCategory::MonthReset => &self.month_reset,
            MsgCategory::MonthlyRollover => &self.monthly_rollover,
            MsgCategory::WeeklyReminder => &self.weekly_reminder,
            MsgCategory::SubmissionsHeader => &self.submissions_header,
            MsgCategory::LeaderboardHeader => &self.leaderboard_header,
            MsgCategory::HallOfFameHeader => &self.hall_of_fame_header,
            MsgCategory::Stats => &self.stats,
            MsgCategory::Help => &self.help,
            MsgCategory::EmptyLeaderboard => &self.empty_leaderboard,
            MsgCategory::EmptyHallOfFame => &self.empty_hall_of_fame,
            MsgCategory::ErrorRightsViolation => &self.error_rights_violation,
            MsgCategory::ErrorAdminOnly => &self.error_admin_only,
            MsgCategory::ErrorNoActiveChallenge => &self.error_no_active_challenge,
            MsgCategory::ErrorNoChallenge => &self.error_no_challenge,
            MsgCategory::ErrorInvalidPosition => &self.error_invalid_position,
            MsgCategory::ErrorMemberNotFound => &self.error_member_not_found,
            MsgCategory::ErrorNoSubmissions => &self.error_no_submissions,
            MsgCategory::ErrorNoStats => &self.error_no_stats,
        }
    }

    pub fn format(
        &self,
        category: MsgCategory,
        args: Vec<(&'static str, String)>,
    ) -> anyhow::Result<String> {
        self.get_message(category)
            .format(args.into_iter().collect())
    }

    pub fn leaderboard_text(
        &self,
        month: &str,
        standings: &[(MemberId, &Member)],
    ) -> anyhow::Result<String> {
        if standings.is_empty() {
            return self.format(MsgCategory::EmptyLeaderboard, vec![]);
        }

        let mut text = self.format(
            MsgCategory::LeaderboardHeader,
            vec![("month", month.to_string())],
        )?;
        for (idx, (_, member)) in standings.iter().take(10).enumerate() {
            text.push_str(&format!(
                "\n{} {} - {} XP",
                place(idx),
                member.display_name,
                member.current_xp
            ));
        }
        text.push_str("\n_Updated monthly • Top 10 shown_");
        Ok(text)
    }

    pub fn hall_of_fame_text(&self, totals: &[HallOfFameEntry]) -> anyhow::Result<String> {
        if totals.is_empty() {
            return self.format(MsgCategory::EmptyHallOfFame, vec![]);
        }

        let mut text = self.format(MsgCategory::HallOfFameHeader, vec![])?;
        for (idx, entry) in totals.iter().take(10).enumerate() {
            text.push_str(&format!(
                "\n{} {} - {} Total XP",
                place(idx),
                entry.display_name,
                entry.total_xp
            ));
        }
        text.push_str("\n_All-time rankings • Top 10 shown_");
        Ok(text)
    }
}

fn place(idx: usize) -> String {
    MEDALS
        .get(idx)
        .map(|medal| medal.to_string())
        .unwrap_or_else(|| format!("**{}.**", idx + 1))
}
