use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use shared::XpTable;

#[derive(Debug, Clone, Deserialize)]
pub struct Env {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_message_file")]
    pub message_file: PathBuf,
    #[serde(default = "default_allowed_roles")]
    pub allowed_roles: Vec<String>,
    #[serde(default = "default_exercise_channel")]
    pub exercise_channel: String,
    #[serde(default = "default_submission_channel")]
    pub submission_channel: String,
    pub xp_first: Option<i64>,
    pub xp_second: Option<i64>,
    pub xp_third: Option<i64>,
    pub xp_participation: Option<i64>,
    pub timer_tick_in_minutes: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_message_file() -> PathBuf {
    PathBuf::from("Messages.toml")
}

fn default_allowed_roles() -> Vec<String> {
    vec![
        "formateur".to_string(),
        "admin".to_string(),
        "moderator".to_string(),
    ]
}

fn default_exercise_channel() -> String {
    "exercice".to_string()
}

fn default_submission_channel() -> String {
    "code-wars-submissions".to_string()
}

impl Env {
    pub fn load() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Ok(envy::from_env::<Env>()?)
    }

    pub fn xp_table(&self) -> XpTable {
        let default = XpTable::default();
        XpTable {
            first: self.xp_first.unwrap_or(default.first),
            second: self.xp_second.unwrap_or(default.second),
            third: self.xp_third.unwrap_or(default.third),
            participation: self.xp_participation.unwrap_or(default.participation),
        }
    }

    pub fn timer_tick(&self) -> Duration {
        Duration::from_secs(self.timer_tick_in_minutes.unwrap_or(60).max(1) * 60)
    }

    pub fn settings(&self) -> Settings {
        Settings {
            allowed_roles: self
                .allowed_roles
                .iter()
                .map(|role| role.trim().to_lowercase())
                .collect(),
            exercise_channel: self.exercise_channel.clone(),
            submission_channel: self.submission_channel.clone(),
            xp: self.xp_table(),
        }
    }
}

/// The part of the environment command handlers need at runtime.
#[derive(Debug, Clone)]
pub struct Settings {
    pub allowed_roles: Vec<String>,
    pub exercise_channel: String,
    pub submission_channel: String,
    pub xp: XpTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allowed_roles: default_allowed_roles(),
            exercise_channel: default_exercise_channel(),
            submission_channel: default_submission_channel(),
            xp: XpTable::default(),
        }
    }
}
