use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, instrument};

use shared::{
    rank, standings, Archive, Challenge, ChallengeId, ChallengeUpdate, Error, Member, MemberId,
    MemberTable, MonthKey, NewChallenge, Result, Submission, TimePeriod,
};

pub const LEADERBOARD_FILE: &str = "leaderboard.json";
pub const HALL_OF_FAME_FILE: &str = "hall_of_fame.json";
pub const CHALLENGES_FILE: &str = "challenges.json";

/// Owns the member table, the monthly archive and the challenge list.
///
/// Every mutation is written to disk before it returns. A missing file loads
/// as an empty table, a file that fails to parse aborts [`Store::open`].
#[derive(Debug)]
pub struct Store {
    data_dir: PathBuf,
    leaderboard: MemberTable,
    hall_of_fame: Archive,
    challenges: Vec<Challenge>,
}

impl Store {
    #[instrument]
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir).map_err(|source| Error::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;

        let store = Self {
            leaderboard: load_table(&data_dir.join(LEADERBOARD_FILE))?,
            hall_of_fame: load_table(&data_dir.join(HALL_OF_FAME_FILE))?,
            challenges: load_table(&data_dir.join(CHALLENGES_FILE))?,
            data_dir: data_dir.to_path_buf(),
        };
        info!(
            "Loaded {} members, {} archived months and {} challenges",
            store.leaderboard.len(),
            store.hall_of_fame.len(),
            store.challenges.len()
        );
        Ok(store)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn ensure_member(&mut self, id: MemberId, display_name: &str) -> Result<()> {
        self.leaderboard
            .entry(id)
            .and_modify(|member| member.display_name = display_name.to_string())
            .or_insert_with(|| Member::new(display_name));
        debug!("Ensured member {id} ({display_name})");
        self.save_leaderboard()
    }

    /// Negative amounts are applied as given; only [`Store::remove_xp`] floors.
    pub fn add_xp(&mut self, id: MemberId, amount: i64, week: &str) -> Result<()> {
        self.member_mut(id)?.add_xp(amount, week);
        debug!("Added {amount} XP to {id} for {week}");
        self.save_leaderboard()
    }

    /// Leaderboard correction: lifetime XP and weekly buckets are left alone.
    pub fn remove_xp(&mut self, id: MemberId, amount: i64) -> Result<()> {
        self.member_mut(id)?.remove_xp(amount);
        debug!("Removed {amount} XP from {id}");
        self.save_leaderboard()
    }

    /// Returns `false` when the member already holds the badge.
    pub fn add_badge(&mut self, id: MemberId, label: &str) -> Result<bool> {
        let added = self.member_mut(id)?.add_badge(label);
        if !added {
            debug!("Member {id} already holds badge {label}");
            return Ok(false);
        }
        debug!("Awarded badge {label} to {id}");
        self.save_leaderboard()?;
        Ok(true)
    }

    pub fn get_member(&self, id: MemberId) -> Option<&Member> {
        self.leaderboard.get(&id)
    }

    pub fn get_leaderboard(&self) -> &MemberTable {
        &self.leaderboard
    }

    pub fn standings(&self) -> Vec<(MemberId, &Member)> {
        standings(&self.leaderboard)
    }

    /// Ties are ordered by when the member was first seen.
    pub fn get_rank(&self, id: MemberId) -> usize {
        rank(&self.leaderboard, id)
    }

    pub fn rollover_period(&mut self) -> Result<MonthKey> {
        let month = TimePeriod::Month.current();
        self.rollover_period_as(month.clone())?;
        Ok(month)
    }

    /// Archives the table under `month`, replacing any earlier snapshot with
    /// that key, then zeroes every member's current XP.
    ///
    /// Each table is replaced in memory only once its file is written, so a
    /// failed write leaves memory matching the disk.
    #[instrument(skip(self))]
    pub fn rollover_period_as(&mut self, month: MonthKey) -> Result<()> {
        let mut hall_of_fame = self.hall_of_fame.clone();
        hall_of_fame.insert(month, self.leaderboard.clone());
        save_table(&self.data_dir.join(HALL_OF_FAME_FILE), &hall_of_fame)?;
        self.hall_of_fame = hall_of_fame;

        let mut leaderboard = self.leaderboard.clone();
        for member in leaderboard.values_mut() {
            member.current_xp = 0;
        }
        save_table(&self.data_dir.join(LEADERBOARD_FILE), &leaderboard)?;
        self.leaderboard = leaderboard;
        info!("Rolled over {} members", self.leaderboard.len());
        Ok(())
    }

    pub fn get_hall_of_fame(&self) -> &Archive {
        &self.hall_of_fame
    }

    #[instrument(skip(self, challenge), fields(title = %challenge.title))]
    pub fn create_challenge(&mut self, challenge: NewChallenge) -> Result<ChallengeId> {
        let id = self
            .challenges
            .iter()
            .map(|challenge| challenge.id)
            .max()
            .unwrap_or_default()
            + 1;
        self.challenges.push(Challenge::from_new(id, challenge));
        info!("Created challenge #{id}");
        self.save_challenges()?;
        Ok(id)
    }

    pub fn update_challenge(&mut self, id: ChallengeId, update: ChallengeUpdate) -> Result<()> {
        self.challenge_mut(id)?.apply(update)?;
        debug!("Updated challenge #{id}");
        self.save_challenges()
    }

    pub fn close_challenge(&mut self, id: ChallengeId) -> Result<()> {
        self.update_challenge(id, ChallengeUpdate::close())
    }

    pub fn get_challenge(&self, id: ChallengeId) -> Option<&Challenge> {
        self.challenges.iter().find(|challenge| challenge.id == id)
    }

    /// The most recently created challenge that is still active. Nothing
    /// prevents several active challenges from coexisting.
    pub fn get_active_challenge(&self) -> Option<&Challenge> {
        self.challenges.iter().rev().find(|challenge| challenge.is_active())
    }

    pub fn get_latest_challenge(&self) -> Option<&Challenge> {
        self.challenges.last()
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn add_submission(&mut self, id: ChallengeId, submission: Submission) -> Result<()> {
        let user = submission.user_id;
        self.challenge_mut(id)?.submissions.push(submission);
        debug!("Recorded submission from {user} for challenge #{id}");
        self.save_challenges()
    }

    fn member_mut(&mut self, id: MemberId) -> Result<&mut Member> {
        self.leaderboard
            .get_mut(&id)
            .ok_or(Error::MemberNotFound(id))
    }

    fn challenge_mut(&mut self, id: ChallengeId) -> Result<&mut Challenge> {
        self.challenges
            .iter_mut()
            .find(|challenge| challenge.id == id)
            .ok_or(Error::ChallengeNotFound(id))
    }

    fn save_leaderboard(&self) -> Result<()> {
        save_table(&self.data_dir.join(LEADERBOARD_FILE), &self.leaderboard)
    }

    fn save_challenges(&self) -> Result<()> {
        save_table(&self.data_dir.join(CHALLENGES_FILE), &self.challenges)
    }
}

fn load_table<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} does not exist yet, starting empty", path.display());
            return Ok(T::default());
        }
        Err(source) => {
            return Err(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| Error::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

// Written next to the target and renamed so a crash never leaves half a file.
fn save_table<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let content = serde_json::to_string_pretty(value).map_err(|source| Error::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).map_err(io_error)?;
    fs::rename(&tmp, path).map_err(io_error)
}
