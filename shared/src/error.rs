use std::path::PathBuf;

use super::{ChallengeId, MemberId};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("member {0} is not on the leaderboard")]
    MemberNotFound(MemberId),
    #[error("challenge #{0} does not exist")]
    ChallengeNotFound(ChallengeId),

    #[error("unknown placement `{0}`, expected one of: 1st, 2nd, 3rd, participation")]
    UnknownPlacement(String),
    #[error("challenge #{0} is closed and cannot be reopened")]
    ChallengeClosed(ChallengeId),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::MemberNotFound(_) | Self::ChallengeNotFound(_))
    }

    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::UnknownPlacement(_) | Self::ChallengeClosed(_))
    }

    pub const fn is_storage_fault(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Corrupt { .. })
    }
}
