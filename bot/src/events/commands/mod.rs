use tracing::{info, instrument};

use crate::messages::MsgCategory;

use super::*;

pub mod admin;
pub mod awards;
pub mod challenge;
pub mod help;
pub mod standings;
pub mod xp;

pub use self::{admin::*, awards::*, challenge::*, help::*, standings::*, xp::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Everyone,
    Trainer,
    Administrator,
}

#[derive(Debug, Clone)]
pub enum Command {
    PostChallenge(PostChallenge),
    AttachAnnouncement(AttachAnnouncement),
    CloseChallenge(CloseChallenge),
    Submissions(ListSubmissions),
    AwardWinners(AwardWinners),
    GivePoints(GivePoints),
    AddXp(AddXp),
    RemoveXp(RemoveXp),
    ResetMonth(ResetMonth),
    Leaderboard(ShowLeaderboard),
    HallOfFame(ShowHallOfFame),
    Stats(ShowStats),
    Help(ShowHelp),
}

impl Command {
    pub const fn name(&self) -> &'static str {
        match self {
            Command::PostChallenge(_) => "postchallenge",
            Command::AttachAnnouncement(_) => "attachannouncement",
            Command::CloseChallenge(_) => "closechallenge",
            Command::Submissions(_) => "submissions",
            Command::AwardWinners(_) => "awardwinners",
            Command::GivePoints(_) => "givepoints",
            Command::AddXp(_) => "addxp",
            Command::RemoveXp(_) => "removexp",
            Command::ResetMonth(_) => "resetmonth",
            Command::Leaderboard(_) => "leaderboard",
            Command::HallOfFame(_) => "halloffame",
            Command::Stats(_) => "stats",
            Command::Help(_) => "help",
        }
    }

    pub const fn permission(&self) -> Permission {
        match self {
            Command::Leaderboard(_)
            | Command::HallOfFame(_)
            | Command::Stats(_)
            | Command::Help(_) => Permission::Everyone,
            Command::ResetMonth(_) => Permission::Administrator,
            _ => Permission::Trainer,
        }
    }

    #[instrument(skip(self, context, caller), fields(command = self.name(), caller = caller.member.id))]
    pub async fn execute(&self, context: Context, caller: &Caller) -> anyhow::Result<EventResult> {
        match self.permission() {
            Permission::Trainer if !context.is_trainer(caller) => {
                info!("{} is not a trainer. Refusing", caller.member.name);
                return context.reply_with_error(MsgCategory::ErrorRightsViolation, vec![]);
            }
            Permission::Administrator if !caller.is_administrator => {
                info!("{} is not an administrator. Refusing", caller.member.name);
                return context.reply_with_error(MsgCategory::ErrorAdminOnly, vec![]);
            }
            _ => {}
        }

        match self {
            Command::PostChallenge(command) => command.execute(&context, caller).await,
            Command::AttachAnnouncement(command) => command.execute(&context).await,
            Command::CloseChallenge(command) => command.execute(&context).await,
            Command::Submissions(command) => command.execute(&context).await,
            Command::AwardWinners(command) => command.execute(&context).await,
            Command::GivePoints(command) => command.execute(&context).await,
            Command::AddXp(command) => command.execute(&context).await,
            Command::RemoveXp(command) => command.execute(&context).await,
            Command::ResetMonth(command) => command.execute(&context).await,
            Command::Leaderboard(command) => command.execute(&context).await,
            Command::HallOfFame(command) => command.execute(&context).await,
            Command::Stats(command) => command.execute(&context, caller).await,
            Command::Help(command) => command.execute(&context).await,
        }
    }
}
