use tracing::{info, instrument};

use shared::{current_iso_week, week_string, Placement};

use crate::{events::common::current_or_latest, messages::MsgCategory, store::Store};

use super::*;

#[derive(Debug, Clone)]
pub struct AwardWinners {
    pub first: Participant,
    pub second: Option<Participant>,
    pub third: Option<Participant>,
}

impl AwardWinners {
    fn podium(&self) -> Vec<(Placement, &Participant)> {
        [
            (Placement::First, Some(&self.first)),
            (Placement::Second, self.second.as_ref()),
            (Placement::Third, self.third.as_ref()),
        ]
        .into_iter()
        .filter_map(|(placement, winner)| Some((placement, winner?)))
        .collect()
    }

    #[instrument(skip(self, context), fields(first = self.first.id))]
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let mut store = context.lock().await;
        let Some(challenge) = current_or_latest(&store) else {
            return context.reply_with_error(MsgCategory::ErrorNoChallenge, vec![]);
        };

        let week_key = challenge.week_key();
        let mut winners = Vec::new();
        for (placement, winner) in self.podium() {
            let xp = context.settings.xp.xp(placement);
            award(&mut store, winner, placement, xp, &week_key)?;
            if let Some(badge) = placement.badge(challenge.week) {
                store.add_badge(winner.id, &badge)?;
            }
            winners.push(format!(
                "{} {} - **{xp} XP**",
                placement.medal(),
                winner.name
            ));
        }
        drop(store);
        info!(
            "Awarded {} winners for challenge #{}",
            winners.len(),
            challenge.id
        );

        context.reply(
            MsgCategory::WinnersAnnounced,
            vec![
                ("title", challenge.title),
                ("week", challenge.week.to_string()),
                ("winners", winners.join("\n")),
            ],
            false,
        )
    }
}

#[derive(Debug, Clone)]
pub struct GivePoints {
    pub user: Participant,
}

impl GivePoints {
    #[instrument(skip(self, context), fields(user = self.user.id))]
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let mut store = context.lock().await;
        let week_key = store
            .get_latest_challenge()
            .map(|challenge| challenge.week_key())
            .unwrap_or_else(|| week_string(current_iso_week()));

        let xp = context.settings.xp.xp(Placement::Participation);
        award(&mut store, &self.user, Placement::Participation, xp, &week_key)?;
        drop(store);

        context.reply(
            MsgCategory::PointsGiven,
            vec![("user", self.user.name.clone()), ("xp", xp.to_string())],
            true,
        )
    }
}

pub(crate) fn award(
    store: &mut Store,
    member: &Participant,
    placement: Placement,
    xp: i64,
    week_key: &str,
) -> shared::Result<()> {
    store.ensure_member(member.id, &member.name)?;
    store.add_xp(member.id, xp, week_key)?;
    info!("{} earned {xp} XP for {placement} in {week_key}", member.name);
    Ok(())
}
