use tracing::{debug, instrument};

use shared::{current_iso_week, week_string, Placement};

use crate::messages::MsgCategory;

use super::*;

#[derive(Debug, Clone)]
pub struct AddXp {
    pub user: Participant,
    pub position: String,
    /// ISO week, the current one when absent.
    pub week: Option<u32>,
}

impl AddXp {
    #[instrument(skip(self, context), fields(user = self.user.id, position = %self.position))]
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let placement = match Placement::parse(&self.position) {
            Ok(placement) => placement,
            Err(e) => {
                debug!("Rejected placement: {e}");
                return context.reply_with_error(
                    MsgCategory::ErrorInvalidPosition,
                    vec![("position", self.position.clone())],
                );
            }
        };

        let week = self.week.unwrap_or_else(current_iso_week);
        let xp = context.settings.xp.xp(placement);
        let mut store = context.lock().await;
        awards::award(&mut store, &self.user, placement, xp, &week_string(week))?;
        let current_xp = store
            .get_member(self.user.id)
            .map(|member| member.current_xp)
            .unwrap_or_default();
        drop(store);

        context.reply(
            MsgCategory::XpAdded,
            vec![
                ("user", self.user.name.clone()),
                ("xp", xp.to_string()),
                ("position", placement.to_string()),
                ("current_xp", current_xp.to_string()),
                ("week", week.to_string()),
            ],
            false,
        )
    }
}

#[derive(Debug, Clone)]
pub struct RemoveXp {
    pub user: Participant,
    pub amount: i64,
}

impl RemoveXp {
    #[instrument(skip(self, context), fields(user = self.user.id, amount = self.amount))]
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let mut store = context.lock().await;
        match store.remove_xp(self.user.id, self.amount) {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                debug!("{e}");
                return context.reply_with_error(
                    MsgCategory::ErrorMemberNotFound,
                    vec![("user", self.user.name.clone())],
                );
            }
            Err(e) => return Err(e.into()),
        }
        let current_xp = store
            .get_member(self.user.id)
            .map(|member| member.current_xp)
            .unwrap_or_default();
        drop(store);

        context.reply(
            MsgCategory::XpRemoved,
            vec![
                ("user", self.user.name.clone()),
                ("amount", self.amount.to_string()),
                ("current_xp", current_xp.to_string()),
            ],
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::*;
    use super::*;

    fn add(position: &str, week: Option<u32>) -> Command {
        Command::AddXp(AddXp {
            user: Participant::new(30, "eve"),
            position: position.to_string(),
            week,
        })
    }

    #[tokio::test]
    async fn invalid_position_mutates_nothing() {
        let ctx = TestContext::new();
        let result = ctx.run(add("4th", None), &trainer()).await;
        let EventResult::RepliedWithError(reply) = result else {
            panic!("expected an error reply");
        };
        assert!(reply.text.contains("4th"));
        assert!(ctx.context.lock().await.get_member(30).is_none());
    }

    #[tokio::test]
    async fn add_xp_by_position() {
        let ctx = TestContext::new();
        let result = ctx.run(add("2ND", Some(7)), &trainer()).await;
        let text = result.reply_text().unwrap();
        assert!(text.contains("**7 XP**"));
        assert!(text.contains("**2nd**"));

        ctx.run(add("participation", Some(7)), &trainer()).await;
        let store = ctx.context.lock().await;
        let eve = store.get_member(30).unwrap();
        assert_eq!(eve.display_name, "eve");
        assert_eq!(eve.week_xp("week_7"), 9);
        assert_eq!(eve.lifetime_xp, 9);
    }

    #[tokio::test]
    async fn remove_xp_requires_member() {
        let ctx = TestContext::new();
        let remove = |amount| {
            Command::RemoveXp(RemoveXp {
                user: Participant::new(30, "eve"),
                amount,
            })
        };

        let result = ctx.run(remove(3), &trainer()).await;
        assert!(matches!(result, EventResult::RepliedWithError(_)));
        assert!(ctx.context.lock().await.get_member(30).is_none());

        ctx.run(add("1st", Some(2)), &trainer()).await;
        let result = ctx.run(remove(3), &trainer()).await;
        assert!(result.reply_text().unwrap().contains("Current XP: 7"));

        ctx.run(remove(100), &trainer()).await;
        let store = ctx.context.lock().await;
        let eve = store.get_member(30).unwrap();
        assert_eq!(eve.current_xp, 0);
        assert_eq!(eve.lifetime_xp, 10);
    }
}
