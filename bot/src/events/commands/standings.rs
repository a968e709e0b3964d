use shared::{hall_of_fame_totals, TimePeriod};

use crate::messages::MsgCategory;

use super::*;

#[derive(Debug, Clone)]
pub struct ShowLeaderboard;

impl ShowLeaderboard {
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let store = context.lock().await;
        let text = context
            .messages
            .leaderboard_text(&TimePeriod::Month.current(), &store.standings())?;
        Ok(EventResult::reply(text, false))
    }
}

#[derive(Debug, Clone)]
pub struct ShowHallOfFame;

impl ShowHallOfFame {
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let totals = hall_of_fame_totals(context.lock().await.get_hall_of_fame());
        let text = context.messages.hall_of_fame_text(&totals)?;
        Ok(EventResult::reply(text, false))
    }
}

/// Stats of `user`, or of the caller when absent.
#[derive(Debug, Clone)]
pub struct ShowStats {
    pub user: Option<Participant>,
}

impl ShowStats {
    pub async fn execute(&self, context: &Context, caller: &Caller) -> anyhow::Result<EventResult> {
        let target = self.user.as_ref().unwrap_or(&caller.member);
        let store = context.lock().await;
        let Some(member) = store.get_member(target.id) else {
            return context
                .reply_with_error(MsgCategory::ErrorNoStats, vec![("user", target.name.clone())]);
        };

        let args = vec![
            ("user", member.display_name.clone()),
            ("current_xp", member.current_xp.to_string()),
            ("lifetime_xp", member.lifetime_xp.to_string()),
            ("rank", store.get_rank(target.id).to_string()),
        ];
        drop(store);
        context.reply(MsgCategory::Stats, args, false)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn leaderboard_orders_by_current_xp() {
        let ctx = TestContext::new();
        let result = ctx.run(Command::Leaderboard(ShowLeaderboard), &student(3)).await;
        assert!(result.reply_text().unwrap().contains("empty"));

        {
            let mut store = ctx.context.lock().await;
            for (id, name, xp) in [(1, "a", 100), (2, "b", 50), (3, "c", 50)] {
                store.ensure_member(id, name).unwrap();
                store.add_xp(id, xp, "week_1").unwrap();
            }
        }

        let result = ctx.run(Command::Leaderboard(ShowLeaderboard), &student(3)).await;
        let text = result.reply_text().unwrap();
        assert!(text.contains(&TimePeriod::Month.current()));
        let a = text.find("🥇 a - 100 XP").unwrap();
        let b = text.find("🥈 b - 50 XP").unwrap();
        let c = text.find("🥉 c - 50 XP").unwrap();
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn hall_of_fame_totals_months() {
        let ctx = TestContext::new();
        let result = ctx.run(Command::HallOfFame(ShowHallOfFame), &student(3)).await;
        assert!(result.reply_text().unwrap().contains("empty"));

        {
            let mut store = ctx.context.lock().await;
            store.ensure_member(1, "a").unwrap();
            store.add_xp(1, 10, "week_1").unwrap();
            store.rollover_period_as("2025-01".to_string()).unwrap();
            store.add_xp(1, 5, "week_6").unwrap();
            store.rollover_period_as("2025-02".to_string()).unwrap();
        }

        let result = ctx.run(Command::HallOfFame(ShowHallOfFame), &student(3)).await;
        assert!(result.reply_text().unwrap().contains("🥇 a - 15 Total XP"));
    }

    #[tokio::test]
    async fn stats_for_self_and_others() {
        let ctx = TestContext::new();
        let result = ctx.run(Command::Stats(ShowStats { user: None }), &student(4)).await;
        let EventResult::RepliedWithError(reply) = result else {
            panic!("expected an error reply");
        };
        assert!(reply.text.contains("student-4"));

        {
            let mut store = ctx.context.lock().await;
            store.ensure_member(5, "top").unwrap();
            store.add_xp(5, 30, "week_1").unwrap();
            store.ensure_member(4, "student-4").unwrap();
            store.add_xp(4, 12, "week_1").unwrap();
            store.remove_xp(4, 2).unwrap();
        }

        let result = ctx.run(Command::Stats(ShowStats { user: None }), &student(4)).await;
        let text = result.reply_text().unwrap();
        assert!(text.contains("**Current Month XP:** 10 XP"));
        assert!(text.contains("**Total XP:** 12 XP"));
        assert!(text.contains("#2"));

        let other = ShowStats {
            user: Some(Participant::new(5, "top")),
        };
        let result = ctx.run(Command::Stats(other), &student(4)).await;
        assert!(result.reply_text().unwrap().contains("#1"));
    }
}
