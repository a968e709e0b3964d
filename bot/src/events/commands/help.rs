use crate::messages::MsgCategory;

use super::*;

/// Command guide with the XP amounts currently configured.
#[derive(Debug, Clone)]
pub struct ShowHelp;

impl ShowHelp {
    pub async fn execute(&self, context: &Context) -> anyhow::Result<EventResult> {
        let xp = &context.settings.xp;
        context.reply(
            MsgCategory::Help,
            vec![
                ("first", xp.first.to_string()),
                ("second", xp.second.to_string()),
                ("third", xp.third.to_string()),
                ("participation", xp.participation.to_string()),
            ],
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use shared::XpTable;
    use tempfile::TempDir;

    use crate::{config::Settings, messages::MessageLoader, store::Store};

    use super::super::tests::*;
    use super::*;

    #[tokio::test]
    async fn anyone_can_read_the_guide() {
        let ctx = TestContext::new();
        let result = ctx.run(Command::Help(ShowHelp), &student(9)).await;
        let EventResult::Replied { reply, announcement } = result else {
            panic!("expected a reply");
        };
        assert!(announcement.is_none());
        assert!(!reply.ephemeral);
        assert!(reply.text.contains("/leaderboard"));
        assert!(reply.text.contains("/resetmonth"));
        assert!(reply.text.contains("**1st Place:** 10 XP"));
        assert!(reply.text.contains("**Participation:** 2 XP"));
        assert!(reply.text.contains("#code-wars-submissions"));
        assert!(!reply.text.contains('{'));
    }

    #[tokio::test]
    async fn guide_follows_configured_xp() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            xp: XpTable {
                first: 25,
                ..Default::default()
            },
            ..Default::default()
        };
        let messages =
            MessageLoader::load_from_str(include_str!("../../../Messages.toml"), &settings)
                .unwrap();
        let context = Context::new(Store::open(dir.path()).unwrap(), messages, settings);

        let result = Command::Help(ShowHelp)
            .execute(context, &student(9))
            .await
            .unwrap();
        assert!(result.reply_text().unwrap().contains("**1st Place:** 25 XP"));
    }
}
