use crate::command::SubscriberCommand;
use crate::error::AppResult;
use async_trait::async_trait;
use paper_domain::model::ScreenId;
use paper_macros::subscriber_command;

#[subscriber_command]
pub struct LogScreenCreated {
    pub screen_id: Option<ScreenId>,
}

#[async_trait]
impl SubscriberCommand for LogScreenCreated {
    const NAME: &'static str = "LogScreenCreated";
    type Deps = ();

    async fn handle(self, _deps: Self::Deps) -> AppResult<()> {
        tracing::info!(screen_id = ?self.screen_id, "screen created");
        Ok(())
    }
}
