use crate::command::SubscriberCommand;
use crate::error::AppResult;
use async_trait::async_trait;
use paper_macros::subscriber_command;

#[subscriber_command]
pub struct LogHeartbeat {
    pub device_id: String,
}

#[async_trait]
impl SubscriberCommand for LogHeartbeat {
    const NAME: &'static str = "LogHeartbeat";
    type Deps = ();

    async fn handle(self, _deps: Self::Deps) -> AppResult<()> {
        tracing::info!(device_id = %self.device_id, "heartbeat received");
        Ok(())
    }
}
