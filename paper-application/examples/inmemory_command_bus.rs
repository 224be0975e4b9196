use async_trait::async_trait;
use paper_application::InMemoryCommandBus;
use paper_application::command::{Command, SubscriberCommand};
use paper_application::command_bus::CommandBus;
use paper_application::container::Container;
use paper_application::error::{AppError, AppResult};
use paper_application::event_bus::EventPublisher;
use paper_application::subscriber::Subscriber;
use paper_domain::domain_event::ScreenCreated;
use paper_domain::model::{Screen, ScreenId};
use paper_domain::persist::inmemory::InMemoryStore;
use paper_domain::ports::ScreenRepository;
use paper_macros::{command, subscriber_command};
use serde_json::json;
use std::sync::Arc;

#[command]
struct PinScreen {
    title: String,
}

#[async_trait]
impl Command for PinScreen {
    const NAME: &'static str = "PinScreen";
    type Deps = (Arc<dyn ScreenRepository>, EventPublisher);
    type Output = ScreenId;

    async fn handle(self, deps: Self::Deps) -> AppResult<ScreenId> {
        let (screens, events) = deps;
        let screen = screens
            .create(Screen::builder().title(self.title).display_order(-1).build())
            .await?;
        events.publish(ScreenCreated::new(screen.id))?;
        Ok(screen.id)
    }
}

#[subscriber_command]
struct Announce {
    screen_id: Option<ScreenId>,
}

#[async_trait]
impl SubscriberCommand for Announce {
    const NAME: &'static str = "Announce";
    type Deps = ();

    async fn handle(self, _deps: Self::Deps) -> AppResult<()> {
        println!("pinned screen {:?} (not yet committed)", self.screen_id);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = InMemoryStore::new();
    let container = Container::in_memory(store.clone())
        .subscribe::<ScreenCreated>([Subscriber::of::<Announce>()])
        .build()?;

    let bus = InMemoryCommandBus::new(Arc::new(container));
    bus.register::<PinScreen>()?;

    let id = bus.execute::<PinScreen>(json!({ "title": "Notice" })).await?;
    println!("committed: {:?}", store.screen(&id).map(|s| s.title));

    // 未注册的命令 -> 返回 HandlerNotFound 错误
    if let Err(AppError::HandlerNotFound(name)) = bus.execute_named("UnpinScreen", json!({})).await {
        eprintln!("HandlerNotFound as expected for command: {}", name);
    }
    Ok(())
}
