use paper_application::capability::{Inject, Shared};
use paper_application::container::{Container, Scope};
use paper_application::event_bus::EventPublisher;
use paper_domain::persist::inmemory::InMemoryStore;
use paper_domain::ports::{AlarmRepository, ScreenRepository};
use std::sync::Arc;

#[derive(Inject)]
struct Deps {
    screens: Arc<dyn ScreenRepository>,
    alarms: Arc<dyn AlarmRepository>,
    events: EventPublisher,
    greeting: Shared<String>,
}

fn main() {
    let container = Container::in_memory(InMemoryStore::new())
        .share(Arc::new("hello".to_string()))
        .build()
        .unwrap();
    assert!(<Deps as Inject>::check(&container).is_ok());

    let scope = Scope::new(Arc::new(container));
    let deps = Deps::inject(&scope).unwrap();
    assert_eq!(deps.greeting.as_str(), "hello");
    let _ = (deps.screens, deps.alarms, deps.events);
}
