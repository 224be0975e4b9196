use anyhow::Result;
use async_trait::async_trait;
use paper_application::InMemoryCommandBus;
use paper_application::capability::Shared;
use paper_application::command::{Command, SubscriberCommand};
use paper_application::command_bus::CommandBus;
use paper_application::container::{Container, ContainerBuilder};
use paper_application::error::{AppError, AppResult};
use paper_application::event_bus::EventPublisher;
use paper_application::subscriber::Subscriber;
use paper_domain::domain_event::ScreenCreated;
use paper_domain::error::{DomainError, DomainResult};
use paper_domain::model::{Screen, ScreenId};
use paper_domain::persist::UnitOfWork;
use paper_domain::persist::inmemory::{InMemoryScreenRepository, InMemoryStore, Stage};
use paper_domain::ports::ScreenRepository;
use paper_macros::{command, domain_event, subscriber_command};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;

#[derive(Default)]
struct Journal(Mutex<Vec<String>>);

impl Journal {
    fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[domain_event(kind = "Audited")]
struct Audited {
    screen_id: ScreenId,
}

#[command]
struct AddScreen {
    title: String,
}

#[async_trait]
impl Command for AddScreen {
    const NAME: &'static str = "AddScreen";
    type Deps = (Arc<dyn ScreenRepository>, EventPublisher);
    type Output = ScreenId;

    async fn handle(self, deps: Self::Deps) -> AppResult<ScreenId> {
        let (screens, events) = deps;
        let screen = screens.create(Screen::builder().title(self.title).build()).await?;
        events.publish(ScreenCreated::new(screen.id))?;
        Ok(screen.id)
    }
}

/// 写入并发布事件后拒绝
#[command]
struct AddThenRefuse {
    title: String,
}

#[async_trait]
impl Command for AddThenRefuse {
    const NAME: &'static str = "AddThenRefuse";
    type Deps = (Arc<dyn ScreenRepository>, EventPublisher);
    type Output = ();

    async fn handle(self, deps: Self::Deps) -> AppResult<()> {
        let (screens, events) = deps;
        let screen = screens.create(Screen::builder().title(self.title).build()).await?;
        events.publish(ScreenCreated::new(screen.id))?;
        Err(AppError::Validation("refused after write".into()))
    }
}

#[subscriber_command]
struct AuditCreated {
    screen_id: Option<ScreenId>,
}

#[async_trait]
impl SubscriberCommand for AuditCreated {
    const NAME: &'static str = "AuditCreated";
    type Deps = (Shared<Journal>, EventPublisher);

    async fn handle(self, deps: Self::Deps) -> AppResult<()> {
        let (journal, events) = deps;
        journal.push("audit");
        match self.screen_id {
            Some(id) => events.publish(Audited::new(id)),
            None => Ok(()),
        }
    }
}

#[subscriber_command]
struct NoteCreated {}

#[async_trait]
impl SubscriberCommand for NoteCreated {
    const NAME: &'static str = "NoteCreated";
    type Deps = (Shared<Journal>,);

    async fn handle(self, deps: Self::Deps) -> AppResult<()> {
        deps.0.push("note");
        Ok(())
    }
}

/// 二级订阅者：记录执行时存储是否已提交
#[subscriber_command]
struct CheckUncommitted {
    screen_id: Option<ScreenId>,
}

#[async_trait]
impl SubscriberCommand for CheckUncommitted {
    const NAME: &'static str = "CheckUncommitted";
    type Deps = (Shared<Journal>, Shared<InMemoryStore>, Arc<dyn ScreenRepository>);

    async fn handle(self, deps: Self::Deps) -> AppResult<()> {
        let (journal, store, screens) = deps;
        let id = self.screen_id.ok_or_else(|| AppError::Validation("no id".into()))?;
        let in_session = screens.get_by_id(&id).await?.is_some();
        journal.push(format!(
            "checked committed={} in_session={in_session}",
            store.screen(&id).is_some()
        ));
        Ok(())
    }
}

#[subscriber_command]
struct Explode {}

#[async_trait]
impl SubscriberCommand for Explode {
    const NAME: &'static str = "Explode";
    type Deps = ();

    async fn handle(self, _deps: Self::Deps) -> AppResult<()> {
        Err(AppError::Validation("subscriber failed".into()))
    }
}

fn base(store: &InMemoryStore, journal: &Arc<Journal>) -> ContainerBuilder {
    Container::in_memory(store.clone())
        .share(journal.clone())
        .share(Arc::new(store.clone()))
}

fn bus_over(builder: ContainerBuilder) -> Result<InMemoryCommandBus> {
    let bus = InMemoryCommandBus::new(Arc::new(builder.build()?));
    bus.register::<AddScreen>()?;
    bus.register::<AddThenRefuse>()?;
    Ok(bus)
}

#[tokio::test]
async fn subscribers_and_cascade_run_before_commit() -> Result<()> {
    let store = InMemoryStore::new();
    let journal = Arc::new(Journal::default());
    let bus = bus_over(
        base(&store, &journal)
            .subscribe::<ScreenCreated>([
                Subscriber::of::<AuditCreated>(),
                Subscriber::of::<NoteCreated>(),
            ])
            .subscribe::<Audited>([Subscriber::of::<CheckUncommitted>()]),
    )?;

    let id = bus.execute::<AddScreen>(json!({ "title": "Weather" })).await?;

    assert_eq!(
        journal.entries(),
        ["audit", "note", "checked committed=false in_session=true"]
    );
    assert_eq!(store.screen(&id).map(|s| s.title), Some("Weather".to_string()));
    assert_eq!(store.commits(), 1);
    assert_eq!(store.open_sessions(), 0);
    Ok(())
}

#[tokio::test]
async fn failing_handler_leaves_no_writes_and_delivers_nothing() -> Result<()> {
    let store = InMemoryStore::new();
    let journal = Arc::new(Journal::default());
    let bus = bus_over(
        base(&store, &journal).subscribe::<ScreenCreated>([Subscriber::of::<NoteCreated>()]),
    )?;

    let err = bus
        .execute::<AddThenRefuse>(json!({ "title": "Ghost" }))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(msg) if msg == "refused after write"));
    assert!(journal.entries().is_empty());
    assert_eq!(store.screen_count(), 0);
    assert_eq!(store.rollbacks(), 1);
    assert_eq!(store.open_sessions(), 0);
    Ok(())
}

#[tokio::test]
async fn flush_failure_discards_queued_event() -> Result<()> {
    let store = InMemoryStore::new();
    let journal = Arc::new(Journal::default());
    let bus = bus_over(
        base(&store, &journal).subscribe::<ScreenCreated>([Subscriber::of::<NoteCreated>()]),
    )?;

    store.fail_next(Stage::Flush);
    let err = bus
        .execute::<AddScreen>(json!({ "title": "Lost" }))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::Fault { stage: "flush" })
    ));

    let err = bus
        .execute::<AddScreen>(json!({ "title": "x".repeat(201) }))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::Constraint { .. })));

    assert!(journal.entries().is_empty());
    assert_eq!(store.screen_count(), 0);
    assert_eq!(store.open_sessions(), 0);

    // 后续无关边界不会收到残留事件
    bus.execute::<AddScreen>(json!({ "title": "Kept" })).await?;
    assert_eq!(journal.entries(), ["note"]);
    assert_eq!(store.screen_count(), 1);
    Ok(())
}

#[tokio::test]
async fn commit_failure_rolls_back_after_subscribers_ran() -> Result<()> {
    let store = InMemoryStore::new();
    let journal = Arc::new(Journal::default());
    let bus = bus_over(
        base(&store, &journal).subscribe::<ScreenCreated>([Subscriber::of::<NoteCreated>()]),
    )?;

    store.fail_next(Stage::Commit);
    let err = bus
        .execute::<AddScreen>(json!({ "title": "Unsaved" }))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Domain(DomainError::Fault { stage: "commit" })
    ));
    // 提交前的分发已完成
    assert_eq!(journal.entries(), ["note"]);
    assert_eq!(store.screen_count(), 0);
    assert_eq!(store.commits(), 0);
    assert_eq!(store.rollbacks(), 1);
    assert_eq!(store.open_sessions(), 0);

    bus.execute::<AddScreen>(json!({ "title": "Saved" })).await?;
    assert_eq!(journal.entries(), ["note", "note"]);
    assert_eq!(store.screen_count(), 1);
    assert_eq!(store.commits(), 1);
    Ok(())
}

#[tokio::test]
async fn subscriber_failure_rolls_back_root_writes() -> Result<()> {
    let store = InMemoryStore::new();
    let journal = Arc::new(Journal::default());
    let bus = bus_over(base(&store, &journal).subscribe::<ScreenCreated>([
        Subscriber::of::<NoteCreated>(),
        Subscriber::of::<Explode>(),
        Subscriber::of::<NoteCreated>(),
    ]))?;

    let err = bus
        .execute::<AddScreen>(json!({ "title": "Doomed" }))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(msg) if msg == "subscriber failed"));
    assert_eq!(journal.entries(), ["note"]);
    assert_eq!(store.screen_count(), 0);
    assert_eq!(store.commits(), 0);
    Ok(())
}

/// 更窄的具体仓储：包装内存仓储并计数创建次数
struct CountingScreens {
    inner: InMemoryScreenRepository,
    creates: Arc<AtomicUsize>,
}

#[async_trait]
impl ScreenRepository for CountingScreens {
    async fn get_all(&self) -> DomainResult<Vec<Screen>> {
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: &ScreenId) -> DomainResult<Option<Screen>> {
        self.inner.get_by_id(id).await
    }

    async fn get_current(&self) -> DomainResult<Option<Screen>> {
        self.inner.get_current().await
    }

    async fn create(&self, screen: Screen) -> DomainResult<Screen> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(screen).await
    }

    async fn update(&self, screen: Screen) -> DomainResult<Screen> {
        self.inner.update(screen).await
    }

    async fn delete(&self, id: &ScreenId) -> DomainResult<bool> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn interface_slot_receives_registered_concrete_repository() -> Result<()> {
    let store = InMemoryStore::new();
    let creates = Arc::new(AtomicUsize::new(0));
    let counter = creates.clone();
    let builder = Container::in_memory(store.clone()).screens(move |uow: Arc<dyn UnitOfWork>| {
        Ok(CountingScreens {
            inner: InMemoryScreenRepository::bind(uow)?,
            creates: counter.clone(),
        })
    });
    let bus = InMemoryCommandBus::new(Arc::new(builder.build()?));
    bus.register::<AddScreen>()?;

    let id = bus.execute::<AddScreen>(json!({ "title": "Counted" })).await?;

    assert_eq!(creates.load(Ordering::SeqCst), 1);
    assert!(store.screen(&id).is_some());
    Ok(())
}

#[tokio::test]
async fn caller_errors_are_rejected_before_any_session_opens() -> Result<()> {
    let store = InMemoryStore::new();
    let journal = Arc::new(Journal::default());
    let bus = bus_over(base(&store, &journal))?;

    let err = bus
        .execute::<AddScreen>(json!({ "title": "A", "colour": "red" }))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(msg) if msg.contains("colour")));

    let err = bus.execute::<AddScreen>(json!(["A"])).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = bus.execute_named("Teleport", json!({})).await.unwrap_err();
    assert!(matches!(err, AppError::HandlerNotFound(name) if name == "Teleport"));

    assert_eq!(store.commits() + store.rollbacks(), 0);
    assert_eq!(store.open_sessions(), 0);
    Ok(())
}

#[tokio::test]
async fn registration_rejects_duplicates_and_unresolvable_needs() -> Result<()> {
    let store = InMemoryStore::new();
    let journal = Arc::new(Journal::default());
    let bus = bus_over(base(&store, &journal))?;

    assert!(matches!(
        bus.register::<AddScreen>(),
        Err(AppError::AlreadyRegisteredCommand { command: "AddScreen" })
    ));

    let bare = InMemoryCommandBus::new(Arc::new(
        Container::builder(Arc::new(store.clone())).build()?,
    ));
    assert!(matches!(
        bare.register::<AddScreen>(),
        Err(AppError::CapabilityUnavailable {
            capability: "ScreenRepository"
        })
    ));
    assert!(bare.registered_commands().is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_boundaries_keep_their_events_apart() -> Result<()> {
    let store = InMemoryStore::new();
    let journal = Arc::new(Journal::default());
    let bus = Arc::new(bus_over(
        base(&store, &journal).subscribe::<ScreenCreated>([Subscriber::of::<NoteCreated>()]),
    )?);

    let mut set = JoinSet::new();
    for i in 0..8 {
        let bus = bus.clone();
        set.spawn(async move {
            bus.execute::<AddScreen>(json!({ "title": format!("screen-{i}") }))
                .await
        });
    }
    while let Some(joined) = set.join_next().await {
        joined??;
    }

    assert_eq!(journal.entries().len(), 8);
    assert_eq!(store.screen_count(), 8);
    assert_eq!(store.open_sessions(), 0);
    Ok(())
}
