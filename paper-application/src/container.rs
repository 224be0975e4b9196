//! 依赖容器（Container）与事务作用域（Scope）
//!
//! `Container` 在进程启动时构建一次，以 `Arc` 显式传递：持有工作单元工厂、
//! 冻结的订阅表、各仓储能力的工厂与共享对象。
//!
//! `Scope` 对应一次事务边界：惰性开启唯一的工作单元，所有仓储实例都绑定到它；
//! 同时持有本边界私有的事件队列，并发边界之间互不可见。
//!
use crate::error::{AppError, AppResult};
use crate::event_bus::{EventBus, EventPublisher, SubscriptionRegistry};
use crate::subscriber::Subscriber;
use paper_domain::domain_event::DomainEvent;
use paper_domain::error::DomainResult;
use paper_domain::persist::inmemory::{
    InMemoryAlarmRepository, InMemoryDeviceRepository, InMemoryScreenRepository, InMemoryStore,
};
use paper_domain::persist::{UnitOfWork, UnitOfWorkFactory};
use paper_domain::ports::{AlarmRepository, DeviceRepository, ScreenRepository};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// 排空一次事件队列时允许处理的事件数上限缺省值
pub const DEFAULT_DRAIN_LIMIT: usize = 10_000;

type RepositoryFactory<R> =
    Arc<dyn Fn(Arc<dyn UnitOfWork>) -> DomainResult<Arc<R>> + Send + Sync>;

type SharedValue = Arc<dyn Any + Send + Sync>;

pub struct Container {
    sessions: Arc<dyn UnitOfWorkFactory>,
    subscriptions: Arc<SubscriptionRegistry>,
    screens: Option<RepositoryFactory<dyn ScreenRepository>>,
    alarms: Option<RepositoryFactory<dyn AlarmRepository>>,
    devices: Option<RepositoryFactory<dyn DeviceRepository>>,
    shared: HashMap<TypeId, SharedValue>,
    drain_limit: Option<usize>,
}

impl Container {
    pub fn builder(sessions: Arc<dyn UnitOfWorkFactory>) -> ContainerBuilder {
        ContainerBuilder::new(sessions)
    }

    /// 以内存存储预置三类仓储能力
    pub fn in_memory(store: InMemoryStore) -> ContainerBuilder {
        ContainerBuilder::new(Arc::new(store))
            .screens(InMemoryScreenRepository::bind)
            .alarms(InMemoryAlarmRepository::bind)
            .devices(InMemoryDeviceRepository::bind)
    }

    pub fn subscriptions(&self) -> &Arc<SubscriptionRegistry> {
        &self.subscriptions
    }

    pub fn drain_limit(&self) -> Option<usize> {
        self.drain_limit
    }

    pub fn provides_screens(&self) -> bool {
        self.screens.is_some()
    }

    pub fn provides_alarms(&self) -> bool {
        self.alarms.is_some()
    }

    pub fn provides_devices(&self) -> bool {
        self.devices.is_some()
    }

    pub fn shared<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.shared
            .get(&TypeId::of::<T>())
            .and_then(|v| v.clone().downcast::<T>().ok())
    }

    pub(crate) fn begin_session(&self) -> Arc<dyn UnitOfWork> {
        self.sessions.begin()
    }
}

pub struct ContainerBuilder {
    sessions: Arc<dyn UnitOfWorkFactory>,
    registry: SubscriptionRegistry,
    screens: Option<RepositoryFactory<dyn ScreenRepository>>,
    alarms: Option<RepositoryFactory<dyn AlarmRepository>>,
    devices: Option<RepositoryFactory<dyn DeviceRepository>>,
    shared: HashMap<TypeId, SharedValue>,
    drain_limit: Option<usize>,
}

impl ContainerBuilder {
    pub fn new(sessions: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self {
            sessions,
            registry: SubscriptionRegistry::default(),
            screens: None,
            alarms: None,
            devices: None,
            shared: HashMap::new(),
            drain_limit: Some(DEFAULT_DRAIN_LIMIT),
        }
    }

    /// 屏幕仓储工厂；任何实现 `ScreenRepository` 的具体类型都可绑定到该能力
    pub fn screens<R, F>(mut self, factory: F) -> Self
    where
        R: ScreenRepository + 'static,
        F: Fn(Arc<dyn UnitOfWork>) -> DomainResult<R> + Send + Sync + 'static,
    {
        self.screens = Some(Arc::new(move |uow| {
            Ok(Arc::new(factory(uow)?) as Arc<dyn ScreenRepository>)
        }));
        self
    }

    pub fn alarms<R, F>(mut self, factory: F) -> Self
    where
        R: AlarmRepository + 'static,
        F: Fn(Arc<dyn UnitOfWork>) -> DomainResult<R> + Send + Sync + 'static,
    {
        self.alarms = Some(Arc::new(move |uow| {
            Ok(Arc::new(factory(uow)?) as Arc<dyn AlarmRepository>)
        }));
        self
    }

    pub fn devices<R, F>(mut self, factory: F) -> Self
    where
        R: DeviceRepository + 'static,
        F: Fn(Arc<dyn UnitOfWork>) -> DomainResult<R> + Send + Sync + 'static,
    {
        self.devices = Some(Arc::new(move |uow| {
            Ok(Arc::new(factory(uow)?) as Arc<dyn DeviceRepository>)
        }));
        self
    }

    pub fn share<T>(mut self, value: Arc<T>) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.shared.insert(TypeId::of::<T>(), value);
        self
    }

    /// `None` 或 `Some(0)` 表示不设上限
    pub fn drain_limit(mut self, limit: Option<usize>) -> Self {
        self.drain_limit = limit.filter(|l| *l > 0);
        self
    }

    /// 追加订阅者（不替换已有订阅）；重复的订阅者会各自触发
    pub fn subscribe<E>(mut self, subscribers: impl IntoIterator<Item = Subscriber>) -> Self
    where
        E: DomainEvent,
    {
        self.registry.subscribe(E::KIND, subscribers);
        self
    }

    /// 构建容器并冻结订阅表；所有订阅者声明的能力必须可解析
    pub fn build(self) -> AppResult<Container> {
        let container = Container {
            sessions: self.sessions,
            subscriptions: Arc::new(self.registry),
            screens: self.screens,
            alarms: self.alarms,
            devices: self.devices,
            shared: self.shared,
            drain_limit: self.drain_limit,
        };

        container.subscriptions.check(&container)?;
        tracing::debug!(
            event_kinds = container.subscriptions.kinds().len(),
            drain_limit = ?container.drain_limit,
            "container built"
        );
        Ok(container)
    }
}

/// 一次事务边界的作用域
pub struct Scope {
    container: Arc<Container>,
    session: Mutex<Option<Arc<dyn UnitOfWork>>>,
    bus: EventBus,
}

impl Scope {
    pub fn new(container: Arc<Container>) -> Self {
        let bus = EventBus::new(container.subscriptions.clone(), container.drain_limit);
        Self {
            container,
            session: Mutex::new(None),
            bus,
        }
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// 当前工作单元；尚未开启或已不可用时开启新的
    pub fn session(&self) -> Arc<dyn UnitOfWork> {
        let mut slot = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(uow) if uow.is_active() => uow.clone(),
            _ => {
                let uow = self.container.begin_session();
                *slot = Some(uow.clone());
                uow
            }
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn publisher(&self) -> EventPublisher {
        self.bus.publisher()
    }

    pub fn screens(&self) -> AppResult<Arc<dyn ScreenRepository>> {
        let factory = self.container.screens.as_ref().ok_or(AppError::CapabilityUnavailable {
            capability: "ScreenRepository",
        })?;
        Ok(factory(self.session())?)
    }

    pub fn alarms(&self) -> AppResult<Arc<dyn AlarmRepository>> {
        let factory = self.container.alarms.as_ref().ok_or(AppError::CapabilityUnavailable {
            capability: "AlarmRepository",
        })?;
        Ok(factory(self.session())?)
    }

    pub fn devices(&self) -> AppResult<Arc<dyn DeviceRepository>> {
        let factory = self.container.devices.as_ref().ok_or(AppError::CapabilityUnavailable {
            capability: "DeviceRepository",
        })?;
        Ok(factory(self.session())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Capability, Inject, Shared};
    use paper_domain::model::Screen;

    #[derive(Inject)]
    struct ScreenAndEvents {
        screens: Arc<dyn ScreenRepository>,
        events: EventPublisher,
    }

    #[tokio::test]
    async fn repositories_in_one_scope_share_the_session() {
        let store = InMemoryStore::new();
        let container = Arc::new(Container::in_memory(store.clone()).build().unwrap());
        let scope = Scope::new(container);

        let first = scope.screens().unwrap();
        let second = scope.screens().unwrap();
        let screen = first
            .create(Screen::builder().title("Agenda").build())
            .await
            .unwrap();

        assert!(second.get_by_id(&screen.id).await.unwrap().is_some());
        assert_eq!(store.open_sessions(), 1);
    }

    #[tokio::test]
    async fn closed_session_is_replaced_on_next_access() {
        let store = InMemoryStore::new();
        let scope = Scope::new(Arc::new(Container::in_memory(store.clone()).build().unwrap()));

        let first = scope.session();
        first.close().await.unwrap();
        let second = scope.session();

        assert!(second.is_active());
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn derived_inject_resolves_every_field() {
        let container = Arc::new(Container::in_memory(InMemoryStore::new()).build().unwrap());
        assert!(<ScreenAndEvents as Inject>::check(&container).is_ok());

        let deps = ScreenAndEvents::inject(&Scope::new(container)).unwrap();
        let _ = (deps.screens, deps.events);
    }

    #[test]
    fn missing_repository_is_reported_by_name() {
        let container = Container::builder(Arc::new(InMemoryStore::new()))
            .build()
            .unwrap();

        let err = <Arc<dyn ScreenRepository> as Capability>::check(&container).unwrap_err();
        assert!(matches!(
            err,
            AppError::CapabilityUnavailable {
                capability: "ScreenRepository"
            }
        ));
        assert!(Scope::new(Arc::new(container)).screens().is_err());
    }

    #[test]
    fn shared_values_resolve_by_type() {
        let container = Container::builder(Arc::new(InMemoryStore::new()))
            .share(Arc::new(String::from("audit")))
            .build()
            .unwrap();
        let scope = Scope::new(Arc::new(container));

        let shared = Shared::<String>::resolve(&scope).unwrap();
        assert_eq!(shared.as_str(), "audit");
        assert!(Shared::<u64>::resolve(&scope).is_err());
    }
}
