//! 进程内事件总线
//!
//! - `SubscriptionRegistry`：事件种类 -> 有序订阅者列表，启动时构建后冻结；
//! - `EventPublisher`：命令持有的发布能力，只向队列追加；
//! - `EventBus`：每个事务边界一个 FIFO 队列，`dispatch` 排空至队列为空，
//!   订阅者在排空过程中发布的事件在同一次排空内按序投递。
//!
use crate::container::{Container, Scope};
use crate::error::{AppError, AppResult};
use crate::subscriber::Subscriber;
use paper_domain::domain_event::{DomainEvent, EventRecord};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    routes: HashMap<&'static str, Vec<Subscriber>>,
}

impl SubscriptionRegistry {
    /// 追加到该种类已有的订阅者之后
    pub fn subscribe(
        &mut self,
        kind: &'static str,
        subscribers: impl IntoIterator<Item = Subscriber>,
    ) {
        self.routes.entry(kind).or_default().extend(subscribers);
    }

    pub fn subscribers(&self, kind: &str) -> &[Subscriber] {
        self.routes.get(kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.routes.keys().copied().collect()
    }

    pub(crate) fn check(&self, container: &Container) -> AppResult<()> {
        self.routes
            .values()
            .flatten()
            .try_for_each(|subscriber| subscriber.check(container))
    }
}

type Queue = Arc<Mutex<VecDeque<EventRecord>>>;

fn lock(queue: &Queue) -> MutexGuard<'_, VecDeque<EventRecord>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 事件发布能力
#[derive(Clone)]
pub struct EventPublisher {
    queue: Queue,
}

impl EventPublisher {
    /// 入队，不立即产生副作用
    pub fn publish<E>(&self, event: E) -> AppResult<()>
    where
        E: DomainEvent,
    {
        let record = EventRecord::from_event(&event)?;
        tracing::debug!(event_kind = record.kind(), "event published");
        lock(&self.queue).push_back(record);
        Ok(())
    }
}

pub struct EventBus {
    queue: Queue,
    registry: Arc<SubscriptionRegistry>,
    drain_limit: Option<usize>,
}

impl EventBus {
    pub fn new(registry: Arc<SubscriptionRegistry>, drain_limit: Option<usize>) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            registry,
            drain_limit,
        }
    }

    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            queue: self.queue.clone(),
        }
    }

    pub fn publish<E>(&self, event: E) -> AppResult<()>
    where
        E: DomainEvent,
    {
        self.publisher().publish(event)
    }

    pub fn pending(&self) -> usize {
        lock(&self.queue).len()
    }

    /// 丢弃所有未投递的事件，返回丢弃数量
    pub fn clear(&self) -> usize {
        let mut queue = lock(&self.queue);
        let discarded = queue.len();
        queue.clear();
        discarded
    }

    /// 排空队列（含排空过程中新发布的事件），返回处理的事件数。
    /// 任一订阅者失败即停止并原样返回错误。
    pub async fn dispatch(&self, scope: &Scope) -> AppResult<usize> {
        let mut processed = 0usize;

        while let Some(record) = self.pop() {
            if let Some(limit) = self.drain_limit {
                if processed >= limit {
                    return Err(AppError::DrainLimitExceeded { limit });
                }
            }
            processed += 1;

            let subscribers = self.registry.subscribers(record.kind());
            if subscribers.is_empty() {
                tracing::trace!(event_kind = record.kind(), "no subscribers");
                continue;
            }

            for subscriber in subscribers {
                tracing::debug!(
                    event_kind = record.kind(),
                    subscriber = subscriber.name(),
                    "delivering event"
                );
                subscriber.deliver(&record, scope).await?;
            }
        }

        Ok(processed)
    }

    fn pop(&self) -> Option<EventRecord> {
        lock(&self.queue).pop_front()
    }
}
