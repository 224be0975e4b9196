use crate::capability::Inject;
use crate::command::SubscriberCommand;
use crate::container::{Container, Scope};
use crate::error::{AppError, AppResult};
use paper_domain::domain_event::EventRecord;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

type SubscriberFuture<'a> = Pin<Box<dyn Future<Output = AppResult<()>> + Send + 'a>>;

type SubscriberFn = for<'a> fn(&'a EventRecord, &'a Scope) -> SubscriberFuture<'a>;

/// 类型擦除的订阅者：事件字段 -> 订阅者命令 -> 注入 -> handle
#[derive(Clone, Copy)]
pub struct Subscriber {
    name: &'static str,
    handler: SubscriberFn,
    check: fn(&Container) -> AppResult<()>,
}

impl Subscriber {
    pub fn of<S>() -> Self
    where
        S: SubscriberCommand,
    {
        Self {
            name: S::NAME,
            handler: call::<S>,
            check: <S::Deps as Inject>::check,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn check(&self, container: &Container) -> AppResult<()> {
        (self.check)(container)
    }

    pub(crate) async fn deliver(&self, record: &EventRecord, scope: &Scope) -> AppResult<()> {
        (self.handler)(record, scope).await
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscriber").field(&self.name).finish()
    }
}

fn call<'a, S>(record: &'a EventRecord, scope: &'a Scope) -> SubscriberFuture<'a>
where
    S: SubscriberCommand,
{
    Box::pin(async move {
        let command: S = record.params().map_err(|err| AppError::SubscriberParams {
            subscriber: S::NAME,
            event: record.kind(),
            reason: err.to_string(),
        })?;
        let deps = S::Deps::inject(scope)?;
        command.handle(deps).await
    })
}
