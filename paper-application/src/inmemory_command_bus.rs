use crate::capability::Inject;
use crate::command::Command;
use crate::command_bus::CommandBus;
use crate::container::{Container, Scope};
use crate::error::{AppError, AppResult};
use crate::transactional;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::any::{Any, TypeId, type_name};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::Instrument;

type BoxAnySend = Box<dyn Any + Send>;

type CommandFuture = Pin<Box<dyn Future<Output = AppResult<BoxAnySend>> + Send>>;

type CommandFn = fn(Arc<Container>, Value) -> CommandFuture;

type EncodeFn = fn(BoxAnySend) -> AppResult<Value>;

#[derive(Clone, Copy)]
struct Entry {
    type_id: TypeId,
    run: CommandFn,
    encode: EncodeFn,
}

/// 基于内存的 CommandBus 实现
/// - 按命令名称注册，注册时校验命令声明的能力均可解析
/// - 每次执行：解析参数 -> 开启事务作用域 -> 注入 -> handle
/// - 运行时以类型擦除（Any）方式进行调度，并在调用端还原结果
pub struct InMemoryCommandBus {
    container: Arc<Container>,
    handlers: DashMap<&'static str, Entry>,
}

impl InMemoryCommandBus {
    pub fn new(container: Arc<Container>) -> Self {
        Self {
            container,
            handlers: DashMap::new(),
        }
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// 注册根命令
    pub fn register<C>(&self) -> AppResult<()>
    where
        C: Command,
    {
        C::Deps::check(&self.container)?;

        if self.handlers.contains_key(C::NAME) {
            return Err(AppError::AlreadyRegisteredCommand { command: C::NAME });
        }

        self.handlers.insert(
            C::NAME,
            Entry {
                type_id: TypeId::of::<C>(),
                run: run_erased::<C>,
                encode: encode::<C>,
            },
        );

        Ok(())
    }

    /// 获取已注册的命令名列表（只读视图）
    pub fn registered_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.iter().map(|e| *e.key()).collect();
        names.sort_unstable();
        names
    }

    fn entry(&self, name: &str) -> AppResult<Entry> {
        self.handlers
            .get(name)
            .map(|e| *e.value())
            .ok_or_else(|| AppError::HandlerNotFound(name.to_string()))
    }
}

#[async_trait]
impl CommandBus for InMemoryCommandBus {
    async fn execute<C>(&self, params: Value) -> AppResult<C::Output>
    where
        C: Command,
    {
        let entry = self.entry(C::NAME)?;
        if entry.type_id != TypeId::of::<C>() {
            return Err(AppError::TypeMismatch {
                expected: type_name::<C>(),
                found: C::NAME,
            });
        }

        let out = (entry.run)(self.container.clone(), params).await?;

        match out.downcast::<C::Output>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(AppError::TypeMismatch {
                expected: type_name::<C::Output>(),
                found: "unknown",
            }),
        }
    }

    async fn execute_named(&self, name: &str, params: Value) -> AppResult<Value> {
        let entry = self.entry(name)?;
        let out = (entry.run)(self.container.clone(), params).await?;
        (entry.encode)(out)
    }
}

/// 参数包 -> 强类型命令；未知参数名、类型不符均为调用方错误
fn parse_params<C>(params: Value) -> AppResult<C>
where
    C: Command,
{
    let bag = match params {
        Value::Null => Value::Object(Map::new()),
        Value::Object(map) => Value::Object(map),
        other => {
            return Err(AppError::Validation(format!(
                "{}: parameters must be an object, got {other}",
                C::NAME
            )));
        }
    };

    serde_json::from_value(bag).map_err(|err| AppError::Validation(format!("{}: {err}", C::NAME)))
}

async fn run_command<C>(container: Arc<Container>, params: Value) -> AppResult<C::Output>
where
    C: Command,
{
    // 参数校验先于任何持久化副作用
    let command = parse_params::<C>(params)?;

    let scope = Scope::new(container);
    transactional::run(&scope, async {
        let deps = C::Deps::inject(&scope)?;
        command.handle(deps).await
    })
    .await
}

fn run_erased<C>(container: Arc<Container>, params: Value) -> CommandFuture
where
    C: Command,
{
    let span = tracing::info_span!("command", command = C::NAME);
    Box::pin(
        async move {
            tracing::debug!("executing");
            match run_command::<C>(container, params).await {
                Ok(out) => Ok(Box::new(out) as BoxAnySend),
                Err(err) => {
                    tracing::debug!(error = %err, "command failed");
                    Err(err)
                }
            }
        }
        .instrument(span),
    )
}

fn encode<C>(out: BoxAnySend) -> AppResult<Value>
where
    C: Command,
{
    match out.downcast::<C::Output>() {
        Ok(value) => Ok(serde_json::to_value(*value)?),
        Err(_) => Err(AppError::TypeMismatch {
            expected: type_name::<C::Output>(),
            found: "unknown",
        }),
    }
}
