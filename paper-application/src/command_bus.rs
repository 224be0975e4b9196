use crate::{command::Command, error::AppResult};
use async_trait::async_trait;
use serde_json::Value;

/// 命令总线（Command Bus）
///
/// - 调用方唯一的入口：按命令类型或名称 + 参数包执行根命令；
/// - 参数包为 JSON 对象，`null` 视为无参数，未知参数名被拒绝；
/// - 框架可提供不同实现（如进程内、消息队列等）；
/// - 该 trait 带有泛型方法，通常以具体实现类型注入使用。
#[async_trait]
pub trait CommandBus: Send + Sync {
    /// 执行命令并返回其类型化结果
    async fn execute<C>(&self, params: Value) -> AppResult<C::Output>
    where
        C: Command;

    /// 按名称执行命令，结果以 JSON 返回（供请求处理层使用）
    async fn execute_named(&self, name: &str, params: Value) -> AppResult<Value>;
}
