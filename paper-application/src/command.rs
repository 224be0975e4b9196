use crate::capability::Inject;
use crate::error::AppResult;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// 根命令（Root Command）
///
/// 由调用方按名称 + 参数包触发的一次应用逻辑。
/// - 参数即命令自身字段，从参数包反序列化（通常由 `#[command]` 声明，未知参数名被拒绝）；
/// - 协作者通过 `Deps` 显式声明，由容器在事务边界内解析；
/// - `handle` 恰好运行在一个事务边界内，边界由分发器负责开启。
///
/// 关联常量：
/// - `NAME`：命令的稳定名称，用于按名调用、日志与追踪。避免依赖 `type_name::<T>()`。
#[async_trait]
pub trait Command: DeserializeOwned + Send + 'static {
    /// 命令的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;

    /// 协作者声明
    type Deps: Inject;

    /// 执行结果；读操作用 `Option` 表达“不存在”
    type Output: Serialize + Send + 'static;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output>;
}

/// 订阅者命令（Subscriber Command）
///
/// 形状与根命令相同，但参数按字段名取自事件（通常由 `#[subscriber_command]` 声明），
/// 只由事件总线在排空时调用，运行于触发它的根命令所在的同一事务边界内，
/// 从不自行开启边界。
#[async_trait]
pub trait SubscriberCommand: DeserializeOwned + Send + 'static {
    const NAME: &'static str;

    type Deps: Inject;

    async fn handle(self, deps: Self::Deps) -> AppResult<()>;
}
