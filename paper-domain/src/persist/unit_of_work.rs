use crate::error::DomainResult;
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

/// 工作单元（会话）
///
/// 每个事务边界恰有一个存活的工作单元。所有操作均可能失败，
/// 失败原样向上传播。
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// 应用待写入的变更，约束冲突在此暴露
    async fn flush(&self) -> DomainResult<()>;

    async fn commit(&self) -> DomainResult<()>;

    async fn rollback(&self) -> DomainResult<()>;

    /// 释放会话；重复调用无副作用
    async fn close(&self) -> DomainResult<()>;

    /// 会话是否仍可使用（未关闭）
    fn is_active(&self) -> bool;

    /// 供具体仓储实现向下转型，绑定到自身存储后端的会话类型
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// 工作单元工厂：按需开启新会话
pub trait UnitOfWorkFactory: Send + Sync {
    fn begin(&self) -> Arc<dyn UnitOfWork>;
}
