use chrono::{DateTime, Utc};
use serde::Serialize;

/// 领域事件载荷需要满足的通用能力边界
///
/// 事件为不可变事实：种类标签 + 若干具名字段 + 构造时确定的发生时间。
/// 通常由 `#[domain_event]` 宏生成实现。
pub trait DomainEvent: Serialize + Send + Sync + 'static {
    /// 事件种类（订阅表的键）
    const KIND: &'static str;

    /// 事件发生时间
    fn occurred_at(&self) -> DateTime<Utc>;
}
