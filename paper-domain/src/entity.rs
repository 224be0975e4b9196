//! 实体（Entity）基础抽象
//!
//! 为屏幕、闹钟与设备状态提供统一的标识能力，仓储按标识进行 CRUD。
//!
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// 具备唯一标识的实体抽象
pub trait Entity: Clone + Send + Sync + 'static {
    /// 实体标识类型，要求可显示、可比较与可哈希
    type Id: Clone + Display + Debug + Eq + Hash + Send + Sync;

    /// 实体类型名（用于日志与错误信息）
    const TYPE: &'static str;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;
}
