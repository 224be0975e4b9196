//! 持久化（persist）
//!
//! - `UnitOfWork` / `UnitOfWorkFactory`：一个事务边界内与存储的会话；
//! - `inmemory`：带工作副本与写日志的内存事务存储，供测试与演示使用。
//!
//! 具体存储后端（如 Postgres）由上层实现这两个接口并注入容器。
//!
pub mod inmemory;
mod unit_of_work;

pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory};
