//! PaperAssist 领域层（paper-domain）
//!
//! - 实体建模（`entity`、`model`）：屏幕、闹钟与设备心跳状态；
//! - 领域事件（`domain_event`）：不可变事实与类型擦除的 `EventRecord`；
//! - 仓储能力（`ports`）：应用层命令依赖的异步接口；
//! - 持久化（`persist`）：工作单元协议与内存事务存储。
//!
//! 本 crate 不感知命令分发与事件总线，仅定义领域对象、接口与错误类型，
//! 以便在不同存储后端上进行适配实现。
//!
pub mod domain_event;
pub mod entity;
pub mod error;
pub mod model;
pub mod persist;
pub mod ports;

// 允许在本 crate 内部通过 ::paper_domain 进行自引用，
// 以便过程宏在本 crate 中也能解析到 ::paper_domain 路径。
extern crate self as paper_domain;
