//! PaperAssist 应用层（paper-application）
//!
//! 命令分发与进程内事件通知：
//! - `command` / `command_bus`：根命令、订阅者命令与调用入口；
//! - `capability` / `container`：按声明类型解析协作者，作用域绑定到一次事务边界；
//! - `event_bus` / `subscriber`：可重入、按序排空的事件队列；
//! - `transactional`：flush -> 排空事件 -> 提交，失败时清空队列并回滚；
//! - `commands` / `subscribers`：屏幕、闹钟、设备心跳的具体命令；
//! - `config` / `telemetry` / `bootstrap`：进程启动装配。
//!
pub mod bootstrap;
pub mod capability;
pub mod command;
pub mod command_bus;
pub mod commands;
pub mod config;
pub mod container;
pub mod error;
pub mod event_bus;
pub mod inmemory_command_bus;
pub mod subscriber;
pub mod subscribers;
pub mod telemetry;
pub mod transactional;

pub use inmemory_command_bus::InMemoryCommandBus;

// 允许 `#[derive(Inject)]` 在本 crate 内部也能解析到 ::paper_application 路径
extern crate self as paper_application;
