//! 领域事件（Domain Event）
//!
//! 定义事件载荷需要实现的最小接口（`DomainEvent`）、事件总线中流转的
//! 类型擦除形态（`EventRecord`），以及屏幕/闹钟/设备三类业务事件。

mod alarm;
mod device;
mod domain_event_trait;
mod event_record;
mod screen;

pub use alarm::{AlarmCreated, AlarmTriggered};
pub use device::DeviceHeartbeatReceived;
pub use domain_event_trait::DomainEvent;
pub use event_record::EventRecord;
pub use screen::{ScreenCreated, ScreenDeleted, ScreenUpdated};
