//! 仓储能力（ports）
//!
//! 每类实体一个异步仓储接口，实现绑定到当前工作单元；
//! 存储层错误以 `DomainError` 原样向上传播。
//!
mod alarm_repository;
mod device_repository;
mod screen_repository;

pub use alarm_repository::AlarmRepository;
pub use device_repository::DeviceRepository;
pub use screen_repository::ScreenRepository;
