//! 订阅者命令
//!
mod device;
mod screen;

pub use device::LogHeartbeat;
pub use screen::LogScreenCreated;
