//! 根命令：屏幕、闹钟与设备心跳
//!
mod alarm;
mod device;
mod screen;

pub use alarm::{CreateAlarm, DeleteAlarm, GetActiveAlarms, ListAlarms, UpdateAlarm};
pub use device::{GetDeviceStatus, RecordHeartbeat};
pub use screen::{
    CreateScreen, DeleteScreen, GetCurrentScreen, GetScreen, ListScreens, UpdateScreen,
};
