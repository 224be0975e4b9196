//! 领域模型：屏幕、闹钟与设备心跳状态
//!
mod alarm;
mod device;
mod screen;

pub use alarm::{Alarm, AlarmId, AlarmStatus};
pub use device::DeviceStatus;
pub use screen::{Screen, ScreenId, ScreenType};

use crate::error::{DomainError, DomainResult};

// 存储列宽约束：超长即视为约束冲突
pub(crate) fn check_len(entity: &str, field: &str, value: &str, max: usize) -> DomainResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::constraint(format!(
            "{entity}.{field} exceeds {max} characters (got {len})"
        )));
    }
    Ok(())
}

pub(crate) fn check_not_blank(entity: &str, field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::constraint(format!("{entity}.{field} must not be empty")));
    }
    Ok(())
}
