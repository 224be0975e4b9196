use super::{check_len, check_not_blank};
use crate::entity::Entity;
use crate::error::DomainResult;
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 设备最近一次心跳的状态快照，以 `device_id` 唯一
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    #[builder(default = Uuid::new_v4())]
    pub id: Uuid,
    #[builder(into)]
    pub device_id: String,
    #[builder(into, default)]
    pub ip_address: String,
    #[builder(into, default)]
    pub firmware_version: String,
    pub battery_level: Option<i32>,
    #[builder(default = Utc::now())]
    pub last_seen: DateTime<Utc>,
}

impl DeviceStatus {
    pub fn check_constraints(&self) -> DomainResult<()> {
        check_not_blank(Self::TYPE, "device_id", &self.device_id)?;
        check_len(Self::TYPE, "device_id", &self.device_id, 100)?;
        check_len(Self::TYPE, "ip_address", &self.ip_address, 45)?;
        check_len(Self::TYPE, "firmware_version", &self.firmware_version, 50)
    }
}

impl Entity for DeviceStatus {
    type Id = Uuid;
    const TYPE: &'static str = "device_status";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
