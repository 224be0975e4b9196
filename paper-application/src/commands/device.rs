use crate::capability::Inject;
use crate::command::Command;
use crate::error::AppResult;
use crate::event_bus::EventPublisher;
use async_trait::async_trait;
use paper_domain::domain_event::DeviceHeartbeatReceived;
use paper_domain::model::DeviceStatus;
use paper_domain::ports::DeviceRepository;
use paper_macros::command;
use std::sync::Arc;

#[command]
pub struct GetDeviceStatus {
    pub device_id: String,
}

#[async_trait]
impl Command for GetDeviceStatus {
    const NAME: &'static str = "GetDeviceStatus";
    type Deps = (Arc<dyn DeviceRepository>,);
    type Output = Option<DeviceStatus>;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        let (devices,) = deps;
        Ok(devices.get_status(&self.device_id).await?)
    }
}

#[derive(Inject)]
pub struct HeartbeatDeps {
    pub devices: Arc<dyn DeviceRepository>,
    pub events: EventPublisher,
}

/// 设备心跳：按 `device_id` 插入或刷新状态
#[command]
pub struct RecordHeartbeat {
    pub device_id: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub firmware_version: String,
    pub battery_level: Option<i32>,
}

#[async_trait]
impl Command for RecordHeartbeat {
    const NAME: &'static str = "RecordHeartbeat";
    type Deps = HeartbeatDeps;
    type Output = DeviceStatus;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        let status = DeviceStatus::builder()
            .device_id(self.device_id)
            .ip_address(self.ip_address)
            .firmware_version(self.firmware_version)
            .maybe_battery_level(self.battery_level)
            .build();

        let status = deps.devices.upsert_heartbeat(status).await?;
        deps.events
            .publish(DeviceHeartbeatReceived::new(status.device_id.clone()))?;
        Ok(status)
    }
}
