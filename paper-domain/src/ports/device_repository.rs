use crate::error::DomainResult;
use crate::model::DeviceStatus;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait DeviceRepository: Send + Sync {
    async fn get_status(&self, device_id: &str) -> DomainResult<Option<DeviceStatus>>;

    /// 按 `device_id` 插入或覆盖，`last_seen` 取写入时刻
    async fn upsert_heartbeat(&self, status: DeviceStatus) -> DomainResult<DeviceStatus>;
}

#[async_trait]
impl<T> DeviceRepository for Arc<T>
where
    T: DeviceRepository + ?Sized,
{
    async fn get_status(&self, device_id: &str) -> DomainResult<Option<DeviceStatus>> {
        (**self).get_status(device_id).await
    }

    async fn upsert_heartbeat(&self, status: DeviceStatus) -> DomainResult<DeviceStatus> {
        (**self).upsert_heartbeat(status).await
    }
}
