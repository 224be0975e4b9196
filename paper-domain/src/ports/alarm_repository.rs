use crate::error::DomainResult;
use crate::model::{Alarm, AlarmId};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait AlarmRepository: Send + Sync {
    /// 全部闹钟，按 `trigger_time` 升序
    async fn get_all(&self) -> DomainResult<Vec<Alarm>>;

    async fn get_by_id(&self, id: &AlarmId) -> DomainResult<Option<Alarm>>;

    /// 状态为 active 的闹钟，按 `trigger_time` 升序
    async fn get_active(&self) -> DomainResult<Vec<Alarm>>;

    async fn create(&self, alarm: Alarm) -> DomainResult<Alarm>;

    async fn update(&self, alarm: Alarm) -> DomainResult<Alarm>;

    async fn delete(&self, id: &AlarmId) -> DomainResult<bool>;
}

#[async_trait]
impl<T> AlarmRepository for Arc<T>
where
    T: AlarmRepository + ?Sized,
{
    async fn get_all(&self) -> DomainResult<Vec<Alarm>> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, id: &AlarmId) -> DomainResult<Option<Alarm>> {
        (**self).get_by_id(id).await
    }

    async fn get_active(&self) -> DomainResult<Vec<Alarm>> {
        (**self).get_active().await
    }

    async fn create(&self, alarm: Alarm) -> DomainResult<Alarm> {
        (**self).create(alarm).await
    }

    async fn update(&self, alarm: Alarm) -> DomainResult<Alarm> {
        (**self).update(alarm).await
    }

    async fn delete(&self, id: &AlarmId) -> DomainResult<bool> {
        (**self).delete(id).await
    }
}
