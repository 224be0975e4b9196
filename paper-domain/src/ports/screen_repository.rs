use crate::error::DomainResult;
use crate::model::{Screen, ScreenId};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ScreenRepository: Send + Sync {
    /// 全部屏幕，按 `display_order` 升序
    async fn get_all(&self) -> DomainResult<Vec<Screen>>;

    async fn get_by_id(&self, id: &ScreenId) -> DomainResult<Option<Screen>>;

    /// 当前展示的屏幕：`display_order` 最小的激活屏幕
    async fn get_current(&self) -> DomainResult<Option<Screen>>;

    async fn create(&self, screen: Screen) -> DomainResult<Screen>;

    /// 按标识整体更新，刷新 `updated_at`；不存在时返回 `NotFound`
    async fn update(&self, screen: Screen) -> DomainResult<Screen>;

    /// 返回是否确有删除
    async fn delete(&self, id: &ScreenId) -> DomainResult<bool>;
}

#[async_trait]
impl<T> ScreenRepository for Arc<T>
where
    T: ScreenRepository + ?Sized,
{
    async fn get_all(&self) -> DomainResult<Vec<Screen>> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, id: &ScreenId) -> DomainResult<Option<Screen>> {
        (**self).get_by_id(id).await
    }

    async fn get_current(&self) -> DomainResult<Option<Screen>> {
        (**self).get_current().await
    }

    async fn create(&self, screen: Screen) -> DomainResult<Screen> {
        (**self).create(screen).await
    }

    async fn update(&self, screen: Screen) -> DomainResult<Screen> {
        (**self).update(screen).await
    }

    async fn delete(&self, id: &ScreenId) -> DomainResult<bool> {
        (**self).delete(id).await
    }
}
