use crate::capability::Inject;
use crate::command::Command;
use crate::error::AppResult;
use crate::event_bus::EventPublisher;
use async_trait::async_trait;
use paper_domain::domain_event::{ScreenCreated, ScreenDeleted, ScreenUpdated};
use paper_domain::model::{Screen, ScreenId, ScreenType};
use paper_domain::ports::ScreenRepository;
use paper_macros::command;
use std::sync::Arc;

type Screens = (Arc<dyn ScreenRepository>,);

#[derive(Inject)]
pub struct ScreenWriter {
    pub screens: Arc<dyn ScreenRepository>,
    pub events: EventPublisher,
}

#[command]
pub struct ListScreens {}

#[async_trait]
impl Command for ListScreens {
    const NAME: &'static str = "ListScreens";
    type Deps = Screens;
    type Output = Vec<Screen>;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        let (screens,) = deps;
        Ok(screens.get_all().await?)
    }
}

/// 设备当前应展示的屏幕
#[command]
pub struct GetCurrentScreen {}

#[async_trait]
impl Command for GetCurrentScreen {
    const NAME: &'static str = "GetCurrentScreen";
    type Deps = Screens;
    type Output = Option<Screen>;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        let (screens,) = deps;
        Ok(screens.get_current().await?)
    }
}

#[command]
pub struct GetScreen {
    pub screen_id: ScreenId,
}

#[async_trait]
impl Command for GetScreen {
    const NAME: &'static str = "GetScreen";
    type Deps = Screens;
    type Output = Option<Screen>;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        let (screens,) = deps;
        Ok(screens.get_by_id(&self.screen_id).await?)
    }
}

#[command]
pub struct CreateScreen {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub screen_type: ScreenType,
    #[serde(default)]
    pub display_order: i32,
}

#[async_trait]
impl Command for CreateScreen {
    const NAME: &'static str = "CreateScreen";
    type Deps = ScreenWriter;
    type Output = Screen;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        let screen = Screen::builder()
            .title(self.title)
            .content(self.content)
            .screen_type(self.screen_type)
            .display_order(self.display_order)
            .build();

        let screen = deps.screens.create(screen).await?;
        deps.events.publish(ScreenCreated::new(screen.id))?;
        Ok(screen)
    }
}

/// 部分更新；目标不存在时返回 `None`，不写入也不发布事件
#[command]
pub struct UpdateScreen {
    pub screen_id: ScreenId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub screen_type: Option<ScreenType>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

#[async_trait]
impl Command for UpdateScreen {
    const NAME: &'static str = "UpdateScreen";
    type Deps = ScreenWriter;
    type Output = Option<Screen>;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        let Some(mut screen) = deps.screens.get_by_id(&self.screen_id).await? else {
            return Ok(None);
        };

        if let Some(title) = self.title {
            screen.title = title;
        }
        if let Some(content) = self.content {
            screen.content = content;
        }
        if let Some(screen_type) = self.screen_type {
            screen.screen_type = screen_type;
        }
        if let Some(is_active) = self.is_active {
            screen.is_active = is_active;
        }
        if let Some(display_order) = self.display_order {
            screen.display_order = display_order;
        }

        let screen = deps.screens.update(screen).await?;
        deps.events.publish(ScreenUpdated::new(screen.id))?;
        Ok(Some(screen))
    }
}

#[command]
pub struct DeleteScreen {
    pub screen_id: ScreenId,
}

#[async_trait]
impl Command for DeleteScreen {
    const NAME: &'static str = "DeleteScreen";
    type Deps = ScreenWriter;
    type Output = bool;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        let deleted = deps.screens.delete(&self.screen_id).await?;
        if deleted {
            deps.events.publish(ScreenDeleted::new(self.screen_id))?;
        }
        Ok(deleted)
    }
}
