use super::{check_len, check_not_blank};
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use bon::Builder;
use chrono::{DateTime, Utc};
use paper_macros::entity_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
pub struct ScreenId(Uuid);

impl ScreenId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// 屏幕内容类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenType {
    #[default]
    Text,
    Weather,
    Calendar,
    Custom,
}

impl ScreenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Weather => "weather",
            Self::Calendar => "calendar",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ScreenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "weather" => Ok(Self::Weather),
            "calendar" => Ok(Self::Calendar),
            "custom" => Ok(Self::Custom),
            other => Err(DomainError::invalid_value(format!("unknown screen type: {other}"))),
        }
    }
}

/// 墨水屏上轮播展示的一屏内容
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    #[builder(default = ScreenId::generate())]
    pub id: ScreenId,
    #[builder(into)]
    pub title: String,
    #[builder(into, default)]
    pub content: String,
    #[builder(default)]
    pub screen_type: ScreenType,
    #[builder(default = true)]
    pub is_active: bool,
    #[builder(default)]
    pub display_order: i32,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
    #[builder(default = Utc::now())]
    pub updated_at: DateTime<Utc>,
}

impl Screen {
    pub const MAX_TITLE_LEN: usize = 200;

    /// 存储约束（与表结构一致）
    pub fn check_constraints(&self) -> DomainResult<()> {
        check_not_blank(Self::TYPE, "title", &self.title)?;
        check_len(Self::TYPE, "title", &self.title, Self::MAX_TITLE_LEN)
    }
}

impl Entity for Screen {
    type Id = ScreenId;
    const TYPE: &'static str = "screen";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_column_defaults() {
        let screen = Screen::builder().title("Weather").build();
        assert_eq!(screen.content, "");
        assert_eq!(screen.screen_type, ScreenType::Text);
        assert!(screen.is_active);
        assert_eq!(screen.display_order, 0);
    }

    #[test]
    fn title_longer_than_column_is_rejected() {
        let screen = Screen::builder().title("x".repeat(201)).build();
        assert!(matches!(
            screen.check_constraints(),
            Err(DomainError::Constraint { .. })
        ));

        let blank = Screen::builder().title("  ").build();
        assert!(blank.check_constraints().is_err());
    }

    #[test]
    fn screen_type_uses_lowercase_wire_names() {
        let v = serde_json::to_value(ScreenType::Calendar).unwrap();
        assert_eq!(v, serde_json::json!("calendar"));
        assert_eq!("weather".parse::<ScreenType>().unwrap(), ScreenType::Weather);
        assert!("banner".parse::<ScreenType>().is_err());
    }

    #[test]
    fn screen_id_serializes_as_plain_uuid() {
        let id = ScreenId::generate();
        let v = serde_json::to_value(id).unwrap();
        assert_eq!(v, serde_json::json!(id.to_string()));
    }
}
