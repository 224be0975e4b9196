use super::{check_len, check_not_blank};
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use bon::Builder;
use chrono::{DateTime, NaiveTime, Utc};
use paper_macros::entity_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[entity_id]
#[derive(Copy, PartialOrd, Ord)]
pub struct AlarmId(Uuid);

impl AlarmId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// 闹钟状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmStatus {
    #[default]
    Active,
    Disabled,
    Triggered,
}

impl AlarmStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
            Self::Triggered => "triggered",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlarmStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "disabled" => Ok(Self::Disabled),
            "triggered" => Ok(Self::Triggered),
            other => Err(DomainError::invalid_value(format!("unknown alarm status: {other}"))),
        }
    }
}

/// 定时闹钟；`repeat_days` 为星期序号（0 = 周一 .. 6 = 周日）
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    #[builder(default = AlarmId::generate())]
    pub id: AlarmId,
    #[builder(into)]
    pub name: String,
    pub trigger_time: NaiveTime,
    #[builder(into, default)]
    pub message: String,
    #[builder(default)]
    pub status: AlarmStatus,
    #[builder(default)]
    pub repeat_days: Vec<u8>,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
    #[builder(default = Utc::now())]
    pub updated_at: DateTime<Utc>,
}

impl Alarm {
    pub const MAX_NAME_LEN: usize = 200;

    pub fn is_active(&self) -> bool {
        self.status == AlarmStatus::Active
    }

    pub fn check_constraints(&self) -> DomainResult<()> {
        check_not_blank(Self::TYPE, "name", &self.name)?;
        check_len(Self::TYPE, "name", &self.name, Self::MAX_NAME_LEN)?;
        if let Some(day) = self.repeat_days.iter().find(|d| **d > 6) {
            return Err(DomainError::constraint(format!(
                "alarm.repeat_days contains invalid weekday {day}"
            )));
        }
        Ok(())
    }
}

impl Entity for Alarm {
    type Id = AlarmId;
    const TYPE: &'static str = "alarm";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
