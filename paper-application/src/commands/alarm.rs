use crate::capability::Inject;
use crate::command::Command;
use crate::error::AppResult;
use crate::event_bus::EventPublisher;
use async_trait::async_trait;
use chrono::NaiveTime;
use paper_domain::domain_event::AlarmCreated;
use paper_domain::model::{Alarm, AlarmId, AlarmStatus};
use paper_domain::ports::AlarmRepository;
use paper_macros::command;
use std::sync::Arc;

#[derive(Inject)]
pub struct AlarmDeps {
    pub alarms: Arc<dyn AlarmRepository>,
}

#[derive(Inject)]
pub struct AlarmWriter {
    pub alarms: Arc<dyn AlarmRepository>,
    pub events: EventPublisher,
}

#[command]
pub struct ListAlarms {}

#[async_trait]
impl Command for ListAlarms {
    const NAME: &'static str = "ListAlarms";
    type Deps = AlarmDeps;
    type Output = Vec<Alarm>;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        Ok(deps.alarms.get_all().await?)
    }
}

#[command]
pub struct GetActiveAlarms {}

#[async_trait]
impl Command for GetActiveAlarms {
    const NAME: &'static str = "GetActiveAlarms";
    type Deps = AlarmDeps;
    type Output = Vec<Alarm>;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        Ok(deps.alarms.get_active().await?)
    }
}

#[command]
pub struct CreateAlarm {
    pub name: String,
    pub trigger_time: NaiveTime,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub repeat_days: Vec<u8>,
}

#[async_trait]
impl Command for CreateAlarm {
    const NAME: &'static str = "CreateAlarm";
    type Deps = AlarmWriter;
    type Output = Alarm;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        let alarm = Alarm::builder()
            .name(self.name)
            .trigger_time(self.trigger_time)
            .message(self.message)
            .repeat_days(self.repeat_days)
            .build();

        let alarm = deps.alarms.create(alarm).await?;
        deps.events.publish(AlarmCreated::new(alarm.id))?;
        Ok(alarm)
    }
}

#[command]
pub struct UpdateAlarm {
    pub alarm_id: AlarmId,
    pub name: Option<String>,
    pub trigger_time: Option<NaiveTime>,
    pub message: Option<String>,
    pub status: Option<AlarmStatus>,
    pub repeat_days: Option<Vec<u8>>,
}

#[async_trait]
impl Command for UpdateAlarm {
    const NAME: &'static str = "UpdateAlarm";
    type Deps = AlarmDeps;
    type Output = Option<Alarm>;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        let Some(mut alarm) = deps.alarms.get_by_id(&self.alarm_id).await? else {
            return Ok(None);
        };

        if let Some(name) = self.name {
            alarm.name = name;
        }
        if let Some(trigger_time) = self.trigger_time {
            alarm.trigger_time = trigger_time;
        }
        if let Some(message) = self.message {
            alarm.message = message;
        }
        if let Some(status) = self.status {
            alarm.status = status;
        }
        if let Some(repeat_days) = self.repeat_days {
            alarm.repeat_days = repeat_days;
        }

        Ok(Some(deps.alarms.update(alarm).await?))
    }
}

#[command]
pub struct DeleteAlarm {
    pub alarm_id: AlarmId,
}

#[async_trait]
impl Command for DeleteAlarm {
    const NAME: &'static str = "DeleteAlarm";
    type Deps = AlarmDeps;
    type Output = bool;

    async fn handle(self, deps: Self::Deps) -> AppResult<Self::Output> {
        Ok(deps.alarms.delete(&self.alarm_id).await?)
    }
}
