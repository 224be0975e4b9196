use super::session::InMemorySession;
use super::store::Write;
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::model::{Alarm, AlarmId, AlarmStatus, DeviceStatus, Screen, ScreenId};
use crate::persist::UnitOfWork;
use crate::ports::{AlarmRepository, DeviceRepository, ScreenRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

fn bind_session(uow: Arc<dyn UnitOfWork>) -> DomainResult<Arc<InMemorySession>> {
    uow.as_any()
        .downcast::<InMemorySession>()
        .map_err(|_| DomainError::Database {
            reason: "unit of work is not an in-memory session".to_string(),
        })
}

fn screen_order(s: &Screen) -> (i32, chrono::DateTime<Utc>) {
    (s.display_order, s.created_at)
}

fn alarm_order(a: &Alarm) -> (chrono::NaiveTime, chrono::DateTime<Utc>) {
    (a.trigger_time, a.created_at)
}

/// 绑定到内存会话的屏幕仓储
pub struct InMemoryScreenRepository {
    session: Arc<InMemorySession>,
}

impl InMemoryScreenRepository {
    pub fn bind(uow: Arc<dyn UnitOfWork>) -> DomainResult<Self> {
        Ok(Self {
            session: bind_session(uow)?,
        })
    }
}

#[async_trait]
impl ScreenRepository for InMemoryScreenRepository {
    async fn get_all(&self) -> DomainResult<Vec<Screen>> {
        self.session.read(|t| {
            let mut screens: Vec<Screen> = t.screens.values().cloned().collect();
            screens.sort_by_key(screen_order);
            screens
        })
    }

    async fn get_by_id(&self, id: &ScreenId) -> DomainResult<Option<Screen>> {
        self.session.read(|t| t.screens.get(id).cloned())
    }

    async fn get_current(&self) -> DomainResult<Option<Screen>> {
        self.session.read(|t| {
            t.screens
                .values()
                .filter(|s| s.is_active)
                .min_by_key(|s| screen_order(s))
                .cloned()
        })
    }

    async fn create(&self, screen: Screen) -> DomainResult<Screen> {
        self.session.record(Write::PutScreen(screen.clone()))?;
        Ok(screen)
    }

    async fn update(&self, mut screen: Screen) -> DomainResult<Screen> {
        if !self.session.read(|t| t.screens.contains_key(&screen.id))? {
            return Err(DomainError::not_found(format!("{} {}", Screen::TYPE, screen.id())));
        }
        screen.updated_at = Utc::now();
        self.session.record(Write::PutScreen(screen.clone()))?;
        Ok(screen)
    }

    async fn delete(&self, id: &ScreenId) -> DomainResult<bool> {
        let found = self.session.read(|t| t.screens.contains_key(id))?;
        if found {
            self.session.record(Write::DeleteScreen(*id))?;
        }
        Ok(found)
    }
}

/// 绑定到内存会话的闹钟仓储
pub struct InMemoryAlarmRepository {
    session: Arc<InMemorySession>,
}

impl InMemoryAlarmRepository {
    pub fn bind(uow: Arc<dyn UnitOfWork>) -> DomainResult<Self> {
        Ok(Self {
            session: bind_session(uow)?,
        })
    }
}

#[async_trait]
impl AlarmRepository for InMemoryAlarmRepository {
    async fn get_all(&self) -> DomainResult<Vec<Alarm>> {
        self.session.read(|t| {
            let mut alarms: Vec<Alarm> = t.alarms.values().cloned().collect();
            alarms.sort_by_key(alarm_order);
            alarms
        })
    }

    async fn get_by_id(&self, id: &AlarmId) -> DomainResult<Option<Alarm>> {
        self.session.read(|t| t.alarms.get(id).cloned())
    }

    async fn get_active(&self) -> DomainResult<Vec<Alarm>> {
        self.session.read(|t| {
            let mut alarms: Vec<Alarm> = t
                .alarms
                .values()
                .filter(|a| a.status == AlarmStatus::Active)
                .cloned()
                .collect();
            alarms.sort_by_key(alarm_order);
            alarms
        })
    }

    async fn create(&self, alarm: Alarm) -> DomainResult<Alarm> {
        self.session.record(Write::PutAlarm(alarm.clone()))?;
        Ok(alarm)
    }

    async fn update(&self, mut alarm: Alarm) -> DomainResult<Alarm> {
        if !self.session.read(|t| t.alarms.contains_key(&alarm.id))? {
            return Err(DomainError::not_found(format!("{} {}", Alarm::TYPE, alarm.id())));
        }
        alarm.updated_at = Utc::now();
        self.session.record(Write::PutAlarm(alarm.clone()))?;
        Ok(alarm)
    }

    async fn delete(&self, id: &AlarmId) -> DomainResult<bool> {
        let found = self.session.read(|t| t.alarms.contains_key(id))?;
        if found {
            self.session.record(Write::DeleteAlarm(*id))?;
        }
        Ok(found)
    }
}

/// 绑定到内存会话的设备状态仓储
pub struct InMemoryDeviceRepository {
    session: Arc<InMemorySession>,
}

impl InMemoryDeviceRepository {
    pub fn bind(uow: Arc<dyn UnitOfWork>) -> DomainResult<Self> {
        Ok(Self {
            session: bind_session(uow)?,
        })
    }
}

#[async_trait]
impl DeviceRepository for InMemoryDeviceRepository {
    async fn get_status(&self, device_id: &str) -> DomainResult<Option<DeviceStatus>> {
        self.session.read(|t| t.devices.get(device_id).cloned())
    }

    async fn upsert_heartbeat(&self, status: DeviceStatus) -> DomainResult<DeviceStatus> {
        let existing = self
            .session
            .read(|t| t.devices.get(&status.device_id).map(|d| d.id))?;
        let status = DeviceStatus {
            id: existing.unwrap_or(status.id),
            last_seen: Utc::now(),
            ..status
        };
        self.session.record(Write::PutDevice(status.clone()))?;
        Ok(status)
    }
}
