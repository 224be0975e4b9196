use super::session::InMemorySession;
use super::{lock, read, write};
use crate::error::{DomainError, DomainResult};
use crate::model::{Alarm, AlarmId, DeviceStatus, Screen, ScreenId};
use crate::persist::{UnitOfWork, UnitOfWorkFactory};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// 可注入故障的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Flush,
    Commit,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flush => "flush",
            Self::Commit => "commit",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    pub(crate) screens: HashMap<ScreenId, Screen>,
    pub(crate) alarms: HashMap<AlarmId, Alarm>,
    pub(crate) devices: HashMap<String, DeviceStatus>,
}

/// 写日志条目
#[derive(Debug, Clone)]
pub(crate) enum Write {
    PutScreen(Screen),
    DeleteScreen(ScreenId),
    PutAlarm(Alarm),
    DeleteAlarm(AlarmId),
    PutDevice(DeviceStatus),
}

impl Write {
    pub(crate) fn apply(&self, tables: &mut Tables) {
        match self {
            Self::PutScreen(screen) => {
                tables.screens.insert(screen.id, screen.clone());
            }
            Self::DeleteScreen(id) => {
                tables.screens.remove(id);
            }
            Self::PutAlarm(alarm) => {
                tables.alarms.insert(alarm.id, alarm.clone());
            }
            Self::DeleteAlarm(id) => {
                tables.alarms.remove(id);
            }
            Self::PutDevice(status) => {
                tables.devices.insert(status.device_id.clone(), status.clone());
            }
        }
    }

    /// 对照已提交数据校验约束
    pub(crate) fn check(&self, committed: &Tables) -> DomainResult<()> {
        match self {
            Self::PutScreen(screen) => screen.check_constraints(),
            Self::PutAlarm(alarm) => alarm.check_constraints(),
            Self::PutDevice(status) => {
                status.check_constraints()?;
                match committed.devices.get(&status.device_id) {
                    Some(existing) if existing.id != status.id => Err(DomainError::constraint(
                        format!("device_status.device_id '{}' already exists", status.device_id),
                    )),
                    _ => Ok(()),
                }
            }
            Self::DeleteScreen(_) | Self::DeleteAlarm(_) => Ok(()),
        }
    }
}

pub(crate) struct StoreInner {
    tables: RwLock<Tables>,
    faults: Mutex<Vec<Stage>>,
    open_sessions: AtomicUsize,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

impl StoreInner {
    pub(crate) fn snapshot(&self) -> Tables {
        read(&self.tables).clone()
    }

    pub(crate) fn check_all(&self, writes: &[Write]) -> DomainResult<()> {
        let committed = read(&self.tables);
        writes.iter().try_for_each(|w| w.check(&committed))
    }

    /// 在同一把写锁下复核并落盘；任一条目违反约束则整体不生效
    pub(crate) fn commit_writes(&self, writes: &[Write]) -> DomainResult<()> {
        let mut tables = write(&self.tables);
        writes.iter().try_for_each(|w| w.check(&tables))?;
        for w in writes {
            w.apply(&mut tables);
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// 一次性故障：命中即消费
    pub(crate) fn take_fault(&self, stage: Stage) -> DomainResult<()> {
        let mut faults = lock(&self.faults);
        if let Some(pos) = faults.iter().position(|s| *s == stage) {
            faults.remove(pos);
            return Err(DomainError::Fault {
                stage: stage.as_str(),
            });
        }
        Ok(())
    }

    pub(crate) fn session_opened(&self) {
        self.open_sessions.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn session_closed(&self) {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }

    pub(crate) fn rolled_back(&self) {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
    }
}

/// 内存事务存储；克隆共享同一份数据
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<StoreInner>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                tables: RwLock::new(Tables::default()),
                faults: Mutex::new(Vec::new()),
                open_sessions: AtomicUsize::new(0),
                commits: AtomicUsize::new(0),
                rollbacks: AtomicUsize::new(0),
            }),
        }
    }

    /// 让下一次到达 `stage` 的会话操作失败
    pub fn fail_next(&self, stage: Stage) {
        lock(&self.inner.faults).push(stage);
    }

    pub fn screen(&self, id: &ScreenId) -> Option<Screen> {
        read(&self.inner.tables).screens.get(id).cloned()
    }

    pub fn screen_count(&self) -> usize {
        read(&self.inner.tables).screens.len()
    }

    pub fn alarm(&self, id: &AlarmId) -> Option<Alarm> {
        read(&self.inner.tables).alarms.get(id).cloned()
    }

    pub fn alarm_count(&self) -> usize {
        read(&self.inner.tables).alarms.len()
    }

    pub fn device(&self, device_id: &str) -> Option<DeviceStatus> {
        read(&self.inner.tables).devices.get(device_id).cloned()
    }

    /// 尚未关闭的会话数
    pub fn open_sessions(&self) -> usize {
        self.inner.open_sessions.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.inner.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.inner.rollbacks.load(Ordering::SeqCst)
    }
}

impl UnitOfWorkFactory for InMemoryStore {
    fn begin(&self) -> Arc<dyn UnitOfWork> {
        Arc::new(InMemorySession::open(self.inner.clone()))
    }
}
