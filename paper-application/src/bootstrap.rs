//! 进程启动装配：容器、订阅表与全部根命令

use crate::commands::{
    CreateAlarm, CreateScreen, DeleteAlarm, DeleteScreen, GetActiveAlarms, GetCurrentScreen,
    GetDeviceStatus, GetScreen, ListAlarms, ListScreens, RecordHeartbeat, UpdateAlarm,
    UpdateScreen,
};
use crate::config::Settings;
use crate::container::{Container, ContainerBuilder};
use crate::error::AppResult;
use crate::inmemory_command_bus::InMemoryCommandBus;
use crate::subscriber::Subscriber;
use crate::subscribers::{LogHeartbeat, LogScreenCreated};
use paper_domain::domain_event::{DeviceHeartbeatReceived, ScreenCreated};
use paper_domain::persist::inmemory::InMemoryStore;
use std::sync::Arc;

/// 默认订阅：屏幕创建与设备心跳的日志
pub fn default_subscriptions(builder: ContainerBuilder) -> ContainerBuilder {
    builder
        .subscribe::<ScreenCreated>([Subscriber::of::<LogScreenCreated>()])
        .subscribe::<DeviceHeartbeatReceived>([Subscriber::of::<LogHeartbeat>()])
}

pub fn register_commands(bus: &InMemoryCommandBus) -> AppResult<()> {
    bus.register::<ListScreens>()?;
    bus.register::<GetCurrentScreen>()?;
    bus.register::<GetScreen>()?;
    bus.register::<CreateScreen>()?;
    bus.register::<UpdateScreen>()?;
    bus.register::<DeleteScreen>()?;

    bus.register::<ListAlarms>()?;
    bus.register::<GetActiveAlarms>()?;
    bus.register::<CreateAlarm>()?;
    bus.register::<UpdateAlarm>()?;
    bus.register::<DeleteAlarm>()?;

    bus.register::<GetDeviceStatus>()?;
    bus.register::<RecordHeartbeat>()?;
    Ok(())
}

/// 以内存存储装配完整的命令总线
pub fn prepare(settings: &Settings, store: InMemoryStore) -> AppResult<InMemoryCommandBus> {
    let container = default_subscriptions(Container::in_memory(store))
        .drain_limit(settings.drain_limit)
        .build()?;

    let bus = InMemoryCommandBus::new(Arc::new(container));
    register_commands(&bus)?;
    tracing::info!(
        app = %settings.app_name,
        commands = bus.registered_commands().len(),
        "command bus ready"
    );
    Ok(bus)
}
