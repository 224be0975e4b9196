//! 能力（Capability）与注入（Inject）
//!
//! 命令以类型声明所需协作者，容器按类型解析：
//! - `Capability`：单个可解析的协作者类型（仓储接口、事件发布器、共享对象）；
//! - `Inject`：一组协作者，`()`、能力元组或 `#[derive(Inject)]` 的具名结构体。
//!
//! 注册命令/构建容器时先以 `check` 校验全部声明可解析，解析阶段再次校验。
//!
use crate::container::{Container, Scope};
use crate::error::{AppError, AppResult};
use crate::event_bus::EventPublisher;
use paper_domain::ports::{AlarmRepository, DeviceRepository, ScreenRepository};
use std::any::type_name;
use std::ops::Deref;
use std::sync::Arc;

pub use paper_macros::Inject;

pub trait Capability: Sized + Send {
    fn name() -> &'static str;

    fn is_provided(container: &Container) -> bool;

    fn check(container: &Container) -> AppResult<()> {
        if Self::is_provided(container) {
            Ok(())
        } else {
            Err(AppError::CapabilityUnavailable {
                capability: Self::name(),
            })
        }
    }

    fn resolve(scope: &Scope) -> AppResult<Self>;
}

pub trait Inject: Sized + Send {
    fn inject(scope: &Scope) -> AppResult<Self>;

    fn check(container: &Container) -> AppResult<()>;
}

impl Inject for () {
    fn inject(_scope: &Scope) -> AppResult<Self> {
        Ok(())
    }

    fn check(_container: &Container) -> AppResult<()> {
        Ok(())
    }
}

macro_rules! impl_inject_for_tuple {
    ($($cap:ident),+) => {
        impl<$($cap: Capability),+> Inject for ($($cap,)+) {
            fn inject(scope: &Scope) -> AppResult<Self> {
                Ok(($($cap::resolve(scope)?,)+))
            }

            fn check(container: &Container) -> AppResult<()> {
                $(<$cap as Capability>::check(container)?;)+
                Ok(())
            }
        }
    };
}

impl_inject_for_tuple!(A);
impl_inject_for_tuple!(A, B);
impl_inject_for_tuple!(A, B, C);
impl_inject_for_tuple!(A, B, C, D);

impl Capability for Arc<dyn ScreenRepository> {
    fn name() -> &'static str {
        "ScreenRepository"
    }

    fn is_provided(container: &Container) -> bool {
        container.provides_screens()
    }

    fn resolve(scope: &Scope) -> AppResult<Self> {
        scope.screens()
    }
}

impl Capability for Arc<dyn AlarmRepository> {
    fn name() -> &'static str {
        "AlarmRepository"
    }

    fn is_provided(container: &Container) -> bool {
        container.provides_alarms()
    }

    fn resolve(scope: &Scope) -> AppResult<Self> {
        scope.alarms()
    }
}

impl Capability for Arc<dyn DeviceRepository> {
    fn name() -> &'static str {
        "DeviceRepository"
    }

    fn is_provided(container: &Container) -> bool {
        container.provides_devices()
    }

    fn resolve(scope: &Scope) -> AppResult<Self> {
        scope.devices()
    }
}

impl Capability for EventPublisher {
    fn name() -> &'static str {
        "EventPublisher"
    }

    fn is_provided(_container: &Container) -> bool {
        true
    }

    fn resolve(scope: &Scope) -> AppResult<Self> {
        Ok(scope.publisher())
    }
}

/// 进程级共享对象（如审计日志、时钟），通过 `ContainerBuilder::share` 注册
pub struct Shared<T>(Arc<T>);

impl<T> Shared<T> {
    pub fn new(value: Arc<T>) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> Arc<T> {
        self.0
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Deref for Shared<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> Capability for Shared<T>
where
    T: Send + Sync + 'static,
{
    fn name() -> &'static str {
        type_name::<T>()
    }

    fn is_provided(container: &Container) -> bool {
        container.shared::<T>().is_some()
    }

    fn resolve(scope: &Scope) -> AppResult<Self> {
        scope
            .container()
            .shared::<T>()
            .map(Shared)
            .ok_or(AppError::CapabilityUnavailable {
                capability: Self::name(),
            })
    }
}
