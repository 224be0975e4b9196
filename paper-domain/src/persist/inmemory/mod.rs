//! 内存事务存储
//!
//! 已提交数据保存在 `InMemoryStore` 中；每个 `InMemorySession` 持有一份
//! 工作副本与写日志：读取可见本会话的写入，`flush` 校验约束，
//! `commit` 将写日志回放到存储，`rollback` 丢弃之。
//!
mod repositories;
mod session;
mod store;

pub use repositories::{InMemoryAlarmRepository, InMemoryDeviceRepository, InMemoryScreenRepository};
pub use session::InMemorySession;
pub use store::{InMemoryStore, Stage};

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// 锁中毒时继续使用内部数据：写日志只在持锁期间整体替换，不存在半写状态
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
