use super::lock;
use super::store::{Stage, StoreInner, Tables, Write};
use crate::error::{DomainError, DomainResult};
use crate::persist::UnitOfWork;
use async_trait::async_trait;
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

struct SessionState {
    working: Tables,
    pending: Vec<Write>,
    flushed: Vec<Write>,
}

/// 内存存储上的一次会话
pub struct InMemorySession {
    id: Uuid,
    store: Arc<StoreInner>,
    state: Mutex<SessionState>,
    active: AtomicBool,
}

impl InMemorySession {
    pub(crate) fn open(store: Arc<StoreInner>) -> Self {
        store.session_opened();
        let working = store.snapshot();
        Self {
            id: Uuid::new_v4(),
            store,
            state: Mutex::new(SessionState {
                working,
                pending: Vec::new(),
                flushed: Vec::new(),
            }),
            active: AtomicBool::new(true),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> DomainResult<R> {
        self.ensure_active()?;
        let state = lock(&self.state);
        Ok(f(&state.working))
    }

    pub(crate) fn record(&self, write: Write) -> DomainResult<()> {
        self.ensure_active()?;
        let mut state = lock(&self.state);
        write.apply(&mut state.working);
        state.pending.push(write);
        Ok(())
    }

    fn ensure_active(&self) -> DomainResult<()> {
        if self.active.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::SessionClosed)
        }
    }

    fn flush_pending(&self) -> DomainResult<()> {
        self.ensure_active()?;
        self.store.take_fault(Stage::Flush)?;

        let mut state = lock(&self.state);
        self.store.check_all(&state.pending)?;
        let pending = std::mem::take(&mut state.pending);
        tracing::debug!(session = %self.id, writes = pending.len(), "flushed");
        state.flushed.extend(pending);
        Ok(())
    }

    fn commit_flushed(&self) -> DomainResult<()> {
        self.flush_pending()?;
        self.store.take_fault(Stage::Commit)?;

        // flush 之后其他会话可能已提交，提交时须重新校验
        let mut state = lock(&self.state);
        self.store.commit_writes(&state.flushed)?;
        let flushed = std::mem::take(&mut state.flushed);
        tracing::debug!(session = %self.id, writes = flushed.len(), "committed");
        Ok(())
    }

    fn discard(&self) -> DomainResult<()> {
        self.ensure_active()?;
        let mut state = lock(&self.state);
        state.pending.clear();
        state.flushed.clear();
        state.working = self.store.snapshot();
        self.store.rolled_back();
        tracing::debug!(session = %self.id, "rolled back");
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for InMemorySession {
    async fn flush(&self) -> DomainResult<()> {
        self.flush_pending()
    }

    async fn commit(&self) -> DomainResult<()> {
        self.commit_flushed()
    }

    async fn rollback(&self) -> DomainResult<()> {
        self.discard()
    }

    async fn close(&self) -> DomainResult<()> {
        if self.active.swap(false, Ordering::SeqCst) {
            self.store.session_closed();
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl Drop for InMemorySession {
    fn drop(&mut self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.store.session_closed();
        }
    }
}
