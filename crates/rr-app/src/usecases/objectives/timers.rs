use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::AbortHandle;
use tracing::debug;

/// Owns every delayed effect of a screen.
///
/// Timers spawned through the scope are aborted together by
/// [`TimerScope::cancel_all`] or when the scope is dropped, so no callback
/// outlives the screen that scheduled it.
pub struct TimerScope {
    inner: Mutex<ScopeInner>,
    cancelled: Arc<AtomicBool>,
}

/// Read side of a scope's cancellation, for timer bodies.
///
/// Aborting cannot interrupt a task that is already being polled, so a body
/// that mutates shared state checks this under its lock first.
#[derive(Debug, Clone)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

struct ScopeInner {
    handles: Vec<AbortHandle>,
    closed: bool,
}

impl TimerScope {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ScopeInner {
                handles: Vec::new(),
                closed: false,
            }),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        CancelFlag(Arc::clone(&self.cancelled))
    }

    /// Spawns `task` on the runtime. Returns false once the scope is closed.
    pub fn spawn<F>(&self, label: &'static str, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.closed {
            debug!(label, "timer scope closed, task dropped");
            return false;
        }
        inner.handles.retain(|handle| !handle.is_finished());
        let handle = tokio::spawn(task);
        inner.handles.push(handle.abort_handle());
        debug!(label, "timer scheduled");
        true
    }

    /// Number of timers that have not run to completion.
    pub fn active(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner
            .handles
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).closed
    }

    /// Aborts every pending timer and refuses new ones.
    pub fn cancel_all(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.closed = true;
        self.cancelled.store(true, Ordering::Release);
        let count = inner.handles.len();
        for handle in inner.handles.drain(..) {
            handle.abort();
        }
        if count > 0 {
            debug!(count, "timers cancelled");
        }
    }
}

impl Default for TimerScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerScope {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
