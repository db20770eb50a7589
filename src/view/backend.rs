use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

pub const SPAWN_BUILDTOOLS: &str = "spawn_buildtools";
pub const SET_REV: &str = "set_rev";
pub const GET_VERSIONS: &str = "get_versions";

/// Channel carrying one line of BuildTools output per event.
pub const LOG_LINE_CHANNEL: &str = "log-line";

pub type InvokeFuture = Pin<Box<dyn Future<Output = Result<Value, String>> + Send + 'static>>;

pub type EventHandler = Box<dyn Fn(String) + Send + Sync + 'static>;

/// The two primitives the views use to talk to the shell.
pub trait Backend: Send + Sync + 'static {
    /// Start a named command. Nothing happens until the returned future is polled
    /// unless the implementation records the call eagerly.
    fn invoke(&self, command: &str, args: Value) -> InvokeFuture;

    /// Deliver every payload published on `channel` to `handler` until the
    /// returned subscription is dropped.
    fn subscribe(&self, channel: &str, handler: EventHandler) -> Subscription;
}

/// Handle for an event subscription. Unsubscribes when dropped.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Issue `command` without waiting for it. Failures only reach the log.
pub fn fire_and_forget<B: Backend + ?Sized>(backend: &B, command: &'static str, args: Value) {
    let pending = backend.invoke(command, args);
    tauri::async_runtime::spawn(async move {
        if let Err(error) = pending.await {
            log::warn!("{command} failed: {error}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn subscription_unsubscribes_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let subscription = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        subscription.unsubscribe();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let counter = calls.clone();
        drop(Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
