use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::backend::{Backend, EventHandler, InvokeFuture, Subscription, SET_REV};

type Handlers = Arc<Mutex<HashMap<String, Vec<(u64, Arc<EventHandler>)>>>>;

/// In-memory backend: records invocations when they are issued and delivers
/// emitted events synchronously on the caller's thread.
#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<(String, Value)>>,
    responses: Mutex<HashMap<String, Result<Value, String>>>,
    handlers: Handlers,
    next_id: Mutex<u64>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned result for `command`; unknown commands resolve to `null`.
    pub fn respond(&self, command: &str, result: Result<Value, String>) {
        self.responses.lock().insert(command.to_string(), result);
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, command: &str) -> usize {
        self.calls.lock().iter().filter(|(c, _)| c == command).count()
    }

    pub fn revs(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(command, _)| command == SET_REV)
            .map(|(_, args)| args["rev"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn emit(&self, channel: &str, payload: &str) {
        let handlers: Vec<Arc<EventHandler>> = self
            .handlers
            .lock()
            .get(channel)
            .map(|list| list.iter().map(|(_, handler)| handler.clone()).collect())
            .unwrap_or_default();
        for handler in handlers {
            handler(payload.to_string());
        }
    }

    pub fn listener_count(&self, channel: &str) -> usize {
        self.handlers.lock().get(channel).map_or(0, Vec::len)
    }
}

impl Backend for FakeBackend {
    fn invoke(&self, command: &str, args: Value) -> InvokeFuture {
        self.calls.lock().push((command.to_string(), args));
        let result = self
            .responses
            .lock()
            .get(command)
            .cloned()
            .unwrap_or(Ok(Value::Null));
        Box::pin(async move { result })
    }

    fn subscribe(&self, channel: &str, handler: EventHandler) -> Subscription {
        let id = {
            let mut next_id = self.next_id.lock();
            *next_id += 1;
            *next_id
        };
        self.handlers
            .lock()
            .entry(channel.to_string())
            .or_default()
            .push((id, Arc::new(handler)));

        let handlers = self.handlers.clone();
        let channel = channel.to_string();
        Subscription::new(move || {
            if let Some(list) = handlers.lock().get_mut(&channel) {
                list.retain(|(existing, _)| *existing != id);
            }
        })
    }
}
