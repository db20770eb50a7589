use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

use super::backend::{fire_and_forget, Backend, Subscription, LOG_LINE_CHANNEL, SPAWN_BUILDTOOLS};
use super::break_string::{break_string, line_fragments, Fragment};
use super::version_selector::{SelectorSnapshot, VersionSelector};
use super::version_source::VersionSource;

pub type RenderHook = Arc<dyn Fn(&ViewUpdate) + Send + Sync>;

/// Everything the webview needs to draw the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub log: Vec<Fragment>,
    pub selector: SelectorSnapshot,
}

/// One log line, rendered on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogLine {
    /// Position of the line in the log; the first (always empty) line is 0.
    pub index: usize,
    pub fragments: Vec<Fragment>,
}

/// What the webview has to do after a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewUpdate {
    /// Redraw the whole window.
    Full(ViewSnapshot),
    /// Append one line to the log panel; nothing else changed.
    LogLine(LogLine),
}

#[derive(Default)]
struct ViewState {
    log: String,
    // Index of the last line in `log`.
    last_line: usize,
    versions: Vec<String>,
    selector: VersionSelector,
    mounted: bool,
}

impl ViewState {
    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            log: break_string(&self.log),
            selector: self.selector.snapshot(&self.versions),
        }
    }

    fn append_line(&mut self, line: &str) -> LogLine {
        self.log.push('\n');
        self.log.push_str(line);
        self.last_line += 1;
        LogLine {
            index: self.last_line,
            fragments: line_fragments(self.last_line, line),
        }
    }

    fn clear_log(&mut self) {
        self.log.clear();
        self.last_line = 0;
    }
}

/// Top-level view: the log panel, the start button and the version picker.
pub struct RootView<B: Backend> {
    backend: Arc<B>,
    source: VersionSource,
    state: Arc<Mutex<ViewState>>,
    subscription: Mutex<Option<Subscription>>,
    render: Option<RenderHook>,
}

impl<B: Backend> RootView<B> {
    pub fn new(backend: B, source: VersionSource) -> Self {
        let state = ViewState {
            versions: source.initial(),
            ..ViewState::default()
        };
        Self {
            backend: Arc::new(backend),
            source,
            state: Arc::new(Mutex::new(state)),
            subscription: Mutex::new(None),
            render: None,
        }
    }

    /// Called after every state change: a full snapshot, or just the appended
    /// line when a log line arrives.
    pub fn on_render(mut self, hook: impl Fn(&ViewUpdate) + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(hook));
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Start listening for log lines and, for a remote source, request the version list.
    pub fn mount(&self) {
        let mut subscription = self.subscription.lock();
        if subscription.is_some() {
            return;
        }
        self.state.lock().mounted = true;

        let state = self.state.clone();
        let render = self.render.clone();
        *subscription = Some(self.backend.subscribe(
            LOG_LINE_CHANNEL,
            Box::new(move |line: String| {
                let appended = {
                    let mut state = state.lock();
                    // A late delivery after unmount must not touch the log.
                    if !state.mounted {
                        return;
                    }
                    state.append_line(&line)
                };
                if let Some(render) = &render {
                    render(&ViewUpdate::LogLine(appended));
                }
            }),
        ));
        drop(subscription);

        if self.source == VersionSource::Backend {
            tauri::async_runtime::spawn(self.load_versions());
        }
    }

    /// Fetch started by `mount`. A reply that arrives after `unmount` is dropped.
    fn load_versions(&self) -> impl Future<Output = ()> + Send + 'static {
        let backend = self.backend.clone();
        let source = self.source.clone();
        let state = self.state.clone();
        let render = self.render.clone();
        async move {
            let Some(versions) = source.fetch(&*backend).await else {
                return;
            };
            let snapshot = {
                let mut state = state.lock();
                if !state.mounted {
                    return;
                }
                state.versions = versions;
                state.snapshot()
            };
            if let Some(render) = &render {
                render(&ViewUpdate::Full(snapshot));
            }
        }
    }

    /// Stop listening. No log line is appended after this returns.
    pub fn unmount(&self) {
        self.state.lock().mounted = false;
        if let Some(subscription) = self.subscription.lock().take() {
            subscription.unsubscribe();
        }
    }

    /// Clear the log and ask the shell to run BuildTools.
    pub fn start(&self) {
        self.update(|state| state.clear_log());
        fire_and_forget(&*self.backend, SPAWN_BUILDTOOLS, Value::Null);
    }

    /// Re-request the version list, keeping the current one when nothing comes back.
    pub async fn refresh_versions(&self) {
        if let Some(versions) = self.source.fetch(&*self.backend).await {
            self.update(|state| state.versions = versions);
        }
    }

    pub fn set_selector_open(&self, open: bool) {
        self.update(|state| state.selector.set_open(open));
    }

    pub fn search(&self, query: impl Into<String>) {
        let query = query.into();
        self.update(|state| state.selector.search(query));
    }

    pub fn select_version(&self, candidate: &str) {
        let backend = self.backend.clone();
        self.update(|state| state.selector.select(&*backend, candidate));
    }

    pub fn log(&self) -> String {
        self.state.lock().log.clone()
    }

    pub fn versions(&self) -> Vec<String> {
        self.state.lock().versions.clone()
    }

    pub fn selected_version(&self) -> String {
        self.state.lock().selector.value().to_string()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.lock().snapshot()
    }

    fn update(&self, change: impl FnOnce(&mut ViewState)) {
        let snapshot = {
            let mut state = self.state.lock();
            change(&mut state);
            state.snapshot()
        };
        if let Some(render) = &self.render {
            render(&ViewUpdate::Full(snapshot));
        }
    }
}

impl<B: Backend> Drop for RootView<B> {
    fn drop(&mut self) {
        self.unmount();
    }
}
