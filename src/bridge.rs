use serde_json::{json, Value};
use tauri::{AppHandle, Listener, Manager};

use crate::buildtools::{versions, BuildToolsState};
use crate::commands::start_buildtools;
use crate::error::{ShellError, ShellResult};
use crate::view::backend::{GET_VERSIONS, SET_REV, SPAWN_BUILDTOOLS};
use crate::view::{Backend, EventHandler, InvokeFuture, Subscription};

/// [`Backend`] for the running app: commands are routed in-process and
/// subscriptions go through the Tauri event bus.
#[derive(Clone)]
pub struct AppBackend {
    app: AppHandle,
}

impl AppBackend {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl Backend for AppBackend {
    fn invoke(&self, command: &str, args: Value) -> InvokeFuture {
        let app = self.app.clone();
        let command = command.to_string();
        Box::pin(async move {
            dispatch(&app, &command, args)
                .await
                .map_err(|e| e.to_string())
        })
    }

    fn subscribe(&self, channel: &str, handler: EventHandler) -> Subscription {
        let id = self
            .app
            .listen(channel.to_string(), move |event| handler(decode_payload(event.payload())));
        let app = self.app.clone();
        Subscription::new(move || app.unlisten(id))
    }
}

/// A command from the views, decoded from its name and JSON arguments.
#[derive(Debug, PartialEq, Eq)]
enum Request {
    Spawn,
    SetRev(String),
    GetVersions,
}

impl Request {
    fn parse(command: &str, args: &Value) -> ShellResult<Self> {
        match command {
            SPAWN_BUILDTOOLS => Ok(Request::Spawn),
            SET_REV => args
                .get("rev")
                .and_then(Value::as_str)
                .map(|rev| Request::SetRev(rev.to_string()))
                .ok_or(ShellError::MissingArgument("rev")),
            GET_VERSIONS => Ok(Request::GetVersions),
            other => Err(ShellError::UnknownCommand(other.to_string())),
        }
    }
}

async fn dispatch(app: &AppHandle, command: &str, args: Value) -> ShellResult<Value> {
    log::debug!("dispatching {command} {args}");
    match Request::parse(command, &args)? {
        Request::Spawn => {
            start_buildtools(app).await?;
            Ok(Value::Null)
        }
        Request::SetRev(rev) => {
            app.state::<BuildToolsState>().set_rev(rev);
            Ok(Value::Null)
        }
        Request::GetVersions => Ok(json!(versions::fetch_versions().await?)),
    }
}

/// Event payloads arrive JSON-encoded. Anything that is not a JSON string is
/// passed through as-is.
fn decode_payload(raw: &str) -> String {
    serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_string())
}
