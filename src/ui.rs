//! Commands the webview uses to drive the [`RootView`].
//! Every change is pushed back to it as a `ui-render` event carrying a
//! [`ViewUpdate`](crate::view::ViewUpdate): a full redraw, or one appended log line.

use tauri::State;

use crate::bridge::AppBackend;
use crate::view::{RootView, ViewSnapshot};

pub const UI_RENDER_EVENT: &str = "ui-render";

pub type MainView = RootView<AppBackend>;

#[tauri::command]
pub fn ui_snapshot(view: State<'_, MainView>) -> ViewSnapshot {
    view.snapshot()
}

#[tauri::command]
pub fn ui_start(view: State<'_, MainView>) {
    view.start();
}

#[tauri::command]
pub fn ui_set_selector_open(view: State<'_, MainView>, open: bool) {
    view.set_selector_open(open);
}

#[tauri::command]
pub fn ui_search(view: State<'_, MainView>, query: String) {
    view.search(query);
}

#[tauri::command]
pub fn ui_select_version(view: State<'_, MainView>, version: String) {
    view.select_version(&version);
}

/// Ask the backend for the version list again.
#[tauri::command]
pub async fn ui_refresh_versions(view: State<'_, MainView>) -> Result<(), String> {
    view.refresh_versions().await;
    Ok(())
}
