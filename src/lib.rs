pub mod bridge;
pub mod buildtools;
pub mod commands;
pub mod config;
pub mod error;
pub mod ui;
pub mod view;

use std::sync::Arc;
use tauri::{Emitter, Manager, RunEvent};

use buildtools::{BuildToolsRunner, BuildToolsState};
use config::ShellConfig;
use ui::{MainView, UI_RENDER_EVENT};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let config = ShellConfig::from_env();
    let runner = Arc::new(BuildToolsRunner::new());
    let runner_for_shutdown = runner.clone();
    let version_source = config.version_source();

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::default()
                .level(config.log_level)
                .build(),
        )
        .plugin(tauri_plugin_dialog::init())
        .manage(BuildToolsState::new(
            config.working_directory.clone(),
            config.java.clone(),
        ))
        .manage(runner)
        .setup(move |app| {
            log::info!(
                "working directory {}, java '{}'",
                config.working_directory.display(),
                config.java
            );

            let handle = app.handle().clone();
            let view = MainView::new(bridge::AppBackend::new(handle.clone()), version_source)
                .on_render(move |update| {
                    let _ = handle.emit(UI_RENDER_EVENT, update);
                });
            view.mount();
            app.manage(view);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::spawn_buildtools,
            commands::cancel_buildtools,
            commands::buildtools_running,
            commands::get_versions,
            commands::get_args,
            commands::set_rev,
            commands::set_remapped,
            commands::set_disable_cert,
            commands::set_disable_java_check,
            commands::set_dont_update,
            commands::set_skip_compile,
            commands::set_generate_source,
            commands::set_generate_docs,
            commands::set_dev,
            commands::set_experimental,
            commands::set_compile_if_changed,
            commands::set_output_dir,
            commands::set_final_name,
            commands::set_pull_request,
            commands::set_compile,
            commands::set_working_directory,
            commands::pick_working_directory,
            ui::ui_snapshot,
            ui::ui_start,
            ui::ui_set_selector_open,
            ui::ui_search,
            ui::ui_select_version,
            ui::ui_refresh_versions,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(move |app_handle, event| {
            if let RunEvent::Exit = event {
                log::info!("App shutting down - stopping BuildTools");
                if let Some(view) = app_handle.try_state::<MainView>() {
                    view.unmount();
                }
                runner_for_shutdown.shutdown();
            }
        });
}
