//! Tauri commands for configuring and running BuildTools.
//! Errors cross the IPC boundary as strings.

use std::path::PathBuf;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, Manager, State};
use tauri_plugin_dialog::DialogExt;

use crate::buildtools::{
    download, versions, BuildToolsArgument, BuildToolsRunner, BuildToolsState,
};
use crate::error::ShellResult;
use crate::view::backend::LOG_LINE_CHANNEL;

/// Emitted once per run with the exit code, or null when it is unknown.
pub const EXIT_EVENT: &str = "buildtools-exit";

/// Download BuildTools.jar if needed and start a run, streaming output as `log-line`.
pub(crate) async fn start_buildtools(app: &AppHandle) -> ShellResult<()> {
    let task = app.state::<BuildToolsState>().task();
    let runner = app.state::<Arc<BuildToolsRunner>>().inner().clone();
    // Held across the download; a concurrent start fails with AlreadyRunning.
    let reservation = runner.reserve()?;

    download::ensure_jar(&task.jar_file).await?;

    let line_app = app.clone();
    let exit_app = app.clone();
    runner.spawn(
        reservation,
        &task,
        move |line| {
            let _ = line_app.emit(LOG_LINE_CHANNEL, line);
        },
        move |code| {
            let _ = exit_app.emit(EXIT_EVENT, code);
        },
    )
}

#[tauri::command]
pub async fn spawn_buildtools(app: AppHandle) -> Result<(), String> {
    start_buildtools(&app).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub fn cancel_buildtools(runner: State<'_, Arc<BuildToolsRunner>>) {
    runner.cancel();
}

#[tauri::command]
pub fn buildtools_running(runner: State<'_, Arc<BuildToolsRunner>>) -> bool {
    runner.is_running()
}

#[tauri::command]
pub async fn get_versions() -> Result<Vec<String>, String> {
    versions::fetch_versions().await.map_err(|e| e.to_string())
}

/// The command line the next run would use.
#[tauri::command]
pub fn get_args(state: State<'_, BuildToolsState>) -> Vec<String> {
    state.task().command_line()
}

#[tauri::command]
pub fn set_rev(state: State<'_, BuildToolsState>, rev: String) {
    state.set_rev(rev);
}

#[tauri::command]
pub fn set_remapped(state: State<'_, BuildToolsState>, enabled: bool) {
    state.set_flag(BuildToolsArgument::Remapped, enabled);
}

#[tauri::command]
pub fn set_disable_cert(state: State<'_, BuildToolsState>, enabled: bool) {
    state.set_flag(BuildToolsArgument::DisableCert, enabled);
}

#[tauri::command]
pub fn set_disable_java_check(state: State<'_, BuildToolsState>, enabled: bool) {
    state.set_flag(BuildToolsArgument::DisableJavaCheck, enabled);
}

#[tauri::command]
pub fn set_dont_update(state: State<'_, BuildToolsState>, enabled: bool) {
    state.set_flag(BuildToolsArgument::DontUpdate, enabled);
}

#[tauri::command]
pub fn set_skip_compile(state: State<'_, BuildToolsState>, enabled: bool) {
    state.set_flag(BuildToolsArgument::SkipCompile, enabled);
}

#[tauri::command]
pub fn set_generate_source(state: State<'_, BuildToolsState>, enabled: bool) {
    state.set_flag(BuildToolsArgument::GenerateSource, enabled);
}

#[tauri::command]
pub fn set_generate_docs(state: State<'_, BuildToolsState>, enabled: bool) {
    state.set_flag(BuildToolsArgument::GenerateDocs, enabled);
}

#[tauri::command]
pub fn set_dev(state: State<'_, BuildToolsState>, enabled: bool) {
    state.set_flag(BuildToolsArgument::Dev, enabled);
}

#[tauri::command]
pub fn set_experimental(state: State<'_, BuildToolsState>, enabled: bool) {
    state.set_flag(BuildToolsArgument::Experimental, enabled);
}

#[tauri::command]
pub fn set_compile_if_changed(state: State<'_, BuildToolsState>, enabled: bool) {
    state.set_flag(BuildToolsArgument::CompileIfChanged, enabled);
}

#[tauri::command]
pub fn set_output_dir(state: State<'_, BuildToolsState>, output_dir_full_path: String) {
    state.set_output_dir(output_dir_full_path);
}

#[tauri::command]
pub fn set_final_name(state: State<'_, BuildToolsState>, final_name: String) {
    state.set_final_name(final_name);
}

#[tauri::command]
pub fn set_pull_request(state: State<'_, BuildToolsState>, repo: String, id: u16) {
    state.set_pull_request(repo, id);
}

#[tauri::command]
pub fn set_compile(state: State<'_, BuildToolsState>, targets: Vec<String>) -> Result<(), String> {
    state.set_compile(targets).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_working_directory(state: State<'_, BuildToolsState>, full_path: String) {
    state.set_working_directory(PathBuf::from(full_path));
}

/// Let the user choose the working directory with a native folder dialog.
#[tauri::command]
pub async fn pick_working_directory(
    app: AppHandle,
    state: State<'_, BuildToolsState>,
) -> Result<Option<String>, String> {
    let picked = app
        .dialog()
        .file()
        .set_directory(state.working_directory())
        .blocking_pick_folder();

    let Some(folder) = picked else {
        return Ok(None);
    };
    let path = folder.into_path().map_err(|e| e.to_string())?;
    log::info!("working directory set to {}", path.display());
    state.set_working_directory(&path);
    Ok(Some(path.to_string_lossy().to_string()))
}
