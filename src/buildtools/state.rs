use parking_lot::Mutex;
use std::path::{Path, PathBuf};

use super::args::{BuildToolsArgument, CompilationTarget};
use super::task::BuildToolsTask;
use crate::error::ShellResult;

pub const BUILD_TOOLS_JAR: &str = "BuildTools.jar";

/// Arguments and working directory for the next BuildTools run.
pub struct BuildToolsState {
    args: Mutex<Vec<BuildToolsArgument>>,
    working_directory: Mutex<PathBuf>,
    java: String,
}

impl BuildToolsState {
    pub fn new(working_directory: PathBuf, java: impl Into<String>) -> Self {
        Self {
            args: Mutex::new(vec![BuildToolsArgument::NoGui]),
            working_directory: Mutex::new(working_directory),
            java: java.into(),
        }
    }

    pub fn args(&self) -> Vec<BuildToolsArgument> {
        self.args.lock().clone()
    }

    pub fn working_directory(&self) -> PathBuf {
        self.working_directory.lock().clone()
    }

    pub fn set_working_directory(&self, path: impl AsRef<Path>) {
        *self.working_directory.lock() = path.as_ref().to_path_buf();
    }

    /// Add a valueless flag when enabled, drop it otherwise.
    pub fn set_flag(&self, argument: BuildToolsArgument, enabled: bool) {
        let mut args = self.args.lock();
        args.retain(|arg| arg != &argument);
        if enabled {
            args.push(argument);
        }
    }

    /// Replace any argument of the same kind with `argument`.
    pub fn replace(&self, argument: BuildToolsArgument) {
        let mut args = self.args.lock();
        args.retain(|arg| !arg.same_kind(&argument));
        args.push(argument);
    }

    pub fn set_rev(&self, rev: impl Into<String>) {
        self.replace(BuildToolsArgument::Rev(rev.into()));
    }

    pub fn set_output_dir(&self, path: impl Into<PathBuf>) {
        self.replace(BuildToolsArgument::OutputDir(path.into()));
    }

    pub fn set_final_name(&self, name: impl Into<String>) {
        self.replace(BuildToolsArgument::FinalName(name.into()));
    }

    pub fn set_pull_request(&self, repo: impl Into<String>, id: u16) {
        self.replace(BuildToolsArgument::PullRequest(repo.into(), id));
    }

    pub fn set_compile<I, S>(&self, targets: I) -> ShellResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets = targets
            .into_iter()
            .map(|target| target.as_ref().parse::<CompilationTarget>())
            .collect::<ShellResult<Vec<_>>>()?;
        self.replace(BuildToolsArgument::Compile(targets));
        Ok(())
    }

    /// Snapshot the current settings into a runnable task.
    pub fn task(&self) -> BuildToolsTask {
        let working_directory = self.working_directory();
        BuildToolsTask {
            java: self.java.clone(),
            jar_file: working_directory.join(BUILD_TOOLS_JAR),
            working_directory,
            args: self.args(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;

    fn state() -> BuildToolsState {
        BuildToolsState::new(PathBuf::from("/tmp/bt"), "java")
    }

    #[test]
    fn starts_with_nogui_only() {
        assert_eq!(state().args(), vec![BuildToolsArgument::NoGui]);
    }

    #[test]
    fn set_flag_adds_once_and_removes() {
        let state = state();
        state.set_flag(BuildToolsArgument::Remapped, true);
        state.set_flag(BuildToolsArgument::Remapped, true);
        assert_eq!(
            state.args(),
            vec![BuildToolsArgument::NoGui, BuildToolsArgument::Remapped]
        );

        state.set_flag(BuildToolsArgument::Remapped, false);
        assert_eq!(state.args(), vec![BuildToolsArgument::NoGui]);
    }

    #[test]
    fn set_rev_replaces_previous_rev() {
        let state = state();
        state.set_rev("1.19.4");
        state.set_flag(BuildToolsArgument::Dev, true);
        state.set_rev("1.20.4");
        assert_eq!(
            state.args(),
            vec![
                BuildToolsArgument::NoGui,
                BuildToolsArgument::Dev,
                BuildToolsArgument::Rev("1.20.4".into()),
            ]
        );
    }

    #[test]
    fn set_compile_rejects_unknown_targets_without_touching_args() {
        let state = state();
        state.set_compile(["spigot"]).unwrap();
        let err = state.set_compile(["spigot", "paper"]).unwrap_err();
        assert!(matches!(err, ShellError::UnknownTarget(_)));
        assert_eq!(
            state.args(),
            vec![
                BuildToolsArgument::NoGui,
                BuildToolsArgument::Compile(vec![CompilationTarget::Spigot]),
            ]
        );
    }

    #[test]
    fn task_uses_current_working_directory() {
        let state = state();
        state.set_working_directory("/srv/spigot");
        let task = state.task();
        assert_eq!(task.working_directory, PathBuf::from("/srv/spigot"));
        assert_eq!(task.jar_file, PathBuf::from("/srv/spigot").join(BUILD_TOOLS_JAR));
    }
}
