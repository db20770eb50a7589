use std::env;
use std::path::PathBuf;

use crate::view::VersionSource;

pub const WORKDIR_ENV: &str = "BUILDTOOLS_GUI_WORKDIR";
pub const JAVA_ENV: &str = "BUILDTOOLS_GUI_JAVA";
pub const VERSION_SOURCE_ENV: &str = "BUILDTOOLS_GUI_VERSION_SOURCE";
pub const LOG_LEVEL_ENV: &str = "BUILDTOOLS_GUI_LOG_LEVEL";

const DEFAULT_JAVA: &str = "java";
const WORKDIR_NAME: &str = "buildtools-gui";

/// Where the version list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSourceKind {
    Constant,
    Remote,
}

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub working_directory: PathBuf,
    pub java: String,
    pub version_source: VersionSourceKind,
    pub log_level: log::LevelFilter,
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let working_directory = get(WORKDIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_working_directory);
        let java = get(JAVA_ENV).unwrap_or_else(|| DEFAULT_JAVA.to_string());
        let version_source = match get(VERSION_SOURCE_ENV).as_deref() {
            Some(raw) => parse_version_source(raw).unwrap_or_else(|| {
                log::warn!("unsupported {VERSION_SOURCE_ENV} '{raw}', using the constant list");
                VersionSourceKind::Constant
            }),
            None => VersionSourceKind::Constant,
        };
        let log_level = get(LOG_LEVEL_ENV)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(log::LevelFilter::Info);

        Self {
            working_directory,
            java,
            version_source,
            log_level,
        }
    }

    pub fn version_source(&self) -> VersionSource {
        match self.version_source {
            VersionSourceKind::Constant => VersionSource::placeholder(),
            VersionSourceKind::Remote => VersionSource::Backend,
        }
    }
}

fn parse_version_source(raw: &str) -> Option<VersionSourceKind> {
    match raw.to_ascii_lowercase().as_str() {
        "constant" | "static" => Some(VersionSourceKind::Constant),
        "remote" | "backend" => Some(VersionSourceKind::Remote),
        _ => None,
    }
}

fn default_working_directory() -> PathBuf {
    env::temp_dir().join(WORKDIR_NAME)
}
