use std::fmt;
use std::mem::discriminant;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ShellError;

/// Artifacts BuildTools can be told to compile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompilationTarget {
    None,
    CraftBukkit,
    Spigot,
}

impl CompilationTarget {
    pub fn as_flag_value(&self) -> &'static str {
        match self {
            CompilationTarget::None => "NONE",
            CompilationTarget::CraftBukkit => "CRAFTBUKKIT",
            CompilationTarget::Spigot => "SPIGOT",
        }
    }
}

impl FromStr for CompilationTarget {
    type Err = ShellError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CompilationTarget::None),
            "craftbukkit" => Ok(CompilationTarget::CraftBukkit),
            "spigot" => Ok(CompilationTarget::Spigot),
            _ => Err(ShellError::UnknownTarget(raw.to_string())),
        }
    }
}

/// One BuildTools command-line option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildToolsArgument {
    NoGui,
    Remapped,
    Rev(String),
    DisableCert,
    DisableJavaCheck,
    DontUpdate,
    SkipCompile,
    GenerateSource,
    GenerateDocs,
    Dev,
    Experimental,
    OutputDir(PathBuf),
    FinalName(String),
    PullRequest(String, u16),
    Compile(Vec<CompilationTarget>),
    CompileIfChanged,
}

impl BuildToolsArgument {
    fn flag(&self) -> &'static str {
        match self {
            BuildToolsArgument::NoGui => "--nogui",
            BuildToolsArgument::Remapped => "--remapped",
            BuildToolsArgument::Rev(_) => "--rev",
            BuildToolsArgument::DisableCert => "--disable-certificate-check",
            BuildToolsArgument::DisableJavaCheck => "--disable-java-check",
            BuildToolsArgument::DontUpdate => "--dont-update",
            BuildToolsArgument::SkipCompile => "--skip-compile",
            BuildToolsArgument::GenerateSource => "--generate-source",
            BuildToolsArgument::GenerateDocs => "--generate-docs",
            BuildToolsArgument::Dev => "--dev",
            BuildToolsArgument::Experimental => "--experimental",
            BuildToolsArgument::OutputDir(_) => "--output-dir",
            BuildToolsArgument::FinalName(_) => "--final-name",
            BuildToolsArgument::PullRequest(_, _) => "--pull-request",
            BuildToolsArgument::Compile(_) => "--compile",
            BuildToolsArgument::CompileIfChanged => "--compile-if-changed",
        }
    }

    fn value(&self) -> Option<String> {
        match self {
            BuildToolsArgument::Rev(rev) => Some(rev.clone()),
            BuildToolsArgument::OutputDir(dir) => Some(dir.to_string_lossy().to_string()),
            BuildToolsArgument::FinalName(name) => Some(name.clone()),
            BuildToolsArgument::PullRequest(repo, id) => Some(format!("{repo}:{id}")),
            BuildToolsArgument::Compile(targets) => Some(
                targets
                    .iter()
                    .map(CompilationTarget::as_flag_value)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            _ => None,
        }
    }

    /// Process arguments for this option. A value is always its own argument,
    /// so paths containing spaces survive intact.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![self.flag().to_string()];
        args.extend(self.value());
        args
    }

    /// True when both arguments are the same option, ignoring their values.
    pub fn same_kind(&self, other: &BuildToolsArgument) -> bool {
        discriminant(self) == discriminant(other)
    }
}

impl fmt::Display for BuildToolsArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_args().join(" "))
    }
}
