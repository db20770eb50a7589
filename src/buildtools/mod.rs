//! Everything needed to run Spigot's BuildTools: the argument model, the
//! process runner and the two downloads (version index and BuildTools.jar).

pub mod args;
pub mod download;
pub mod runner;
pub mod state;
pub mod task;
pub mod versions;

pub use args::{BuildToolsArgument, CompilationTarget};
pub use runner::BuildToolsRunner;
pub use state::BuildToolsState;
pub use task::BuildToolsTask;
