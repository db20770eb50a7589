use portable_pty::CommandBuilder;
use std::path::PathBuf;

use super::args::BuildToolsArgument;

/// A fully resolved BuildTools invocation.
#[derive(Debug, Clone)]
pub struct BuildToolsTask {
    pub java: String,
    pub jar_file: PathBuf,
    pub working_directory: PathBuf,
    pub args: Vec<BuildToolsArgument>,
}

impl BuildToolsTask {
    /// Arguments passed to java, starting with `-jar <jar>`.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec![
            "-jar".to_string(),
            self.jar_file.to_string_lossy().to_string(),
        ];
        argv.extend(self.args.iter().flat_map(BuildToolsArgument::to_args));
        argv
    }

    /// The full command line, for display.
    pub fn command_line(&self) -> Vec<String> {
        let mut line = vec![self.java.clone()];
        line.extend(self.argv());
        line
    }

    pub fn command(&self) -> CommandBuilder {
        let mut cmd = CommandBuilder::new(&self.java);
        cmd.args(self.argv());
        cmd.cwd(&self.working_directory);
        // BuildTools shells out to git and maven, which expect a usable terminal.
        cmd.env("TERM", "xterm-256color");
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_starts_with_java_and_jar() {
        let task = BuildToolsTask {
            java: "/opt/jdk/bin/java".into(),
            jar_file: PathBuf::from("/w/BuildTools.jar"),
            working_directory: PathBuf::from("/w"),
            args: vec![
                BuildToolsArgument::NoGui,
                BuildToolsArgument::Rev("1.20.4".into()),
            ],
        };

        assert_eq!(
            task.command_line(),
            vec![
                "/opt/jdk/bin/java",
                "-jar",
                "/w/BuildTools.jar",
                "--nogui",
                "--rev",
                "1.20.4"
            ]
        );
    }
}
