use std::path::{Path, PathBuf};

/// Default build tool executable.
pub const DEFAULT_ANT: &str = "ant";

/// Everything a terminal needs to run one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Terminal title, `Ant: <target>`.
    pub title: String,
    /// Directory containing the build file.
    pub cwd: PathBuf,
    /// The line typed into the terminal.
    pub command_line: String,
}

/// A builder that constructs an Ant invocation for a given target.
#[derive(Debug, Clone)]
pub struct AntCommandBuilder {
    program: String,
    build_file: Option<String>,
    target: Option<String>,
    cwd: Option<PathBuf>,
}

impl Default for AntCommandBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_ANT)
    }
}

impl AntCommandBuilder {
    /// Creates a builder for the given build tool executable.
    pub fn new(program: impl Into<String>) -> Self {
        AntCommandBuilder {
            program: program.into(),
            build_file: None,
            target: None,
            cwd: None,
        }
    }

    /// Points the command at a resolved build file: the working directory
    /// becomes its parent and `-buildfile` gets its basename.
    pub fn with_build_file(mut self, resolved: &Path) -> Self {
        self.cwd = resolved
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);
        self.build_file = resolved
            .file_name()
            .map(|name| name.to_string_lossy().to_string());
        self
    }

    pub fn with_target(mut self, name: &str) -> Self {
        self.target = Some(name.to_string());
        self
    }

    /// The text typed into a terminal: the build file is always quoted and
    /// the target only when it contains whitespace.
    ///
    /// # Example
    /// ```
    /// use ant_e::e_command_builder::AntCommandBuilder;
    /// use std::path::Path;
    ///
    /// let line = AntCommandBuilder::default()
    ///     .with_build_file(Path::new("/work/app/build.xml"))
    ///     .with_target("run tests")
    ///     .command_line();
    /// assert_eq!(line, "ant -buildfile \"build.xml\" \"run tests\"");
    /// ```
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        if let Some(ref build_file) = self.build_file {
            line.push_str(&format!(" -buildfile \"{}\"", build_file));
        }
        if let Some(ref target) = self.target {
            line.push(' ');
            line.push_str(&quote_target(target));
        }
        line
    }

    pub fn into_request(self) -> LaunchRequest {
        LaunchRequest {
            title: format!("Ant: {}", self.target.as_deref().unwrap_or_default()),
            cwd: self.cwd.clone().unwrap_or_else(|| PathBuf::from(".")),
            command_line: self.command_line(),
        }
    }
}

fn quote_target(target: &str) -> String {
    if target.chars().any(char::is_whitespace) {
        format!("\"{}\"", target)
    } else {
        target.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_target() {
        let request = AntCommandBuilder::default()
            .with_build_file(Path::new("/work/proj/build.xml"))
            .with_target("compile")
            .into_request();
        assert_eq!(request.command_line, "ant -buildfile \"build.xml\" compile");
        assert_eq!(request.cwd, PathBuf::from("/work/proj"));
        assert_eq!(request.title, "Ant: compile");
    }

    #[test]
    fn test_target_with_whitespace_is_quoted() {
        let line = AntCommandBuilder::new("/opt/ant/bin/ant")
            .with_build_file(Path::new("ci.xml"))
            .with_target("deploy\tstaging")
            .command_line();
        assert_eq!(line, "/opt/ant/bin/ant -buildfile \"ci.xml\" \"deploy\tstaging\"");
    }

    #[test]
    fn test_relative_build_file_runs_in_current_dir() {
        let request = AntCommandBuilder::default()
            .with_build_file(Path::new("build.xml"))
            .with_target("jar")
            .into_request();
        assert_eq!(request.cwd, PathBuf::from("."));
        assert_eq!(request.command_line, "ant -buildfile \"build.xml\" jar");
    }
}
