#![allow(dead_code)]
use std::fs;
use std::io::Result as IoResult;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// The build file used throughout the integration tests.
pub const SCENARIO_XML: &str = r#"<project name="demo" default="build">
  <target name="init"/>
  <target name="build" depends="init" description="Build all"/>
  <target name="clean" description="Remove output"/>
</project>
"#;

/// A wrapper around a temporary workspace directory.
pub struct TestWorkspace {
    /// The temporary directory. When this is dropped, the directory and its contents are removed.
    pub temp_dir: TempDir,
    /// The workspace root handed to `-C`.
    pub root: PathBuf,
}

impl TestWorkspace {
    /// An empty workspace with no settings file.
    pub fn new() -> IoResult<Self> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path().join("workspace");
        fs::create_dir_all(&root)?;
        Ok(TestWorkspace { temp_dir, root })
    }

    /// Returns a reference to the workspace root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `contents` to `relative` under the root, creating parent directories.
    pub fn write_file(&self, relative: &str, contents: &str) -> IoResult<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Points `.ant-e.toml` at `build_file_path` without creating the file.
    pub fn configure(&self, build_file_path: &str) -> IoResult<()> {
        fs::write(
            self.root.join(".ant-e.toml"),
            format!("build_file_path = {:?}\n", build_file_path),
        )
    }

    pub fn settings(&self) -> IoResult<String> {
        fs::read_to_string(self.root.join(".ant-e.toml"))
    }
}

/// A workspace with the scenario build file at `relative`, already configured.
pub fn create_configured_workspace(relative: &str) -> IoResult<TestWorkspace> {
    let workspace = TestWorkspace::new()?;
    workspace.write_file(relative, SCENARIO_XML)?;
    workspace.configure(relative)?;
    Ok(workspace)
}
