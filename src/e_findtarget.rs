use crate::e_errors::PanelError;
use crate::e_target::SourceLocation;
use crate::prelude::*;

/// Default editor used to jump to a target declaration.
pub const DEFAULT_EDITOR: &str = "code";

/// Computes the editor arguments that place the cursor on the target line.
///
/// VSCode-style editors get `--goto file:line:1`; anything else gets the
/// `+line file` form understood by vi, nano, emacs and friends.
pub fn compute_editor_args(editor: &str, location: &SourceLocation) -> Vec<String> {
    let file = location.file.to_string_lossy().to_string();
    let stem = Path::new(editor)
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match stem.as_str() {
        "code" | "code-insiders" | "codium" | "cursor" => {
            vec!["--goto".to_string(), format!("{}:{}:1", file, location.line)]
        }
        "subl" | "zed" => vec![format!("{}:{}", file, location.line)],
        _ => vec![format!("+{}", location.line), file],
    }
}

/// Asynchronously opens the editor on a target's declaration line.
///
/// The file is checked first so a build file moved or deleted since the last
/// parse is reported instead of opening an empty buffer.
pub async fn open_in_editor(editor: &str, location: &SourceLocation) -> Result<(), PanelError> {
    if !location.file.is_file() {
        return Err(PanelError::NavigationFailure(format!(
            "{} does not exist",
            location.file.display()
        )));
    }

    let args = compute_editor_args(editor, location);
    debug!("editor: {} {:?}", editor, args);

    // Terminal editors need the real stdin and stdout; only stderr is kept
    // for the failure message.
    let mut cmd = if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", editor]);
        cmd
    } else {
        Command::new(editor)
    };
    cmd.args(&args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped());
    let output = cmd.spawn().and_then(|child| child.wait_with_output());

    match output {
        Ok(output) if output.status.success() => Ok(()),
        Ok(output) => Err(PanelError::NavigationFailure(format!(
            "{} exited with {}: {}",
            editor,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ))),
        Err(e) => Err(PanelError::NavigationFailure(format!(
            "could not start {}: {}",
            editor, e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn location(line: usize) -> SourceLocation {
        SourceLocation {
            file: PathBuf::from("/w/build.xml"),
            line,
        }
    }

    #[test]
    fn test_vscode_goto() {
        assert_eq!(
            compute_editor_args("code", &location(14)),
            vec!["--goto", "/w/build.xml:14:1"]
        );
        assert_eq!(
            compute_editor_args("/usr/bin/codium", &location(2))[0],
            "--goto"
        );
    }

    #[test]
    fn test_terminal_editor_plus_line() {
        assert_eq!(
            compute_editor_args("vim", &location(7)),
            vec!["+7", "/w/build.xml"]
        );
    }

    #[test]
    fn test_missing_file_is_navigation_failure() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let loc = SourceLocation {
            file: dir.path().join("moved.xml"),
            line: 1,
        };
        let result = futures::executor::block_on(open_in_editor("code", &loc));
        assert!(matches!(result, Err(PanelError::NavigationFailure(_))));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_editor_that_fails_is_navigation_failure() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("build.xml");
        fs::write(&file, "<project/>")?;
        let loc = SourceLocation { file, line: 1 };
        let result = futures::executor::block_on(open_in_editor("false", &loc));
        assert!(matches!(result, Err(PanelError::NavigationFailure(_))));
        let result = futures::executor::block_on(open_in_editor("true", &loc));
        assert!(result.is_ok());
        Ok(())
    }
}
