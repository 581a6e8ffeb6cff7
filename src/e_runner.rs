use crate::e_command_builder::LaunchRequest;
use crate::prelude::*;
use anyhow::Context;
use once_cell::sync::Lazy;

// The build currently running in the foreground, if any.
pub static GLOBAL_CHILD: Lazy<Arc<Mutex<Option<Child>>>> = Lazy::new(|| Arc::new(Mutex::new(None)));

/// Registers a global Ctrl+C handler once.
/// The handler kills a running build instead of tearing down the panel.
pub fn register_ctrlc_handler() -> Result<(), Box<dyn Error>> {
    ctrlc::set_handler(move || {
        let mut child_lock = match GLOBAL_CHILD.lock() {
            Ok(lock) => lock,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(child) = child_lock.as_mut() {
            eprintln!("Ctrl+C pressed, terminating running build...");
            let _ = child.kill();
        } else {
            eprintln!("Ctrl+C pressed, no build running. Exiting nicely.");
            exit(0);
        }
    })?;
    Ok(())
}

/// Opens a terminal for a build and types the command into it.
///
/// Output and exit status are not collected.
pub trait TerminalLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> anyhow::Result<()>;
}

/// Runs the command line through the platform shell in the current terminal.
#[derive(Debug, Clone)]
pub struct ShellLauncher {
    /// Seconds to linger after the build before handing the terminal back.
    pub wait_secs: u64,
}

impl ShellLauncher {
    pub fn new(wait_secs: u64) -> Self {
        ShellLauncher { wait_secs }
    }
}

impl TerminalLauncher for ShellLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> anyhow::Result<()> {
        set_terminal_title(&request.title);
        println!("{}> {}", request.cwd.display(), request.command_line);

        let mut cmd = shell_command(&request.command_line);
        cmd.current_dir(&request.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        let child = cmd
            .spawn()
            .with_context(|| format!("starting shell in {}", request.cwd.display()))?;
        debug!("spawned pid {} for '{}'", child.id(), request.title);

        *lock_child() = Some(child);
        // Poll rather than wait so the Ctrl+C handler can take the lock.
        let waited = loop {
            let status = match lock_child().as_mut() {
                Some(child) => child.try_wait(),
                None => break Ok(()),
            };
            match status {
                Ok(Some(_)) => break Ok(()),
                Ok(None) => std::thread::sleep(Duration::from_millis(100)),
                Err(e) => break Err(e),
            }
        };
        *lock_child() = None;
        waited.context("waiting for the build shell")?;

        if self.wait_secs > 0 {
            let message = format!(
                "Build finished. Press any key to return (or wait {} seconds).",
                self.wait_secs
            );
            crate::e_prompts::prompt(&message, self.wait_secs).ok();
        }
        Ok(())
    }
}

fn lock_child() -> std::sync::MutexGuard<'static, Option<Child>> {
    match GLOBAL_CHILD.lock() {
        Ok(lock) => lock,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Wraps a command line for the platform shell.
pub fn shell_command(command_line: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command_line]);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command_line]);
        cmd
    }
}

fn set_terminal_title(title: &str) {
    #[cfg(feature = "tui")]
    {
        let _ = crossterm::execute!(io::stdout(), crossterm::terminal::SetTitle(title));
    }
    #[cfg(not(feature = "tui"))]
    {
        debug!("terminal: {}", title);
    }
}

/// Records launches instead of running them; handy for `--dry-run` and tests.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    pub launched: Vec<LaunchRequest>,
}

impl TerminalLauncher for RecordingLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> anyhow::Result<()> {
        self.launched.push(request.clone());
        Ok(())
    }
}

/// Prints what would be run and returns.
#[derive(Debug, Default)]
pub struct DryRunLauncher;

impl TerminalLauncher for DryRunLauncher {
    fn launch(&mut self, request: &LaunchRequest) -> anyhow::Result<()> {
        println!("cwd: {}", request.cwd.display());
        println!("{}", request.command_line);
        Ok(())
    }
}
