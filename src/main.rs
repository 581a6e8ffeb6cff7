//! # ant-e
//!
//! `ant-e` lists the targets of an Ant build file and runs them.
//! Without a subcommand it opens an interactive panel in the terminal.
//!
//! ## Quick Start
//! ```sh
//! ant-e configure build.xml
//! ant-e list --primary
//! ant-e run jar
//! ant-e
//! ```

use ant_e::e_cli::{print_version_and_features, Commands};
use ant_e::e_notify::{ConsoleNotifier, Notifier};
use ant_e::e_picker::collect_build_file_candidates;
use ant_e::e_prompts::prompt_line;
use ant_e::e_render::{PRIMARY_ICON, SECONDARY_ICON};
use ant_e::e_runner::{register_ctrlc_handler, DryRunLauncher, ShellLauncher, TerminalLauncher};
use ant_e::prelude::*;
use ant_e::{AntTarget, Cli, PanelSession, Tools, Workspace};
use clap::Parser;

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.version {
        print_version_and_features();
        exit(0);
    }

    init_logging(cli.log_file.as_deref())?;

    let workspace = match &cli.workspace {
        Some(dir) => Workspace::new(dir),
        None => Workspace::from_current_dir()?,
    };
    debug!("workspace root: {}", workspace.root().display());
    let tools = Tools {
        ant: cli.ant.clone(),
        editor: cli.editor.clone(),
    };

    if let Err(e) = register_ctrlc_handler() {
        warn!("could not install Ctrl+C handler: {}", e);
    }

    let errors = match cli.command.clone().unwrap_or(Commands::Tui) {
        Commands::Tui => run_panel(workspace, tools, cli.wait)?,
        Commands::List {
            primary,
            search,
            json,
        } => list_targets(workspace, tools, primary, search.as_deref(), json)?,
        Commands::Run { target, dry_run } => {
            if dry_run {
                run_target(workspace, tools, DryRunLauncher, &target)
            } else {
                run_target(workspace, tools, ShellLauncher::new(cli.wait), &target)
            }
        }
        Commands::Open { target } => open_target(workspace, tools, &target),
        Commands::Configure { path } => configure(workspace, tools, path)?,
    };

    if errors > 0 {
        exit(1);
    }
    Ok(())
}

/// `RUST_LOG` controls verbosity; logging is off unless asked for.
fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"));
    if let Some(path) = log_file {
        let file = fs::File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn console_session<L: TerminalLauncher>(
    workspace: Workspace,
    tools: Tools,
    launcher: L,
) -> PanelSession<ConsoleNotifier, L> {
    PanelSession::new(workspace, tools, ConsoleNotifier::default(), launcher)
}

#[cfg(feature = "tui")]
fn run_panel(workspace: Workspace, tools: Tools, wait_secs: u64) -> Result<usize, Box<dyn Error>> {
    ant_e::e_tui::tui_interactive::launch_tui(workspace, tools, wait_secs)?;
    Ok(0)
}

#[cfg(not(feature = "tui"))]
fn run_panel(workspace: Workspace, tools: Tools, _wait_secs: u64) -> Result<usize, Box<dyn Error>> {
    eprintln!("ant-e was built without the tui feature; listing targets instead.");
    list_targets(workspace, tools, false, None, false)
}

fn list_targets(
    workspace: Workspace,
    tools: Tools,
    primary: bool,
    search: Option<&str>,
    json: bool,
) -> Result<usize, Box<dyn Error>> {
    let mut session = console_session(workspace, tools, DryRunLauncher);
    session.notifier_mut().quiet_stdout = json;
    {
        let view = session.view_mut();
        if primary {
            view.toggle_primary_only();
        }
        if let Some(query) = search {
            view.set_search_query(query);
        }
    }
    let targets = session.visible_targets();

    if json {
        print_json(&targets)?;
    } else {
        print_table(&targets);
    }
    Ok(session.notifier().errors)
}

fn print_table(targets: &[AntTarget]) {
    let width = targets.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for target in targets {
        let icon = if target.is_primary() {
            PRIMARY_ICON
        } else {
            SECONDARY_ICON
        };
        if target.description.is_empty() {
            println!("{} {}", icon, target.name);
        } else {
            println!("{} {:<width$}  {}", icon, target.name, target.description, width = width);
        }
    }
}

#[cfg(feature = "uses_serde")]
fn print_json(targets: &[AntTarget]) -> Result<(), Box<dyn Error>> {
    let rows: Vec<serde_json::Value> = targets
        .iter()
        .map(|t| {
            serde_json::json!({
                "name": t.name,
                "description": t.description,
                "depends": t.depends,
                "file": t.location.file.display().to_string(),
                "line": t.location.line,
                "primary": t.is_primary(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

#[cfg(not(feature = "uses_serde"))]
fn print_json(targets: &[AntTarget]) -> Result<(), Box<dyn Error>> {
    eprintln!("ant-e was built without the uses_serde feature; printing a table.");
    print_table(targets);
    Ok(())
}

fn run_target<L: TerminalLauncher>(workspace: Workspace, tools: Tools, launcher: L, target: &str) -> usize {
    let mut session = console_session(workspace, tools, launcher);
    session.run_target(target);
    session.notifier().errors
}

fn open_target(workspace: Workspace, tools: Tools, name: &str) -> usize {
    let mut session = console_session(workspace, tools, DryRunLauncher);
    let targets = match session.load_targets() {
        Ok(targets) => targets,
        Err(err) => {
            session.report(&err);
            return session.notifier().errors;
        }
    };
    match targets.iter().find(|t| t.name == name) {
        Some(target) => {
            session.open_target(target);
        }
        None => session
            .notifier_mut()
            .error(format!("No target named '{}' in the build file", name)),
    }
    session.notifier().errors
}

fn configure(workspace: Workspace, tools: Tools, path: Option<PathBuf>) -> Result<usize, Box<dyn Error>> {
    let selected = match path {
        Some(path) => Some(path),
        None => pick_build_file(workspace.root())?,
    };
    let Some(selected) = selected else {
        println!("No build file selected.");
        return Ok(0);
    };
    let mut session = console_session(workspace, tools, DryRunLauncher);
    session.configure_build_file(&selected);
    Ok(session.notifier().errors)
}

/// Numbered list of `*.xml` files under `root`, then a prompt for one of them.
fn pick_build_file(root: &Path) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let candidates = collect_build_file_candidates(root);
    if candidates.is_empty() {
        println!("No .xml files found under {}", root.display());
        return Ok(None);
    }
    for (i, candidate) in candidates.iter().enumerate() {
        let shown = candidate.strip_prefix(root).unwrap_or(candidate);
        println!("{:>3}: {}", i + 1, shown.display());
    }
    let Some(answer) = prompt_line("Select build file number:", "")? else {
        return Ok(None);
    };
    println!();
    match answer.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= candidates.len() => Ok(Some(candidates[n - 1].clone())),
        _ => {
            println!("Invalid selection: {}", answer.trim());
            Ok(None)
        }
    }
}
