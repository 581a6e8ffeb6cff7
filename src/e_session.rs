//! One open panel: view state, click tracking and the command surface.
//!
//! A `PanelSession` is created when the panel opens and dropped when it
//! closes. Every request for the visible list rereads and reparses the build
//! file, so edits made outside the panel show up on the next interaction.

use crate::e_clicks::{ClickOutcome, ClickTracker};
use crate::e_command_builder::AntCommandBuilder;
use crate::e_config::Workspace;
use crate::e_errors::PanelError;
use crate::e_findtarget::open_in_editor;
use crate::e_notify::{Notice, Notifier};
use crate::e_parser::parse_targets;
use crate::e_render::{ActionTable, RowAction};
use crate::e_runner::TerminalLauncher;
use crate::e_target::{AntTarget, TargetId, TargetRef};
use crate::e_view::TargetView;
use crate::prelude::*;

/// Programs the session shells out to.
#[derive(Debug, Clone)]
pub struct Tools {
    pub ant: String,
    pub editor: String,
}

impl Default for Tools {
    fn default() -> Self {
        Tools {
            ant: crate::e_command_builder::DEFAULT_ANT.to_string(),
            editor: crate::e_findtarget::DEFAULT_EDITOR.to_string(),
        }
    }
}

pub struct PanelSession<N: Notifier, L: TerminalLauncher> {
    workspace: Workspace,
    tools: Tools,
    view: TargetView,
    clicks: ClickTracker,
    table: ActionTable,
    dirty: bool,
    started: Instant,
    notifier: N,
    launcher: L,
}

impl<N: Notifier, L: TerminalLauncher> PanelSession<N, L> {
    pub fn new(workspace: Workspace, tools: Tools, notifier: N, launcher: L) -> Self {
        PanelSession {
            workspace,
            tools,
            view: TargetView::new(),
            clicks: ClickTracker::new(),
            table: ActionTable::default(),
            dirty: true,
            started: Instant::now(),
            notifier,
            launcher,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn view(&self) -> &TargetView {
        &self.view
    }

    /// Changes filters without notices, for one-shot command line listings.
    pub fn view_mut(&mut self) -> &mut TargetView {
        self.dirty = true;
        &mut self.view
    }

    pub fn clicks(&self) -> &ClickTracker {
        &self.clicks
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn launcher_mut(&mut self) -> &mut L {
        &mut self.launcher
    }

    /// True after a state change until the next refresh.
    pub fn needs_refresh(&self) -> bool {
        self.dirty
    }

    /// The rows of the last refresh.
    pub fn table(&self) -> &ActionTable {
        &self.table
    }

    /// Milliseconds since the panel opened; the click clock.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Reads the configured build file and parses every target in it.
    pub fn load_targets(&self) -> Result<Vec<AntTarget>, PanelError> {
        let configured = self.workspace.configured_build_file()?;
        let resolved = self.workspace.resolve(&configured);
        if !resolved.exists() {
            return Err(PanelError::FileNotFound(resolved));
        }
        let bytes = fs::read(&resolved).map_err(|source| PanelError::ReadFailure {
            path: resolved.clone(),
            source,
        })?;
        // Latin-1 build files still list; undecodable bytes become U+FFFD.
        let xml = String::from_utf8_lossy(&bytes);
        Ok(parse_targets(&xml, &resolved))
    }

    /// Reparses and filters. Failures become one notice and an empty list.
    pub fn visible_targets(&mut self) -> Vec<AntTarget> {
        match self.load_targets() {
            Ok(targets) => self.view.apply(targets),
            Err(err) => {
                self.report(&err);
                Vec::new()
            }
        }
    }

    /// Recomputes the rows from the current file contents.
    pub fn refresh(&mut self) -> &ActionTable {
        let visible = self.visible_targets();
        self.table = ActionTable::build(&visible);
        self.dirty = false;
        &self.table
    }

    pub fn toggle_primary_only(&mut self) -> bool {
        let primary_only = self.view.toggle_primary_only();
        self.dirty = true;
        self.notifier.info(if primary_only {
            "Showing primary targets only"
        } else {
            "Showing all targets"
        });
        primary_only
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.view.set_search_query(query);
        self.dirty = true;
        if !query.trim().is_empty() {
            self.notifier.info(format!("Searching for: {}", query));
        }
    }

    pub fn clear_search(&mut self) {
        self.view.clear_search();
        self.dirty = true;
        self.notifier.info("Search cleared");
    }

    /// Stores the chosen build file and reports what was saved.
    pub fn configure_build_file(&mut self, selected: &Path) -> Option<String> {
        match self.workspace.configure_build_file(selected) {
            Ok(saved) => {
                self.dirty = true;
                self.notifier.info(format!("Build file configured: {}", saved));
                Some(saved)
            }
            Err(e) => {
                self.notifier.error(format!("Failed to save settings: {:#}", e));
                None
            }
        }
    }

    /// Opens the editor on the target's declaration line.
    pub fn open_target(&mut self, target: &AntTarget) -> bool {
        let result = futures::executor::block_on(open_in_editor(&self.tools.editor, &target.location));
        match result {
            Ok(()) => true,
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    /// Runs a target, by name or by record, against the configured build file.
    pub fn run_target<'a>(&mut self, target: impl Into<TargetRef<'a>>) -> bool {
        let name = target.into().name().to_string();
        let configured = match self.workspace.configured_build_file() {
            Ok(configured) => configured,
            Err(PanelError::NotConfigured) => {
                self.notifier.error("Build file path is not configured.");
                return false;
            }
            Err(err) => {
                self.report(&err);
                return false;
            }
        };
        let resolved = self.workspace.resolve(&configured);
        let request = AntCommandBuilder::new(self.tools.ant.as_str())
            .with_build_file(&resolved)
            .with_target(&name)
            .into_request();
        info!("running '{}' in {}", request.command_line, request.cwd.display());

        match self.launcher.launch(&request) {
            Ok(()) => true,
            Err(e) => {
                self.report(&PanelError::Launch {
                    target: name,
                    reason: format!("{:#}", e),
                });
                false
            }
        }
    }

    /// A click on a row at `now_ms`; the second quick click on the same
    /// target runs it.
    pub fn click(&mut self, id: &TargetId, now_ms: u64) -> ClickOutcome {
        let Some(name) = self.table.resolve(id).map(|t| t.name.clone()) else {
            return ClickOutcome::Select;
        };
        let outcome = self.clicks.click(&name, now_ms);
        if let ClickOutcome::Run(ref name) = outcome {
            self.run_target(name.as_str());
        }
        outcome
    }

    /// Looks up the row's record and performs `action` on it.
    pub fn activate(&mut self, id: &TargetId, action: RowAction) {
        match action {
            RowAction::Click => {
                let now = self.now_ms();
                self.click(id, now);
            }
            RowAction::Open => {
                if let Some(target) = self.table.resolve(id).cloned() {
                    self.open_target(&target);
                }
            }
            RowAction::Run => {
                if let Some(target) = self.table.resolve(id).cloned() {
                    self.run_target(&target);
                }
            }
        }
    }

    /// Turns an error into a notice of the matching level.
    pub fn report(&mut self, err: &PanelError) {
        self.notifier.notify(Notice::from(err));
    }
}
