// src/e_tui.rs
//! This module implements the interactive terminal panel for ant-e.
//! The drawing logic is separated into its own submodule (`ui`).

#[cfg(feature = "tui")]
pub mod tui_interactive {
    use crate::e_command_builder::LaunchRequest;
    use crate::e_config::Workspace;
    use crate::e_notify::{Notice, NoticeLog};
    use crate::e_picker::collect_build_file_candidates;
    use crate::e_render::RowAction;
    use crate::e_runner::{ShellLauncher, TerminalLauncher};
    use crate::e_session::{PanelSession, Tools};
    use crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
            MouseButton, MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use log::debug;
    use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::ListState, Terminal};
    use std::{io, path::PathBuf, time::Duration};

    type PanelTerminal = Terminal<CrosstermBackend<io::BufWriter<io::Stderr>>>;
    type TuiSession = PanelSession<NoticeLog, SuspendingLauncher>;

    /// What the keyboard is currently driving.
    #[derive(Debug, Clone)]
    pub enum Mode {
        Browse,
        /// Editing a search query, pre-filled with the current one.
        Search { input: String },
        /// Choosing a build file from the workspace.
        Pick {
            candidates: Vec<PathBuf>,
            state: ListState,
        },
    }

    /// The `ui` module contains functions for drawing the TUI.
    pub mod ui {
        use super::Mode;
        use crate::e_render::{ActionTable, PRIMARY_ICON};
        use crate::e_notify::{Notice, NoticeLevel};
        use crate::e_view::TargetView;
        use ratatui::{
            layout::{Constraint, Direction, Layout, Rect},
            style::{Color, Modifier, Style},
            text::{Line, Span},
            widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
            Frame,
        };

        pub const HELP: &str =
            "Enter run · o open · p primary · / search · c clear · r refresh · f configure · q quit";

        /// Splits the screen into list, detail pane and status line.
        pub fn panel_chunks(area: Rect) -> (Rect, Rect, Rect) {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Min(3),
                    Constraint::Length(6),
                    Constraint::Length(1),
                ])
                .split(area);
            (chunks[0], chunks[1], chunks[2])
        }

        fn title_line(table: &ActionTable, view: &TargetView) -> Line<'static> {
            let mut spans = vec![Span::raw(format!("Ant targets ({} shown)", table.len()))];
            if view.primary_only() {
                spans.push(Span::raw(" ┃ "));
                spans.push(Span::styled("primary only", Style::default().fg(Color::Cyan)));
            }
            let query = view.search_query().trim();
            if !query.is_empty() {
                spans.push(Span::raw(" ┃ "));
                spans.push(Span::styled(
                    format!("search: {}", query),
                    Style::default().fg(Color::Cyan),
                ));
            }
            spans.push(Span::raw(" ┃ "));
            spans.push(Span::styled("Esc or q to ", Style::default().fg(Color::White)));
            spans.push(Span::styled("EXIT", Style::default().fg(Color::Red)));
            Line::from(spans)
        }

        /// Draws the entire panel on the provided frame.
        pub fn draw_ui(
            f: &mut Frame,
            area: Rect,
            table: &ActionTable,
            view: &TargetView,
            list_state: &mut ListState,
            mode: &mut Mode,
            status: Option<&Notice>,
        ) {
            let (list_area, detail_area, status_area) = panel_chunks(area);

            if let Mode::Pick { candidates, state } = mode {
                draw_picker(f, list_area, candidates, state);
            } else {
                let items: Vec<ListItem> = table
                    .rows()
                    .iter()
                    .map(|row| {
                        let mut label_style = Style::default();
                        if row.icon == PRIMARY_ICON {
                            label_style = label_style.add_modifier(Modifier::BOLD);
                        }
                        let mut spans = vec![
                            Span::raw(format!("{} ", row.icon)),
                            Span::styled(row.label.clone(), label_style),
                        ];
                        if !row.detail.is_empty() {
                            spans.push(Span::styled(
                                format!("  {}", row.detail),
                                Style::default().fg(Color::DarkGray),
                            ));
                        }
                        ListItem::new(Line::from(spans))
                    })
                    .collect();
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White))
                    .title(title_line(table, view));
                let list = List::new(items)
                    .block(block)
                    .highlight_style(Style::default().fg(Color::Yellow))
                    .highlight_symbol(">> ");
                f.render_stateful_widget(list, list_area, list_state);
            }

            let detail_lines: Vec<Line> = match list_state.selected().and_then(|i| table.target_at(i)) {
                Some(target) if !matches!(mode, Mode::Pick { .. }) => {
                    let tooltip = table
                        .rows()
                        .iter()
                        .find(|row| row.id == target.id())
                        .map(|row| row.tooltip.clone())
                        .unwrap_or_default();
                    let mut lines: Vec<Line> =
                        tooltip.lines().map(|l| Line::from(l.to_string())).collect();
                    if !target.depends.is_empty() {
                        lines.push(Line::from(format!("depends: {}", target.depends)));
                    }
                    lines.push(Line::styled(
                        format!("{}:{}", target.location.file.display(), target.location.line),
                        Style::default().fg(Color::DarkGray),
                    ));
                    lines
                }
                _ => Vec::new(),
            };
            let detail = Paragraph::new(detail_lines)
                .block(Block::default().borders(Borders::ALL).title("Target"))
                .wrap(Wrap { trim: false });
            f.render_widget(detail, detail_area);

            let status_line = match (&*mode, status) {
                (Mode::Search { input }, _) => Line::from(vec![
                    Span::styled("Search: ", Style::default().fg(Color::Cyan)),
                    Span::raw(format!("{}_", input)),
                ]),
                (Mode::Pick { .. }, _) => Line::from("Enter to choose · Esc to cancel"),
                (Mode::Browse, Some(notice)) => {
                    let color = match notice.level {
                        NoticeLevel::Info => Color::Green,
                        NoticeLevel::Error => Color::Red,
                    };
                    Line::styled(notice.text.clone(), Style::default().fg(color))
                }
                (Mode::Browse, None) => Line::styled(HELP, Style::default().fg(Color::DarkGray)),
            };
            f.render_widget(Paragraph::new(status_line), status_area);
        }

        fn draw_picker(f: &mut Frame, area: Rect, candidates: &[std::path::PathBuf], state: &mut ListState) {
            let items: Vec<ListItem> = candidates
                .iter()
                .map(|p| ListItem::new(p.to_string_lossy().to_string()))
                .collect();
            let title = if candidates.is_empty() {
                "Select build.xml (no *.xml files found)"
            } else {
                "Select build.xml"
            };
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(Style::default().fg(Color::Yellow))
                .highlight_symbol(">> ");
            f.render_stateful_widget(list, area, state);
        }
    }

    /// Leaves the panel screen while a build runs and restores it afterwards.
    pub struct SuspendingLauncher {
        inner: ShellLauncher,
        resumed: bool,
    }

    impl SuspendingLauncher {
        pub fn new(inner: ShellLauncher) -> Self {
            SuspendingLauncher {
                inner,
                resumed: false,
            }
        }

        /// True once after each launch; the panel must repaint from scratch.
        pub fn take_resumed(&mut self) -> bool {
            std::mem::take(&mut self.resumed)
        }
    }

    impl TerminalLauncher for SuspendingLauncher {
        fn launch(&mut self, request: &LaunchRequest) -> anyhow::Result<()> {
            suspend()?;
            let result = self.inner.launch(request);
            resume()?;
            self.resumed = true;
            result
        }
    }

    /// Restores the normal screen so a child process can use the terminal.
    pub fn suspend() -> io::Result<()> {
        disable_raw_mode()?;
        execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    /// Re-enters raw mode and the alternate screen, dropping stray input.
    pub fn resume() -> io::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            let _ = event::read()?;
        }
        enable_raw_mode()?;
        execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(())
    }

    struct PanelUi {
        list_state: ListState,
        mode: Mode,
        status: Option<Notice>,
    }

    impl PanelUi {
        fn new() -> Self {
            let mut list_state = ListState::default();
            list_state.select(Some(0));
            PanelUi {
                list_state,
                mode: Mode::Browse,
                status: None,
            }
        }

        fn clamp_selection(&mut self, len: usize) {
            let selected = match self.list_state.selected() {
                _ if len == 0 => None,
                Some(i) if i >= len => Some(len - 1),
                Some(i) => Some(i),
                None => Some(0),
            };
            self.list_state.select(selected);
        }

        fn clamp_selection_to(&mut self, index: usize, len: usize) {
            self.list_state.select(if len == 0 { None } else { Some(index.min(len - 1)) });
        }

        fn take_notices(&mut self, session: &mut TuiSession) {
            if let Some(last) = session.notifier_mut().drain().pop() {
                self.status = Some(last);
            }
        }
    }

    /// Launches the interactive panel for `workspace` and blocks until the user quits.
    pub fn launch_tui(
        workspace: Workspace,
        tools: Tools,
        wait_secs: u64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut session = PanelSession::new(
            workspace,
            tools,
            NoticeLog::new(),
            SuspendingLauncher::new(ShellLauncher::new(wait_secs)),
        );

        enable_raw_mode()?;
        execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::BufWriter::new(io::stderr())))?;
        terminal.clear()?;

        let result = run_loop(&mut terminal, &mut session);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        result
    }

    fn run_loop(
        terminal: &mut PanelTerminal,
        session: &mut TuiSession,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut ui_state = PanelUi::new();

        'main_loop: loop {
            if session.needs_refresh() {
                let len = session.refresh().len();
                ui_state.clamp_selection(len);
            }
            ui_state.take_notices(session);
            if session.launcher_mut().take_resumed() {
                terminal.clear()?;
            }

            terminal.draw(|f| {
                let area = f.area();
                ui::draw_ui(
                    f,
                    area,
                    session.table(),
                    session.view(),
                    &mut ui_state.list_state,
                    &mut ui_state.mode,
                    ui_state.status.as_ref(),
                );
            })?;

            if !event::poll(Duration::from_millis(200))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    let mode = std::mem::replace(&mut ui_state.mode, Mode::Browse);
                    let next = match mode {
                        Mode::Browse => {
                            if handle_browse_key(key.code, terminal, session, &mut ui_state)? {
                                break 'main_loop;
                            }
                            std::mem::replace(&mut ui_state.mode, Mode::Browse)
                        }
                        Mode::Search { mut input } => match key.code {
                            KeyCode::Enter => {
                                session.set_search_query(&input);
                                Mode::Browse
                            }
                            KeyCode::Esc => Mode::Browse,
                            KeyCode::Backspace => {
                                input.pop();
                                Mode::Search { input }
                            }
                            KeyCode::Char(c) => {
                                input.push(c);
                                Mode::Search { input }
                            }
                            _ => Mode::Search { input },
                        },
                        Mode::Pick {
                            candidates,
                            mut state,
                        } => match key.code {
                            KeyCode::Esc | KeyCode::Char('q') => Mode::Browse,
                            KeyCode::Enter => {
                                if let Some(path) = state.selected().and_then(|i| candidates.get(i)) {
                                    session.configure_build_file(path);
                                }
                                Mode::Browse
                            }
                            KeyCode::Down => {
                                move_selection(&mut state, candidates.len(), 1);
                                Mode::Pick { candidates, state }
                            }
                            KeyCode::Up => {
                                move_selection(&mut state, candidates.len(), -1);
                                Mode::Pick { candidates, state }
                            }
                            _ => Mode::Pick { candidates, state },
                        },
                    };
                    ui_state.mode = next;
                }
                Event::Mouse(mouse_event) => {
                    if !matches!(ui_state.mode, Mode::Browse) {
                        continue;
                    }
                    let size = terminal.size()?;
                    let (list_area, _, _) = ui::panel_chunks(Rect::new(0, 0, size.width, size.height));
                    let len = session.table().len();
                    match mouse_event.kind {
                        MouseEventKind::ScrollDown => move_selection(&mut ui_state.list_state, len, 1),
                        MouseEventKind::ScrollUp => move_selection(&mut ui_state.list_state, len, -1),
                        MouseEventKind::Down(MouseButton::Left) => {
                            let inner_y = list_area.y + 1;
                            let inner_height = list_area.height.saturating_sub(2);
                            if mouse_event.column > list_area.x
                                && mouse_event.column < list_area.x + list_area.width.saturating_sub(1)
                                && mouse_event.row >= inner_y
                                && mouse_event.row < inner_y + inner_height
                            {
                                let index = ui_state.list_state.offset()
                                    + (mouse_event.row - inner_y) as usize;
                                if let Some(row) = session.table().rows().get(index) {
                                    let id = row.id.clone();
                                    ui_state.list_state.select(Some(index));
                                    session.activate(&id, RowAction::Click);
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::Resize(_, _) => {
                    terminal.autoresize()?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `Ok(true)` when the panel should close.
    fn handle_browse_key(
        code: KeyCode,
        terminal: &mut PanelTerminal,
        session: &mut TuiSession,
        ui_state: &mut PanelUi,
    ) -> Result<bool, Box<dyn std::error::Error>> {
        let len = session.table().len();
        let page = terminal
            .size()
            .map(|r| r.height.saturating_sub(10))
            .unwrap_or(5)
            .max(1) as isize;
        let selected_id = ui_state
            .list_state
            .selected()
            .and_then(|i| session.table().rows().get(i))
            .map(|row| row.id.clone());

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Down | KeyCode::Char('j') => move_selection(&mut ui_state.list_state, len, 1),
            KeyCode::Up | KeyCode::Char('k') => move_selection(&mut ui_state.list_state, len, -1),
            KeyCode::PageDown => move_selection(&mut ui_state.list_state, len, page),
            KeyCode::PageUp => move_selection(&mut ui_state.list_state, len, -page),
            KeyCode::Home => ui_state.clamp_selection_to(0, len),
            KeyCode::End => ui_state.clamp_selection_to(len.saturating_sub(1), len),
            KeyCode::Enter => {
                if let Some(id) = selected_id {
                    session.activate(&id, RowAction::Run);
                }
            }
            KeyCode::Char('o') | KeyCode::Char('e') => {
                if let Some(id) = selected_id {
                    suspend()?;
                    session.activate(&id, RowAction::Open);
                    resume()?;
                    terminal.clear()?;
                }
            }
            KeyCode::Char('p') => {
                session.toggle_primary_only();
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                ui_state.mode = Mode::Search {
                    input: session.view().search_query().to_string(),
                };
            }
            KeyCode::Char('c') => session.clear_search(),
            KeyCode::Char('r') | KeyCode::F(5) => {
                let len = session.refresh().len();
                ui_state.clamp_selection(len);
            }
            KeyCode::Char('f') => {
                let candidates = collect_build_file_candidates(session.workspace().root());
                debug!("picker opened with {} candidates", candidates.len());
                let mut state = ListState::default();
                if !candidates.is_empty() {
                    state.select(Some(0));
                }
                ui_state.mode = Mode::Pick { candidates, state };
            }
            _ => {}
        }
        Ok(false)
    }

    fn move_selection(state: &mut ListState, len: usize, delta: isize) {
        if len == 0 {
            state.select(None);
            return;
        }
        let current = state.selected().unwrap_or(0) as isize;
        let new = (current + delta).clamp(0, len as isize - 1);
        state.select(Some(new as usize));
    }

}
