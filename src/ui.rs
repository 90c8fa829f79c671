use crate::error::StoreError;
use crate::menu::MenuAction;
use crate::task_store::TaskStore;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::collections::BTreeSet;
use std::io;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Adding { input: String },
    Marking { cursor: usize, selected: BTreeSet<usize> },
    Deleting { cursor: usize },
}

/// Interactive session state. Owns the store until the session ends.
#[derive(Debug)]
pub struct App {
    store: TaskStore,
    mode: Mode,
    menu_cursor: usize,
    status: Option<Status>,
    quit: bool,
}

impl App {
    pub fn new(store: TaskStore) -> Self {
        let status = store.recovered_from_malformed().then(|| Status {
            kind: StatusKind::Warning,
            text: format!(
                "⚠️ {} could not be parsed, starting with an empty list.",
                store.path().display()
            ),
        });
        Self {
            store,
            mode: Mode::Menu,
            menu_cursor: 0,
            status,
            quit: false,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn into_store(self) -> TaskStore {
        self.store
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }

        let mode = std::mem::replace(&mut self.mode, Mode::Menu);
        self.mode = match mode {
            Mode::Menu => self.handle_menu_key(key.code),
            Mode::Adding { mut input } => match key.code {
                KeyCode::Enter => {
                    self.submit_add(&input);
                    Mode::Menu
                }
                KeyCode::Esc => Mode::Menu,
                KeyCode::Backspace => {
                    input.pop();
                    Mode::Adding { input }
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    Mode::Adding { input }
                }
                _ => Mode::Adding { input },
            },
            Mode::Marking {
                mut cursor,
                mut selected,
            } => match key.code {
                KeyCode::Enter => {
                    self.submit_mark(&selected);
                    Mode::Menu
                }
                KeyCode::Esc => Mode::Menu,
                KeyCode::Char(' ') => {
                    if !selected.remove(&cursor) {
                        selected.insert(cursor);
                    }
                    Mode::Marking { cursor, selected }
                }
                code => {
                    cursor = self.move_task_cursor(cursor, code);
                    Mode::Marking { cursor, selected }
                }
            },
            Mode::Deleting { cursor } => match key.code {
                KeyCode::Enter => {
                    self.submit_delete(cursor);
                    Mode::Menu
                }
                KeyCode::Esc => Mode::Menu,
                code => Mode::Deleting {
                    cursor: self.move_task_cursor(cursor, code),
                },
            },
        };
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Up => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
                Mode::Menu
            }
            KeyCode::Down => {
                self.menu_cursor = (self.menu_cursor + 1).min(MenuAction::ALL.len() - 1);
                Mode::Menu
            }
            KeyCode::Enter => self.activate(MenuAction::at(self.menu_cursor)),
            KeyCode::Char('q') | KeyCode::Esc => self.activate(MenuAction::Exit),
            _ => Mode::Menu,
        }
    }

    /// Runs a menu action and returns the mode it leads to.
    pub fn activate(&mut self, action: MenuAction) -> Mode {
        debug!(?action, "menu action");
        match action {
            MenuAction::ViewTasks => {
                if self.store.is_empty() {
                    self.set_status(StatusKind::Error, "📭 No tasks found.");
                } else {
                    let done = self.store.list().iter().filter(|t| t.done).count();
                    self.set_status(
                        StatusKind::Success,
                        format!("📋 {} tasks, {} done.", self.store.len(), done),
                    );
                }
                Mode::Menu
            }
            MenuAction::AddTask => Mode::Adding {
                input: String::new(),
            },
            MenuAction::MarkDone => {
                if self.store.is_empty() {
                    self.set_status(StatusKind::Error, "❌ No tasks available to mark.");
                    Mode::Menu
                } else {
                    Mode::Marking {
                        cursor: 0,
                        selected: BTreeSet::new(),
                    }
                }
            }
            MenuAction::DeleteTask => {
                if self.store.is_empty() {
                    self.set_status(StatusKind::Error, "❌ No tasks to delete.");
                    Mode::Menu
                } else {
                    Mode::Deleting { cursor: 0 }
                }
            }
            MenuAction::Exit => {
                self.quit = true;
                Mode::Menu
            }
        }
    }

    fn submit_add(&mut self, input: &str) {
        match self.store.add(input) {
            Ok(()) => self.set_status(StatusKind::Success, "🟢 Task added successfully."),
            Err(err) => self.report(err),
        }
    }

    fn submit_mark(&mut self, selected: &BTreeSet<usize>) {
        let indices: Vec<usize> = selected.iter().map(|pos| pos + 1).collect();
        match self.store.mark_done(&indices) {
            Ok(0) => self.set_status(StatusKind::Warning, "⚠️ No tasks selected."),
            Ok(_) => self.set_status(StatusKind::Success, "✅ Selected tasks marked as done."),
            Err(err) => self.report(err),
        }
    }

    fn submit_delete(&mut self, cursor: usize) {
        match self.store.delete(cursor + 1) {
            Ok(description) => self.set_status(
                StatusKind::Warning,
                format!("🗑️ Task '{}' deleted.", description),
            ),
            Err(err) => self.report(err),
        }
    }

    fn move_task_cursor(&self, cursor: usize, code: KeyCode) -> usize {
        let last = self.store.len().saturating_sub(1);
        match code {
            KeyCode::Up => cursor.saturating_sub(1),
            KeyCode::Down => (cursor + 1).min(last),
            _ => cursor,
        }
    }

    fn report(&mut self, err: StoreError) {
        let kind = match err {
            StoreError::EmptyDescription => StatusKind::Warning,
            _ => StatusKind::Error,
        };
        let icon = if kind == StatusKind::Warning { "⚠️" } else { "❌" };
        self.set_status(kind, format!("{} {}", icon, err));
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            kind,
            text: text.into(),
        });
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;
        if app.should_quit() {
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(3),
            Constraint::Length(MenuAction::ALL.len() as u16 + 2),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_tasks(f, app, chunks[0]);
    draw_panel(f, app, chunks[1]);

    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Success => Color::Green,
            StatusKind::Warning => Color::Yellow,
            StatusKind::Error => Color::Red,
        };
        let line = Line::from(Span::styled(&status.text, Style::default().fg(color)));
        f.render_widget(Paragraph::new(line), chunks[2]);
    }
}

fn draw_tasks(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title("📋 To-Do List")
        .borders(Borders::ALL);

    if app.store.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "📭 No tasks found.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let (cursor, selected) = match &app.mode {
        Mode::Marking { cursor, selected } => (Some(*cursor), Some(selected)),
        Mode::Deleting { cursor } => (Some(*cursor), None),
        _ => (None, None),
    };

    let rows: Vec<Row> = app
        .store
        .list()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let description = match selected {
                Some(selected) if selected.contains(&i) => format!("[x] {}", task.description),
                Some(_) => format!("[ ] {}", task.description),
                None => task.description.clone(),
            };
            Row::new(vec![
                Span::styled(format!("{}", i + 1), Style::default().fg(Color::Cyan)),
                Span::styled(description, Style::default().fg(Color::Magenta)),
                Span::styled(task.status_label(), Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["No.", "Task", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default().with_selected(cursor);
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_panel(f: &mut Frame, app: &App, area: Rect) {
    match &app.mode {
        Mode::Menu => {
            let items: Vec<ListItem> = MenuAction::ALL
                .iter()
                .map(|action| ListItem::new(action.label()))
                .collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .title("What would you like to do?")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .highlight_style(Style::default().add_modifier(Modifier::BOLD))
                .highlight_symbol("> ");
            let mut state = ListState::default().with_selected(Some(app.menu_cursor));
            f.render_stateful_widget(list, area, &mut state);
        }
        Mode::Adding { input } => {
            let prompt = Paragraph::new(Line::from(vec![
                Span::raw(input.as_str()),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ]))
            .block(
                Block::default()
                    .title("📝 Enter new task (Enter to save, Esc to cancel)")
                    .borders(Borders::ALL),
            );
            f.render_widget(prompt, area);
        }
        Mode::Marking { .. } => {
            let help = Paragraph::new("↑/↓ move   Space toggle   Enter mark as done   Esc cancel")
                .block(
                    Block::default()
                        .title("Select tasks to mark as done")
                        .borders(Borders::ALL),
                );
            f.render_widget(help, area);
        }
        Mode::Deleting { .. } => {
            let help = Paragraph::new("↑/↓ move   Enter delete   Esc cancel").block(
                Block::default()
                    .title("Select a task to delete")
                    .borders(Borders::ALL),
            );
            f.render_widget(help, area);
        }
    }
}
