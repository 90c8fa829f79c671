use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;
use tasklist::cli::{run_command, Cli};
use tasklist::ui::{run_app, App};
use tasklist::{logging, StoreError, TaskStore};
use tracing::error;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(&cli.log, cli.verbose)?;

    let mut store = TaskStore::load(&cli.file)
        .with_context(|| format!("could not load {}", cli.file.display()))?;

    if let Some(command) = cli.command {
        return match run_command(&mut store, command, &mut io::stdout()) {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(err) => match err.downcast_ref::<StoreError>() {
                Some(store_err) if store_err.is_validation() => {
                    eprintln!("⚠️ {}", store_err);
                    Ok(ExitCode::from(2))
                }
                _ => Err(err),
            },
        };
    }

    let mut app = App::new(store);
    let session = run_terminal(&mut app);
    if let Err(err) = &session {
        error!(error = %err, "terminal session failed");
    }

    // Save exactly once, even if the session or terminal restore failed.
    let store = app.into_store();
    store
        .save()
        .with_context(|| format!("could not save {}", store.path().display()))?;
    println!("💾 Tasks saved. Goodbye!");

    session.context("terminal session failed")?;
    Ok(ExitCode::SUCCESS)
}

/// Runs the board in raw mode on the alternate screen and always attempts to
/// restore the terminal, returning the first error hit.
fn run_terminal(app: &mut App) -> io::Result<()> {
    enable_raw_mode()?;
    let session = open_terminal().and_then(|mut terminal| {
        let result = run_app(&mut terminal, app);
        let restored = execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .and_then(|()| terminal.show_cursor());
        result.and(restored)
    });
    let raw = disable_raw_mode();
    session.and(raw)
}

fn open_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    })
}
