//! Terminal UI render sink.
//!
//! Draws whatever the arbiter last published and turns key presses into
//! [`UserAction`]s. Holds no game logic of its own.

mod app;
mod input;
mod ui;

pub use app::App;

use crate::arbiter::UserAction;
use crate::sink::GameEvent;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{error, info, instrument};

/// Runs the terminal UI until the user quits or the arbiter goes away.
#[instrument(skip_all)]
pub async fn run_tui(
    action_tx: mpsc::UnboundedSender<UserAction>,
    mut event_rx: mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    info!("Starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &action_tx, &mut event_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "UI loop error");
    }
    res
}

async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    action_tx: &mpsc::UnboundedSender<UserAction>,
    event_rx: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    let mut app = App::new();

    loop {
        loop {
            match event_rx.try_recv() {
                Ok(event) => app.handle_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("Arbiter stopped, leaving UI");
                    return Ok(());
                }
            }
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = app.handle_key(key.code) {
                    let quit = action == UserAction::Quit;
                    action_tx.send(action)?;
                    if quit {
                        info!("User quit");
                        return Ok(());
                    }
                }
            }
        }

        // Let the arbiter task make progress between polls.
        tokio::task::yield_now().await;
    }
}
