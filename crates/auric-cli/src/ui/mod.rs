//! Interactive live dashboard.
//!
//! One event loop owns all state; spawned reload tasks report back through
//! the event channel, so the session is only ever mutated from this loop.

mod app;
mod events;
mod theme;
mod view;

use std::io::{self, Stdout};
use std::ops::{Deref, DerefMut};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use auric_core::FeedSet;

use crate::cli::WatchArgs;
use crate::error::CliError;

use self::app::WatchApp;
use self::events::EventsService;

pub async fn run(feeds: FeedSet, args: &WatchArgs) -> Result<(), CliError> {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut events = EventsService::new(events_rx);
    let mut app = WatchApp::new(feeds, args, events_tx);
    let mut terminal = TerminalGuard::enter()?;

    // Initial mount fires the first reload.
    app.trigger_reload();

    loop {
        terminal.draw(|frame| view::render(frame, &mut app))?;

        let Some(event) = events.next().await else {
            break;
        };
        app.handle(event);

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Raw-mode terminal with guaranteed restore on every exit path.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self, CliError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = self.terminal.show_cursor();
    }
}

impl Deref for TerminalGuard {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}
