use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEventKind,
};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;

use auric_core::ReloadOutcome;

/// Events multiplexed into the dashboard's single loop.
#[derive(Debug)]
pub enum UiEvent {
    Key(KeyEvent),
    /// A pointer interaction started at (column, row).
    PointerDown(u16, u16),
    Tick,
    /// A spawned reload task settled both fetches.
    Reload(ReloadOutcome),
}

/// Merges terminal input, app-generated events, and a redraw tick.
pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<UiEvent>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<UiEvent>) -> Self {
        Self {
            crossterm_events: EventStream::new(),
            events,
        }
    }

    fn map_crossterm(event: CrosstermEvent) -> Option<UiEvent> {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                Some(UiEvent::Key(key))
            }
            CrosstermEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(_) => Some(UiEvent::PointerDown(mouse.column, mouse.row)),
                _ => None,
            },
            _ => None,
        }
    }

    pub async fn next(&mut self) -> Option<UiEvent> {
        loop {
            let event = tokio::select! {
                event = self.events.recv() => return event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => Self::map_crossterm(input),
                    Some(Err(_)) => None,
                    None => return None,
                },
                _ = time::sleep(time::Duration::from_millis(400)) => Some(UiEvent::Tick),
            };

            if let Some(event) = event {
                return Some(event);
            }
        }
    }
}
