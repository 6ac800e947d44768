use super::app_logic::TuiApp;
use super::app_state::AppMode;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(50);

pub(super) fn handle_events(app: &mut TuiApp) -> Result<()> {
    // Wake up early when a timer is due before the next tick.
    let timeout = app
        .next_timer_due()
        .map_or(TICK, |due| due.saturating_duration_since(Instant::now()).min(TICK));
    if event::poll(timeout)? {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                dispatch_key(app, key_event, Instant::now());
            }
        }
    }
    app.on_tick(Instant::now());
    Ok(())
}

pub(super) fn dispatch_key(app: &mut TuiApp, key_event: KeyEvent, now: Instant) {
    match app.mode {
        AppMode::Normal => app.handle_normal_mode_input(key_event, now),
        AppMode::Searching => app.handle_search_mode_input(key_event),
        AppMode::FilterMenu => app.handle_filter_menu_input(key_event),
        AppMode::ActionMenu => app.handle_action_menu_input(key_event),
    }
}
