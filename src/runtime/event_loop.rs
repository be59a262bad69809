use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode};
use crate::audio::MediaEngine;
use crate::config;
use crate::ui;

/// How long to wait for input before polling playback again.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: drains playback events, redraws when something
/// changed and dispatches key presses. Returns `Ok(())` when quit is requested.
pub fn run<E: MediaEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<E>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.pump();

        if app.take_redraw() {
            terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;
        }

        if event::poll(INPUT_POLL)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, app, state) {
                        break;
                    }
                }
                Event::Resize(..) => app.request_redraw(),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the app should quit.
pub fn handle_key_event<E: MediaEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<E>,
    state: &mut EventLoopState,
) -> bool {
    if app.input_mode == InputMode::AddPath {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Enter => app.submit_input(),
            KeyCode::Backspace => app.pop_input_char(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.cancel_input();
            }
            KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
            _ => {}
        }
        return false;
    }

    // Any key other than a second `g` cancels the prefix.
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    let scrub = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Enter => app.play_selected(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_play_pause(),
        KeyCode::Char('l') => app.next_track(),
        KeyCode::Char('h') => app.previous_track(),
        KeyCode::Char('L') => app.seek_by(scrub),
        KeyCode::Char('H') => app.seek_by(-scrub),
        KeyCode::Char('s') => app.stop(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.adjust_volume(settings.controls.volume_step)
        }
        KeyCode::Char('-') => app.adjust_volume(-settings.controls.volume_step),
        KeyCode::Char('m') => app.toggle_mute(),
        KeyCode::Char('a') => app.begin_add_path(),
        KeyCode::Char('d') => {
            if let Some(track) = app.remove_track(app.selected) {
                tracing::debug!(path = %track.path().display(), "removed from playlist");
            }
        }
        KeyCode::Char('K') => app.toggle_metadata_window(),
        KeyCode::Esc if app.metadata_window => app.toggle_metadata_window(),
        _ => {}
    }

    false
}
