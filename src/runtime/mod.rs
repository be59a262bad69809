use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{PlaybackCoordinator, RodioEngine, Volume};
use crate::logging;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();

    // Keep the guard alive until exit so buffered log lines are flushed.
    let _log_guard = match logging::init(&settings.log) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("encore: logging disabled: {e}");
            None
        }
    };
    if let Some(problem) = config_problem {
        tracing::warn!("{problem}, using defaults");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let engine = RodioEngine::new(&settings.audio);
    let player = PlaybackCoordinator::new(
        engine,
        Volume::new(settings.audio.volume, settings.audio.muted),
    );
    player
        .status_property()
        .subscribe(|status| tracing::debug!(?status, "playback status"));
    player
        .duration_property()
        .subscribe(|duration| tracing::debug!(?duration, "track duration"));

    let mut app = App::new(player, settings.library.clone());
    startup::add_initial_paths(&mut app, env::args_os().skip(1).map(PathBuf::from));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown();
    if let Err(e) = &run_result {
        tracing::error!(error = %e, "event loop failed");
    }
    tracing::info!("exiting");

    run_result
}
