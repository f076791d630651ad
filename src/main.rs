use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use astrocade::app::App;
use astrocade::config::Tuning;
use astrocade::event::{Event, EventHandler};
use astrocade::render;

/// Sidecar path next to the executable (tuning, log, high score all live
/// there).
fn sidecar(name: &str) -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join(name);
        }
    }
    PathBuf::from(name)
}

/// Logs go to a file: stderr belongs to the alternate screen while we run.
fn init_tracing() {
    let Ok(file) = File::create(sidecar("astrocade.log")) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let tuning = Tuning::load(&sidecar("astrocade.toml"));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(tuning);
    let event_handler = EventHandler::new(16); // ~60 FPS

    // Main loop: draw, then block on the next input or frame pulse.
    loop {
        let mut field = None;
        terminal.draw(|frame| {
            field = Some(render::render(
                frame,
                frame.area(),
                &app.game,
                app.director.is_muted(),
            ));
        })?;
        if let Some(area) = field {
            app.set_field_area(area);
        }

        match event_handler.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
            Event::Resize(w, h) => app.on_resize(w, h),
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
