mod actions;
mod app;
mod chat;
mod config;
mod constants;
mod github;
mod session;
mod text;
mod ui;

use std::io;
use std::path::PathBuf;

use crossterm::ExecutableCommand;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;

use actions::StatusLine;
use app::App;
use config::Config;
use constants::CONFIG_FILE;

fn main() -> io::Result<()> {
    // Panic hook: restore terminal state and log the panic to disk.
    // Without this, a panic leaves the terminal in raw mode + alternate
    // screen and the error is lost.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        let ts = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
        let msg = format!("[{}] {}\n\n{}\n\n---\n", ts, info, std::backtrace::Backtrace::force_capture());
        let _ = std::fs::OpenOptions::new().create(true).append(true).open("repopilot-panic.log").and_then(|mut f| {
            use std::io::Write;
            f.write_all(msg.as_bytes())
        });
        default_hook(info);
    }));

    // Env fallback for secrets (.env or process environment)
    dotenvy::dotenv().ok();

    let config_path = PathBuf::from(CONFIG_FILE);
    let (mut config, load_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        // A malformed file is surfaced inline; the form starts with
        // defaults and stays usable.
        Err(e) => (Config::default(), Some(StatusLine::error(e.to_string()))),
    };
    config.apply_env_fallback();

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(config, config_path);
    app.status = load_error;
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
