mod activity;
mod api;
mod app;
mod config;
mod event;
mod forms;
mod model;
mod services;
mod session;
#[cfg(test)]
mod testutil;
mod ui;

use std::io;
use std::panic;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use app::{Action, App};

#[tokio::main]
async fn main() -> Result<()> {
    // Load config and whatever session survived the last run
    let config = config::load_config()?;
    let session = Arc::new(Mutex::new(session::Session::load()));
    let api = api::create_api(&config, session.clone());
    let services = services::Services::new(api, session.clone());
    let activity = activity::ActivityLog::new();

    // Set up action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create app
    let mut app = App::new(services, session, activity, action_tx.clone());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Spawn event reader
    let event_tx = action_tx.clone();
    tokio::spawn(async move {
        event::run_event_loop(event_tx).await;
    });

    // Initial fetch when a session was restored
    app.refresh_dashboard().await;

    // Main loop
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(action) = action_rx.recv().await {
            app.update(action).await;
            if app.should_quit {
                break;
            }
        } else {
            break;
        }
    }

    // Restore terminal
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
