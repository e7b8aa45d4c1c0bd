use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dotenv::dotenv;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
    panic::AssertUnwindSafe
};
use cli_log::*;
use clap::Parser;
use futures_util::FutureExt;

use cryptodevs_ico::{App, Cli, Settings, render_ui};

#[tokio::main]
async fn main() -> Result<()> {
    // Contract addresses usually live in .env
    dotenv().ok();

    init_cli_log!();
    info!("Starting Crypto Devs ICO client...");

    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;
    info!(
        "Network {} (chain {}), provider {}",
        settings.broker.network, settings.broker.chain_id, settings.broker.provider_url
    );

    // Gracefully handle panics and restore the terminal
    let result = AssertUnwindSafe(run_tui_app(settings)).catch_unwind().await;

    // Restore terminal state
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).ok();

    match result {
        Ok(res) => res,
        Err(panic) => {
            eprintln!("\n\nApplication panicked: {panic:?}\n\n");
            Err(anyhow::anyhow!("Application panicked"))
        }
    }
}


async fn run_tui_app(settings: Settings) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&settings);
    if settings.auto_connect {
        app.connect_wallet();
    }

    // Main loop
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal before returning
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        info!("App error: {err:?}");
    }

    res
}


async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(cryptodevs_ico::config::TICK_RATE_MS);
    let mut last_ui_update = Instant::now();
    let ui_update_rate = Duration::from_millis(cryptodevs_ico::config::UI_UPDATE_RATE_MS);

    loop {
        // Polling blocks this thread; background tasks keep running on the
        // other runtime workers
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key_input(key.code) {
                    info!("Quit requested");
                    return Ok(());
                }
            }
        }

        // Results of reads and writes finished since the last tick
        app.process_actions();

        // Redraw at least once a second
        let force_redraw = last_ui_update.elapsed() >= ui_update_rate;

        if app.needs_redraw || force_redraw {
            terminal.draw(|f| render_ui(f, app))?;
            app.needs_redraw = false;
            if force_redraw {
                last_ui_update = Instant::now();
            }
        }

        tokio::task::yield_now().await;
    }
}
