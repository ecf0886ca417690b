//! scriptreel Entry Point
//!
//! Launches the script-to-video wizard in the terminal.
//!
//! Backend URL resolution: `SCRIPTREEL_BACKEND_URL`, then
//! `~/.config/scriptreel/studio.toml`, then `http://localhost:8001`.
//! Set `RUST_LOG` to write a log file to the temp directory.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::panic;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scriptreel_tui::App;
use wizard_core::{load_config, HttpStudioApi, WebSocketConnector, Wizard};

/// Log file name under the temp directory
const LOG_FILE: &str = "scriptreel.log";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: scriptreel requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  - Running in a non-interactive environment (CI, container)");
        eprintln!("  - SSH without -t flag");
        eprintln!("  - Piped stdin/stdout");
        std::process::exit(1);
    }

    let config = load_config().context("failed to load studio config")?;
    tracing::info!(
        backend = %config.backend_url,
        source = %config.source(),
        "Starting scriptreel"
    );

    // Restore the terminal before printing a panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let api = HttpStudioApi::new(&config.backend_url);
    let connector = WebSocketConnector::new(config.backend_url.clone());
    let mut wizard = Wizard::new(api, connector, config.reconnect);
    wizard.start();

    let mut app = App::new(wizard);
    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    if let Some(goodbye) = app.goodbye() {
        println!("\n\x1b[35mscriptreel:\x1b[0m {goodbye}\n");
    }

    Ok(())
}

/// Log to a file only when `RUST_LOG` is set; stderr belongs to the TUI
fn init_logging() -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let path = std::env::temp_dir().join(LOG_FILE);
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    Ok(())
}
