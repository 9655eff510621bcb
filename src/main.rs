// typeout: progressive text reveal in the terminal

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use typeout::config::{Cli, Config};
use typeout::logging::init_logging;
use typeout::ui::App;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli).context("invalid arguments")?;
    init_logging(&config.log)?;
    info!(file = ?config.file, interval = ?config.tick_interval, "starting");

    let mut app = App::new(&config)?;

    // Set up terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}
