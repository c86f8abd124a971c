//! WebCLI - Terminal web browser
//!
//! The terminal only hosts the page; all browsing state lives in
//! `webcli_core::Browser`.

mod app;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf};

use webcli_core::{Browser, Config};

#[derive(Parser, Debug)]
#[command(name = "webcli", version, about = "Browse the web as plain text")]
struct Args {
    /// Config file (JSON), defaults to the platform config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to open instead of the homepage
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(Config::config_path);
    let config = Config::load(&config_path)?;
    webcli_core::init_logging(config.log_file.as_deref())?;

    let browser = Browser::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    tracing::info!("WebCLI started");

    let result = app::App::new(browser).run(&mut terminal, args.address).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
