//! Terminal application state and event loop
//!
//! Page loads run on spawned tasks. Their progress and results come back over
//! channels and are applied here, on the one task that owns the screen.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use webcli_core::{Browser, CoreError, RenderedPage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    Back,
    Forward,
    Refresh,
    Home,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    EditAddress,
}

/// Result of a finished load task.
pub struct Loaded {
    action: Action,
    result: std::result::Result<Option<RenderedPage>, CoreError>,
}

pub struct App {
    browser: Browser,
    pub title: String,
    pub address: String,
    pub input: String,
    pub mode: Mode,
    pub lines: Vec<String>,
    pub scroll: u16,
    /// Percent of the current load, `None` when idle
    pub progress: Option<u8>,
    pub status: Option<String>,
    loaded_tx: UnboundedSender<Loaded>,
    loaded_rx: UnboundedReceiver<Loaded>,
    progress_rx: Option<UnboundedReceiver<u8>>,
    should_quit: bool,
}

impl App {
    pub fn new(browser: Browser) -> Self {
        let (loaded_tx, loaded_rx) = unbounded_channel();
        let address = browser.current_address();

        Self {
            browser,
            title: "Blank Page".to_string(),
            address,
            input: String::new(),
            mode: Mode::Browse,
            lines: Vec::new(),
            scroll: 0,
            progress: None,
            status: None,
            loaded_tx,
            loaded_rx,
            progress_rx: None,
            should_quit: false,
        }
    }

    pub async fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
        start: Option<String>,
    ) -> Result<()> {
        self.dispatch(match start {
            Some(address) => Action::Navigate(address),
            None => Action::Refresh,
        });

        while !self.should_quit {
            self.drain_channels();
            terminal.draw(|frame| crate::ui::draw(frame, &self))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = self.handle_key(key) {
                            self.dispatch(action);
                        }
                    }
                }
            }

            tokio::task::yield_now().await;
        }

        tracing::info!("WebCLI exiting");
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.progress.is_some()
    }

    /// Whether back / forward currently lead anywhere.
    pub fn history_hint(&self) -> (bool, bool) {
        (self.browser.can_go_back(), self.browser.can_go_forward())
    }

    /// Map a key press to an action, updating editing state on the way.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                KeyCode::Char('l') => {
                    self.start_editing();
                    None
                }
                _ => None,
            };
        }

        match self.mode {
            Mode::EditAddress => match key.code {
                KeyCode::Enter => {
                    self.mode = Mode::Browse;
                    let address = self.input.trim().to_string();
                    if address.is_empty() {
                        None
                    } else {
                        Some(Action::Navigate(address))
                    }
                }
                KeyCode::Esc => {
                    self.mode = Mode::Browse;
                    None
                }
                KeyCode::Backspace => {
                    self.input.pop();
                    None
                }
                KeyCode::Char(c) => {
                    self.input.push(c);
                    None
                }
                _ => None,
            },
            Mode::Browse => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                KeyCode::Char('g') => {
                    self.start_editing();
                    None
                }
                KeyCode::Char('b') | KeyCode::Left => Some(Action::Back),
                KeyCode::Char('f') | KeyCode::Right => Some(Action::Forward),
                KeyCode::Char('r') | KeyCode::F(5) => Some(Action::Refresh),
                KeyCode::Char('h') => Some(Action::Home),
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_by(1);
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_by(-1);
                    None
                }
                KeyCode::PageDown | KeyCode::Char(' ') => {
                    self.scroll_by(20);
                    None
                }
                KeyCode::PageUp => {
                    self.scroll_by(-20);
                    None
                }
                KeyCode::Home => {
                    self.scroll = 0;
                    None
                }
                KeyCode::End => {
                    self.scroll_by(i32::MAX);
                    None
                }
                _ => None,
            },
        }
    }

    /// Start a load on a background task. Only one load runs at a time;
    /// anything requested meanwhile is dropped with a status message.
    pub fn dispatch(&mut self, action: Action) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }

        if self.is_loading() {
            tracing::debug!(?action, "Ignoring action while loading");
            self.status = Some("Still loading, please wait".to_string());
            return;
        }

        let (progress_tx, progress_rx) = unbounded_channel();
        self.progress_rx = Some(progress_rx);
        self.progress = Some(0);
        self.status = None;
        if action == Action::Refresh {
            self.lines = vec!["Loading...".to_string()];
            self.scroll = 0;
        }

        let browser = self.browser.clone();
        let loaded_tx = self.loaded_tx.clone();
        tokio::spawn(async move {
            let progress = Some(progress_tx);
            let result = match &action {
                Action::Navigate(address) => browser.navigate(address, progress).await.map(Some),
                Action::Back => browser.back(progress).await,
                Action::Forward => browser.forward(progress).await,
                Action::Refresh => browser.refresh(progress).await.map(Some),
                Action::Home => browser.home(progress).await.map(Some),
                Action::Quit => Ok(None),
            };
            let _ = loaded_tx.send(Loaded { action, result });
        });
    }

    fn drain_channels(&mut self) {
        if let Some(rx) = self.progress_rx.as_mut() {
            while let Ok(percent) = rx.try_recv() {
                if self.progress.is_some() {
                    self.progress = Some(percent);
                }
            }
        }

        while let Ok(loaded) = self.loaded_rx.try_recv() {
            self.apply(loaded);
        }
    }

    pub fn apply(&mut self, loaded: Loaded) {
        self.progress = None;
        self.progress_rx = None;

        match loaded.result {
            Ok(Some(page)) => {
                self.title = page.title;
                self.lines = page.lines;
                self.scroll = 0;
                if let Some(address) = page.address {
                    self.address = address;
                }
            }
            Ok(None) => {
                self.status = match loaded.action {
                    Action::Back => Some("No earlier page".to_string()),
                    Action::Forward => Some("No later page".to_string()),
                    _ => None,
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "Load failed");
                self.status = Some(e.to_string());
            }
        }
    }

    fn start_editing(&mut self) {
        self.mode = Mode::EditAddress;
        self.input = self.address.clone();
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = self.lines.len().saturating_sub(1).min(u16::MAX as usize) as i32;
        let next = (self.scroll as i32).saturating_add(delta).clamp(0, max);
        self.scroll = next as u16;
    }
}
