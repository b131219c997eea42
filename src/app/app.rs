use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
};

use crate::{
    app::{Portfolio, portfolio::PortfolioSnapshot, ui},
    db::HoldingStore,
};

pub struct App<S> {
    portfolio: Portfolio<S>,
    snapshot: PortfolioSnapshot,
    table_state: TableState,
    popup_message: Option<String>,
    error_popup: Option<String>,
    pending_delete: Option<i64>,
}

impl<S: HoldingStore> App<S> {
    pub async fn load(portfolio: Portfolio<S>) -> Result<Self> {
        let snapshot = portfolio.snapshot().await?;
        Ok(Self {
            portfolio,
            snapshot,
            table_state: TableState::default(),
            popup_message: None,
            error_popup: None,
            pending_delete: None,
        })
    }

    pub fn snapshot(&self) -> &PortfolioSnapshot {
        &self.snapshot
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub fn popup_message(&self) -> &Option<String> {
        &self.popup_message
    }

    pub fn error_popup(&self) -> &Option<String> {
        &self.error_popup
    }

    fn show_popup(&mut self, message: &str) {
        self.popup_message = Some(message.to_string());
    }

    fn clear_popup(&mut self) {
        self.popup_message = None;
        self.pending_delete = None;
    }

    fn show_error_popup(&mut self, message: &str) {
        self.error_popup = Some(message.to_string());
    }

    fn clear_error_popup(&mut self) {
        self.error_popup = None;
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|frame| {
            ui::render(
                frame,
                &self.snapshot,
                &mut self.table_state,
                &self.popup_message,
                &self.error_popup,
            )
        })?;
        Ok(())
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.draw(terminal)?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if !self.handle_key(key.code).await? {
                    return Ok(());
                }
            }
        }
    }

    /// Applies one key press. Returns `false` once the user asked to quit.
    pub async fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        if self.error_popup.is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                self.clear_error_popup();
            }
            return Ok(true);
        }

        if let Some(id) = self.pending_delete {
            match code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.clear_popup();
                    if let Err(e) = self.portfolio.delete_holding(id).await {
                        self.show_error_popup(&format!("Error deleting holding: {}", e));
                    }
                    self.reload().await;
                }
                KeyCode::Char('n') | KeyCode::Esc => self.clear_popup(),
                _ => {}
            }
            return Ok(true);
        }

        match code {
            KeyCode::Char('q') => return Ok(false),
            KeyCode::Esc => self.table_state.select(None),
            KeyCode::F(5) => self.reload().await,
            KeyCode::Char('d') | KeyCode::Delete => {
                let selected = self
                    .table_state
                    .selected()
                    .and_then(|i| self.snapshot.holdings().get(i))
                    .map(|view| (*view.id(), view.name().to_string()));

                if let Some((id, name)) = selected {
                    self.pending_delete = Some(id);
                    self.show_popup(&format!("Delete holding '{}'? (y/n)", name));
                }
            }
            KeyCode::Down => {
                let holdings = self.snapshot.holdings();
                if !holdings.is_empty() {
                    let i = match self.table_state.selected() {
                        Some(i) => {
                            if i >= holdings.len() - 1 {
                                0
                            } else {
                                i + 1
                            }
                        }
                        None => 0,
                    };
                    self.table_state.select(Some(i));
                }
            }
            KeyCode::Up => {
                let holdings = self.snapshot.holdings();
                if !holdings.is_empty() {
                    let i = match self.table_state.selected() {
                        Some(i) => {
                            if i == 0 {
                                holdings.len() - 1
                            } else {
                                i - 1
                            }
                        }
                        None => 0,
                    };
                    self.table_state.select(Some(i));
                }
            }
            _ => {}
        }

        Ok(true)
    }

    async fn reload(&mut self) {
        match self.portfolio.snapshot().await {
            Ok(snapshot) => {
                let len = snapshot.holdings().len();
                self.snapshot = snapshot;
                match self.table_state.selected() {
                    Some(_) if len == 0 => self.table_state.select(None),
                    Some(i) if i >= len => self.table_state.select(Some(len - 1)),
                    _ => {}
                }
            }
            Err(e) => self.show_error_popup(&format!("Error loading holdings: {}", e)),
        }
    }
}
