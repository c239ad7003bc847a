use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use super::views;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::infrastructure::storage::TokenStoreBox;

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    app_state.sync_route(&tx)?;

    loop {
        terminal.draw(|frame| {
            views::render(frame, app_state);
        })?;

        let event = events.next().await?;
        app_state.handle_event(event, &tx)?;

        if app_state.should_quit {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    store: TokenStoreBox,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut app_state = AppState::new(
        store,
        &Config::get(ConfigKey::Route),
        Duration::from_millis(Config::millis(ConfigKey::NotificationTimeout)),
    );

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
