mod dashboard;
mod login;
mod register;

use ratatui::prelude::Backend;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::NotificationLevel;
use crate::domain::models::Route;
use crate::domain::services::AppState;

/// A `width` x `height` rect centered in `rect`, clamped to fit.
pub fn centered(width: u16, height: u16, rect: Rect) -> Rect {
    let width = width.min(rect.width);
    let height = height.min(rect.height);

    return Rect {
        x: rect.x + (rect.width - width) / 2,
        y: rect.y + (rect.height - height) / 2,
        width,
        height,
    };
}

fn title(route: Route) -> &'static str {
    match route {
        Route::Login => return "Sign in",
        Route::Register => return "Create an account",
        Route::Dashboard => return "My movies",
    }
}

fn render_header<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let line = Line::from(vec![
        Span::styled(
            " Marquee ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(title(app_state.route), Style::default().add_modifier(Modifier::BOLD)),
    ]);

    frame.render_widget(Paragraph::new(line), rect);
}

fn render_status<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let line = match app_state.notifications.latest() {
        Some(notification) => {
            let color = match notification.level {
                NotificationLevel::Success => Color::Green,
                NotificationLevel::Info => Color::Cyan,
                NotificationLevel::Error => Color::Red,
            };
            Line::from(Span::styled(
                notification.text.to_string(),
                Style::default().fg(color),
            ))
        }
        None => Line::from(Span::styled(
            "Ctrl+C to quit",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), rect);
}

pub fn render<B: Backend>(frame: &mut Frame<B>, app_state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_header(frame, layout[0], app_state);
    match app_state.route {
        Route::Login => login::render(frame, layout[1], app_state),
        Route::Register => register::render(frame, layout[1], app_state),
        Route::Dashboard => dashboard::render(frame, layout[1], &app_state.dashboard),
    }
    render_status(frame, layout[2], app_state);
}
