use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::centered;
use crate::domain::services::AppState;

const WIDTH: u16 = 50;

pub fn render<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let busy = app_state.session.is_busy();
    let form = &app_state.login_form;
    let panel = centered(WIDTH, form.height() + 3, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Sign in ");
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    form.render(frame, inner, true, busy);

    let hint = if busy {
        "Signing in..."
    } else {
        "Enter to sign in. Ctrl+R to create an account."
    };
    let hint_rect = Rect {
        y: inner.y + form.height(),
        height: 1,
        ..inner
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        hint_rect.intersection(inner),
    );
}
