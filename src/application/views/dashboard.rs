#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;

use ratatui::prelude::Alignment;
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
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

use super::centered;
use crate::domain::services::Dashboard;
use crate::domain::services::Pane;

fn pane_block(title: &str, active: bool) -> Block<'static> {
    let mut border_style = Style::default();
    if active {
        border_style = border_style.fg(Color::Yellow);
    }

    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(format!(" {title} "));
}

fn render_form<B: Backend>(frame: &mut Frame<B>, rect: Rect, dashboard: &Dashboard) {
    let active = dashboard.pane == Pane::Form;
    let mut title = "Add movie";
    if dashboard.editing.is_some() {
        title = "Edit movie";
    }

    let block = pane_block(title, active);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(dashboard.form.height()),
            Constraint::Min(1),
        ])
        .split(inner);

    dashboard
        .form
        .render(frame, layout[0], active, dashboard.saving);

    let mut hint = "Enter to save. Ctrl+Right to browse the list.".to_string();
    if dashboard.saving {
        hint = "Saving...".to_string();
    } else if dashboard.editing.is_some() {
        hint = "Enter to save changes. Esc to cancel.".to_string();
    }

    frame.render_widget(
        Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true }),
        layout[1],
    );
}

fn render_list<B: Backend>(frame: &mut Frame<B>, rect: Rect, dashboard: &Dashboard) {
    let active = dashboard.pane == Pane::List;
    let mut title = format!("Movies ({})", dashboard.movies.len());
    if dashboard.deleting {
        title += " - deleting...";
    }
    let block = pane_block(&title, active);

    if dashboard.movies.is_empty() {
        let mut text = "No movies yet. Add one with the form on the left.";
        if dashboard.loading {
            text = "Loading movies...";
        }

        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(block.padding(Padding::new(1, 1, 1, 0))),
            rect,
        );
        return;
    }

    let items = dashboard
        .movies
        .iter()
        .map(|movie| {
            return ListItem::new(vec![
                Line::from(Span::styled(
                    movie.heading(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    movie.byline(),
                    Style::default().fg(Color::Gray),
                )),
            ]);
        })
        .collect::<Vec<ListItem>>();

    let mut highlight_style = Style::default();
    if active {
        highlight_style = highlight_style.bg(Color::DarkGray);
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(dashboard.selected));
    frame.render_stateful_widget(list, rect, &mut state);
}

fn render_delete_confirmation<B: Backend>(frame: &mut Frame<B>, rect: Rect, dashboard: &Dashboard) {
    let title = dashboard
        .movies
        .iter()
        .find(|movie| return Some(&movie.id) == dashboard.pending_delete.as_ref())
        .map(|movie| return movie.heading())
        .unwrap_or_else(|| return "this movie".to_string());

    let popup = centered(44, 5, rect);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(format!("Delete {title}?")),
            Line::from(Span::styled(
                "y to delete, n to keep",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Red)),
        ),
        popup,
    );
}

pub fn render<B: Backend>(frame: &mut Frame<B>, rect: Rect, dashboard: &Dashboard) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rect);

    render_form(frame, layout[0], dashboard);
    render_list(frame, layout[1], dashboard);

    if dashboard.pending_delete.is_some() {
        render_delete_confirmation(frame, rect, dashboard);
    }
}
