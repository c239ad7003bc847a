#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::Frame;
use tui_textarea::CursorMove;
use tui_textarea::Input;
use tui_textarea::Key;
use tui_textarea::TextArea;

pub const FIELD_HEIGHT: u16 = 3;

fn textarea(value: &str, masked: bool) -> TextArea<'static> {
    let mut textarea = TextArea::new(vec![value.to_string()]);
    textarea.set_cursor_line_style(Style::default());
    if masked {
        textarea.set_mask_char('*');
    }
    textarea.move_cursor(CursorMove::End);

    return textarea;
}

/// A labelled single line text field.
#[derive(Clone)]
pub struct Field {
    pub label: &'static str,
    masked: bool,
    textarea: TextArea<'static>,
}

impl Field {
    pub fn new(label: &'static str) -> Field {
        return Field {
            label,
            masked: false,
            textarea: textarea("", false),
        };
    }

    pub fn masked(label: &'static str) -> Field {
        return Field {
            label,
            masked: true,
            textarea: textarea("", true),
        };
    }

    pub fn value(&self) -> &str {
        return self
            .textarea
            .lines()
            .first()
            .map(|line| return line.as_str())
            .unwrap_or("");
    }

    fn reset(&mut self, value: &str) {
        self.textarea = textarea(value, self.masked);
    }
}

/// A vertical stack of single line text fields with one focused field.
#[derive(Clone)]
pub struct Form {
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Form {
        return Form { fields, focus: 0 };
    }

    pub fn value(&self, idx: usize) -> &str {
        return self
            .fields
            .get(idx)
            .map(|field| return field.value())
            .unwrap_or("");
    }

    pub fn set_value(&mut self, idx: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(idx) {
            field.reset(value);
        }
    }

    pub fn clear(&mut self) {
        for field in self.fields.iter_mut() {
            field.reset("");
        }
        self.focus = 0;
    }

    pub fn next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.textarea.insert_str(text.replace(['\r', '\n'], ""));
        }
    }

    /// Applies a key press to the focused field. Tab and the arrow keys
    /// move focus, everything else is editing. Returns true when focus
    /// moved or the text changed.
    pub fn input(&mut self, input: Input) -> bool {
        match input {
            Input { key: Key::Tab, .. } | Input { key: Key::Down, .. } => {
                self.next();
                return true;
            }
            Input { key: Key::Up, .. } => {
                self.prev();
                return true;
            }
            // Newlines never reach a field.
            Input {
                key: Key::Enter, ..
            }
            | Input {
                key: Key::Char('m'),
                ctrl: true,
                ..
            } => {
                return false;
            }
            input => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    return field.textarea.input(input);
                }
                return false;
            }
        }
    }

    pub fn height(&self) -> u16 {
        return FIELD_HEIGHT * self.fields.len() as u16;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, active: bool, disabled: bool) {
        let mut constraints = self
            .fields
            .iter()
            .map(|_| return Constraint::Length(FIELD_HEIGHT))
            .collect::<Vec<Constraint>>();
        constraints.push(Constraint::Min(0));

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(rect);

        for (idx, field) in self.fields.iter().enumerate() {
            let focused = active && !disabled && idx == self.focus;

            let mut border_style = Style::default();
            if disabled {
                border_style = border_style.fg(Color::DarkGray);
            } else if focused {
                border_style = border_style.fg(Color::Yellow);
            }

            let mut textarea = field.textarea.clone();
            textarea.set_block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title(field.label)
                    .padding(Padding::new(1, 1, 0, 0)),
            );
            if disabled {
                textarea.set_style(Style::default().fg(Color::DarkGray));
            }
            if !focused {
                textarea.set_cursor_style(Style::default());
            }

            frame.render_widget(textarea.widget(), layout[idx]);
        }
    }
}
