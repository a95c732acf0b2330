use crate::state::form::FormSession;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget};

/// Modal form overlay: one line per field, the focused field carries a
/// cursor. Rendered on top of whatever tab is active.
pub struct FormView<'a> {
    pub session: &'a FormSession,
}

impl Widget for FormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", self.session.title));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 8 || inner.height < 2 {
            return;
        }

        let label_width = self
            .session
            .fields
            .iter()
            .map(|f| f.label.chars().count())
            .max()
            .unwrap_or(0);
        let value_width = (inner.width as usize).saturating_sub(label_width + 4);

        let mut lines = Vec::with_capacity(self.session.fields.len() + 2);
        lines.push(Line::from(Span::styled(
            "Enter=next/save  ^S=save  Esc=cancel  Tab/↑↓=move",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));

        for (idx, field) in self.session.fields.iter().enumerate() {
            let focused = idx == self.session.focus;
            let label = format!("{:<label_width$}  ", field.label);
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let value = visible_value(&field.value, value_width, focused);
            let value_style = if focused {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(vec![
                Span::styled(label, label_style),
                Span::styled(value, value_style),
            ]));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Clip a field value to the space available. The focused field keeps its
/// tail visible (that is where the cursor is) and shows the cursor.
fn visible_value(value: &str, width: usize, focused: bool) -> String {
    let budget = if focused { width.saturating_sub(1) } else { width };
    let count = value.chars().count();
    let mut shown: String = if count > budget {
        if focused {
            value.chars().skip(count - budget).collect()
        } else {
            value.chars().take(budget).collect()
        }
    } else {
        value.to_string()
    };
    if focused {
        shown.push('_');
    }
    shown
}
