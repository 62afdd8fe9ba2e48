//! Login and registration form rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{AuthMode, AuthState};

/// Draws the form centered in `area`.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, area: Rect, state: &AuthState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(area);

    let (title, switch_hint) = match state.mode {
        AuthMode::Login => (" Login ", "No account? ^r Register"),
        AuthMode::Register => (" Register ", "Have an account? ^r Login"),
    };

    let mut lines = Vec::new();
    for (i, field) in state.fields().iter().enumerate() {
        let focused = i == state.focus;
        let value = state.value(*field);
        let shown = if field.is_secret() {
            "*".repeat(value.chars().count())
        } else {
            String::from(value)
        };
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>17}: ", field.label()), label_style),
            Span::raw(shown),
            Span::raw(if focused { "_" } else { "" }),
        ]));
    }
    lines.push(Line::from(""));
    let submit = if state.submitting {
        Span::styled("Submitting...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled("[Enter] Submit", Style::default().fg(Color::Yellow))
    };
    lines.push(Line::from(vec![
        submit,
        Span::raw("  [Tab] Next field  "),
        Span::raw(switch_hint),
    ]));
    if let Some(error) = &state.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(columns[1]);

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
        rows[1],
    );
}
