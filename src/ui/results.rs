use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Widget},
};

use crate::app::{Completion, Submission};
use crate::leaderboard::{Leaderboard, CAPACITY};

const POPUP_WIDTH: u16 = 44;

/// Popup shown once every target is found.
pub struct ResultsOverlay<'a> {
    pub completion: &'a Completion,
    pub leaderboard: &'a Leaderboard,
    pub name_input: &'a str,
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

impl Widget for ResultsOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let c = self.completion;
        let table_rows = if c.is_new_high_score {
            CAPACITY as u16 + 1
        } else {
            0
        };
        let popup = centered(area, POPUP_WIDTH, 7 + table_rows);
        Clear.render(popup, buf);

        let green_bold = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(green_bold)
            .title(if c.is_new_high_score {
                "A new High Score!"
            } else {
                "Congratulations"
            });
        let inner = block.inner(popup);
        block.render(popup, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),          // caption
                Constraint::Length(1),          // time
                Constraint::Length(1),          // padding
                Constraint::Length(table_rows), // leaderboard
                Constraint::Min(0),             // input / status
            ])
            .split(inner);

        Paragraph::new("you found everything in:")
            .alignment(Alignment::Center)
            .render(chunks[0], buf);
        Paragraph::new(Span::styled(c.elapsed.display(), green_bold))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        if !c.is_new_high_score {
            return;
        }

        let rows = self.leaderboard.entries().iter().map(|e| {
            Row::new(vec![
                Cell::from(e.display_name.as_str()),
                Cell::from(e.time_display()),
            ])
        });
        Table::new(rows, [Constraint::Min(10), Constraint::Length(8)])
            .header(
                Row::new(vec!["User", "Time"])
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            )
            .render(chunks[3], buf);

        let status = match &c.submission {
            Submission::Editing => Line::from(vec![
                Span::raw("Name: "),
                Span::styled(self.name_input, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ]),
            Submission::Pending(_) => Line::from(Span::styled(
                "Saving score...",
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Submission::Failed(_) => Line::from(Span::styled(
                "Score not saved, (enter) to retry",
                Style::default().fg(Color::Red),
            )),
            Submission::Submitted => Line::from(Span::styled(
                "Score saved, (r) to play again",
                Style::default().fg(Color::Green),
            )),
        };
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}
