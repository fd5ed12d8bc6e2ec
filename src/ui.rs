pub mod picture;
pub mod results;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::game::Phase;
use crate::notice::NoticeKind;
use crate::target::Target;

const HORIZONTAL_MARGIN: u16 = 2;

/// Where each part of the screen goes. Shared by rendering and by click
/// interpretation so both always agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub bar: Rect,
    pub notice: Rect,
    pub picture: Rect,
    pub footer: Rect,
    /// Smallest picture, in cells, that still shows every art cell.
    pub min_picture: (u16, u16),
}

impl ScreenLayout {
    pub fn new(area: Rect, min_picture: (u16, u16)) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // target bar
                Constraint::Length(1), // notice
                Constraint::Min(0),    // picture
                Constraint::Length(1), // key legend
            ])
            .split(area);

        Self {
            title: chunks[0],
            bar: chunks[1],
            notice: chunks[2],
            picture: chunks[3],
            footer: chunks[4],
            min_picture,
        }
    }

    /// Below the art size some single-cell regions fall between the cell
    /// centres a click can land on, so the picture is not playable.
    pub fn fits(&self) -> bool {
        self.picture.width >= self.min_picture.0 && self.picture.height >= self.min_picture.1
    }

    pub fn too_small_message(&self) -> String {
        format!(
            "Terminal too small: the picture needs {}x{} cells, got {}x{}",
            self.min_picture.0, self.min_picture.1, self.picture.width, self.picture.height
        )
    }

    pub fn picture_contains(&self, column: u16, row: u16) -> bool {
        let p = self.picture;
        column >= p.x && column < p.x + p.width && row >= p.y && row < p.y + p.height
    }

    pub fn target_at(&self, column: u16, row: u16) -> Option<Target> {
        if row != self.bar.y {
            return None;
        }
        target_bar_spans(self.bar)
            .into_iter()
            .find(|(_, start, end)| column >= *start && column < *end)
            .map(|(t, _, _)| t)
    }
}

fn target_label(idx: usize, target: Target) -> String {
    format!(" {} {} ", idx + 1, target.glyph())
}

/// Column span `[start, end)` of each target's label in the bar.
pub fn target_bar_spans(bar: Rect) -> Vec<(Target, u16, u16)> {
    let mut x = bar.x;
    Target::ALL
        .iter()
        .enumerate()
        .map(|(idx, t)| {
            let w = target_label(idx, *t).width() as u16;
            let span = (*t, x, x + w);
            x += w + 1;
            span
        })
        .collect()
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = ScreenLayout::new(area, self.scene().min_picture());
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        Paragraph::new(Span::styled(
            format!("Find all the items! ({})", self.scene().name),
            bold_style,
        ))
        .alignment(Alignment::Center)
        .render(layout.title, buf);

        if self.is_loading() {
            Paragraph::new(Span::styled(
                "Loading...",
                bold_style.add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center)
            .render(layout.picture, buf);
            return;
        }

        render_target_bar(self, layout.bar, buf);

        if let Some(notice) = self.notice() {
            let color = match notice.kind {
                NoticeKind::Error => Color::Red,
                NoticeKind::Hint => Color::Yellow,
            };
            Paragraph::new(Span::styled(
                notice.message.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .render(layout.notice, buf);
        }

        if layout.fits() {
            picture::PictureView {
                scene: self.scene(),
                guess: match self.session().phase() {
                    Phase::Playing => self.last_guess(),
                    Phase::Completed => None,
                },
            }
            .render(layout.picture, buf);
        } else {
            let message_area = if layout.picture.height > 0 {
                layout.picture
            } else {
                layout.notice
            };
            Paragraph::new(Span::styled(
                layout.too_small_message(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .render(message_area, buf);
        }

        let legend = match self.completion() {
            None => "click the picture / (1-3) pick icon / (tab) next / (esc)ape",
            Some(c) if c.reset_available() => "(r)eset / (q)uit",
            Some(_) => "type your name / (enter) submit / (esc)ape",
        };
        Paragraph::new(Span::styled(
            legend,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(layout.footer, buf);

        if let Some(completion) = self.completion() {
            results::ResultsOverlay {
                completion,
                leaderboard: self.leaderboard(),
                name_input: self.name_input(),
            }
            .render(layout.picture, buf);
        }
    }
}

fn render_target_bar(app: &App, bar: Rect, buf: &mut Buffer) {
    let session = app.session();
    let mut spans = Vec::new();

    for (idx, target) in Target::ALL.iter().enumerate() {
        let style = if session.is_found(*target) {
            Style::default()
                .add_modifier(Modifier::DIM)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if session.active() == Some(*target) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(target_label(idx, *target), style));
        spans.push(Span::raw(" "));
    }

    Paragraph::new(Line::from(spans)).render(bar, buf);
}
