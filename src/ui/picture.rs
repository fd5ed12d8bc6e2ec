use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::app::Guess;
use crate::scene::Scene;

const GUESS_MARKER: char = '○';

/// The scene scaled to fill its area, with the last guess marked.
pub struct PictureView<'a> {
    pub scene: &'a Scene,
    pub guess: Option<Guess>,
}

impl Widget for PictureView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let art_style = Style::default().fg(Color::Gray);

        for dy in 0..area.height {
            for dx in 0..area.width {
                // Sample at the cell centre, the same point a click there maps to.
                let rel_x = (dx as f64 + 0.5) / area.width as f64 * 100.0;
                let rel_y = (dy as f64 + 0.5) / area.height as f64 * 100.0;
                let glyph = self.scene.glyph_at(rel_x, rel_y);
                if let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) {
                    cell.set_char(glyph).set_style(art_style);
                }
            }
        }

        if let Some(guess) = self.guess {
            let color = if guess.hit { Color::Green } else { Color::Red };
            if let Some(cell) = buf.cell_mut((guess.column, guess.row)) {
                cell.set_char(GUESS_MARKER)
                    .set_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
            }
        }
    }
}
