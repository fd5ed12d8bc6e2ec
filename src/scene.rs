use include_dir::{include_dir, Dir};
use serde::Deserialize;
use unicode_width::UnicodeWidthChar;

use crate::error::{HuntError, HuntResult};
use crate::region::RegionIndex;

static SCENE_DIR: Dir = include_dir!("src/scenes");

pub const DEFAULT_SCENE: &str = "parakeet";

/// The reference picture: ASCII art plus the bundled hit regions for it.
#[derive(Deserialize, Clone, Debug)]
pub struct Scene {
    pub name: String,
    art: Vec<String>,
    regions: RegionIndex,
    #[serde(skip)]
    grid: Vec<Vec<char>>,
}

impl Scene {
    pub fn bundled(file_stem: &str) -> HuntResult<Self> {
        let file = SCENE_DIR
            .get_file(format!("{}.json", file_stem))
            .ok_or_else(|| HuntError::Fetch(format!("scene {} is not bundled", file_stem)))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| HuntError::Fetch(format!("scene {} is not UTF-8", file_stem)))?;
        Self::from_json_str(contents)
    }

    pub fn from_json_str(s: &str) -> HuntResult<Self> {
        let mut scene: Scene = serde_json::from_str(s)?;
        scene.grid = scene
            .art
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c.width() {
                        Some(1) => c,
                        _ => ' ',
                    })
                    .collect()
            })
            .collect();
        Ok(scene)
    }

    pub fn regions(&self) -> &RegionIndex {
        &self.regions
    }

    /// Art size in cells (widest row, row count).
    pub fn size(&self) -> (usize, usize) {
        let width = self.grid.iter().map(Vec::len).max().unwrap_or(0);
        (width, self.grid.len())
    }

    /// Picture size the layout must provide, saturating at the terminal's
    /// `u16` range.
    pub fn min_picture(&self) -> (u16, u16) {
        let (w, h) = self.size();
        (
            u16::try_from(w).unwrap_or(u16::MAX),
            u16::try_from(h).unwrap_or(u16::MAX),
        )
    }

    /// Art cell under a percentage position, for drawing the picture at any
    /// size.
    pub fn glyph_at(&self, rel_x: f64, rel_y: f64) -> char {
        let (width, height) = self.size();
        if width == 0 || !(0.0..100.0).contains(&rel_x) || !(0.0..100.0).contains(&rel_y) {
            return ' ';
        }
        let col = (rel_x / 100.0 * width as f64).floor() as usize;
        let row = (rel_y / 100.0 * height as f64).floor() as usize;
        self.grid
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(' ')
    }
}
