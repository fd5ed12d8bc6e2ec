use crate::error::{HuntError, HuntResult};

/// Raw pointer position in document coordinates (scroll offset included).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Centre of a terminal cell; mouse reports only carry the cell.
    pub fn from_cell(column: u16, row: u16) -> Self {
        Self {
            x: column as f64 + 0.5,
            y: row as f64 + 0.5,
        }
    }
}

/// Click position as a percentage of the picture's width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    pub rel_x: f64,
    pub rel_y: f64,
}

/// On-screen bounding box of the picture, relative to the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<ratatui::layout::Rect> for Bounds {
    fn from(r: ratatui::layout::Rect) -> Self {
        Self {
            left: r.x as f64,
            top: r.y as f64,
            width: r.width as f64,
            height: r.height as f64,
        }
    }
}

/// The picture's bounding box in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportFrame {
    pub width: f64,
    pub height: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl ViewportFrame {
    pub fn is_measurable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

fn hundredths(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Convert a document point into picture percentages.
///
/// Not clamped: clicks outside the picture give values outside `[0, 100]`,
/// which never match a region.
pub fn to_normalized(point: Point, frame: &ViewportFrame) -> HuntResult<NormalizedPoint> {
    if !frame.is_measurable() {
        return Err(HuntError::Configuration(format!(
            "picture frame is {}x{}",
            frame.width, frame.height
        )));
    }

    Ok(NormalizedPoint {
        rel_x: hundredths((point.x - frame.origin_x) / frame.width * 100.0),
        rel_y: hundredths((point.y - frame.origin_y) / frame.height * 100.0),
    })
}

/// Tracks the latest picture frame. Each recompute replaces the previous
/// frame wholesale.
#[derive(Debug, Default)]
pub struct ViewportMapper {
    frame: Option<ViewportFrame>,
}

impl ViewportMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-measure after the picture loads or the viewport resizes.
    pub fn recompute(&mut self, bounds: Bounds, scroll: (f64, f64)) -> ViewportFrame {
        let frame = ViewportFrame {
            width: bounds.width,
            height: bounds.height,
            origin_x: bounds.left + scroll.0,
            origin_y: bounds.top + scroll.1,
        };
        tracing::debug!(?frame, "viewport frame recomputed");
        self.frame = Some(frame);
        frame
    }

    pub fn frame(&self) -> Option<ViewportFrame> {
        self.frame
    }

    pub fn normalize(&self, point: Point) -> HuntResult<NormalizedPoint> {
        let frame = self.frame.unwrap_or_default();
        to_normalized(point, &frame)
    }
}
