// ---------------------------------------------------------------------------
// Page geometry: title band, caption band, and the 4x3 panel grid
// ---------------------------------------------------------------------------

/// Row-height weights of the four grid rows, top to bottom.
pub const ROW_WEIGHTS: [f64; 4] = [1.5, 1.5, 1.5, 2.0];
/// Number of grid columns.
pub const COLUMNS: u32 = 3;

/// Fraction of the page height reserved above the grid for the title.
const TITLE_BAND: f64 = 0.05;
/// Fraction reserved below the grid for the caption.
const CAPTION_BAND: f64 = 0.03;

/// Gap applied around each panel so neighbouring borders do not touch.
pub const PANEL_GUTTER: u32 = 12;

/// Pixel-space rectangle, end-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Rect {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Shrink the rectangle by `pad` on every side.
    pub fn inset(self, pad: u32) -> Rect {
        Rect {
            x0: self.x0 + pad,
            y0: self.y0 + pad,
            x1: self.x1 - pad,
            y1: self.y1 - pad,
        }
    }
}

/// The region assigned to every named panel of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub title_band: Rect,
    /// Row 0, all three columns.
    pub ratio: Rect,
    /// Row 1, column 0.
    pub enrollment: Rect,
    /// Row 1, column 1.
    pub pie_early: Rect,
    /// Row 1, column 2.
    pub pie_late: Rect,
    /// Row 2, all three columns.
    pub literacy: Rect,
    /// Row 3, all three columns.
    pub summary: Rect,
    pub caption_band: Rect,
}

/// Partition the canvas. Static configuration; there is no failure mode.
pub fn page_layout(width: u32, height: u32) -> PageLayout {
    let title_h = (f64::from(height) * TITLE_BAND).round() as u32;
    let caption_h = (f64::from(height) * CAPTION_BAND).round() as u32;
    let content_top = title_h;
    let content_bottom = height - caption_h;
    let content_h = f64::from(content_bottom - content_top);

    // Row edges from the cumulative weights.
    let total: f64 = ROW_WEIGHTS.iter().sum();
    let mut rows = [content_top; 5];
    let mut acc = 0.0;
    for (i, weight) in ROW_WEIGHTS.iter().enumerate() {
        acc += weight;
        rows[i + 1] = content_top + (content_h * acc / total).round() as u32;
    }

    let col = |i: u32| (f64::from(width) * f64::from(i) / f64::from(COLUMNS)).round() as u32;

    PageLayout {
        title_band: Rect { x0: 0, y0: 0, x1: width, y1: title_h },
        ratio: Rect { x0: 0, y0: rows[0], x1: width, y1: rows[1] },
        enrollment: Rect { x0: col(0), y0: rows[1], x1: col(1), y1: rows[2] },
        pie_early: Rect { x0: col(1), y0: rows[1], x1: col(2), y1: rows[2] },
        pie_late: Rect { x0: col(2), y0: rows[1], x1: col(3), y1: rows[2] },
        literacy: Rect { x0: 0, y0: rows[2], x1: width, y1: rows[3] },
        summary: Rect { x0: 0, y0: rows[3], x1: width, y1: rows[4] },
        caption_band: Rect { x0: 0, y0: content_bottom, x1: width, y1: height },
    }
}
