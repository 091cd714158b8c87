//! Centered placement of the time/date block within a monitor region

use crate::constants::MAX_SCREEN_DIMENSION;

/// Pixel rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Rect { x, y, w, h }
    }

    /// Regions with degenerate or absurd dimensions are skipped by callers
    /// iterating monitors.
    pub fn is_drawable(&self) -> bool {
        self.w > 0 && self.h > 0 && self.w <= MAX_SCREEN_DIMENSION && self.h <= MAX_SCREEN_DIMENSION
    }

    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }
}

/// Width and height of one laid-out line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineExtent {
    pub width: u32,
    pub height: u32,
}

impl LineExtent {
    pub fn new(width: u32, height: u32) -> Self {
        LineExtent { width, height }
    }
}

/// Where the block and its lines land inside a region.
///
/// `bounds` is the padded background box, clamped to the region; the line
/// origins are the top-left corners of each line box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPlacement {
    pub bounds: Rect,
    pub time_origin: (i32, i32),
    pub date_origin: Option<(i32, i32)>,
}

/// Center the time (and optional date) block in `region`.
///
/// The wider of the two lines drives the horizontal centering; the lines
/// stack with `spacing` pixels between them and the whole block shifts by
/// `y_offset`. The padded bounds shrink rather than overflow the region.
/// With `date == None` this degenerates to time-only layout.
pub fn place(
    region: Rect,
    time: LineExtent,
    date: Option<LineExtent>,
    y_offset: i32,
    spacing: i32,
    padding: (u32, u32),
) -> BlockPlacement {
    let rw = region.w as i32;
    let rh = region.h as i32;
    let time_h = time.height as i32;
    let (date_w, date_h) = date.map_or((0, 0), |d| (d.width as i32, d.height as i32));

    let total_h = time_h + if date.is_some() { spacing + date_h } else { 0 };
    let time_top = region.y + (rh - total_h) / 2 + y_offset;
    let date_top = time_top + time_h + spacing;

    let mut block_top = time_top;
    let mut block_bottom = time_top + time_h;
    if date.is_some() {
        // Negative spacing can pull the date above the time line.
        block_top = block_top.min(date_top);
        block_bottom = block_bottom.max(date_top + date_h);
    }

    let mut block_w = (time.width as i32).max(date_w) + 2 * padding.0 as i32;
    if block_w > rw {
        block_w = rw;
    }
    let mut block_x = region.x + (rw - block_w) / 2;
    if block_x < region.x {
        block_x = region.x;
    }
    if block_x + block_w > region.right() {
        block_x = region.x;
        block_w = rw;
    }

    let mut block_y = block_top - padding.1 as i32;
    if block_y < region.y {
        block_y = region.y;
    }
    let mut bottom = block_bottom + padding.1 as i32;
    if bottom > region.bottom() {
        bottom = region.bottom();
    }
    let block_h = (bottom - block_y).max(0);

    let time_x = (block_x + (block_w - time.width as i32) / 2).max(region.x);
    let date_x = date.map(|d| (block_x + (block_w - d.width as i32) / 2).max(region.x));

    BlockPlacement {
        bounds: Rect::new(block_x, block_y, block_w.max(0) as u32, block_h as u32),
        time_origin: (time_x, time_top),
        date_origin: date_x.map(|x| (x, date_top)),
    }
}
