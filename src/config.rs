// src/config.rs
use crate::constants::{
    DEFAULT_BG_COLOR, DEFAULT_BLOCK_PADDING_X, DEFAULT_BLOCK_PADDING_Y, DEFAULT_BLOCK_Y_OFFSET,
    DEFAULT_DATE_COLOR, DEFAULT_DATE_FONT, DEFAULT_DATE_FORMAT, DEFAULT_LINE_SPACING,
    DEFAULT_REFRESH_SECS, DEFAULT_TIME_COLOR, DEFAULT_TIME_FONT, DEFAULT_TIME_FORMAT,
};

/// Clock configuration.
///
/// Font and color values are opaque strings interpreted by the embedding
/// program; the core only consumes the formats, the refresh interval and the
/// block geometry knobs.
#[derive(Clone, Debug)]
pub struct ClockConfig {
    pub time_font: String,
    pub time_color: String,
    pub time_format: String,
    pub show_date: bool,
    pub date_font: String,
    pub date_color: String,
    pub date_format: String,
    pub bg_color: String,
    pub refresh_secs: u32,
    /// Shift the entire block (time+date) vertically, in pixels.
    pub block_y_offset: i32,
    /// Gap between the time and date lines, in pixels.
    pub line_spacing: i32,
    pub block_padding_x: u32,
    pub block_padding_y: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            time_font: DEFAULT_TIME_FONT.to_string(),
            time_color: DEFAULT_TIME_COLOR.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            show_date: true,
            date_font: DEFAULT_DATE_FONT.to_string(),
            date_color: DEFAULT_DATE_COLOR.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            bg_color: DEFAULT_BG_COLOR.to_string(),
            refresh_secs: DEFAULT_REFRESH_SECS,
            block_y_offset: DEFAULT_BLOCK_Y_OFFSET,
            line_spacing: DEFAULT_LINE_SPACING,
            block_padding_x: DEFAULT_BLOCK_PADDING_X,
            block_padding_y: DEFAULT_BLOCK_PADDING_Y,
        }
    }
}

impl ClockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_format(mut self, format: &str) -> Self {
        self.time_format = format.to_string();
        self
    }

    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn with_show_date(mut self, show: bool) -> Self {
        self.show_date = show;
        self
    }

    pub fn with_refresh_secs(mut self, secs: u32) -> Self {
        self.refresh_secs = secs;
        self
    }

    pub fn with_block_y_offset(mut self, offset: i32) -> Self {
        self.block_y_offset = offset;
        self
    }

    pub fn with_line_spacing(mut self, spacing: i32) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn with_block_padding(mut self, x: u32, y: u32) -> Self {
        self.block_padding_x = x;
        self.block_padding_y = y;
        self
    }
}
