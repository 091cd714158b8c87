// src/constants.rs

// Marker strings drawn in place of source text
pub const ELLIPSIS: &str = "...";
pub const INVALID_GLYPH: &str = "\u{FFFD}";

// Fallbacks when the clock format strings fail to expand
pub const FALLBACK_TIME: &str = "••••";
pub const FALLBACK_DATE: &str = "Unknown Date";

// Negative-match cache geometry (two-probe open addressing)
pub const NOMATCH_SLOTS: usize = 128;

// Scheduler margins: wake 50ms before a boundary, or 950ms into the
// second before it when the boundary is more than a second away
pub const WAKE_EARLY_MICROS: i64 = 50_000;
pub const WAKE_LATE_IN_SECOND_MICROS: i64 = 950_000;
pub const MICROS_PER_SEC: i64 = 1_000_000;

// Display limits
pub const MAX_SCREEN_DIMENSION: u32 = 32_767;

// Config defaults
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";
pub const DEFAULT_DATE_FORMAT: &str = "%A, %-d %B %Y";
pub const DEFAULT_TIME_FONT: &str = "Liberation Sans:style=Bold:size=120";
pub const DEFAULT_DATE_FONT: &str = "Liberation Sans:style=Regular:size=26";
pub const DEFAULT_BG_COLOR: &str = "#000000";
pub const DEFAULT_TIME_COLOR: &str = "#ffffff";
pub const DEFAULT_DATE_COLOR: &str = "#333333";
pub const DEFAULT_REFRESH_SECS: u32 = 1;
pub const DEFAULT_LINE_SPACING: i32 = 12;
pub const DEFAULT_BLOCK_Y_OFFSET: i32 = 0;
pub const DEFAULT_BLOCK_PADDING_X: u32 = 16;
pub const DEFAULT_BLOCK_PADDING_Y: u32 = 8;
