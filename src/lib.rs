//! Rootclock Core - backend-agnostic desktop clock engine
//!
//! This crate provides the core of a root-window clock: clock string
//! formatting, UTF-8 decoding, font-fallback resolution, bounded text
//! layout, block placement and boundary-aligned refresh scheduling,
//! independent of any specific display backend.

pub mod block;
pub mod clock;
pub mod config;
pub mod constants;
pub mod dummy_backend;
pub mod error;
pub mod font;
pub mod layout;
pub mod render;
pub mod schedule;
pub mod traits;
pub mod utf8;

// Re-export main types
pub use block::{place, BlockPlacement, LineExtent, Rect};
pub use clock::{format_clock, ClockText};
pub use config::ClockConfig;
pub use error::{ClockError, ClockResult};
pub use font::{
    resolve, FontChain, FontContext, FontId, FontPattern, LoadedFont, NoMatchCache, Resolution,
};
pub use layout::{layout, measure, DrawRun, LayoutResult, RunKind};
pub use render::{draw_block, render_line, LineDraw};
pub use schedule::{next_wake, ScheduleDecision};

// Re-export traits
pub use traits::*;
