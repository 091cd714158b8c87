use crate::block::Rect;
use crate::font::{FontId, FontPattern, LoadedFont};

/// Glyph-level font services supplied by the embedding program.
///
/// The core never touches font files or rasterization itself; it only asks
/// whether a font covers a codepoint, how wide a byte run is, and whether the
/// platform can produce a new font covering a single codepoint. A backend is
/// also the release point for handles the chain hands back.
pub trait FontBackend {
    /// Glyph coverage test for one codepoint.
    fn covers(&self, font: FontId, cp: char) -> bool;

    /// Advance width in pixels for `text` rendered with `font`.
    fn advance(&self, font: FontId, text: &str) -> u32;

    /// Ask the platform matcher for a font covering `cp`, derived from the
    /// primary font's pattern. Matchers may lie about coverage; callers must
    /// recheck with [`FontBackend::covers`] before trusting the result.
    fn match_codepoint(&mut self, pattern: &FontPattern, cp: char) -> Option<LoadedFont>;

    /// Release a handle that will not be used again.
    fn release(&mut self, font: FontId);
}

/// Draw commands consumed by the embedding program.
///
/// The render phase emits only these two operations: a background fill and a
/// glyph-run blit. Everything else (mapping to a window, color schemes,
/// double buffering) lives outside the core.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect);

    /// Blit one run of text at `(x, y)` where `y` is the baseline.
    fn draw_glyph_run(&mut self, x: i32, y: i32, font: FontId, text: &str);
}
