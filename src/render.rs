//! Second phase of the two-phase text pipeline
//!
//! Layout produces runs; this module turns them into [`Canvas`] calls.
//! Marker runs draw their marker string directly, so rendering the
//! invalid-glyph placeholder never re-enters layout.

use crate::block::Rect;
use crate::constants::{ELLIPSIS, INVALID_GLYPH};
use crate::font::FontChain;
use crate::layout::{LayoutResult, RunKind};
use crate::traits::Canvas;

/// Everything needed to blit one laid-out line.
pub struct LineDraw<'a> {
    pub text: &'a [u8],
    pub layout: &'a LayoutResult,
    /// Line box height; runs center their own font's extent inside it.
    pub height: u32,
    pub chain: &'a FontChain,
    /// Top-left corner of the line box.
    pub origin: (i32, i32),
}

/// Fill the block background and blit each line.
pub fn draw_block(canvas: &mut dyn Canvas, bounds: Rect, lines: &[LineDraw<'_>]) {
    canvas.fill_rect(bounds);
    for line in lines {
        render_line(canvas, line.text, line.layout, line.origin.0, line.origin.1, line.height, line.chain);
    }
}

/// Blit one line's runs left to right starting at `(x, top)`.
///
/// Runs from different fonts share a line box; each run's baseline centers
/// its own font's height within it.
pub fn render_line(
    canvas: &mut dyn Canvas,
    text: &[u8],
    result: &LayoutResult,
    x: i32,
    top: i32,
    line_h: u32,
    chain: &FontChain,
) {
    let mut pen_x = x;
    for run in &result.runs {
        let font = chain.get(run.font).unwrap_or_else(|| chain.primary());
        let baseline = top + (line_h as i32 - font.height as i32) / 2 + font.ascent as i32;
        match run.kind {
            RunKind::Text => {
                let bytes = &text[run.byte_offset..run.byte_offset + run.byte_len];
                match std::str::from_utf8(bytes) {
                    Ok(s) => canvas.draw_glyph_run(pen_x, baseline, font.id, s),
                    // Text runs only ever cover bytes that decoded cleanly;
                    // a mismatched text/layout pair degrades to the marker.
                    Err(_) => canvas.draw_glyph_run(pen_x, baseline, font.id, INVALID_GLYPH),
                }
            }
            RunKind::Placeholder => canvas.draw_glyph_run(pen_x, baseline, font.id, INVALID_GLYPH),
            RunKind::Ellipsis => canvas.draw_glyph_run(pen_x, baseline, font.id, ELLIPSIS),
        }
        pen_x += run.width as i32;
    }
}
