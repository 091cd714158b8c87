//! Bounded multi-font text layout
//!
//! Turns a byte string into an ordered sequence of draw runs that fits a
//! pixel budget. Consecutive characters renderable by the same font collapse
//! into one run to minimize draw calls; a font change closes the current run.
//! When the budget runs out the line is truncated at the last point where the
//! ellipsis marker still fits, and a dedicated ellipsis run is appended (or
//! the line is cut hard if the ellipsis never fit). Malformed bytes and
//! codepoints no font covers each become a single placeholder run.
//!
//! Layout is pure: it produces runs, including marker runs, and a separate
//! render phase performs the blits. For a chain that does not grow mid-call,
//! the same (text, budget, chain) always yields the same result.

use crate::constants::{ELLIPSIS, INVALID_GLYPH};
use crate::font::{resolver, FontContext, Resolution};
use crate::traits::FontBackend;
use crate::utf8;

/// What a run draws: source bytes, the invalid-glyph marker, or the
/// truncation ellipsis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Text,
    Placeholder,
    Ellipsis,
}

/// One left-to-right draw instruction.
///
/// `font` is an index into the [`FontChain`](crate::font::FontChain) the
/// layout ran against. For `Text` runs the byte range selects source bytes;
/// for `Placeholder` runs it covers the consumed (malformed or uncovered)
/// source bytes while the marker string is what gets drawn; `Ellipsis` runs
/// have a zero-length range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRun {
    pub byte_offset: usize,
    pub byte_len: usize,
    pub font: usize,
    pub width: u32,
    pub kind: RunKind,
}

/// Result of laying out one line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutResult {
    /// Total pixel width consumed; always the sum of the run widths.
    pub width: u32,
    pub runs: Vec<DrawRun>,
    pub truncated: bool,
}

/// Restore point for truncation: the last prefix after which the ellipsis
/// still fit the budget. The run being accumulated at that point may have
/// grown since, so its length and width are snapshotted too.
#[derive(Clone, Copy)]
struct Mark {
    runs: usize,
    last_len: usize,
    last_width: u32,
    width: u32,
}

/// Lay out `text` into draw runs that fit `budget` pixels.
pub fn layout(
    text: &[u8],
    budget: u32,
    ctx: &mut FontContext,
    backend: &mut dyn FontBackend,
) -> LayoutResult {
    let mut result = LayoutResult::default();
    if text.is_empty() {
        return result;
    }

    // Marker extents resolve through the same chain as real text. The
    // invalid marker is measured lazily so layouts of well-formed, fully
    // covered text never touch it.
    let (ellipsis_w, ellipsis_font) = marker_extent(ELLIPSIS, ctx, backend);
    let mut invalid: Option<(u32, usize)> = None;

    let mut sticky: Option<usize> = None;
    let mut mark: Option<Mark> = None;
    let mut pos = 0;

    while pos < text.len() {
        // Checkpoint before each character: the latest prefix that still
        // leaves room for the ellipsis.
        if result.width.saturating_add(ellipsis_w) <= budget {
            mark = Some(Mark {
                runs: result.runs.len(),
                last_len: result.runs.last().map_or(0, |r| r.byte_len),
                last_width: result.runs.last().map_or(0, |r| r.width),
                width: result.width,
            });
        }

        let decoded = utf8::decode(&text[pos..]);
        let step = decoded.len.min(text.len() - pos);

        let (item_width, item_font, item_kind) = if !decoded.valid {
            let (w, f) =
                *invalid.get_or_insert_with(|| marker_extent(INVALID_GLYPH, ctx, backend));
            (w, f, RunKind::Placeholder)
        } else {
            match resolver::resolve(decoded.cp, sticky, ctx, backend) {
                Resolution::Font(index) => {
                    let mut buf = [0u8; 4];
                    let encoded = decoded.cp.encode_utf8(&mut buf);
                    let w = backend.advance(font_id_at(ctx, index), encoded);
                    (w, index, RunKind::Text)
                }
                Resolution::Missing => {
                    let (w, f) =
                        *invalid.get_or_insert_with(|| marker_extent(INVALID_GLYPH, ctx, backend));
                    (w, f, RunKind::Placeholder)
                }
            }
        };

        if result.width.saturating_add(item_width) > budget {
            result.truncated = true;
            break;
        }

        match item_kind {
            RunKind::Text => {
                sticky = Some(item_font);
                match result.runs.last_mut() {
                    Some(last)
                        if last.kind == RunKind::Text
                            && last.font == item_font
                            && last.byte_offset + last.byte_len == pos =>
                    {
                        last.byte_len += step;
                        last.width += item_width;
                    }
                    _ => result.runs.push(DrawRun {
                        byte_offset: pos,
                        byte_len: step,
                        font: item_font,
                        width: item_width,
                        kind: RunKind::Text,
                    }),
                }
            }
            _ => {
                // One placeholder per broken sequence or uncovered
                // codepoint; never merged.
                result.runs.push(DrawRun {
                    byte_offset: pos,
                    byte_len: step,
                    font: item_font,
                    width: item_width,
                    kind: RunKind::Placeholder,
                });
                sticky = None;
            }
        }
        result.width += item_width;
        pos += step;
    }

    if result.truncated {
        match mark {
            Some(m) => {
                result.runs.truncate(m.runs);
                if let Some(last) = result.runs.last_mut() {
                    last.byte_len = m.last_len;
                    last.width = m.last_width;
                }
                result.width = m.width;
                let offset = result.runs.last().map_or(0, |r| r.byte_offset + r.byte_len);
                result.runs.push(DrawRun {
                    byte_offset: offset,
                    byte_len: 0,
                    font: ellipsis_font,
                    width: ellipsis_w,
                    kind: RunKind::Ellipsis,
                });
                result.width += ellipsis_w;
            }
            // The ellipsis never fit anywhere: cut the line with nothing.
            None => {
                result.runs.clear();
                result.width = 0;
            }
        }
    }

    result
}

/// Unbounded width of `text`, for centering computations.
pub fn measure(text: &[u8], ctx: &mut FontContext, backend: &mut dyn FontBackend) -> u32 {
    layout(text, u32::MAX, ctx, backend).width
}

/// Width and font of a marker string, resolved per character like any other
/// text. A marker character nothing covers still measures against the
/// primary font, which is also what ends up drawing it.
fn marker_extent(
    marker: &str,
    ctx: &mut FontContext,
    backend: &mut dyn FontBackend,
) -> (u32, usize) {
    let bytes = marker.as_bytes();
    let mut width = 0u32;
    let mut font = 0usize;
    let mut first = true;
    let mut sticky = None;
    let mut pos = 0;
    while pos < bytes.len() {
        let decoded = utf8::decode(&bytes[pos..]);
        let step = decoded.len.min(bytes.len() - pos);
        let index = match resolver::resolve(decoded.cp, sticky, ctx, backend) {
            Resolution::Font(i) => i,
            Resolution::Missing => 0,
        };
        if first {
            font = index;
            first = false;
        }
        sticky = Some(index);
        width = width.saturating_add(backend.advance(font_id_at(ctx, index), &marker[pos..pos + step]));
        pos += step;
    }
    (width, font)
}

fn font_id_at(ctx: &FontContext, index: usize) -> crate::font::FontId {
    ctx.chain.get(index).unwrap_or_else(|| ctx.chain.primary()).id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy_backend::DummyFontBackend;
    use crate::font::{FontContext, FontPattern};

    const ADV: u32 = 8; // flat per-char advance of the test primary font

    fn context(backend: &mut DummyFontBackend) -> FontContext {
        // ASCII plus the replacement character, so marker measurement never
        // consults the matcher.
        let primary =
            backend.install_font(&[' '..='~', '\u{FFFD}'..='\u{FFFD}'], ADV, 20, 16, true);
        FontContext::new(primary, FontPattern::new("Test Sans", 20.0)).unwrap()
    }

    #[test]
    fn test_ascii_single_run() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        let result = layout(b"12:34", 10_000, &mut ctx, &mut backend);
        assert!(!result.truncated);
        assert_eq!(result.runs.len(), 1);
        let run = &result.runs[0];
        assert_eq!((run.byte_offset, run.byte_len), (0, 5));
        assert_eq!(run.kind, RunKind::Text);
        assert_eq!(result.width, 5 * ADV);
        assert!(backend.match_requests.is_empty());
    }

    #[test]
    fn test_font_change_splits_runs() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        let emoji = backend.install_font(&['\u{1F600}'..='\u{1F64F}'], 20, 20, 16, false);
        ctx.chain.push(emoji);

        let text = "12😀34";
        let result = layout(text.as_bytes(), 10_000, &mut ctx, &mut backend);
        assert!(!result.truncated);
        assert_eq!(result.runs.len(), 3);
        assert_eq!(result.runs[0].font, 0);
        assert_eq!(result.runs[1].font, 1);
        assert_eq!(result.runs[2].font, 0);
        assert_eq!(result.runs[1].byte_len, 4);
        assert_eq!(result.width, 4 * ADV + 20);
        // Second font was already in the chain: no external match call.
        assert!(backend.match_requests.is_empty());
    }

    #[test]
    fn test_truncation_appends_ellipsis() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        // 8 chars x 8px = 64px against a 60px budget; ellipsis is 24px, so
        // the last prefix it fits after is 4 chars (32px).
        let result = layout(b"12345678", 60, &mut ctx, &mut backend);
        assert!(result.truncated);
        assert_eq!(result.runs.len(), 2);
        assert_eq!(result.runs[0].byte_len, 4);
        assert_eq!(result.runs[1].kind, RunKind::Ellipsis);
        assert_eq!(result.runs[1].byte_len, 0);
        assert_eq!(result.width, 4 * ADV + 3 * ADV);
    }

    #[test]
    fn test_ellipsis_that_never_fits_cuts_hard() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        // Budget below the 24px ellipsis: truncation yields nothing at all.
        let result = layout(b"123", 20, &mut ctx, &mut backend);
        assert!(result.truncated);
        assert!(result.runs.is_empty());
        assert_eq!(result.width, 0);
    }

    #[test]
    fn test_character_wider_than_entire_budget() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        let result = layout(b"1", 4, &mut ctx, &mut backend);
        assert!(result.truncated);
        assert!(result.runs.is_empty());
    }

    #[test]
    fn test_decode_failure_inserts_one_placeholder() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        let result = layout(b"a\x80b", 10_000, &mut ctx, &mut backend);
        assert!(!result.truncated);
        assert_eq!(result.runs.len(), 3);
        assert_eq!(result.runs[1].kind, RunKind::Placeholder);
        assert_eq!((result.runs[1].byte_offset, result.runs[1].byte_len), (1, 1));
        assert_eq!(result.runs[2].byte_offset, 2);
        assert_eq!(result.width, 3 * ADV);
    }

    #[test]
    fn test_multibyte_garbage_consumes_examined_bytes() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        // 3-byte lead with a corrupt third byte: two bytes become one
        // placeholder, then 'x' resumes normally.
        let result = layout(b"\xE2\x82x", 10_000, &mut ctx, &mut backend);
        assert_eq!(result.runs.len(), 2);
        assert_eq!((result.runs[0].byte_offset, result.runs[0].byte_len), (0, 2));
        assert_eq!(result.runs[0].kind, RunKind::Placeholder);
        assert_eq!((result.runs[1].byte_offset, result.runs[1].byte_len), (2, 1));
    }

    #[test]
    fn test_uncovered_codepoint_uses_cache_after_first_miss() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        let text = "a\u{1F984}b";
        let first = layout(text.as_bytes(), 10_000, &mut ctx, &mut backend);
        assert_eq!(first.runs[1].kind, RunKind::Placeholder);
        assert_eq!(backend.match_requests.len(), 1);
        // Second layout: negative cache short-circuits the matcher.
        let second = layout(text.as_bytes(), 10_000, &mut ctx, &mut backend);
        assert_eq!(backend.match_requests.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_runs_never_exceed_budget() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        let emoji = backend.install_font(&['\u{1F600}'..='\u{1F64F}'], 20, 20, 16, false);
        ctx.chain.push(emoji);
        let text = "ab😀cd\u{1F984}ef".as_bytes();
        for budget in 0..=120 {
            let result = layout(text, budget, &mut ctx, &mut backend);
            assert!(result.width <= budget, "width {} over budget {}", result.width, budget);
            let sum: u32 = result.runs.iter().map(|r| r.width).sum();
            assert_eq!(sum, result.width);
        }
    }

    #[test]
    fn test_layout_is_idempotent_once_chain_stabilizes() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        backend.install_candidate(&['\u{4E00}'..='\u{9FFF}'], 22, 24, 19);
        let text = "12:\u{4E2D}34".as_bytes();
        // First call may grow the chain; afterwards results must be stable.
        let _ = layout(text, 200, &mut ctx, &mut backend);
        let a = layout(text, 200, &mut ctx, &mut backend);
        let b = layout(text, 200, &mut ctx, &mut backend);
        assert_eq!(a, b);
    }

    #[test]
    fn test_measure_matches_unbounded_layout() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        assert_eq!(measure(b"12:34", &mut ctx, &mut backend), 5 * ADV);
        assert_eq!(measure(b"", &mut ctx, &mut backend), 0);
    }

    #[test]
    fn test_fallback_growth_inside_one_call() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        backend.install_candidate(&['\u{4E00}'..='\u{9FFF}'], 22, 24, 19);
        let result = layout("a\u{4E2D}b".as_bytes(), 10_000, &mut ctx, &mut backend);
        assert_eq!(ctx.chain.len(), 2);
        assert_eq!(result.runs.len(), 3);
        assert_eq!(result.runs[1].font, 1);
        assert_eq!(result.runs[1].kind, RunKind::Text);
        assert_eq!(backend.match_requests.len(), 1);
    }
}
