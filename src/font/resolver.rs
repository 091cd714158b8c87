//! Per-codepoint font resolution against the fallback chain

use crate::font::FontContext;
use crate::traits::FontBackend;

/// Outcome of resolving one codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Chain index of a font verified to cover the codepoint.
    Font(usize),
    /// No available font covers it; draw the invalid-glyph placeholder with
    /// the primary font.
    Missing,
}

/// Find the font to render `cp` with.
///
/// Search order: the sticky font from the current run (consecutive
/// same-font characters skip the scan entirely), then a linear scan of the
/// whole chain, then the negative-match cache, and only then one external
/// match request derived from the primary font's pattern.
///
/// A matched candidate is rechecked with [`FontBackend::covers`] before it
/// joins the chain; matchers may lie. A candidate that fails the recheck is
/// released and the codepoint is recorded as unmatchable, as is a codepoint
/// the matcher produced nothing for.
pub fn resolve(
    cp: char,
    sticky: Option<usize>,
    ctx: &mut FontContext,
    backend: &mut dyn FontBackend,
) -> Resolution {
    if let Some(index) = sticky {
        if ctx
            .chain
            .get(index)
            .is_some_and(|font| backend.covers(font.id, cp))
        {
            return Resolution::Font(index);
        }
    }

    for (index, font) in ctx.chain.iter().enumerate() {
        if backend.covers(font.id, cp) {
            return Resolution::Font(index);
        }
    }

    if ctx.nomatch.contains(cp) {
        return Resolution::Missing;
    }

    let pattern = ctx.chain.primary_pattern().clone();
    match backend.match_codepoint(&pattern, cp) {
        Some(candidate) => {
            if backend.covers(candidate.id, cp) {
                let index = ctx.chain.push(candidate);
                tracing::debug!(codepoint = cp as u32, index, "appended fallback font");
                Resolution::Font(index)
            } else {
                tracing::warn!(
                    codepoint = cp as u32,
                    "matched font does not cover requested codepoint"
                );
                backend.release(candidate.id);
                ctx.nomatch.insert(cp);
                Resolution::Missing
            }
        }
        None => {
            ctx.nomatch.insert(cp);
            Resolution::Missing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy_backend::DummyFontBackend;
    use crate::font::{FontContext, FontPattern};

    fn context(backend: &mut DummyFontBackend) -> FontContext {
        let primary = backend.install_font(&[' '..='~'], 8, 20, 16, true);
        FontContext::new(primary, FontPattern::new("Test Sans", 20.0)).unwrap()
    }

    #[test]
    fn test_primary_covers_ascii() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        assert_eq!(resolve('A', None, &mut ctx, &mut backend), Resolution::Font(0));
        assert!(backend.match_requests.is_empty());
    }

    #[test]
    fn test_sticky_font_skips_scan() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        let emoji = backend.install_font(&['\u{1F600}'..='\u{1F64F}'], 20, 20, 16, false);
        let index = ctx.chain.push(emoji);
        // sticky hit resolves to the sticky font even though scanning would
        // find it anyway
        assert_eq!(
            resolve('\u{1F601}', Some(index), &mut ctx, &mut backend),
            Resolution::Font(index)
        );
    }

    #[test]
    fn test_chain_scan_finds_fallback_without_matching() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        let emoji = backend.install_font(&['\u{1F600}'..='\u{1F64F}'], 20, 20, 16, false);
        ctx.chain.push(emoji);
        assert_eq!(resolve('\u{1F600}', None, &mut ctx, &mut backend), Resolution::Font(1));
        assert!(backend.match_requests.is_empty());
    }

    #[test]
    fn test_external_match_appends_to_chain() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        backend.install_candidate(&['\u{4E00}'..='\u{9FFF}'], 20, 22, 18);
        assert_eq!(resolve('\u{4E2D}', None, &mut ctx, &mut backend), Resolution::Font(1));
        assert_eq!(backend.match_requests, vec!['\u{4E2D}']);
        assert_eq!(ctx.chain.len(), 2);
        // Subsequent resolves hit the chain, not the matcher.
        assert_eq!(resolve('\u{4E2D}', None, &mut ctx, &mut backend), Resolution::Font(1));
        assert_eq!(backend.match_requests.len(), 1);
    }

    #[test]
    fn test_no_match_goes_to_negative_cache() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        assert_eq!(resolve('\u{1F984}', None, &mut ctx, &mut backend), Resolution::Missing);
        assert_eq!(backend.match_requests.len(), 1);
        assert!(ctx.nomatch.contains('\u{1F984}'));
        // Cached: no second matcher call.
        assert_eq!(resolve('\u{1F984}', None, &mut ctx, &mut backend), Resolution::Missing);
        assert_eq!(backend.match_requests.len(), 1);
    }

    #[test]
    fn test_lying_matcher_is_rechecked_and_released() {
        let mut backend = DummyFontBackend::new();
        let mut ctx = context(&mut backend);
        // Candidate claims nothing it actually covers.
        let liar = backend.install_lying_candidate(20, 20, 16);
        assert_eq!(resolve('\u{1F984}', None, &mut ctx, &mut backend), Resolution::Missing);
        assert!(ctx.nomatch.contains('\u{1F984}'));
        assert_eq!(backend.released, vec![liar]);
        assert_eq!(ctx.chain.len(), 1);
    }
}
