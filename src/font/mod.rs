//! Font chain and fallback resolution
//!
//! The chain starts with one pattern-loaded primary font and grows
//! monotonically as fallback fonts are discovered at runtime. Fallbacks are
//! never evicted: glyph coverage is assumed stable for the life of the
//! process, so a font that covered a codepoint once will keep covering it.

pub mod nomatch;
pub mod resolver;

#[cfg(feature = "font-discovery")]
pub mod fontdue_backend;

use crate::error::{ClockError, ClockResult};
use crate::traits::FontBackend;

pub use nomatch::NoMatchCache;
pub use resolver::{resolve, Resolution};

/// Opaque handle to a font resource owned by a [`FontBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

/// Nameable pattern a font was loaded from. Fallback lookups derive their
/// single-codepoint queries from the primary font's pattern, so the primary
/// must always carry one.
#[derive(Debug, Clone, PartialEq)]
pub struct FontPattern {
    pub family: String,
    pub pixel_size: f32,
}

impl FontPattern {
    pub fn new(family: &str, pixel_size: f32) -> Self {
        FontPattern { family: family.to_string(), pixel_size }
    }
}

/// A loaded font plus the metrics the layout and render phases need.
///
/// `from_name` distinguishes fonts loaded from a nameable pattern (trusted to
/// drive fallback pattern derivation) from fonts matched ad hoc for a single
/// codepoint (not reused as a pattern source).
#[derive(Debug, Clone)]
pub struct LoadedFont {
    pub id: FontId,
    /// Line height: ascent + descent, in pixels.
    pub height: u32,
    pub ascent: u32,
    pub from_name: bool,
}

/// Ordered, append-only font sequence. Index 0 is the primary font; later
/// entries are fallbacks in discovery order. Never reordered, so chain
/// indices stay valid for the life of the chain.
pub struct FontChain {
    pattern: FontPattern,
    fonts: Vec<LoadedFont>,
}

impl FontChain {
    /// Build a chain around a pattern-loaded primary font.
    ///
    /// A primary that was not loaded by name makes fallback derivation
    /// impossible, which is a fatal configuration error.
    pub fn new(primary: LoadedFont, pattern: FontPattern) -> ClockResult<Self> {
        if !primary.from_name {
            return Err(ClockError::PrimaryFontNotNamed);
        }
        Ok(FontChain { pattern, fonts: vec![primary] })
    }

    pub fn primary(&self) -> &LoadedFont {
        &self.fonts[0]
    }

    pub fn primary_pattern(&self) -> &FontPattern {
        &self.pattern
    }

    pub fn get(&self, index: usize) -> Option<&LoadedFont> {
        self.fonts.get(index)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        false // always holds at least the primary
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedFont> {
        self.fonts.iter()
    }

    /// Append a fallback font, returning its chain index.
    pub fn push(&mut self, font: LoadedFont) -> usize {
        self.fonts.push(font);
        self.fonts.len() - 1
    }

    /// Release every handle in the chain back to the backend.
    pub fn dispose(self, backend: &mut dyn FontBackend) {
        for font in &self.fonts {
            backend.release(font.id);
        }
    }
}

/// Process-wide font state, constructed once at startup by the caller and
/// passed by reference into every resolve/layout call. One thread owns it;
/// a multi-threaded port must serialize access to the chain and the cache
/// together, since chain append and cache insert are not atomic as a pair.
pub struct FontContext {
    pub chain: FontChain,
    pub nomatch: NoMatchCache,
}

impl FontContext {
    pub fn new(primary: LoadedFont, pattern: FontPattern) -> ClockResult<Self> {
        Ok(FontContext {
            chain: FontChain::new(primary, pattern)?,
            nomatch: NoMatchCache::new(),
        })
    }

    pub fn dispose(self, backend: &mut dyn FontBackend) {
        self.chain.dispose(backend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font(id: u32, from_name: bool) -> LoadedFont {
        LoadedFont { id: FontId(id), height: 20, ascent: 16, from_name }
    }

    #[test]
    fn test_chain_requires_named_primary() {
        let pattern = FontPattern::new("Liberation Sans", 120.0);
        assert!(FontChain::new(font(1, true), pattern.clone()).is_ok());
        assert!(matches!(
            FontChain::new(font(1, false), pattern),
            Err(ClockError::PrimaryFontNotNamed)
        ));
    }

    #[test]
    fn test_chain_append_preserves_order() {
        let pattern = FontPattern::new("Liberation Sans", 120.0);
        let mut chain = FontChain::new(font(1, true), pattern).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.push(font(2, false)), 1);
        assert_eq!(chain.push(font(3, false)), 2);
        let ids: Vec<u32> = chain.iter().map(|f| f.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
