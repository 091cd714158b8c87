//! Scripted font backend and recording canvas for headless testing
//!
//! The dummy backend plays the role of the platform font stack: fonts are
//! coverage ranges with flat advances, and the "matcher" draws from a
//! pre-installed candidate pool. A lying candidate exercises the resolver's
//! defensive coverage recheck. The recording canvas captures draw commands
//! for assertions.

use std::ops::RangeInclusive;

use crate::block::Rect;
use crate::font::{FontId, FontPattern, LoadedFont};
use crate::traits::{Canvas, FontBackend};

struct DummyFont {
    id: FontId,
    coverage: Vec<RangeInclusive<char>>,
    advance: u32,
    height: u32,
    ascent: u32,
    claims_everything: bool,
}

impl DummyFont {
    fn covers(&self, cp: char) -> bool {
        self.coverage.iter().any(|r| r.contains(&cp))
    }
}

/// In-memory [`FontBackend`] with observable matcher traffic.
#[derive(Default)]
pub struct DummyFontBackend {
    fonts: Vec<DummyFont>,
    candidates: Vec<DummyFont>,
    next_id: u32,
    /// Every codepoint the matcher was asked about, in order.
    pub match_requests: Vec<char>,
    /// Every handle released back to the backend, in order.
    pub released: Vec<FontId>,
}

impl DummyFontBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a live font and hand back a chain-ready entry.
    pub fn install_font(
        &mut self,
        coverage: &[RangeInclusive<char>],
        advance: u32,
        height: u32,
        ascent: u32,
        from_name: bool,
    ) -> LoadedFont {
        let id = self.alloc_id();
        self.fonts.push(DummyFont {
            id,
            coverage: coverage.to_vec(),
            advance,
            height,
            ascent,
            claims_everything: false,
        });
        LoadedFont { id, height, ascent, from_name }
    }

    /// Make a font available through the matcher only.
    pub fn install_candidate(
        &mut self,
        coverage: &[RangeInclusive<char>],
        advance: u32,
        height: u32,
        ascent: u32,
    ) -> FontId {
        let id = self.alloc_id();
        self.candidates.push(DummyFont {
            id,
            coverage: coverage.to_vec(),
            advance,
            height,
            ascent,
            claims_everything: false,
        });
        id
    }

    /// A candidate the matcher returns for any request even though it covers
    /// nothing, imitating a matcher that lies about coverage.
    pub fn install_lying_candidate(&mut self, advance: u32, height: u32, ascent: u32) -> FontId {
        let id = self.alloc_id();
        self.candidates.push(DummyFont {
            id,
            coverage: Vec::new(),
            advance,
            height,
            ascent,
            claims_everything: true,
        });
        id
    }

    fn alloc_id(&mut self) -> FontId {
        self.next_id += 1;
        FontId(self.next_id)
    }

    fn find(&self, font: FontId) -> Option<&DummyFont> {
        self.fonts.iter().find(|f| f.id == font)
    }
}

impl FontBackend for DummyFontBackend {
    fn covers(&self, font: FontId, cp: char) -> bool {
        self.find(font).is_some_and(|f| f.covers(cp))
    }

    fn advance(&self, font: FontId, text: &str) -> u32 {
        let per_char = self.find(font).map_or(0, |f| f.advance);
        per_char * text.chars().count() as u32
    }

    fn match_codepoint(&mut self, _pattern: &FontPattern, cp: char) -> Option<LoadedFont> {
        self.match_requests.push(cp);
        let index = self
            .candidates
            .iter()
            .position(|f| f.claims_everything || f.covers(cp))?;
        let font = self.candidates.remove(index);
        let loaded = LoadedFont {
            id: font.id,
            height: font.height,
            ascent: font.ascent,
            from_name: false,
        };
        self.fonts.push(font);
        Some(loaded)
    }

    fn release(&mut self, font: FontId) {
        self.released.push(font);
        self.fonts.retain(|f| f.id != font);
    }
}

/// Canvas that records draw commands instead of blitting.
#[derive(Default)]
pub struct RecordingCanvas {
    pub rects: Vec<Rect>,
    /// `(x, baseline, font, text)` per glyph-run blit, in order.
    pub runs: Vec<(i32, i32, FontId, String)>,
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    fn draw_glyph_run(&mut self, x: i32, y: i32, font: FontId, text: &str) {
        self.runs.push((x, y, font, text.to_string()));
    }
}
