//! Concrete [`FontBackend`] over fontdue with filesystem candidate discovery
//!
//! Coverage is a cmap lookup, advances come from per-glyph metrics, and the
//! matcher draws from a pool of candidate fonts discovered by scanning font
//! directories at startup. The resolver still rechecks coverage on every
//! match result before trusting it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::error::{ClockError, ClockResult};
use crate::font::{FontId, FontPattern, LoadedFont};
use crate::traits::FontBackend;

struct Candidate {
    name: String,
    font: Option<fontdue::Font>,
}

/// Font backend backed by fontdue-parsed font files.
pub struct FontdueBackend {
    pixel_size: f32,
    fonts: HashMap<u32, fontdue::Font>,
    candidates: Vec<Candidate>,
    next_id: u32,
}

impl FontdueBackend {
    pub fn new(pixel_size: f32) -> Self {
        FontdueBackend {
            pixel_size,
            fonts: HashMap::new(),
            candidates: Vec::new(),
            next_id: 0,
        }
    }

    /// Load a named font file as a chain-ready primary or secondary font.
    /// The returned entry is marked pattern-loaded and can seed a
    /// [`FontChain`](crate::font::FontChain).
    pub fn load_named(&mut self, path: &Path) -> ClockResult<LoadedFont> {
        let font = read_font(path, self.pixel_size).map_err(|e| ClockError::FontLoadFailed {
            path: path.display().to_string(),
            message: format!("{e:#}"),
        })?;
        let (height, ascent) = self.line_extent(&font);
        let id = self.alloc_id();
        self.fonts.insert(id.0, font);
        Ok(LoadedFont { id, height, ascent, from_name: true })
    }

    /// Scan font directories for fallback candidates the matcher can offer.
    /// Returns how many candidates were added; unreadable files are skipped.
    pub fn discover_candidates(&mut self, search_paths: &[PathBuf]) -> usize {
        let mut found = 0;
        for dir in search_paths {
            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if !is_font_file(&path) {
                    continue;
                }
                match read_font(&path, self.pixel_size) {
                    Ok(font) => {
                        self.candidates.push(Candidate {
                            name: path.display().to_string(),
                            font: Some(font),
                        });
                        found += 1;
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "skipping unreadable font file");
                    }
                }
            }
        }
        found
    }

    /// Platform-specific font search paths.
    pub fn default_search_paths() -> Vec<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            vec![
                "/usr/share/fonts".into(),
                "/usr/local/share/fonts".into(),
                "~/.fonts".into(),
            ]
        }

        #[cfg(target_os = "macos")]
        {
            vec![
                "/System/Library/Fonts".into(),
                "/Library/Fonts".into(),
                "~/Library/Fonts".into(),
            ]
        }

        #[cfg(target_os = "windows")]
        {
            vec!["C:\\Windows\\Fonts".into()]
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            vec![]
        }
    }

    fn line_extent(&self, font: &fontdue::Font) -> (u32, u32) {
        match font.horizontal_line_metrics(self.pixel_size) {
            Some(m) => {
                let ascent = m.ascent.max(0.0).round() as u32;
                let descent = (-m.descent).max(0.0).round() as u32;
                (ascent + descent, ascent)
            }
            None => {
                let px = self.pixel_size.max(1.0).round() as u32;
                (px, px)
            }
        }
    }

    fn alloc_id(&mut self) -> FontId {
        self.next_id += 1;
        FontId(self.next_id)
    }
}

impl FontBackend for FontdueBackend {
    fn covers(&self, font: FontId, cp: char) -> bool {
        self.fonts
            .get(&font.0)
            .is_some_and(|f| f.lookup_glyph_index(cp) != 0)
    }

    fn advance(&self, font: FontId, text: &str) -> u32 {
        let Some(f) = self.fonts.get(&font.0) else {
            return 0;
        };
        let mut width = 0.0f32;
        for ch in text.chars() {
            width += f.metrics(ch, self.pixel_size).advance_width;
        }
        width.max(0.0).round() as u32
    }

    fn match_codepoint(&mut self, _pattern: &FontPattern, cp: char) -> Option<LoadedFont> {
        let index = self.candidates.iter().position(|c| {
            c.font
                .as_ref()
                .is_some_and(|f| f.lookup_glyph_index(cp) != 0)
        })?;
        let font = self.candidates[index].font.take()?;
        tracing::debug!(candidate = %self.candidates[index].name, codepoint = cp as u32, "matched fallback candidate");
        let (height, ascent) = self.line_extent(&font);
        let id = self.alloc_id();
        self.fonts.insert(id.0, font);
        Some(LoadedFont { id, height, ascent, from_name: false })
    }

    fn release(&mut self, font: FontId) {
        self.fonts.remove(&font.0);
    }
}

fn read_font(path: &Path, pixel_size: f32) -> anyhow::Result<fontdue::Font> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let settings = fontdue::FontSettings { scale: pixel_size, ..Default::default() };
    fontdue::Font::from_bytes(data, settings)
        .map_err(|e| anyhow::anyhow!(e))
        .with_context(|| format!("parsing {}", path.display()))
}

fn is_font_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("ttf") | Some("otf")
    )
}
