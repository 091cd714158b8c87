//! Negative-match cache for codepoints no available font covers
//!
//! Looking up "which font covers U+XXXX" through the platform matcher is
//! expensive, and a clock string containing an uncovered codepoint would
//! repeat that lookup on every redraw. This cache remembers verified
//! no-match results in a fixed-size two-probe table. Collisions overwrite
//! silently: a lost entry only costs one extra matcher call later, never an
//! incorrect rendering, so O(1) space wins over perfect memoization.

use crate::constants::NOMATCH_SLOTS;

/// Fixed-capacity open-addressed set of codepoints verified unsupported.
///
/// Each codepoint hashes to two candidate slots via two mixes of a
/// multiplicative hash; insertion favors an empty slot and otherwise
/// overwrites deterministically (favors recency).
pub struct NoMatchCache {
    slots: [u32; NOMATCH_SLOTS],
}

impl Default for NoMatchCache {
    fn default() -> Self {
        Self::new()
    }
}

impl NoMatchCache {
    pub fn new() -> Self {
        NoMatchCache { slots: [0; NOMATCH_SLOTS] }
    }

    /// Two independent probe slots for one codepoint.
    fn probes(cp: u32) -> (usize, usize) {
        let mut h = cp;
        h = ((h >> 16) ^ h).wrapping_mul(0x21F0_AAAD);
        h = ((h >> 15) ^ h).wrapping_mul(0xD35A_2D97);
        let h0 = (((h >> 15) ^ h) as usize) % NOMATCH_SLOTS;
        let h1 = ((h >> 17) as usize) % NOMATCH_SLOTS;
        (h0, h1)
    }

    pub fn contains(&self, cp: char) -> bool {
        let cp = cp as u32;
        let (h0, h1) = Self::probes(cp);
        self.slots[h0] == cp || self.slots[h1] == cp
    }

    /// Record a codepoint as unsupported. Prefers whichever probe slot is
    /// empty; if both are occupied, the first is overwritten.
    pub fn insert(&mut self, cp: char) {
        let cp = cp as u32;
        let (h0, h1) = Self::probes(cp);
        let slot = if self.slots[h0] != 0 { h1 } else { h0 };
        self.slots[slot] = cp;
    }
}
