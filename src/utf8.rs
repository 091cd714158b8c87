//! Incremental UTF-8 codepoint decoding with explicit error reporting
//!
//! The layout engine needs more than `str::chars()` gives it: when a byte
//! sequence is malformed it must know exactly how many bytes to skip so that
//! one placeholder glyph is substituted per broken sequence and decoding
//! resumes on the next byte that could start a valid one.

/// Substitute for any codepoint that cannot be decoded or rendered.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Expected sequence length keyed by the top five bits of the lead byte.
/// Zero marks a lead byte that can never start a sequence (a continuation
/// byte or a 5/6-byte form).
const LEN_BY_HIGH_BITS: [u8; 32] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 0xxxx
    0, 0, 0, 0, 0, 0, 0, 0, // 10xxx (continuation)
    2, 2, 2, 2, // 110xx
    3, 3, // 1110x
    4, // 11110
    0, // 11111
];

/// Payload mask for the lead byte of a 1..4 byte sequence.
const LEAD_MASK: [u8; 4] = [0x7F, 0x1F, 0x0F, 0x07];

/// Smallest scalar value that legitimately needs a 1..4 byte encoding.
/// Anything below the threshold for its length is an overlong encoding.
const OVERLONG_MIN: [u32; 4] = [0x0, 0x80, 0x800, 0x1_0000];

/// One decoded codepoint.
///
/// `len` is the number of source bytes consumed and is always at least 1,
/// even for malformed input, so callers advancing by `len` make forward
/// progress. On `valid == false`, `cp` is [`REPLACEMENT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub cp: char,
    pub len: usize,
    pub valid: bool,
}

impl Decoded {
    fn invalid(len: usize) -> Self {
        Decoded { cp: REPLACEMENT, len: len.max(1), valid: false }
    }
}

/// Decode one codepoint from the front of `bytes`.
///
/// Malformed sequences consume only the bytes examined before the first
/// offending byte: a corrupt continuation byte at position `i` consumes `i`
/// bytes, while a lead byte that cannot start a sequence consumes one.
/// Surrogates, values above U+10FFFF and overlong encodings are rejected
/// after assembly and consume the full sequence length.
pub fn decode(bytes: &[u8]) -> Decoded {
    let Some(&lead) = bytes.first() else {
        return Decoded::invalid(1);
    };

    let len = LEN_BY_HIGH_BITS[(lead >> 3) as usize] as usize;
    if len == 0 {
        return Decoded::invalid(1);
    }

    let mut cp = u32::from(lead & LEAD_MASK[len - 1]);
    for i in 1..len {
        match bytes.get(i) {
            Some(&b) if b != 0 && b & 0xC0 == 0x80 => {
                cp = (cp << 6) | u32::from(b & 0x3F);
            }
            // Sequence ends early: consume only the bytes examined so far.
            _ => return Decoded::invalid(i),
        }
    }

    // Surrogates encode as 0xD800..=0xDFFF, i.e. cp >> 11 == 0x1B.
    if cp > 0x10_FFFF || (cp >> 11) == 0x1B || cp < OVERLONG_MIN[len - 1] {
        return Decoded::invalid(len);
    }

    match char::from_u32(cp) {
        Some(c) => Decoded { cp: c, len, valid: true },
        None => Decoded::invalid(len),
    }
}
