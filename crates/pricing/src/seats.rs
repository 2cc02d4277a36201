use serde::{Deserialize, Serialize};

use quotekit_core::ValueObject;

/// Largest seat count a quote accepts; larger input is clamped.
pub const MAX_SEATS: u32 = 9_999;

/// Number of licensed users for one product, in `0..=MAX_SEATS`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct SeatCount(u32);

impl SeatCount {
    pub const ZERO: SeatCount = SeatCount(0);
    pub const MAX: SeatCount = SeatCount(MAX_SEATS);

    /// Clamp `n` into the accepted range.
    pub fn new(n: u32) -> Self {
        Self(n.min(MAX_SEATS))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl ValueObject for SeatCount {}

impl From<u32> for SeatCount {
    fn from(n: u32) -> Self {
        Self::new(n)
    }
}

impl From<SeatCount> for u32 {
    fn from(seats: SeatCount) -> Self {
        seats.0
    }
}

impl core::fmt::Display for SeatCount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Coerce raw seat-count text into a [`SeatCount`]. Never fails.
///
/// Reads an optional sign and the leading run of digits after any leading
/// whitespace, ignoring whatever follows (`"12 users"` is 12, `"3.7"` is 3).
/// No digits at all gives 0, as does any negative number. Values above
/// [`MAX_SEATS`] clamp to it.
pub fn parse_seat_count(raw: &str) -> SeatCount {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() || negative {
        return SeatCount::ZERO;
    }

    // Only overflow can fail here; anything that long is above the cap.
    digits
        .parse::<u32>()
        .map(SeatCount::new)
        .unwrap_or(SeatCount::MAX)
}
