//! Closed codepoint intervals and their pairwise relation.

use std::fmt;
use std::str::FromStr;

use crate::error::CharsetError;

/// Highest Unicode scalar value a range may reach.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// A closed interval of codepoints, `min..=max`.
///
/// The constructor enforces `min <= max <= MAX_CODEPOINT`, so every value of
/// this type is a valid non-empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharsetRange {
    min: u32,
    max: u32,
}

/// How one range sits relative to another.
///
/// Read every variant as "`self` is ... `other`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Entirely below `other`, possibly adjacent to it.
    Below,
    /// Entirely above `other`, possibly adjacent to it.
    Above,
    /// Same bounds.
    Equal,
    /// Within `other` but not equal to it; one edge may be shared.
    Inside,
    /// Encloses `other` but is not equal to it; one edge may be shared.
    Contains,
    /// Starts below `other` and ends inside it.
    OverlapLower,
    /// Starts inside `other` and ends above it.
    OverlapUpper,
}

impl Relation {
    /// Whether the two ranges share no codepoint.
    pub fn is_disjoint(self) -> bool {
        matches!(self, Relation::Below | Relation::Above)
    }
}

impl CharsetRange {
    /// Create a range, rejecting reversed bounds and codepoints past `MAX_CODEPOINT`.
    pub fn new(min: u32, max: u32) -> Option<Self> {
        (min <= max && max <= MAX_CODEPOINT).then_some(Self { min, max })
    }

    /// A range covering exactly one codepoint.
    pub fn single(codepoint: u32) -> Option<Self> {
        Self::new(codepoint, codepoint)
    }

    /// Like [`CharsetRange::new`] but reporting why the bounds were rejected.
    pub fn try_new(min: u32, max: u32) -> Result<Self, CharsetError> {
        if max > MAX_CODEPOINT {
            return Err(CharsetError::OutOfRange(max));
        }
        if min > max {
            return Err(CharsetError::ReversedRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lowest codepoint in the range.
    pub fn start(&self) -> u32 {
        self.min
    }

    /// Highest codepoint in the range, inclusive.
    pub fn end(&self) -> u32 {
        self.max
    }

    /// Number of codepoints in the range.
    pub fn len(&self) -> u32 {
        self.max - self.min + 1
    }

    /// Always false; a range holds at least one codepoint.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.min <= codepoint && codepoint <= self.max
    }

    /// Classify `self` against `other`.
    pub fn relation(&self, other: &CharsetRange) -> Relation {
        if self.max < other.min {
            Relation::Below
        } else if self.min > other.max {
            Relation::Above
        } else if self == other {
            Relation::Equal
        } else if self.min >= other.min && self.max <= other.max {
            Relation::Inside
        } else if self.min <= other.min && self.max >= other.max {
            Relation::Contains
        } else if self.min < other.min {
            Relation::OverlapLower
        } else {
            Relation::OverlapUpper
        }
    }

    /// The shared codepoints of two ranges, or `None` when they are disjoint.
    pub fn intersect(&self, other: &CharsetRange) -> Option<CharsetRange> {
        match self.relation(other) {
            Relation::Below | Relation::Above => None,
            Relation::Equal | Relation::Inside => Some(*self),
            Relation::Contains => Some(*other),
            Relation::OverlapLower => Some(CharsetRange {
                min: other.min,
                max: self.max,
            }),
            Relation::OverlapUpper => Some(CharsetRange {
                min: self.min,
                max: other.max,
            }),
        }
    }

    /// Remove `other` from `self`.
    ///
    /// Returns the surviving fragment below `other` and the one above it.
    /// Both are `Some` only when `other` sits strictly inside `self`; a
    /// disjoint `other` leaves `self` whole in the first slot.
    pub fn subtract(&self, other: &CharsetRange) -> (Option<CharsetRange>, Option<CharsetRange>) {
        match self.relation(other) {
            Relation::Below | Relation::Above => (Some(*self), None),
            Relation::Equal | Relation::Inside => (None, None),
            Relation::Contains => (self.below(other.min), self.above(other.max)),
            Relation::OverlapLower => (self.below(other.min), None),
            Relation::OverlapUpper => (None, self.above(other.max)),
        }
    }

    /// Whether the ranges are disjoint with no codepoint between them.
    pub fn is_adjacent(&self, other: &CharsetRange) -> bool {
        self.max.checked_add(1) == Some(other.min) || other.max.checked_add(1) == Some(self.min)
    }

    /// Whether the ranges overlap or are adjacent, i.e. can merge into one.
    pub fn touches(&self, other: &CharsetRange) -> bool {
        self.min <= other.max.saturating_add(1) && other.min <= self.max.saturating_add(1)
    }

    /// Smallest range spanning both. Only meaningful when they touch.
    pub(crate) fn span(&self, other: &CharsetRange) -> CharsetRange {
        CharsetRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    fn below(&self, bound: u32) -> Option<CharsetRange> {
        (bound > self.min).then(|| CharsetRange {
            min: self.min,
            max: bound - 1,
        })
    }

    fn above(&self, bound: u32) -> Option<CharsetRange> {
        (bound < self.max).then(|| CharsetRange {
            min: bound + 1,
            max: self.max,
        })
    }
}

/// Cache token form: `"61"` or `"61..7a"`.
impl fmt::Display for CharsetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{:x}", self.min)
        } else {
            write!(f, "{:x}..{:x}", self.min, self.max)
        }
    }
}

/// Accepts the cache form (`"61..7a"`), the fontconfig form (`"61-7a"`) and
/// single codepoints (`"61"`).
impl FromStr for CharsetRange {
    type Err = CharsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let (min, max) = match token.split_once("..").or_else(|| token.split_once('-')) {
            Some((min, max)) => (parse_hex(min, token)?, parse_hex(max, token)?),
            None => {
                let codepoint = parse_hex(token, token)?;
                (codepoint, codepoint)
            }
        };
        Self::try_new(min, max)
    }
}

fn parse_hex(digits: &str, token: &str) -> Result<u32, CharsetError> {
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CharsetError::InvalidToken(token.to_string()));
    }
    u32::from_str_radix(digits, 16).map_err(|_| CharsetError::InvalidToken(token.to_string()))
}
