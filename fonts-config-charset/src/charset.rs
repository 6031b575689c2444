//! The canonical range set and its algebra.

use std::fmt;
use std::str::FromStr;

use crate::error::CharsetError;
use crate::range::{CharsetRange, Relation};

/// The set of codepoints a font can render, stored as coalesced ranges.
///
/// Invariant: ranges are sorted ascending, pairwise disjoint and never
/// adjacent. The field is private and every constructor and operation
/// restores the invariant before returning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Charset {
    ranges: Vec<CharsetRange>,
}

impl Charset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a charset from ranges in any order, overlapping or not.
    pub fn from_ranges(ranges: impl IntoIterator<Item = CharsetRange>) -> Self {
        Self {
            ranges: coalesce(ranges.into_iter().collect()),
        }
    }

    /// Build a charset from individual codepoints. Invalid codepoints are dropped.
    pub fn from_codepoints(codepoints: impl IntoIterator<Item = u32>) -> Self {
        Self::from_ranges(codepoints.into_iter().filter_map(CharsetRange::single))
    }

    pub fn ranges(&self) -> &[CharsetRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CharsetRange> {
        self.ranges.iter()
    }

    /// Every codepoint in ascending order.
    pub fn codepoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|r| r.start()..=r.end())
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn codepoint_count(&self) -> u64 {
        self.ranges.iter().map(|r| u64::from(r.len())).sum()
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        let idx = self.ranges.partition_point(|r| r.end() < codepoint);
        self.ranges.get(idx).is_some_and(|r| r.contains(codepoint))
    }

    /// Whether the ranges are sorted, disjoint and non-adjacent.
    pub fn is_canonical(&self) -> bool {
        self.ranges
            .windows(2)
            .all(|pair| pair[0].end().saturating_add(1) < pair[1].start())
    }

    /// Insert a range, merging it with every range it overlaps or is adjacent to.
    ///
    /// Appending a range that is already covered leaves the set unchanged.
    pub fn append(&mut self, range: CharsetRange) {
        let start = self
            .ranges
            .partition_point(|r| r.end().saturating_add(1) < range.start());
        let mut end = start;
        let mut merged = range;
        while let Some(next) = self.ranges.get(end) {
            if !next.touches(&merged) {
                break;
            }
            merged = merged.span(next);
            end += 1;
        }
        self.ranges.splice(start..end, std::iter::once(merged));
    }

    /// Codepoints present in both sets.
    pub fn intersect(&self, other: &Charset) -> Charset {
        let mut found = Vec::new();
        for range in &self.ranges {
            let first = other.ranges.partition_point(|o| o.end() < range.start());
            for candidate in &other.ranges[first..] {
                match range.relation(candidate) {
                    Relation::Below => break,
                    Relation::Above => continue,
                    _ => found.extend(range.intersect(candidate)),
                }
            }
        }
        Charset::from_ranges(found)
    }

    /// Codepoints present in either set.
    ///
    /// Only the part of `self` missing from `other` is folded into a copy of
    /// `other`, then a final coalesce pass joins ranges the fold made adjacent.
    pub fn union(&self, other: &Charset) -> Charset {
        let mut folded = other.clone();
        for fragment in self.substract(other).ranges {
            folded.append(fragment);
        }
        Charset::from_ranges(folded.ranges)
    }

    /// Codepoints of `self` that are not in `other`.
    pub fn substract(&self, other: &Charset) -> Charset {
        let mut survivors = Vec::with_capacity(self.ranges.len());
        for range in &self.ranges {
            subtract_sorted(*range, &other.ranges, &mut survivors);
        }
        Charset::from_ranges(survivors)
    }

    /// Split into the codepoints below `threshold` and those at or above it.
    pub fn split_at(&self, threshold: u32) -> (Charset, Charset) {
        let mut below = Vec::new();
        let mut above = Vec::new();
        for range in &self.ranges {
            if range.end() < threshold {
                below.push(*range);
            } else if range.start() >= threshold {
                above.push(*range);
            } else {
                below.extend(CharsetRange::new(range.start(), threshold - 1));
                above.extend(CharsetRange::new(threshold, range.end()));
            }
        }
        (Charset { ranges: below }, Charset { ranges: above })
    }

    /// Token form used by the inventory cache.
    pub fn to_tokens(&self) -> Vec<String> {
        self.ranges.iter().map(ToString::to_string).collect()
    }
}

/// Subtract every range of the canonical slice `subtrahends` from `range`,
/// pushing the surviving fragments in ascending order.
///
/// The pivot splits `range` into a fragment below it, which only the
/// subtrahends before the pivot can touch, and one above it, which only the
/// subtrahends after it can touch. Recursion depth is therefore logarithmic in
/// the subtrahend count.
fn subtract_sorted(range: CharsetRange, subtrahends: &[CharsetRange], out: &mut Vec<CharsetRange>) {
    if subtrahends.is_empty() {
        out.push(range);
        return;
    }
    let mid = subtrahends.len() / 2;
    let pivot = &subtrahends[mid];
    match range.relation(pivot) {
        Relation::Below => subtract_sorted(range, &subtrahends[..mid], out),
        Relation::Above => subtract_sorted(range, &subtrahends[mid + 1..], out),
        _ => {
            let (lower, upper) = range.subtract(pivot);
            if let Some(lower) = lower {
                subtract_sorted(lower, &subtrahends[..mid], out);
            }
            if let Some(upper) = upper {
                subtract_sorted(upper, &subtrahends[mid + 1..], out);
            }
        }
    }
}

/// Sort and merge overlapping or adjacent ranges.
fn coalesce(mut ranges: Vec<CharsetRange>) -> Vec<CharsetRange> {
    ranges.sort_unstable();
    let mut out: Vec<CharsetRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match out.last_mut() {
            Some(last) if last.touches(&range) => *last = last.span(&range),
            _ => out.push(range),
        }
    }
    out
}

impl FromIterator<CharsetRange> for Charset {
    fn from_iter<I: IntoIterator<Item = CharsetRange>>(iter: I) -> Self {
        Charset::from_ranges(iter)
    }
}

impl<'a> IntoIterator for &'a Charset {
    type Item = &'a CharsetRange;
    type IntoIter = std::slice::Iter<'a, CharsetRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Space separated cache tokens, e.g. `20..7e a0 1f600..1f64f`.
impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for range in &self.ranges {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{range}")?;
            first = false;
        }
        Ok(())
    }
}

/// Strict inverse of `Display`: any malformed token is an error.
impl FromStr for Charset {
    type Err = CharsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(str::parse::<CharsetRange>)
            .collect::<Result<Vec<_>, _>>()
            .map(Charset::from_ranges)
    }
}
