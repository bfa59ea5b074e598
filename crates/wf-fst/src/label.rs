//! Transition labels.
//!
//! Every arc carries a closed interval `[min, max]` of byte or codepoint values packed into a
//! single [`Label`]. A scalar label is the interval where `min == max`.

use std::fmt;

/// Packed arc label (or scalar query label).
pub type Label = i64;

/// The epsilon label: an arc that consumes no input.
pub const EPSILON: Label = 0;

/// Reserved "no label" value. Unpacks to `[u32::MAX, u32::MAX]`, which no byte or codepoint
/// reaches.
pub const NO_LABEL: Label = -1;

/// Largest Unicode scalar value.
pub const MAX_CODEPOINT: u32 = 0x10_FFFF;

/// Packs an interval into a label: `min` in the high half, `max` in the low half.
pub const fn pack(min: u32, max: u32) -> Label {
    (((min as u64) << 32) | max as u64) as Label
}

/// Splits a packed label back into `(min, max)`.
pub const fn unpack(label: Label) -> (u32, u32) {
    let bits = label as u64;
    ((bits >> 32) as u32, bits as u32)
}

/// Converts a scalar query label into the packed arc label of the single-value interval.
///
/// Negative values (`NO_LABEL`) and values beyond `u32` are returned unchanged.
pub fn scalar_label(label: Label) -> Label {
    match u32::try_from(label) {
        Ok(value) => pack(value, value),
        Err(_) => label,
    }
}

/// A closed interval of byte or codepoint values.
///
/// Orders by `min`, then `max`, which is also the order of the packed representation for every
/// interval whose `min` fits in 31 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntervalLabel {
    /// Lower bound (inclusive).
    pub min: u32,
    /// Upper bound (inclusive).
    pub max: u32,
}

impl IntervalLabel {
    /// Creates the interval `[min, max]`.
    pub fn new(min: u32, max: u32) -> Self {
        debug_assert!(min <= max, "interval [{min}, {max}] is inverted");
        Self { min, max }
    }

    /// Creates the single-value interval `[value, value]`.
    pub const fn scalar(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Returns the packed label.
    pub const fn pack(self) -> Label {
        pack(self.min, self.max)
    }

    /// Unpacks a label.
    pub const fn unpack(label: Label) -> Self {
        let (min, max) = unpack(label);
        Self { min, max }
    }

    /// Whether this interval holds exactly one value.
    pub const fn is_scalar(self) -> bool {
        self.min == self.max
    }

    /// Whether a scalar query label falls inside the interval.
    pub fn contains(self, label: Label) -> bool {
        Label::from(self.min) <= label && label <= Label::from(self.max)
    }

    /// Whether two intervals share at least one value.
    pub fn overlaps(self, other: Self) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl From<Label> for IntervalLabel {
    fn from(label: Label) -> Self {
        Self::unpack(label)
    }
}

impl From<IntervalLabel> for Label {
    fn from(range: IntervalLabel) -> Self {
        range.pack()
    }
}

impl fmt::Display for IntervalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scalar() {
            write!(f, "{:#x}", self.min)
        } else {
            write!(f, "{:#x}-{:#x}", self.min, self.max)
        }
    }
}

/// Formats a packed arc label for diagnostics.
pub fn display_label(label: Label) -> String {
    match label {
        EPSILON => "<eps>".to_string(),
        NO_LABEL => "<none>".to_string(),
        _ => IntervalLabel::unpack(label).to_string(),
    }
}
