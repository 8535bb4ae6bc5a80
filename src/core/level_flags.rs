//! Bit-set over ordered severity enumerations
//!
//! A [`Flags`] value decides whether a message at a given level is emitted
//! at all. The flag type must map its zero value to "no levels selected".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

use super::log_level::LogLevel;

/// A type usable as a flag in a [`Flags`] set.
///
/// Implementors must be fieldless enums with a `u32` representation whose
/// zero value is the "empty" sentinel. Bit positions at or beyond 32 are
/// rejected by a debug assertion.
pub trait FlagValue: Copy {
    /// Bit position of this flag in the underlying `u32`.
    fn bit_index(self) -> u32;
}

impl FlagValue for LogLevel {
    fn bit_index(self) -> u32 {
        self as u32
    }
}

/// Generic bit-set keyed by an ordered enumeration.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags<F: FlagValue> {
    bits: u32,
    #[serde(skip)]
    _flag: PhantomData<F>,
}

/// Flag set over [`LogLevel`].
pub type LogLevelFlags = Flags<LogLevel>;

fn bit_of<F: FlagValue>(flag: F) -> u32 {
    let index = flag.bit_index();
    debug_assert!(index < 32, "flag bit index {} out of range", index);
    1u32 << index
}

impl<F: FlagValue> Flags<F> {
    /// The empty set: no levels selected.
    pub const fn empty() -> Self {
        Self {
            bits: 0,
            _flag: PhantomData,
        }
    }

    /// Construct from a raw bitmask.
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            bits,
            _flag: PhantomData,
        }
    }

    /// Construct from a list of flags (OR of their single-bit masks).
    pub fn from_flags(flags: &[F]) -> Self {
        let mut set = Self::empty();
        for flag in flags {
            set.bits |= bit_of(*flag);
        }
        set
    }

    /// The raw bitmask.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Set or unset a single flag.
    pub fn set(&mut self, flag: F, enable: bool) {
        if enable {
            self.bits |= bit_of(flag);
        } else {
            self.bits &= !bit_of(flag);
        }
    }

    /// Add a single flag.
    pub fn insert(&mut self, flag: F) {
        self.bits |= bit_of(flag);
    }

    /// Remove a single flag.
    pub fn remove(&mut self, flag: F) {
        self.bits &= !bit_of(flag);
    }

    /// Union with another set.
    pub fn update(&mut self, other: Self) {
        self.bits |= other.bits;
    }

    /// Union with a raw bitmask.
    pub fn update_bits(&mut self, bits: u32) {
        self.bits |= bits;
    }

    /// Remove every flag of a raw bitmask.
    pub fn remove_bits(&mut self, bits: u32) {
        self.bits &= !bits;
    }

    /// True if any flag of the raw bitmask is set in `self`.
    pub fn contains_bits(&self, bits: u32) -> bool {
        self.bits & bits != 0
    }

    /// Intersection with another set.
    pub fn intersection(self, other: Self) -> Self {
        Self::from_bits(self.bits & other.bits)
    }

    /// Set difference: the flags in `self` that are not in `other`.
    pub fn difference(self, other: Self) -> Self {
        Self::from_bits(self.bits & !other.bits)
    }

    /// Test a single flag.
    pub fn contains(&self, flag: F) -> bool {
        self.bits & bit_of(flag) != 0
    }

    /// True if any flag of `other` is also set in `self`.
    pub fn intersects(&self, other: Self) -> bool {
        self.bits & other.bits != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Reset to the empty set.
    pub fn reset(&mut self) {
        self.bits = 0;
    }
}

impl LogLevelFlags {
    /// Every loggable severity, sentinel excluded.
    pub fn all_severities() -> Self {
        Self::from_flags(&LogLevel::SEVERITIES)
    }
}

impl<F: FlagValue> Default for Flags<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: FlagValue> Clone for Flags<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: FlagValue> Copy for Flags<F> {}

impl<F: FlagValue> PartialEq for Flags<F> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<F: FlagValue> Eq for Flags<F> {}

impl<F: FlagValue> fmt::Debug for Flags<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flags({:#010b})", self.bits)
    }
}

impl<F: FlagValue> From<F> for Flags<F> {
    fn from(flag: F) -> Self {
        Self::from_bits(bit_of(flag))
    }
}

impl<F: FlagValue> BitOr for Flags<F> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_bits(self.bits | rhs.bits)
    }
}

impl<F: FlagValue> BitOr<F> for Flags<F> {
    type Output = Self;

    fn bitor(self, rhs: F) -> Self {
        Self::from_bits(self.bits | bit_of(rhs))
    }
}

impl<F: FlagValue> BitOrAssign for Flags<F> {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl<F: FlagValue> BitOrAssign<F> for Flags<F> {
    fn bitor_assign(&mut self, rhs: F) {
        self.bits |= bit_of(rhs);
    }
}

impl<F: FlagValue> BitAnd for Flags<F> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl<F: FlagValue> BitAnd<F> for Flags<F> {
    type Output = Self;

    fn bitand(self, rhs: F) -> Self {
        Self::from_bits(self.bits & bit_of(rhs))
    }
}

impl<F: FlagValue> BitAndAssign for Flags<F> {
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl<F: FlagValue> Sub for Flags<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.difference(rhs)
    }
}

impl<F: FlagValue> Sub<F> for Flags<F> {
    type Output = Self;

    fn sub(self, rhs: F) -> Self {
        Self::from_bits(self.bits & !bit_of(rhs))
    }
}

impl<F: FlagValue> SubAssign for Flags<F> {
    fn sub_assign(&mut self, rhs: Self) {
        self.bits &= !rhs.bits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let flags = LogLevelFlags::empty();
        assert!(flags.is_empty());
        assert!(!flags.contains(LogLevel::Info));
        assert_eq!(flags.bits(), 0);
    }

    #[test]
    fn test_from_flags() {
        let flags = LogLevelFlags::from_flags(&[LogLevel::Warn, LogLevel::Error]);
        assert!(flags.contains(LogLevel::Warn));
        assert!(flags.contains(LogLevel::Error));
        assert!(!flags.contains(LogLevel::Info));
    }

    #[test]
    fn test_set_and_unset() {
        let mut flags = LogLevelFlags::empty();
        flags.set(LogLevel::Debug, true);
        assert!(flags.contains(LogLevel::Debug));

        flags.set(LogLevel::Debug, false);
        assert!(!flags.contains(LogLevel::Debug));
        assert!(flags.is_empty());
    }

    #[test]
    fn test_union() {
        let mut flags = LogLevelFlags::from(LogLevel::Info);
        flags.update(LogLevelFlags::from(LogLevel::Error));
        assert!(flags.contains(LogLevel::Info));
        assert!(flags.contains(LogLevel::Error));

        let combined = LogLevelFlags::from(LogLevel::Trace) | LogLevel::Fatal;
        assert!(combined.contains(LogLevel::Trace));
        assert!(combined.contains(LogLevel::Fatal));
    }

    #[test]
    fn test_intersection() {
        let a = LogLevelFlags::from_flags(&[LogLevel::Info, LogLevel::Warn]);
        let b = LogLevelFlags::from_flags(&[LogLevel::Warn, LogLevel::Error]);

        let both = a & b;
        assert!(both.contains(LogLevel::Warn));
        assert!(!both.contains(LogLevel::Info));
        assert!(!both.contains(LogLevel::Error));
    }

    #[test]
    fn test_difference() {
        let a = LogLevelFlags::from_flags(&[LogLevel::Info, LogLevel::Warn]);
        let b = LogLevelFlags::from(LogLevel::Warn);

        let only_a = a - b;
        assert!(only_a.contains(LogLevel::Info));
        assert!(!only_a.contains(LogLevel::Warn));
    }

    #[test]
    fn test_raw_mask_operations() {
        let mut flags = LogLevelFlags::empty();
        let warn_bit = 1u32 << (LogLevel::Warn as u32);

        flags.update_bits(warn_bit);
        assert!(flags.contains(LogLevel::Warn));
        assert!(flags.contains_bits(warn_bit));

        flags.remove_bits(warn_bit);
        assert!(flags.is_empty());
        assert!(!flags.contains_bits(warn_bit));
    }

    #[test]
    fn test_reset() {
        let mut flags = LogLevelFlags::all_severities();
        assert!(!flags.is_empty());

        flags.reset();
        assert!(flags.is_empty());
    }

    #[test]
    fn test_all_severities_excludes_sentinel() {
        let flags = LogLevelFlags::all_severities();
        for level in LogLevel::SEVERITIES {
            assert!(flags.contains(level));
        }
        assert!(!flags.contains(LogLevel::Empty));
    }

    #[test]
    fn test_sentinel_maps_to_bit_zero() {
        // The zero value of the enumeration must mean "no levels selected"
        // when used to build a mask list, so its bit never collides with a
        // real severity.
        assert_eq!(LogLevel::Empty.bit_index(), 0);
        let flags = LogLevelFlags::from_flags(&LogLevel::SEVERITIES);
        assert_eq!(flags.bits() & 1, 0);
    }
}
