//! Confidentiality levels.
//!
//! Levels are ordered from public (`LEVEL0`) to most restricted (`LEVEL3`).
//! Callers pass a maximum level when sifting; fields declared above it are
//! left out. [`Level::UNRESTRICTED`] sits above every declarable level, so it
//! never excludes a field.

use std::fmt;

/// A confidentiality level, or the unrestricted sentinel.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(u8);

impl Level {
    /// Public data.
    pub const LEVEL0: Self = Self(0);
    /// Confidential.
    pub const LEVEL1: Self = Self(1);
    /// Highly confidential.
    pub const LEVEL2: Self = Self(2);
    /// Top secret.
    pub const LEVEL3: Self = Self(3);
    /// Highest level a field can declare.
    pub const MAX: Self = Self::LEVEL3;
    /// Requested-level sentinel that admits every field.
    ///
    /// Ignore and omit-on-empty rules still apply.
    pub const UNRESTRICTED: Self = Self(u8::MAX);

    /// Returns the declarable level with the given number, if it is in `0..=3`.
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Returns the numeric value (`u8::MAX` for [`Level::UNRESTRICTED`]).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_unrestricted(self) -> bool {
        self.0 == Self::UNRESTRICTED.0
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unrestricted() {
            f.write_str("unrestricted")
        } else {
            write!(f, "level{}", self.0)
        }
    }
}
