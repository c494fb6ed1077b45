//! Resource property bit-set.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Meta-properties of a registered resource.
///
/// Each flag is independently settable; combine them with `|`:
///
/// ```
/// use ocstack_core::Properties;
///
/// let props = Properties::DISCOVERABLE | Properties::OBSERVABLE;
/// assert!(props.contains(Properties::OBSERVABLE));
/// assert!(!props.contains(Properties::SLOW));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Properties(u8);

impl Properties {
    /// Resource is initialized; unset means deleted.
    pub const ACTIVE: Self = Self(1 << 0);
    /// Discovery of this resource is allowed.
    pub const DISCOVERABLE: Self = Self(1 << 1);
    /// Observe is allowed.
    pub const OBSERVABLE: Self = Self(1 << 2);
    /// Expect delay in processing requests.
    pub const SLOW: Self = Self(1 << 3);

    /// No flags set.
    #[must_use]
    pub fn empty() -> Self {
        Self(0)
    }

    /// Construct from raw bits, keeping only known flags.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0f)
    }

    /// The raw bit representation.
    #[must_use]
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Whether every flag in `other` is set.
    #[must_use]
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set the given flags.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the given flags.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Whether no flags are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Properties {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Properties {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::ACTIVE, "ACTIVE"),
            (Self::DISCOVERABLE, "DISCOVERABLE"),
            (Self::OBSERVABLE, "OBSERVABLE"),
            (Self::SLOW, "SLOW"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("(none)")?;
        }
        Ok(())
    }
}
