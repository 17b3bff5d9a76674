use crate::gesture::GestureKind;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{BitOr, BitOrAssign};

/// Set of gesture kinds, one bit per kind code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GestureMask(u32);

impl GestureMask {
    pub const EMPTY: GestureMask = GestureMask(0);

    pub const fn from_bits(bits: u32) -> Self {
        GestureMask(bits)
    }

    pub const fn single(kind: GestureKind) -> Self {
        GestureMask(kind.bit())
    }

    /// Same as `self | other`, usable in constants.
    pub const fn with(self, kind: GestureKind) -> Self {
        GestureMask(self.0 | kind.bit())
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, kind: GestureKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Known kinds in this mask in code order.
    ///
    /// Bits that do not belong to a known kind are skipped.
    pub fn kinds(self) -> impl Iterator<Item = GestureKind> {
        let all: &'static [GestureKind] = &GestureKind::ALL;
        all.iter().copied().filter(move |k| self.contains(*k))
    }
}

impl BitOr for GestureMask {
    type Output = GestureMask;

    fn bitor(self, rhs: GestureMask) -> GestureMask {
        GestureMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for GestureMask {
    fn bitor_assign(&mut self, rhs: GestureMask) {
        self.0 |= rhs.0;
    }
}

impl From<GestureKind> for GestureMask {
    fn from(kind: GestureKind) -> Self {
        GestureMask::single(kind)
    }
}

impl FromIterator<GestureKind> for GestureMask {
    fn from_iter<I: IntoIterator<Item = GestureKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(GestureMask::EMPTY, |mask, kind| mask.with(kind))
    }
}

impl<'a> FromIterator<&'a GestureMask> for GestureMask {
    fn from_iter<I: IntoIterator<Item = &'a GestureMask>>(iter: I) -> Self {
        iter.into_iter()
            .fold(GestureMask::EMPTY, |combined, mask| combined | *mask)
    }
}

impl fmt::Debug for GestureMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.kinds()).finish()
    }
}
