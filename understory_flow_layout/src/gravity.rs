// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gravity flags and their resolution into per-axis alignment.

/// Reading direction of the host, used to resolve relative gravity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// Resolved alignment along one physical dimension.
///
/// `Start` is the left or top edge, `End` the right or bottom edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Align to the left/top edge.
    #[default]
    Start,
    /// Center within the available room.
    Center,
    /// Align to the right/bottom edge.
    End,
}

impl Align {
    /// Offset of a span of `size` inside a band of `room` pixels.
    #[must_use]
    pub const fn offset(self, room: i32, size: i32) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => (room - size) / 2,
            Self::End => room - size,
        }
    }
}

bitflags::bitflags! {
    /// Placement of lines within the viewport and of items within a line.
    ///
    /// Horizontal and vertical flags are independent. In a vertical flow the
    /// horizontal flags align each line across the viewport and the vertical
    /// flags align items inside the line's thickness; a horizontal flow swaps
    /// the two roles.
    ///
    /// `START` and `END` are relative to the host's [`LayoutDirection`];
    /// `LEFT` and `RIGHT` are absolute.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Gravity: u16 {
        /// Absolute left.
        const LEFT = 1 << 0;
        /// Absolute right.
        const RIGHT = 1 << 1;
        /// Leading edge in reading direction.
        const START = 1 << 2;
        /// Trailing edge in reading direction.
        const END = 1 << 3;
        /// Horizontal center.
        const CENTER_HORIZONTAL = 1 << 4;
        /// Top edge.
        const TOP = 1 << 5;
        /// Bottom edge.
        const BOTTOM = 1 << 6;
        /// Vertical center.
        const CENTER_VERTICAL = 1 << 7;
        /// Center on both axes.
        const CENTER = Self::CENTER_HORIZONTAL.bits() | Self::CENTER_VERTICAL.bits();
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::START | Self::TOP
    }
}

impl Gravity {
    /// Resolves the horizontal flags for the given reading direction.
    ///
    /// Centering wins over edges, and an end edge wins over a start edge.
    #[must_use]
    pub fn horizontal(self, direction: LayoutDirection) -> Align {
        if self.contains(Self::CENTER_HORIZONTAL) {
            return Align::Center;
        }
        if self.contains(Self::RIGHT) {
            return Align::End;
        }
        if self.contains(Self::LEFT) {
            return Align::Start;
        }
        let rtl = direction == LayoutDirection::Rtl;
        if self.contains(Self::END) {
            return if rtl { Align::Start } else { Align::End };
        }
        if self.contains(Self::START) && rtl {
            return Align::End;
        }
        Align::Start
    }

    /// Resolves the vertical flags.
    #[must_use]
    pub fn vertical(self) -> Align {
        if self.contains(Self::CENTER_VERTICAL) {
            Align::Center
        } else if self.contains(Self::BOTTOM) {
            Align::End
        } else {
            Align::Start
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Align, Gravity, LayoutDirection};

    #[test]
    fn relative_flags_follow_reading_direction() {
        assert_eq!(Gravity::START.horizontal(LayoutDirection::Ltr), Align::Start);
        assert_eq!(Gravity::START.horizontal(LayoutDirection::Rtl), Align::End);
        assert_eq!(Gravity::END.horizontal(LayoutDirection::Ltr), Align::End);
        assert_eq!(Gravity::END.horizontal(LayoutDirection::Rtl), Align::Start);
        // Absolute flags ignore direction.
        assert_eq!(Gravity::LEFT.horizontal(LayoutDirection::Rtl), Align::Start);
        assert_eq!(Gravity::RIGHT.horizontal(LayoutDirection::Ltr), Align::End);
    }

    #[test]
    fn center_resolves_on_both_axes() {
        assert_eq!(Gravity::CENTER.horizontal(LayoutDirection::Ltr), Align::Center);
        assert_eq!(Gravity::CENTER.vertical(), Align::Center);
        assert_eq!(Gravity::BOTTOM.vertical(), Align::End);
        assert_eq!(Gravity::default().vertical(), Align::Start);
    }

    #[test]
    fn align_offsets() {
        assert_eq!(Align::Start.offset(100, 40), 0);
        assert_eq!(Align::Center.offset(100, 40), 30);
        assert_eq!(Align::End.offset(100, 40), 60);
    }
}
