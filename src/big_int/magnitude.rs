// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
use itertools::Itertools;

/// the absolute value of a number as base 256 digits in LE order
#[derive(Clone, Default, Hash, PartialEq, Eq)]
pub(crate) struct Magnitude {
    /// the most significant byte is never zero, zero <=> `bytes.is_empty()`
    pub(super) bytes: Vec<u8>,
}

impl std::fmt::Debug for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x[")?;
        for (pos, byte) in self.bytes.iter().rev().with_position() {
            write!(f, "{byte:02x}")?;
            if matches!(
                pos,
                itertools::Position::First | itertools::Position::Middle
            ) {
                f.write_str(", ")?;
            }
        }
        write!(f, "]")
    }
}

impl PartialOrd for Magnitude {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Magnitude {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bytes
            .len()
            .cmp(&other.bytes.len())
            .then_with(|| self.bytes.iter().rev().cmp(other.bytes.iter().rev()))
    }
}

impl Magnitude {
    pub const ZERO: Self = Self { bytes: Vec::new() };

    pub fn from_le_bytes(bytes: impl IntoIterator<Item = u8>) -> Self {
        let mut out = Self {
            bytes: bytes.into_iter().collect(),
        };
        out.truncate_leading_zeros();
        out
    }

    pub fn truncate_leading_zeros(&mut self) {
        while self.bytes.last().is_some_and(|&it| it == 0) {
            self.bytes.pop();
        }
    }

    pub fn is_zero(&self) -> bool {
        self.bytes.is_empty()
    }
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
    pub fn as_slice(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// the two most significant digits as one 16 bit number
    ///
    /// a missing high digit reads as zero
    pub fn msd2(&self) -> u16 {
        match self.bytes.as_slice() {
            [] => 0,
            [single] => u16::from(*single),
            [.., second, top] => (u16::from(*top) << 8) | u16::from(*second),
        }
    }

    /// the four most significant digits as one 32 bit number
    ///
    /// missing high digits read as zero
    pub fn msd4(&self) -> u32 {
        self.bytes
            .iter()
            .rev()
            .take(4)
            .fold(0, |acc, &byte| (acc << 8) | u32::from(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_to_canonical_form() {
        assert_eq!(
            Magnitude::from_le_bytes([0x12, 0x34, 0, 0]).bytes,
            vec![0x12, 0x34]
        );
        assert_eq!(Magnitude::from_le_bytes([0, 0, 0]).bytes, Vec::<u8>::new());
        assert!(Magnitude::from_le_bytes([]).is_zero());
        // an inner zero is significant
        assert_eq!(
            Magnitude::from_le_bytes([0, 0, 1]).bytes,
            vec![0, 0, 1]
        );
    }

    #[test]
    fn orders_by_length_then_bytes() {
        let small = Magnitude::from_le_bytes([0xff, 0xff]);
        let big = Magnitude::from_le_bytes([0, 0, 1]);
        assert!(small < big);
        assert!(Magnitude::ZERO < small);
        assert!(
            Magnitude::from_le_bytes([1, 0x80]) < Magnitude::from_le_bytes([0, 0x81])
        );
        assert_eq!(
            Magnitude::from_le_bytes([5, 9]),
            Magnitude::from_le_bytes([5, 9, 0])
        );
    }

    #[test]
    fn msd2_pads_missing_high_digit() {
        assert_eq!(Magnitude::ZERO.msd2(), 0);
        assert_eq!(Magnitude::from_le_bytes([0x2a]).msd2(), 0x2a);
        assert_eq!(Magnitude::from_le_bytes([0x34, 0x12]).msd2(), 0x1234);
        assert_eq!(
            Magnitude::from_le_bytes([0xff, 0x34, 0x12]).msd2(),
            0x1234
        );
    }

    #[test]
    fn msd4_takes_up_to_four_digits() {
        assert_eq!(Magnitude::ZERO.msd4(), 0);
        assert_eq!(Magnitude::from_le_bytes([0x2a]).msd4(), 0x2a);
        assert_eq!(
            Magnitude::from_le_bytes([0x78, 0x56, 0x34, 0x12]).msd4(),
            0x1234_5678
        );
        assert_eq!(
            Magnitude::from_le_bytes([0xff, 0x78, 0x56, 0x34, 0x12]).msd4(),
            0x1234_5678
        );
    }

    #[test]
    fn debug_prints_be_hex() {
        assert_eq!(
            format!("{:?}", Magnitude::from_le_bytes([0x0b, 0x0a])),
            "0x[0a, 0b]"
        );
        assert_eq!(format!("{:?}", Magnitude::ZERO), "0x[]");
    }
}
