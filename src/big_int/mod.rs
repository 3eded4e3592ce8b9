// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
mod magnitude;
pub mod math_algos;
mod primitve;

pub(crate) use magnitude::Magnitude;
use primitve::{INum, Primitive};

use itertools::{Either, Itertools};
use std::{
    cmp::Ordering,
    fmt::Write,
    ops::{
        Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, RangeInclusive, Rem, RemAssign, Sub,
        SubAssign,
    },
    str::FromStr,
};

/// a sign for a possibly zero magnitude, zero magnitudes ignore it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Sign {
    Negative = -1,
    Positive = 1,
}
impl From<Sign> for SigNum {
    fn from(value: Sign) -> Self {
        match value {
            Sign::Negative => Self::Negative,
            Sign::Positive => Self::Positive,
        }
    }
}
impl From<SigNum> for Sign {
    fn from(value: SigNum) -> Self {
        match value {
            SigNum::Negative => Self::Negative,
            SigNum::Zero | SigNum::Positive => Self::Positive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum SigNum {
    Negative = -1,
    Zero = 0,
    Positive = 1,
}
impl Default for SigNum {
    fn default() -> Self {
        Self::Zero
    }
}
impl From<SigNum> for i8 {
    fn from(value: SigNum) -> Self {
        value.into_i8()
    }
}
impl SigNum {
    const fn into_i8(self) -> i8 {
        self as i8
    }
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::Negative)
    }
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Zero)
    }
    #[must_use]
    pub const fn negate(self) -> Self {
        self.const_mul(Self::Negative)
    }
    #[must_use]
    pub const fn abs(self) -> Self {
        match self {
            Self::Negative | Self::Positive => Self::Positive,
            Self::Zero => Self::Zero,
        }
    }
    #[must_use]
    pub const fn const_mul(self, rhs: Self) -> Self {
        match self.into_i8() * rhs.into_i8() {
            -1 => Self::Negative,
            0 => Self::Zero,
            1 => Self::Positive,
            _ => unreachable!(),
        }
    }
}
impl Neg for SigNum {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
impl Mul for SigNum {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.const_mul(rhs)
    }
}
impl MulAssign for SigNum {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[derive(Clone, Default, Hash, PartialEq, Eq)]
pub struct BigInt {
    /// the sign of the number, `Zero` <=> `magnitude.is_zero()`
    signum: SigNum,
    /// the absolute value in LE order
    magnitude: Magnitude,
}

impl std::fmt::Debug for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Number {{ {} ",
            match self.signum {
                SigNum::Negative => "-",
                SigNum::Zero => "",
                SigNum::Positive => "+",
            }
        )?;
        std::fmt::Debug::fmt(&self.magnitude, f)?;
        write!(f, "}}")
    }
}
impl std::fmt::Display for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // small magnitudes fit an i64 exactly
        let digits = if self.magnitude.len() <= 7 {
            self.to_i64().unsigned_abs().to_string()
        } else {
            let ten = Self::from(10u8);
            let mut buf = String::new();
            let mut q = self.abs();
            while !q.is_zero() {
                let (next_q, r) = q.div_mod(&ten);
                buf.push(char::from(
                    b'0' + r.magnitude.as_slice().first().copied().unwrap_or(0),
                ));
                q = next_q;
            }
            buf.chars().rev().collect()
        };
        f.pad_integral(!self.is_negative(), "", &digits)
    }
}
impl std::fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            if f.alternate() { "0x" } else { "" },
            &self.magnitude_hex(false),
        )
    }
}
impl std::fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            if f.alternate() { "0X" } else { "" },
            &self.magnitude_hex(true),
        )
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        self.signum.cmp(&other.signum).then_with(|| {
            let ord = self.magnitude.cmp(&other.magnitude);
            // a bigger magnitude means a smaller number below zero
            if self.signum.is_negative() {
                ord.reverse()
            } else {
                ord
            }
        })
    }
}

impl<PRIMITIVE: Primitive> From<PRIMITIVE> for BigInt {
    fn from(value: PRIMITIVE) -> Self {
        match value.select_sign() {
            Either::Left(pos) => Self::from_le_bytes(Sign::Positive, pos.to_le_bytes()),
            Either::Right(neg) => Self::from_le_bytes(
                if neg.is_negative() {
                    Sign::Negative
                } else {
                    Sign::Positive
                },
                neg.abs().to_le_bytes(),
            ),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseBigIntError {
    UnknownDigit { digit: char, position: usize },
    Empty,
}
impl std::fmt::Display for ParseBigIntError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDigit { digit, position } => {
                write!(f, "unknown digit {digit:?} at position {position}")
            }
            Self::Empty => write!(f, "no digits given"),
        }
    }
}
impl std::error::Error for ParseBigIntError {}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (Sign::Negative, rest),
            None => (Sign::Positive, s),
        };
        if rest.is_empty() {
            return Err(ParseBigIntError::Empty);
        }
        let offset = s.len() - rest.len();

        let mut magnitude = Magnitude::ZERO;
        for (position, digit) in rest.chars().enumerate() {
            match digit.to_digit(10) {
                Some(d) => {
                    math_algos::mul::assign_digit(&mut magnitude, 10);
                    math_algos::add::assign_digit(&mut magnitude, d as u8);
                }
                None => {
                    return Err(ParseBigIntError::UnknownDigit {
                        digit,
                        position: position + offset,
                    })
                }
            }
        }
        Ok(Self::from_parts(sign.into(), magnitude))
    }
}

impl BigInt {
    pub const ZERO: Self = Self {
        signum: SigNum::Zero,
        magnitude: Magnitude::ZERO,
    };

    /// binds `signum` to `magnitude`, normalizing zero
    fn from_parts(signum: SigNum, magnitude: Magnitude) -> Self {
        if magnitude.is_zero() {
            Self::ZERO
        } else {
            assert!(!signum.is_zero(), "missing sign for {magnitude:?}");
            Self { signum, magnitude }
        }
    }

    /// builds a number from its absolute value in LE order, `sign` is ignored
    /// when the bytes are all zero
    pub fn from_le_bytes(sign: Sign, bytes: impl IntoIterator<Item = u8>) -> Self {
        Self::from_parts(sign.into(), Magnitude::from_le_bytes(bytes))
    }
    /// the absolute value in LE order without leading zeros
    pub fn le_bytes(&self) -> &[u8] {
        self.magnitude.as_slice()
    }

    /// generate a new random number with at least `bytes.start()` and at most `bytes.end()` bytes of information
    /// # Example
    /// `0x00_0100` <= `BigInt::new_random(2..=3, _)` <= `0xff_ffff`,
    pub fn new_random(bytes: RangeInclusive<usize>, mut rng: impl rand::RngCore) -> Self {
        let sign = if rng.next_u32() % 2 == 0 {
            Sign::Positive
        } else {
            Sign::Negative
        };
        let len = bytes.start()
            + crate::util::rng::next_bound(*bytes.end() - *bytes.start(), &mut rng, 10);
        let mut rnd_bytes = crate::util::rng::random_bytes(rng);
        let last = rnd_bytes
            .by_ref()
            .take(5) // cap the number of tries
            .find(|&it| it > 0)
            .expect("only zeros found");
        Self::from_le_bytes(sign, rnd_bytes.take(len - 1).chain(std::iter::once(last)))
    }

    pub const fn signum(&self) -> SigNum {
        self.signum
    }
    pub const fn is_negative(&self) -> bool {
        self.signum.is_negative()
    }
    pub const fn is_positive(&self) -> bool {
        self.signum.is_positive()
    }
    pub const fn is_zero(&self) -> bool {
        self.signum.is_zero()
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self::from_parts(self.signum.abs(), self.magnitude.clone())
    }
    pub fn negate(&mut self) {
        self.signum = self.signum.negate();
    }

    /// the value as an `i64`, wrapping for anything outside its range
    pub fn to_i64(&self) -> i64 {
        let mut buf = [0u8; 8];
        for (slot, byte) in buf.iter_mut().zip(self.magnitude.as_slice()) {
            *slot = *byte;
        }
        let abs = u64::from_le_bytes(buf) as i64;
        if self.is_negative() {
            abs.wrapping_neg()
        } else {
            abs
        }
    }

    /// needs to newly allocate
    /// will return the sign seperatly as this function cannot know which character isn't already used by the encoding, or otherwise not usable.
    #[cfg(feature = "base64")]
    pub fn as_base64(&self, engine: &impl base64::Engine) -> (SigNum, String) {
        (self.signum, engine.encode(self.magnitude.as_slice()))
    }
    #[cfg(feature = "base64")]
    pub fn from_base64(
        signum: SigNum,
        data: impl AsRef<[u8]>,
        engine: &impl base64::Engine,
    ) -> Result<Self, base64::DecodeError> {
        engine.decode(data).map(|bytes| {
            let num = Self::from_le_bytes(Sign::Positive, bytes);
            assert!(
                !signum.is_zero() || num.is_zero(),
                "given signum was zero, but decoded number not"
            );
            num * signum
        })
    }

    /// computes `(self/rhs, self%rhs)`, truncating towards zero
    ///
    /// # Panics
    /// when `rhs` is zero
    pub fn div_mod(&self, rhs: &Self) -> (Self, Self) {
        let (q, r) = math_algos::div::estimate_and_correct(self, rhs);
        debug_assert!(
            r.magnitude < rhs.magnitude,
            "|r| < |d| failed for r: {r}, d: {rhs}"
        );
        debug_assert_eq!(
            *self,
            &(&q * rhs) + &r,
            "n = dq + r failed for n: {self}, d: {rhs}, q: {q}, r: {r}"
        );
        (q, r)
    }
    pub fn checked_div_mod(&self, rhs: &Self) -> Option<(Self, Self)> {
        if rhs.is_zero() {
            None
        } else {
            Some(self.div_mod(rhs))
        }
    }
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        self.checked_div_mod(rhs).map(|it| it.0)
    }
    pub fn checked_rem(&self, rhs: &Self) -> Option<Self> {
        self.checked_div_mod(rhs).map(|it| it.1)
    }

    fn magnitude_hex(&self, upper: bool) -> String {
        if self.is_zero() {
            return "0".to_owned();
        }
        let mut buf = String::with_capacity(self.magnitude.len() * 2);
        for (pos, byte) in self.magnitude.as_slice().iter().rev().with_position() {
            let leading = matches!(
                pos,
                itertools::Position::First | itertools::Position::Only
            );
            match (upper, leading) {
                (false, true) => write!(buf, "{byte:x}"),
                (false, false) => write!(buf, "{byte:02x}"),
                (true, true) => write!(buf, "{byte:X}"),
                (true, false) => write!(buf, "{byte:02X}"),
            }
            .expect("writing to a string can't fail");
        }
        buf
    }

    /// adds the (signed) magnitudes, dispatching on the sign combination
    fn signed_sum(
        lhs_signum: SigNum,
        lhs: &Magnitude,
        rhs_signum: SigNum,
        rhs: &Magnitude,
    ) -> Self {
        if lhs_signum.is_zero() {
            return Self::from_parts(rhs_signum, rhs.clone());
        }
        if rhs_signum.is_zero() {
            return Self::from_parts(lhs_signum, lhs.clone());
        }
        if lhs_signum == rhs_signum {
            let mut magnitude = lhs.clone();
            math_algos::add::assign(&mut magnitude, rhs);
            return Self::from_parts(lhs_signum, magnitude);
        }
        // differing signs, the bigger magnitude decides the sign
        match lhs.cmp(rhs) {
            Ordering::Equal => Self::ZERO,
            Ordering::Greater => {
                let mut magnitude = lhs.clone();
                math_algos::sub::assign_smaller(&mut magnitude, rhs);
                Self::from_parts(lhs_signum, magnitude)
            }
            Ordering::Less => {
                let mut magnitude = rhs.clone();
                math_algos::sub::assign_smaller(&mut magnitude, lhs);
                Self::from_parts(rhs_signum, magnitude)
            }
        }
    }

    fn add_ref(&self, rhs: &Self) -> Self {
        Self::signed_sum(self.signum, &self.magnitude, rhs.signum, &rhs.magnitude)
    }
    fn sub_ref(&self, rhs: &Self) -> Self {
        Self::signed_sum(
            self.signum,
            &self.magnitude,
            rhs.signum.negate(),
            &rhs.magnitude,
        )
    }
    fn mul_ref(&self, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        Self::from_parts(
            self.signum.const_mul(rhs.signum),
            math_algos::mul::schoolbook(&self.magnitude, &rhs.magnitude),
        )
    }
    fn div_ref(&self, rhs: &Self) -> Self {
        self.div_mod(rhs).0
    }
    fn rem_ref(&self, rhs: &Self) -> Self {
        self.div_mod(rhs).1
    }
}

macro_rules! implBigMath {
    ($($assign_trait:tt)::*, $assign_func:ident, $($trait:tt)::*, $func:ident, $ref_func:ident) => {
        impl $($trait)::*<Self> for BigInt {
            type Output = Self;
            fn $func(self, rhs: Self) -> Self {
                Self::$ref_func(&self, &rhs)
            }
        }
        impl $($trait)::*<&Self> for BigInt {
            type Output = Self;
            fn $func(self, rhs: &Self) -> Self {
                Self::$ref_func(&self, rhs)
            }
        }
        impl $($trait)::*<BigInt> for &BigInt {
            type Output = BigInt;
            fn $func(self, rhs: BigInt) -> BigInt {
                BigInt::$ref_func(self, &rhs)
            }
        }
        impl $($trait)::*<Self> for &BigInt {
            type Output = BigInt;
            fn $func(self, rhs: Self) -> BigInt {
                BigInt::$ref_func(self, rhs)
            }
        }
        impl $($assign_trait)::*<BigInt> for BigInt {
            fn $assign_func(&mut self, rhs: Self) {
                *self = Self::$ref_func(self, &rhs);
            }
        }
        impl $($assign_trait)::*<&Self> for BigInt {
            fn $assign_func(&mut self, rhs: &Self) {
                *self = Self::$ref_func(self, rhs);
            }
        }
    };
}

// no `std::ops::Not`, cause implied zeros to the left would need to be flipped
impl Neg for BigInt {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}
impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}
impl Mul<SigNum> for BigInt {
    type Output = Self;

    fn mul(mut self, rhs: SigNum) -> Self::Output {
        self *= rhs;
        self
    }
}
impl MulAssign<SigNum> for BigInt {
    fn mul_assign(&mut self, rhs: SigNum) {
        if rhs.is_zero() {
            *self = Self::ZERO;
        } else {
            self.signum = self.signum.const_mul(rhs);
        }
    }
}
implBigMath!(AddAssign, add_assign, Add, add, add_ref);
implBigMath!(SubAssign, sub_assign, Sub, sub, sub_ref);
implBigMath!(MulAssign, mul_assign, Mul, mul, mul_ref);
implBigMath!(DivAssign, div_assign, Div, div, div_ref);
implBigMath!(RemAssign, rem_assign, Rem, rem, rem_ref);
