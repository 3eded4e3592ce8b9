#![allow(clippy::wildcard_imports)]
use super::*;
use itertools::Itertools;

fn carring_add(lhs: u8, rhs: u8, carry: bool) -> (u8, bool) {
    let (res, carry_a) = lhs.overflowing_add(rhs);
    let (res, carry_b) = res.overflowing_add(u8::from(carry));
    (res, carry_a | carry_b)
}
fn carring_sub(lhs: u8, rhs: u8, carry: bool) -> (u8, bool) {
    let (res, carry_a) = lhs.overflowing_sub(rhs);
    let (res, carry_b) = res.overflowing_sub(u8::from(carry));
    (res, carry_a | carry_b)
}

pub mod add {
    use super::*;

    /// calculates `lhs` += `rhs`
    /// prefers lhs to be the longer number
    pub fn assign(lhs: &mut Magnitude, rhs: &Magnitude) {
        let orig_lhs_len = lhs.bytes.len();
        lhs.bytes.extend(rhs.bytes.iter().skip(orig_lhs_len));

        let mut carry = false;
        for elem in lhs
            .bytes
            .iter_mut()
            .zip_longest(rhs.bytes.iter().take(orig_lhs_len))
        {
            use itertools::EitherOrBoth as E;
            let (lhs_byte, rhs_byte) = match elem {
                E::Right(_rhs) => unreachable!("lhs was extendet"),
                E::Left(_byte) if !carry => {
                    break;
                }
                E::Left(byte) => (byte, 0),
                E::Both(byte, rhs) => (byte, *rhs),
            };
            (*lhs_byte, carry) = carring_add(*lhs_byte, rhs_byte, carry);
        }
        if carry {
            lhs.bytes.push(1);
        }
        lhs.truncate_leading_zeros();
    }

    /// calculates `lhs` += `rhs` for a single digit
    pub fn assign_digit(lhs: &mut Magnitude, rhs: u8) {
        let mut carry = rhs;
        for byte in &mut lhs.bytes {
            if carry == 0 {
                return;
            }
            let sum = u16::from(*byte) + u16::from(carry);
            *byte = sum as u8;
            carry = (sum >> 8) as u8;
        }
        if carry > 0 {
            lhs.bytes.push(carry);
        }
    }
}

pub mod sub {
    use super::*;

    /// calculates `lhs` -= `rhs`, lhs needs to be the bigger number
    pub fn assign_smaller(lhs: &mut Magnitude, rhs: &Magnitude) {
        assert!(*lhs >= *rhs, "lhs is smaller than rhs");

        let mut carry = false;
        for elem in lhs.bytes.iter_mut().zip_longest(rhs.bytes.iter()) {
            use itertools::EitherOrBoth as E;
            let (lhs_byte, rhs_byte) = match elem {
                E::Right(_rhs) => unreachable!("lhs is always bigger"),
                E::Left(_byte) if !carry => {
                    break;
                }
                E::Left(byte) => (byte, 0),
                E::Both(byte, rhs) => (byte, *rhs),
            };
            (*lhs_byte, carry) = carring_sub(*lhs_byte, rhs_byte, carry);
        }
        assert!(!carry, "borrow left over after subtraction");
        lhs.truncate_leading_zeros();
    }
}

pub mod mul {
    use super::*;

    /// schoolbook multiplication, one partial row per rhs digit
    pub fn schoolbook(lhs: &Magnitude, rhs: &Magnitude) -> Magnitude {
        // try to minimize outer loops
        if lhs.bytes.len() < rhs.bytes.len() {
            return schoolbook(rhs, lhs);
        }
        let mut out = Magnitude::ZERO;
        for (i, multiplier) in rhs.bytes.iter().copied().enumerate() {
            let mut row = vec![0u8; lhs.bytes.len() + i + 1];
            for (j, byte) in lhs.bytes.iter().copied().enumerate() {
                let p =
                    u16::from(multiplier) * u16::from(byte) + u16::from(row[i + j]);
                row[i + j] = p as u8;
                row[i + j + 1] = (p >> 8) as u8;
            }
            add::assign(&mut out, &Magnitude::from_le_bytes(row));
        }
        out
    }

    /// calculates `lhs` *= `rhs` for a single digit
    pub fn assign_digit(lhs: &mut Magnitude, rhs: u8) {
        let mut carry = 0u8;
        for byte in &mut lhs.bytes {
            let p = u16::from(*byte) * u16::from(rhs) + u16::from(carry);
            *byte = p as u8;
            carry = (p >> 8) as u8;
        }
        if carry > 0 {
            lhs.bytes.push(carry);
        }
        lhs.truncate_leading_zeros();
    }
}

pub mod div {
    use super::*;

    /// computes `(lhs/rhs, lhs%rhs)`, truncating towards zero so the
    /// remainder keeps the sign of `lhs`
    ///
    /// refines a quotient guess from a four digit estimate of the running
    /// remainder over the divisor's top two digits until the correction
    /// term reaches zero
    pub fn estimate_and_correct(lhs: &BigInt, rhs: &BigInt) -> (BigInt, BigInt) {
        assert!(!rhs.is_zero(), "can't divide by zero");
        if rhs.magnitude > lhs.magnitude {
            return (BigInt::ZERO, lhs.clone());
        }

        // two divisor digits bound the estimate's relative error by ~1/256
        let msd2 = u32::from(rhs.magnitude.msd2());
        let shamt = (rhs.magnitude.len() as isize - 2).max(0);

        let mut q = BigInt::ZERO;
        let mut r = lhs.clone();
        let mut steps = 0usize;
        loop {
            let rsh = (r.magnitude.len() as isize - 4).max(0);
            let dq = shifted_estimate(
                r.magnitude.msd4() / msd2,
                rsh - shamt,
                r.signum().const_mul(rhs.signum()),
            );
            if dq.is_zero() {
                // |r| < |rhs| here, so at most one step of rhs is left
                if !r.is_zero() && r.signum() != lhs.signum() {
                    q += BigInt::from(i8::from(r.signum().const_mul(rhs.signum())));
                    r = lhs - &(rhs * &q);
                }
                return (q, r);
            }
            q += &dq;
            r = lhs - &(rhs * &q);

            steps += 1;
            assert!(
                steps <= 64 * (lhs.magnitude.len() + 2),
                "quotient refinement failed to converge for {lhs:?} / {rhs:?}"
            );
        }
    }

    /// places the bytes of `est` at byte offset `shift`
    ///
    /// a negative offset drops that many low bytes of the estimate
    fn shifted_estimate(est: u32, shift: isize, signum: SigNum) -> BigInt {
        let le = est.to_le_bytes();
        let bytes = match usize::try_from(shift) {
            Ok(shift) => {
                let mut bytes = vec![0; shift];
                bytes.extend(le);
                bytes
            }
            Err(_) => match usize::try_from(-shift) {
                Ok(dropped) if dropped < le.len() => le[dropped..].to_vec(),
                _ => Vec::new(),
            },
        };
        BigInt::from_parts(signum, Magnitude::from_le_bytes(bytes))
    }
}
