//! Binary to decimal: digit generation for floating-point formatting.
//!
//! Every routine works on a positive finite value `m * 2^q` and produces a
//! decimal `digits * 10^exp`. The 96-bit power table drives the common case;
//! when its error bound cannot separate a rounding decision from a tie or an
//! interval boundary, the answer is recomputed exactly with bignums.

use crate::bigint::Big;
use crate::digits::{remove_trailing_zeros, POW10};
use crate::num::Float;
use crate::parse::ERROR_BOUND;
use crate::table::{self, normalize_shift, Pow10, PREC_LIMIT};
use crate::wide::ulog2;
use core::cmp::Ordering;

/// A decimal value `digits * 10^exp`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Decimal {
    pub digits: u64,
    pub exp: i32,
}

impl Decimal {
    pub(crate) const ZERO: Decimal = Decimal { digits: 0, exp: 0 };
}

/// Error allowance for the 64.64 fixed-point boundaries of the shortest
/// search.
const FIXED_ERROR_BOUND: u128 = 1 << 40;

/// Decimal exponent of the leading digit is either this or one more.
#[inline]
fn exp10_estimate(m: u64, q: i32) -> i32 {
    table::exp10_below(ulog2(m) as i32 + q)
}

// FIXED-POINT ROUNDING
// --------------------

enum Rounding {
    Down,
    Up,
    Unsure,
}

/// Split `p * 2^-shift` into its integer part and a rounding direction,
/// given that the exact value lies in `[p, p + err)`.
fn round_shifted(p: u128, shift: u32, err: u128) -> (u128, Rounding) {
    if shift > 128 {
        // The whole product is fraction, below half unless it is within
        // the error of 2^128.
        let near_half = shift == 129 && p > u128::MAX - err;
        return (0, if near_half { Rounding::Unsure } else { Rounding::Down });
    }
    let (int, frac, half) = if shift == 128 {
        (0, p, 1u128 << 127)
    } else {
        (p >> shift, p & ((1u128 << shift) - 1), 1u128 << (shift - 1))
    };
    let rounding = if frac > half {
        Rounding::Up
    } else if frac + err < half {
        Rounding::Down
    } else {
        Rounding::Unsure
    };
    (int, rounding)
}

/// `m * 2^q * 10^k` rounded half to even, computed exactly.
///
/// The quotient must stay below `2^68`.
fn exact_round(m: u64, q: i32, k: i32) -> u128 {
    const QUOTIENT_BITS: u32 = 68;

    let mut num = Big::from_u64(m);
    let mut den = Big::from_u64(1);
    if q >= 0 {
        num.shl(q as u32);
    } else {
        den.shl(q.unsigned_abs());
    }
    if k >= 0 {
        num.mul_pow10(k as u32);
    } else {
        den.mul_pow10(k.unsigned_abs());
    }

    // restoring division, one quotient bit per step
    let mut quotient = 0u128;
    let mut divisor = den;
    divisor.shl(QUOTIENT_BITS - 1);
    for bit in (0..QUOTIENT_BITS).rev() {
        if num >= divisor {
            num.sub(&divisor);
            quotient |= 1 << bit;
        }
        divisor.shr1();
    }
    debug_assert!(num < den);

    num.shl(1);
    match num.cmp(&den) {
        Ordering::Greater => quotient + 1,
        Ordering::Equal => quotient + (quotient & 1),
        Ordering::Less => quotient,
    }
}

/// `m * 2^q * 10^k` rounded half to even; the result must be below `2^67`.
fn scaled_round(m: u64, q: i32, k: i32) -> u128 {
    let coef = table::pow10(k);
    let shift = normalize_shift(m);
    let product = coef.mul_normalized(m << shift);
    let z = q - shift as i32 + coef.exp - 64;
    debug_assert!(z < 0);
    match round_shifted(product, z.unsigned_abs(), ERROR_BOUND) {
        (int, Rounding::Down) => int,
        (int, Rounding::Up) => int + 1,
        (_, Rounding::Unsure) => exact_round(m, q, k),
    }
}

// FIXED PRECISION
// ---------------

/// The value rounded to `n` significant digits, `1 <= n <= 19`.
///
/// `digits` has exactly `n` digits.
pub(crate) fn significant(m: u64, q: i32, n: u32) -> Decimal {
    debug_assert!((1..=PREC_LIMIT).contains(&n));
    let n_us = n as usize;
    let mut exp = exp10_estimate(m, q);
    let mut k = n as i32 - 1 - exp;
    let mut r = scaled_round(m, q, k);
    if r >= POW10[n_us] as u128 {
        // The leading digit sits one place higher.
        exp += 1;
        k -= 1;
        r = scaled_round(m, q, k);
        if r == POW10[n_us] as u128 {
            r = POW10[n_us - 1] as u128;
            exp += 1;
        }
    }
    debug_assert!(r >= POW10[n_us - 1] as u128 && r < POW10[n_us] as u128);
    Decimal {
        digits: r as u64,
        exp: exp - (n as i32 - 1),
    }
}

/// The value rounded to `frac` digits after the decimal point.
///
/// When that asks for more than 19 significant digits the result carries 19
/// and the caller pads with zeros, so `exp` is then above `-frac`.
pub(crate) fn fixed(m: u64, q: i32, frac: u32) -> Decimal {
    let exp = exp10_estimate(m, q);
    let wanted = exp as i64 + 1 + frac as i64;
    if wanted <= -2 {
        // below 0.1 * 10^-frac
        return Decimal {
            digits: 0,
            exp: -(frac as i32),
        };
    }
    if wanted >= PREC_LIMIT as i64 {
        return significant(m, q, PREC_LIMIT);
    }
    Decimal {
        digits: scaled_round(m, q, frac as i32) as u64,
        exp: -(frac as i32),
    }
}

// SHORTEST
// --------

/// `n * 2^q * coef` as 64.64 fixed point; the value must be below `2^64`.
fn scaled_fixed(n: u64, q: i32, coef: &Pow10) -> u128 {
    let shift = normalize_shift(n);
    let product = coef.mul_normalized(n << shift);
    let z = q - shift as i32 + coef.exp;
    debug_assert!((-8..=1).contains(&z));
    if z >= 0 {
        product << z
    } else {
        product >> z.unsigned_abs()
    }
}

/// Whether `x` is certainly inside `[lo, hi)` given that the true bounds
/// lie in `[lo, lo + err)` and `[hi, hi + err)`; `None` when undecided.
#[inline]
fn certainly_inside(x: u128, lo: u128, hi: u128) -> Option<bool> {
    if x >= lo + FIXED_ERROR_BOUND && x < hi {
        Some(true)
    } else if x < lo || x > hi + FIXED_ERROR_BOUND {
        Some(false)
    } else {
        None
    }
}

/// Shortest decimal that reads back as the given finite, nonzero,
/// positive bit pattern. Ties between two shortest candidates go to the
/// even one.
pub(crate) fn shortest<F: Float>(bits: u64) -> Decimal {
    let (m, q) = F::decode(bits);
    let lower_closer = m == F::HIDDEN_BIT_MASK && q > F::DENORMAL_EXPONENT;
    let inclusive = m & 1 == 0;
    match shortest_fast(m, q, lower_closer) {
        Some(decimal) => decimal,
        None if lower_closer => shortest_exact(4 * m, 1, 2, q - 2, inclusive),
        None => shortest_exact(2 * m, 1, 1, q - 1, inclusive),
    }
}

/// Table-driven search: scale the rounding interval so the value has 18 or
/// 19 integer digits and find the coarsest power of ten with a multiple
/// inside it.
fn shortest_fast(m: u64, q: i32, lower_closer: bool) -> Option<Decimal> {
    let k = 17 - exp10_estimate(m, q);
    let coef = table::pow10(k);

    // boundaries in units of 2^(q - 2)
    let w = scaled_fixed(4 * m, q - 2, &coef);
    let hi = scaled_fixed(4 * m + 2, q - 2, &coef);
    let lo = scaled_fixed(if lower_closer { 4 * m - 1 } else { 4 * m - 2 }, q - 2, &coef);

    for r in (0..=18).rev() {
        let unit = (POW10[r] as u128) << 64;
        let first = (lo + unit - 1) / unit * unit;
        if first < lo + FIXED_ERROR_BOUND {
            return None;
        }
        if first > hi + FIXED_ERROR_BOUND {
            continue;
        }
        if first >= hi {
            return None;
        }

        // Some multiple of the unit is inside; take the one nearest the value.
        let below = w / unit * unit;
        let rem = w - below;
        let (near, far) = if rem + FIXED_ERROR_BOUND < unit / 2 {
            (below, below + unit)
        } else if rem > unit / 2 {
            (below + unit, below)
        } else {
            return None;
        };
        let chosen = match certainly_inside(near, lo, hi)? {
            true => near,
            false if certainly_inside(far, lo, hi)? => far,
            false => return None,
        };
        return Some(Decimal {
            digits: ((chosen >> 64) / POW10[r] as u128) as u64,
            exp: r as i32 - k,
        });
    }
    None
}

/// Approximate `ceil(log10(mant * 2^exp))`, low by at most one.
fn estimate_scaling_factor(mant: u64, exp: i32) -> i32 {
    let nbits = 64 - (mant - 1).leading_zeros() as i64;
    (((nbits + exp as i64) * 1292913986) >> 32) as i32
}

/// `(n, rem)` with `n = x / scale` for `x < 16 * scale`.
fn div_rem_upto_16(mut x: Big, scale: &Big, scale2: &Big, scale4: &Big, scale8: &Big) -> (u64, Big) {
    let mut d = 0;
    if x >= *scale8 {
        x.sub(scale8);
        d += 8;
    }
    if x >= *scale4 {
        x.sub(scale4);
        d += 4;
    }
    if x >= *scale2 {
        x.sub(scale2);
        d += 2;
    }
    if x >= *scale {
        x.sub(scale);
        d += 1;
    }
    debug_assert!(x < *scale);
    (d, x)
}

/// Burger and Dybvig's free-format algorithm on bignums.
///
/// The value is `mant * 2^exp`, its neighbours' midpoints are
/// `(mant - minus) * 2^exp` and `(mant + plus) * 2^exp`, and `inclusive`
/// says whether those midpoints themselves read back as the value.
fn shortest_exact(mant: u64, minus: u64, plus: u64, exp: i32, inclusive: bool) -> Decimal {
    // `a < b`, or `a <= b` when the interval is closed
    let below = |a: &Big, b: &Big| match a.cmp(b) {
        Ordering::Less => true,
        Ordering::Equal => inclusive,
        Ordering::Greater => false,
    };

    let mut k = estimate_scaling_factor(mant + plus, exp);

    let mut mant = Big::from_u64(mant);
    let mut minus = Big::from_u64(minus);
    let mut plus = Big::from_u64(plus);
    let mut scale = Big::from_u64(1);
    if exp < 0 {
        scale.shl(exp.unsigned_abs());
    } else {
        mant.shl(exp as u32);
        minus.shl(exp as u32);
        plus.shl(exp as u32);
    }

    if k >= 0 {
        scale.mul_pow10(k as u32);
    } else {
        mant.mul_pow10(k.unsigned_abs());
        minus.mul_pow10(k.unsigned_abs());
        plus.mul_pow10(k.unsigned_abs());
    }

    // now `scale / 10 < mant + plus <= scale * 10`; settle the estimate
    let mut high = mant;
    high.add(&plus);
    if below(&scale, &high) {
        k += 1;
    } else {
        mant.mul_small(10);
        minus.mul_small(10);
        plus.mul_small(10);
    }

    let mut scale2 = scale;
    scale2.shl(1);
    let mut scale4 = scale;
    scale4.shl(2);
    let mut scale8 = scale;
    scale8.shl(3);

    let mut digits = 0u64;
    let mut count = 0;
    let (down, up) = loop {
        let (d, rem) = div_rem_upto_16(mant, &scale, &scale2, &scale4, &scale8);
        mant = rem;
        debug_assert!(d < 10);
        digits = digits * 10 + d;
        count += 1;

        let down = below(&mant, &minus);
        let mut high = mant;
        high.add(&plus);
        let up = below(&scale, &high);
        if down || up {
            break (down, up);
        }

        mant.mul_small(10);
        minus.mul_small(10);
        plus.mul_small(10);
    };

    if up {
        let mut twice = mant;
        twice.shl(1);
        let round_up = !down
            || match twice.cmp(&scale) {
                Ordering::Greater => true,
                Ordering::Equal => digits & 1 == 1,
                Ordering::Less => false,
            };
        digits += round_up as u64;
    }

    let (digits, zeros) = remove_trailing_zeros(digits);
    Decimal {
        digits,
        exp: k - count + zeros as i32,
    }
}

// TESTS
// -----

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(x: f64) -> (u64, i32) {
        f64::decode(x.to_bits())
    }

    fn shortest64(x: f64) -> (u64, i32) {
        let d = shortest::<f64>(x.to_bits());
        (d.digits, d.exp)
    }

    #[test]
    fn exact_round_test() {
        let (m, q) = decode(0.125);
        assert_eq!(exact_round(m, q, 2), 12);
        let (m, q) = decode(0.375);
        assert_eq!(exact_round(m, q, 2), 38);
        let (m, q) = decode(2.5);
        assert_eq!(exact_round(m, q, 0), 2);
        let (m, q) = decode(1e300);
        assert_eq!(exact_round(m, q, -282), 1000000000000000053);
    }

    #[test]
    fn scaled_round_matches_exact() {
        for x in [1.0, 0.1, 2.5, 123.456, 1e-300, 5e-324, 1.7976931348623157e308] {
            let (m, q) = decode(x);
            for n in 1..=19 {
                let d = significant(m, q, n);
                let k = -d.exp;
                assert_eq!(scaled_round(m, q, k), exact_round(m, q, k), "{} {}", x, n);
            }
        }
    }

    #[test]
    fn significant_test() {
        let (m, q) = decode(100.0);
        assert_eq!(significant(m, q, 3), Decimal { digits: 100, exp: 0 });
        let (m, q) = decode(1.0 / 3.0);
        assert_eq!(significant(m, q, 4), Decimal { digits: 3333, exp: -4 });
        let (m, q) = decode(9.9999);
        assert_eq!(significant(m, q, 3), Decimal { digits: 100, exp: -1 });
        let (m, q) = decode(0.1);
        assert_eq!(
            significant(m, q, 19),
            Decimal {
                digits: 1000000000000000056,
                exp: -19
            }
        );
        let (m, q) = decode(5e-324);
        assert_eq!(significant(m, q, 2), Decimal { digits: 49, exp: -325 });
    }

    #[test]
    fn fixed_test() {
        let (m, q) = decode(1.0 / 3.0);
        assert_eq!(fixed(m, q, 4), Decimal { digits: 3333, exp: -4 });
        let (m, q) = decode(0.125);
        assert_eq!(fixed(m, q, 2), Decimal { digits: 12, exp: -2 });
        let (m, q) = decode(0.5);
        assert_eq!(fixed(m, q, 0), Decimal { digits: 0, exp: 0 });
        let (m, q) = decode(1.5);
        assert_eq!(fixed(m, q, 0), Decimal { digits: 2, exp: 0 });
        let (m, q) = decode(0.96);
        assert_eq!(fixed(m, q, 0), Decimal { digits: 1, exp: 0 });
        let (m, q) = decode(1e-10);
        assert_eq!(fixed(m, q, 3), Decimal { digits: 0, exp: -3 });
        let (m, q) = decode(1e22);
        assert_eq!(fixed(m, q, 2).digits, 1000000000000000000);
        assert_eq!(fixed(m, q, 2).exp, 4);
    }

    #[test]
    fn shortest_test() {
        assert_eq!(shortest64(1.0), (1, 0));
        assert_eq!(shortest64(0.1), (1, -1));
        assert_eq!(shortest64(100.0), (1, 2));
        assert_eq!(shortest64(3.14159), (314159, -5));
        assert_eq!(shortest64(1e21), (1, 21));
        assert_eq!(shortest64(1e23), (1, 23));
        assert_eq!(shortest64(5e-324), (5, -324));
        assert_eq!(shortest64(f64::MAX), (17976931348623157, 292));
        assert_eq!(shortest64(f64::MIN_POSITIVE), (22250738585072014, -324));
        assert_eq!(shortest64(0.3), (3, -1));
        assert_eq!(shortest64(2f64.powi(-1022) * 2.0), (4450147717014403, -323));
    }

    #[test]
    fn shortest_tie_test() {
        // 733618578355024.25 sits exactly between two 16-digit candidates.
        assert_eq!(shortest64(733618578355024.2), (7336185783550242, -1));
    }

    #[test]
    fn shortest_exact_agrees_test() {
        let mut state = 0x9E3779B97F4A7C15u64;
        for _ in 0..2000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let bits = state % 0x7FF0000000000000;
            if bits == 0 {
                continue;
            }
            let (m, q) = f64::decode(bits);
            let lower_closer = m == f64::HIDDEN_BIT_MASK && q > f64::DENORMAL_EXPONENT;
            let exact = if lower_closer {
                shortest_exact(4 * m, 1, 2, q - 2, m & 1 == 0)
            } else {
                shortest_exact(2 * m, 1, 1, q - 1, m & 1 == 0)
            };
            assert_eq!(shortest::<f64>(bits), exact, "{:#x}", bits);
        }
    }

    #[test]
    fn shortest_f32_test() {
        let d = shortest::<f32>(0.1f32.to_bits() as u64);
        assert_eq!((d.digits, d.exp), (1, -1));
        let d = shortest::<f32>(f32::MAX.to_bits() as u64);
        assert_eq!((d.digits, d.exp), (34028235, 31));
        let d = shortest::<f32>(1);
        assert_eq!((d.digits, d.exp), (1, -45));
        let d = shortest::<f32>(16777216f32.to_bits() as u64);
        assert_eq!((d.digits, d.exp), (16777216, 0));
    }

    #[test]
    fn estimate_scaling_factor_test() {
        assert_eq!(estimate_scaling_factor(1, 0), 0);
        assert_eq!(estimate_scaling_factor(10, 0), 1);
        assert_eq!(estimate_scaling_factor(101, 0), 2);
        assert_eq!(estimate_scaling_factor(1, -1074), -324);
    }
}
