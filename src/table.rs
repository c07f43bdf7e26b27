//! Power-of-ten coefficients, built once on first use.
//!
//! Entry `n` describes `10^n` as `(1 + (hi * 2^32 + lo) / 2^96) * 2^exp`:
//! the bits below the leading one of the exact value, truncated to 96 bits.
//! Negative powers come from a reciprocal of the positive ones computed to
//! 128 bits before truncation, so every entry underestimates its power by
//! less than one unit in the last of the 96 places.

use crate::bigint::LargeInt;
use crate::wide::{mul64x32, mul64x64, ulog2};
use std::sync::OnceLock;

/// Smallest decimal exponent in the table.
pub(crate) const MIN_EXP10: i32 = -400;
/// Largest decimal exponent in the table.
pub(crate) const MAX_EXP10: i32 = 400;

/// Binary exponents covered by the decimal exponent index.
const MIN_EXP2: i32 = -1100;
const MAX_EXP2: i32 = 1100;

/// Most significant digits ever requested from one table lookup.
pub(crate) const PREC_LIMIT: u32 = 19;

/// Normalized 96-bit coefficient of a power of ten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Pow10 {
    pub hi: u64,
    pub lo: u32,
    pub exp: i32,
}

impl Pow10 {
    const ONE: Pow10 = Pow10 { hi: 0, lo: 0, exp: 0 };

    /// Multiply a mantissa normalized to `[2^62, 2^63)` by the coefficient.
    ///
    /// The result approximates `mn * (1 + f) * 2^64`, lies in `[2^126, 2^128)`
    /// and falls short of the exact product by less than `2^34`.
    #[inline]
    pub(crate) fn mul_normalized(&self, mn: u64) -> u128 {
        debug_assert!(mn >> 62 == 1, "mantissa not normalized");
        let (carry, _) = mul64x32(mn, self.lo, 0);
        ((mn as u128) << 64) + mul64x64(mn, self.hi, carry)
    }
}

/// Shift that moves the top bit of a nonzero `m` to bit 62.
#[inline]
pub(crate) fn normalize_shift(m: u64) -> u32 {
    debug_assert!(m != 0 && m < 1 << 63);
    62 - ulog2(m)
}

struct Tables {
    coef: Box<[Pow10]>,
    /// `exp10_index[b - MIN_EXP2]` is the largest `d` with `10^d < 2^b`.
    exp10_index: Box<[i16]>,
}

impl Tables {
    fn build() -> Tables {
        let len = (MAX_EXP10 - MIN_EXP10 + 1) as usize;
        let zero = (-MIN_EXP10) as usize;
        let mut coef = vec![Pow10::ONE; len];

        // 10^400 needs 21 words.
        let mut big = LargeInt::<24>::from_u64(1);
        for n in 1..=MAX_EXP10 as usize {
            big.mul_small(10);
            let (frac, log2) = big.normalized::<4>();
            let (hi, lo) = frac.top96();
            coef[zero + n] = Pow10 {
                hi,
                lo,
                exp: log2 as i32,
            };
            // 10^-n = 2 / (1 + f) * 2^(-log2 - 1)
            let (hi, lo) = frac.invert(2).top96();
            coef[zero - n] = Pow10 {
                hi,
                lo,
                exp: -(log2 as i32) - 1,
            };
        }

        let exp10_index = (MIN_EXP2..=MAX_EXP2)
            .map(|b| {
                let i = coef.partition_point(|c| c.exp < b);
                (i as i32 + MIN_EXP10 - 1) as i16
            })
            .collect();

        Tables {
            coef: coef.into_boxed_slice(),
            exp10_index,
        }
    }
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(Tables::build)
}

/// Coefficient of `10^n` for `n` in `MIN_EXP10..=MAX_EXP10`.
#[inline]
pub(crate) fn pow10(n: i32) -> Pow10 {
    debug_assert!((MIN_EXP10..=MAX_EXP10).contains(&n));
    tables().coef[(n - MIN_EXP10) as usize]
}

/// Largest `d` with `10^d < 2^b`.
///
/// Any value in `[2^b, 2^(b + 1))` then has a decimal exponent of either
/// `d` or `d + 1`.
#[inline]
pub(crate) fn exp10_below(b: i32) -> i32 {
    debug_assert!((MIN_EXP2..=MAX_EXP2).contains(&b));
    tables().exp10_index[(b - MIN_EXP2) as usize] as i32
}

// TESTS
// -----
