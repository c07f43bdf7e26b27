//! Text to value: integers, floats, booleans and characters.
//!
//! Parsers take the text after any leading whitespace and return the value
//! together with the number of bytes consumed. Zero consumed means nothing
//! was recognized and the value is meaningless.

use crate::bigint::Big;
use crate::num::{Float, Integer};
use crate::table::{self, normalize_shift, MAX_EXP10, MIN_EXP10};
use crate::wide::ulog2_128;
use core::cmp::Ordering;

/// Significant digits kept in the 64-bit decimal mantissa.
const MANTISSA_DIGITS: u32 = 18;

/// Cap on the magnitude of a parsed exponent; far past any finite result.
const EXPONENT_SATURATION: i64 = 1_000_000_000;

/// Allowance for the table coefficient and product truncation, in units of
/// the 128-bit product.
pub(crate) const ERROR_BOUND: u128 = 1 << 36;

/// Number of leading ASCII whitespace bytes.
pub(crate) fn skip_whitespace(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_whitespace()).count()
}

#[inline]
fn parse_sign(bytes: &[u8]) -> (bool, usize) {
    match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    }
}

#[inline]
fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[inline]
fn starts_with_ignore_case(bytes: &[u8], word: &[u8]) -> bool {
    bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word)
}

// INTEGERS
// --------

/// Parse an optionally signed decimal integer.
///
/// Values that do not fit the target are rejected. A negative value for an
/// unsigned target is accepted when it fits the two's-complement
/// reinterpretation range `-(1 + MAX / 2)..=-1` and wraps, so `-1` parses
/// as `MAX`.
pub(crate) fn parse_integer<T: Integer>(bytes: &[u8]) -> (T, usize) {
    let fail = (T::from_bits(0), 0);
    let (negative, start) = parse_sign(bytes);
    let len = count_digits(&bytes[start..]);
    if len == 0 {
        return fail;
    }

    let mut value = 0u64;
    for &c in &bytes[start..start + len] {
        value = match value
            .checked_mul(10)
            .and_then(|v| v.checked_add((c - b'0') as u64))
        {
            Some(v) => v,
            None => return fail,
        };
    }

    let consumed = start + len;
    if !negative {
        if value > T::MAX {
            return fail;
        }
        return (T::from_bits(value), consumed);
    }

    // MAX + 1 for signed targets is the magnitude of MIN.
    let limit = if T::SIGNED { T::MAX + 1 } else { 1 + T::MAX / 2 };
    if value > limit {
        return fail;
    }
    (T::from_bits(value.wrapping_neg()), consumed)
}

// BOOLEANS AND CHARACTERS
// -----------------------

/// `true`/`false` in any case, or a run of digits that is true when any
/// digit is nonzero.
pub(crate) fn parse_bool(bytes: &[u8]) -> (bool, usize) {
    if starts_with_ignore_case(bytes, b"true") {
        return (true, 4);
    }
    if starts_with_ignore_case(bytes, b"false") {
        return (false, 5);
    }
    let len = count_digits(bytes);
    let value = bytes[..len].iter().any(|&c| c != b'0');
    (value, len)
}

/// The first character of the text.
pub(crate) fn parse_char(text: &str) -> (char, usize) {
    match text.chars().next() {
        Some(c) => (c, c.len_utf8()),
        None => ('\0', 0),
    }
}

// FLOATS
// ------

/// A scanned decimal literal.
///
/// `mantissa * 10^exp10` approximates the value from the first 18
/// significant digits; `truncated` records whether any nonzero digit was
/// dropped past them. The digit slices are kept for the exact comparison.
#[derive(Debug)]
struct Literal<'a> {
    integer: &'a [u8],
    fraction: &'a [u8],
    exponent: i64,
    mantissa: u64,
    exp10: i64,
    truncated: bool,
}

impl<'a> Literal<'a> {
    /// Scan `digits[.digits][e[+-]digits]`, requiring at least one mantissa
    /// digit. An exponent marker without digits is left unconsumed.
    fn scan(bytes: &'a [u8]) -> Option<(Literal<'a>, usize)> {
        let int_len = count_digits(bytes);
        let integer = &bytes[..int_len];
        let mut pos = int_len;

        let mut fraction: &[u8] = &[];
        if bytes.get(pos) == Some(&b'.') {
            let frac_len = count_digits(&bytes[pos + 1..]);
            fraction = &bytes[pos + 1..pos + 1 + frac_len];
            if int_len + frac_len == 0 {
                return None;
            }
            pos += 1 + frac_len;
        } else if int_len == 0 {
            return None;
        }

        let mut exponent = 0i64;
        if let Some(b'e' | b'E') = bytes.get(pos) {
            let (negative, sign_len) = parse_sign(&bytes[pos + 1..]);
            let digits_start = pos + 1 + sign_len;
            let exp_len = count_digits(&bytes[digits_start..]);
            if exp_len > 0 {
                for &c in &bytes[digits_start..digits_start + exp_len] {
                    exponent = (exponent * 10 + (c - b'0') as i64).min(EXPONENT_SATURATION);
                }
                if negative {
                    exponent = -exponent;
                }
                pos = digits_start + exp_len;
            }
        }

        let mut literal = Literal {
            integer,
            fraction,
            exponent,
            mantissa: 0,
            exp10: 0,
            truncated: false,
        };
        literal.accumulate();
        Some((literal, pos))
    }

    fn accumulate(&mut self) {
        let mut mantissa = 0u64;
        let mut count = 0;
        let mut exp10 = 0i64;
        let mut truncated = false;

        for &c in self.integer {
            let digit = (c - b'0') as u64;
            if count < MANTISSA_DIGITS {
                if mantissa != 0 || digit != 0 {
                    mantissa = mantissa * 10 + digit;
                    count += 1;
                }
            } else {
                exp10 += 1;
                truncated |= digit != 0;
            }
        }
        for &c in self.fraction {
            let digit = (c - b'0') as u64;
            if count < MANTISSA_DIGITS {
                if mantissa != 0 || digit != 0 {
                    mantissa = mantissa * 10 + digit;
                    count += 1;
                }
                exp10 -= 1;
            } else {
                truncated |= digit != 0;
            }
        }

        self.mantissa = mantissa;
        self.exp10 = exp10 + self.exponent;
        self.truncated = truncated;
    }

    /// Compare the exact literal value with the halfway point
    /// `(2 * mant + 1) * 2^(q - 1)` above the candidate `mant * 2^q`.
    fn compare_halfway<F: Float>(&self, mant: u64, q: i32) -> Ordering {
        let mut digits = Big::zero();
        let mut used = 0;
        let mut dropped = 0i64;
        let mut sticky = false;

        let mut chunk = 0u64;
        let mut chunk_len = 0;
        let all = self.integer.iter().chain(self.fraction);
        for &c in all.skip_while(|&&c| c == b'0') {
            let digit = (c - b'0') as u64;
            if used < F::MAX_DIGITS {
                chunk = chunk * 10 + digit;
                chunk_len += 1;
                used += 1;
                if chunk_len == 9 {
                    digits.mul_pow10(9).add(&Big::from_u64(chunk));
                    chunk = 0;
                    chunk_len = 0;
                }
            } else {
                dropped += 1;
                sticky |= digit != 0;
            }
        }
        digits.mul_pow10(chunk_len).add(&Big::from_u64(chunk));

        let exp10 = self.exponent - self.fraction.len() as i64 + dropped;
        let mut halfway = Big::from_u64(2 * mant + 1);
        if exp10 >= 0 {
            digits.mul_pow10(exp10 as u32);
        } else {
            halfway.mul_pow10(exp10.unsigned_abs() as u32);
        }
        let exp2 = q - 1;
        if exp2 >= 0 {
            halfway.shl(exp2 as u32);
        } else {
            digits.shl(exp2.unsigned_abs());
        }

        match digits.cmp(&halfway) {
            Ordering::Equal if sticky => Ordering::Greater,
            ord => ord,
        }
    }

    /// Correctly rounded bits of the (positive) literal.
    fn to_bits<F: Float>(&self) -> u64 {
        let m = self.mantissa;
        if m == 0 || self.exp10 < MIN_EXP10 as i64 {
            return 0;
        }
        if self.exp10 > MAX_EXP10 as i64 {
            return F::INFINITY_BITS;
        }

        let coef = table::pow10(self.exp10 as i32);
        let shift = normalize_shift(m);
        let product = coef.mul_normalized(m << shift);
        // value ~ product * 2^x, with the leading bit of product at 2^top
        let x = coef.exp - shift as i32 - 64;
        let top = ulog2_128(product) as i32;
        let exp2 = top + x;
        if exp2 > F::MAX_EXPONENT {
            return F::INFINITY_BITS;
        }

        let err = if self.truncated {
            // 18 digits leave the dropped tail under 2^-56 of the value.
            ERROR_BOUND + (product >> 56)
        } else {
            ERROR_BOUND
        };

        // power of two of the last kept mantissa bit
        let q = (exp2 - F::MANTISSA_SIZE).max(F::DENORMAL_EXPONENT);
        if exp2 < F::DENORMAL_EXPONENT - 1 {
            // Below half the smallest denormal unless the product sits at
            // the very top of its binade.
            if exp2 < F::DENORMAL_EXPONENT - 2 {
                return 0;
            }
            let base = 1u128 << top;
            if product - base + err < base {
                return 0;
            }
            return (self.compare_halfway::<F>(0, q) == Ordering::Greater) as u64;
        }

        let shift_out = (q - x) as u32;
        debug_assert!((1..=128).contains(&shift_out));
        let (mut mant, rem) = if shift_out == 128 {
            (0, product)
        } else {
            (
                (product >> shift_out) as u64,
                product & ((1u128 << shift_out) - 1),
            )
        };
        let half = 1u128 << (shift_out - 1);
        let round_up = if rem > half {
            true
        } else if rem + err < half {
            false
        } else {
            match self.compare_halfway::<F>(mant, q) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => mant & 1 == 1,
            }
        };
        mant += round_up as u64;

        // A carry out of the mantissa bumps the exponent field, up to infinity.
        (((q + F::EXPONENT_BIAS - 1) as u64) << F::MANTISSA_SIZE) + mant
    }
}

/// Parse a decimal floating-point literal, `inf`, `infinity` or `nan`.
pub(crate) fn parse_float<F: Float>(bytes: &[u8]) -> (F, usize) {
    let (negative, start) = parse_sign(bytes);
    let sign = if negative { F::SIGN_MASK } else { 0 };
    let rest = &bytes[start..];

    if starts_with_ignore_case(rest, b"inf") {
        let len = if starts_with_ignore_case(rest, b"infinity") {
            8
        } else {
            3
        };
        return (F::from_bits64(sign | F::INFINITY_BITS), start + len);
    }
    if starts_with_ignore_case(rest, b"nan") {
        let bits = sign | F::INFINITY_BITS | F::QUIET_NAN_MASK;
        return (F::from_bits64(bits), start + 3);
    }

    match Literal::scan(rest) {
        Some((literal, len)) => (F::from_bits64(sign | literal.to_bits::<F>()), start + len),
        None => (F::from_bits64(0), 0),
    }
}

// TESTS
// -----

#[cfg(test)]
mod tests {
    use super::*;

    fn float(text: &str) -> (f64, usize) {
        parse_float::<f64>(text.as_bytes())
    }

    #[test]
    fn integer_test() {
        assert_eq!(parse_integer::<i32>(b"123"), (123, 3));
        assert_eq!(parse_integer::<i32>(b"-123x"), (-123, 4));
        assert_eq!(parse_integer::<i32>(b"+7"), (7, 2));
        assert_eq!(parse_integer::<i32>(b"-").1, 0);
        assert_eq!(parse_integer::<i32>(b"").1, 0);
        assert_eq!(parse_integer::<i32>(b"x1").1, 0);
        assert_eq!(parse_integer::<u64>(b"00042"), (42, 5));
    }

    #[test]
    fn integer_range_test() {
        assert_eq!(parse_integer::<i8>(b"127"), (127, 3));
        assert_eq!(parse_integer::<i8>(b"-128"), (-128, 4));
        assert_eq!(parse_integer::<i8>(b"128").1, 0);
        assert_eq!(parse_integer::<i8>(b"-129").1, 0);
        assert_eq!(parse_integer::<u8>(b"255"), (255, 3));
        assert_eq!(parse_integer::<u8>(b"256").1, 0);
        assert_eq!(parse_integer::<u8>(b"-1"), (255, 2));
        assert_eq!(parse_integer::<u8>(b"-128"), (128, 4));
        assert_eq!(parse_integer::<u8>(b"-129").1, 0);
        assert_eq!(parse_integer::<i64>(b"-9223372036854775808"), (i64::MIN, 20));
        assert_eq!(parse_integer::<u64>(b"18446744073709551615"), (u64::MAX, 20));
        assert_eq!(parse_integer::<u64>(b"18446744073709551616").1, 0);
        assert_eq!(parse_integer::<u64>(b"-9223372036854775808"), (1 << 63, 20));
    }

    #[test]
    fn bool_char_test() {
        assert_eq!(parse_bool(b"true"), (true, 4));
        assert_eq!(parse_bool(b"FALSE!"), (false, 5));
        assert_eq!(parse_bool(b"0010"), (true, 4));
        assert_eq!(parse_bool(b"000"), (false, 3));
        assert_eq!(parse_bool(b"yes").1, 0);
        assert_eq!(parse_char("ab"), ('a', 1));
        assert_eq!(parse_char("é"), ('é', 2));
        assert_eq!(parse_char("").1, 0);
    }

    #[test]
    fn scan_test() {
        let (lit, len) = Literal::scan(b"12.50e3x").unwrap();
        assert_eq!(len, 7);
        assert_eq!((lit.mantissa, lit.exp10, lit.truncated), (1250, 1, false));
        let (lit, len) = Literal::scan(b"0.000120").unwrap();
        assert_eq!(len, 8);
        assert_eq!((lit.mantissa, lit.exp10), (120, -6));
        assert_eq!(Literal::scan(b"5.").unwrap().1, 2);
        assert_eq!(Literal::scan(b".5").unwrap().1, 2);
        assert_eq!(Literal::scan(b"1e").unwrap().1, 1);
        assert_eq!(Literal::scan(b"1e+").unwrap().1, 1);
        assert!(Literal::scan(b".").is_none());
        assert!(Literal::scan(b"e5").is_none());
    }

    #[test]
    fn scan_truncated_test() {
        let (lit, _) = Literal::scan(b"1234567890123456789012").unwrap();
        assert_eq!(lit.mantissa, 123456789012345678);
        assert_eq!(lit.exp10, 4);
        assert!(lit.truncated);
        let (lit, _) = Literal::scan(b"1.00000000000000000000").unwrap();
        assert_eq!((lit.mantissa, lit.exp10), (100000000000000000, -17));
        assert!(!lit.truncated);
        let (lit, _) = Literal::scan(b"1e99999999999999999999").unwrap();
        assert_eq!(lit.exp10, EXPONENT_SATURATION);
    }

    #[test]
    fn float_test() {
        assert_eq!(float("0"), (0.0, 1));
        assert_eq!(float("1"), (1.0, 1));
        assert_eq!(float("-2.5"), (-2.5, 4));
        assert_eq!(float("3.14159"), (3.14159, 7));
        assert_eq!(float("1e10"), (1e10, 4));
        assert_eq!(float("1E-10"), (1e-10, 5));
        assert_eq!(float("0.1"), (0.1, 3));
        assert_eq!(float("123456789012345678901234567890"), (1.2345678901234568e29, 30));
        assert_eq!(float("abc").1, 0);
        assert_eq!(float("").1, 0);
        assert_eq!(float("-").1, 0);
        assert!(float("-0").0.is_sign_negative());
    }

    #[test]
    fn float_limits_test() {
        assert_eq!(float("1.7976931348623157e308").0, f64::MAX);
        assert_eq!(float("1.7976931348623158e308").0, f64::MAX);
        assert_eq!(float("1.7976931348623159e308").0, f64::INFINITY);
        assert_eq!(float("2.2250738585072014e-308").0, f64::MIN_POSITIVE);
        assert_eq!(float("4.9e-324").0, 5e-324);
        assert_eq!(float("2.4703282292062327e-324").0, 0.0);
        assert_eq!(float("2.4703282292062328e-324").0, 5e-324);
        assert_eq!(float("1e-400").0, 0.0);
        assert_eq!(float("1e400").0, f64::INFINITY);
        assert_eq!(float("1e99999999999"), (f64::INFINITY, 13));
        assert_eq!(float("0e99999999999"), (0.0, 13));
    }

    #[test]
    fn float_halfway_test() {
        // 2^53 + 1 is exactly between two doubles and rounds to even.
        assert_eq!(float("9007199254740993").0, 9007199254740992.0);
        // A nonzero digit far past the mantissa breaks the tie upwards.
        assert_eq!(
            float("9007199254740993.0000000000000000000001").0,
            9007199254740994.0
        );
        assert_eq!(float("9007199254740995").0, 9007199254740996.0);
        assert_eq!(float("2.2250738585072011e-308").0, 2.225073858507201e-308);
    }

    #[test]
    fn special_test() {
        assert_eq!(float("inf"), (f64::INFINITY, 3));
        assert_eq!(float("Infinity"), (f64::INFINITY, 8));
        assert_eq!(float("-INF"), (f64::NEG_INFINITY, 4));
        assert_eq!(float("infinit"), (f64::INFINITY, 3));
        let (nan, len) = float("NaN");
        assert!(nan.is_nan());
        assert_eq!(len, 3);
        assert_eq!(nan.to_bits(), 0x7FF8000000000000);
        let (nan, _) = parse_float::<f32>(b"-nan");
        assert!(nan.is_nan() && nan.is_sign_negative());
    }

    #[test]
    fn float32_test() {
        assert_eq!(parse_float::<f32>(b"3.4028235e38").0, f32::MAX);
        // just below the midpoint between f32::MAX and 2^128
        assert_eq!(parse_float::<f32>(b"3.40282356e38").0, f32::MAX);
        assert_eq!(parse_float::<f32>(b"3.4028236e38").0, f32::INFINITY);
        assert_eq!(parse_float::<f32>(b"3.5e38").0, f32::INFINITY);
        assert_eq!(parse_float::<f32>(b"1e-45").0, f32::from_bits(1));
        assert_eq!(parse_float::<f32>(b"0.1").0, 0.1f32);
        assert_eq!(parse_float::<f32>(b"16777217").0, 16777216.0);
        assert_eq!(parse_float::<f32>(b"16777219").0, 16777220.0);
    }

    #[test]
    fn matches_std_test() {
        let mut state = 0x2545F4914F6CDD1Du64;
        let mut buf = String::new();
        for _ in 0..20_000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let digits = state % 10_000_000_000_000_000_000;
            let exp = (state >> 40) as i32 % 340;
            buf.clear();
            buf.push_str(&format!("{}e{}", digits, exp - 20 * (exp & 1)));
            let expected: f64 = buf.parse().unwrap();
            assert_eq!(float(&buf).0.to_bits(), expected.to_bits(), "{}", buf);
        }
    }
}
