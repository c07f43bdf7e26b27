//! Decimal and power-of-two digit generation.

use crate::wide::ulog2;

/// Powers of ten representable in a `u64`.
pub(crate) const POW10: [u64; 20] = pow10_table();

const fn pow10_table() -> [u64; 20] {
    let mut table = [1u64; 20];
    let mut i = 1;
    while i < 20 {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
}

/// Digit pairs `00` through `99`.
static DEC_DIGITS_LUT: [u8; 200] = *b"\
      0001020304050607080910111213141516171819\
      2021222324252627282930313233343536373839\
      4041424344454647484950515253545556575859\
      6061626364656667686970717273747576777879\
      8081828384858687888990919293949596979899";

static LOWER_DIGITS: [u8; 16] = *b"0123456789abcdef";
static UPPER_DIGITS: [u8; 16] = *b"0123456789ABCDEF";

/// Enough room for a `u64` in base 2.
pub(crate) const MAX_DIGITS_LEN: usize = 64;

/// Borrow generated ASCII digits as text.
#[inline]
pub(crate) fn ascii(bytes: &[u8]) -> &str {
    debug_assert!(bytes.is_ascii());
    // SAFETY: callers only pass bytes produced by the digit writers in this
    // module, which are all ASCII.
    unsafe { core::str::from_utf8_unchecked(bytes) }
}

/// Number of decimal digits in `n`, counting `0` as one digit.
#[inline]
pub(crate) fn decimal_len(n: u64) -> u32 {
    // floor(log10(2^k)) + 1 approximated as (k + 1) * 1233 >> 12
    let guess = ((ulog2(n) + 1) * 1233) >> 12;
    (guess + (n >= POW10[guess as usize]) as u32).max(1)
}

/// Write `n` in decimal into the tail of `buf`, returning the used suffix.
pub(crate) fn write_decimal(mut n: u64, buf: &mut [u8; MAX_DIGITS_LEN]) -> &[u8] {
    let mut curr = buf.len();
    let lut = &DEC_DIGITS_LUT;

    while n >= 10_000 {
        let rem = (n % 10_000) as usize;
        n /= 10_000;
        let d1 = (rem / 100) << 1;
        let d2 = (rem % 100) << 1;
        curr -= 4;
        buf[curr..curr + 2].copy_from_slice(&lut[d1..d1 + 2]);
        buf[curr + 2..curr + 4].copy_from_slice(&lut[d2..d2 + 2]);
    }

    let mut n = n as usize;
    if n >= 100 {
        let d1 = (n % 100) << 1;
        n /= 100;
        curr -= 2;
        buf[curr..curr + 2].copy_from_slice(&lut[d1..d1 + 2]);
    }

    if n < 10 {
        curr -= 1;
        buf[curr] = b'0' + n as u8;
    } else {
        let d1 = n << 1;
        curr -= 2;
        buf[curr..curr + 2].copy_from_slice(&lut[d1..d1 + 2]);
    }

    &buf[curr..]
}

/// Write `n` in base `2^shift` (binary, octal or hex) into the tail of `buf`.
pub(crate) fn write_pow2(mut n: u64, shift: u32, upper: bool, buf: &mut [u8; MAX_DIGITS_LEN]) -> &[u8] {
    debug_assert!(matches!(shift, 1 | 3 | 4));
    let table = if upper { &UPPER_DIGITS } else { &LOWER_DIGITS };
    let mask = (1u64 << shift) - 1;
    let mut curr = buf.len();
    loop {
        curr -= 1;
        buf[curr] = table[(n & mask) as usize];
        n >>= shift;
        if n == 0 {
            break;
        }
    }
    &buf[curr..]
}

// TRAILING ZEROS
// --------------

/// Multiplicative inverse of an odd `a` modulo `2^64`, by Newton iteration.
const fn mod_inverse(a: u64) -> u64 {
    // Correct to 3 bits for any odd `a`; every step doubles that.
    let mut x = a;
    let mut i = 0;
    while i < 5 {
        x = x.wrapping_mul(2u64.wrapping_sub(a.wrapping_mul(x)));
        i += 1;
    }
    x
}

const INV5: u64 = mod_inverse(5);
const INV25: u64 = mod_inverse(25);
const INV5P8: u64 = mod_inverse(390_625);

/// `n / 10^k` when `10^k` divides `n`, else `None`.
///
/// An odd divisor `d` divides `m` iff `m * inv(d) mod 2^64` does not exceed
/// `u64::MAX / d`; the power of two is folded in with a rotate so a single
/// comparison covers both factors.
#[inline]
fn divide_exact(n: u64, inv: u64, limit: u64, k: u32) -> Option<u64> {
    let q = n.wrapping_mul(inv).rotate_right(k);
    if q <= limit {
        Some(q)
    } else {
        None
    }
}

/// Strip the trailing decimal zeros of a nonzero `n`.
///
/// Returns the stripped value and the number of zeros removed.
pub(crate) fn remove_trailing_zeros(mut n: u64) -> (u64, u32) {
    debug_assert!(n != 0);
    let mut removed = 0;
    if let Some(q) = divide_exact(n, INV5P8, u64::MAX / 100_000_000, 8) {
        n = q;
        removed += 8;
        if let Some(q) = divide_exact(n, INV5P8, u64::MAX / 100_000_000, 8) {
            n = q;
            removed += 8;
        }
    }
    while let Some(q) = divide_exact(n, INV25, u64::MAX / 100, 2) {
        n = q;
        removed += 2;
    }
    if let Some(q) = divide_exact(n, INV5, u64::MAX / 10, 1) {
        n = q;
        removed += 1;
    }
    (n, removed)
}

// TESTS
// -----

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_inverse_test() {
        assert_eq!(5u64.wrapping_mul(INV5), 1);
        assert_eq!(25u64.wrapping_mul(INV25), 1);
        assert_eq!(390_625u64.wrapping_mul(INV5P8), 1);
    }

    #[test]
    fn decimal_len_test() {
        assert_eq!(decimal_len(0), 1);
        assert_eq!(decimal_len(9), 1);
        assert_eq!(decimal_len(10), 2);
        assert_eq!(decimal_len(99), 2);
        assert_eq!(decimal_len(100), 3);
        for (i, &p) in POW10.iter().enumerate() {
            assert_eq!(decimal_len(p), i as u32 + 1);
            assert_eq!(decimal_len(p - 1), (i as u32).max(1));
        }
        assert_eq!(decimal_len(u64::MAX), 20);
    }

    #[test]
    fn write_decimal_test() {
        let mut buf = [0u8; MAX_DIGITS_LEN];
        assert_eq!(write_decimal(0, &mut buf), b"0");
        assert_eq!(write_decimal(7, &mut buf), b"7");
        assert_eq!(write_decimal(42, &mut buf), b"42");
        assert_eq!(write_decimal(100, &mut buf), b"100");
        assert_eq!(write_decimal(12345, &mut buf), b"12345");
        assert_eq!(write_decimal(u64::MAX, &mut buf), b"18446744073709551615");
        for n in [1u64, 99, 1000, 10001, 999_999, 1 << 40] {
            let mut itoa = itoa::Buffer::new();
            assert_eq!(write_decimal(n, &mut buf), itoa.format(n).as_bytes());
        }
    }

    #[test]
    fn write_pow2_test() {
        let mut buf = [0u8; MAX_DIGITS_LEN];
        assert_eq!(write_pow2(0, 4, false, &mut buf), b"0");
        assert_eq!(write_pow2(255, 4, false, &mut buf), b"ff");
        assert_eq!(write_pow2(255, 4, true, &mut buf), b"FF");
        assert_eq!(write_pow2(8, 3, false, &mut buf), b"10");
        assert_eq!(write_pow2(5, 1, false, &mut buf), b"101");
        assert_eq!(write_pow2(u64::MAX, 1, false, &mut buf).len(), 64);
        assert_eq!(write_pow2(u64::MAX, 3, false, &mut buf), b"1777777777777777777777");
    }

    #[test]
    fn remove_trailing_zeros_test() {
        assert_eq!(remove_trailing_zeros(1), (1, 0));
        assert_eq!(remove_trailing_zeros(10), (1, 1));
        assert_eq!(remove_trailing_zeros(1200), (12, 2));
        assert_eq!(remove_trailing_zeros(123), (123, 0));
        assert_eq!(remove_trailing_zeros(5), (5, 0));
        assert_eq!(remove_trailing_zeros(50), (5, 1));
        assert_eq!(remove_trailing_zeros(250), (25, 1));
        assert_eq!(remove_trailing_zeros(100_000_000), (1, 8));
        assert_eq!(remove_trailing_zeros(10_000_000_000_000_000_000), (1, 19));
        assert_eq!(remove_trailing_zeros(12_300_000_000_000_000), (123, 14));
        assert_eq!(remove_trailing_zeros(123_000_000_000_000_000), (123, 15));
        assert_eq!(remove_trailing_zeros(u64::MAX), (u64::MAX, 0));
    }
}
