//! Double-width products and integer base-2 logarithms.
//!
//! The conversion engine works with 64-bit decimal mantissas multiplied by
//! 96-bit power-of-ten coefficients, so everything here is about producing
//! full products without losing the high half.

// PRODUCTS
// --------

/// Full product `x * y + bias` of a 64-bit and a 32-bit operand.
///
/// Returns the upper 64 bits and the lower 32 bits of the 96-bit result.
#[inline]
pub(crate) fn mul64x32(x: u64, y: u32, bias: u32) -> (u64, u32) {
    let p = x as u128 * y as u128 + bias as u128;
    ((p >> 32) as u64, p as u32)
}

/// Full product `x * y + bias` of two 64-bit operands.
///
/// Cannot overflow: `(2^64 - 1)^2 + 2^64 - 1 < 2^128`.
#[inline]
pub(crate) fn mul64x64(x: u64, y: u64, bias: u64) -> u128 {
    x as u128 * y as u128 + bias as u128
}

/// Split a 128-bit value into its upper and lower 64-bit halves.
#[inline]
pub(crate) fn split128(x: u128) -> (u64, u64) {
    ((x >> 64) as u64, x as u64)
}

// LOG2
// ----

/// Number of the highest set bit for every byte value; `0` maps to `0`.
#[cfg(any(test, not(fast_bitscan)))]
static ULOG2_TABLE: [u8; 256] = ulog2_table();

#[cfg(any(test, not(fast_bitscan)))]
const fn ulog2_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut n = 1;
    while n < 256 {
        let mut byte = n >> 1;
        while byte != 0 {
            table[n] += 1;
            byte >>= 1;
        }
        n += 1;
    }
    table
}

/// Table-driven `floor(log2(x))` for targets without a bit-scan instruction.
///
/// `ulog2_by_table32(0) == 0`, the same as the hardware path after `x | 1`.
#[cfg(any(test, not(fast_bitscan)))]
#[inline]
pub(crate) fn ulog2_by_table32(mut x: u32) -> u32 {
    let mut bias = 0;
    if x >= 1 << 16 {
        x >>= 16;
        bias += 16;
    }
    if x >= 1 << 8 {
        x >>= 8;
        bias += 8;
    }
    bias + ULOG2_TABLE[x as usize] as u32
}

#[cfg(any(test, not(fast_bitscan)))]
#[inline]
pub(crate) fn ulog2_by_table64(x: u64) -> u32 {
    if x >= 1 << 32 {
        32 + ulog2_by_table32((x >> 32) as u32)
    } else {
        ulog2_by_table32(x as u32)
    }
}

/// Index of the highest set bit of `x`, with `ulog2(0) == 0`.
#[cfg(fast_bitscan)]
#[inline]
pub(crate) fn ulog2(x: u64) -> u32 {
    (x | 1).leading_zeros() ^ 63
}

#[cfg(not(fast_bitscan))]
#[inline]
pub(crate) fn ulog2(x: u64) -> u32 {
    ulog2_by_table64(x)
}

/// Index of the highest set bit of a 128-bit value, with `ulog2_128(0) == 0`.
#[inline]
pub(crate) fn ulog2_128(x: u128) -> u32 {
    let (hi, lo) = split128(x);
    if hi != 0 {
        64 + ulog2(hi)
    } else {
        ulog2(lo)
    }
}

// TESTS
// -----
