//! Fixed-capacity big integer type.
//!
//! These algorithms assume little-endian order for the word array, so for
//! `[0, 1, 2, 3]`, `3` is the most significant word, and `0` is the least
//! significant word. Words at or above `len` are always zero.

use crate::wide::{mul64x32, ulog2};
use core::cmp::Ordering;
use core::fmt::{self, Debug};

/// Largest power of 10 that fits in a `u32` scalar multiplier.
const POW10_STEP: u32 = 1_000_000_000;
const POW10_STEP_EXP: u32 = 9;

/// Bignum wide enough for any exact decimal/binary comparison of an `f64`.
pub(crate) type Big = LargeInt<64>;

/// Unsigned integer of up to `N * 64` bits, stored on the stack.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct LargeInt<const N: usize> {
    /// Number of used words; `words[len - 1] != 0` unless `len == 0`.
    len: usize,
    words: [u64; N],
}

impl<const N: usize> LargeInt<N> {
    pub(crate) const fn zero() -> Self {
        LargeInt {
            len: 0,
            words: [0; N],
        }
    }

    pub(crate) fn from_u64(value: u64) -> Self {
        let mut x = Self::zero();
        if value != 0 {
            x.words[0] = value;
            x.len = 1;
        }
        x
    }

    #[cfg(test)]
    pub(crate) fn is_zero(&self) -> bool {
        self.len == 0
    }

    /// Used words, least significant first.
    #[inline]
    pub(crate) fn words(&self) -> &[u64] {
        &self.words[..self.len]
    }

    /// Word `i`, or zero past the capacity.
    #[inline]
    fn word(&self, i: usize) -> u64 {
        if i < N {
            self.words[i]
        } else {
            0
        }
    }

    /// Drop leading zero words from the used count.
    #[inline]
    fn trim(&mut self) {
        while self.len > 0 && self.words[self.len - 1] == 0 {
            self.len -= 1;
        }
    }

    // ARITHMETIC

    /// Subtract `rhs` in place, which must not exceed `self`.
    pub(crate) fn sub(&mut self, rhs: &Self) -> &mut Self {
        debug_assert!(*self >= *rhs, "sub() underflow");
        let mut borrow = false;
        for i in 0..rhs.len {
            let (d, b1) = self.words[i].overflowing_sub(rhs.words[i]);
            let (d, b2) = d.overflowing_sub(borrow as u64);
            self.words[i] = d;
            borrow = b1 || b2;
        }
        let mut i = rhs.len;
        while borrow && i < N {
            let (d, b) = self.words[i].overflowing_sub(1);
            self.words[i] = d;
            borrow = b;
            i += 1;
        }
        self.trim();
        self
    }

    /// Add `rhs` in place.
    pub(crate) fn add(&mut self, rhs: &Self) -> &mut Self {
        let len = self.len.max(rhs.len);
        let mut carry = false;
        for i in 0..len {
            let (s, c1) = self.words[i].overflowing_add(rhs.words[i]);
            let (s, c2) = s.overflowing_add(carry as u64);
            self.words[i] = s;
            carry = c1 || c2;
        }
        self.len = len;
        if carry {
            debug_assert!(len < N, "add() overflow");
            self.words[len] = 1;
            self.len += 1;
        }
        self
    }

    /// Two's complement negation over the full `N`-word width.
    pub(crate) fn negate(&mut self) -> &mut Self {
        if self.len == 0 {
            return self;
        }
        let mut carry = true;
        for w in self.words.iter_mut() {
            let (s, c) = (!*w).overflowing_add(carry as u64);
            *w = s;
            carry = c;
        }
        self.len = N;
        self.trim();
        self
    }

    /// Multiply by a 32-bit scalar, growing by one word if the carry spills.
    pub(crate) fn mul_small(&mut self, y: u32) -> &mut Self {
        let mut carry = 0u32;
        for w in self.words[..self.len].iter_mut() {
            let (hi, lo) = mul64x32(*w, y, carry);
            *w = (hi << 32) | lo as u64;
            carry = (hi >> 32) as u32;
        }
        if carry != 0 {
            debug_assert!(self.len < N, "mul_small() overflow");
            self.words[self.len] = carry as u64;
            self.len += 1;
        }
        self.trim();
        self
    }

    /// Multiply by `10^n`.
    pub(crate) fn mul_pow10(&mut self, mut n: u32) -> &mut Self {
        while n >= POW10_STEP_EXP {
            self.mul_small(POW10_STEP);
            n -= POW10_STEP_EXP;
        }
        if n > 0 {
            self.mul_small(10u32.pow(n));
        }
        self
    }

    /// Shift left by `n` bits.
    pub(crate) fn shl(&mut self, n: u32) -> &mut Self {
        if self.len == 0 || n == 0 {
            return self;
        }
        let words = (n / 64) as usize;
        let bits = n % 64;
        let len = self.len;
        if bits == 0 {
            debug_assert!(len + words <= N, "shl() overflow");
            for i in (0..len).rev() {
                self.words[i + words] = self.words[i];
            }
            self.len = len + words;
        } else {
            let spill = self.words[len - 1] >> (64 - bits);
            if spill != 0 {
                debug_assert!(len + words < N, "shl() overflow");
                self.words[len + words] = spill;
            }
            for i in (1..len).rev() {
                self.words[i + words] = (self.words[i] << bits) | (self.words[i - 1] >> (64 - bits));
            }
            self.words[words] = self.words[0] << bits;
            self.len = len + words + (spill != 0) as usize;
        }
        for w in self.words[..words].iter_mut() {
            *w = 0;
        }
        self
    }

    /// Shift right by one bit.
    pub(crate) fn shr1(&mut self) -> &mut Self {
        if self.len == 0 {
            return self;
        }
        for i in 1..self.len {
            self.words[i - 1] = (self.words[i - 1] >> 1) | (self.words[i] << 63);
        }
        self.words[self.len - 1] >>= 1;
        if self.words[self.len - 1] == 0 {
            self.len -= 1;
        }
        self
    }

    // RECIPROCAL

    /// Treat `self` as a binary fraction `f` filling all `N` words (so the
    /// value is `1 + f` with the leading one implicit) and compute the
    /// fractional part of `2 / (1 + f)` to `word_limit` words.
    ///
    /// Uses restoring division: `(1 - f) / (1 + f)` is produced one quotient
    /// bit at a time by compare, subtract and halve of the divisor.
    pub(crate) fn invert(&self, word_limit: usize) -> Self {
        debug_assert!(word_limit <= N);
        let mut a = *self;
        a.negate();
        let mut div = *self;
        div.shr1();
        div.words[N - 1] |= 1 << 63;
        div.len = N;

        let mut q = Self::zero();
        for n in (N - word_limit..N).rev() {
            let mut mask = 1u64 << 63;
            while mask != 0 {
                if a >= div {
                    a.sub(&div);
                    q.words[n] |= mask;
                }
                div.shr1();
                mask >>= 1;
            }
        }
        q.len = N;
        q.trim();
        q
    }

    // NORMALIZATION

    /// 64 bits of the value starting at bit position `lo`, which may be
    /// negative (missing low bits read as zero).
    fn bits_at(&self, lo: i64) -> u64 {
        if lo >= 0 {
            let w = (lo / 64) as usize;
            let b = (lo % 64) as u32;
            let low = self.word(w) >> b;
            if b == 0 {
                low
            } else {
                low | (self.word(w + 1) << (64 - b))
            }
        } else if lo > -64 {
            self.word(0) << (-lo) as u32
        } else {
            0
        }
    }

    /// Extract the bits below the leading one, left-aligned in `M` words.
    ///
    /// Returns the fraction `f` and the position `p` of the leading bit so
    /// that `self ≈ (1 + f) * 2^p`. The value must not be zero.
    pub(crate) fn normalized<const M: usize>(&self) -> (LargeInt<M>, u32) {
        debug_assert!(self.len > 0, "normalized() of zero");
        let top = self.len - 1;
        let log2 = ulog2(self.words[top]) + 64 * top as u32;
        let mut norm = LargeInt::<M>::zero();
        for k in 0..M {
            norm.words[M - 1 - k] = self.bits_at(log2 as i64 - 64 * (k as i64 + 1));
        }
        norm.len = M;
        norm.trim();
        (norm, log2)
    }

    /// Top word of a normalized fraction and the upper half of the next one.
    pub(crate) fn top96(&self) -> (u64, u32) {
        debug_assert!(N >= 2);
        (self.words[N - 1], (self.words[N - 2] >> 32) as u32)
    }
}

impl<const N: usize> Ord for LargeInt<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len.cmp(&other.len).then_with(|| {
            self.words[..self.len]
                .iter()
                .rev()
                .cmp(other.words[..other.len].iter().rev())
        })
    }
}

impl<const N: usize> PartialOrd for LargeInt<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Debug for LargeInt<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("LargeInt(0x")?;
        match self.words().split_last() {
            None => f.write_str("0")?,
            Some((top, rest)) => {
                write!(f, "{:x}", top)?;
                for w in rest.iter().rev() {
                    write!(f, "_{:016x}", w)?;
                }
            }
        }
        f.write_str(")")
    }
}

// TESTS
// -----
