//! Bit-layout traits for the scalar types the engine converts.

// INTEGERS
// --------

/// Integer type handled by the generic integer parser and formatter.
///
/// Every conversion goes through `u64`: values are widened to their
/// zero-extended two's-complement bit pattern, or split into sign and
/// magnitude for decimal text.
pub trait Integer: Copy {
    /// Whether the type has a sign bit.
    const SIGNED: bool;
    /// Largest positive value, widened.
    const MAX: u64;

    /// Two's-complement bit pattern, zero-extended to 64 bits.
    fn to_bits(self) -> u64;

    /// Wrap the low `BITS` bits of a pattern into the type.
    fn from_bits(bits: u64) -> Self;

    /// Split into a negative flag and an absolute value.
    fn magnitude(self) -> (bool, u64);
}

macro_rules! unsigned_impl {
    ($($t:ty)*) => ($(
        impl Integer for $t {
            const SIGNED: bool = false;
            const MAX: u64 = <$t>::MAX as u64;

            #[inline]
            fn to_bits(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_bits(bits: u64) -> Self {
                bits as $t
            }

            #[inline]
            fn magnitude(self) -> (bool, u64) {
                (false, self as u64)
            }
        }
    )*)
}

macro_rules! signed_impl {
    ($($t:ty => $u:ty)*) => ($(
        impl Integer for $t {
            const SIGNED: bool = true;
            const MAX: u64 = <$t>::MAX as u64;

            #[inline]
            fn to_bits(self) -> u64 {
                self as $u as u64
            }

            #[inline]
            fn from_bits(bits: u64) -> Self {
                bits as $u as $t
            }

            #[inline]
            fn magnitude(self) -> (bool, u64) {
                (self < 0, self.unsigned_abs() as u64)
            }
        }
    )*)
}

unsigned_impl! { u8 u16 u32 u64 usize }
signed_impl! { i8 => u8 i16 => u16 i32 => u32 i64 => u64 isize => usize }

// FLOATS
// ------

/// IEEE-754 binary layout of a floating-point type.
///
/// Bits travel through the engine widened to `u64` so the decimal
/// conversion code is shared between `f32` and `f64`; only the constants
/// below differ.
pub trait Float: Copy {
    // MASKS

    /// Bitmask for the sign bit.
    const SIGN_MASK: u64;
    /// Bitmask for the exponent, including the hidden bit.
    const EXPONENT_MASK: u64;
    /// Bitmask for the hidden bit in exponent, which is an implicit 1 in the fraction.
    const HIDDEN_BIT_MASK: u64;
    /// Bitmask for the mantissa (fraction), excluding the hidden bit.
    const MANTISSA_MASK: u64;
    /// Mantissa bits of the canonical quiet NaN.
    const QUIET_NAN_MASK: u64;

    // PROPERTIES

    /// Positive infinity as bits.
    const INFINITY_BITS: u64;
    /// Size of the significand (mantissa) without hidden bit.
    const MANTISSA_SIZE: i32;
    /// Bias of the exponent, including the mantissa size so that a biased
    /// exponent `e` scales an integral mantissa by `2^(e - EXPONENT_BIAS)`.
    const EXPONENT_BIAS: i32;
    /// Exponent portion of a denormal float.
    const DENORMAL_EXPONENT: i32;
    /// Largest unbiased exponent of a finite value.
    const MAX_EXPONENT: i32;

    // DECIMAL

    /// Significant digits past which the default layout switches to
    /// scientific notation; also the most digits a shortest round trip needs.
    const SHORTEST_DIGITS: i32;
    /// Maximum number of digits that can contribute to a correctly rounded
    /// parse. Anything past this only matters as a nonzero/zero flag.
    const MAX_DIGITS: usize;

    fn to_bits64(self) -> u64;
    fn from_bits64(bits: u64) -> Self;

    /// Decode a finite, nonzero bit pattern into an integral mantissa with
    /// the hidden bit applied and the power of two it scales by.
    #[inline]
    fn decode(bits: u64) -> (u64, i32) {
        let biased = ((bits & Self::EXPONENT_MASK) >> Self::MANTISSA_SIZE) as i32;
        let fraction = bits & Self::MANTISSA_MASK;
        if biased == 0 {
            (fraction, Self::DENORMAL_EXPONENT)
        } else {
            (fraction | Self::HIDDEN_BIT_MASK, biased - Self::EXPONENT_BIAS)
        }
    }

    /// Returns true if the bits are a NaN or Infinite.
    #[inline]
    fn is_special(bits: u64) -> bool {
        bits & Self::EXPONENT_MASK == Self::EXPONENT_MASK
    }
}

impl Float for f32 {
    const SIGN_MASK: u64 = 0x80000000;
    const EXPONENT_MASK: u64 = 0x7F800000;
    const HIDDEN_BIT_MASK: u64 = 0x00800000;
    const MANTISSA_MASK: u64 = 0x007FFFFF;
    const QUIET_NAN_MASK: u64 = 0x00400000;
    const INFINITY_BITS: u64 = 0x7F800000;
    const MANTISSA_SIZE: i32 = 23;
    const EXPONENT_BIAS: i32 = 127 + Self::MANTISSA_SIZE;
    const DENORMAL_EXPONENT: i32 = 1 - Self::EXPONENT_BIAS;
    const MAX_EXPONENT: i32 = 127;
    const SHORTEST_DIGITS: i32 = 9;
    const MAX_DIGITS: usize = 114;

    #[inline]
    fn to_bits64(self) -> u64 {
        self.to_bits() as u64
    }

    #[inline]
    fn from_bits64(bits: u64) -> f32 {
        f32::from_bits(bits as u32)
    }
}

impl Float for f64 {
    const SIGN_MASK: u64 = 0x8000000000000000;
    const EXPONENT_MASK: u64 = 0x7FF0000000000000;
    const HIDDEN_BIT_MASK: u64 = 0x0010000000000000;
    const MANTISSA_MASK: u64 = 0x000FFFFFFFFFFFFF;
    const QUIET_NAN_MASK: u64 = 0x0008000000000000;
    const INFINITY_BITS: u64 = 0x7FF0000000000000;
    const MANTISSA_SIZE: i32 = 52;
    const EXPONENT_BIAS: i32 = 1023 + Self::MANTISSA_SIZE;
    const DENORMAL_EXPONENT: i32 = 1 - Self::EXPONENT_BIAS;
    const MAX_EXPONENT: i32 = 1023;
    const SHORTEST_DIGITS: i32 = 17;
    const MAX_DIGITS: usize = 769;

    #[inline]
    fn to_bits64(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_bits64(bits: u64) -> f64 {
        f64::from_bits(bits)
    }
}

// TESTS
// -----

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_bits_test() {
        assert_eq!((-1i8).to_bits(), 0xFF);
        assert_eq!((-2i32).to_bits(), 0xFFFFFFFE);
        assert_eq!(i16::from_bits(0xFFFF), -1);
        assert_eq!(u8::from_bits(0x1FF), 0xFF);
        assert_eq!(i64::MIN.magnitude(), (true, 1 << 63));
        assert_eq!(7u16.magnitude(), (false, 7));
        assert_eq!(<i32 as Integer>::MAX, i32::MAX as u64);
        assert_eq!(<u64 as Integer>::MAX, u64::MAX);
    }

    #[test]
    fn float_decode_test() {
        assert_eq!(f64::decode(1f64.to_bits()), (1 << 52, -52));
        assert_eq!(f64::decode(f64::MIN_POSITIVE.to_bits()), (1 << 52, -1074));
        assert_eq!(f64::decode(1), (1, -1074));
        assert_eq!(f32::decode(1f32.to_bits64()), (1 << 23, -23));
        assert_eq!(f32::decode(1), (1, -149));
        assert!(f64::is_special(f64::NAN.to_bits()));
        assert!(f32::is_special(f32::INFINITY.to_bits64()));
        assert!(!f64::is_special(f64::MAX.to_bits()));
    }

    #[test]
    fn float_layout_test() {
        assert_eq!(f64::from_bits64(f64::INFINITY_BITS), f64::INFINITY);
        assert_eq!(f32::from_bits64(f32::INFINITY_BITS), f32::INFINITY);
        assert!(f64::from_bits64(f64::INFINITY_BITS | f64::QUIET_NAN_MASK).is_nan());
        assert_eq!(f64::DENORMAL_EXPONENT, -1074);
        assert_eq!(f32::DENORMAL_EXPONENT, -149);
    }
}
