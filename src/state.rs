//! Formatting options.

use core::fmt::{self, Debug};

/// Radix used for integer output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Base {
    Binary,
    Octal,
    Decimal,
    Hex,
}

/// When to print a sign in front of a decimal number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Only negative values get a `-`.
    Negative,
    /// Positive values get a `+`.
    Always,
    /// Positive values get a space.
    Space,
}

/// Where padding goes when the output is narrower than the width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Adjust {
    /// Value first, padding after.
    Left,
    /// Padding first, value after.
    Right,
    /// Sign and base prefix first, then padding, then the digits.
    Internal,
}

/// Notation for floating-point output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatStyle {
    /// Fixed or scientific, whichever suits the exponent.
    General,
    /// `ddd.ddd`
    Fixed,
    /// `d.ddde±dd`
    Scientific,
}

/// Options controlling how a value is written.
///
/// Built with chained `const` methods:
///
/// ```
/// use numcvt::{Base, FmtState};
///
/// const HEX: FmtState = FmtState::new().base(Base::Hex).alternate(true).uppercase(true);
/// assert_eq!(numcvt::to_string(&255u32, &HEX), "0XFF");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FmtState {
    base: Base,
    uppercase: bool,
    sign: Sign,
    alternate: bool,
    width: usize,
    fill: char,
    adjust: Adjust,
    zero_pad: bool,
    precision: Option<u32>,
    style: FloatStyle,
}

impl FmtState {
    /// Decimal, lowercase, sign on negatives only, right adjusted with
    /// spaces, no minimum width, shortest floating-point output.
    pub const fn new() -> Self {
        FmtState {
            base: Base::Decimal,
            uppercase: false,
            sign: Sign::Negative,
            alternate: false,
            width: 0,
            fill: ' ',
            adjust: Adjust::Right,
            zero_pad: false,
            precision: None,
            style: FloatStyle::General,
        }
    }

    #[must_use]
    pub const fn base(mut self, base: Base) -> Self {
        self.base = base;
        self
    }

    /// Uppercase hex digits, base prefixes, exponent markers and the
    /// `INF`/`NAN`/`TRUE`/`FALSE` literals.
    #[must_use]
    pub const fn uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    #[must_use]
    pub const fn sign(mut self, sign: Sign) -> Self {
        self.sign = sign;
        self
    }

    /// Prefix hex and binary with `0x`/`0b`, octal with `0`, and always
    /// print a decimal point in floating-point output.
    #[must_use]
    pub const fn alternate(mut self, alternate: bool) -> Self {
        self.alternate = alternate;
        self
    }

    /// Minimum number of characters to write.
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub const fn fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub const fn adjust(mut self, adjust: Adjust) -> Self {
        self.adjust = adjust;
        self
    }

    /// Pad numbers with zeros between the sign and the digits. Takes
    /// precedence over the fill character and adjustment.
    #[must_use]
    pub const fn zero_pad(mut self, zero_pad: bool) -> Self {
        self.zero_pad = zero_pad;
        self
    }

    /// Digits after the point for fixed and scientific floats, significant
    /// digits for general floats. `None` asks for the shortest text that
    /// reads back as the same value. Integers ignore it.
    #[must_use]
    pub const fn precision(mut self, precision: Option<u32>) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: FloatStyle) -> Self {
        self.style = style;
        self
    }

    pub const fn get_base(&self) -> Base {
        self.base
    }

    pub const fn is_uppercase(&self) -> bool {
        self.uppercase
    }

    pub const fn get_sign(&self) -> Sign {
        self.sign
    }

    pub const fn is_alternate(&self) -> bool {
        self.alternate
    }

    pub const fn get_width(&self) -> usize {
        self.width
    }

    pub const fn get_fill(&self) -> char {
        self.fill
    }

    pub const fn get_adjust(&self) -> Adjust {
        self.adjust
    }

    pub const fn is_zero_pad(&self) -> bool {
        self.zero_pad
    }

    pub const fn get_precision(&self) -> Option<u32> {
        self.precision
    }

    pub const fn get_style(&self) -> FloatStyle {
        self.style
    }

    /// Sign text for a value of the given sign under these options.
    pub(crate) fn sign_str(&self, negative: bool) -> &'static str {
        match (negative, self.sign) {
            (true, _) => "-",
            (false, Sign::Negative) => "",
            (false, Sign::Always) => "+",
            (false, Sign::Space) => " ",
        }
    }
}

impl Default for FmtState {
    fn default() -> Self {
        FmtState::new()
    }
}

impl Debug for FmtState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug = f.debug_struct("FmtState");
        debug
            .field("base", &self.base)
            .field("sign", &self.sign)
            .field("style", &self.style);
        if self.uppercase {
            debug.field("uppercase", &true);
        }
        if self.alternate {
            debug.field("alternate", &true);
        }
        if self.width != 0 {
            debug
                .field("width", &self.width)
                .field("fill", &self.fill)
                .field("adjust", &self.adjust);
        }
        if self.zero_pad {
            debug.field("zero_pad", &true);
        }
        if let Some(precision) = self.precision {
            debug.field("precision", &precision);
        }
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_test() {
        let state = FmtState::default();
        assert_eq!(state, FmtState::new());
        assert_eq!(state.get_base(), Base::Decimal);
        assert_eq!(state.get_sign(), Sign::Negative);
        assert_eq!(state.get_adjust(), Adjust::Right);
        assert_eq!(state.get_fill(), ' ');
        assert_eq!(state.get_width(), 0);
        assert_eq!(state.get_precision(), None);
        assert_eq!(state.get_style(), FloatStyle::General);
        assert!(!state.is_uppercase());
        assert!(!state.is_alternate());
        assert!(!state.is_zero_pad());
    }

    #[test]
    fn builder_test() {
        const STATE: FmtState = FmtState::new()
            .base(Base::Octal)
            .width(8)
            .fill('*')
            .adjust(Adjust::Left)
            .precision(Some(3));
        assert_eq!(STATE.get_base(), Base::Octal);
        assert_eq!(STATE.get_width(), 8);
        assert_eq!(STATE.get_fill(), '*');
        assert_eq!(STATE.get_adjust(), Adjust::Left);
        assert_eq!(STATE.get_precision(), Some(3));
    }

    #[test]
    fn sign_str_test() {
        let state = FmtState::new();
        assert_eq!(state.sign_str(false), "");
        assert_eq!(state.sign_str(true), "-");
        assert_eq!(state.sign(Sign::Always).sign_str(false), "+");
        assert_eq!(state.sign(Sign::Space).sign_str(false), " ");
        assert_eq!(state.sign(Sign::Space).sign_str(true), "-");
    }

    #[test]
    fn debug_test() {
        assert_eq!(
            format!("{:?}", FmtState::new()),
            "FmtState { base: Decimal, sign: Negative, style: General }"
        );
        assert_eq!(
            format!("{:?}", FmtState::new().width(4).zero_pad(true)),
            "FmtState { base: Decimal, sign: Negative, style: General, width: 4, fill: ' ', adjust: Right, zero_pad: true }"
        );
    }
}
