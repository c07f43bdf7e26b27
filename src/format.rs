//! Text layout: signs, prefixes, decimal points, exponents and padding.
//!
//! Every value is first described as a prefix (sign and base marker) plus a
//! short list of parts borrowing stack buffers, so the final width is known
//! before anything reaches the sink.

use crate::digits::{self, ascii, decimal_len, remove_trailing_zeros, MAX_DIGITS_LEN};
use crate::dtoa::{self, Decimal};
use crate::num::{Float, Integer};
use crate::sink::Sink;
use crate::state::{Adjust, Base, FloatStyle, FmtState};
use crate::table::PREC_LIMIT;

const MAX_PARTS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Part<'a> {
    Text(&'a str),
    /// A run of `'0'`.
    Zero(usize),
}

impl<'a> Part<'a> {
    /// Width in characters.
    fn len(&self) -> usize {
        match *self {
            Part::Text(s) => s.chars().count(),
            Part::Zero(n) => n,
        }
    }

    fn byte_len(&self) -> usize {
        match *self {
            Part::Text(s) => s.len(),
            Part::Zero(n) => n,
        }
    }

    fn write<S: Sink + ?Sized>(&self, sink: &mut S) {
        match *self {
            Part::Text(s) => sink.append(s),
            Part::Zero(n) => sink.fill('0', n),
        }
    }
}

struct Parts<'a> {
    items: [Part<'a>; MAX_PARTS],
    len: usize,
}

impl<'a> Parts<'a> {
    fn new() -> Self {
        Parts {
            items: [Part::Zero(0); MAX_PARTS],
            len: 0,
        }
    }

    fn push(&mut self, part: Part<'a>) {
        if part.byte_len() == 0 {
            return;
        }
        debug_assert!(self.len < MAX_PARTS);
        self.items[self.len] = part;
        self.len += 1;
    }

    fn as_slice(&self) -> &[Part<'a>] {
        &self.items[..self.len]
    }
}

/// Write `prefix` and `body` padded out to the requested width.
///
/// Zero padding only applies to numbers (`numeric`); everything else pads
/// with the fill character on the side the adjustment names.
fn write_padded<S: Sink + ?Sized>(sink: &mut S, fmt: &FmtState, prefix: &str, body: &[Part], numeric: bool) {
    let len = prefix.chars().count() + body.iter().map(Part::len).sum::<usize>();
    let pad = fmt.get_width().saturating_sub(len);
    let zero_pad = numeric && fmt.is_zero_pad();
    let fill = if zero_pad { '0' } else { fmt.get_fill() };

    let bytes = prefix.len() + body.iter().map(Part::byte_len).sum::<usize>();
    sink.reserve(bytes + pad * fill.len_utf8());

    if pad == 0 {
        sink.append(prefix);
        write_parts(sink, body);
        return;
    }
    match fmt.get_adjust() {
        _ if zero_pad => {
            sink.append(prefix);
            sink.fill('0', pad);
            write_parts(sink, body);
        }
        Adjust::Left => {
            sink.append(prefix);
            write_parts(sink, body);
            sink.fill(fill, pad);
        }
        Adjust::Right => {
            sink.fill(fill, pad);
            sink.append(prefix);
            write_parts(sink, body);
        }
        Adjust::Internal => {
            sink.append(prefix);
            sink.fill(fill, pad);
            write_parts(sink, body);
        }
    }
}

fn write_parts<S: Sink + ?Sized>(sink: &mut S, parts: &[Part]) {
    for part in parts {
        part.write(sink);
    }
}

// INTEGERS
// --------

pub(crate) fn write_integer<T: Integer, S: Sink + ?Sized>(sink: &mut S, value: T, fmt: &FmtState) {
    let upper = fmt.is_uppercase();
    let mut buf = [0u8; MAX_DIGITS_LEN];
    let (prefix, digits) = match fmt.get_base() {
        Base::Decimal => {
            let (negative, magnitude) = value.magnitude();
            (fmt.sign_str(negative), digits::write_decimal(magnitude, &mut buf))
        }
        base => {
            // Signed values show their two's-complement bits, never a sign.
            let bits = value.to_bits();
            let (shift, prefix) = match (base, upper) {
                (Base::Binary, false) => (1, "0b"),
                (Base::Binary, true) => (1, "0B"),
                (Base::Octal, _) => (3, if bits == 0 { "" } else { "0" }),
                (_, false) => (4, "0x"),
                (_, true) => (4, "0X"),
            };
            let prefix = if fmt.is_alternate() { prefix } else { "" };
            (prefix, digits::write_pow2(bits, shift, upper, &mut buf))
        }
    };
    write_padded(sink, fmt, prefix, &[Part::Text(ascii(digits))], true);
}

/// Write an address as alternate-form hex, whatever base `fmt` asks for.
pub(crate) fn write_ptr<S: Sink + ?Sized>(sink: &mut S, addr: usize, fmt: &FmtState) {
    let fmt = fmt.base(Base::Hex).alternate(true);
    write_integer(sink, addr, &fmt);
}

pub(crate) fn write_bool<S: Sink + ?Sized>(sink: &mut S, value: bool, fmt: &FmtState) {
    let text = match (value, fmt.is_uppercase()) {
        (true, false) => "true",
        (true, true) => "TRUE",
        (false, false) => "false",
        (false, true) => "FALSE",
    };
    write_padded(sink, fmt, "", &[Part::Text(text)], false);
}

pub(crate) fn write_char<S: Sink + ?Sized>(sink: &mut S, value: char, fmt: &FmtState) {
    let mut buf = [0u8; 4];
    let text = value.encode_utf8(&mut buf);
    write_padded(sink, fmt, "", &[Part::Text(text)], false);
}

// FLOATS
// ------

/// Decimal exponent of the leading digit.
#[inline]
fn leading_exp(d: &Decimal) -> i64 {
    d.exp as i64 + decimal_len(d.digits) as i64 - 1
}

/// Digits to print and how to lay them out.
struct Plan {
    decimal: Decimal,
    /// Digits after the point; whatever `decimal` lacks is zero.
    frac_len: usize,
    scientific: bool,
}

fn plan<F: Float>(bits: u64, fmt: &FmtState) -> Plan {
    let zero = bits == 0;
    let (m, q) = if zero { (0, 0) } else { F::decode(bits) };
    let alternate = fmt.is_alternate();

    match (fmt.get_style(), fmt.get_precision()) {
        (style, None) => {
            let decimal = if zero {
                Decimal::ZERO
            } else {
                dtoa::shortest::<F>(bits)
            };
            let x = leading_exp(&decimal);
            let scientific = match style {
                FloatStyle::General => x < -4 || x >= F::SHORTEST_DIGITS as i64,
                FloatStyle::Fixed => false,
                FloatStyle::Scientific => true,
            };
            let frac_len = if scientific {
                decimal_len(decimal.digits) as usize - 1
            } else {
                (-decimal.exp).max(0) as usize
            };
            Plan {
                decimal,
                frac_len,
                scientific,
            }
        }
        (FloatStyle::Fixed, Some(p)) => Plan {
            decimal: if zero { Decimal::ZERO } else { dtoa::fixed(m, q, p) },
            frac_len: p as usize,
            scientific: false,
        },
        (FloatStyle::Scientific, Some(p)) => {
            let n = p.saturating_add(1).min(PREC_LIMIT);
            Plan {
                decimal: if zero {
                    Decimal::ZERO
                } else {
                    dtoa::significant(m, q, n)
                },
                frac_len: p as usize,
                scientific: true,
            }
        }
        (FloatStyle::General, Some(p)) => {
            let p = p.max(1);
            let mut decimal = if zero {
                Decimal::ZERO
            } else {
                dtoa::significant(m, q, p.min(PREC_LIMIT))
            };
            let x = leading_exp(&decimal);
            if !alternate && !zero {
                let (digits, removed) = remove_trailing_zeros(decimal.digits);
                decimal = Decimal {
                    digits,
                    exp: decimal.exp + removed as i32,
                };
            }
            let scientific = x < -4 || x >= p as i64;
            let frac_len = match (scientific, alternate) {
                (false, true) => (p as i64 - 1 - x) as usize,
                (false, false) => (-decimal.exp).max(0) as usize,
                (true, true) => p as usize - 1,
                (true, false) => decimal_len(decimal.digits) as usize - 1,
            };
            Plan {
                decimal,
                frac_len,
                scientific,
            }
        }
    }
}

/// `digits * 10^exp` as `ddd.ddd` with exactly `frac_len` fractional digits.
fn fixed_parts<'a>(parts: &mut Parts<'a>, digits: &'a str, exp: i32, frac_len: usize, alternate: bool) {
    let n = digits.len() as i64;
    let point = n + exp as i64;
    debug_assert!(exp >= 0 || frac_len as i64 >= -(exp as i64));
    let dot = if frac_len > 0 || alternate { "." } else { "" };

    if point <= 0 {
        parts.push(Part::Text("0"));
        parts.push(Part::Text(dot));
        parts.push(Part::Zero(point.unsigned_abs() as usize));
        parts.push(Part::Text(digits));
        parts.push(Part::Zero(frac_len - (n - point) as usize));
    } else if point >= n {
        parts.push(Part::Text(digits));
        parts.push(Part::Zero((point - n) as usize));
        parts.push(Part::Text(dot));
        parts.push(Part::Zero(frac_len));
    } else {
        let (int, frac) = digits.split_at(point as usize);
        parts.push(Part::Text(int));
        parts.push(Part::Text(dot));
        parts.push(Part::Text(frac));
        parts.push(Part::Zero(frac_len - frac.len()));
    }
}

/// `digits * 10^exp` as `d.ddde±xx` with `frac_len` digits after the point.
fn scientific_parts<'a>(
    parts: &mut Parts<'a>,
    digits: &'a str,
    exp: i32,
    frac_len: usize,
    fmt: &FmtState,
    exp_buf: &'a mut [u8; MAX_DIGITS_LEN],
) {
    let (lead, rest) = digits.split_at(1);
    let x = exp as i64 + rest.len() as i64;
    parts.push(Part::Text(lead));
    if frac_len > 0 || fmt.is_alternate() {
        parts.push(Part::Text("."));
    }
    parts.push(Part::Text(rest));
    parts.push(Part::Zero(frac_len - rest.len()));

    parts.push(Part::Text(match (fmt.is_uppercase(), x < 0) {
        (false, false) => "e+",
        (false, true) => "e-",
        (true, false) => "E+",
        (true, true) => "E-",
    }));
    let exp_digits = ascii(digits::write_decimal(x.unsigned_abs(), exp_buf));
    parts.push(Part::Zero(2usize.saturating_sub(exp_digits.len())));
    parts.push(Part::Text(exp_digits));
}

pub(crate) fn write_float<F: Float, S: Sink + ?Sized>(sink: &mut S, value: F, fmt: &FmtState) {
    let bits = value.to_bits64();
    let negative = bits & F::SIGN_MASK != 0;
    let bits = bits & !F::SIGN_MASK;

    if F::is_special(bits) {
        let nan = bits != F::INFINITY_BITS;
        let text = match (nan, fmt.is_uppercase()) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        let sign = if nan { "" } else { fmt.sign_str(negative) };
        write_padded(sink, fmt, sign, &[Part::Text(text)], false);
        return;
    }

    let plan = plan::<F>(bits, fmt);
    let mut digit_buf = [0u8; MAX_DIGITS_LEN];
    let mut exp_buf = [0u8; MAX_DIGITS_LEN];
    let digits = ascii(digits::write_decimal(plan.decimal.digits, &mut digit_buf));

    let mut parts = Parts::new();
    if plan.scientific {
        scientific_parts(&mut parts, digits, plan.decimal.exp, plan.frac_len, fmt, &mut exp_buf);
    } else {
        fixed_parts(&mut parts, digits, plan.decimal.exp, plan.frac_len, fmt.is_alternate());
    }
    write_padded(sink, fmt, fmt.sign_str(negative), parts.as_slice(), true);
}

// TESTS
// -----
