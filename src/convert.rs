//! Entry points: one `parse`/`format` pair per scalar type.

use crate::error::{Error, ErrorCode, Result};
use crate::format;
use crate::parse;
use crate::sink::Sink;
use crate::state::FmtState;

/// A scalar that can be read from and written to text.
pub trait Convert: Sized {
    /// Read a value from the start of `text`, after any ASCII whitespace.
    ///
    /// Returns the value and the number of bytes consumed, whitespace
    /// included. Zero consumed means no value was found; the returned value
    /// is then meaningless.
    fn parse(text: &str) -> (Self, usize);

    /// Write the value to `sink` as `fmt` describes.
    fn format<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &FmtState);
}

/// Run `parse` on the text after leading whitespace, counting the
/// whitespace only when something was recognized.
#[inline]
fn after_whitespace<T>(text: &str, parse: impl FnOnce(&str) -> (T, usize)) -> (T, usize) {
    let skip = parse::skip_whitespace(text.as_bytes());
    match parse(&text[skip..]) {
        (value, 0) => (value, 0),
        (value, len) => (value, skip + len),
    }
}

macro_rules! integer_impl {
    ($($t:ty)*) => ($(
        impl Convert for $t {
            #[inline]
            fn parse(text: &str) -> (Self, usize) {
                after_whitespace(text, |s| parse::parse_integer(s.as_bytes()))
            }

            #[inline]
            fn format<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &FmtState) {
                format::write_integer(sink, *self, fmt);
            }
        }
    )*)
}

integer_impl! { i8 i16 i32 i64 isize u8 u16 u32 u64 usize }

macro_rules! float_impl {
    ($($t:ty)*) => ($(
        impl Convert for $t {
            #[inline]
            fn parse(text: &str) -> (Self, usize) {
                after_whitespace(text, |s| parse::parse_float(s.as_bytes()))
            }

            #[inline]
            fn format<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &FmtState) {
                format::write_float(sink, *self, fmt);
            }
        }
    )*)
}

float_impl! { f32 f64 }

impl Convert for bool {
    #[inline]
    fn parse(text: &str) -> (Self, usize) {
        after_whitespace(text, |s| parse::parse_bool(s.as_bytes()))
    }

    #[inline]
    fn format<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &FmtState) {
        format::write_bool(sink, *self, fmt);
    }
}

impl Convert for char {
    #[inline]
    fn parse(text: &str) -> (Self, usize) {
        after_whitespace(text, parse::parse_char)
    }

    #[inline]
    fn format<S: Sink + ?Sized>(&self, sink: &mut S, fmt: &FmtState) {
        format::write_char(sink, *self, fmt);
    }
}

/// One-based character column of byte offset `at`.
fn column(text: &str, at: usize) -> usize {
    text[..at].chars().count() + 1
}

/// Read a value from the start of a string, ignoring leading whitespace.
///
/// Returns the value and the number of bytes consumed, leading whitespace
/// included. Text after the value is left alone.
///
/// ```
/// let (value, len) = numcvt::from_str_prefix::<i32>("  -42 apples").unwrap();
/// assert_eq!((value, len), (-42, 5));
/// ```
///
/// # Errors
///
/// Fails when the input is blank, does not start with a value of type `T`,
/// or holds an integer that `T` cannot represent.
pub fn from_str_prefix<T: Convert>(s: &str) -> Result<(T, usize)> {
    match T::parse(s) {
        (value, len) if len != 0 => Ok((value, len)),
        _ => {
            let skip = parse::skip_whitespace(s.as_bytes());
            let rest = s[skip..].as_bytes();
            let digits = match rest.first() {
                Some(b'+' | b'-') => &rest[1..],
                _ => rest,
            };
            let code = if rest.is_empty() {
                ErrorCode::EofWhileParsingValue
            } else if digits.first().map_or(false, u8::is_ascii_digit) {
                ErrorCode::NumberOutOfRange
            } else {
                ErrorCode::InvalidNumber
            };
            Err(Error::new(code, column(s, skip)))
        }
    }
}

/// Read a value from a string that holds nothing else but whitespace.
///
/// ```
/// assert_eq!(numcvt::from_str::<f64>(" 3.14159\n").unwrap(), 3.14159);
/// assert!(numcvt::from_str::<u8>("256").unwrap_err().is_data());
/// ```
///
/// # Errors
///
/// Fails for the same reasons as [`from_str_prefix`], and when anything
/// other than whitespace follows the value.
pub fn from_str<T: Convert>(s: &str) -> Result<T> {
    let (value, len) = from_str_prefix(s)?;
    let end = len + parse::skip_whitespace(&s.as_bytes()[len..]);
    if end != s.len() {
        return Err(Error::new(ErrorCode::TrailingCharacters, column(s, end)));
    }
    Ok(value)
}

/// Format a value into a new `String`.
///
/// ```
/// use numcvt::{FloatStyle, FmtState};
///
/// let fmt = FmtState::new().style(FloatStyle::Fixed).precision(Some(4));
/// assert_eq!(numcvt::to_string(&(1.0f64 / 3.0), &fmt), "0.3333");
/// ```
pub fn to_string<T: Convert>(value: &T, fmt: &FmtState) -> String {
    let mut string = String::new();
    value.format(&mut string, fmt);
    string
}

/// Format a value into any sink.
pub fn to_writer<T: Convert, S: Sink + ?Sized>(sink: &mut S, value: &T, fmt: &FmtState) {
    value.format(sink, fmt);
}

/// Format an address as `0x`-prefixed hex.
///
/// Width, fill, adjustment, zero padding and case come from `fmt`; the base
/// and alternate flag are overridden.
pub fn format_ptr<S: Sink + ?Sized>(sink: &mut S, addr: usize, fmt: &FmtState) {
    format::write_ptr(sink, addr, fmt);
}
