//! # numcvt
//!
//! Locale-independent conversion between text and numbers.
//!
//! Every supported scalar (`i8` through `i64`, `u8` through `u64`, `isize`,
//! `usize`, `f32`, `f64`, `bool` and `char`) implements [`Convert`], which
//! reads a value from the front of a string and writes one to a [`Sink`]
//! under the control of a [`FmtState`].
//!
//! ```
//! use numcvt::{Base, Convert, FloatStyle, FmtState};
//!
//! // Parsing reports how much text it used; zero means nothing matched.
//! assert_eq!(f64::parse("  2.5 kg"), (2.5, 5));
//! assert_eq!(i32::parse("kg").1, 0);
//!
//! // Formatting is total and never allocates beyond what the sink does.
//! let hex = FmtState::new().base(Base::Hex).alternate(true).uppercase(true);
//! assert_eq!(numcvt::to_string(&255u8, &hex), "0XFF");
//!
//! let sci = FmtState::new().style(FloatStyle::Scientific).precision(Some(2));
//! assert_eq!(numcvt::to_string(&100.0f64, &sci), "1.00e+02");
//! ```
//!
//! # Floating point
//!
//! Decimal to binary conversion is correctly rounded, ties to even, for any
//! number of input digits. Binary to decimal conversion without an explicit
//! precision produces the shortest digit string that reads back as the same
//! value, so text written by this crate always parses back bit for bit:
//!
//! ```
//! use numcvt::FmtState;
//!
//! let x = 0.1f64 + 0.2;
//! let text = numcvt::to_string(&x, &FmtState::new());
//! assert_eq!(text, "0.30000000000000004");
//! assert_eq!(numcvt::from_str::<f64>(&text).unwrap(), x);
//! ```
//!
//! Both directions work from a table of 96-bit approximations of the powers
//! of ten between `1e-400` and `1e400`, built once on first use. When the
//! table's precision cannot settle a rounding decision the crate falls back
//! to exact big-integer arithmetic, so the fast path never costs
//! correctness.
//!
//! # Errors
//!
//! The [`Convert`] methods never fail loudly: parsing signals a mismatch by
//! consuming nothing, and every value can be formatted. [`from_str`] and
//! [`from_str_prefix`] turn a mismatch into an [`Error`] describing what went
//! wrong and where.

#![doc(html_root_url = "https://docs.rs/numcvt/0.3.1")]
#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::many_single_char_names,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::similar_names,
    clippy::unreadable_literal
)]

mod features_check;

mod bigint;
mod convert;
mod digits;
mod dtoa;
pub mod error;
mod format;
mod num;
mod parse;
pub mod sink;
mod state;
mod table;
mod wide;

#[doc(inline)]
pub use crate::convert::{format_ptr, from_str, from_str_prefix, to_string, to_writer, Convert};
#[doc(inline)]
pub use crate::error::{Error, Result};
#[doc(inline)]
pub use crate::sink::{FmtWriter, Sink, TruncatingBuf, UncheckedBuf};
pub use crate::state::{Adjust, Base, FloatStyle, FmtState, Sign};
