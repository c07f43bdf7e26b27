//! Destinations for formatted text.

use core::fmt;
use core::str;

/// Append-only text destination.
///
/// Formatting never fails: a destination that runs out of room decides for
/// itself whether to panic, truncate or record the problem.
pub trait Sink {
    fn append(&mut self, s: &str);

    fn push(&mut self, c: char) {
        self.append(c.encode_utf8(&mut [0; 4]));
    }

    /// Append `c` repeated `n` times.
    fn fill(&mut self, c: char, n: usize) {
        for _ in 0..n {
            self.push(c);
        }
    }

    /// Hint that `n` more bytes are coming.
    #[inline]
    fn reserve(&mut self, n: usize) {
        let _ = n;
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn append(&mut self, s: &str) {
        (**self).append(s);
    }

    #[inline]
    fn push(&mut self, c: char) {
        (**self).push(c);
    }

    #[inline]
    fn fill(&mut self, c: char, n: usize) {
        (**self).fill(c, n);
    }

    #[inline]
    fn reserve(&mut self, n: usize) {
        (**self).reserve(n);
    }
}

impl Sink for String {
    #[inline]
    fn append(&mut self, s: &str) {
        self.push_str(s);
    }

    #[inline]
    fn push(&mut self, c: char) {
        String::push(self, c);
    }

    #[inline]
    fn fill(&mut self, c: char, n: usize) {
        self.extend(core::iter::repeat(c).take(n));
    }

    #[inline]
    fn reserve(&mut self, n: usize) {
        String::reserve(self, n);
    }
}

impl Sink for Vec<u8> {
    #[inline]
    fn append(&mut self, s: &str) {
        self.extend_from_slice(s.as_bytes());
    }

    #[inline]
    fn fill(&mut self, c: char, n: usize) {
        if c.is_ascii() {
            self.resize(self.len() + n, c as u8);
        } else {
            for _ in 0..n {
                Sink::push(self, c);
            }
        }
    }

    #[inline]
    fn reserve(&mut self, n: usize) {
        Vec::reserve(self, n);
    }
}

/// Fixed buffer the caller has sized for the output.
///
/// Writing past the end panics.
pub struct UncheckedBuf<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> UncheckedBuf<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        UncheckedBuf { buf, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: only whole `&str`s are ever copied in.
        unsafe { str::from_utf8_unchecked(&self.buf[..self.len]) }
    }
}

impl<'a> Sink for UncheckedBuf<'a> {
    #[inline]
    fn append(&mut self, s: &str) {
        let end = self.len + s.len();
        assert!(end <= self.buf.len(), "output buffer too small");
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
    }
}

/// Fixed buffer that silently drops whatever does not fit.
///
/// Characters are never split: one that would straddle the end is dropped
/// along with everything after it.
pub struct TruncatingBuf<'a> {
    buf: &'a mut [u8],
    len: usize,
    truncated: bool,
}

impl<'a> TruncatingBuf<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        TruncatingBuf {
            buf,
            len: 0,
            truncated: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether any output was dropped.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: only whole characters are ever copied in.
        unsafe { str::from_utf8_unchecked(&self.buf[..self.len]) }
    }
}

impl<'a> Sink for TruncatingBuf<'a> {
    fn append(&mut self, s: &str) {
        if self.truncated {
            return;
        }
        let room = self.buf.len() - self.len;
        let mut take = s.len();
        if take > room {
            take = room;
            while !s.is_char_boundary(take) {
                take -= 1;
            }
            self.truncated = true;
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
    }
}

/// Adapter onto any `fmt::Write`, for use inside `Display` impls.
///
/// The first error is kept and everything after it is discarded.
pub struct FmtWriter<W> {
    inner: W,
    result: fmt::Result,
}

impl<W: fmt::Write> FmtWriter<W> {
    pub fn new(inner: W) -> Self {
        FmtWriter {
            inner,
            result: Ok(()),
        }
    }

    /// Return the writer, or the first error it reported.
    pub fn finish(self) -> Result<W, fmt::Error> {
        self.result.map(|()| self.inner)
    }
}

impl<W: fmt::Write> Sink for FmtWriter<W> {
    #[inline]
    fn append(&mut self, s: &str) {
        if self.result.is_ok() {
            self.result = self.inner.write_str(s);
        }
    }

    #[inline]
    fn push(&mut self, c: char) {
        if self.result.is_ok() {
            self.result = self.inner.write_char(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_test() {
        let mut out = String::new();
        out.append("ab");
        Sink::push(&mut out, 'c');
        Sink::fill(&mut out, '*', 3);
        assert_eq!(out, "abc***");
    }

    #[test]
    fn vec_test() {
        let mut out: Vec<u8> = Vec::new();
        Sink::append(&mut out, "x");
        Sink::fill(&mut out, '0', 2);
        Sink::fill(&mut out, 'é', 2);
        Sink::push(&mut out, '!');
        assert_eq!(out, "x00éé!".as_bytes());
    }

    #[test]
    fn unchecked_test() {
        let mut storage = [0u8; 8];
        let mut buf = UncheckedBuf::new(&mut storage);
        assert!(buf.is_empty());
        buf.append("1234");
        buf.fill('-', 4);
        assert_eq!(buf.len(), 8);
        assert_eq!(buf.as_str(), "1234----");
    }

    #[test]
    #[should_panic(expected = "output buffer too small")]
    fn unchecked_overflow_test() {
        let mut storage = [0u8; 2];
        let mut buf = UncheckedBuf::new(&mut storage);
        buf.append("123");
    }

    #[test]
    fn truncating_test() {
        let mut storage = [0u8; 5];
        let mut buf = TruncatingBuf::new(&mut storage);
        buf.append("abc");
        assert!(!buf.is_truncated());
        buf.append("déf");
        assert!(buf.is_truncated());
        assert_eq!(buf.as_str(), "abcd");
        buf.append("z");
        assert_eq!(buf.as_str(), "abcd");
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn fmt_writer_test() {
        let mut writer = FmtWriter::new(String::new());
        writer.append("1.5");
        writer.push('e');
        writer.fill('0', 2);
        assert_eq!(writer.finish().unwrap(), "1.5e00");
    }

    #[test]
    fn by_ref_test() {
        fn write_to<S: Sink + ?Sized>(sink: &mut S) {
            sink.append("ok");
        }
        let mut out = String::new();
        let mut by_ref = &mut out;
        write_to(&mut by_ref);
        let dynamic: &mut dyn Sink = &mut out;
        write_to(dynamic);
        assert_eq!(out, "okok");
    }
}
