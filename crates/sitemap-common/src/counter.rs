//! Byte-counting writer adapter.
//!
//! [`CountingWriter`] wraps any [`Write`] sink and keeps a running total of the
//! bytes the sink reported as written. Errors are forwarded unchanged, so the
//! count stays accurate when a write fails partway through a document.

use std::io::{self, Write};

/// A writer that counts the bytes accepted by the wrapped sink.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use sitemap_common::CountingWriter;
///
/// let mut writer = CountingWriter::new(Vec::new());
/// writer.write_all(b"<urlset/>").unwrap();
///
/// assert_eq!(writer.count(), 9);
/// assert_eq!(writer.into_inner(), b"<urlset/>");
/// ```
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W> CountingWriter<W> {
    /// Wrap a sink with a zeroed counter.
    #[inline]
    pub const fn new(inner: W) -> Self {
        Self { inner, count: 0 }
    }

    /// Number of bytes the sink has accepted so far.
    #[inline]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Get a reference to the wrapped sink.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Get a mutable reference to the wrapped sink.
    ///
    /// Bytes written directly through this reference are not counted.
    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwrap the sink, discarding the counter.
    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink that accepts a fixed number of bytes, then fails.
    struct LimitedSink {
        remaining: usize,
        data: Vec<u8>,
    }

    impl Write for LimitedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            let n = buf.len().min(self.remaining);
            self.data.extend_from_slice(&buf[..n]);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_counts_all_writes() {
        let mut writer = CountingWriter::new(Vec::new());
        writer.write_all(b"hello ").unwrap();
        writer.write_all(b"world").unwrap();

        assert_eq!(writer.count(), 11);
        assert_eq!(writer.get_ref().len(), 11);
    }

    #[test]
    fn test_partial_write_is_counted() {
        let sink = LimitedSink {
            remaining: 4,
            data: Vec::new(),
        };
        let mut writer = CountingWriter::new(sink);

        let err = writer.write_all(b"abcdefgh").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(writer.count(), 4);
        assert_eq!(writer.get_ref().data, b"abcd");
    }

    #[test]
    fn test_empty_write() {
        let mut writer = CountingWriter::new(Vec::new());
        writer.write_all(b"").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.count(), 0);
    }
}
