// SPDX-License-Identifier: MIT

use std::io::{self, Write};

/// Bytes per line of a generated array literal.
pub const BYTES_PER_LINE: usize = 12;

const INDENT: &[u8] = b"    ";

/// Writes bytes as the body of a Rust `&[u8]` literal: `0x%02x,` entries,
/// [`BYTES_PER_LINE`] per line, each line on its own indented row.
#[derive(Debug)]
pub struct ByteWriter<W: Write> {
    inner: W,
    col: usize,
    written: u64,
}

impl<W: Write> ByteWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            col: 0,
            written: 0,
        }
    }

    /// Number of bytes formatted so far.
    #[inline]
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl<W: Write> Write for ByteWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for b in buf {
            if self.col % BYTES_PER_LINE == 0 {
                self.inner.write_all(b"\n")?;
                self.inner.write_all(INDENT)?;
                self.col = 0;
            } else {
                self.inner.write_all(b" ")?;
            }
            write!(self.inner, "0x{b:02x},")?;
            self.col += 1;
        }
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(data: &[u8]) -> String {
        let mut buf = Vec::new();
        let mut w = ByteWriter::new(&mut buf);
        w.write_all(data).unwrap();
        assert_eq!(w.written(), data.len() as u64);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_twelve_per_line() {
        let data: Vec<u8> = (0..=25).collect();
        let out = render(&data);
        let lines: Vec<&str> = out.lines().skip(1).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b,"
        );
        assert_eq!(lines[2], "    0x18, 0x19,");
    }

    #[test]
    fn test_split_writes_keep_layout() {
        let data: Vec<u8> = (0..30).collect();
        let mut buf = Vec::new();
        let mut w = ByteWriter::new(&mut buf);
        for chunk in data.chunks(7) {
            w.write_all(chunk).unwrap();
        }
        assert_eq!(String::from_utf8(buf).unwrap(), render(&data));
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        assert_eq!(render(&[]), "");
    }
}
