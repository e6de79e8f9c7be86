// SPDX-License-Identifier: MIT

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::{self, Write};

/// Gzips `data` into `w` at the best compression level and returns `w`.
///
/// The stream is what `StaticAccessor` inflates at runtime.
pub fn gzip_into<W: Write>(data: &[u8], w: W) -> io::Result<W> {
    let mut enc = GzEncoder::new(w, Compression::best());
    enc.write_all(data)?;
    enc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_gzip_inflates_back() {
        let data = b"petrify petrify petrify petrify".repeat(8);
        let packed = gzip_into(&data, Vec::new()).unwrap();
        assert!(packed.len() < data.len());

        let mut out = Vec::new();
        GzDecoder::new(packed.as_slice()).read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
    }
}
