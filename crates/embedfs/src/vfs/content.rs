//! Lazy content producers for manifest files.

use std::fmt;
use std::io::{self, Cursor, Read, Write};
use std::sync::Arc;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

type ProduceFn = dyn Fn() -> io::Result<Box<dyn Read + Send>> + Send + Sync;

/// Yields a fresh reader over one file's content each time it is invoked.
///
/// Nothing is decompressed until a handle is opened, and every invocation
/// starts from the beginning of the payload.
#[derive(Clone)]
pub struct ContentProducer(Arc<ProduceFn>);

impl ContentProducer {
    /// Wrap an arbitrary producer.
    pub fn new<F>(produce: F) -> Self
    where
        F: Fn() -> io::Result<Box<dyn Read + Send>> + Send + Sync + 'static,
    {
        Self(Arc::new(produce))
    }

    /// Gzip payload baked into the binary. This is what generated code uses.
    pub fn gzip_static(data: &'static [u8]) -> Self {
        Self::new(move || gunzip(data))
    }

    /// Owned gzip payload.
    pub fn gzip(data: Vec<u8>) -> Self {
        let data: Arc<[u8]> = data.into();
        Self::new(move || gunzip(Cursor::new(Arc::clone(&data))))
    }

    /// Compress `data` now and serve it back through a gzip producer.
    pub fn from_bytes(data: &[u8]) -> io::Result<Self> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        Ok(Self::gzip(encoder.finish()?))
    }

    /// Uncompressed payload.
    pub fn raw(data: Vec<u8>) -> Self {
        let data: Arc<[u8]> = data.into();
        Self::new(move || Ok(Box::new(Cursor::new(Arc::clone(&data))) as Box<dyn Read + Send>))
    }

    /// Invoke the producer.
    pub fn produce(&self) -> io::Result<Box<dyn Read + Send>> {
        (self.0)()
    }
}

impl fmt::Debug for ContentProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContentProducer(..)")
    }
}

/// Start decompressing, rejecting a bad gzip header up front.
fn gunzip<R: Read + Send + 'static>(reader: R) -> io::Result<Box<dyn Read + Send>> {
    let decoder = GzDecoder::new(reader);
    if decoder.header().is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid gzip header",
        ));
    }
    Ok(Box::new(decoder))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(producer: &ContentProducer) -> Vec<u8> {
        let mut out = Vec::new();
        producer.produce().unwrap().read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_from_bytes_round_trip() {
        let producer = ContentProducer::from_bytes(b"hello world").unwrap();
        assert_eq!(read_all(&producer), b"hello world");
        // Fresh stream every time
        assert_eq!(read_all(&producer), b"hello world");
    }

    #[test]
    fn test_empty_content() {
        let producer = ContentProducer::from_bytes(b"").unwrap();
        assert!(read_all(&producer).is_empty());
    }

    #[test]
    fn test_raw() {
        let producer = ContentProducer::raw(b"plain".to_vec());
        assert_eq!(read_all(&producer), b"plain");
    }

    #[test]
    fn test_bad_gzip_rejected_on_produce() {
        let producer = ContentProducer::gzip_static(b"definitely not gzip");
        let err = producer.produce().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
