//! SHA-256 content digests used to decide whether a file needs writing.

use std::fmt;
use std::io::{self, Read};

use sha2::{Digest, Sha256};

/// A 256-bit content digest. Equal digests are treated as equal content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    pub fn of(bytes: &[u8]) -> Self {
        let mut h = Sha256::new();
        h.update(bytes);
        Self::finish(h)
    }

    /// Hash everything `reader` yields.
    pub fn from_reader(mut reader: impl Read) -> io::Result<Self> {
        let mut h = Sha256::new();
        io::copy(&mut reader, &mut h)?;
        Ok(Self::finish(h))
    }

    fn finish(h: Sha256) -> Self {
        let mut out = [0u8; 32];
        out.copy_from_slice(&h.finalize());
        Self(out)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sha256_vector() {
        assert_eq!(
            ContentDigest::of(b"abc").to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn reader_and_slice_agree() {
        let data = vec![7u8; 100_000];
        let streamed = ContentDigest::from_reader(data.as_slice()).unwrap();
        assert_eq!(streamed, ContentDigest::of(&data));
    }

    #[test]
    fn different_content_differs() {
        assert_ne!(ContentDigest::of(b"v1"), ContentDigest::of(b"v2"));
    }
}
