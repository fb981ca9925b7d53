//! Flat J1 memory image parser.
//!
//! An image is a little-endian sequence of 16-bit words, loaded from word 0.
//! RAM holds 8,192 words (16 KiB), so anything larger is rejected. A
//! trailing odd byte is ignored.

use std::fmt;
use std::io;
use std::path::Path;

/// Maximum image size in 16-bit words.
pub const MAX_WORDS: usize = 0x2000;

#[derive(Debug)]
pub enum ImageError {
    /// The image holds more words than RAM.
    TooLarge(usize),
    /// The byte source failed.
    Io(io::Error),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge(words) => write!(
                f,
                "image too large: {words} words (RAM holds {MAX_WORDS})",
            ),
            Self::Io(err) => write!(f, "image read failed: {err}"),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::TooLarge(_) => None,
        }
    }
}

impl From<io::Error> for ImageError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// A parsed memory image.
pub struct Image {
    words: Vec<u16>,
}

impl Image {
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImageError> {
        let count = data.len() / 2;
        if count > MAX_WORDS {
            return Err(ImageError::TooLarge(count));
        }
        let words = data
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self { words })
    }

    /// Read and parse an image file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        Self::from_bytes(&std::fs::read(path)?)
    }

    /// The image contents, one entry per memory word.
    #[must_use]
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Image length in words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
