use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Supported ways of turning file bytes into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    /// 7-bit: the high bit of every byte is dropped.
    Ascii,
    /// Latin-1: each byte is the code point of the same value.
    Binary,
    Base64,
    Hex,
    Utf16Le,
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "ascii" => Ok(Encoding::Ascii),
            "binary" | "latin1" | "raw" => Ok(Encoding::Binary),
            "base64" => Ok(Encoding::Base64),
            "hex" => Ok(Encoding::Hex),
            "ucs2" | "ucs-2" | "utf16le" | "utf-16le" => Ok(Encoding::Utf16Le),
            _ => Err(Error::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl Encoding {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Ascii => bytes.iter().map(|b| char::from(b & 0x7f)).collect(),
            Encoding::Binary => bytes.iter().map(|&b| char::from(b)).collect(),
            Encoding::Base64 => STANDARD.encode(bytes),
            Encoding::Hex => {
                let mut out = String::with_capacity(bytes.len() * 2);
                for b in bytes {
                    let _ = write!(out, "{b:02x}");
                }
                out
            }
            Encoding::Utf16Le => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
        }
    }
}

/// Read the whole file at `path` and decode it.
pub fn read_text(path: &Path, encoding: Encoding) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(encoding.decode(&bytes))
}

/// Like [`read_text`] but takes the encoding by name, rejecting unknown names before any I/O.
pub fn read_text_named(path: &Path, encoding: &str) -> Result<String> {
    let encoding: Encoding = encoding.parse()?;
    read_text(path, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("ucs2".parse::<Encoding>().unwrap(), Encoding::Utf16Le);
        assert_eq!("raw".parse::<Encoding>().unwrap(), Encoding::Binary);
        assert!(matches!("utf32".parse::<Encoding>(), Err(Error::UnsupportedEncoding(_))));
    }

    #[test]
    fn decodes_bytes() {
        assert_eq!(Encoding::Ascii.decode(&[0xc1, b'b']), "Ab");
        assert_eq!(Encoding::Binary.decode(&[0xe9]), "é");
        assert_eq!(Encoding::Hex.decode(&[0x00, 0xff]), "00ff");
        assert_eq!(Encoding::Base64.decode(b"cat"), "Y2F0");
        assert_eq!(Encoding::Utf16Le.decode(&[b'h', 0, b'i', 0, b'x']), "hi");
    }

    #[test]
    fn unknown_encoding_fails_before_reading() {
        let err = read_text_named(Path::new("/definitely/not/here"), "klingon").unwrap_err();
        assert!(matches!(err, Error::UnsupportedEncoding(_)));
    }
}
