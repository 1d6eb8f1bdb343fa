//! Text encodings for whole-file text reads and writes.

use std::io;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

/// An explicit text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8 without a byte order mark.
    #[default]
    Utf8,
    /// UTF-8 with a leading byte order mark.
    Utf8Bom,
    /// UTF-16 little endian with a byte order mark.
    Utf16Le,
    /// UTF-16 big endian with a byte order mark.
    Utf16Be,
    /// ISO-8859-1. Characters above U+00FF are written as `?`.
    Latin1,
}

impl TextEncoding {
    /// Detect an encoding from a byte order mark, returning it with the BOM
    /// length. Content without a BOM is treated as UTF-8.
    pub fn detect(bytes: &[u8]) -> (Self, usize) {
        if bytes.starts_with(UTF8_BOM) {
            (Self::Utf8Bom, UTF8_BOM.len())
        } else if bytes.starts_with(UTF16LE_BOM) {
            (Self::Utf16Le, UTF16LE_BOM.len())
        } else if bytes.starts_with(UTF16BE_BOM) {
            (Self::Utf16Be, UTF16BE_BOM.len())
        } else {
            (Self::Utf8, 0)
        }
    }

    /// Encode `text`, including a byte order mark where the encoding has one.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf8Bom => {
                let mut bytes = Vec::with_capacity(UTF8_BOM.len() + text.len());
                bytes.extend_from_slice(UTF8_BOM);
                bytes.extend_from_slice(text.as_bytes());
                bytes
            }
            Self::Utf16Le => {
                let mut bytes = UTF16LE_BOM.to_vec();
                bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
                bytes
            }
            Self::Utf16Be => {
                let mut bytes = UTF16BE_BOM.to_vec();
                bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
                bytes
            }
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        }
    }

    /// Decode `bytes`, skipping this encoding's byte order mark if present.
    pub fn decode(&self, bytes: &[u8]) -> io::Result<String> {
        match self {
            Self::Utf8 | Self::Utf8Bom => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                String::from_utf8(body.to_vec()).map_err(invalid_data)
            }
            Self::Utf16Le => {
                let body = bytes.strip_prefix(UTF16LE_BOM).unwrap_or(bytes);
                decode_utf16(body, u16::from_le_bytes)
            }
            Self::Utf16Be => {
                let body = bytes.strip_prefix(UTF16BE_BOM).unwrap_or(bytes);
                decode_utf16(body, u16::from_be_bytes)
            }
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

/// Decode `bytes` using its byte order mark, defaulting to UTF-8.
pub fn decode_detected(bytes: &[u8]) -> io::Result<String> {
    let (encoding, _) = TextEncoding::detect(bytes);
    encoding.decode(bytes)
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> io::Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "UTF-16 content has an odd number of bytes",
        ));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(invalid_data)
}

fn invalid_data<E>(err: E) -> io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    io::Error::new(io::ErrorKind::InvalidData, err)
}
