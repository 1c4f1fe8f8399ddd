//! Ordered encoding fallback for the reference file.
//!
//! Roll exports come either as UTF-8 or from spreadsheet tools writing a
//! legacy Western European code page. Each encoding is attempted in order and
//! the first clean decode wins.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};

use crate::error::DecodeFailure;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encodings the reference file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceEncoding {
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
    #[serde(rename = "windows-1252", alias = "cp1252")]
    Windows1252,
}

/// Encodings attempted, in order.
pub const ENCODING_FALLBACK: [SourceEncoding; 3] = [
    SourceEncoding::Utf8,
    SourceEncoding::Latin1,
    SourceEncoding::Windows1252,
];

impl SourceEncoding {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
            Self::Windows1252 => "windows-1252",
        }
    }

    /// Decodes `bytes` strictly; no replacement characters are produced.
    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeFailure> {
        let decoded: Option<Cow<'_, str>> = match self {
            Self::Utf8 => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            Self::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes)),
            Self::Windows1252 => {
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
        };
        decoded
            .map(Cow::into_owned)
            .ok_or_else(|| DecodeFailure {
                encoding: self,
                reason: format!("input is not valid {}", self.label()),
            })
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tries each encoding of `order` in turn.
///
/// Returns the decoded text with the encoding that produced it, or every
/// failure when no encoding applies.
pub fn decode_with_fallback(
    bytes: &[u8],
    order: &[SourceEncoding],
) -> Result<(String, SourceEncoding), Vec<DecodeFailure>> {
    let mut failures = Vec::new();
    for &encoding in order {
        match encoding.decode(bytes) {
            Ok(text) => return Ok((text, encoding)),
            Err(failure) => {
                tracing::warn!(
                    encoding = %failure.encoding,
                    reason = %failure.reason,
                    "decode attempt failed, trying next encoding"
                );
                failures.push(failure);
            }
        }
    }
    Err(failures)
}
