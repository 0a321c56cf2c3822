// Data URIs as produced by `FileReader.readAsDataURL`.
//
// Only the shapes a file read produces are supported: `data:<mime>;base64,<payload>`
// plus the plain-text form for hand-written URIs.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Media type browsers report when the file type is unknown.
pub const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUrlError {
    #[error("data url: missing `data:` scheme")]
    MissingScheme,
    #[error("data url: missing `,` before payload")]
    MissingPayload,
    #[error("data url: invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A parsed data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub base64: bool,
    pub data: Vec<u8>,
}

impl DataUrl {
    pub fn parse(input: &str) -> Result<Self, DataUrlError> {
        let rest = strip_scheme(input.trim()).ok_or(DataUrlError::MissingScheme)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPayload)?;

        let (mime, base64) = match header.strip_suffix(";base64") {
            Some(m) => (m, true),
            None => (header, false),
        };

        let data = if base64 {
            STANDARD.decode(payload)?
        } else {
            payload.as_bytes().to_vec()
        };

        Ok(Self {
            mime: mime.to_string(),
            base64,
            data,
        })
    }

    /// Media type, falling back to `text/plain` the way RFC 2397 does for an
    /// empty header.
    pub fn media_type(&self) -> &str {
        if self.mime.is_empty() {
            "text/plain"
        } else {
            &self.mime
        }
    }
}

fn strip_scheme(s: &str) -> Option<&str> {
    let head = s.get(..5)?;
    head.eq_ignore_ascii_case("data:").then(|| &s[5..])
}

/// Encodes `bytes` the way a file reader does.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() {
        FALLBACK_MIME
    } else {
        mime.trim()
    };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_declared_type() {
        assert_eq!(encode("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn encode_without_type_falls_back() {
        assert_eq!(
            encode("  ", &[0, 1, 2]),
            "data:application/octet-stream;base64,AAEC"
        );
    }

    #[test]
    fn parse_reads_back_encoded_file() {
        let bytes = [0xFFu8, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let url = DataUrl::parse(&encode("image/jpeg", &bytes)).expect("parse");
        assert_eq!(url.mime, "image/jpeg");
        assert!(url.base64);
        assert_eq!(url.data, bytes);
    }

    #[test]
    fn parse_plain_payload_and_default_type() {
        let url = DataUrl::parse("DATA:,hello").expect("parse");
        assert!(!url.base64);
        assert_eq!(url.media_type(), "text/plain");
        assert_eq!(url.data, b"hello");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!(
            DataUrl::parse("http://x/y.png"),
            Err(DataUrlError::MissingScheme)
        );
        assert_eq!(
            DataUrl::parse("data:image/png;base64"),
            Err(DataUrlError::MissingPayload)
        );
        assert!(matches!(
            DataUrl::parse("data:image/png;base64,@@@"),
            Err(DataUrlError::InvalidBase64(_))
        ));
    }
}
