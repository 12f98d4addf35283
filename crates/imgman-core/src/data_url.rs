//! `data:<mime>;base64,<payload>` text encoding.
//!
//! Decoding is lenient about the header: everything up to the first comma is
//! treated as the header and only the payload is interpreted, which accepts the
//! output of `FileReader.readAsDataURL` as well as `data://` variants.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("Data URL has no ',' separating header and payload")]
    MissingPayload,

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Encode `bytes` as a base64 data URL with the given MIME type.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decode the payload of a base64 data URL.
///
/// Surrounding whitespace in the payload is ignored.
pub fn decode(data_url: &str) -> Result<Vec<u8>, DataUrlError> {
    let (_, payload) = data_url
        .split_once(',')
        .ok_or(DataUrlError::MissingPayload)?;
    Ok(STANDARD.decode(payload.trim())?)
}

/// The MIME type declared in a data URL header, if any.
///
/// ```text
/// data:image/png;base64,...   -> Some("image/png")
/// data:;base64,...            -> None
/// ```
pub fn mime_type(data_url: &str) -> Option<&str> {
    let (header, _) = data_url.split_once(',')?;
    let rest = header.strip_prefix("data:")?;
    let rest = rest.trim_start_matches('/');
    let mime = rest.split(';').next()?;
    (!mime.is_empty()).then_some(mime)
}
