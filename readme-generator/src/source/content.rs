//! Decoding of file content delivered by the contents API.

use super::{EncodedContent, FetchError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Turns fetched content into plain text regardless of the transport form.
///
/// Base64 payloads are decoded after stripping the line breaks GitHub inserts
/// every 60 characters. Content without an encoding, or marked as UTF-8, is
/// already text. The `none` encoding means GitHub did not inline the file
/// (it is too large), which is reported as an error rather than as an empty
/// file.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] if the content is missing, not valid base64,
/// not valid UTF-8, or uses an unsupported encoding.
pub fn decode_content(content: &EncodedContent) -> Result<String, FetchError> {
    let payload = content
        .content
        .as_deref()
        .ok_or_else(|| FetchError::Decode("response carried no content".to_string()))?;

    match content.encoding.as_deref() {
        None | Some("utf-8") | Some("utf8") => Ok(payload.to_string()),
        Some("base64") => decode_base64(payload),
        Some("none") => Err(FetchError::Decode(
            "content was not inlined by the API".to_string(),
        )),
        Some(other) => Err(FetchError::Decode(format!(
            "unsupported encoding '{other}'"
        ))),
    }
}

fn decode_base64(payload: &str) -> Result<String, FetchError> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| FetchError::Decode(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| FetchError::Decode(format!("invalid UTF-8: {e}")))
}
