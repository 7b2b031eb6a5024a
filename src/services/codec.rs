use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const DATA_URI_MARKER: &str = "data:image";

/// Decode a base64 image payload, accepting an optional
/// `data:image/...;base64,` prefix.
pub fn decode(image: &str) -> Result<Vec<u8>, DecodeError> {
    let payload = if image.starts_with(DATA_URI_MARKER) {
        image
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or(DecodeError::MissingPayload)?
    } else {
        image
    };

    Ok(STANDARD.decode(payload)?)
}

/// Encode raw image bytes as standard padded base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Wrap an already encoded image as a PNG data URI.
pub fn png_data_uri(encoded: &str) -> String {
    format!("data:image/png;base64,{encoded}")
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid image payload: data URI has no base64 section")]
    MissingPayload,

    #[error("Invalid image payload: {0}")]
    Base64(#[from] base64::DecodeError),
}
