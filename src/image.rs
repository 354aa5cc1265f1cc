use crate::errors::ApiError;
use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

/// Extension given to every upload, whatever the declared media type.
pub const UPLOAD_EXTENSION: &str = "jpg";

/// Extensions that make a stored file show up in listings.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes the payload of a `data:<mime>;base64,<payload>` string.
///
/// The media type is not inspected.
pub fn decode_data_uri(data_uri: &str) -> Result<Vec<u8>, ApiError> {
    let payload = data_uri
        .split(',')
        .nth(1)
        .ok_or_else(|| ApiError::InvalidImage("expected a base64 data URI".into()))?;

    // Line breaks are allowed anywhere, and the URL-safe alphabet is accepted too.
    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    BASE64
        .decode(payload)
        .map_err(|e| ApiError::InvalidImage(e.to_string()))
}

/// Identifier of a stored image, or `None` if the name has no image extension.
pub fn image_id(file_name: &str) -> Option<&str> {
    IMAGE_EXTENSIONS.iter().find_map(|ext| {
        file_name
            .strip_suffix(ext)
            .and_then(|stem| stem.strip_suffix('.'))
    })
}

pub fn upload_file_name(id: &str) -> String {
    format!("{id}.{UPLOAD_EXTENSION}")
}
