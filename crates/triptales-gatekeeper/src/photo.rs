//! Proof photo decoding from `data:` URLs

use crate::fields;
use crate::ValidationError;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use triptales_domain::{ImageMime, ProofImage};

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Browsers are inconsistent about padding on captured frames
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

fn invalid(reason: &str) -> ValidationError {
    ValidationError::InvalidPhoto(format!("{} {}", fields::PHOTO, reason))
}

/// Decode a `data:image/<type>;base64,<payload>` URL
///
/// Accepts `image/jpeg` (or `image/jpg`), `image/png` and `image/webp`.
/// Whitespace inside the payload is ignored. The decoded size is checked
/// against `max_bytes` and reported as [`ValidationError::PayloadTooLarge`].
pub fn parse_photo_data_url(input: &str, max_bytes: usize) -> Result<ProofImage, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Required {
            field: fields::PHOTO,
        });
    }

    let lowered = input.to_ascii_lowercase();
    let marker = lowered
        .find(BASE64_MARKER)
        .filter(|_| lowered.starts_with(DATA_PREFIX))
        .ok_or_else(|| invalid("must be a valid base64 image data URL."))?;

    let header = &lowered[DATA_PREFIX.len()..marker];
    let mime = ImageMime::parse(header)
        .ok_or_else(|| invalid("must be a jpeg, png, or webp image."))?;

    let raw_payload = &input[marker + BASE64_MARKER.len()..];
    if !raw_payload
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=') || c.is_whitespace())
    {
        return Err(invalid("must be a valid base64 image data URL."));
    }

    let payload: String = raw_payload.chars().filter(|c| !c.is_whitespace()).collect();
    if payload.is_empty() {
        return Err(invalid("is empty."));
    }

    let bytes = LENIENT_STANDARD
        .decode(payload.as_bytes())
        .map_err(|_| invalid("cannot be decoded."))?;
    if bytes.is_empty() {
        return Err(invalid("cannot be decoded."));
    }
    if bytes.len() > max_bytes {
        return Err(ValidationError::PayloadTooLarge {
            limit: max_bytes,
            actual: bytes.len(),
        });
    }

    Ok(ProofImage { mime, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: &str = "data:image/jpeg;base64,/9j/4AAQ";

    #[test]
    fn test_decodes_jpeg() {
        let image = parse_photo_data_url(JPEG_HEADER, 1024).unwrap();
        assert_eq!(image.mime, ImageMime::Jpeg);
        assert_eq!(image.bytes, vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);
    }

    #[test]
    fn test_mime_is_case_insensitive_and_jpg_alias() {
        let image = parse_photo_data_url("DATA:IMAGE/JPG;BASE64,/9j/4AAQ", 1024).unwrap();
        assert_eq!(image.mime, ImageMime::Jpeg);

        let image = parse_photo_data_url("data:image/webp;base64,UklGRg==", 1024).unwrap();
        assert_eq!(image.mime, ImageMime::Webp);
    }

    #[test]
    fn test_whitespace_and_missing_padding() {
        let image = parse_photo_data_url("data:image/png;base64,iVBO\n Rw", 1024).unwrap();
        assert_eq!(image.mime, ImageMime::Png);
        assert_eq!(&image.bytes[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_empty_input_is_required() {
        assert_eq!(
            parse_photo_data_url("   ", 1024),
            Err(ValidationError::Required { field: "capturedPhotoDataUrl" })
        );
    }

    #[test]
    fn test_rejects_malformed() {
        for input in [
            "not a data url",
            "data:image/jpeg,abcd",
            "data:image/jpeg;base64,ab$cd",
            "data:text/plain;base64,aGVsbG8=",
        ] {
            let err = parse_photo_data_url(input, 1024).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidPhoto(_)), "{}: {:?}", input, err);
        }
    }

    #[test]
    fn test_unsupported_type() {
        let err = parse_photo_data_url("data:image/gif;base64,R0lGOD", 1024).unwrap_err();
        assert_eq!(
            err.to_string(),
            "capturedPhotoDataUrl must be a jpeg, png, or webp image."
        );
    }

    #[test]
    fn test_empty_payload() {
        let err = parse_photo_data_url("data:image/png;base64,", 1024).unwrap_err();
        assert_eq!(err.to_string(), "capturedPhotoDataUrl is empty.");
    }

    #[test]
    fn test_too_large() {
        let err = parse_photo_data_url(JPEG_HEADER, 4).unwrap_err();
        assert_eq!(err, ValidationError::PayloadTooLarge { limit: 4, actual: 6 });
        assert_eq!(err.to_string(), "Captured photo exceeds 4 bytes.");
    }
}
