//! Transport glue: turns `data:image/png;base64,<data>` strings into raw bytes.
//! The scorer itself never sees text.

use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

use crate::error::PayloadError;

/// Returns the segment after the data-URI comma.
///
/// Everything before the first comma is treated as the prefix, whatever it
/// says; a payload without a comma is rejected.
pub fn strip_data_uri(payload: &str) -> Result<&str, PayloadError> {
    payload.split(',').nth(1).ok_or(PayloadError::MissingPrefix)
}

/// Standard alphabet, padding required, stray bits in the final symbol tolerated.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Non-validating base64: every character outside `A-Z a-z 0-9 + / =` is
/// dropped before decoding, then padding is checked as usual.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, PayloadError> {
    let compact: Vec<u8> = encoded
        .bytes()
        .filter(|&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        .collect();
    LENIENT
        .decode(compact)
        .map_err(|e| PayloadError::InvalidBase64(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_the_media_type_prefix() {
        assert_eq!(
            strip_data_uri("data:image/png;base64,iVBORw0KGgo=").unwrap(),
            "iVBORw0KGgo="
        );
    }

    #[test]
    fn any_prefix_is_accepted() {
        assert_eq!(strip_data_uri("whatever,QUJD").unwrap(), "QUJD");
        assert_eq!(strip_data_uri(",QUJD").unwrap(), "QUJD");
    }

    #[test]
    fn missing_comma_is_rejected() {
        assert_eq!(strip_data_uri("QUJD"), Err(PayloadError::MissingPrefix));
        assert_eq!(strip_data_uri(""), Err(PayloadError::MissingPrefix));
    }

    #[test]
    fn decodes_padded_base64() {
        assert_eq!(decode_base64("QUJDRA==").unwrap(), b"ABCD");
    }

    #[test]
    fn tolerates_line_wrapping() {
        assert_eq!(decode_base64("QUJD\nRA==\r\n").unwrap(), b"ABCD");
    }

    #[test]
    fn drops_characters_outside_the_alphabet() {
        assert_eq!(decode_base64("QU!JD").unwrap(), b"ABC");
        assert_eq!(decode_base64("QU JD-R*A==").unwrap(), b"ABCD");
    }

    #[test]
    fn tolerates_nonzero_trailing_bits() {
        // "QR==" carries bits past the single decoded byte
        assert_eq!(decode_base64("QR==").unwrap(), b"A");
    }

    #[test]
    fn rejects_bad_padding() {
        assert!(matches!(
            decode_base64("QUJDR"),
            Err(PayloadError::InvalidBase64(_))
        ));
    }
}
