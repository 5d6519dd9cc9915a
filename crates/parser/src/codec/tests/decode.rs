use crate::codec::decode;
use crate::error::ExtractError;

#[test]
fn decodes_known_f64_payload() {
    // 1.0f64, little-endian: 00 00 00 00 00 00 f0 3f
    let values = decode(64, "none", "AAAAAAAA8D8=").expect("decode failed");
    assert_eq!(values, vec![1.0]);
}

#[test]
fn empty_payload_yields_empty_array() {
    assert_eq!(decode(64, "none", "").expect("f64 decode"), Vec::<f64>::new());
    assert_eq!(decode(32, "zlib", "").expect("f32 decode"), Vec::<f64>::new());
    assert_eq!(decode(64, "none", "   ").expect("whitespace"), Vec::<f64>::new());
}

#[test]
fn rejects_unknown_precision() {
    let err = decode(16, "none", "AAAAAAAA8D8=").unwrap_err();
    assert!(matches!(err, ExtractError::InvalidArgument(_)), "got {err}");
}

#[test]
fn rejects_unknown_compression() {
    let err = decode(64, "gzip", "AAAAAAAA8D8=").unwrap_err();
    assert!(matches!(err, ExtractError::InvalidArgument(_)), "got {err}");
}

#[test]
fn rejects_corrupt_base64() {
    let err = decode(64, "none", "!!not base64!!").unwrap_err();
    assert!(matches!(err, ExtractError::DecodeFailure(_)), "got {err}");
}

#[test]
fn rejects_non_zlib_bytes() {
    // Valid base64, but the raw bytes carry no zlib header.
    let err = decode(64, "zlib", "AAAAAAAA8D8=").unwrap_err();
    assert!(matches!(err, ExtractError::DecodeFailure(_)), "got {err}");
}

#[test]
fn rejects_truncated_payload() {
    // "AAAA" decodes to 3 bytes, not a multiple of the value width.
    let err = decode(64, "none", "AAAA").unwrap_err();
    assert!(matches!(err, ExtractError::DecodeFailure(_)), "got {err}");
    let err = decode(32, "none", "AAAA").unwrap_err();
    assert!(matches!(err, ExtractError::DecodeFailure(_)), "got {err}");
}
