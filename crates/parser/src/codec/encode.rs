use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::codec::decode::check_tags;
use crate::error::ExtractError;

const ZLIB_LEVEL: u8 = 6;

/// Encode numeric values into a base64 payload, the exact inverse of
/// [`decode`](crate::decode).
///
/// 32-bit encoding narrows each value to f32 before serialization, so the
/// round-trip is exact only within f32 resolution.
pub fn encode(precision: u32, compression: &str, values: &[f64]) -> Result<String, ExtractError> {
    check_tags(precision, compression)?;

    let bytes = if precision == 64 {
        let mut b = Vec::with_capacity(values.len() * 8);
        for v in values {
            b.extend_from_slice(&v.to_le_bytes());
        }
        b
    } else {
        let mut b = Vec::with_capacity(values.len() * 4);
        for v in values {
            b.extend_from_slice(&(*v as f32).to_le_bytes());
        }
        b
    };

    let bytes = if compression == "zlib" {
        compress_to_vec_zlib(&bytes, ZLIB_LEVEL)
    } else {
        bytes
    };

    Ok(STANDARD.encode(&bytes))
}
