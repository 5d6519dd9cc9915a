use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use miniz_oxide::inflate::decompress_to_vec_zlib;

use crate::error::ExtractError;

/// Decode a precision-tagged, optionally zlib-compressed base64 payload into
/// numeric values.
///
/// `precision` is the bit width of one value (32 or 64), `compression` is
/// `"none"` or `"zlib"`. An empty payload is valid and yields an empty array.
/// 32-bit values are widened to f64 after reinterpretation.
pub fn decode(precision: u32, compression: &str, payload: &str) -> Result<Vec<f64>, ExtractError> {
    check_tags(precision, compression)?;

    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(Vec::new());
    }

    let mut bytes = Vec::with_capacity(payload.len().saturating_mul(3) / 4 + 8);
    STANDARD
        .decode_vec(payload.as_bytes(), &mut bytes)
        .map_err(|e| ExtractError::DecodeFailure(format!("base64 decode failed: {e}")))?;

    if compression == "zlib" {
        bytes = decompress_to_vec_zlib(&bytes)
            .map_err(|e| ExtractError::DecodeFailure(format!("zlib inflate failed: {e:?}")))?;
    }

    if precision == 64 {
        if bytes.len() % 8 != 0 {
            return Err(ExtractError::DecodeFailure(format!(
                "payload length {} is not a multiple of 8",
                bytes.len()
            )));
        }
        let mut out = Vec::with_capacity(bytes.len() / 8);
        decode_f64_into(&bytes, &mut out);
        Ok(out)
    } else {
        if bytes.len() % 4 != 0 {
            return Err(ExtractError::DecodeFailure(format!(
                "payload length {} is not a multiple of 4",
                bytes.len()
            )));
        }
        let mut out = Vec::with_capacity(bytes.len() / 4);
        decode_f32_into(&bytes, &mut out);
        Ok(out)
    }
}

pub(crate) fn check_tags(precision: u32, compression: &str) -> Result<(), ExtractError> {
    if precision != 64 && precision != 32 {
        return Err(ExtractError::InvalidArgument(format!(
            "precision must be 64 or 32, got {precision}"
        )));
    }
    if compression != "none" && compression != "zlib" {
        return Err(ExtractError::InvalidArgument(format!(
            "compression must be \"none\" or \"zlib\", got {compression:?}"
        )));
    }
    Ok(())
}

fn decode_f64_into(bytes: &[u8], out: &mut Vec<f64>) {
    for c in bytes.chunks_exact(8) {
        out.push(f64::from_bits(u64::from_le_bytes([
            c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7],
        ])));
    }
}

fn decode_f32_into(bytes: &[u8], out: &mut Vec<f64>) {
    for c in bytes.chunks_exact(4) {
        out.push(f64::from(f32::from_bits(u32::from_le_bytes([
            c[0], c[1], c[2], c[3],
        ]))));
    }
}
