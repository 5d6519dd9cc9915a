use crate::error::ExtractError;

/// Round a value to a fixed number of decimal places.
///
/// Scale-round-divide with `factor = 10^decimal_places`; ties round away
/// from zero on the scaled value.
pub fn round_decimal_place(value: f64, decimal_places: u32) -> Result<f64, ExtractError> {
    if !value.is_finite() {
        return Err(ExtractError::InvalidArgument(format!(
            "cannot round non-finite value {value}"
        )));
    }
    let factor = 10f64.powi(decimal_places as i32);
    Ok((value * factor).round() / factor)
}
