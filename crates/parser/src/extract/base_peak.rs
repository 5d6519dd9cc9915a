use crate::error::ExtractError;

/// m/z at the first occurrence of the maximum intensity.
///
/// A later equal intensity never replaces the current champion, so duplicate
/// maxima resolve to the earliest index.
pub fn base_peak_mz(mz_array: &[f64], intensity_array: &[f64]) -> Result<f64, ExtractError> {
    if mz_array.is_empty() {
        return Err(ExtractError::InvalidArgument(
            "cannot derive a base peak from empty arrays".to_string(),
        ));
    }
    if mz_array.len() != intensity_array.len() {
        return Err(ExtractError::InvalidArgument(format!(
            "m/z and intensity arrays differ in length ({} vs {})",
            mz_array.len(),
            intensity_array.len()
        )));
    }

    let mut best = 0usize;
    for (i, intensity) in intensity_array.iter().enumerate().skip(1) {
        if *intensity > intensity_array[best] {
            best = i;
        }
    }
    Ok(mz_array[best])
}
