use crate::error::ExtractError;
use crate::extract::base_peak::base_peak_mz;

#[test]
fn picks_mz_of_largest_intensity() {
    let mz = [70.0647, 90.7658, 171.0546];
    let intensity = [0.0, 0.0, 370.0];
    assert_eq!(base_peak_mz(&mz, &intensity).unwrap(), 171.0546);
}

#[test]
fn keeps_first_peak_on_tied_intensity() {
    let mz = [100.0, 200.0, 300.0];
    let intensity = [5.0, 5.0, 2.0];
    assert_eq!(base_peak_mz(&mz, &intensity).unwrap(), 100.0);
}

#[test]
fn single_peak_is_its_own_base_peak() {
    assert_eq!(base_peak_mz(&[922.0098], &[0.0]).unwrap(), 922.0098);
}

#[test]
fn rejects_empty_arrays() {
    assert!(matches!(
        base_peak_mz(&[], &[]),
        Err(ExtractError::InvalidArgument(_))
    ));
}

#[test]
fn rejects_mismatched_lengths() {
    assert!(matches!(
        base_peak_mz(&[1.0], &[1.0, 2.0]),
        Err(ExtractError::InvalidArgument(_))
    ));
}
