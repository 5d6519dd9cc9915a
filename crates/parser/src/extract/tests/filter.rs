use crate::error::ExtractError;
use crate::extract::chromatogram::init_chromatograms;
use crate::extract::config::{ExtractionConfig, FilterMode, SpectrumAcceptance};
use crate::extract::filter::filter_spectrum;

fn range_config(min_mz: f64, max_mz: Option<f64>) -> ExtractionConfig {
    ExtractionConfig {
        mode: FilterMode::Range,
        min_mz,
        max_mz,
        ..ExtractionConfig::default()
    }
}

fn targeted_config(targets: &[f64]) -> ExtractionConfig {
    ExtractionConfig {
        mode: FilterMode::Targeted,
        targets: targets.to_vec(),
        ..ExtractionConfig::default()
    }
}

#[test]
fn range_keeps_inclusive_bounds_in_order() {
    let config = range_config(100.0, Some(200.0));
    let mut traces = init_chromatograms(&config);
    let out = filter_spectrum(
        &config,
        Some("profile"),
        Some(1),
        Some("positive"),
        Some(0.5),
        &[99.9, 100.0, 150.0, 200.0, 200.1],
        &[1.0, 2.0, 3.0, 4.0, 5.0],
        &mut traces,
    )
    .unwrap();
    assert_eq!(out.mz_values, vec![100.0, 150.0, 200.0]);
    assert_eq!(out.intensity_values, vec![2.0, 3.0, 4.0]);
    assert_eq!(out.total_ion_current, 9.0);
    assert_eq!(out.base_peak_mz, 200.0);
    assert_eq!(out.base_peak_intensity, 4.0);
    assert!(traces[0].time_array.is_empty());
    assert!(traces[1].time_array.is_empty());
}

#[test]
fn range_without_upper_bound_uses_spectrum_maximum() {
    let config = range_config(90.0, None);
    let mut traces = init_chromatograms(&config);
    let out = filter_spectrum(
        &config,
        None,
        None,
        None,
        None,
        &[70.0, 90.0, 171.0],
        &[1.0, 2.0, 3.0],
        &mut traces,
    )
    .unwrap();
    assert_eq!(out.mz_values, vec![90.0, 171.0]);
    assert_eq!(out.intensity_values, vec![2.0, 3.0]);
}

#[test]
fn targeted_summaries_come_from_selected_points_only() {
    let config = targeted_config(&[70.0647, 171.0546]);
    let mut traces = init_chromatograms(&config);
    let out = filter_spectrum(
        &config,
        Some("profile"),
        Some(1),
        Some("positive"),
        Some(0.01),
        &[70.0647, 90.7658, 171.0546],
        &[0.0, 0.0, 370.0],
        &mut traces,
    )
    .unwrap();
    assert_eq!(out.mz_values, vec![70.0647, 171.0546]);
    assert_eq!(out.intensity_values, vec![0.0, 370.0]);
    assert_eq!(out.total_ion_current, 370.0);
    assert_eq!(out.base_peak_mz, 171.0546);
    assert_eq!(out.base_peak_intensity, 370.0);
    assert_eq!(traces[2].intensity_array, vec![0.0]);
    assert_eq!(traces[2].mz_array, vec![70.0647]);
    assert_eq!(traces[3].intensity_array, vec![370.0]);
    assert_eq!(traces[3].mz_array, vec![171.0546]);
    assert_eq!(traces[3].time_array, vec![Some(0.01)]);
    assert_eq!(traces[3].ms_level_array, vec![Some(1.0)]);
}

#[test]
fn targeted_keeps_the_closest_candidate() {
    let config = targeted_config(&[100.0]);
    let mut traces = init_chromatograms(&config);
    let out = filter_spectrum(
        &config,
        None,
        None,
        None,
        None,
        &[100.002, 100.0001],
        &[7.0, 9.0],
        &mut traces,
    )
    .unwrap();
    assert_eq!(out.mz_values, vec![100.0001]);
    assert_eq!(out.intensity_values, vec![9.0]);
}

#[test]
fn targeted_keeps_the_earlier_candidate_on_tied_error() {
    let config = targeted_config(&[100.0]);
    let mut traces = init_chromatograms(&config);
    // Offsets of exactly 2^-8 on both sides, so the ppm errors tie exactly.
    let out = filter_spectrum(
        &config,
        None,
        None,
        None,
        None,
        &[99.99609375, 100.00390625],
        &[7.0, 9.0],
        &mut traces,
    )
    .unwrap();
    assert_eq!(out.mz_values, vec![99.99609375]);
    assert_eq!(out.intensity_values, vec![7.0]);
}

#[test]
fn targeted_fills_missed_targets_with_zero_intensity() {
    let config = targeted_config(&[100.0]);
    let mut traces = init_chromatograms(&config);
    let out = filter_spectrum(
        &config,
        None,
        None,
        None,
        Some(1.5),
        &[171.0],
        &[5.0],
        &mut traces,
    )
    .unwrap();
    assert_eq!(out.mz_values, vec![100.0]);
    assert_eq!(out.intensity_values, vec![0.0]);
    assert_eq!(out.total_ion_current, 0.0);
    assert_eq!(traces[2].intensity_array, vec![0.0]);
    assert_eq!(traces[2].mz_array, vec![100.0]);
}

#[test]
fn rejected_spectra_keep_eics_untouched_but_still_filter() {
    let config = ExtractionConfig {
        acceptance: Some(SpectrumAcceptance::default()),
        ..targeted_config(&[100.0])
    };
    let mut traces = init_chromatograms(&config);
    let out = filter_spectrum(
        &config,
        Some("profile"),
        None,
        Some("positive"),
        Some(1.5),
        &[100.0001],
        &[9.0],
        &mut traces,
    )
    .unwrap();
    assert_eq!(out.mz_values, vec![100.0001]);
    assert!(traces[2].time_array.is_empty());
    assert!(traces[2].intensity_array.is_empty());
}

#[test]
fn eic_axes_stay_aligned_across_appends() {
    let config = targeted_config(&[100.0, 200.0]);
    let mut traces = init_chromatograms(&config);
    for rt in [0.1, 0.2, 0.3] {
        filter_spectrum(
            &config,
            None,
            None,
            None,
            Some(rt),
            &[100.0, 200.0],
            &[1.0, 2.0],
            &mut traces,
        )
        .unwrap();
    }
    for trace in &traces[2..] {
        assert_eq!(trace.time_array.len(), 3);
        assert_eq!(trace.intensity_array.len(), 3);
        assert_eq!(trace.ms_level_array.len(), 3);
        assert_eq!(trace.mz_array.len(), 3);
    }
}

#[test]
fn missing_eic_trace_is_an_error_and_mutates_nothing() {
    let config = targeted_config(&[100.0]);
    let mut traces = init_chromatograms(&range_config(0.0, None));
    let err = filter_spectrum(
        &config,
        None,
        None,
        None,
        None,
        &[100.0],
        &[1.0],
        &mut traces,
    )
    .unwrap_err();
    assert!(matches!(err, ExtractError::InvalidArgument(_)));
    assert!(traces.iter().all(|t| t.time_array.is_empty()));
}

#[test]
fn unfiltered_mode_is_rejected() {
    let config = ExtractionConfig::default();
    let mut traces = init_chromatograms(&config);
    assert!(matches!(
        filter_spectrum(&config, None, None, None, None, &[], &[], &mut traces),
        Err(ExtractError::InvalidArgument(_))
    ));
}

#[test]
fn mismatched_arrays_are_rejected() {
    let config = range_config(0.0, None);
    let mut traces = init_chromatograms(&config);
    assert!(matches!(
        filter_spectrum(
            &config,
            None,
            None,
            None,
            None,
            &[1.0, 2.0],
            &[1.0],
            &mut traces
        ),
        Err(ExtractError::InvalidArgument(_))
    ));
}
