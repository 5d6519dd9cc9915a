use crate::error::ExtractError;
use crate::extract::chromatogram::ChromatogramTrace;
use crate::extract::config::{ExtractionConfig, FilterMode};

/// Replacement point data and summaries for one filtered spectrum.
#[derive(Debug, Clone, Default)]
pub struct FilteredSpectrum {
    pub base_peak_intensity: f64,
    pub base_peak_mz: f64,
    pub total_ion_current: f64,
    pub mz_values: Vec<f64>,
    pub intensity_values: Vec<f64>,
}

struct TargetWindow {
    target: f64,
    lower: f64,
    upper: f64,
    best_error: f64,
    eic: usize,
}

/// Filters one spectrum's point data in range or targeted mode.
///
/// Targeted mode also appends one point per target to the matching EIC trace,
/// but only when the spectrum passes the metadata gate. All fallible work
/// happens before any trace is touched, so an error leaves `chromatograms`
/// unchanged.
pub fn filter_spectrum(
    config: &ExtractionConfig,
    spectrum_type: Option<&str>,
    ms_level: Option<u32>,
    polarity: Option<&str>,
    retention_time: Option<f64>,
    mz_array: &[f64],
    intensity_array: &[f64],
    chromatograms: &mut [ChromatogramTrace],
) -> Result<FilteredSpectrum, ExtractError> {
    config.validate()?;
    if mz_array.len() != intensity_array.len() {
        return Err(ExtractError::InvalidArgument(format!(
            "m/z and intensity arrays differ in length ({} vs {})",
            mz_array.len(),
            intensity_array.len()
        )));
    }
    match config.mode {
        FilterMode::None => Err(ExtractError::InvalidArgument(
            "spectrum filtering requires a range or targeted mode".to_string(),
        )),
        FilterMode::Range => Ok(filter_range(config, mz_array, intensity_array)),
        FilterMode::Targeted => {
            let windows = resolve_windows(config, chromatograms)?;
            Ok(filter_targeted(
                config,
                windows,
                spectrum_type,
                ms_level,
                polarity,
                retention_time,
                mz_array,
                intensity_array,
                chromatograms,
            ))
        }
    }
}

fn filter_range(
    config: &ExtractionConfig,
    mz_array: &[f64],
    intensity_array: &[f64],
) -> FilteredSpectrum {
    // An absent upper bound falls back to the spectrum's own largest m/z.
    let upper = config
        .max_mz
        .unwrap_or_else(|| mz_array.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)));
    let mut out = FilteredSpectrum::default();
    for (&mz, &intensity) in mz_array.iter().zip(intensity_array) {
        if mz < config.min_mz || mz > upper {
            continue;
        }
        out.mz_values.push(mz);
        out.intensity_values.push(intensity);
        out.total_ion_current += intensity;
        if intensity > out.base_peak_intensity {
            out.base_peak_intensity = intensity;
            out.base_peak_mz = mz;
        }
    }
    out
}

fn resolve_windows(
    config: &ExtractionConfig,
    chromatograms: &[ChromatogramTrace],
) -> Result<Vec<TargetWindow>, ExtractError> {
    let mut windows = Vec::with_capacity(config.targets.len());
    for &target in &config.targets {
        let ppm_window = (config.ppm_tolerance / 1e6 * target).abs();
        let half_width = ppm_window.max(config.mz_tolerance);
        let lower = config.round_if_configured(target - half_width)?;
        let upper = config.round_if_configured(target + half_width)?;
        // Seed the closest-match search with the wider tolerance expressed
        // in ppm, so a candidate inside the window always beats it.
        let best_error = if config.mz_tolerance > ppm_window {
            (config.mz_tolerance / target * 1e6).abs()
        } else {
            config.ppm_tolerance
        };
        let id = format!("EIC {target}");
        let eic = chromatograms
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| {
                ExtractError::InvalidArgument(format!(
                    "no chromatogram initialized for target {target}"
                ))
            })?;
        windows.push(TargetWindow {
            target,
            lower,
            upper,
            best_error,
            eic,
        });
    }
    Ok(windows)
}

fn filter_targeted(
    config: &ExtractionConfig,
    windows: Vec<TargetWindow>,
    spectrum_type: Option<&str>,
    ms_level: Option<u32>,
    polarity: Option<&str>,
    retention_time: Option<f64>,
    mz_array: &[f64],
    intensity_array: &[f64],
    chromatograms: &mut [ChromatogramTrace],
) -> FilteredSpectrum {
    let accepted = config.accepts(spectrum_type, ms_level, polarity);
    let mut out = FilteredSpectrum::default();
    for window in windows {
        let mut best_error = window.best_error;
        let mut best: Option<usize> = None;
        for (i, &mz) in mz_array.iter().enumerate() {
            if mz < window.lower || mz > window.upper {
                continue;
            }
            let error = ((mz - window.target) / window.target * 1e6).abs();
            // Strict comparison keeps the earliest point on equal error.
            if error < best_error {
                best_error = error;
                best = Some(i);
            }
        }
        let (mut mz, intensity) = match best {
            Some(i) => (mz_array[i], intensity_array[i]),
            None => (0.0, 0.0),
        };
        if mz == 0.0 {
            mz = window.target;
        }
        out.mz_values.push(mz);
        out.intensity_values.push(intensity);
        out.total_ion_current += intensity;
        if intensity > out.base_peak_intensity {
            out.base_peak_intensity = intensity;
            out.base_peak_mz = mz;
        }
        if accepted {
            let trace = &mut chromatograms[window.eic];
            trace.time_array.push(retention_time);
            trace.intensity_array.push(intensity);
            trace.ms_level_array.push(ms_level.map(f64::from));
            trace.mz_array.push(mz);
        }
    }
    out
}
