use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::ExtractError;
use crate::extract::chromatogram::{ChromatogramTrace, init_chromatograms};
use crate::extract::config::ExtractionConfig;
use crate::extract::cv::{self, CvKey};
use crate::extract::spectrum::{SpectrumRecord, classify_binary_array, extract_spectra};
use crate::mzml::structs::{Chromatogram, MzML};

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());
static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{2}:\d{2}:\d{2}").unwrap());

/// Everything extracted from one mzML document.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MsRun {
    #[serde(rename = "sampleID")]
    pub sample_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub spectrum_count: usize,
    pub spectrum: Vec<SpectrumRecord>,
    pub chromatogram_count: usize,
    pub chromatogram: Vec<ChromatogramTrace>,
}

/// Extracts one parsed document into an output run.
///
/// Documents with a spectrum list go through spectrum extraction and feed the
/// initialized traces; documents carrying only a chromatogram list have those
/// chromatograms extracted as stored. A document with neither is rejected.
pub fn extract_run(config: &ExtractionConfig, mzml: &MzML) -> Result<MsRun, ExtractError> {
    let run = &mzml.run;
    let sample_id = mzml
        .id
        .clone()
        .filter(|v| !v.is_empty())
        .or_else(|| (!run.id.is_empty()).then(|| run.id.clone()));
    let stamp = run.start_time_stamp.as_deref().unwrap_or("");
    let date = DATE_PATTERN.find(stamp).map(|m| m.as_str().to_string());
    let time = TIME_PATTERN.find(stamp).map(|m| m.as_str().to_string());

    if let Some(list) = &run.spectrum_list {
        let traces = init_chromatograms(config);
        let chromatogram_count = traces.len();
        let extraction = extract_spectra(config, &list.spectra, traces)?;
        return Ok(MsRun {
            sample_id,
            date,
            time,
            spectrum_count: extraction.spectrum_count,
            spectrum: extraction.spectra,
            chromatogram_count,
            chromatogram: extraction.chromatograms,
        });
    }
    if let Some(list) = &run.chromatogram_list {
        let chromatogram = extract_document_chromatograms(config, &list.chromatograms)?;
        return Ok(MsRun {
            sample_id,
            date,
            time,
            spectrum_count: 0,
            spectrum: Vec::new(),
            chromatogram_count: list.count.unwrap_or(chromatogram.len()),
            chromatogram,
        });
    }
    Err(ExtractError::MalformedDocument(
        "run carries neither a spectrum list nor a chromatogram list".to_string(),
    ))
}

/// Extracts chromatograms stored in the document itself (SRM runs and the
/// like), without synthesizing TIC or BPC traces.
fn extract_document_chromatograms(
    config: &ExtractionConfig,
    chromatograms: &[Chromatogram],
) -> Result<Vec<ChromatogramTrace>, ExtractError> {
    let mut traces = Vec::with_capacity(chromatograms.len());
    for (position, chromatogram) in chromatograms.iter().enumerate() {
        let mut trace = ChromatogramTrace {
            index: chromatogram
                .index
                .map(|i| i as usize)
                .unwrap_or(position),
            id: chromatogram.id.clone(),
            ..ChromatogramTrace::default()
        };
        for param in &chromatogram.cv_params {
            let name = param.name.as_str();
            match cv::lookup(name) {
                Some(CvKey::ChromatogramType) => {
                    trace.trace_type = cv::mapped_value(name).map(str::to_string);
                }
                Some(CvKey::Polarity) => {
                    trace.polarity = cv::mapped_value(name).map(str::to_string);
                }
                _ => {}
            }
        }
        for param in &chromatogram.user_params {
            if cv::lookup(&param.name) == Some(CvKey::DwellTime) {
                trace.dwell_time = param
                    .value
                    .as_deref()
                    .and_then(|v| v.trim().parse().ok());
            }
        }
        if let Some(precursor) = &chromatogram.precursor {
            if let Some(window) = &precursor.isolation_window {
                for param in &window.cv_params {
                    if cv::lookup(&param.name) == Some(CvKey::IsolationWindowTarget) {
                        trace.precursor_isolation_window_target =
                            param.value.as_deref().and_then(|v| v.trim().parse().ok());
                    }
                }
            }
            if let Some(activation) = &precursor.activation {
                for param in &activation.cv_params {
                    let name = param.name.as_str();
                    match cv::lookup(name) {
                        Some(CvKey::CollisionType) => {
                            trace.collision_type = cv::mapped_value(name).map(str::to_string);
                        }
                        Some(CvKey::CollisionEnergy) => {
                            trace.collision_energy =
                                param.value.as_deref().and_then(|v| v.trim().parse().ok());
                        }
                        _ => {}
                    }
                }
            }
        }
        if let Some(window) = chromatogram
            .product
            .as_ref()
            .and_then(|p| p.isolation_window.as_ref())
        {
            for param in &window.cv_params {
                if cv::lookup(&param.name) == Some(CvKey::IsolationWindowTarget) {
                    trace.product_isolation_window_target =
                        param.value.as_deref().and_then(|v| v.trim().parse().ok());
                }
            }
        }
        if let Some(list) = &chromatogram.binary_data_array_list {
            for array in &list.binary_data_arrays {
                match classify_binary_array(array)? {
                    Some((CvKey::TimeArray, values)) => {
                        let mut time = Vec::with_capacity(values.len());
                        for value in values {
                            time.push(Some(config.round_if_configured(value)?));
                        }
                        trace.time_array = time;
                    }
                    Some((CvKey::IntensityArray, values)) => trace.intensity_array = values,
                    Some((CvKey::MsLevelArray, values)) => {
                        trace.ms_level_array = values.into_iter().map(Some).collect();
                    }
                    _ => {}
                }
            }
        }
        trace.array_length = Some(
            chromatogram
                .default_array_length
                .unwrap_or(trace.time_array.len()),
        );
        traces.push(trace);
    }
    Ok(traces)
}
