use serde::Serialize;

use crate::codec::decode;
use crate::error::ExtractError;
use crate::extract::base_peak::base_peak_mz;
use crate::extract::chromatogram::ChromatogramTrace;
use crate::extract::config::{ExtractionConfig, FilterMode};
use crate::extract::cv::{self, CvKey};
use crate::extract::filter::filter_spectrum;
use crate::mzml::structs::{
    BinaryDataArray, BinaryDataArrayList, CvParam, Precursor, Scan, Spectrum,
};

/// One spectrum of the output run, in serialization order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumRecord {
    pub index: usize,
    #[serde(rename = "scanID")]
    pub scan_id: String,
    pub array_length: usize,
    #[serde(rename = "type")]
    pub spectrum_type: Option<String>,
    pub ms_level: Option<u32>,
    pub scan_type: Option<String>,
    pub polarity: Option<String>,
    pub retention_time: Option<f64>,
    pub scan_preset_configuration: Option<f64>,
    pub inverse_reduced_ion_mobility: Option<f64>,
    pub scan_window_lower_limit: Option<f64>,
    pub scan_window_upper_limit: Option<f64>,
    pub isolation_window_target: Option<f64>,
    pub isolation_window_lower_offset: Option<f64>,
    pub isolation_window_upper_offset: Option<f64>,
    #[serde(rename = "selectedIonMZ")]
    pub selected_ion_mz: Option<f64>,
    pub collision_type: Option<String>,
    pub collision_energy: Option<f64>,
    pub base_peak_intensity: f64,
    #[serde(rename = "basePeakMZ")]
    pub base_peak_mz: f64,
    pub total_ion_current: f64,
    pub mz_array: Vec<f64>,
    pub intensity_array: Vec<f64>,
}

/// Spectra that passed extraction plus the traces they fed.
#[derive(Debug, Clone, Default)]
pub struct SpectrumExtraction {
    pub spectrum_count: usize,
    pub spectra: Vec<SpectrumRecord>,
    pub chromatograms: Vec<ChromatogramTrace>,
}

fn param_f64(param: &CvParam) -> Option<f64> {
    param.value.as_deref().and_then(|v| v.trim().parse().ok())
}

fn param_u32(param: &CvParam) -> Option<u32> {
    param.value.as_deref().and_then(|v| v.trim().parse().ok())
}

/// Walks every spectrum of a run through mapping, decoding, optional
/// filtering and the metadata gate, feeding the TIC and BPC traces along the
/// way.
///
/// Kept spectra are re-indexed contiguously; every trace's array length is
/// finalized from its time axis before returning.
pub fn extract_spectra(
    config: &ExtractionConfig,
    spectra: &[Spectrum],
    mut chromatograms: Vec<ChromatogramTrace>,
) -> Result<SpectrumExtraction, ExtractError> {
    config.validate()?;
    let tic = chromatograms
        .iter()
        .position(|c| c.id == "TIC")
        .ok_or_else(|| {
            ExtractError::InvalidArgument("chromatogram list is missing the TIC trace".to_string())
        })?;
    let bpc = chromatograms
        .iter()
        .position(|c| c.id == "BPC")
        .ok_or_else(|| {
            ExtractError::InvalidArgument("chromatogram list is missing the BPC trace".to_string())
        })?;

    let mut spectrum_count = 0usize;
    let mut out = Vec::new();
    for spectrum in spectra {
        let mut record = SpectrumRecord {
            scan_id: spectrum.id.clone(),
            ..SpectrumRecord::default()
        };
        apply_spectrum_params(config, &spectrum.cv_params, &mut record)?;
        if let Some(scan) = spectrum
            .scan_list
            .as_ref()
            .and_then(|list| list.scans.first())
        {
            apply_scan(config, scan, &mut record)?;
        }
        if let Some(precursor) = spectrum
            .precursor_list
            .as_ref()
            .and_then(|list| list.precursors.first())
        {
            apply_precursor(precursor, &mut record);
        }
        if let Some(list) = &spectrum.binary_data_array_list {
            decode_arrays(config, list, &mut record)?;
        }
        record.array_length = spectrum
            .default_array_length
            .unwrap_or(record.mz_array.len());
        if record.base_peak_mz == 0.0 && !record.mz_array.is_empty() {
            record.base_peak_mz = base_peak_mz(&record.mz_array, &record.intensity_array)?;
        }

        if config.mode != FilterMode::None {
            let filtered = filter_spectrum(
                config,
                record.spectrum_type.as_deref(),
                record.ms_level,
                record.polarity.as_deref(),
                record.retention_time,
                &record.mz_array,
                &record.intensity_array,
                &mut chromatograms,
            )?;
            record.base_peak_intensity = filtered.base_peak_intensity;
            record.base_peak_mz = filtered.base_peak_mz;
            record.total_ion_current = filtered.total_ion_current;
            record.mz_array = filtered.mz_values;
            record.intensity_array = filtered.intensity_values;
            record.array_length = record.mz_array.len();
        }
        if config.exclude_arrays {
            record.mz_array.clear();
            record.intensity_array.clear();
        }

        if config.accepts(
            record.spectrum_type.as_deref(),
            record.ms_level,
            record.polarity.as_deref(),
        ) {
            record.index = spectrum_count;
            spectrum_count += 1;
            let level = record.ms_level.map(f64::from);
            let trace = &mut chromatograms[tic];
            trace.time_array.push(record.retention_time);
            trace.intensity_array.push(record.total_ion_current);
            trace.ms_level_array.push(level);
            let trace = &mut chromatograms[bpc];
            trace.time_array.push(record.retention_time);
            trace.intensity_array.push(record.base_peak_intensity);
            trace.ms_level_array.push(level);
            trace.mz_array.push(record.base_peak_mz);
            out.push(record);
        }
    }
    for trace in &mut chromatograms {
        trace.array_length = Some(trace.time_array.len());
    }
    Ok(SpectrumExtraction {
        spectrum_count,
        spectra: out,
        chromatograms,
    })
}

fn apply_spectrum_params(
    config: &ExtractionConfig,
    params: &[CvParam],
    record: &mut SpectrumRecord,
) -> Result<(), ExtractError> {
    for param in params {
        let name = param.name.as_str();
        match cv::lookup(name) {
            Some(CvKey::MsLevel) => record.ms_level = param_u32(param),
            Some(CvKey::ScanType) => {
                record.scan_type = cv::mapped_value(name).map(str::to_string);
            }
            Some(CvKey::Polarity) => {
                record.polarity = cv::mapped_value(name).map(str::to_string);
            }
            Some(CvKey::SpectrumType) => {
                record.spectrum_type = cv::mapped_value(name).map(str::to_string);
            }
            Some(CvKey::BasePeakIntensity) => {
                record.base_peak_intensity = param_f64(param).unwrap_or_default();
            }
            Some(CvKey::TotalIonCurrent) => {
                record.total_ion_current = param_f64(param).unwrap_or_default();
            }
            Some(CvKey::BasePeakMz) => {
                if let Some(value) = param_f64(param) {
                    record.base_peak_mz = config.round_if_configured(value)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn apply_scan(
    config: &ExtractionConfig,
    scan: &Scan,
    record: &mut SpectrumRecord,
) -> Result<(), ExtractError> {
    for param in &scan.cv_params {
        match cv::lookup(&param.name) {
            Some(CvKey::RetentionTime) => {
                if let Some(mut value) = param_f64(param) {
                    // Retention times land in minutes.
                    if param.unit_name.as_deref() == Some("second") {
                        value /= 60.0;
                    }
                    record.retention_time = Some(config.round_if_configured(value)?);
                }
            }
            Some(CvKey::PresetScanConfiguration) => {
                record.scan_preset_configuration = param_f64(param);
            }
            Some(CvKey::InverseReducedIonMobility) => {
                record.inverse_reduced_ion_mobility = param_f64(param);
            }
            _ => {}
        }
    }
    if let Some(window) = scan
        .scan_window_list
        .as_ref()
        .and_then(|list| list.scan_windows.first())
    {
        for param in &window.cv_params {
            match cv::lookup(&param.name) {
                Some(CvKey::ScanWindowLowerLimit) => {
                    record.scan_window_lower_limit = param_f64(param);
                }
                Some(CvKey::ScanWindowUpperLimit) => {
                    record.scan_window_upper_limit = param_f64(param);
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn apply_precursor(precursor: &Precursor, record: &mut SpectrumRecord) {
    if let Some(window) = &precursor.isolation_window {
        for param in &window.cv_params {
            match cv::lookup(&param.name) {
                Some(CvKey::IsolationWindowTarget) => {
                    record.isolation_window_target = param_f64(param);
                }
                Some(CvKey::IsolationWindowLowerOffset) => {
                    record.isolation_window_lower_offset = param_f64(param);
                }
                Some(CvKey::IsolationWindowUpperOffset) => {
                    record.isolation_window_upper_offset = param_f64(param);
                }
                _ => {}
            }
        }
    }
    if let Some(ion) = precursor
        .selected_ion_list
        .as_ref()
        .and_then(|list| list.selected_ions.first())
    {
        for param in &ion.cv_params {
            if cv::lookup(&param.name) == Some(CvKey::SelectedIonMz) {
                record.selected_ion_mz = param_f64(param);
            }
        }
    }
    if let Some(activation) = &precursor.activation {
        for param in &activation.cv_params {
            let name = param.name.as_str();
            match cv::lookup(name) {
                Some(CvKey::CollisionType) => {
                    record.collision_type = cv::mapped_value(name).map(str::to_string);
                }
                Some(CvKey::CollisionEnergy) => record.collision_energy = param_f64(param),
                _ => {}
            }
        }
    }
}

/// Decodes one binary data array into numbers, keyed by the array-type
/// cvParam it carries. Arrays without a recognized type are skipped.
pub(crate) fn classify_binary_array(
    array: &BinaryDataArray,
) -> Result<Option<(CvKey, Vec<f64>)>, ExtractError> {
    let mut precision = None;
    let mut compression = None;
    let mut kind = None;
    for param in &array.cv_params {
        let name = param.name.as_str();
        match cv::lookup(name) {
            Some(CvKey::Precision) => precision = cv::precision_bits(name),
            Some(CvKey::Compression) => compression = cv::mapped_value(name),
            Some(
                key @ (CvKey::MzArray
                | CvKey::IntensityArray
                | CvKey::TimeArray
                | CvKey::MsLevelArray),
            ) => kind = Some(key),
            _ => {}
        }
    }
    let Some(kind) = kind else {
        return Ok(None);
    };
    let precision = precision.ok_or_else(|| {
        ExtractError::InvalidArgument("binary data array does not declare a precision".to_string())
    })?;
    let compression = compression.ok_or_else(|| {
        ExtractError::InvalidArgument(
            "binary data array does not declare a compression".to_string(),
        )
    })?;
    let payload = array.binary.as_deref().unwrap_or("");
    let values = decode(precision, compression, payload)?;
    Ok(Some((kind, values)))
}

fn decode_arrays(
    config: &ExtractionConfig,
    list: &BinaryDataArrayList,
    record: &mut SpectrumRecord,
) -> Result<(), ExtractError> {
    for array in &list.binary_data_arrays {
        match classify_binary_array(array)? {
            Some((CvKey::MzArray, mut values)) => {
                if config.decimal_places.is_some() {
                    for value in &mut values {
                        *value = config.round_if_configured(*value)?;
                    }
                }
                record.mz_array = values;
            }
            Some((CvKey::IntensityArray, values)) => record.intensity_array = values,
            _ => {}
        }
    }
    Ok(())
}
