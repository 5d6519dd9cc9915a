use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::extract::round::round_decimal_place;

/// Which spectrum filter runs during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterMode {
    #[default]
    None,
    Range,
    Targeted,
}

/// Metadata gate applied before a spectrum contributes to the output.
///
/// A spectrum passes only when all three fields are present on it and each
/// value is listed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumAcceptance {
    pub spectrum_types: Vec<String>,
    pub ms_levels: Vec<u32>,
    pub polarities: Vec<String>,
}

impl SpectrumAcceptance {
    pub fn accepts(
        &self,
        spectrum_type: Option<&str>,
        ms_level: Option<u32>,
        polarity: Option<&str>,
    ) -> bool {
        spectrum_type.is_some_and(|v| self.spectrum_types.iter().any(|s| s == v))
            && ms_level.is_some_and(|v| self.ms_levels.contains(&v))
            && polarity.is_some_and(|v| self.polarities.iter().any(|p| p == v))
    }
}

impl Default for SpectrumAcceptance {
    fn default() -> Self {
        SpectrumAcceptance {
            spectrum_types: vec!["profile".to_string(), "centroid".to_string()],
            ms_levels: vec![1, 2],
            polarities: vec!["positive".to_string(), "negative".to_string()],
        }
    }
}

/// Everything the extraction core needs to know about one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub mode: FilterMode,
    /// Lower m/z bound for range filtering.
    pub min_mz: f64,
    /// Upper m/z bound for range filtering. `None` means the largest m/z of
    /// each spectrum stands in.
    pub max_mz: Option<f64>,
    /// Absolute half-width used for targeted windows.
    pub mz_tolerance: f64,
    /// Relative half-width in parts per million used for targeted windows.
    pub ppm_tolerance: f64,
    /// Target m/z values for targeted filtering, ascending and deduplicated.
    pub targets: Vec<f64>,
    /// Decimal places to round m/z and retention time to. `None` disables
    /// rounding entirely.
    pub decimal_places: Option<u32>,
    /// Drop spectral arrays from the output, keeping the summaries.
    pub exclude_arrays: bool,
    /// Metadata gate. `None` accepts every spectrum.
    pub acceptance: Option<SpectrumAcceptance>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            mode: FilterMode::None,
            min_mz: 0.0,
            max_mz: None,
            mz_tolerance: 0.005,
            ppm_tolerance: 5.0,
            targets: Vec::new(),
            decimal_places: None,
            exclude_arrays: false,
            acceptance: None,
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<(), ExtractError> {
        match self.mode {
            FilterMode::None => {}
            FilterMode::Range => {
                if !self.min_mz.is_finite() {
                    return Err(ExtractError::InvalidArgument(
                        "minMZ is not a finite number".to_string(),
                    ));
                }
                if let Some(max) = self.max_mz {
                    if !max.is_finite() {
                        return Err(ExtractError::InvalidArgument(
                            "maxMZ is not a finite number".to_string(),
                        ));
                    }
                    if max <= self.min_mz {
                        return Err(ExtractError::InvalidArgument(
                            "maxMZ must be greater than minMZ".to_string(),
                        ));
                    }
                }
            }
            FilterMode::Targeted => {
                if self.targets.is_empty() {
                    return Err(ExtractError::InvalidArgument(
                        "no target m/z values configured".to_string(),
                    ));
                }
                if !self.mz_tolerance.is_finite() || self.mz_tolerance < 0.0 {
                    return Err(ExtractError::InvalidArgument(
                        "mzTolerance must be a non-negative number".to_string(),
                    ));
                }
                if !self.ppm_tolerance.is_finite() || self.ppm_tolerance < 0.0 {
                    return Err(ExtractError::InvalidArgument(
                        "ppmTolerance must be a non-negative number".to_string(),
                    ));
                }
                if self.targets.iter().any(|t| !t.is_finite()) {
                    return Err(ExtractError::InvalidArgument(
                        "target m/z values must be finite numbers".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Rounds `value` when rounding is configured, otherwise passes it through.
    pub fn round_if_configured(&self, value: f64) -> Result<f64, ExtractError> {
        match self.decimal_places {
            Some(places) => round_decimal_place(value, places),
            None => Ok(value),
        }
    }

    pub fn accepts(
        &self,
        spectrum_type: Option<&str>,
        ms_level: Option<u32>,
        polarity: Option<&str>,
    ) -> bool {
        self.acceptance
            .as_ref()
            .map_or(true, |a| a.accepts(spectrum_type, ms_level, polarity))
    }
}
