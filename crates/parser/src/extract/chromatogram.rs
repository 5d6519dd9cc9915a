use serde::Serialize;

use crate::extract::config::{ExtractionConfig, FilterMode};

/// One chromatogram of the output run.
///
/// Time and ms-level entries are optional per point because document
/// chromatograms and spectrum-fed traces do not always carry them; absent
/// entries serialize as null.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromatogramTrace {
    pub index: usize,
    pub id: String,
    pub array_length: Option<usize>,
    #[serde(rename = "type")]
    pub trace_type: Option<String>,
    pub polarity: Option<String>,
    pub dwell_time: Option<f64>,
    pub precursor_isolation_window_target: Option<f64>,
    pub collision_type: Option<String>,
    pub collision_energy: Option<f64>,
    pub product_isolation_window_target: Option<f64>,
    pub time_array: Vec<Option<f64>>,
    pub intensity_array: Vec<f64>,
    pub ms_level_array: Vec<Option<f64>>,
    pub mz_array: Vec<f64>,
}

impl ChromatogramTrace {
    fn new(index: usize, id: String, trace_type: &str) -> Self {
        ChromatogramTrace {
            index,
            id,
            trace_type: Some(trace_type.to_string()),
            ..ChromatogramTrace::default()
        }
    }
}

/// Builds the empty traces a spectrum-bearing run starts from.
///
/// TIC sits at index 0 and BPC at index 1. Targeted extraction adds one EIC
/// per target from index 2 onward, in target order.
pub fn init_chromatograms(config: &ExtractionConfig) -> Vec<ChromatogramTrace> {
    let mut traces = vec![
        ChromatogramTrace::new(0, "TIC".to_string(), "total ion current chromatogram"),
        ChromatogramTrace::new(1, "BPC".to_string(), "base peak chromatogram"),
    ];
    if config.mode == FilterMode::Targeted {
        for (i, target) in config.targets.iter().enumerate() {
            traces.push(ChromatogramTrace::new(
                2 + i,
                format!("EIC {target}"),
                "extracted ion chromatogram",
            ));
        }
    }
    traces
}
