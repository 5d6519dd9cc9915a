use serde::{Deserialize, Serialize};

/// <mzML>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MzML {
    pub id: Option<String>,
    pub version: Option<String>,
    pub run: Run,
}

/// <run>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Run {
    pub id: String,
    pub start_time_stamp: Option<String>,
    pub default_instrument_configuration_ref: Option<String>,
    pub spectrum_list: Option<SpectrumList>,
    pub chromatogram_list: Option<ChromatogramList>,
}

/// <cvParam>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CvParam {
    pub cv_ref: Option<String>,
    pub accession: Option<String>,
    pub name: String,
    pub value: Option<String>,
    pub unit_cv_ref: Option<String>,
    pub unit_name: Option<String>,
    pub unit_accession: Option<String>,
}

/// <userParam>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserParam {
    pub name: String,
    pub r#type: Option<String>,
    pub unit_accession: Option<String>,
    pub unit_cv_ref: Option<String>,
    pub unit_name: Option<String>,
    pub value: Option<String>,
}

/// <spectrumList>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SpectrumList {
    pub count: Option<usize>,
    pub default_data_processing_ref: Option<String>,
    pub spectra: Vec<Spectrum>,
}

/// <spectrum>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Spectrum {
    // Attributes
    pub id: String,
    pub index: Option<u32>,
    pub default_array_length: Option<usize>,

    // Children
    pub cv_params: Vec<CvParam>,
    pub user_params: Vec<UserParam>,
    pub scan_list: Option<ScanList>,
    pub precursor_list: Option<PrecursorList>,
    pub binary_data_array_list: Option<BinaryDataArrayList>,
}

/// <scanList>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanList {
    pub count: Option<usize>,
    pub cv_params: Vec<CvParam>,
    pub scans: Vec<Scan>,
}

/// <scan>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Scan {
    pub instrument_configuration_ref: Option<String>,
    pub cv_params: Vec<CvParam>,
    pub user_params: Vec<UserParam>,
    pub scan_window_list: Option<ScanWindowList>,
}

/// <scanWindowList>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanWindowList {
    pub count: Option<usize>,
    pub scan_windows: Vec<ScanWindow>,
}

/// <scanWindow>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanWindow {
    pub cv_params: Vec<CvParam>,
    pub user_params: Vec<UserParam>,
}

/// <precursorList>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrecursorList {
    pub count: Option<usize>,
    pub precursors: Vec<Precursor>,
}

/// <precursor>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Precursor {
    pub spectrum_ref: Option<String>,
    pub isolation_window: Option<IsolationWindow>,
    pub selected_ion_list: Option<SelectedIonList>,
    pub activation: Option<Activation>,
}

/// <isolationWindow>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IsolationWindow {
    pub cv_params: Vec<CvParam>,
}

/// <selectedIonList>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SelectedIonList {
    pub count: Option<usize>,
    pub selected_ions: Vec<SelectedIon>,
}

/// <selectedIon>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SelectedIon {
    pub cv_params: Vec<CvParam>,
}

/// <activation>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Activation {
    pub cv_params: Vec<CvParam>,
}

/// <product>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Product {
    pub isolation_window: Option<IsolationWindow>,
}

/// <binaryDataArrayList>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BinaryDataArrayList {
    pub count: Option<usize>,
    pub binary_data_arrays: Vec<BinaryDataArray>,
}

/// <binaryDataArray>
///
/// The base64 payload text is kept verbatim; numeric decoding happens in the
/// extraction core, driven by this array's own precision/compression cvParams.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BinaryDataArray {
    pub array_length: Option<usize>,
    pub encoded_length: Option<usize>,
    pub cv_params: Vec<CvParam>,
    pub binary: Option<String>,
}

/// <chromatogramList>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChromatogramList {
    pub count: Option<usize>,
    pub default_data_processing_ref: Option<String>,
    pub chromatograms: Vec<Chromatogram>,
}

/// <chromatogram>
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Chromatogram {
    // Attributes
    pub id: String,
    pub index: Option<u32>,
    pub default_array_length: Option<usize>,

    // Children
    pub cv_params: Vec<CvParam>,
    pub user_params: Vec<UserParam>,
    pub precursor: Option<Precursor>,
    pub product: Option<Product>,
    pub binary_data_array_list: Option<BinaryDataArrayList>,
}
