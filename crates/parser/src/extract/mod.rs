pub mod base_peak;
pub use base_peak::base_peak_mz;
pub mod chromatogram;
pub use chromatogram::{ChromatogramTrace, init_chromatograms};
pub mod config;
pub use config::{ExtractionConfig, FilterMode, SpectrumAcceptance};
pub mod cv;
pub mod filter;
pub use filter::{FilteredSpectrum, filter_spectrum};
pub mod round;
pub use round::round_decimal_place;
pub mod run;
pub use run::{MsRun, extract_run};
pub mod spectrum;
pub use spectrum::{SpectrumExtraction, SpectrumRecord, extract_spectra};
pub mod targets;
pub use targets::{TargetList, resolve_target_list};

#[cfg(test)]
mod tests;
