pub mod error;
pub use error::ExtractError;
pub mod codec;
pub use codec::{decode, encode};
pub mod mzml;
pub use mzml::{parse_mzml, structs::*};
pub mod extract;
pub use extract::{
    ExtractionConfig, FilterMode, MsRun, SpectrumAcceptance, extract_run, resolve_target_list,
};
