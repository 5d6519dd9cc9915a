use thiserror::Error;

/// Failure modes of the extraction pipeline.
///
/// Every fallible function in this crate fails fast with one of these kinds;
/// nothing is swallowed below the per-file orchestration boundary.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A value outside its allowed set (precision, compression, tolerances,
    /// array shapes).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A target source that matches neither the URL nor the TSV file pattern.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// The target table lacks required column headers.
    #[error("missing column headers - {0}")]
    MissingColumns(String),

    /// The target table or the resolved target list holds no usable values.
    #[error("no data: {0}")]
    NoData(String),

    /// Base64 or zlib payload that cannot be decoded.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// Structural errors reported by the mzML reader.
    #[error("malformed mzML: {0}")]
    MalformedDocument(String),
}
