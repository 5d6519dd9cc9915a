use hashbrown::HashMap;
use once_cell::sync::Lazy;

/// Normalized destination of one controlled-vocabulary or user-param name.
///
/// Unknown names map to nothing and are ignored by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CvKey {
    MsLevel,
    ScanType,
    Polarity,
    BasePeakIntensity,
    TotalIonCurrent,
    SpectrumType,
    BasePeakMz,
    RetentionTime,
    PresetScanConfiguration,
    InverseReducedIonMobility,
    ScanWindowLowerLimit,
    ScanWindowUpperLimit,
    IsolationWindowTarget,
    IsolationWindowLowerOffset,
    IsolationWindowUpperOffset,
    SelectedIonMz,
    CollisionEnergy,
    CollisionType,
    MzArray,
    IntensityArray,
    TimeArray,
    Precision,
    Compression,
    ChromatogramType,
    DwellTime,
    MsLevelArray,
}

static KEY_MAP: Lazy<HashMap<&'static str, CvKey>> = Lazy::new(|| {
    HashMap::from([
        ("ms level", CvKey::MsLevel),
        ("MS1 spectrum", CvKey::ScanType),
        ("MSn spectrum", CvKey::ScanType),
        ("positive scan", CvKey::Polarity),
        ("negative scan", CvKey::Polarity),
        ("base peak intensity", CvKey::BasePeakIntensity),
        ("total ion current", CvKey::TotalIonCurrent),
        ("profile spectrum", CvKey::SpectrumType),
        ("centroid spectrum", CvKey::SpectrumType),
        ("base peak m/z", CvKey::BasePeakMz),
        ("scan start time", CvKey::RetentionTime),
        ("preset scan configuration", CvKey::PresetScanConfiguration),
        ("inverse reduced ion mobility", CvKey::InverseReducedIonMobility),
        ("scan window lower limit", CvKey::ScanWindowLowerLimit),
        ("scan window upper limit", CvKey::ScanWindowUpperLimit),
        ("isolation window target m/z", CvKey::IsolationWindowTarget),
        ("isolation window lower offset", CvKey::IsolationWindowLowerOffset),
        ("isolation window upper offset", CvKey::IsolationWindowUpperOffset),
        ("selected ion m/z", CvKey::SelectedIonMz),
        ("collision energy", CvKey::CollisionEnergy),
        ("beam-type collision-induced dissociation", CvKey::CollisionType),
        ("in-source collision-induced dissociation", CvKey::CollisionType),
        ("collision-induced dissociation", CvKey::CollisionType),
        ("m/z array", CvKey::MzArray),
        ("intensity array", CvKey::IntensityArray),
        ("time array", CvKey::TimeArray),
        ("64-bit float", CvKey::Precision),
        ("32-bit float", CvKey::Precision),
        ("64-bit integer", CvKey::Precision),
        ("32-bit integer", CvKey::Precision),
        ("no compression", CvKey::Compression),
        ("zlib compression", CvKey::Compression),
        ("total ion current chromatogram", CvKey::ChromatogramType),
        ("basepeak chromatogram", CvKey::ChromatogramType),
        (
            "selected reaction monitoring chromatogram",
            CvKey::ChromatogramType,
        ),
        ("MS_dwell_time", CvKey::DwellTime),
        ("non-standard data array", CvKey::MsLevelArray),
    ])
});

static VALUE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("MS1 spectrum", "MS1"),
        ("MSn spectrum", "MSn"),
        ("positive scan", "positive"),
        ("negative scan", "negative"),
        ("profile spectrum", "profile"),
        ("centroid spectrum", "centroid"),
        (
            "beam-type collision-induced dissociation",
            "beam-type collision-induced dissociation",
        ),
        (
            "in-source collision-induced dissociation",
            "in-source collision-induced dissociation",
        ),
        ("collision-induced dissociation", "collision-induced dissociation"),
        ("no compression", "none"),
        ("zlib compression", "zlib"),
        (
            "total ion current chromatogram",
            "total ion current chromatogram",
        ),
        ("basepeak chromatogram", "base peak chromatogram"),
        (
            "selected reaction monitoring chromatogram",
            "selected reaction monitoring chromatogram",
        ),
    ])
});

pub fn lookup(name: &str) -> Option<CvKey> {
    KEY_MAP.get(name).copied()
}

/// Fixed replacement literal for names whose normalized value is not the
/// cvParam's own value attribute.
pub fn mapped_value(name: &str) -> Option<&'static str> {
    VALUE_MAP.get(name).copied()
}

/// Bit width announced by a precision-tagged name.
pub fn precision_bits(name: &str) -> Option<u32> {
    match name {
        "64-bit float" | "64-bit integer" => Some(64),
        "32-bit float" | "32-bit integer" => Some(32),
        _ => None,
    }
}
