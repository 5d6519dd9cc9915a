use std::{
    fs,
    io::{Write, stderr, stdout},
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering},
    },
    time::Instant,
};

use chrono::Local;
use clap::{
    ArgAction, ArgGroup, ColorChoice, CommandFactory, FromArgMatches, Parser, ValueEnum,
    builder::styling::{AnsiColor, Color, Style, Styles},
};
use mimalloc::MiMalloc;
use rayon::{ThreadPoolBuilder, prelude::*};
use regex::Regex;
use serde::Serialize;

use elute::{
    ExtractionConfig, FilterMode, MsRun, SpectrumAcceptance,
    extract::round_decimal_place,
    extract_run, parse_mzml, resolve_target_list,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const VERSION: &str = "0.1.0";
const MB: f64 = 1024.0 * 1024.0;

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_GREEN: &str = "\x1b[1;32m";
const ANSI_YELLOW: &str = "\x1b[1;33m";
const ANSI_RED: &str = "\x1b[1;31m";

const AFTER_HELP: &str = "
\x1b[1;33mQUICK REFERENCE\x1b[0m (full flags are in `elute --help`)

\x1b[1;32mUSAGE:\x1b[0m
  \x1b[96melute\x1b[0m -i, --input-directory DIR
        -o, --output-directory DIR
        [-f, --output-format JSON|TSV]

\x1b[1;32mOPTIONS:\x1b[0m
  \x1b[96m-h\x1b[0m, \x1b[96m--help\x1b[0m
  \x1b[96m-v\x1b[0m, \x1b[96m--version\x1b[0m

\x1b[1;32mEXAMPLES:\x1b[0m
  \x1b[96melute\x1b[0m -i data/mzml -o out
  \x1b[96melute\x1b[0m -i data/mzml -o out -d 4 -r --min-mz 100 --max-mz 500
  \x1b[96melute\x1b[0m -i data/mzml -o out -t --target-file targets.tsv
  \x1b[96melute\x1b[0m -i data/mzml -o out -s --spectrum-type centroid --ms-level 1 2
";

fn cli_styles() -> Styles {
    Styles::styled().literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
}

#[derive(Parser)]
#[command(
    name = "elute",
    version = VERSION,
    arg_required_else_help = true,
    disable_version_flag = true,
    group(
        ArgGroup::new("filter_mode")
            .args(["targeted", "mz_range"])
            .multiple(false)
    ),
    group(
        ArgGroup::new("file_select")
            .args(["file_list", "pattern", "pattern_exact", "regex"])
            .multiple(false)
    )
)]
struct Cli {
    #[arg(short = 'v', long = "version", action = ArgAction::SetTrue)]
    version: bool,

    /// Input directory containing mzML data files
    #[arg(short = 'i', long = "input-directory", value_name = "DIR")]
    input_directory: Option<PathBuf>,

    /// Output directory
    #[arg(short = 'o', long = "output-directory", value_name = "DIR")]
    output_directory: Option<PathBuf>,

    /// Log directory (defaults to the output directory)
    #[arg(short = 'l', long = "log-directory", value_name = "DIR")]
    log_directory: Option<PathBuf>,

    /// Output format
    #[arg(
        short = 'f',
        long = "output-format",
        value_enum,
        default_value = "JSON"
    )]
    output_format: OutputFormat,

    /// File name(s) to process instead of every .mzML under the input
    /// directory
    #[arg(long = "file-list", num_args = 1.., value_name = "NAME")]
    file_list: Option<Vec<String>>,

    /// Keep files whose name contains this text (case-insensitive)
    #[arg(long = "pattern")]
    pattern: Option<String>,

    /// Keep files whose name contains this exact text
    #[arg(long = "pattern-exact")]
    pattern_exact: Option<String>,

    /// Keep files whose name matches this regular expression
    #[arg(long = "regex")]
    regex: Option<String>,

    /// Decimal places to round m/z and retention-time values to
    #[arg(short = 'd', long = "decimal-place", value_name = "N")]
    decimal_place: Option<u32>,

    /// Filter spectra for targeted m/z values
    #[arg(short = 't', long = "targeted", action = ArgAction::SetTrue)]
    targeted: bool,

    /// Target file (locally stored .tsv path or published-to-web URL)
    #[arg(long = "target-file", value_name = "PATH_OR_URL")]
    target_file: Option<String>,

    /// Accepted m/z tolerance
    #[arg(long = "mz-tolerance", default_value_t = 0.005, value_name = "N")]
    mz_tolerance: f64,

    /// Accepted mass accuracy (ppm) tolerance
    #[arg(long = "ppm-tolerance", default_value_t = 5.0, value_name = "N")]
    ppm_tolerance: f64,

    /// Filter spectra for a specific m/z range
    #[arg(short = 'r', long = "mz-range", action = ArgAction::SetTrue)]
    mz_range: bool,

    /// Minimum m/z
    #[arg(long = "min-mz", default_value_t = 0.0, value_name = "N")]
    min_mz: f64,

    /// Maximum m/z (omit to keep each spectrum's own maximum)
    #[arg(long = "max-mz", value_name = "N")]
    max_mz: Option<f64>,

    /// Gate spectra on type, MS level and polarity, and/or exclude spectral
    /// arrays
    #[arg(short = 's', long = "filter-spectrum-data", action = ArgAction::SetTrue)]
    filter_spectrum_data: bool,

    /// Spectrum type(s) to keep [default: profile centroid]
    #[arg(long = "spectrum-type", num_args = 1.., value_parser = ["profile", "centroid"])]
    spectrum_type: Vec<String>,

    /// MS level(s) to keep [default: 1 2]
    #[arg(long = "ms-level", num_args = 1.., value_parser = clap::value_parser!(u32).range(1..))]
    ms_level: Vec<u32>,

    /// Polarity type(s) to keep [default: positive negative]
    #[arg(long = "polarity", num_args = 1.., value_parser = ["positive", "negative"])]
    polarity: Vec<String>,

    /// Exclude m/z and intensity arrays from the output records
    #[arg(long = "exclude-spectra", action = ArgAction::SetTrue)]
    exclude_spectra: bool,

    /// Rewrite output files that already exist
    #[arg(long, default_value_t = false, action = ArgAction::SetTrue)]
    overwrite: bool,

    #[arg(
        long = "cores",
        default_value_t = 1u16,
        value_parser = clap::value_parser!(u16).range(1..=1024)
    )]
    cores: u16,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[value(name = "JSON")]
    Json,
    #[value(name = "TSV")]
    Tsv,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Cli::command();
    cmd = cmd
        .styles(cli_styles())
        .color(ColorChoice::Auto)
        .after_help(AFTER_HELP);

    let matches = cmd.get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if cli.version {
        println!("{VERSION}");
        return Ok(());
    }

    extract(cli).map_err(|e| e.into())
}

/// Turns the flag surface into the immutable per-run configuration,
/// rejecting flag combinations before any file is touched. Remote or local
/// target tables are resolved here, once.
fn build_config(cli: &Cli) -> Result<ExtractionConfig, String> {
    if cli.targeted && cli.target_file.is_none() {
        return Err("--target-file \"/path/to/target/file.tsv\" required".to_string());
    }
    if !cli.targeted
        && (cli.target_file.is_some() || cli.mz_tolerance != 0.005 || cli.ppm_tolerance != 5.0)
    {
        return Err(
            "-t (or --targeted) required to specify --target-file, --mz-tolerance and --ppm-tolerance"
                .to_string(),
        );
    }
    if !cli.mz_range && (cli.min_mz != 0.0 || cli.max_mz.is_some()) {
        return Err("-r (or --mz-range) required to specify --min-mz and --max-mz".to_string());
    }
    if let Some(max) = cli.max_mz {
        if max <= cli.min_mz {
            return Err("--max-mz value needs to be greater than --min-mz value".to_string());
        }
    }
    if !cli.filter_spectrum_data
        && (!cli.spectrum_type.is_empty()
            || !cli.ms_level.is_empty()
            || !cli.polarity.is_empty()
            || cli.exclude_spectra)
    {
        return Err(
            "-s (or --filter-spectrum-data) required to specify --spectrum-type, --ms-level, --polarity and --exclude-spectra"
                .to_string(),
        );
    }
    let mut levels = cli.ms_level.clone();
    levels.sort_unstable();
    levels.dedup();
    if levels.len() != cli.ms_level.len() {
        return Err("--ms-level values specified are not unique".to_string());
    }

    let mut config = ExtractionConfig {
        decimal_places: cli.decimal_place,
        ..ExtractionConfig::default()
    };

    if cli.filter_spectrum_data {
        let defaults = SpectrumAcceptance::default();
        config.acceptance = Some(SpectrumAcceptance {
            spectrum_types: if cli.spectrum_type.is_empty() {
                defaults.spectrum_types
            } else {
                cli.spectrum_type.clone()
            },
            ms_levels: if cli.ms_level.is_empty() {
                defaults.ms_levels
            } else {
                cli.ms_level.clone()
            },
            polarities: if cli.polarity.is_empty() {
                defaults.polarities
            } else {
                cli.polarity.clone()
            },
        });
        config.exclude_arrays = cli.exclude_spectra;
    }

    if let Some(source) = cli.target_file.as_deref() {
        let levels = config
            .acceptance
            .as_ref()
            .map(|acceptance| acceptance.ms_levels.as_slice());
        let targets = resolve_target_list(source, levels, cli.mz_tolerance, cli.decimal_place)
            .map_err(|e| e.to_string())?;
        config.mode = FilterMode::Targeted;
        config.mz_tolerance = cli.mz_tolerance;
        config.ppm_tolerance = cli.ppm_tolerance;
        config.min_mz = targets.min_mz;
        config.max_mz = Some(targets.max_mz);
        config.targets = targets.values;
    } else if cli.mz_range {
        config.mode = FilterMode::Range;
        config.min_mz = cli.min_mz;
        config.max_mz = cli.max_mz;
        if let Some(places) = cli.decimal_place {
            config.min_mz =
                round_decimal_place(config.min_mz, places).map_err(|e| e.to_string())?;
            if let Some(max) = config.max_mz {
                config.max_mz =
                    Some(round_decimal_place(max, places).map_err(|e| e.to_string())?);
            }
        }
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

struct ExtractContext<'a> {
    config: &'a ExtractionConfig,
    input_root: &'a Path,
    output_root: &'a Path,
    output_format: OutputFormat,
    overwrite: bool,
    log: &'a Mutex<fs::File>,
}

enum FileOutcome {
    Written { label: String, in_mb: f64, out_mb: f64 },
    Skipped { label: String, in_mb: f64, out_mb: f64 },
}

fn extract(cli: Cli) -> Result<(), String> {
    let cwd = std::env::current_dir().map_err(|e| format!("get current dir failed: {e}"))?;

    let Some(input) = cli.input_directory.as_deref() else {
        return Err("-i (or --input-directory) \"/path/to/input/directory/\" required".to_string());
    };
    let Some(output) = cli.output_directory.as_deref() else {
        return Err(
            "-o (or --output-directory) \"/path/to/output/directory/\" required".to_string(),
        );
    };
    let input_root = resolve_user_path(&cwd, input);
    let output_root = resolve_user_path(&cwd, output);
    if !input_root.is_dir() {
        return Err(format!(
            "input directory does not exist: {}",
            input_root.display()
        ));
    }

    let config = build_config(&cli)?;

    fs::create_dir_all(&output_root).map_err(|e| format!("create output dir failed: {e}"))?;
    if cli.output_format == OutputFormat::Tsv {
        fs::create_dir_all(output_root.join("spectrum"))
            .map_err(|e| format!("create output dir failed: {e}"))?;
        fs::create_dir_all(output_root.join("chromatogram"))
            .map_err(|e| format!("create output dir failed: {e}"))?;
    }
    let log_root = cli
        .log_directory
        .as_deref()
        .map(|p| resolve_user_path(&cwd, p))
        .unwrap_or_else(|| output_root.clone());
    fs::create_dir_all(&log_root).map_err(|e| format!("create log dir failed: {e}"))?;
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_root.join("log.txt"))
        .map_err(|e| format!("open log failed: {e}"))?;
    let log = Mutex::new(log_file);

    let params =
        serde_json::to_string_pretty(&config).map_err(|e| format!("log parameters failed: {e}"))?;
    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    append_log(&log, &format!("{stamp}\tparameters\n{params}\n"))?;

    let filter = build_name_filter(
        cli.pattern.as_deref(),
        cli.pattern_exact.as_deref(),
        cli.regex.as_deref(),
    )?;
    let files: Vec<PathBuf> = match &cli.file_list {
        Some(names) => names.iter().map(|name| input_root.join(name)).collect(),
        None => collect_mzml_files(&input_root, filter.as_deref())?,
    };
    if files.is_empty() {
        return Err(format!(
            "no matching .mzML files found under {}",
            input_root.display()
        ));
    }
    let total = files.len();

    let pool = ThreadPoolBuilder::new()
        .num_threads(cli.cores as usize)
        .build()
        .map_err(|e| format!("rayon thread pool init failed: {e}"))?;

    let t_all = Instant::now();

    let ctx = ExtractContext {
        config: &config,
        input_root: &input_root,
        output_root: &output_root,
        output_format: cli.output_format,
        overwrite: cli.overwrite,
        log: &log,
    };

    let print_lock = Mutex::new(());
    let done = AtomicUsize::new(0);
    let ok = AtomicU32::new(0);
    let failed = AtomicU32::new(0);
    let skipped = AtomicU32::new(0);
    let had_failed = AtomicBool::new(false);
    let failed_files: Mutex<Vec<String>> = Mutex::new(Vec::new());

    pool.install(|| {
        files.par_iter().for_each(|in_path| {
            let t0 = Instant::now();
            match process_file(&ctx, in_path) {
                Ok(FileOutcome::Written {
                    label,
                    in_mb,
                    out_mb,
                }) => {
                    ok.fetch_add(1, Ordering::Relaxed);
                    let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                    let elapsed_s = t0.elapsed().as_secs_f64();
                    let _g = print_lock.lock().unwrap_or_else(|e| e.into_inner());
                    println!(
                        "{ANSI_GREEN}[ok]{ANSI_RESET} [{}/{}] output: {}  input={:.2} MB, output={:.2} MB, time={:.3}s",
                        n, total, label, in_mb, out_mb, elapsed_s
                    );
                    let _ = stdout().flush();
                }
                Ok(FileOutcome::Skipped {
                    label,
                    in_mb,
                    out_mb,
                }) => {
                    skipped.fetch_add(1, Ordering::Relaxed);
                    let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                    let _g = print_lock.lock().unwrap_or_else(|e| e.into_inner());
                    println!(
                        "{ANSI_YELLOW}[skip]{ANSI_RESET} [{}/{}] {}  input={:.2} MB, output={:.2} MB",
                        n, total, label, in_mb, out_mb
                    );
                    let _ = stdout().flush();
                }
                Err(e) => {
                    had_failed.store(true, Ordering::Relaxed);
                    failed.fetch_add(1, Ordering::Relaxed);
                    let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                    let name = basename(in_path);
                    failed_files
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .push(name.to_string());
                    let _g = print_lock.lock().unwrap_or_else(|e| e.into_inner());
                    eprintln!(
                        "{ANSI_RED}[error]{ANSI_RESET} [{}/{}] {}: {e}",
                        n, total, name
                    );
                    let _ = stderr().flush();
                }
            }
        })
    });

    let ok = ok.load(Ordering::Relaxed);
    let failed = failed.load(Ordering::Relaxed);
    let skipped = skipped.load(Ordering::Relaxed);

    let names = failed_files
        .into_inner()
        .unwrap_or_else(|e| e.into_inner());
    append_log(&log, &format!("Failed files: [{}]\n\n", names.join(", ")))?;

    let d = t_all.elapsed();
    let total_secs = d.as_secs();
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;

    println!(
        "extracted_ok={ok} extracted_failed={failed} extracted_skipped={skipped} total_time={:02}:{:02}:{:02}",
        h, m, s
    );

    if had_failed.load(Ordering::Relaxed) {
        return Err("some files failed".to_string());
    }
    Ok(())
}

/// Extracts one mzML file into its output artifact(s) and appends a log
/// line. Returns the outcome for reporting; any failure leaves no partial
/// accounting behind.
fn process_file(ctx: &ExtractContext, in_path: &Path) -> Result<FileOutcome, String> {
    let rel = in_path
        .strip_prefix(ctx.input_root)
        .map_err(|_| "cannot make relative path".to_string())?;
    let parent_rel = rel.parent().unwrap_or_else(|| Path::new(""));
    let stem = in_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| "file name is not valid UTF-8".to_string())?;

    let outputs: Vec<PathBuf> = match ctx.output_format {
        OutputFormat::Json => vec![
            ctx.output_root
                .join(parent_rel)
                .join(format!("{stem}.json")),
        ],
        OutputFormat::Tsv => vec![
            ctx.output_root
                .join("spectrum")
                .join(parent_rel)
                .join(format!("{stem}.tsv")),
            ctx.output_root
                .join("chromatogram")
                .join(parent_rel)
                .join(format!("{stem}.tsv")),
        ],
    };
    let label = basename(&outputs[0]).to_string();

    if !ctx.overwrite {
        let mut out_len = 0u64;
        let complete = outputs.iter().all(|p| match fs::metadata(p) {
            Ok(m) if m.is_file() && m.len() > 0 => {
                out_len += m.len();
                true
            }
            _ => false,
        });
        if complete {
            let in_mb = fs::metadata(in_path)
                .map(|m| m.len() as f64 / MB)
                .unwrap_or(0.0);
            return Ok(FileOutcome::Skipped {
                label,
                in_mb,
                out_mb: out_len as f64 / MB,
            });
        }
    }

    for out_path in &outputs {
        if let Some(dir) = out_path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("create output dir failed: {e}"))?;
        }
    }

    let bytes = fs::read(in_path).map_err(|e| format!("read failed: {e}"))?;
    let mzml = parse_mzml(&bytes).map_err(|e| format!("parse failed: {e}"))?;
    let run = extract_run(ctx.config, &mzml).map_err(|e| format!("extract failed: {e}"))?;

    let out_bytes = match ctx.output_format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&run).map_err(|e| format!("serialize failed: {e}"))?;
            fs::write(&outputs[0], json.as_bytes()).map_err(|e| format!("write failed: {e}"))?;
            json.len() as u64
        }
        OutputFormat::Tsv => {
            write_spectrum_tsv(&outputs[0], &run)? + write_chromatogram_tsv(&outputs[1], &run)?
        }
    };

    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let file_name = basename(in_path);
    append_log(ctx.log, &format!("{stamp}\t{file_name}\n"))?;

    Ok(FileOutcome::Written {
        label,
        in_mb: bytes.len() as f64 / MB,
        out_mb: out_bytes as f64 / MB,
    })
}

const SPECTRUM_COLUMNS: [&str; 27] = [
    "sampleID",
    "date",
    "time",
    "spectrumCount",
    "index",
    "scanID",
    "arrayLength",
    "type",
    "msLevel",
    "scanType",
    "polarity",
    "retentionTime",
    "scanPresetConfiguration",
    "inverseReducedIonMobility",
    "scanWindowLowerLimit",
    "scanWindowUpperLimit",
    "isolationWindowTarget",
    "isolationWindowLowerOffset",
    "isolationWindowUpperOffset",
    "selectedIonMZ",
    "collisionType",
    "collisionEnergy",
    "basePeakIntensity",
    "basePeakMZ",
    "totalIonCurrent",
    "mzArray",
    "intensityArray",
];

const CHROMATOGRAM_COLUMNS: [&str; 18] = [
    "sampleID",
    "date",
    "time",
    "chromatogramCount",
    "index",
    "id",
    "arrayLength",
    "type",
    "polarity",
    "dwellTime",
    "precursorIsolationWindowTarget",
    "collisionType",
    "collisionEnergy",
    "productIsolationWindowTarget",
    "timeArray",
    "intensityArray",
    "msLevelArray",
    "mzArray",
];

fn opt_num<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

fn opt_str(value: Option<&str>) -> String {
    value.unwrap_or("null").to_string()
}

fn json_cell<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("serialize failed: {e}"))
}

fn write_spectrum_tsv(path: &Path, run: &MsRun) -> Result<u64, String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)
        .map_err(|e| format!("write failed: {e}"))?;
    writer
        .write_record(SPECTRUM_COLUMNS)
        .map_err(|e| format!("write failed: {e}"))?;

    let sample_id = opt_str(run.sample_id.as_deref());
    let date = opt_str(run.date.as_deref());
    let time = opt_str(run.time.as_deref());

    if run.spectrum.is_empty() {
        writer
            .write_record([
                sample_id.clone(),
                date.clone(),
                time.clone(),
                run.spectrum_count.to_string(),
            ])
            .map_err(|e| format!("write failed: {e}"))?;
    }
    for record in &run.spectrum {
        writer
            .write_record([
                sample_id.clone(),
                date.clone(),
                time.clone(),
                run.spectrum_count.to_string(),
                record.index.to_string(),
                record.scan_id.clone(),
                record.array_length.to_string(),
                opt_str(record.spectrum_type.as_deref()),
                opt_num(record.ms_level),
                opt_str(record.scan_type.as_deref()),
                opt_str(record.polarity.as_deref()),
                opt_num(record.retention_time),
                opt_num(record.scan_preset_configuration),
                opt_num(record.inverse_reduced_ion_mobility),
                opt_num(record.scan_window_lower_limit),
                opt_num(record.scan_window_upper_limit),
                opt_num(record.isolation_window_target),
                opt_num(record.isolation_window_lower_offset),
                opt_num(record.isolation_window_upper_offset),
                opt_num(record.selected_ion_mz),
                opt_str(record.collision_type.as_deref()),
                opt_num(record.collision_energy),
                record.base_peak_intensity.to_string(),
                record.base_peak_mz.to_string(),
                record.total_ion_current.to_string(),
                json_cell(&record.mz_array)?,
                json_cell(&record.intensity_array)?,
            ])
            .map_err(|e| format!("write failed: {e}"))?;
    }
    writer.flush().map_err(|e| format!("write failed: {e}"))?;
    drop(writer);
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| format!("write failed: {e}"))
}

fn write_chromatogram_tsv(path: &Path, run: &MsRun) -> Result<u64, String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|e| format!("write failed: {e}"))?;
    writer
        .write_record(CHROMATOGRAM_COLUMNS)
        .map_err(|e| format!("write failed: {e}"))?;

    let sample_id = opt_str(run.sample_id.as_deref());
    let date = opt_str(run.date.as_deref());
    let time = opt_str(run.time.as_deref());

    for trace in &run.chromatogram {
        writer
            .write_record([
                sample_id.clone(),
                date.clone(),
                time.clone(),
                run.chromatogram_count.to_string(),
                trace.index.to_string(),
                trace.id.clone(),
                opt_num(trace.array_length),
                opt_str(trace.trace_type.as_deref()),
                opt_str(trace.polarity.as_deref()),
                opt_num(trace.dwell_time),
                opt_num(trace.precursor_isolation_window_target),
                opt_str(trace.collision_type.as_deref()),
                opt_num(trace.collision_energy),
                opt_num(trace.product_isolation_window_target),
                json_cell(&trace.time_array)?,
                json_cell(&trace.intensity_array)?,
                json_cell(&trace.ms_level_array)?,
                json_cell(&trace.mz_array)?,
            ])
            .map_err(|e| format!("write failed: {e}"))?;
    }
    writer.flush().map_err(|e| format!("write failed: {e}"))?;
    drop(writer);
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| format!("write failed: {e}"))
}

fn append_log(log: &Mutex<fs::File>, line: &str) -> Result<(), String> {
    let mut file = log.lock().unwrap_or_else(|e| e.into_inner());
    file.write_all(line.as_bytes())
        .map_err(|e| format!("write log failed: {e}"))
}

fn build_name_filter(
    pattern: Option<&str>,
    pattern_exact: Option<&str>,
    regex: Option<&str>,
) -> Result<Option<Box<dyn Fn(&str) -> bool + Send + Sync>>, String> {
    if let Some(p) = pattern {
        let needle = p.to_lowercase();
        return Ok(Some(Box::new(move |name: &str| {
            name.to_lowercase().contains(&needle)
        })));
    }

    if let Some(p) = pattern_exact {
        let needle = p.to_string();
        return Ok(Some(Box::new(move |name: &str| name.contains(&needle))));
    }

    if let Some(r) = regex {
        let re = Regex::new(r).map_err(|e| format!("invalid regex: {e}"))?;
        return Ok(Some(Box::new(move |name: &str| re.is_match(name))));
    }

    Ok(None)
}

fn collect_mzml_files(
    input_root: &Path,
    name_filter: Option<&(dyn Fn(&str) -> bool + Send + Sync)>,
) -> Result<Vec<PathBuf>, String> {
    let mut out = Vec::new();
    let mut stack = vec![input_root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| format!("read dir failed: {e}"))?;
        for entry in entries {
            let entry = entry.map_err(|e| format!("read dir entry failed: {e}"))?;
            let p = entry.path();
            if p.is_dir() {
                stack.push(p);
                continue;
            }
            if !p.is_file() {
                continue;
            }
            if file_ext_lower(&p) != "mzml" {
                continue;
            }
            let name = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
            if name.starts_with("._") {
                continue;
            }
            if let Some(f) = name_filter {
                if !f(name) {
                    continue;
                }
            }
            out.push(p);
        }
    }

    out.sort();
    Ok(out)
}

fn file_ext_lower(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn resolve_user_path(cwd: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        cwd.join(p)
    }
}

#[inline]
fn basename(p: &Path) -> std::borrow::Cow<'_, str> {
    p.file_name()
        .unwrap_or_else(|| p.as_os_str())
        .to_string_lossy()
}
