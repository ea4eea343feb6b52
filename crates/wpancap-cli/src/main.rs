use std::fs;
use std::io::Write;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use glob::glob;
use log::warn;
use time::UtcOffset;
use time::macros::format_description;
use wpancap_core::{
    ConversionOptions, ConversionSummary, ConvertError, DISCOVERY_LINES, LinkType, OutputTarget,
    TimestampError, TimestampNormalizer, resolve_dialects,
};

const EXIT_FAILURE: u8 = 2;
const EXIT_NO_USABLE_SOURCE: u8 = 3;
const EXIT_EMPTY_RESULT: u8 = 4;
const EXIT_UNSUPPORTED_DIALECT: u8 = 5;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("WPANCAP_BUILD_COMMIT"),
    ", ",
    env!("WPANCAP_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  wpancap convert -i sniffer.log -o sniffer.pcap\n  wpancap convert -i 'logs/*.txt' -o merged.pcap --chunk-period 3600\n  wpancap convert --input-directory logs --output-directory pcaps --frame-check";

#[derive(Parser, Debug)]
#[command(name = "wpancap")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Converts IEEE 802.15.4 sniffer text logs into PCAP files.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one or more text logs into PCAP files.
    #[command(after_help = EXAMPLES)]
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["input_file", "input_directory"])
))]
#[command(group(
    ArgGroup::new("output")
        .required(true)
        .args(["output_file", "output_directory"])
))]
struct ConvertArgs {
    /// Log file or glob pattern; may be repeated
    #[arg(short = 'i', long, value_name = "PATH|GLOB")]
    input_file: Vec<PathBuf>,

    /// Directory whose files are all converted
    #[arg(long, value_name = "DIR")]
    input_directory: Option<PathBuf>,

    /// PCAP file receiving every source (chunks are written next to it)
    #[arg(short = 'o', long, value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// Existing directory receiving one PCAP file per source
    #[arg(long, value_name = "DIR")]
    output_directory: Option<PathBuf>,

    /// Frames end in their frame check sequence (link type 195 instead of 230)
    #[arg(long)]
    frame_check: bool,

    /// Split output into chunks of this many seconds
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    chunk_period: Option<u64>,

    /// Offset of calendar timestamps in the logs: local, utc or ±HH:MM
    #[arg(long, value_name = "OFFSET", default_value = "local", value_parser = parse_offset_arg)]
    utc_offset: OffsetArg,

    /// Print a JSON summary of the conversion to stdout
    #[arg(long)]
    summary: bool,

    /// Pretty-print the JSON summary
    #[arg(long, requires = "summary")]
    pretty: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy)]
enum OffsetArg {
    Local,
    Fixed(UtcOffset),
}

fn parse_offset_arg(text: &str) -> Result<OffsetArg, String> {
    match text.to_ascii_lowercase().as_str() {
        "local" => Ok(OffsetArg::Local),
        "utc" | "z" => Ok(OffsetArg::Fixed(UtcOffset::UTC)),
        _ => {
            let format = format_description!("[offset_hour sign:mandatory]:[offset_minute]");
            UtcOffset::parse(text, &format)
                .map(OffsetArg::Fixed)
                .map_err(|err| format!("expected local, utc or ±HH:MM ({err})"))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    // Reading the local offset is only sound while the process is single-threaded.
    let local = TimestampNormalizer::local();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Convert(args) => cmd_convert(args, local),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(err.code)
        }
    }
}

fn init_logger(verbose: u8) {
    let log_level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter(None, log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
    code: u8,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
            code: EXIT_FAILURE,
        }
    }

    fn with_code(mut self, code: u8) -> Self {
        self.code = code;
        self
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<ConvertError> for CliError {
    fn from(err: ConvertError) -> Self {
        let message = err.to_string();
        match err {
            ConvertError::UnsupportedDialect { .. } => CliError::new(
                message,
                Some("export the capture as plain hex or Daintree (.dcf) text first".to_string()),
            )
            .with_code(EXIT_UNSUPPORTED_DIALECT),
            ConvertError::NoUsableSource { .. } => CliError::new(
                message,
                Some(format!(
                    "each log needs a timestamped frame within its first {DISCOVERY_LINES} lines"
                )),
            )
            .with_code(EXIT_NO_USABLE_SOURCE),
            ConvertError::EmptyResult { .. } => CliError::new(
                message,
                Some("run with -vvv to see why lines were skipped".to_string()),
            )
            .with_code(EXIT_EMPTY_RESULT),
            _ => CliError::new(message, None),
        }
    }
}

fn cmd_convert(
    args: ConvertArgs,
    local: Result<TimestampNormalizer, TimestampError>,
) -> Result<(), CliError> {
    let inputs = collect_inputs(&args)?;
    resolve_dialects(&inputs)?;
    let target = resolve_target(&args, &inputs)?;
    let normalizer = match args.utc_offset {
        OffsetArg::Local => local.unwrap_or_else(|err| {
            warn!("{err}; reading calendar timestamps as UTC");
            TimestampNormalizer::utc()
        }),
        OffsetArg::Fixed(offset) => TimestampNormalizer::with_offset(offset),
    };

    let options = ConversionOptions::new(inputs, target)
        .with_chunk_period(args.chunk_period.and_then(NonZeroU64::new))
        .with_link_type(LinkType::from_fcs(args.frame_check))
        .with_normalizer(normalizer);
    let summary = wpancap_core::convert(&options)?;

    if args.summary {
        println!("{}", serialize_summary(&summary, args.pretty)?);
    } else if !args.quiet {
        eprintln!(
            "OK: {} records -> {} file(s)",
            summary.records_total,
            summary.outputs.len()
        );
    }
    Ok(())
}

fn serialize_summary(summary: &ConversionSummary, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(summary)
    } else {
        serde_json::to_string(summary)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn collect_inputs(args: &ConvertArgs) -> Result<Vec<PathBuf>, CliError> {
    let mut inputs = Vec::new();
    if let Some(dir) = &args.input_directory {
        inputs.extend(list_directory(dir)?);
    }
    for input in &args.input_file {
        inputs.extend(resolve_input_paths(input)?);
    }
    if inputs.is_empty() {
        return Err(CliError::new(
            "no source specified",
            Some("the input directory holds no files".to_string()),
        ));
    }
    Ok(inputs)
}

fn list_directory(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    if !dir.is_dir() {
        return Err(CliError::new(
            format!("input directory not found: {}", dir.display()),
            Some("use --input-file for single logs".to_string()),
        ));
    }
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read input directory: {}", dir.display()))?
            .path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn resolve_input_paths(input: &Path) -> Result<Vec<PathBuf>, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        if !input.is_file() {
            return Err(CliError::new(
                format!("input file not found: {}", input.display()),
                Some("check the path or quote the pattern".to_string()),
            ));
        }
        return Ok(vec![input.to_path_buf()]);
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    Ok(matches)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

fn resolve_target(args: &ConvertArgs, inputs: &[PathBuf]) -> Result<OutputTarget, CliError> {
    if let Some(dir) = &args.output_directory {
        if !dir.is_dir() {
            return Err(CliError::new(
                format!("output directory not found: {}", dir.display()),
                Some("create the directory first".to_string()),
            ));
        }
        return Ok(OutputTarget::Directory(dir.clone()));
    }

    let Some(file) = &args.output_file else {
        return Err(CliError::new(
            "missing output path",
            Some("use -o/--output-file or --output-directory".to_string()),
        ));
    };
    if file.is_dir() {
        return Err(CliError::new(
            format!("output path is a directory: {}", file.display()),
            Some("use --output-directory for per-source files".to_string()),
        ));
    }
    if let Some(parent) = file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    let output_abs = absolute_output_path(file)?;
    for input in inputs {
        let input_abs = fs::canonicalize(input)
            .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
        if input_abs == output_abs {
            return Err(CliError::new(
                format!("output path must differ from input: {}", file.display()),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(OutputTarget::File(file.clone()))
}

fn absolute_output_path(file: &Path) -> Result<PathBuf, CliError> {
    let parent = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let parent = fs::canonicalize(parent)
        .with_context(|| format!("Failed to resolve output path: {}", file.display()))?;
    let name = file
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path: {}", file.display()))?;
    Ok(parent.join(name))
}
