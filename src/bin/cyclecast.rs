//! cyclecast CLI - Command-line interface for Cycle Forecast
//!
//! Commands:
//! - predict: Forecast from a cycle history file
//! - validate: Validate cycle records
//! - doctor: Diagnose configuration
//! - schema: Print input/output schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use cycle_forecast::schema::{RawCycleRecord, RecordAdapter, ValidationResult, SCHEMA_VERSION};
use cycle_forecast::{
    dates, logging, Config, ForecastEncoder, Forecaster, OutputFormat, FORECAST_VERSION,
    PRODUCER_NAME,
};

/// cyclecast - Deterministic menstrual cycle forecasts
#[derive(Parser)]
#[command(name = "cyclecast")]
#[command(version = FORECAST_VERSION)]
#[command(about = "Forecast cycle events from recorded cycle history", long_about = None)]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/cyclecast/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overrides the config file; RUST_LOG overrides both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast from a cycle history (records oldest first, most recent last)
    Predict {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Date to forecast for (YYYY-MM-DD); defaults to today's local date
        #[arg(long)]
        today: Option<String>,

        /// Output format (overrides the config file)
        #[arg(long)]
        output_format: Option<OutputFormat>,

        /// Most recent records to consider, 0 for all (overrides the config file)
        #[arg(long)]
        history_limit: Option<usize>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate cycle records
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,

        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// JSON array of records
    Json,
    /// Newline-delimited JSON (one record per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (cycle.record.v1)
    Input,
    /// Output schema (forecast)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CycleCliError> {
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    // Doctor reports config problems instead of failing on them
    if let Commands::Doctor { json } = cli.command {
        logging::init_with_level(cli.log_level.as_deref().unwrap_or("warn"));
        return cmd_doctor(cli.config.as_deref(), json);
    }

    let config = loaded?;
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(config.logging.level.as_str());
    logging::init_with_level(level);

    match cli.config.clone().or_else(Config::default_config_path) {
        Some(path) if path.exists() => tracing::info!("Loaded config from {:?}", path),
        Some(path) => tracing::info!("No config file found at {:?}, using defaults", path),
        None => tracing::info!("No config directory available, using defaults"),
    }

    match cli.command {
        Commands::Predict {
            input,
            input_format,
            today,
            output_format,
            history_limit,
            output,
        } => cmd_predict(
            &config,
            &input,
            input_format,
            today.as_deref(),
            output_format,
            history_limit,
            output.as_deref(),
        ),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Doctor { json } => cmd_doctor(cli.config.as_deref(), json),

        Commands::Schema {
            schema_type,
            json_schema,
        } => cmd_schema(schema_type, json_schema),
    }
}

fn cmd_predict(
    config: &Config,
    input: &Path,
    input_format: InputFormat,
    today: Option<&str>,
    output_format: Option<OutputFormat>,
    history_limit: Option<usize>,
    output: Option<&Path>,
) -> Result<(), CycleCliError> {
    let raw = read_records(input, input_format)?;

    // The only place a clock is read
    let today = match today {
        Some(value) => dates::parse_date(value)?,
        None => local_today(),
    };

    let forecaster = match history_limit {
        Some(limit) => Forecaster::with_history_limit(limit),
        None => Forecaster::from_config(config),
    };
    let format = output_format.unwrap_or(config.output.format);

    tracing::info!(
        records = raw.len(),
        history_limit = ?forecaster.history_limit(),
        today = %dates::format_date(today),
        "computing forecast"
    );

    let prediction = forecaster.predict_raw(&raw, today)?;
    if prediction.is_insufficient() {
        tracing::warn!("fewer than 3 cycles in the history window, no forecast produced");
    }

    let output_data = ForecastEncoder::new(format).encode_line(&prediction)?;

    match output {
        Some(path) if path.to_string_lossy() != "-" => fs::write(path, output_data)?,
        _ => {
            let mut stdout = io::stdout();
            stdout.write_all(output_data.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), CycleCliError> {
    let raw = read_records(input, input_format)?;
    let results = RecordAdapter::validate_records(&raw);

    let report = ValidationReport {
        total_records: raw.len(),
        valid_records: raw.len() - results.len(),
        invalid_records: results.len(),
        errors: results.iter().map(ValidationErrorDetail::from).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Record {} (startDate {:?}): {}",
                    err.index, err.start_date, err.error
                );
            }
        }
    }

    if report.invalid_records > 0 {
        Err(CycleCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

fn cmd_doctor(config_path: Option<&Path>, json: bool) -> Result<(), CycleCliError> {
    let mut checks: Vec<DoctorCheck> = vec![
        DoctorCheck {
            name: "version".to_string(),
            status: CheckStatus::Ok,
            message: format!("{} {}", PRODUCER_NAME, FORECAST_VERSION),
        },
        DoctorCheck {
            name: "schema_version".to_string(),
            status: CheckStatus::Ok,
            message: format!("Input schema: {}", SCHEMA_VERSION),
        },
    ];

    let resolved = config_path
        .map(Path::to_path_buf)
        .or_else(Config::default_config_path);

    let config_check = match resolved {
        Some(path) if path.exists() => match Config::load_from(&path) {
            Ok(config) => DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Ok,
                message: format!(
                    "{} is valid (history_limit = {}, output = {:?})",
                    path.display(),
                    config.forecast.history_limit,
                    config.output.format
                ),
            },
            Err(e) => DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Error,
                message: format!("{}: {}", path.display(), e),
            },
        },
        Some(path) => DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Warning,
            message: format!("{} does not exist, using defaults", path.display()),
        },
        None => DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Warning,
            message: "No config directory available, using defaults".to_string(),
        },
    };
    checks.push(config_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: FORECAST_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("cyclecast Doctor Report");
        println!("=======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(CycleCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType, json_schema: bool) -> Result<(), CycleCliError> {
    match schema_type {
        SchemaType::Input => {
            if json_schema {
                println!("{}", input_json_schema());
            } else {
                println!("Input Schema: {}", SCHEMA_VERSION);
                println!();
                println!("A cycle history is an ordered list of records, oldest first:");
                println!();
                println!("- startDate: first day of the cycle (YYYY-MM-DD or RFC 3339 timestamp)");
                println!("- durationDays (alias: duration): cycle length in days, > 0");
                println!();
                println!("The last record is the reference cycle. At least 3 records are");
                println!("needed for a forecast.");
            }
        }
        SchemaType::Output => {
            if json_schema {
                println!("{}", output_json_schema());
            } else {
                println!("Output Schema: forecast");
                println!();
                println!("Either {{ \"status\": \"insufficient_data\" }} or:");
                println!();
                println!("- nextPeriodDate: YYYY-MM-DD");
                println!("- ovulationStatus: Ovulation not soon | Ovulation approaching | Ovulating today | Ovulation passed");
                println!("- pregnancyChance: High | Low");
                println!("- daysBeforePeriod: Period started | Period starting soon | <n> days until period");
                println!("- currentPhase: Menstruation | Follicular Phase | Ovulation Window | Luteal Phase");
                println!("- cycleStatistics: {{ averageLengthDays, lastPeriodStartDate, nextPredictedDate }}");
            }
        }
    }

    Ok(())
}

// Helper functions

fn read_records(input: &Path, format: InputFormat) -> Result<Vec<RawCycleRecord>, CycleCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let records = match format {
        InputFormat::Json => RecordAdapter::parse_array(&input_data)?,
        InputFormat::Ndjson => RecordAdapter::parse_ndjson(&input_data)?,
    };

    tracing::debug!(path = %input.display(), count = records.len(), "read cycle records");
    Ok(records)
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn input_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": SCHEMA_VERSION,
        "description": "Ordered cycle history, most recent record last",
        "type": "array",
        "items": {
            "type": "object",
            "required": ["startDate"],
            "properties": {
                "startDate": { "type": "string" },
                "durationDays": { "type": "integer", "minimum": 1 },
                "duration": { "type": "integer", "minimum": 1 }
            }
        }
    })
    .to_string()
}

fn output_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "forecast",
        "oneOf": [
            {
                "type": "object",
                "required": ["status"],
                "properties": { "status": { "const": "insufficient_data" } }
            },
            {
                "type": "object",
                "required": [
                    "nextPeriodDate", "ovulationStatus", "pregnancyChance",
                    "daysBeforePeriod", "currentPhase", "cycleStatistics"
                ],
                "properties": {
                    "nextPeriodDate": { "type": "string", "format": "date" },
                    "ovulationStatus": {
                        "enum": [
                            "Ovulation not soon", "Ovulation approaching",
                            "Ovulating today", "Ovulation passed"
                        ]
                    },
                    "pregnancyChance": { "enum": ["High", "Low"] },
                    "daysBeforePeriod": { "type": "string" },
                    "currentPhase": {
                        "enum": [
                            "Menstruation", "Follicular Phase",
                            "Ovulation Window", "Luteal Phase"
                        ]
                    },
                    "cycleStatistics": {
                        "type": "object",
                        "properties": {
                            "averageLengthDays": { "type": "integer" },
                            "lastPeriodStartDate": { "type": "string", "format": "date" },
                            "nextPredictedDate": { "type": "string", "format": "date" }
                        }
                    }
                }
            }
        ]
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum CycleCliError {
    Io(io::Error),
    Forecast(cycle_forecast::ForecastError),
    Json(serde_json::Error),
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for CycleCliError {
    fn from(e: io::Error) -> Self {
        CycleCliError::Io(e)
    }
}

impl From<cycle_forecast::ForecastError> for CycleCliError {
    fn from(e: cycle_forecast::ForecastError) -> Self {
        CycleCliError::Forecast(e)
    }
}

impl From<serde_json::Error> for CycleCliError {
    fn from(e: serde_json::Error) -> Self {
        CycleCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CycleCliError> for CliError {
    fn from(e: CycleCliError) -> Self {
        use cycle_forecast::ForecastError;

        match e {
            CycleCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CycleCliError::Forecast(e) => {
                let (code, hint) = match &e {
                    ForecastError::InvalidDate(_) => {
                        ("INVALID_DATE", "Dates must be YYYY-MM-DD or RFC 3339 timestamps")
                    }
                    ForecastError::InvalidDuration(_) => {
                        ("INVALID_DURATION", "Durations must be positive whole days")
                    }
                    ForecastError::InvalidCycleLength(_) => {
                        ("INVALID_CYCLE_LENGTH", "Check the recorded cycle durations")
                    }
                    ForecastError::Config(_) | ForecastError::Toml(_) => {
                        ("CONFIG_ERROR", "Run 'cyclecast doctor' for details")
                    }
                    ForecastError::Io(_) => ("IO_ERROR", "Check file paths and permissions"),
                    ForecastError::ParseError(_) | ForecastError::JsonError(_) => {
                        ("PARSE_ERROR", "Ensure input matches the cycle.record.v1 schema")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            CycleCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            CycleCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            CycleCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    start_date: String,
    error: String,
}

impl From<&ValidationResult> for ValidationErrorDetail {
    fn from(result: &ValidationResult) -> Self {
        Self {
            index: result.index,
            start_date: result.start_date.clone(),
            error: result.error.to_string(),
        }
    }
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
