//! WellTrack CLI - Command-line interface for the habit engine
//!
//! Commands:
//! - report: Compute a wellness report from an activity log
//! - validate: Validate log events against the input schema
//! - schema: Print schema information
//! - doctor: Diagnose engine configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;

use welltrack_engine::clock::{Clock, FixedClock, SystemClock};
use welltrack_engine::encoder::SnapshotEncoder;
use welltrack_engine::schema::{LogEventAdapter, SCHEMA_VERSION};
use welltrack_engine::{EngineError, HabitEngine, ENGINE_VERSION, PRODUCER_NAME, REPORT_VERSION};

/// WellTrack - deterministic compute engine for habit signals
#[derive(Parser)]
#[command(name = "welltrack")]
#[command(author = "WellTrack Daily")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Derive streaks, adherence, and wellness scores from activity logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a wellness report from an activity log
    Report {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Compute the report as of this date (YYYY-MM-DD); defaults to the system clock
        #[arg(long)]
        today: Option<String>,

        /// Pretty-print the report JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Validate log events against the input schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,
    },

    /// Diagnose engine configuration
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one event per line)
    Ndjson,
    /// JSON array of events
    Json,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (habit.log_event.v1)
    Input,
    /// Output schema (welltrack.report.v1)
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

fn run(cli: Cli) -> Result<(), WellTrackCliError> {
    match cli.command {
        Commands::Report {
            input,
            output,
            input_format,
            today,
            pretty,
        } => cmd_report(&input, &output, input_format, today.as_deref(), pretty),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Schema { schema_type } => {
            cmd_schema(schema_type);
            Ok(())
        }

        Commands::Doctor { json } => cmd_doctor(json),
    }
}

fn cmd_report(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    today: Option<&str>,
    pretty: bool,
) -> Result<(), WellTrackCliError> {
    let input_data = read_input(input)?;

    let events = match input_format {
        InputFormat::Ndjson => LogEventAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => LogEventAdapter::parse_array(&input_data)?,
    };

    if events.is_empty() {
        return Err(WellTrackCliError::NoEvents);
    }

    let records = LogEventAdapter::to_records(&events)?;

    let engine = HabitEngine::default();
    let encoder = SnapshotEncoder::new();

    let (snapshot, generated_at) = match today {
        Some(date_str) => {
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                WellTrackCliError::Engine(EngineError::DateParseError(format!(
                    "{}: {}",
                    date_str, e
                )))
            })?;
            let clock = FixedClock::at_date(date);
            (engine.snapshot(&records, &clock)?, clock.now_utc())
        }
        None => {
            let clock = SystemClock;
            (engine.snapshot(&records, &clock)?, clock.now_utc())
        }
    };

    let payload = encoder.encode(&snapshot, generated_at);
    let report_json = if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };

    if output.to_string_lossy() == "-" {
        println!("{}", report_json);
    } else {
        fs::write(output, report_json)?;
    }

    Ok(())
}

fn cmd_validate(
    input: &Path,
    input_format: InputFormat,
    json: bool,
) -> Result<(), WellTrackCliError> {
    let input_data = read_input(input)?;

    let events = match input_format {
        InputFormat::Ndjson => LogEventAdapter::parse_ndjson(&input_data)?,
        InputFormat::Json => LogEventAdapter::parse_array(&input_data)?,
    };

    let invalid = LogEventAdapter::validate_events(&events);

    let report = ValidationReport {
        total_events: events.len(),
        valid_events: events.len() - invalid.len(),
        invalid_events: invalid.len(),
        errors: invalid
            .iter()
            .map(|e| ValidationErrorDetail {
                index: e.index,
                event_id: e.event_id.clone(),
                error: e.error.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total events:   {}", report.total_events);
        println!("Valid events:   {}", report.valid_events);
        println!("Invalid events: {}", report.invalid_events);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Event {} (index {}): {}",
                    err.event_id.as_deref().unwrap_or("unknown"),
                    err.index,
                    err.error
                );
            }
        }
    }

    if report.invalid_events > 0 {
        Err(WellTrackCliError::ValidationFailed(report.invalid_events))
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) {
    match schema_type {
        SchemaType::Input => {
            println!("Input Schema: {}", SCHEMA_VERSION);
            println!();
            println!("One logged habit event per record:");
            println!();
            println!("- schema_version: \"{}\"", SCHEMA_VERSION);
            println!("- event_id: optional caller-assigned identifier");
            println!("- recorded_at: RFC 3339 timestamp (UTC)");
            println!("- category: medication | water | workout | sleep | food | mood | biometrics");
            println!("- value: optional numeric payload (mood rating, sleep hours, reading)");
            println!("- source: optional {{ app, device_id }} provenance");
        }
        SchemaType::Output => {
            println!("Output Schema: {}", REPORT_VERSION);
            println!();
            println!("The wellness report contains:");
            println!();
            println!("- report_version: schema version");
            println!("- producer: {{ name, version, instance_id }}");
            println!("- generated_at_utc, as_of: provenance timestamps");
            println!("- habits: per-habit {{ category, daily_target, window_days,");
            println!("          current_streak, longest_streak, adherence_pct }}");
            println!("- wellness: {{ overall, display, worst_component }}");
            println!("- correlations: {{ metric_a, metric_b, coefficient, strength, direction }}");
        }
    }
}

fn cmd_doctor(json: bool) -> Result<(), WellTrackCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Engine version {}", ENGINE_VERSION),
    });

    checks.push(DoctorCheck {
        name: "schema_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Input schema: {}", SCHEMA_VERSION),
    });

    // Default engine config must construct cleanly (weights sum to 1.0).
    let config_check = match HabitEngine::new(
        HabitEngine::default().habits().to_vec(),
        Default::default(),
    ) {
        Ok(_) => DoctorCheck {
            name: "default_config".to_string(),
            status: CheckStatus::Ok,
            message: "Default habit configuration is valid".to_string(),
        },
        Err(e) => DoctorCheck {
            name: "default_config".to_string(),
            status: CheckStatus::Error,
            message: format!("Default configuration rejected: {}", e),
        },
    };
    checks.push(config_check);

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("WellTrack Doctor Report");
        println!("=======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
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
        Err(WellTrackCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn read_input(input: &Path) -> Result<String, WellTrackCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

// Error types

#[derive(Debug)]
enum WellTrackCliError {
    Io(io::Error),
    Engine(EngineError),
    Json(serde_json::Error),
    NoEvents,
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for WellTrackCliError {
    fn from(e: io::Error) -> Self {
        WellTrackCliError::Io(e)
    }
}

impl From<EngineError> for WellTrackCliError {
    fn from(e: EngineError) -> Self {
        WellTrackCliError::Engine(e)
    }
}

impl From<serde_json::Error> for WellTrackCliError {
    fn from(e: serde_json::Error) -> Self {
        WellTrackCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<WellTrackCliError> for CliError {
    fn from(e: WellTrackCliError) -> Self {
        match e {
            WellTrackCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            WellTrackCliError::Engine(e) => CliError {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure input matches habit.log_event.v1 schema".to_string()),
            },
            WellTrackCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            WellTrackCliError::NoEvents => CliError {
                code: "NO_EVENTS".to_string(),
                message: "No events found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            WellTrackCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} events failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            WellTrackCliError::DoctorFailed => CliError {
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
    total_events: usize,
    valid_events: usize,
    invalid_events: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    event_id: Option<String>,
    error: String,
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
    Error,
}
