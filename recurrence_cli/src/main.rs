use chrono::NaiveTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use recurrence_core::export::{write_csv, write_dates, write_jsonl};
use recurrence_core::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "recur")]
#[command(about = "Recurring event date generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List every occurrence of a rule
    Generate {
        #[command(flatten)]
        rule: RuleArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = DateFormat::Text)]
        format: DateFormat,
    },

    /// Print a one-line summary of a rule
    Describe {
        #[command(flatten)]
        rule: RuleArgs,
    },

    /// Show the summary and the first few occurrences
    Preview {
        #[command(flatten)]
        rule: RuleArgs,

        /// Number of dates to show (defaults to output.preview_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Materialize one event row per occurrence
    Schedule {
        #[command(flatten)]
        rule: RuleArgs,

        /// Event title
        #[arg(long)]
        title: String,

        /// Start time (HH:MM)
        #[arg(long)]
        start_time: Option<String>,

        /// End time (HH:MM)
        #[arg(long)]
        end_time: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = EventFormat::Csv)]
        format: EventFormat,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Rule fields, either as flags or from a JSON/TOML file
#[derive(Args, Clone, Debug)]
struct RuleArgs {
    /// weekly, day-interval, monthly-by-position or monthly-by-day
    #[arg(long, required_unless_present = "rule_file")]
    kind: Option<String>,

    /// Weekday, 0 = Sunday .. 6 = Saturday
    #[arg(long, allow_negative_numbers = true)]
    weekday: Option<i64>,

    /// Days between occurrences
    #[arg(long, allow_negative_numbers = true)]
    interval_days: Option<i64>,

    /// Position in the month, 1-4 or 5 for last
    #[arg(long, allow_negative_numbers = true)]
    position: Option<i64>,

    /// Day of the month, 1-31 (clamped to shorter months)
    #[arg(long, allow_negative_numbers = true)]
    day_of_month: Option<i64>,

    /// First date (YYYY-MM-DD)
    #[arg(long, required_unless_present = "rule_file")]
    start: Option<String>,

    /// Last date (YYYY-MM-DD), defaults to the end of the start year
    #[arg(long)]
    end: Option<String>,

    /// Read the rule from a JSON or .toml file
    #[arg(
        long,
        conflicts_with_all = ["kind", "weekday", "interval_days", "position", "day_of_month", "start", "end"]
    )]
    rule_file: Option<PathBuf>,
}

impl RuleArgs {
    fn to_draft(&self) -> Result<RuleDraft> {
        if let Some(ref path) = self.rule_file {
            tracing::debug!("Reading rule from {:?}", path);
            return RuleDraft::load_from(path);
        }

        Ok(RuleDraft {
            kind: self.kind.clone().unwrap_or_default(),
            weekday: self.weekday,
            interval_days: self.interval_days,
            month_position: self.position,
            day_of_month: self.day_of_month,
            start_date: self.start.clone().unwrap_or_default(),
            end_date: self.end.clone(),
        })
    }

    fn resolve(&self, config: &Config) -> Result<RecurrenceRule> {
        self.to_draft()?.normalize(&config.defaults)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DateFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EventFormat {
    Csv,
    Jsonl,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    recurrence_core::logging::init_with_level(recurrence_core::logging::level_for_verbosity(
        cli.verbose,
    ));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) if path.exists() => Config::load_from(path)?,
        Some(ref path) => {
            tracing::info!("Config file {:?} does not exist, using defaults", path);
            Config::default()
        }
        None => Config::load()?,
    };

    match cli.command {
        Commands::Generate { rule, format } => {
            cmd_generate(&rule.resolve(&config)?, format, &config)
        }
        Commands::Describe { rule } => cmd_describe(&rule.resolve(&config)?),
        Commands::Preview { rule, limit } => cmd_preview(
            &rule.resolve(&config)?,
            limit.unwrap_or(config.output.preview_limit),
            &config,
        ),
        Commands::Schedule {
            rule,
            title,
            start_time,
            end_time,
            location,
            description,
            format,
            output,
        } => {
            let template = EventTemplate {
                title,
                start_time: start_time.as_deref().map(parse_time).transpose()?,
                end_time: end_time.as_deref().map(parse_time).transpose()?,
                location,
                description,
            };
            cmd_schedule(&rule.resolve(&config)?, &template, format, output.as_deref())
        }
        Commands::Config { init } => cmd_config(&config, cli.config, init),
    }
}

fn cmd_generate(rule: &RecurrenceRule, format: DateFormat, config: &Config) -> Result<()> {
    let dates = generate(rule);
    tracing::info!("{}: {} occurrences", describe(rule), dates.len());
    let stdout = io::stdout().lock();

    match format {
        DateFormat::Text => write_dates(stdout, &dates, &config.output.date_format),
        DateFormat::Json => {
            let doc = serde_json::json!({
                "summary": describe(rule),
                "start_date": rule.start_date,
                "end_date": rule.effective_end(),
                "dates": dates,
            });
            let mut stdout = stdout;
            serde_json::to_writer_pretty(&mut stdout, &doc)?;
            writeln!(stdout)?;
            Ok(())
        }
    }
}

fn cmd_describe(rule: &RecurrenceRule) -> Result<()> {
    println!("{}, {}", describe(rule), describe_window(rule));
    Ok(())
}

fn cmd_preview(rule: &RecurrenceRule, limit: usize, config: &Config) -> Result<()> {
    let preview = preview(rule, limit);

    println!("{}", preview.summary);
    println!("{}", describe_window(rule));
    println!();

    if preview.total == 0 {
        println!("  (no occurrences)");
        return Ok(());
    }

    for date in &preview.dates {
        println!("  {}", date.format(&config.output.date_format));
    }

    if preview.is_truncated() {
        println!(
            "  ... and {} more ({} total)",
            preview.total - preview.dates.len(),
            preview.total
        );
    }

    Ok(())
}

fn cmd_schedule(
    rule: &RecurrenceRule,
    template: &EventTemplate,
    format: EventFormat,
    output: Option<&Path>,
) -> Result<()> {
    let series = schedule(rule, template)?;

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    let count = match format {
        EventFormat::Csv => write_csv(writer, &series.events)?,
        EventFormat::Jsonl => write_jsonl(writer, &series.events)?,
    };
    tracing::info!("Exported {} events as {:?}", count, format);

    if let Some(path) = output {
        println!("✓ Wrote {} events to {}", count, path.display());
        println!("  {}, {}", series.summary, describe_window(rule));
    }

    Ok(())
}

fn cmd_config(config: &Config, path: Option<PathBuf>, init: bool) -> Result<()> {
    if init {
        let path = path.unwrap_or_else(Config::default_config_path);
        if path.exists() {
            return Err(Error::Config(format!(
                "{} already exists, not overwriting",
                path.display()
            )));
        }
        Config::default().save_to(&path)?;
        println!("✓ Wrote default config to {}", path.display());
        return Ok(());
    }

    print!("{}", config.to_toml()?);
    Ok(())
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| Error::Template(format!("invalid time {:?} (expected HH:MM): {}", s, e)))
}
