use fitlog_core::metrics::{bmi_class, compute_bmi, compute_bmr, compute_calories, met_value};
use fitlog_core::*;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Personal fitness tracker: workouts, calories, BMI and BMR", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override export directory
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    /// Ledger grouping: flat, categorized, categorized_by_date
    #[arg(long, global = true)]
    bucketing: Option<String>,

    /// Record workouts without a profile (no calorie tracking)
    #[arg(long, global = true)]
    no_calories: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Process JSON request lines against one in-memory store
    Session {
        /// Read requests from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,

        /// Write workouts.csv and report.json to the export directory at the end
        #[arg(long)]
        export: bool,
    },

    /// One-shot metric calculators
    Calc {
        #[command(subcommand)]
        metric: CalcCommand,
    },

    /// Print a reference chart
    Chart {
        /// Which chart (workout, diet)
        kind: String,
    },
}

#[derive(Subcommand)]
enum CalcCommand {
    /// Body Mass Index
    Bmi {
        #[arg(long)]
        height: f64,
        #[arg(long)]
        weight: f64,
    },
    /// Basal Metabolic Rate (Mifflin-St Jeor)
    Bmr {
        #[arg(long)]
        age: u32,
        /// M or F
        #[arg(long)]
        gender: String,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        weight: f64,
    },
    /// Calories burned for a workout
    Calories {
        /// Workout category (Warm-up, Workout, Cool-down)
        #[arg(long, conflicts_with = "met")]
        category: Option<String>,

        /// Explicit MET value
        #[arg(long)]
        met: Option<f64>,

        #[arg(long)]
        weight: f64,

        /// Duration in minutes
        #[arg(long)]
        duration: u32,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    fitlog_core::logging::init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(ref mode) = cli.bucketing {
        config.ledger.bucketing = mode.parse()?;
    }
    if cli.no_calories {
        config.ledger.require_profile_for_calories = false;
    }
    let export_dir = cli
        .export_dir
        .unwrap_or_else(|| config.data.export_dir.clone());

    match cli.command {
        Commands::Session { input, export } => {
            cmd_session(&config, input.as_deref(), export.then_some(export_dir.as_path()))
        }
        Commands::Calc { metric } => cmd_calc(metric),
        Commands::Chart { kind } => cmd_chart(&kind),
    }
}

fn cmd_session(config: &Config, input: Option<&Path>, export_dir: Option<&Path>) -> Result<()> {
    let store = FitnessStore::new(config.ledger.clone());

    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut handled = 0;
    let mut failed = 0;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let now = chrono::Local::now().naive_local();
        let response = handle_line(&store, trimmed, now);
        if !response.is_success() {
            failed += 1;
        }
        writeln!(out, "{}", serde_json::to_string(&response)?)?;
        handled += 1;
    }
    out.flush()?;
    tracing::info!("Session handled {} requests ({} failed)", handled, failed);

    if let Some(dir) = export_dir {
        // The weekly report needs a profile; fail before writing anything
        let today = chrono::Local::now().date_naive();
        let report = store.weekly_report(today).map_err(|e| {
            eprintln!("✗ Export aborted: {}", e);
            e
        })?;

        let csv_path = dir.join("workouts.csv");
        let count = store.with_ledger(|ledger| fitlog_core::export::write_csv(ledger, &csv_path))?;

        let report_path = dir.join("report.json");
        fitlog_core::export::write_report_json(&report, &report_path)?;

        eprintln!("✓ Exported {} workouts to {}", count, csv_path.display());
        eprintln!("✓ Report written to {}", report_path.display());
    }

    Ok(())
}

fn cmd_calc(metric: CalcCommand) -> Result<()> {
    match metric {
        CalcCommand::Bmi { height, weight } => {
            let bmi = compute_bmi(height, weight)?;
            println!("BMI: {:.2} ({})", bmi, bmi_class(bmi).label());
        }
        CalcCommand::Bmr {
            age,
            gender,
            height,
            weight,
        } => {
            let gender: Gender = gender.parse()?;
            let bmr = compute_bmr(age, gender, height, weight)?;
            println!("BMR: {:.2} kcal/day", bmr);
        }
        CalcCommand::Calories {
            category,
            met,
            weight,
            duration,
        } => {
            let met = match (met, category) {
                (Some(met), _) => met,
                (None, Some(category)) => met_value(category.parse()?),
                (None, None) => met_value(Category::Workout),
            };
            let kcal = compute_calories(met, weight, duration)?;
            println!("Calories: {:.2} kcal ({} min at MET {})", kcal, duration, met);
        }
    }
    Ok(())
}

fn cmd_chart(kind: &str) -> Result<()> {
    let errors = fitlog_core::reference::validate();
    if !errors.is_empty() {
        eprintln!("Reference chart errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::State("Invalid reference charts".into()));
    }

    match kind.to_lowercase().as_str() {
        "workout" => {
            for row in fitlog_core::reference::workout_chart() {
                println!("{}", row.category);
                for exercise in &row.exercises {
                    println!("  • {}", exercise);
                }
            }
        }
        "diet" => {
            for plan in fitlog_core::reference::diet_chart() {
                println!("{}", plan.goal);
                for meal in &plan.meals {
                    println!("  • {}", meal);
                }
            }
        }
        other => {
            return Err(Error::validation(
                "chart",
                format!("unknown chart '{}', expected workout or diet", other),
            ));
        }
    }
    Ok(())
}
