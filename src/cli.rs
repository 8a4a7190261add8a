//! Command-line interface components.

use crate::config::PipelineConfig;
use crate::pipeline::{PoiProcessor, ProcessingStats};
use crate::reader::read_feature_collection;
use crate::writer::{DatasetWriter, OutputPaths, TabularFormat};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "poi_cleaner")]
#[command(about = "Classify OSM points of interest and normalize their opening hours")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// GeoJSON FeatureCollection of raw points of interest
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory (defaults to a `processed` directory next to the input)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// File stem of the output artifacts (defaults to `<input stem>_cleaned`)
    #[arg(long)]
    pub stem: Option<String>,

    /// TOML file overriding the built-in classification and hours tables
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for review fill and opening hours synthesis
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep `tourism=attraction` records as businesses
    #[arg(long)]
    pub include_attraction: bool,

    /// Drop records without an amenity tag before classification
    #[arg(long)]
    pub require_amenity: bool,

    /// Write the flat table as Parquet instead of CSV
    #[arg(long)]
    pub parquet: bool,

    /// Format of the final report
    #[arg(long, value_enum, default_value_t = ReportFormat::Human)]
    pub report: ReportFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log warnings and errors, hide progress bars
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Final report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Human,
    Json,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Output directory, defaulting to `<input dir>/processed`
    pub fn get_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .input
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("processed"),
        }
    }

    /// Output file stem, defaulting to `<input stem>_cleaned`
    pub fn get_stem(&self) -> String {
        match &self.stem {
            Some(stem) => stem.clone(),
            None => self
                .input
                .file_stem()
                .map(|stem| format!("{}_cleaned", stem.to_string_lossy()))
                .unwrap_or_else(|| crate::constants::DEFAULT_OUTPUT_STEM.to_string()),
        }
    }

    pub fn tabular_format(&self) -> TabularFormat {
        if self.parquet {
            TabularFormat::Parquet
        } else {
            TabularFormat::Csv
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("poi_cleaner={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration (defaults -> config file -> CLI flags)
pub fn load_configuration(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Using config file: {}", path.display());
            PipelineConfig::from_file(path)?
        }
        None => PipelineConfig::default(),
    };

    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.include_attraction {
        config = config.with_attractions();
    }
    if args.require_amenity {
        config = config.with_required_amenity();
    }

    config.validate()?;
    Ok(config)
}

/// Outcome of a full run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: ProcessingStats,
    pub outputs: OutputPaths,
    pub elapsed: std::time::Duration,
}

/// Read, process and write one dataset
pub fn run(args: &Args) -> Result<RunSummary> {
    let start_time = Instant::now();
    let config = load_configuration(args)?;

    let raw = read_feature_collection(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let processor = PoiProcessor::new(config);
    let result = processor.process_seeded(raw, !args.quiet);

    let writer =
        DatasetWriter::new(args.get_output_dir(), args.get_stem()).with_format(args.tabular_format());
    let outputs = writer
        .write_all(&result.pois)
        .context("Failed to write cleaned dataset")?;

    let summary = RunSummary {
        stats: result.stats,
        outputs,
        elapsed: start_time.elapsed(),
    };

    match args.report {
        ReportFormat::Human => print_human_report(&summary),
        ReportFormat::Json => print_json_report(&summary)?,
    }

    Ok(summary)
}

/// Print a human-readable report with per-category counts
pub fn print_human_report(summary: &RunSummary) {
    let stats = &summary.stats;

    println!("\n{}", "POI Cleaning Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Records read:".bright_cyan(),
        stats.total_input.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Duplicates removed:".bright_cyan(),
        stats.duplicates_removed().to_string().bright_white()
    );
    println!(
        "  {} {} (no type: {}, excluded: {}, no amenity: {})",
        "Dropped:".bright_cyan(),
        stats.dropped().to_string().bright_white(),
        stats.no_type,
        stats.excluded,
        stats.missing_amenity
    );
    println!(
        "  {} {}",
        "Remaining rows:".bright_cyan(),
        stats.final_output.to_string().bright_white().bold()
    );
    println!(
        "  {} {} from source, {} synthesized",
        "Opening hours:".bright_cyan(),
        stats.hours_simplified,
        stats.hours_synthesized
    );
    if stats.hours_parse_failures > 0 {
        println!(
            "  {} {}",
            "Unparseable hours:".bright_red(),
            stats.hours_parse_failures.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        summary.elapsed.as_millis().to_string().bright_white()
    );

    println!("\n{}", "Business types".bright_yellow());
    for (category, count) in stats.categories_by_count() {
        println!("  {:<28} {}", category, count);
    }

    println!("\n{}", "Output files".bright_yellow());
    println!("  {}", summary.outputs.tabular.display());
    println!("  {}", summary.outputs.geojson.display());
    println!();
}

/// Print a JSON report for machine consumption
pub fn print_json_report(summary: &RunSummary) -> Result<()> {
    let stats = &summary.stats;
    let report = serde_json::json!({
        "records_read": stats.total_input,
        "duplicates_removed": stats.duplicates_removed(),
        "missing_amenity": stats.missing_amenity,
        "no_type": stats.no_type,
        "excluded": stats.excluded,
        "remaining_rows": stats.final_output,
        "hours_simplified": stats.hours_simplified,
        "hours_synthesized": stats.hours_synthesized,
        "hours_parse_failures": stats.hours_parse_failures,
        "business_types": stats.category_counts,
        "processing_time_seconds": summary.elapsed.as_secs_f64(),
        "outputs": {
            "tabular": summary.outputs.tabular,
            "geojson": summary.outputs.geojson,
        },
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let args = Args::parse_from(["poi_cleaner", "data/raw/abidjan_pois.geojson"]);

        assert_eq!(args.get_output_dir(), PathBuf::from("data/raw/processed"));
        assert_eq!(args.get_stem(), "abidjan_pois_cleaned");
        assert_eq!(args.tabular_format(), TabularFormat::Csv);
        assert_eq!(args.get_log_level(), "info");
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "poi_cleaner",
            "pois.geojson",
            "--seed",
            "7",
            "--include-attraction",
            "--require-amenity",
            "--parquet",
            "-v",
        ]);

        let config = load_configuration(&args).unwrap();
        assert_eq!(config.seed, 7);
        assert!(config.classification.include_attraction);
        assert!(config.require_amenity);
        assert_eq!(args.tabular_format(), TabularFormat::Parquet);
        assert_eq!(args.get_log_level(), "debug");
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Args::try_parse_from(["poi_cleaner", "pois.geojson", "-v", "-q"]);
        assert!(result.is_err());
    }
}
