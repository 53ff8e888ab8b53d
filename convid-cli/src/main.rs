// Command-line entry point for convid.
//
// Parses arguments, resolves the input path to a list of video files,
// runs the batch through convid-core and prints a summary.

mod cli;
mod progress;

use crate::cli::{Cli, Commands, ConvertArgs};
use crate::progress::ProgressBars;

use clap::Parser;
use console::style;
use convid_core::{
    find_video_files, format_duration, is_video_file, run_batch, BatchSummary, ControlFlags,
    CoreConfig, CoreError, OverwritePolicy,
};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Resolves the input argument to the list of files to convert.
fn resolve_input_files(input_path: &PathBuf) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let input_path = input_path
        .canonicalize()
        .map_err(|e| format!("Invalid input path '{}': {e}", input_path.display()))?;
    let metadata = std::fs::metadata(&input_path)
        .map_err(|e| format!("Failed to access input path '{}': {e}", input_path.display()))?;

    if metadata.is_dir() {
        match find_video_files(&input_path) {
            Ok(files) => Ok(files),
            // An empty directory is not an error; the summary reports 0 files
            Err(CoreError::NoFilesFound) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    } else if metadata.is_file() {
        if is_video_file(&input_path) {
            Ok(vec![input_path])
        } else {
            Err(format!(
                "Input file '{}' is not a recognized video file.",
                input_path.display()
            )
            .into())
        }
    } else {
        Err(format!(
            "Input path '{}' is neither a file nor a directory.",
            input_path.display()
        )
        .into())
    }
}

fn print_summary(summary: &BatchSummary, elapsed_secs: f64) {
    println!();
    println!("{}", style("Conversion Summary").bold());
    println!("  Total files:  {}", summary.total);
    println!(
        "  Succeeded:    {}",
        style(summary.succeeded).green().bold()
    );
    if summary.failed > 0 {
        println!("  Failed:       {}", style(summary.failed).red().bold());
    } else {
        println!("  Failed:       {}", summary.failed);
    }
    println!("  Skipped:      {}", summary.skipped);
    if summary.cancelled {
        println!("  {}", style("Batch was cancelled before completion").yellow());
    }
    println!("  Elapsed:      {}", format_duration(elapsed_secs));
}

fn run_convert(args: ConvertArgs) -> Result<BatchSummary, Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    let files = resolve_input_files(&args.input_path)?;
    println!(
        "{} {}",
        style("Convid run started:").bold(),
        get_timestamp()
    );
    println!("Found {} file(s) to convert", files.len());

    let config = CoreConfig {
        crf: args.crf,
        preset: args.preset,
        overwrite: if args.overwrite {
            OverwritePolicy::Overwrite
        } else {
            OverwritePolicy::SkipExisting
        },
    };

    let controls = ControlFlags::new();
    let bars = ProgressBars::new();
    let summary = run_batch(&files, &config, &controls, &bars)?;
    bars.finish();

    print_summary(&summary, start_time.elapsed().as_secs_f64());
    Ok(summary)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Convert(args) => run_convert(args),
    };

    match result {
        Ok(summary) => {
            if summary.failed > 0 {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold());
            process::exit(1);
        }
    }
}
