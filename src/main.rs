//! png2icns
//!
//! Converts an image into a multi-resolution ICNS file, or lists the icons in
//! an existing one.
//!
//! ```shell
//! png2icns convert path/to/logo.png            # writes path/to/logo.icns
//! png2icns convert logo.png AppIcon.icns
//! png2icns inspect AppIcon.icns --verify
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use png2icns::{ConvertOptions, ResampleFilter};
use tracing_subscriber::{fmt, EnvFilter};

/// Converts an image into a multi-resolution Apple Icon Image (.icns) file.
#[derive(Parser)]
#[command(name = "png2icns")]
#[command(version)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image into an ICNS file
    Convert {
        /// Source image (ideally 1024x1024 or larger)
        input: PathBuf,

        /// Output ICNS path [default: input with an .icns extension]
        output: Option<PathBuf>,

        /// Resampling filter used for every icon size
        #[arg(long, value_enum, default_value_t = Filter::Lanczos3)]
        filter: Filter,
    },

    /// List the icons stored in an ICNS file
    Inspect {
        /// ICNS file to inspect
        path: PathBuf,

        /// Also decode every payload and check its dimensions
        #[arg(long)]
        verify: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Filter {
    Lanczos3,
    CatmullRom,
}

impl From<Filter> for ResampleFilter {
    fn from(filter: Filter) -> ResampleFilter {
        match filter {
            Filter::Lanczos3 => ResampleFilter::Lanczos3,
            Filter::CatmullRom => ResampleFilter::CatmullRom,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    ExitCode::SUCCESS
                }
                _ => ExitCode::FAILURE,
            };
        }
    };

    let env_filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Some(Commands::Convert { input, output, filter }) => {
            convert(input, output, filter)
        }
        Some(Commands::Inspect { path, verify }) => inspect(path, verify),
        None => {
            let _ = Cli::command().print_help();
            println!();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn convert(input: PathBuf,
           output: Option<PathBuf>,
           filter: Filter)
           -> Result<bool> {
    let options = ConvertOptions {
        output: output,
        filter: filter.into(),
    };
    println!("Loading: {}", input.display());
    let summary = png2icns::convert(&input, &options)
        .with_context(|| format!("failed to convert {}", input.display()))?;

    println!("Source size: {}x{}", summary.source_width, summary.source_height);
    for entry in &summary.added {
        println!("  Added: {} ({})", entry.ostype, entry.label);
    }
    println!();
    println!("Created: {}", summary.output.display());
    println!("Total sizes: {}", summary.added.len());
    println!("File size: {:.1} KB", summary.file_size as f64 / 1024.0);
    Ok(true)
}

fn inspect(path: PathBuf, verify: bool) -> Result<bool> {
    let inspection = png2icns::inspect(&path, verify)
        .with_context(|| format!("failed to inspect {}", path.display()))?;

    println!();
    println!("Inspecting: {}", inspection.path.display());
    println!("{}", "-".repeat(40));
    for element in &inspection.elements {
        println!("  {}: {} - {} bytes",
                 element.ostype,
                 element.label,
                 element.payload_length);
        if let Some(ref problem) = element.problem {
            println!("    problem: {}", problem);
        }
    }
    println!("{}", "-".repeat(40));
    println!("Total entries: {}", inspection.elements.len());
    if verify {
        let problems = inspection.num_problems();
        if problems > 0 {
            println!("Problems: {}", problems);
            return Ok(false);
        }
        println!("All known payloads verified.");
    }
    Ok(true)
}
