//! pdfoutline CLI - PDF title and outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::{analyze_with_options, AnalyzeOptions, PdfSource};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract titles and heading outlines from PDF documents", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Ignore the embedded bookmark table
    #[arg(long)]
    no_bookmarks: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the structure of one PDF as JSON
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Ignore the embedded bookmark table
        #[arg(long)]
        no_bookmarks: bool,
    },

    /// Process every PDF in a directory, one JSON file per document
    Batch {
        /// Input directory
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Ignore the embedded bookmark table
        #[arg(long)]
        no_bookmarks: bool,
    },

    /// Show classification, title, and outline summary for one PDF
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Also print the component event trace
        #[arg(long)]
        events: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
            no_bookmarks,
        }) => cmd_extract(&input, output.as_deref(), compact, no_bookmarks),
        Some(Commands::Batch {
            input,
            output,
            no_bookmarks,
        }) => cmd_batch(&input, &output, no_bookmarks),
        Some(Commands::Info { input, events }) => cmd_info(&input, events),
        None => {
            if let Some(input) = cli.input {
                cmd_extract(&input, cli.output.as_deref(), false, cli.no_bookmarks)
            } else {
                println!("{}", "Usage: pdfoutline <FILE> [-o OUTPUT]".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn options(no_bookmarks: bool) -> AnalyzeOptions {
    if no_bookmarks {
        AnalyzeOptions::new().without_bookmarks()
    } else {
        AnalyzeOptions::new()
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    no_bookmarks: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let structure = pdfoutline::extract_structure_with_options(input, &options(no_bookmarks))?;

    let json = if compact {
        serde_json::to_string(&structure)?
    } else {
        serde_json::to_string_pretty(&structure)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    no_bookmarks: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Processing PDFs in {}...", input.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let summary = pdfoutline::process_dir(input, output, &options(no_bookmarks))?;

    pb.finish_and_clear();

    println!(
        "{} {} document(s) processed, {} failed",
        "Done:".green().bold(),
        summary.succeeded(),
        summary.failed.len()
    );
    for failure in &summary.failed {
        println!(
            "  {} {}: {}",
            "✗".red(),
            failure.path.display(),
            failure.message
        );
    }

    if summary.succeeded() > 0 {
        println!("{} {}", "Output written to".green(), output.display());
    }

    Ok(())
}

fn cmd_info(input: &Path, show_events: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = PdfSource::open(input)?;
    let analysis = analyze_with_options(&source, &AnalyzeOptions::new())?;

    println!("{}", "Document".green().bold());
    println!("  {} {}", "File:".dimmed(), input.display());
    println!("  {} {}", "Class:".dimmed(), analysis.class);
    println!(
        "  {} {}",
        "Title:".dimmed(),
        if analysis.structure.title.is_empty() {
            "(none)".to_string()
        } else {
            analysis.structure.title.clone()
        }
    );
    println!(
        "  {} {} entries",
        "Outline:".dimmed(),
        analysis.structure.outline.len()
    );
    for entry in &analysis.structure.outline {
        let indent = "  ".repeat(entry.level.depth());
        println!("{}{} {} (p. {})", indent, entry.level, entry.text, entry.page);
    }

    if show_events {
        println!("\n{}", "Events".green().bold());
        for event in &analysis.events {
            println!("  [{}] {}", event.component, event.message);
        }
    }

    Ok(())
}
