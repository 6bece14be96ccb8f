//! mdpdf CLI - export the Phase II report to PDF

use std::path::Path;

use clap::Parser;
use colored::Colorize;

use mdpdf::Mdpdf;

/// Markdown source, relative to the working directory.
const SOURCE: &str = "Phase_II_Report.md";

/// PDF destination, relative to the working directory.
const OUTPUT: &str = "Project_Phase_II.pdf";

#[derive(Parser)]
#[command(name = "mdpdf")]
#[command(version)]
#[command(
    about = "Export Phase_II_Report.md to Project_Phase_II.pdf",
    long_about = "Reads Phase_II_Report.md from the current directory and writes \
                  Project_Phase_II.pdf next to it. Set RUST_LOG=debug for details."
)]
struct Cli {}

fn main() {
    env_logger::init();

    let _cli = Cli::parse();

    if let Err(e) = export(Path::new(SOURCE), Path::new(OUTPUT)) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn export(source: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Mdpdf::new().parse(source)?;

    for missing in &parsed.report.missing_images {
        eprintln!(
            "{}: image not found, skipped: {}",
            "Warning".yellow().bold(),
            missing.display()
        );
    }

    let result = parsed.write_pdf(output)?;
    log::info!(
        "{} pages, {} images, {} words",
        result.stats.page_count,
        result.stats.image_count,
        result.stats.word_count
    );

    println!("Exported PDF to {}", output.display());
    Ok(())
}
