use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dolinfo_core::{DolBinary, InputSource, ReportFormatter, ReportOptions};
use std::io::{self, Write};
use std::process::ExitCode;

mod output;

use output::Format;

/// Simple DOL header inspection CLI
#[derive(Parser)]
#[command(
    name = "dolinfo",
    about = "Print the section layout of GameCube/Wii DOL executables",
    version,
    author
)]
struct Cli {
    /// Print all sections, even empty ones
    #[arg(short = 'a', long = "all")]
    show_all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Paths to DOL files (`-` reads standard input)
    #[arg(required = true)]
    paths: Vec<String>,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let formatter = ReportFormatter::new(ReportOptions {
        show_all: cli.show_all,
    });

    let failed = run(&cli.paths, &formatter, cli.format, &mut io::stdout())?;
    if failed > 0 {
        log::debug!("{failed} of {} files failed", cli.paths.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Reports every path in turn and returns how many of them failed.
///
/// A failing file is reported on stderr and does not stop the batch.
fn run<W: Write>(
    paths: &[String],
    formatter: &ReportFormatter,
    format: Format,
    out: &mut W,
) -> Result<usize> {
    let mut failed = 0usize;
    for arg in paths {
        let source = InputSource::from_arg(arg);
        match report_for(&source, formatter, format) {
            Ok(report) => {
                // One write per file keeps reports whole.
                out.write_all(report.as_bytes())?;
                out.flush()?;
            }
            Err(err) => {
                failed += 1;
                log::warn!("skipping {source}");
                eprintln!("{} {err:#}", "error:".red().bold());
            }
        }
    }
    Ok(failed)
}

fn report_for(source: &InputSource, formatter: &ReportFormatter, format: Format) -> Result<String> {
    let binary = DolBinary::open(source).with_context(|| source.to_string())?;
    output::render(&binary, formatter, format)
}
