// sql-scriptor: turn struct/enum definition files into SQL tables and seed rows.
// Each struct becomes a CREATE TABLE, each enum a lookup table plus one INSERT
// per value.

mod emitter;
mod error;
mod logger;
mod output;
mod parser;
mod progress;
mod translator;

use clap::{CommandFactory, Parser};
use error::{Result, ScriptError};
use output::OutputTarget;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use translator::{Summary, Translator};

// Command-line flags and positional arguments.
#[derive(Parser, Debug)]
#[command(name = "sql-scriptor", author, version, about)]
struct Args {
    /// Enable debug logging (disables the progress bar).
    #[arg(long)]
    debug: bool,

    /// Show a progress bar while reading the definition file.
    #[arg(long)]
    progress: bool,

    /// Write a JSON run report (counts and unmapped types) to this file.
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Definition file to translate.
    input: PathBuf,

    /// Output directory. Defaults to the input file's directory.
    output_dir: Option<PathBuf>,

    /// Output file name. Defaults to the input name with a .sql extension.
    file_name: Option<String>,
}

fn main() -> ExitCode {
    if std::env::args().len() == 1 {
        let _ = Args::command().print_help();
        eprintln!();
        return ExitCode::FAILURE;
    }
    let args = Args::parse();

    logger::init(args.debug);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::error("failed to translate definition file");
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: Args) -> Result<()> {
    let start = Instant::now();
    logger::info(&format!("starting sql-scriptor on {}", args.input.display()));

    let target = OutputTarget::resolve(&args.input, args.output_dir, args.file_name);
    logger::debug(&format!("main: output file {}", target.path().display()));

    // Open the input before touching the output so a missing source leaves no file behind.
    let input = File::open(&args.input).map_err(|source| ScriptError::SourceNotFound {
        path: args.input.clone(),
        source,
    })?;

    let progress = progress::ProgressManager::new(args.progress && !logger::is_debug());
    let bar = progress.new_file_bar(&args.input, "Translating");

    let mut sink = target.create()?;
    let summary = match Translator::new().translate(BufReader::new(input), &mut sink, bar) {
        Ok(summary) => {
            sink.flush()?;
            summary
        }
        Err(e) => {
            // Best effort: keep what was written, the run still fails.
            let _ = sink.flush();
            return Err(e);
        }
    };
    drop(sink);

    if let Some(path) = args.report_json.as_ref() {
        let report = serde_json::json!({
            "input": args.input.display().to_string(),
            "output": target.path().display().to_string(),
            "elapsed_ms": start.elapsed().as_millis(),
            "summary": summary,
        });
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)?;
        logger::debug(&format!("main: report written to {}", path.display()));
    }

    print_summary(&summary, &target)?;
    logger::debug(&format!("main: translation took {:?}", start.elapsed()));
    Ok(())
}

fn print_summary(summary: &Summary, target: &OutputTarget) -> Result<()> {
    let sep = "=".repeat(60);
    let mut stderr = io::stderr();
    writeln!(stderr, "{}\nSUMMARY\n{}", sep, sep)?;
    writeln!(stderr, "Output:   {}", target.path().display())?;
    writeln!(stderr, "Tables:   {}", summary.tables)?;
    writeln!(stderr, "Lookups:  {}", summary.lookups)?;
    writeln!(stderr, "Columns:  {}", summary.columns)?;
    writeln!(stderr, "Inserts:  {}", summary.inserts)?;
    if !summary.diagnostics.is_empty() {
        writeln!(stderr, "Unmapped: {}", summary.diagnostics.len())?;
        for d in &summary.diagnostics {
            writeln!(stderr, "  line {}: {} ({})", d.line, d.field, d.type_name)?;
        }
    }
    writeln!(stderr, "{}", sep)?;
    Ok(())
}
