use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info};

use hack_assembler::source::{clean_source, SourceLine};
use hack_assembler::{AssembleError, Assembler, DuplicateLabels, Options};

/// Hack assembler: translates `.asm` source into `.hack` binary text
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Input assembly file
    input: PathBuf,

    /// Output file, defaults to the input with a `.hack` extension
    output: Option<PathBuf>,

    /// Treat a second definition of the same label as an error
    #[arg(long)]
    strict_labels: bool,

    /// Report every failing instruction instead of stopping at the first
    #[arg(long, short)]
    keep_going: bool,

    /// Log pass summaries
    #[arg(long, short)]
    verbose: bool,
}

fn report(err: &AssembleError, lines: &[SourceLine]) {
    let number = lines.get(err.index).map_or(0, |l| l.number);
    error!("{}: '{}': {}", number, err.text, err.kind);
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("read source file {}", args.input.display()))?;
    let lines = clean_source(&text);

    let options = Options {
        duplicate_labels: if args.strict_labels {
            DuplicateLabels::Reject
        } else {
            DuplicateLabels::Overwrite
        },
    };
    let assembler = Assembler::new().options(options);

    let words = if args.keep_going {
        let result = assembler.assemble_reporting(&lines);
        for err in &result.errors {
            report(err, &lines);
        }
        if !result.is_ok() {
            bail!("{} instructions failed to assemble", result.errors.len());
        }
        result.words
    } else {
        match assembler.assemble(&lines) {
            Ok(words) => words,
            Err(err) => {
                report(&err, &lines);
                bail!("assembly of {} failed", args.input.display());
            }
        }
    };

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("hack"));
    let mut out = String::with_capacity(words.len() * 17);
    for word in &words {
        out.push_str(&word.to_string());
        out.push('\n');
    }
    fs::write(&output, out).with_context(|| format!("write {}", output.display()))?;
    info!("{} -> {} ({} words)", args.input.display(), output.display(), words.len());
    Ok(())
}
