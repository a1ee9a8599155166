use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use almost_lisp::{Repl, ReplConfig, Session};

#[derive(Parser)]
#[command(author, version, about = "almost-lisp interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive REPL session
    Repl {
        /// Prompt shown before each line
        #[arg(long, default_value = "|> ")]
        prompt: String,

        /// Print the syntax tree instead of evaluating
        #[arg(long)]
        parse_only: bool,
    },
    /// Evaluate a source file
    Run { script: PathBuf },
    /// Evaluate a snippet of source code
    Eval { source: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        None => run_repl(ReplConfig::default()),
        Some(Command::Repl { prompt, parse_only }) => run_repl(ReplConfig {
            prompt,
            parse_only,
            ..ReplConfig::default()
        }),
        Some(Command::Run { script }) => {
            let source = fs::read_to_string(&script)
                .with_context(|| format!("failed to read {}", script.display()))?;
            eval_and_print(&source)
        }
        Some(Command::Eval { source }) => eval_and_print(&source),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run_repl(config: ReplConfig) -> Result<()> {
    let repl = Repl::new(config);
    repl.run().context("REPL input failed")
}

fn eval_and_print(source: &str) -> Result<()> {
    let session = Session::new();
    let outcomes = session.eval_source(source).context("syntax error")?;

    let mut failures = 0;
    for outcome in outcomes {
        match outcome {
            Ok(entity) => println!("{}", entity),
            Err(err) => {
                failures += 1;
                eprintln!("{}", err.diagnostic());
            }
        }
    }

    if failures > 0 {
        bail!("{} expression(s) failed", failures);
    }
    Ok(())
}
