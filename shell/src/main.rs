use anyhow::Result;
use clap::Parser;
use lending_core::LendingLibrary;
use lending_shell::command::help_text;
use lending_shell::{load_catalog, render, run_line};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "lending-shell")]
#[command(about = "Interactive lending library over JSON/JSONL catalog files", long_about = None)]
struct Args {
    /// Catalog files to load before starting the shell
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    /// Stop on the first catalog record the library rejects
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Prompt shown before each command
    #[arg(long, default_value = ">> ")]
    prompt: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();
    let prompt = std::env::var("LENDING_PROMPT").unwrap_or(args.prompt);

    let mut library = LendingLibrary::new();
    load_catalog(&mut library, &args.paths, args.strict)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    writeln!(stdout, "{}", help_text())?;
    write!(stdout, "{prompt}")?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let outcome = run_line(&mut library, &line?);
        render(&outcome, &mut stdout, &mut stderr)?;
        write!(stdout, "{prompt}")?;
        stdout.flush()?;
    }
    writeln!(stdout)?;
    Ok(())
}
