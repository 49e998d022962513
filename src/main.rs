use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use itinerary::{statement::DEFAULT_SEPARATOR, Itinerary, StatementSyntax};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `[a, b, c]`
    List,
    /// One item per line.
    Lines,
    /// A JSON array of names.
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "itinerary",
    about = "Order named items from `DESTINATION => PREDECESSOR` statements."
)]
struct Cli {
    /// Statements such as "x => z" or "h =>". Read from --file or stdin when none are given.
    statements: Vec<String>,
    /// File with one statement per line. Blank lines and comment lines (`#` alone or `# ` followed by text) are skipped.
    #[arg(long, short, value_name = "FILE", conflicts_with = "statements")]
    file: Option<PathBuf>,
    /// Token between destination and predecessor.
    #[arg(long, value_name = "TOKEN", default_value = DEFAULT_SEPARATOR)]
    separator: String,
    /// How the ordering is printed.
    #[arg(long, value_enum, default_value_t = OutputFormat::List)]
    format: OutputFormat,
    /// Log insertion steps to stderr (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let syntax = StatementSyntax::new(&cli.separator).context("invalid --separator")?;
    let statements = if !cli.statements.is_empty() {
        cli.statements
    } else if let Some(path) = &cli.file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read statements from {}", path.display()))?;
        statement_lines(&text)
    } else {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read statements from stdin")?;
        statement_lines(&text)
    };

    info!(statements = statements.len(), "planning");
    let itinerary = syntax
        .plan(&statements)
        .context("no itinerary could be planned")?;
    info!(stops = itinerary.len(), "planned");

    let mut stdout = io::stdout().lock();
    write_itinerary(&mut stdout, &itinerary, cli.format)?;
    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {e}"))
}

fn statement_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != "#" && !line.starts_with("# "))
        .map(str::to_owned)
        .collect()
}

fn write_itinerary(
    writer: &mut impl Write,
    itinerary: &Itinerary,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::List => writeln!(writer, "{itinerary}")?,
        OutputFormat::Lines => {
            for item in itinerary {
                writeln!(writer, "{item}")?;
            }
        }
        OutputFormat::Json => {
            let names: Vec<&str> = itinerary.iter().map(|item| item.as_str()).collect();
            serde_json::to_writer_pretty(&mut *writer, &names)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
