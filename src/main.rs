use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use optally::attribution::attribute;
use optally::cli::{Cli, OutputFormat};
use optally::csv_output::CsvOutput;
use optally::json_output::JsonReport;
use optally::noise::NoiseRules;
use optally::parser::Parser;
use optally::report;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read the pasted table from a file or stdin.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let noise = match &cli.noise_rules {
        Some(path) => NoiseRules::from_toml(path)?,
        None => NoiseRules::default(),
    };

    let raw = read_input(cli.input.as_deref())?;
    let outcome = Parser::new(noise).parse(&raw);
    let config = cli.raw_config().resolve();
    let result = attribute(&outcome.events, &config);

    match cli.format {
        OutputFormat::Text => print!("{}", report::render_text(&result, &outcome.warnings)),
        OutputFormat::Json => println!(
            "{}",
            JsonReport::from_result(&result, &outcome.warnings)
                .to_json()
                .context("Failed to serialize JSON report")?
        ),
        OutputFormat::Csv => print!("{}", CsvOutput::from_result(&result).to_csv()),
    }

    Ok(())
}
