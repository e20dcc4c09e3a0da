//! Schema Closure CLI
//!
//! Prints every schema file reachable from an input file or directory through
//! `import` and `include` directives.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use schema_closure::{collect_family, ClosureConfig, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-closure")]
#[command(about = "List the schema files reachable through import and include directives")]
struct Cli {
    /// Entry schema file or directory of schemas
    input: PathBuf,

    /// Config file (in addition to schema-closure.toml lookups)
    #[arg(short, long)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print paths relative to the input root
    #[arg(short, long)]
    relative: bool,

    /// Schema file extension to pick up from directories (repeatable)
    #[arg(short, long = "ext")]
    extensions: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClosureConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;

    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.relative {
        config.output.relative = true;
    }
    if !cli.extensions.is_empty() {
        config.discovery.extensions = cli
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
    }
    if config.options.input_dir.is_none() {
        config.options.input_dir = Some(cli.input.clone());
    }

    let mut family = collect_family(&cli.input, &config.discovery, &config.options)
        .with_context(|| format!("failed to collect schemas from {}", cli.input.display()))?;

    if config.output.relative {
        family.files = family.relative_files();
    }

    match config.output.format {
        OutputFormat::Plain => {
            for file in &family.files {
                println!("{}", file.display());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&family)?);
        }
    }

    Ok(())
}
