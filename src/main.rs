//! Variant Picker - Main entry point
//!
//! Headless driver around the selection filter: validate catalogs, list the
//! options left after a set of choices, resolve choices, or pick interactively.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use variant_picker::cli::{Cli, Commands};
use variant_picker::session::{run_session, write_view};
use variant_picker::{Catalog, OutputFormat, VariantPicker};

/// Initialize the logger; RUST_LOG overrides the default level
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    debug!("CLI arguments parsed");

    let output_format = cli.command.output_format();
    match cli.command {
        Commands::Validate { catalog } => {
            info!("Validating catalog file: {:?}", catalog);
            let loaded = Catalog::load_from_file(&catalog)?;
            match loaded.validate() {
                Ok(()) => {
                    println!(
                        "✓ Catalog is valid: {} attributes, {} variants",
                        loaded.attributes.len(),
                        loaded.variants.len()
                    );
                }
                Err(e) => {
                    error!("Catalog validation failed: {}", e);
                    eprintln!("✗ {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Options {
            catalog, select, ..
        } => {
            let mut picker = load_picker(&catalog)?;
            if let Err(e) = picker.choose_in_order(&select) {
                // Still show where the selection stopped
                eprintln!("✗ {}", e);
            }
            print_view(&picker, output_format)?;
        }
        Commands::Resolve { catalog, select } => {
            let mut picker = load_picker(&catalog)?;
            if let Err(e) = picker.choose_in_order(&select) {
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }
            let view = picker.view();
            match view.resolved {
                Some(id) if view.status.is_purchasable() => println!("{}", id),
                _ => {
                    eprintln!("✗ {}", view.status_text());
                    std::process::exit(1);
                }
            }
        }
        Commands::Interactive { catalog } => {
            let mut picker = load_picker(&catalog)?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_session(&mut picker, stdin.lock(), &mut stdout)?;
        }
    }

    Ok(())
}

/// Load and validate a catalog, then wrap it in a picker
fn load_picker(path: &Path) -> Result<VariantPicker> {
    let filter = Catalog::load_from_file(path)?.into_filter()?;
    Ok(VariantPicker::new(filter))
}

fn print_view(picker: &VariantPicker, format: OutputFormat) -> Result<()> {
    let view = picker.view();
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => write_view(&mut stdout, &view)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &view)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
