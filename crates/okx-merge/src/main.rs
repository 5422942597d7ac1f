//! OKX merge CLI
//!
//! Flattens a child metadata batch, plus the traits it inherits from a
//! parent batch, into a single CSV ready for OKX import.

use clap::Parser;
use okx_core::{load_items, load_overrides, merge_items, AttributeIndex, MergeConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "okx-merge")]
#[command(about = "Merge parent/child NFT metadata into an OKX CSV", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Path to the INI config file
    #[arg(short = 'c', long, default_value = "convert_okx.ini")]
    config: PathBuf,

    /// Output CSV file
    #[arg(short = 'o', long, default_value = "okx.csv")]
    output: PathBuf,

    /// Print version information and exit
    #[arg(short = 'v', long)]
    version: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        print_version();
        return;
    }

    init_logging();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> okx_core::Result<()> {
    let config = MergeConfig::load(&cli.config)?;

    let parents = load_items(&config.file1)?;
    let mut index = AttributeIndex::from_items(&parents);
    println!(
        "Loaded {} parent items from {}",
        parents.len(),
        config.file1.display()
    );

    if let Some(dir) = &config.dir2 {
        let overrides = load_overrides(dir)?;
        let applied = index.apply_overrides(&overrides);
        info!(dir = %dir.display(), overrides = applied, "applied manual overrides");
        println!("Applied {} overrides from {}", applied, dir.display());
    }

    let children = load_items(&config.file2)?;
    println!(
        "Loaded {} child items from {}",
        children.len(),
        config.file2.display()
    );

    let table = merge_items(&children, &config.parent_key, &index);
    table.write_csv(&cli.output)?;

    println!(
        "Exported {} rows ({} columns) to {}",
        table.row_count(),
        table.column_count(),
        cli.output.display()
    );

    Ok(())
}

fn print_version() {
    println!("Name: {}", env!("CARGO_PKG_NAME"));
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "OS/Arch: {}/{}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
