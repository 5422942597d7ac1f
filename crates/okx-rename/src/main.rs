//! OKX rename CLI
//!
//! Renumbers the `name` column of one CSV file, or of every CSV file under a
//! directory, using a template such as `{0} #{1}`.

use clap::Parser;
use okx_core::config::{
    DEFAULT_INI_PATH, DEFAULT_INPUT_PATH, DEFAULT_NAME_FORMAT, DEFAULT_NAME_PREFIX,
    DEFAULT_OUTPUT_PATH, DEFAULT_START_NUMBER,
};
use okx_core::{rename_path, NameFormat, RenameConfig, RenameOverrides, RenameSummary};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "okx-rename")]
#[command(about = "Renumber the name column of NFT CSV files", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Path to the INI config file
    #[arg(short = 'c', long, default_value = DEFAULT_INI_PATH)]
    config: PathBuf,

    /// Input CSV file or directory
    #[arg(short = 'i', long, default_value = DEFAULT_INPUT_PATH)]
    input: String,

    /// Output file or directory
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_PATH)]
    output: String,

    /// Name prefix, substituted for {0}
    #[arg(short = 'p', long, default_value = DEFAULT_NAME_PREFIX)]
    prefix: String,

    /// Name format; {0} is the prefix, {1} the number
    #[arg(short = 'f', long, default_value = DEFAULT_NAME_FORMAT)]
    format: String,

    /// First number
    #[arg(short = 'n', long, default_value_t = DEFAULT_START_NUMBER as i64, allow_negative_numbers = true)]
    start: i64,

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

    let result = run(cli);
    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }
    wait_for_exit();
    if result.is_err() {
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> okx_core::Result<()> {
    println!("Loading config: {}", cli.config.display());
    let mut config = load_config(&cli);

    let flags = RenameOverrides {
        input: cli.input,
        output: cli.output,
        prefix: cli.prefix,
        format: cli.format,
        start: cli.start,
    };
    for field in config.apply_overrides(&flags) {
        info!(
            field = field.field,
            config = %field.previous,
            flag = %field.value,
            "command-line flag overrides config"
        );
    }

    println!(
        "Started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("  input:  {}", config.input.display());
    println!("  output: {}", config.output.display());
    println!("  start:  {}", config.start);
    println!("  prefix: {}", config.prefix);
    println!("  format: {}", config.format);

    let format = NameFormat::new(&config.format, &config.prefix);
    let summary = rename_path(&config.input, &config.output, &format, config.start)?;

    print_summary(&summary);

    Ok(())
}

/// Load the config file, falling back to built-in defaults on any failure
fn load_config(cli: &Cli) -> RenameConfig {
    match RenameConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            let config = RenameConfig::default();
            warn!(error = %e, "failed to load config, using defaults");
            warn!(
                input = %config.input.display(),
                output = %config.output.display(),
                prefix = %config.prefix,
                format = %config.format,
                start = config.start,
                "default config"
            );
            config
        }
    }
}

fn print_summary(summary: &RenameSummary) {
    for file in &summary.files {
        println!(
            "Processed {}: {} rows updated",
            file.display_path.display(),
            file.rows
        );
    }

    println!();
    println!("Finished:");

    if summary.files.is_empty() {
        println!("  No CSV files were processed");
    } else {
        println!("  CSV files processed: {}", summary.files_processed());
        println!("  Rows updated: {}", summary.rows_updated());
        if let Some(last) = summary.last_number() {
            println!("  Last number: {}", last);
        }
    }

    if !summary.failures.is_empty() {
        println!("  Files skipped: {}", summary.failures.len());
    }
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

/// Keep the console window open when launched by double-click on Windows
#[cfg(windows)]
fn wait_for_exit() {
    println!();
    println!("Press Enter to exit...");
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}

#[cfg(not(windows))]
fn wait_for_exit() {}
