//! bindcov CLI - checks that a binding package wraps every declared native function.
//!
//! Runs one coverage check and exits with:
//! - `0` when every declared function is bound or ignored
//! - `1` when any function is missing or any header/module could not be scanned
//! - `2` when the configuration is unusable

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use bindcov_core::{
    init_structured_logging, load_config, load_config_file, print_json, print_plain, Bindcov,
    CoverageConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Binding coverage checker for macro-declared C functions")]
pub struct Cli {
    /// Directory holding the native library's headers
    #[arg(long, value_name = "DIR")]
    header_root: Option<PathBuf>,

    /// Root of the binding package (default: ./allegro)
    #[arg(long, value_name = "DIR")]
    package_root: Option<PathBuf>,

    /// Configuration file (default: ./bindcov.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Foreign-call marker preceding bound function names
    #[arg(long)]
    marker: Option<String>,

    /// Extension of binding source files
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,

    /// Additional function names to ignore
    #[arg(long, num_args = 1..)]
    ignore: Vec<String>,

    /// Do not apply the built-in ignore list
    #[arg(long)]
    no_default_ignore: bool,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON on stderr
    #[arg(long)]
    log_json: bool,
}

/// Resolve defaults, the config file and flags, in that order.
fn build(cli: &Cli, cwd: &Path) -> Result<Bindcov> {
    let mut builder = Bindcov::from_config(CoverageConfig {
        package_root: cwd.join("allegro"),
        ..CoverageConfig::default()
    });

    let file = match &cli.config {
        Some(path) => Some(
            load_config_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
        ),
        None => load_config(cwd).context("Failed to load bindcov.toml")?,
    };
    if let Some(file) = file {
        builder = builder.with_file(file);
    }

    if let Some(root) = &cli.header_root {
        builder = builder.header_root(root);
    }
    if let Some(root) = &cli.package_root {
        builder = builder.package_root(root);
    }
    if let Some(marker) = &cli.marker {
        builder = builder.marker(marker);
    }
    if let Some(ext) = &cli.extension {
        builder = builder.source_extension(ext.trim_start_matches('.'));
    }
    if cli.no_default_ignore {
        builder = builder.default_ignore(false);
    }

    Ok(builder.ignore(cli.ignore.iter().cloned()))
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] bindcov internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 2.");
    }));

    let cli = Cli::parse();
    init_structured_logging(cli.log_json);

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let result = match build(&cli, &cwd).and_then(|b| b.run().map_err(Into::into)) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            std::process::exit(2);
        }
    };

    if cli.json {
        print_json(&result);
    } else {
        print_plain(&result);
    }

    std::process::exit(if result.is_clean() { 0 } else { 1 });
}
