//! # dirsort
//!
//! List the immediate entries of a directory, each with its total size, sorted
//! by size. Directory sizes are the sum of every regular file below them.
//!
//! ## Usage
//!
//! ```bash
//! # Current directory, smallest first
//! dirsort
//!
//! # Another directory, largest first
//! dirsort --root ~/Downloads --sort desc
//!
//! # Machine-readable output
//! dirsort --root /var/log --json
//! ```

mod cli;

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use dirsort::{
    config::{FileConfig, resolve_root},
    output::JsonOutput,
    report::Report,
    sizer::DirectorySizer,
};
use std::process::exit;

/// Entry point for the dirsort application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err:#}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parse arguments, validate the sort order before any traversal, build the
/// report, then print it as text or JSON.
///
/// # Errors
///
/// Returns errors from root resolution, an unreadable root, thread-pool
/// creation, or JSON serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);

    let order = match args.sort_order(&file_config) {
        Ok(order) => order,
        Err(err) => {
            println!("Error: {err}");
            println!("{}", Cli::command().render_help());
            exit(1);
        }
    };

    let root = resolve_root(args.root(&file_config).as_deref())?;
    let sizer = DirectorySizer::new(args.scan_options(&file_config)).with_quiet(json_mode);
    let report = Report::build(&root, order, &sizer)?;

    if json_mode {
        let output = JsonOutput::from_report(&report);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for warning in &report.warnings {
        eprintln!("{} {warning}", "Warning:".yellow());
    }

    report.entries.print_listing();

    eprintln!(
        "{}",
        format!(
            "Listed {} entries ({} directories sized) in {:.2?}",
            report.entries.len(),
            report.directories_sized,
            report.elapsed
        )
        .dimmed()
    );

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# dirsort configuration
# All values shown are their defaults. Uncomment and change as needed.

# Directory whose entries are listed (defaults to the current directory when not set)
# root = "."

# Sort order by size: asc or desc
# sort = "asc"

[scanning]
# Number of threads for the size walk (0 = all CPU cores)
# threads = 0

# Trace every directory entered during the size walk
# verbose = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load_from(p)?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show<T: ToString>(val: Option<T>, default: &str) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    format!(
        "\
root     = {root}
sort     = {sort}

[scanning]
threads  = {threads}
verbose  = {verbose}",
        root = show(
            config.root.as_ref().map(|p| format!("\"{}\"", p.display())),
            "\".\""
        ),
        sort = show(config.sort.as_ref().map(|s| format!("\"{s}\"")), "\"asc\""),
        threads = show(config.scanning.threads, "0 (all cores)"),
        verbose = show(config.scanning.verbose, "false"),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}
