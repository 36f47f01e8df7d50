use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use role_registry::{load_roles, ParseMode, StaticAuthority};

/// Role definition checker
///
/// Parses and validates a role definition document the way the registry
/// would at runtime, and reports every violation it finds.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a document
    Check {
        /// Path to the document
        file: PathBuf,

        /// Record violations and continue instead of stopping at the first
        #[clap(long)]
        lenient: bool,
    },

    /// List the roles a document defines
    List {
        /// Path to the document
        file: PathBuf,

        /// Record violations and continue instead of stopping at the first
        #[clap(long)]
        lenient: bool,

        /// Print the full model as JSON
        #[clap(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Check { file, lenient } => {
            let loaded = load(&file, lenient)?;
            for diagnostic in &loaded.diagnostics {
                println!("warning: {}", diagnostic);
            }
            println!(
                "{} role(s), {} diagnostic(s)",
                loaded.roles.len(),
                loaded.diagnostics.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::List {
            file,
            lenient,
            json,
        } => {
            let loaded = load(&file, lenient)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&loaded.roles)?);
            } else {
                let mut names: Vec<&String> = loaded.roles.keys().collect();
                names.sort();
                for name in names {
                    let role = &loaded.roles[name];
                    println!(
                        "{} (exclusive: {}, {} permission(s), {} component(s), {} app op(s))",
                        role.name,
                        role.exclusive,
                        role.permissions.len(),
                        role.required_components.len(),
                        role.app_ops.len()
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load(file: &Path, lenient: bool) -> anyhow::Result<role_registry::LoadedRoles> {
    let document = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let mode = if lenient {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    };

    // The real platform authority is not available from the command line;
    // name-space checks are skipped, structural checks still apply.
    let authority = StaticAuthority::permissive();

    let loaded = load_roles(&document, &authority, mode)
        .with_context(|| format!("invalid role definitions in {}", file.display()))?;
    log::debug!(
        "Loaded {} role(s) from {} with {} diagnostic(s)",
        loaded.roles.len(),
        file.display(),
        loaded.diagnostics.len()
    );
    Ok(loaded)
}
