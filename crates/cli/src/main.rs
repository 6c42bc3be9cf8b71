//! Ampoule CLI - inspect and unpack result archives.
//!
//! Single-command mode:
//! - `ampoule peek ARCHIVE` prints the identity record without unpacking
//! - `ampoule extract ARCHIVE [-o DIR]` materializes the archive tree
//! - `ampoule validate ARCHIVE` fully loads the archive and reports its kind
//!
//! `--json` switches reporting to line-oriented JSON for scripting. Logs go
//! to stderr and are controlled by `RUST_LOG`.

use std::path::Path;
use std::process;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};

use ampoule::PipelineResult;

fn build_cli() -> Command {
    Command::new("ampoule")
        .about("Inspect and unpack ampoule result archives")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json")
                .long("json")
                .help("Report as line-oriented JSON")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("peek")
                .about("Print an archive's identity record without unpacking it")
                .arg(Arg::new("archive").required(true).value_name("ARCHIVE")),
        )
        .subcommand(
            Command::new("extract")
                .about("Materialize an archive's contents for manual inspection")
                .arg(Arg::new("archive").required(true).value_name("ARCHIVE"))
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("DIR")
                        .default_value(".")
                        .help("Directory to extract under"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Fully load an archive and report what it holds")
                .arg(Arg::new("archive").required(true).value_name("ARCHIVE")),
        )
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    // Globals propagate down into the subcommand's matches, so the leaf is
    // the one place the flag is always visible.
    let json = match matches.subcommand() {
        Some((_, sub)) => sub.get_flag("json"),
        None => matches.get_flag("json"),
    };

    if let Err(e) = run(&matches, json) {
        if json {
            eprintln!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
        } else {
            eprintln!("error: {:#}", e);
        }
        process::exit(1);
    }
}

fn run(matches: &ArgMatches, json: bool) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("peek", sub)) => peek(archive_arg(sub)?, json),
        Some(("extract", sub)) => {
            let output = sub
                .get_one::<String>("output")
                .map(String::as_str)
                .unwrap_or(".");
            extract(archive_arg(sub)?, Path::new(output), json)
        }
        Some(("validate", sub)) => validate(archive_arg(sub)?, json),
        _ => anyhow::bail!("unknown command"),
    }
}

fn archive_arg(sub: &ArgMatches) -> anyhow::Result<&Path> {
    sub.get_one::<String>("archive")
        .map(|s| Path::new(s.as_str()))
        .context("ARCHIVE argument is required")
}

fn peek(path: &Path, json: bool) -> anyhow::Result<()> {
    let record =
        PipelineResult::peek(path).with_context(|| format!("peek {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string(&record)?);
    } else {
        println!("uuid:   {}", record.uuid);
        println!("type:   {}", record.type_name);
        println!("format: {}", record.format.as_deref().unwrap_or("-"));
    }
    Ok(())
}

fn extract(path: &Path, output: &Path, json: bool) -> anyhow::Result<()> {
    let root = PipelineResult::extract(path, output)
        .with_context(|| format!("extract {}", path.display()))?;

    if json {
        println!("{}", serde_json::json!({ "root": root }));
    } else {
        println!("{}", root.display());
    }
    Ok(())
}

fn validate(path: &Path, json: bool) -> anyhow::Result<()> {
    let result =
        PipelineResult::load(path).with_context(|| format!("validate {}", path.display()))?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "uuid": result.uuid().to_string(),
                "kind": result.kind().as_str(),
                "type": result.semantic_type().name(),
            })
        );
    } else {
        println!(
            "ok: {} {} ({})",
            result.kind(),
            result.uuid(),
            result.semantic_type()
        );
    }
    Ok(())
}
