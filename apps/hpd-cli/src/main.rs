use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

use entity_registry as registry;
use entity_registry::{DescriptorKind, Hub, Platform};

#[derive(Parser, Debug)]
#[command(
    name = "hpd",
    version,
    about = "Heat pump descriptor registry CLI",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the registered platforms and their descriptor variants
    Platforms,
    /// Resolve one platform document and report the outcome
    Validate {
        /// Document file (YAML mapping of identifier -> property bag)
        #[arg(long)]
        file: String,
        /// Platform name; defaults to the file stem
        #[arg(long)]
        platform: Option<String>,
    },
    /// Resolve every document in a directory
    ValidateDir {
        /// Directory of <platform>.yaml documents
        #[arg(long)]
        dir: String,
    },
    /// Resolve a directory of documents and export the emission graph
    Emit {
        /// Directory of <platform>.yaml documents
        #[arg(long)]
        dir: String,
        /// Owning hub component identifier
        #[arg(long, default_value = "heatpump")]
        hub: String,
        /// Output JSON path; stdout when omitted
        #[arg(long)]
        to: Option<String>,
    },
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Platforms => platforms(),
        Commands::Validate { file, platform } => validate_file(&file, platform.as_deref()),
        Commands::ValidateDir { dir } => validate_dir(&dir),
        Commands::Emit { dir, hub, to } => emit(&dir, &hub, to.as_deref()),
    }
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn platforms() -> Result<()> {
    for platform in Platform::standard()? {
        for kind in platform.kinds() {
            let caps = kind.capabilities();
            let extractors: Vec<&str> = kind
                .allowed_extractors()
                .iter()
                .map(|e| e.name())
                .collect();
            println!(
                "{:<14} id={:<4} readable={:<5} writable={:<5} extractors={}",
                platform.name(),
                kind.identifier_field()?.name(),
                caps.readable,
                caps.writable,
                extractors.join(",")
            );
        }
    }
    Ok(())
}

fn platform_by_name(name: &str) -> Result<Platform> {
    Platform::standard()?
        .into_iter()
        .find(|p| p.name() == name)
        .with_context(|| {
            let known: Vec<&str> = DescriptorKind::ALL.iter().map(|k| k.name()).collect();
            format!("no platform named `{name}`; known: {}", known.join(", "))
        })
}

fn validate_file(file: &str, platform: Option<&str>) -> Result<()> {
    let stem = std::path::Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .context("unreadable file name")?;
    let platform = platform_by_name(platform.unwrap_or(stem))?;

    let document = registry::load_document_file(file)?;
    let resolved = platform
        .resolve_document(&document)
        .with_context(|| format!("resolving {file}"))?;

    info!(platform = platform.name(), entities = resolved.len(), "document valid");
    for (key, descriptor) in resolved.iter() {
        println!(
            "{:<8} {:<14} {:<28} extractor={}",
            key.to_string(),
            descriptor.kind().name(),
            descriptor.name(),
            descriptor.extractor().kind().name()
        );
    }
    Ok(())
}

fn validate_dir(dir: &str) -> Result<()> {
    let mut total = 0usize;
    for (platform, document) in registry::load_platform_dir(dir)? {
        let resolved = platform
            .resolve_document(&document)
            .with_context(|| format!("resolving platform `{}`", platform.name()))?;
        println!("{:<14} {} entities", platform.name(), resolved.len());
        total += resolved.len();
    }
    info!(total, "all documents valid");
    Ok(())
}

#[derive(Serialize)]
struct EmissionGraph {
    hub: Hub,
    entities: Vec<registry::EmittedEntity>,
}

fn emit(dir: &str, hub_id: &str, to: Option<&str>) -> Result<()> {
    let mut hub = Hub::new(hub_id);
    let mut entities = Vec::new();
    for (platform, document) in registry::load_platform_dir(dir)? {
        let resolved = platform
            .resolve_document(&document)
            .with_context(|| format!("resolving platform `{}`", platform.name()))?;
        entities.extend(registry::emit_platform(&resolved, &mut hub)?);
    }

    let graph = EmissionGraph { hub, entities };
    match to {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {path}"))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &graph)?;
            writer.flush()?;
            info!(path, entities = graph.entities.len(), "emission graph written");
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&graph)?);
        }
    }
    Ok(())
}
