use clap::{Parser, Subcommand};
use hrsn_core::{EngineConfig, InMemoryStore, ProcessingOutcome, ScreeningEngine};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hrsn")]
#[command(about = "HRSN screening bundle intake CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process bundle files into screening sessions
    Process {
        /// Bundle JSON files
        files: Vec<PathBuf>,
        /// Pretty-print outcome JSON
        #[arg(long)]
        pretty: bool,
        /// Reject bundles with incomplete screenings
        #[arg(long)]
        require_complete: bool,
    },
    /// Decode bundle files and report their resource counts
    Validate {
        /// Bundle JSON files
        files: Vec<PathBuf>,
    },
    /// List the screening question catalog
    Catalog,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hrsn_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Process {
            files,
            pretty,
            require_complete,
        }) => {
            let mut config = EngineConfig::from_env();
            if require_complete {
                config.require_complete_screening = true;
            }
            process_files(&files, config, pretty)
        }
        Some(Commands::Validate { files }) => validate_files(&files),
        Some(Commands::Catalog) => {
            print_catalog();
            Ok(())
        }
        None => {
            println!("Use 'hrsn --help' for commands");
            Ok(())
        }
    }
}

/// Runs every file through one engine over a shared in-memory store, so a
/// batch exercises cross-bundle identity resolution the way a service
/// instance would.
fn process_files(files: &[PathBuf], config: EngineConfig, pretty: bool) -> anyhow::Result<()> {
    tracing::info!("processing {} bundle file(s)", files.len());

    let engine = ScreeningEngine::new(Arc::new(InMemoryStore::new()), config);
    let mut failures = 0usize;

    for file in files {
        match process_file(&engine, file, pretty) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("Error processing {}: {:#}", file.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} bundle(s) failed", failures, files.len());
    }
    Ok(())
}

fn process_file(
    engine: &ScreeningEngine<InMemoryStore>,
    file: &Path,
    pretty: bool,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)?;
    let outcome = engine.process_json(&text)?;
    println!("{}", render_outcome(&outcome, pretty)?);
    Ok(())
}

fn render_outcome(outcome: &ProcessingOutcome, pretty: bool) -> anyhow::Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(outcome)?
    } else {
        serde_json::to_string(outcome)?
    };
    Ok(rendered)
}

fn validate_files(files: &[PathBuf]) -> anyhow::Result<()> {
    let mut failures = 0usize;

    for file in files {
        match validate_file(file) {
            Ok(summary) => println!("{}: {}", file.display(), summary),
            Err(e) => {
                eprintln!("{}: invalid - {:#}", file.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} bundle(s) invalid", failures, files.len());
    }
    Ok(())
}

fn validate_file(file: &Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(file)?;
    let bundle = hrsn_fhir::Bundle::from_json(&text)?;
    let total = bundle.len();
    let groups = bundle.into_groups();
    Ok(format!(
        "{} entries ({} patient, {} organization, {} encounter, {} consent, {} observation, {} questionnaire response, {} other)",
        total,
        groups.patients.len(),
        groups.organizations.len(),
        groups.encounters.len(),
        groups.consents.len(),
        groups.observations.len(),
        groups.questionnaire_responses.len(),
        groups.unrecognized.len()
    ))
}

fn print_catalog() {
    for question in hrsn_catalog::catalog().questions() {
        let kind = if question.safety_total {
            "total"
        } else if question.is_safety() {
            "safety"
        } else {
            "need"
        };
        println!(
            "{}  [{}] [{}] {}",
            question.code,
            kind,
            question.primary_category(),
            question.text
        );
    }
}
