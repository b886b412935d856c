use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use balise::config::Config;
use balise::model::AuditRequest;
use balise::pipeline::Analyzer;

/// Balise: suggestions de mots-clés SEO pour sites français.
///
/// Reads a crawl JSON file (audit id + pages) and produces ranked
/// keyword suggestions with evidence, plus labeled topic clusters.
#[derive(Parser)]
#[command(name = "balise", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis on a crawl file
    Analyze {
        /// Path to the crawl JSON file ({"audit_id": ..., "pages": [...]})
        file: PathBuf,

        /// Maximum number of suggestions to keep
        #[arg(long)]
        limit: Option<usize>,

        /// Override the minimum aggregate score threshold
        #[arg(long)]
        min_score: Option<f64>,

        /// Emit the report as JSON instead of the terminal table
        #[arg(long)]
        json: bool,
    },

    /// Extract only the topic clusters from a crawl file
    Topics {
        /// Path to the crawl JSON file
        file: PathBuf,

        /// How many topics to extract
        #[arg(long, default_value = "5")]
        count: usize,

        /// Emit the topics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the analysis engine over HTTP
    #[cfg(feature = "web")]
    Serve {
        #[arg(long, default_value = "8080")]
        port: u16,

        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

fn main() -> Result<()> {
    // Load .env if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("balise=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            limit,
            min_score,
            json,
        } => {
            let mut config = Config::load()?;
            if let Some(min_score) = min_score {
                config.min_score = min_score;
            }
            let limit = limit.unwrap_or(config.suggestion_limit);

            let request = read_crawl_file(&file)?;
            info!(
                audit_id = %request.audit_id,
                pages = request.pages.len(),
                "starting analysis"
            );

            let analyzer = Analyzer::new(&config);
            let report = analyzer.analyze(&request.audit_id, &request.pages, limit)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                balise::output::terminal::display_report(&report);
                println!(
                    "{}",
                    format!(
                        "{} suggestions, {} thèmes.",
                        report.suggestions.len(),
                        report.topics.len()
                    )
                    .bold()
                );
            }
        }

        Commands::Topics { file, count, json } => {
            let request = read_crawl_file(&file)?;

            let texts: Vec<String> = request
                .pages
                .iter()
                .map(balise::pipeline::page_corpus_text)
                .collect();

            let modeler = balise::topics::modeler::TopicModeler::new();
            let topics = modeler.extract_topics(&texts, count);

            if json {
                println!("{}", serde_json::to_string_pretty(&topics)?);
            } else {
                balise::output::terminal::display_topics(&topics);
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            println!(
                "{}",
                format!("Balise à l'écoute sur http://{bind}:{port}").bold()
            );
            balise::web::run_server(config, port, &bind)?;
        }
    }

    Ok(())
}

/// Read and validate a crawl file before handing it to the engine.
///
/// An audit without an identifier or without pages is rejected here —
/// the engine itself never sees it.
fn read_crawl_file(path: &PathBuf) -> Result<AuditRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read crawl file {}", path.display()))?;
    let request: AuditRequest = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid crawl file", path.display()))?;

    if request.audit_id.trim().is_empty() {
        anyhow::bail!(
            "crawl file {} has no audit_id.\n\
             Every analysis request must carry an audit identifier.",
            path.display()
        );
    }
    if request.pages.is_empty() {
        anyhow::bail!(
            "crawl file {} contains no pages.\n\
             Run the crawl agent first, then retry the analysis.",
            path.display()
        );
    }

    Ok(request)
}
