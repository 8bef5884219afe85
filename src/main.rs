//! kgqa CLI: question answering over triplet knowledge graphs.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use kgqa::embed::{Embedder, HashEmbedder, OllamaEmbedder};
use kgqa::error::PipelineError;
use kgqa::expand::{OllamaExpander, PassthroughExpander, QueryExpander};
use kgqa::graph::KnowledgeGraph;
use kgqa::index::RelationIndex;
use kgqa::ollama::{OllamaClient, OllamaConfig};
use kgqa::pipeline::{self, Pipeline, PipelineConfig, QueryCase};
use kgqa::triplet::load_triplets;

#[derive(Parser)]
#[command(name = "kgqa", version, about = "Question answering over triplet knowledge graphs")]
struct Cli {
    /// Embedding dimension for the built-in hash embedder.
    #[arg(long, global = true, default_value = "384")]
    embed_dim: usize,

    /// Base URL for the Ollama API.
    #[arg(long, global = true, default_value = "http://localhost:11434")]
    ollama_url: String,

    /// Generative model for query expansion (used with --expand).
    #[arg(long, global = true, default_value = "llama3.2")]
    model: String,

    /// Ollama embedding model; replaces the built-in hash embedder when set.
    #[arg(long, global = true)]
    embed_model: Option<String>,

    /// Expand queries with the generative model instead of passing them through.
    #[arg(long, global = true)]
    expand: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: expand, retrieve, select, and score each query.
    Run {
        /// Path to the triplet file, one ('head', 'relation', 'tail') per line.
        #[arg(long)]
        triplets: PathBuf,

        /// JSON file of query cases; defaults to the built-in evaluation set.
        #[arg(long)]
        queries: Option<PathBuf>,

        /// Retrieval depth per expanded query.
        #[arg(long, default_value = "3")]
        top_k: usize,
    },

    /// Retrieve the most similar relation phrases for one query, bypassing expansion.
    Retrieve {
        /// Path to the triplet file.
        #[arg(long)]
        triplets: PathBuf,

        /// The query to retrieve for.
        #[arg(long)]
        query: String,

        /// Number of results to return.
        #[arg(long, default_value = "3")]
        top_k: usize,
    },

    /// Show triplet, node, and edge counts for a triplet file.
    Info {
        /// Path to the triplet file.
        #[arg(long)]
        triplets: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let embedder = build_embedder(&cli)?;

    match &cli.command {
        Commands::Run {
            triplets,
            queries,
            top_k,
        } => {
            let expander = build_expander(&cli)?;
            let loaded = load_triplets(triplets)?;
            println!("Loaded {} triplets from {}", loaded.len(), triplets.display());

            let kg = KnowledgeGraph::build(&loaded);
            println!(
                "Knowledge graph built: {} nodes, {} edges",
                kg.node_count(),
                kg.edge_count()
            );

            let index = RelationIndex::build(&loaded, embedder.as_ref())?;
            let cases = match queries {
                Some(path) => load_query_cases(path)?,
                None => pipeline::demo_cases(),
            };

            let pipeline = Pipeline::new(
                index,
                embedder.as_ref(),
                expander.as_ref(),
                PipelineConfig { top_k: *top_k },
            );
            let reports = pipeline.run(&cases)?;

            for report in &reports {
                println!("\nOriginal Query: {}", report.query);
                println!("Expanded Queries: {:?}", report.expansions);
            }

            println!("\nFinal Results:");
            for (i, report) in reports.iter().enumerate() {
                println!("\nQuery {}: {}", i + 1, report.query);
                println!("Generated Response: {}", report.answer);
                println!("Ground Truth: {}", report.ground_truth);
                println!("Cosine Similarity Score: {:.4}", report.score);
            }
        }

        Commands::Retrieve {
            triplets,
            query,
            top_k,
        } => {
            let loaded = load_triplets(triplets)?;
            let index = RelationIndex::build(&loaded, embedder.as_ref())?;
            let hits = index.retrieve(embedder.as_ref(), query, *top_k)?;

            if hits.is_empty() {
                println!("No indexed relations to retrieve from.");
            } else {
                println!("Top {} matches for: {query}", hits.len());
                for (i, hit) in hits.iter().enumerate() {
                    println!("  {}. \"{}\" (similarity: {:.4})", i + 1, hit.phrase, hit.score);
                }
            }
        }

        Commands::Info { triplets } => {
            let loaded = load_triplets(triplets)?;
            let kg = KnowledgeGraph::build(&loaded);
            println!("kgqa knowledge base info");
            println!("  triplets: {}", loaded.len());
            println!("  nodes:    {}", kg.node_count());
            println!("  edges:    {}", kg.edge_count());
        }
    }

    Ok(())
}

/// Select the embedding capability: offline hash projections by default,
/// an Ollama embedding model when --embed-model is given.
fn build_embedder(cli: &Cli) -> Result<Box<dyn Embedder>> {
    match &cli.embed_model {
        Some(model) => {
            let client = OllamaClient::connect(OllamaConfig {
                base_url: cli.ollama_url.clone(),
                model: model.clone(),
                ..Default::default()
            })?;
            Ok(Box::new(OllamaEmbedder::new(client)))
        }
        None => Ok(Box::new(HashEmbedder::new(cli.embed_dim))),
    }
}

/// Select the expansion capability: passthrough by default, generative
/// expansion when --expand is given.
fn build_expander(cli: &Cli) -> Result<Box<dyn QueryExpander>> {
    if cli.expand {
        let client = OllamaClient::connect(OllamaConfig {
            base_url: cli.ollama_url.clone(),
            model: cli.model.clone(),
            ..Default::default()
        })?;
        Ok(Box::new(OllamaExpander::new(client)))
    } else {
        Ok(Box::new(PassthroughExpander))
    }
}

/// Load query cases from a JSON array of {"query", "ground_truth"} objects.
fn load_query_cases(path: &Path) -> Result<Vec<QueryCase>> {
    let content = std::fs::read_to_string(path).into_diagnostic()?;
    let cases: Vec<QueryCase> =
        serde_json::from_str(&content).map_err(|e| PipelineError::QueryLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(cases)
}
