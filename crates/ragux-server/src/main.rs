//! Ragux: mock backend for the research-assistant UI.

use std::path::PathBuf;
use std::sync::Arc;

use ragux_core::RaguxConfig;
use ragux_resolve::{MockCorpus, MockGenerator};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod delay;
mod error;
mod routes;
mod state;

use state::AppState;

/// Load and check a corpus, print what was found. Returns success.
fn check_corpus(path: Option<PathBuf>) -> bool {
    let label = path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "builtin".to_string());

    match MockCorpus::load_or_builtin(path.as_deref()) {
        Ok(corpus) => {
            let stats = corpus.stats();
            println!("Corpus: {}", label);
            println!("  quotes:  {}", stats.quotes);
            println!("  sources: {}", stats.sources);
            println!("  images:  {}", stats.images);
            println!("  integrity: ok");
            true
        }
        Err(e) => {
            eprintln!("Corpus: {}", label);
            eprintln!("  {}", e);
            false
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = RaguxConfig::from_env();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "--check-corpus" | "check-corpus" => {
                let path = args
                    .get(2)
                    .map(PathBuf::from)
                    .or_else(|| config.corpus_path.clone());
                std::process::exit(if check_corpus(path) { 0 } else { 1 });
            }
            "--help" | "-h" | "help" => {
                println!("Ragux — mock research-assistant API");
                println!();
                println!("Usage: ragux [command]");
                println!();
                println!("Commands:");
                println!("  (none)                   Start the server");
                println!("  check-corpus [path]      Validate a corpus file (default: RAGUX_CORPUS or builtin)");
                println!("  help                     Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'ragux help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    let corpus = MockCorpus::load_or_builtin(config.corpus_path.as_deref())?;
    info!(
        "Corpus ready: {} ({} quotes, {} sources, {} images)",
        config
            .corpus_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin".into()),
        corpus.search.quotes.len(),
        corpus.search.sources.len(),
        corpus.search.images.len(),
    );
    info!(
        "Simulated latency: search={}ms followup={}ms answer={}ms",
        config.latency.search_ms, config.latency.followup_ms, config.latency.answer_ms
    );

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, Arc::new(MockGenerator::new(corpus)))?);

    // Build router
    let app = routes::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Ragux server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
