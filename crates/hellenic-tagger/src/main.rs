use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use hellenic_types::GrammarModel;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use hellenic_tagger::{AppState, init_tracing, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_SENTENCES: usize = 1000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(std::io::stdout);

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    if config.disable_cache {
        info!("cache headers disabled");
    }
    info!("returning at most {} sentences per request", config.max_sentences);

    let start = Instant::now();
    let grammar = match &config.grammar_path {
        Some(path) => {
            info!("using grammar registry at {}", path.display());
            GrammarModel::load(path)
                .with_context(|| format!("loading grammar registry from {}", path.display()))?
        }
        None => {
            info!("using built-in Greek grammar registry");
            GrammarModel::greek()
        }
    };
    info!(
        "grammar loaded in {} ms ({} tag types, {} inflection categories)",
        start.elapsed().as_millis(),
        grammar.tag_types().len(),
        grammar.inflection_types().len()
    );

    let state = AppState {
        grammar: Arc::new(grammar),
        max_sentences: config.max_sentences,
        disable_cache: config.disable_cache,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    grammar_path: Option<PathBuf>,
    max_sentences: usize,
    disable_cache: bool,
}

fn load_config() -> Config {
    let mut disable_cache = false;
    let mut cli_grammar: Option<PathBuf> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-cache" => disable_cache = true,
            "--grammar" => {
                if let Some(path) = args.next() {
                    cli_grammar = Some(PathBuf::from(path));
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--grammar=") {
                    cli_grammar = Some(PathBuf::from(path));
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let grammar_path = cli_grammar.or_else(|| env::var("GRAMMAR_PATH").ok().map(PathBuf::from));
    let max_sentences = env::var("MAX_SENTENCES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_MAX_SENTENCES);

    Config {
        host,
        port,
        grammar_path,
        max_sentences,
        disable_cache,
    }
}
